//! End-to-end tests for the selection pipeline

use featsift::pipeline::{
    analyze, assemble_matrix, classify_columns, filters::fcbf_select, filters::pearson_scores,
    prepare_target, FeatureSelector, Mode, SelectionConfig, SelectionError, TextVectorizer,
    WrapperStrategy,
};

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_linear_feature_has_full_pearson_and_is_selected() {
    let data = common::create_linear_rows();
    let (header, rows) = data.split_first().unwrap();

    let layout = classify_columns(header, rows, "y", 20).unwrap();
    let target = prepare_target(rows, layout.target, 10);
    // Five distinct target values stay under the class threshold
    assert_eq!(target.mode(), Mode::Classification);
    let matrix = assemble_matrix(header, rows, &layout, &TextVectorizer::default()).unwrap();
    let raw = pearson_scores(&matrix, &target).unwrap();
    assert!(raw[0] >= 0.99, "Raw Pearson for x should be >= 0.99, got {}", raw[0]);

    let result = analyze(&data, "y", false).unwrap();
    assert_eq!(result.mode, Mode::Classification);
    let x = result.score("x").expect("x should be scored");
    assert_eq!(x.pearson_score, Some(1.0), "Normalized Pearson should be exactly 1.0");
    assert!(x.selected, "x should be selected");
    assert_eq!(result.selected_features, vec!["x"]);
}

#[test]
fn test_duplicate_columns_leave_one_fcbf_survivor() {
    let data = common::create_duplicate_rows();
    let (header, rows) = data.split_first().unwrap();

    let layout = classify_columns(header, rows, "label", 20).unwrap();
    let target = prepare_target(rows, layout.target, 10);
    let matrix = assemble_matrix(header, rows, &layout, &TextVectorizer::default()).unwrap();
    let survivors = fcbf_select(&matrix, &target, 10, 1e-4).unwrap();

    assert_eq!(survivors.len(), 1, "Exactly one of the duplicates should survive FCBF");
    let name = matrix.name(survivors[0]);
    assert!(name == "a" || name == "a_copy");
}

#[test]
fn test_stop_word_text_column_is_rejected() {
    let result = analyze(&common::create_stop_word_rows(), "label", false).unwrap();
    let note = result.score("note").expect("note should be reported");

    assert!(!note.selected);
    assert_eq!(note.explanation, "Rejected: No usable text tokens found");
    assert_eq!(note.final_score, 0.0);
    assert_eq!(note.mi_score, None);
    assert!(result.rejected_features.contains(&"note".to_string()));
}

#[test]
fn test_text_column_rolled_up_with_key_terms() {
    let result = analyze(&common::create_sms_rows(), "label", false).unwrap();

    assert_eq!(result.mode, Mode::Classification);
    assert!(result.score("message_id").is_none(), "ID-like column must be ignored");

    let message = result.score("message").expect("message should be reported");
    assert!(message.selected, "message should be selected: {}", message.explanation);
    let terms = message
        .explanation
        .strip_prefix("Selected due to key terms: ")
        .expect("explanation should list key terms");
    let count = terms.split(", ").count();
    assert!((1..=3).contains(&count), "Expected 1 to 3 key terms, got {}", terms);

    // Column granularity only: no token names leak into the output
    assert!(result
        .feature_scores
        .iter()
        .all(|s| s.feature_name == "message" || s.feature_name == "length"));
}

#[test]
fn test_every_column_is_either_selected_or_rejected() {
    let result = analyze(&common::create_sms_rows(), "label", false).unwrap();

    let mut names: Vec<String> = result
        .selected_features
        .iter()
        .chain(&result.rejected_features)
        .cloned()
        .collect();
    names.sort();
    assert_eq!(names, vec!["length", "message"]);
    assert_eq!(result.feature_scores.len(), 2);
}

#[test]
fn test_scores_sorted_descending() {
    let result = analyze(&common::create_regression_rows(), "price", false).unwrap();
    let finals: Vec<f64> = result.feature_scores.iter().map(|s| s.final_score).collect();
    assert!(
        finals.windows(2).all(|w| w[0] >= w[1]),
        "Scores should be sorted descending: {:?}",
        finals
    );
    for name in &result.selected_features {
        assert!(result.score(name).unwrap().selected);
    }
}

#[test]
fn test_regression_mode_and_anova_zero() {
    let result = analyze(&common::create_regression_rows(), "price", false).unwrap();

    assert_eq!(result.mode, Mode::Regression);
    for score in &result.feature_scores {
        assert_eq!(score.anova_score, Some(0.0), "ANOVA is zero for regression targets");
        assert!(score.final_score <= 1.0 + 1e-12);
    }

    let constant = result.score("constant").unwrap();
    assert_eq!(constant.pearson_score, Some(0.0));
    let signal = result.score("signal").unwrap();
    assert!(signal.selected);
    assert_eq!(signal.pearson_score, Some(1.0));
}

#[test]
fn test_analysis_is_deterministic() {
    let data = common::create_sms_rows();
    let first = analyze(&data, "label", false).unwrap();
    let second = analyze(&data, "label", false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_target_lookup_is_case_insensitive() {
    let result = analyze(&common::create_linear_rows(), "Y", false).unwrap();
    assert_eq!(result.feature_scores.len(), 1);
}

#[test]
fn test_missing_target_is_invalid_input() {
    let err = analyze(&common::create_linear_rows(), "nope", false).unwrap_err();
    assert!(matches!(err, SelectionError::InvalidInput(_)));
    assert!(err.to_string().contains("nope"));
}

#[test]
fn test_skip_text_vectorization_rejects_text_columns() {
    let err = analyze(&common::create_sms_rows(), "label", true).unwrap_err();
    match err {
        SelectionError::InvalidInput(message) => assert!(message.contains("message")),
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_skip_text_vectorization_without_text_succeeds() {
    let result = analyze(&common::create_regression_rows(), "price", true).unwrap();
    assert_eq!(result.feature_scores.len(), 3);
}

#[test]
fn test_wrapper_strategy_shows_in_explanations() {
    for strategy in [WrapperStrategy::Sbs, WrapperStrategy::Rfe] {
        let mut config = SelectionConfig::default();
        config.wrapper.strategy = strategy;
        config.wrapper.min_features = 1;
        let selector = FeatureSelector::new(config).unwrap();
        let result = selector
            .analyze(&common::create_regression_rows(), "price", false)
            .unwrap();

        let tag = format!("Selected by {}", strategy.tag());
        assert!(
            result.feature_scores.iter().any(|s| s.explanation.contains(&tag)),
            "Some feature should carry '{}'",
            tag
        );
        assert!(result
            .feature_scores
            .iter()
            .all(|s| !s.explanation.contains("Selected by SFS")));
    }
}

#[test]
fn test_tiny_dataset_degrades_instead_of_failing() {
    // Two samples: Pearson fails internally and the wrapper is skipped
    let data = common::rows(&[&["x", "y"], &["1", "a"], &["2", "b"]]);
    let result = analyze(&data, "y", false).unwrap();
    let x = result.score("x").unwrap();
    assert_eq!(x.pearson_score, None);
    assert!(x.mi_score.is_some());
}
