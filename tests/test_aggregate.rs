//! Tests for text column roll-up

use featsift::pipeline::{
    aggregate_text_columns, assemble_matrix, ColumnLayout, FeatureMatrix, FeatureScore, TextVectorizer,
};

#[path = "common/mod.rs"]
mod common;

fn token_score(name: &str, final_score: f64, selected: bool, mi: Option<f64>) -> FeatureScore {
    FeatureScore {
        feature_name: name.to_string(),
        mi_score: mi,
        pearson_score: Some(final_score / 2.0),
        anova_score: None,
        rf_importance: Some(0.1),
        final_score,
        selected,
        explanation: String::new(),
    }
}

/// `body` vocabulary: alpha, beta, gamma, delta, omega (first-seen order).
fn setup() -> (Vec<String>, ColumnLayout, FeatureMatrix) {
    let data = common::rows(&[
        &["body", "empty", "n", "y"],
        &["alpha beta gamma delta omega", "the and", "1", "a"],
        &["alpha beta", "you", "2", "b"],
    ]);
    let (header, rows) = data.split_first().unwrap();
    let layout = ColumnLayout {
        target: 3,
        numeric: vec![2],
        text: vec![0, 1],
        ignored: vec![],
    };
    let matrix = assemble_matrix(header, rows, &layout, &TextVectorizer::default()).unwrap();
    (header.clone(), layout, matrix)
}

#[test]
fn test_key_terms_top_three_by_score() {
    let (headers, layout, matrix) = setup();
    assert_eq!(
        matrix.names(),
        vec!["n", "body_alpha", "body_beta", "body_gamma", "body_delta", "body_omega"]
    );

    let scores = vec![
        token_score("n", 0.5, true, Some(0.3)),
        token_score("body_alpha", 0.2, true, Some(0.9)),
        token_score("body_beta", 0.6, true, None),
        token_score("body_gamma", 0.05, false, Some(0.1)),
        token_score("body_delta", 0.6, true, None),
        token_score("body_omega", 0.4, true, None),
    ];
    let columns = aggregate_text_columns(&headers, &layout.text, &matrix, &scores);

    assert_eq!(columns.len(), 2);
    let body = &columns[0];
    assert_eq!(body.feature_name, "body");
    assert!(body.selected);
    // Equal scores keep vocabulary order
    assert_eq!(body.explanation, "Selected due to key terms: beta, delta, omega");
    assert_eq!(body.final_score, 0.6);
    assert_eq!(body.mi_score, Some(0.9));
    assert_eq!(body.pearson_score, Some(0.3));
    assert_eq!(body.anova_score, None);
}

#[test]
fn test_column_without_vocabulary_is_synthetic_rejection() {
    let (headers, layout, matrix) = setup();
    let scores: Vec<FeatureScore> = matrix
        .names()
        .iter()
        .map(|n| token_score(n, 0.5, true, None))
        .collect();
    let columns = aggregate_text_columns(&headers, &layout.text, &matrix, &scores);

    let empty = &columns[1];
    assert_eq!(empty.feature_name, "empty");
    assert!(!empty.selected);
    assert_eq!(empty.final_score, 0.0);
    assert_eq!(empty.explanation, "Rejected: No usable text tokens found");
}

#[test]
fn test_no_selected_token_rejects_column() {
    let (headers, layout, matrix) = setup();
    let scores: Vec<FeatureScore> = matrix
        .names()
        .iter()
        .map(|n| token_score(n, 0.05, false, Some(0.01)))
        .collect();
    let columns = aggregate_text_columns(&headers, &layout.text, &matrix, &scores);

    let body = &columns[0];
    assert!(!body.selected);
    assert_eq!(body.explanation, "Rejected: No significant terms found");
    assert_eq!(body.final_score, 0.05);
}
