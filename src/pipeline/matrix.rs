//! Numeric feature matrix assembly
//!
//! The matrix is a samples x features `Array2<f64>` laid out column-major, so
//! the filters get a contiguous [`ArrayView1`] per feature and the forests index
//! `(sample, feature)` through [`FeatureMatrix::value`].
//! Each column is described by a [`FeatureDescriptor`] so token features can be
//! traced back to their text column without parsing names.

use ndarray::{Array2, ArrayView1, ShapeBuilder};

use super::columns::ColumnLayout;
use super::error::{Result, SelectionError};
use super::text::TextVectorizer;
use super::values::{cell, parse_or_zero};

/// Where a matrix column comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureOrigin {
    /// A raw numeric column (header index)
    Numeric { column: usize },
    /// A vocabulary term of a text column (header index)
    TextTerm { column: usize, term: String },
}

/// Name and origin of one matrix column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDescriptor {
    pub name: String,
    pub origin: FeatureOrigin,
}

/// Samples x features matrix of `f64`, immutable once built
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    features: Vec<FeatureDescriptor>,
    data: Array2<f64>,
}

impl Default for FeatureMatrix {
    fn default() -> Self {
        FeatureMatrix {
            features: Vec::new(),
            data: Array2::zeros((0, 0)),
        }
    }
}

impl FeatureMatrix {
    /// Build a matrix from named numeric columns.
    pub fn from_columns(names: &[&str], columns: Vec<Vec<f64>>) -> Result<Self> {
        if names.len() != columns.len() {
            return Err(SelectionError::Analysis(format!(
                "{} feature names for {} columns",
                names.len(),
                columns.len()
            )));
        }
        let n_samples = columns.first().map_or(0, |c| c.len());
        let features = names
            .iter()
            .enumerate()
            .map(|(j, name)| FeatureDescriptor {
                name: name.to_string(),
                origin: FeatureOrigin::Numeric { column: j },
            })
            .collect();
        Self::from_parts(features, columns, n_samples)
    }

    /// Stack equal-length columns into a column-major `Array2`.
    fn from_parts(
        features: Vec<FeatureDescriptor>,
        columns: Vec<Vec<f64>>,
        n_samples: usize,
    ) -> Result<Self> {
        let n_features = columns.len();
        let mut flat = Vec::with_capacity(n_samples * n_features);
        for (descriptor, values) in features.iter().zip(columns) {
            if values.len() != n_samples {
                return Err(SelectionError::Analysis(format!(
                    "feature '{}' has {} values, expected {}",
                    descriptor.name,
                    values.len(),
                    n_samples
                )));
            }
            flat.extend(values);
        }
        let data = Array2::from_shape_vec((n_samples, n_features).f(), flat)
            .map_err(|e| SelectionError::Analysis(format!("invalid matrix shape: {}", e)))?;
        Ok(FeatureMatrix { features, data })
    }

    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    pub fn column(&self, feature: usize) -> ArrayView1<'_, f64> {
        self.data.column(feature)
    }

    pub fn value(&self, sample: usize, feature: usize) -> f64 {
        self.data[[sample, feature]]
    }

    pub fn descriptor(&self, feature: usize) -> &FeatureDescriptor {
        &self.features[feature]
    }

    pub fn descriptors(&self) -> &[FeatureDescriptor] {
        &self.features
    }

    pub fn name(&self, feature: usize) -> &str {
        &self.features[feature].name
    }

    pub fn names(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Assemble the matrix: raw numeric columns first, then vectorized text terms.
pub fn assemble_matrix(
    headers: &[String],
    rows: &[Vec<String>],
    layout: &ColumnLayout,
    vectorizer: &TextVectorizer,
) -> Result<FeatureMatrix> {
    let mut features = Vec::new();
    let mut columns = Vec::new();

    for &column in &layout.numeric {
        features.push(FeatureDescriptor {
            name: headers[column].clone(),
            origin: FeatureOrigin::Numeric { column },
        });
        columns.push(
            rows.iter()
                .map(|row| parse_or_zero(cell(row, column)))
                .collect(),
        );
    }

    for &column in &layout.text {
        let texts: Vec<&str> = rows.iter().map(|row| cell(row, column)).collect();
        for term_feature in vectorizer.vectorize(&texts) {
            features.push(FeatureDescriptor {
                name: format!("{}_{}", headers[column], term_feature.term),
                origin: FeatureOrigin::TextTerm {
                    column,
                    term: term_feature.term,
                },
            });
            columns.push(term_feature.counts);
        }
    }

    FeatureMatrix::from_parts(features, columns, rows.len())
}
