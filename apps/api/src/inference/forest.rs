//! Multi-output decision-tree ensemble, exported from a fitted random forest.

use std::path::Path;

use serde::Deserialize;

use crate::inference::error::{ArtifactError, InferenceError};
use crate::inference::read_json;

/// A model that maps one numeric feature row to a binary indicator per label.
pub trait MultiLabelClassifier: Send + Sync {
    fn n_features(&self) -> usize;

    fn n_outputs(&self) -> usize;

    fn predict(&self, features: &[f32]) -> Result<Vec<bool>, InferenceError>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    /// Positive-class probability for each output.
    Leaf { value: Vec<f32> },
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    #[cfg(test)]
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Walks from the root (node 0) to a leaf. `x[feature] <= threshold` goes left.
    fn leaf(&self, features: &[f32]) -> &[f32] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Every child index points forward and in range, so traversal always
    /// terminates at a leaf.
    fn validate(&self, n_features: usize, n_outputs: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { value } if value.len() != n_outputs => {
                    return Err(format!(
                        "leaf {i} has {} outputs, expected {n_outputs}",
                        value.len()
                    ));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= n_features {
                        return Err(format!("node {i} splits on missing feature {feature}"));
                    }
                    for &child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(format!("node {i} has invalid child {child}"));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    n_features: usize,
    n_outputs: usize,
    trees: Vec<DecisionTree>,
}

impl TreeEnsemble {
    #[cfg(test)]
    pub fn new(
        n_features: usize,
        n_outputs: usize,
        trees: Vec<DecisionTree>,
    ) -> Result<Self, ArtifactError> {
        let ensemble = Self {
            n_features,
            n_outputs,
            trees,
        };
        ensemble.validate()?;
        Ok(ensemble)
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let ensemble: Self = read_json(path)?;
        ensemble.validate()?;
        Ok(ensemble)
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        if self.trees.is_empty() || self.n_features == 0 || self.n_outputs == 0 {
            return Err(ArtifactError::Invalid(
                "tree ensemble needs at least one tree, feature and output".to_string(),
            ));
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.n_outputs)
                .map_err(|reason| ArtifactError::Invalid(format!("tree {t}: {reason}")))?;
        }
        Ok(())
    }

    /// Mean positive-class probability per output across all trees.
    pub fn predict_proba(&self, features: &[f32]) -> Result<Vec<f32>, InferenceError> {
        if features.len() != self.n_features {
            return Err(InferenceError::FeatureCount {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        let mut sums = vec![0.0_f32; self.n_outputs];
        for tree in &self.trees {
            for (sum, p) in sums.iter_mut().zip(tree.leaf(features)) {
                *sum += p;
            }
        }
        let n = self.trees.len() as f32;
        Ok(sums.into_iter().map(|sum| sum / n).collect())
    }
}

impl MultiLabelClassifier for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_outputs(&self) -> usize {
        self.n_outputs
    }

    /// A label is set when its mean probability is strictly above one half.
    fn predict(&self, features: &[f32]) -> Result<Vec<bool>, InferenceError> {
        Ok(self
            .predict_proba(features)?
            .into_iter()
            .map(|p| p > 0.5)
            .collect())
    }
}
