//! Fitted categorical codecs: a label encoder (class name ↔ ordinal code)
//! and a multi-label binarizer (indicator vector → set of class names).

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::inference::error::ArtifactError;
use crate::inference::read_json;

/// Maps between a fixed, ordered set of class names and their codes.
pub trait LabelEncoder: Send + Sync {
    /// Class names in code order.
    fn classes(&self) -> &[String];

    /// Code of `label`, or `None` when the encoder never saw it.
    fn transform(&self, label: &str) -> Option<usize> {
        self.classes().iter().position(|class| class == label)
    }

    /// Class name for `code`.
    fn inverse_transform(&self, code: usize) -> Option<&str> {
        self.classes().get(code).map(String::as_str)
    }
}

/// Decodes a binary indicator vector into the class names whose bit is set.
pub trait MultiLabelDecoder: Send + Sync {
    fn width(&self) -> usize;

    fn inverse_transform(&self, indicators: &[bool]) -> Vec<String>;
}

#[derive(Debug, Clone, Deserialize)]
struct ClassList {
    classes: Vec<String>,
}

fn load_classes(path: &Path) -> Result<Vec<String>, ArtifactError> {
    let ClassList { classes } = read_json(path)?;
    if classes.is_empty() {
        return Err(ArtifactError::Invalid(format!(
            "{} declares no classes",
            path.display()
        )));
    }
    let mut seen = HashSet::with_capacity(classes.len());
    if let Some(duplicate) = classes.iter().find(|class| !seen.insert(class.as_str())) {
        return Err(ArtifactError::Invalid(format!(
            "{} lists class '{duplicate}' more than once",
            path.display()
        )));
    }
    Ok(classes)
}

#[derive(Debug, Clone)]
pub struct FittedLabelEncoder {
    classes: Vec<String>,
}

impl FittedLabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        Ok(Self::new(load_classes(path)?))
    }
}

impl LabelEncoder for FittedLabelEncoder {
    fn classes(&self) -> &[String] {
        &self.classes
    }
}

#[derive(Debug, Clone)]
pub struct MultiLabelBinarizer {
    classes: Vec<String>,
}

impl MultiLabelBinarizer {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        Ok(Self::new(load_classes(path)?))
    }
}

impl MultiLabelDecoder for MultiLabelBinarizer {
    fn width(&self) -> usize {
        self.classes.len()
    }

    fn inverse_transform(&self, indicators: &[bool]) -> Vec<String> {
        self.classes
            .iter()
            .zip(indicators)
            .filter(|&(_, &set)| set)
            .map(|(class, _)| class.clone())
            .collect()
    }
}

/// Labels present in exactly one of the two encoders, sorted.
pub fn class_set_difference(a: &dyn LabelEncoder, b: &dyn LabelEncoder) -> Vec<String> {
    let left: HashSet<&str> = a.classes().iter().map(String::as_str).collect();
    let right: HashSet<&str> = b.classes().iter().map(String::as_str).collect();
    let mut diff: Vec<String> = left
        .symmetric_difference(&right)
        .map(|label| label.to_string())
        .collect();
    diff.sort();
    diff
}
