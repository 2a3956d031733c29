use serde::Deserialize;

use crate::errors::AssessmentError;
use crate::models::ScaledFeatureVector;

use super::artifacts::ArtifactError;
use super::classifier::{invalid, prediction_failed, Classifier};

/// Which side of a split an exactly-equal value falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRule {
    /// `x <= threshold` goes left.
    LessOrEqual,
    /// `x < threshold` goes left.
    Less,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(Vec<f64>),
}

/// A flattened decision tree; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Children must come after their parent, which rules out cycles.
    fn validate(&self, n_features: usize, leaf_len: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("empty tree".into());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!("node {i} splits on feature {feature} of {n_features}"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {i} has a non-finite threshold"));
                    }
                    for child in [left, right] {
                        if *child <= i || *child >= self.nodes.len() {
                            return Err(format!("node {i} has invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf(values) => {
                    if values.len() != leaf_len {
                        return Err(format!(
                            "leaf {i} holds {} values, expected {leaf_len}",
                            values.len()
                        ));
                    }
                    if values.iter().any(|v| !v.is_finite()) {
                        return Err(format!("leaf {i} holds a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Forest leaves hold class weights: none negative, at least one positive.
    fn check_class_weights(&self) -> Result<(), String> {
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Leaf(values) = node {
                if values.iter().any(|v| *v < 0.0) {
                    return Err(format!("leaf {i} holds a negative class weight"));
                }
                if values.iter().sum::<f64>() <= 0.0 {
                    return Err(format!("leaf {i} holds no class weight"));
                }
            }
        }
        Ok(())
    }

    fn leaf(&self, x: &[f64], rule: SplitRule) -> Result<&[f64], String> {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf(values) => return Ok(values),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = x
                        .get(*feature)
                        .copied()
                        .ok_or_else(|| format!("feature {feature} missing"))?;
                    if value.is_nan() {
                        return Err(format!("feature {feature} is NaN"));
                    }
                    let go_left = match rule {
                        SplitRule::LessOrEqual => value <= *threshold,
                        SplitRule::Less => value < *threshold,
                    };
                    index = if go_left { *left } else { *right };
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Random forest
// ---------------------------------------------------------------------------

/// Averages per-tree class probabilities `[p0, p1]`.
///
/// Splits send `x <= threshold` left. Equal mean probabilities resolve to
/// the negative class.
#[derive(Debug, Clone)]
pub struct RandomForest {
    name: String,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(
        name: impl Into<String>,
        n_features: usize,
        trees: Vec<DecisionTree>,
    ) -> Result<Self, ArtifactError> {
        let name = name.into();
        if n_features == 0 {
            return Err(invalid(&name, "n_features must be positive"));
        }
        if trees.is_empty() {
            return Err(invalid(&name, "no trees"));
        }
        for (t, tree) in trees.iter().enumerate() {
            tree.validate(n_features, 2)
                .and_then(|_| tree.check_class_weights())
                .map_err(|reason| invalid(&name, format!("tree {t}: {reason}")))?;
        }
        Ok(Self {
            name,
            n_features,
            trees,
        })
    }
}

impl Classifier for RandomForest {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &ScaledFeatureVector) -> Result<bool, AssessmentError> {
        let x = features.as_slice();
        let mut totals = [0.0f64; 2];
        for tree in &self.trees {
            let leaf = tree
                .leaf(x, SplitRule::LessOrEqual)
                .map_err(|reason| prediction_failed(&self.name, reason))?;
            let sum = leaf[0] + leaf[1];
            totals[0] += leaf[0] / sum;
            totals[1] += leaf[1] / sum;
        }
        Ok(totals[1] > totals[0])
    }
}

// ---------------------------------------------------------------------------
// Gradient-boosted trees
// ---------------------------------------------------------------------------

/// Additive margin model: positive when `base_margin + Σ leaf > 0`,
/// i.e. when the logistic output exceeds 0.5.
///
/// Splits send `x < threshold` left.
#[derive(Debug, Clone)]
pub struct GradientBoosting {
    name: String,
    n_features: usize,
    base_margin: f64,
    trees: Vec<DecisionTree>,
}

impl GradientBoosting {
    pub fn new(
        name: impl Into<String>,
        n_features: usize,
        base_margin: f64,
        trees: Vec<DecisionTree>,
    ) -> Result<Self, ArtifactError> {
        let name = name.into();
        if n_features == 0 {
            return Err(invalid(&name, "n_features must be positive"));
        }
        if !base_margin.is_finite() {
            return Err(invalid(&name, "non-finite base margin"));
        }
        for (t, tree) in trees.iter().enumerate() {
            tree.validate(n_features, 1)
                .map_err(|reason| invalid(&name, format!("tree {t}: {reason}")))?;
        }
        Ok(Self {
            name,
            n_features,
            base_margin,
            trees,
        })
    }

    pub fn margin(&self, features: &ScaledFeatureVector) -> Result<f64, AssessmentError> {
        let x = features.as_slice();
        let mut margin = self.base_margin;
        for tree in &self.trees {
            let leaf = tree
                .leaf(x, SplitRule::Less)
                .map_err(|reason| prediction_failed(&self.name, reason))?;
            margin += leaf[0];
        }
        Ok(margin)
    }
}

impl Classifier for GradientBoosting {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "gradient_boosting"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &ScaledFeatureVector) -> Result<bool, AssessmentError> {
        let margin = self.margin(features)?;
        if !margin.is_finite() {
            return Err(prediction_failed(&self.name, "non-finite margin"));
        }
        Ok(margin > 0.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
