pub mod artifacts;
pub mod classifier;
pub mod encoder;
pub mod ensemble;
pub mod guidance;
pub mod pipeline;
pub mod scaler;
pub mod tree;

pub use artifacts::{load_bundle, ArtifactError, ArtifactInfo, ClassifierArtifact};
pub use classifier::{Classifier, KNearestNeighbors, LogisticRegression};
pub use encoder::{encode, encode_scaled};
pub use ensemble::{tier_for, Ensemble};
pub use guidance::{guidance_for, Guidance, Severity};
pub use pipeline::{assess, ModelBundle};
pub use scaler::StandardScaler;
pub use tree::{DecisionTree, GradientBoosting, RandomForest, TreeNode};
