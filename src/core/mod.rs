pub mod classifier;
pub mod table;

pub use crate::domain::model::{Category, ClassificationResult, ReferenceRow};
pub use crate::domain::ports::Clock;
pub use crate::utils::error::Result;
