pub mod etl;
pub mod loader;
pub mod pipeline;
pub mod projector;
pub mod roster;
pub mod writer;

pub use crate::domain::model::{Record, StudentRecord, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
