pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::{cli::LocalStorage, RunConfig};
pub use crate::core::{
    etl::EtlEngine,
    pipeline::StudentPipeline,
    roster::{NewStudent, Roster, StudentFilter},
};
pub use domain::model::StudentRecord;
pub use utils::error::{EtlError, Result};
