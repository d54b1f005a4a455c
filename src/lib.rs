pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};

pub use crate::adapters::codec::{OutputFormat, RecordFormat};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{
    engine::ReportEngine, executor::QueryExecutor, pipeline::ReportPipeline,
    student_db::StudentDb,
};
pub use crate::domain::model::{Group, QueryKind, QueryOutput, QueryReport, QueryRequest, Student};
pub use crate::domain::ports::{AdvancedQuery, GroupQuery, StudentQuery};
pub use crate::utils::error::{Result, StudentDbError};
