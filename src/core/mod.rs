pub mod engine;
pub mod executor;
pub mod grouping;
pub mod ordering;
pub mod pipeline;
pub mod student_db;

pub use crate::domain::model::{Group, QueryReport, Student};
pub use crate::domain::ports::{
    AdvancedQuery, ConfigProvider, GroupQuery, Pipeline, Storage, StudentQuery,
};
pub use crate::utils::error::Result;
