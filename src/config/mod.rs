#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::codec::{OutputFormat, RecordFormat};
#[cfg(feature = "cli")]
use crate::core::executor::QueryExecutor;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{QueryKind, QueryRequest};
#[cfg(feature = "cli")]
use crate::utils::error::{Result, StudentDbError};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "student-db")]
#[command(about = "Query and aggregate student records from CSV or JSON files")]
pub struct CliConfig {
    #[arg(long, help = "Student records file (.csv or .json)")]
    pub input: Option<String>,

    #[arg(long, value_enum, help = "Input format; inferred from the extension when omitted")]
    pub input_format: Option<RecordFormat>,

    #[arg(long, value_enum, help = "Query to run; may be repeated")]
    pub query: Vec<QueryKind>,

    #[arg(long, help = "Name or group argument for filter queries")]
    pub value: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Positions for indexed projections, e.g. 0,2,0")]
    pub indices: Option<Vec<usize>>,

    #[arg(long, help = "Label attached to each result")]
    pub label: Option<String>,

    #[arg(long, help = "Write the report to this file instead of stdout")]
    pub output: Option<String>,

    #[arg(long, value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    #[arg(long, help = "TOML query plan; --input and --output override it")]
    pub config: Option<String>,

    #[arg(long, default_value = "student-report")]
    pub name: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn report_name(&self) -> &str {
        &self.name
    }

    fn input_path(&self) -> &str {
        self.input.as_deref().unwrap_or("")
    }

    fn input_format(&self) -> Option<RecordFormat> {
        self.input_format
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    fn queries(&self) -> Vec<QueryRequest> {
        self.query
            .iter()
            .map(|&kind| QueryRequest {
                kind,
                label: self.label.clone(),
                value: self.value.clone(),
                indices: self.indices.clone(),
            })
            .collect()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let input = validation::validate_required_field("--input", &self.input)?;
        validation::validate_path("--input", input)?;
        if self.input_format.is_none() {
            validation::validate_file_extensions("--input", &[input.clone()], &["csv", "json"])?;
        }

        if let Some(output) = &self.output {
            validation::validate_path("--output", output)?;
        }

        validation::validate_non_empty_string("--name", &self.name)?;

        if self.query.is_empty() {
            return Err(StudentDbError::MissingConfigError {
                field: "--query".to_string(),
            });
        }

        for request in self.queries() {
            QueryExecutor::check_arguments(&request)?;
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_queries() {
        let config = CliConfig::parse_from([
            "student-db",
            "--input",
            "students.csv",
            "--query",
            "first-names-at",
            "--query",
            "largest-group",
            "--indices",
            "0,2,0",
        ]);

        let queries = config.queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].kind, QueryKind::FirstNamesAt);
        assert_eq!(queries[0].indices, Some(vec![0, 2, 0]));
        assert_eq!(queries[1].kind, QueryKind::LargestGroup);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_input_and_query() {
        let no_input = CliConfig::parse_from(["student-db", "--query", "groups"]);
        assert!(no_input.validate().is_err());

        let no_query = CliConfig::parse_from(["student-db", "--input", "students.json"]);
        assert!(matches!(
            no_query.validate(),
            Err(StudentDbError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_checks_query_arguments() {
        let config = CliConfig::parse_from([
            "student-db",
            "--input",
            "students.csv",
            "--query",
            "find-by-group",
        ]);
        assert!(matches!(
            config.validate(),
            Err(StudentDbError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_validate_extension_unless_format_given() {
        let inferred = CliConfig::parse_from([
            "student-db",
            "--input",
            "students.txt",
            "--query",
            "groups",
        ]);
        assert!(inferred.validate().is_err());

        let explicit = CliConfig::parse_from([
            "student-db",
            "--input",
            "students.txt",
            "--input-format",
            "csv",
            "--query",
            "groups",
        ]);
        assert!(explicit.validate().is_ok());
    }
}
