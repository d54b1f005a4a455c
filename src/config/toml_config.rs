use crate::adapters::codec::{OutputFormat, RecordFormat};
use crate::core::executor::QueryExecutor;
use crate::core::ConfigProvider;
use crate::domain::model::QueryRequest;
use crate::utils::error::{Result, StudentDbError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A query plan: where to read students, which queries to run, where to put the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub report: ReportConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, rename = "query")]
    pub queries: Vec<QueryRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub format: Option<RecordFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    #[serde(default)]
    pub format: OutputFormat,
}

impl TomlConfig {
    /// 從 TOML 檔案載入查詢計畫
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StudentDbError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析查詢計畫
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StudentDbError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StudentDbError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列覆蓋設定
    pub fn apply_overrides(&mut self, input: Option<&str>, output: Option<&str>) {
        if let Some(input) = input {
            tracing::info!("🔧 Input overridden to: {}", input);
            self.input.path = input.to_string();
        }
        if let Some(output) = output {
            tracing::info!("🔧 Output overridden to: {}", output);
            self.output.path = Some(output.to_string());
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("report.name", &self.report.name)?;
        validation::validate_path("input.path", &self.input.path)?;

        if self.input.format.is_none() {
            validation::validate_file_extensions(
                "input.path",
                std::slice::from_ref(&self.input.path),
                &["csv", "json"],
            )?;
        }

        if let Some(path) = &self.output.path {
            validation::validate_path("output.path", path)?;
        }

        if self.queries.is_empty() {
            return Err(StudentDbError::MissingConfigError {
                field: "query".to_string(),
            });
        }

        for request in &self.queries {
            QueryExecutor::check_arguments(request)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn report_name(&self) -> &str {
        &self.report.name
    }

    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn input_format(&self) -> Option<RecordFormat> {
        self.input.format
    }

    fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }

    fn queries(&self) -> Vec<QueryRequest> {
        self.queries.clone()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
