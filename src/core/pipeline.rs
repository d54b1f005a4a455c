use crate::adapters::codec::{decode_students, render_report, RecordFormat};
use crate::core::executor::QueryExecutor;
use crate::core::{ConfigProvider, Pipeline, QueryReport, Storage, Student};
use crate::utils::error::{Result, StudentDbError};
use chrono::Utc;

pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    executor: QueryExecutor,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            executor: QueryExecutor::default(),
        }
    }

    fn input_format(&self) -> Result<RecordFormat> {
        self.config
            .input_format()
            .or_else(|| RecordFormat::from_path(self.config.input_path()))
            .ok_or_else(|| StudentDbError::InvalidConfigValueError {
                field: "input.format".to_string(),
                value: self.config.input_path().to_string(),
                reason: "Cannot infer format from file extension; use csv or json".to_string(),
            })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Student>> {
        let format = self.input_format()?;
        tracing::debug!(
            "Reading students from {} as {:?}",
            self.config.input_path(),
            format
        );

        let data = self.storage.read_file(self.config.input_path()).await?;
        let students = decode_students(&data, format)?;

        if students.is_empty() {
            tracing::warn!("Input {} contains no students", self.config.input_path());
        }

        Ok(students)
    }

    async fn transform(&self, students: Vec<Student>) -> Result<QueryReport> {
        let queries = self.config.queries();
        let mut results = Vec::with_capacity(queries.len());

        for request in &queries {
            tracing::debug!("Running query {}", request.kind);
            let result = self.executor.execute(&students, request)?;
            tracing::debug!("Query {} produced {} item(s)", request.kind, result.output.len());
            results.push(result);
        }

        Ok(QueryReport {
            name: self.config.report_name().to_string(),
            generated_at: Utc::now(),
            student_count: students.len(),
            results,
        })
    }

    async fn load(&self, report: QueryReport) -> Result<String> {
        let rendered = render_report(&report, self.config.output_format())?;

        if let Some(output_path) = self.config.output_path() {
            tracing::debug!(
                "Writing report ({} bytes) to {}",
                rendered.len(),
                output_path
            );
            self.storage
                .write_file(output_path, rendered.as_bytes())
                .await?;
        }

        Ok(rendered)
    }
}
