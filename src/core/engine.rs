use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract → transform → load and returns the rendered report.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting student query run...");

        // Extract
        let students = self.pipeline.extract().await?;
        tracing::info!("Loaded {} students", students.len());

        // Transform
        let report = self.pipeline.transform(students).await?;
        tracing::info!("Ran {} queries", report.results.len());

        // Load
        let rendered = self.pipeline.load(report).await?;
        tracing::info!("Report rendered ({} bytes)", rendered.len());

        Ok(rendered)
    }
}
