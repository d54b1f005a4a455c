use crate::domain::model::{QueryOutput, QueryReport, Student};
use crate::utils::error::{Result, StudentDbError};
use serde::Serialize;

pub use crate::domain::model::{OutputFormat, RecordFormat};

pub fn decode_students(data: &[u8], format: RecordFormat) -> Result<Vec<Student>> {
    match format {
        RecordFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(data);
            let students = reader
                .deserialize::<Student>()
                .collect::<std::result::Result<Vec<_>, csv::Error>>()?;
            Ok(students)
        }
        RecordFormat::Json => Ok(serde_json::from_slice(data)?),
    }
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    query: &'a str,
    label: &'a str,
    key: String,
    value: String,
}

/// Flattens one query output into (key, value) pairs for tabular output.
fn output_rows(output: &QueryOutput) -> Vec<(String, String)> {
    match output {
        QueryOutput::Names(names) => names
            .iter()
            .enumerate()
            .map(|(i, name)| (i.to_string(), name.clone()))
            .collect(),
        QueryOutput::NameSet(names) => names
            .iter()
            .enumerate()
            .map(|(i, name)| (i.to_string(), name.clone()))
            .collect(),
        QueryOutput::Students(students) => students
            .iter()
            .map(|s| (s.id.to_string(), format!("{} ({})", s.full_name(), s.group)))
            .collect(),
        QueryOutput::Groups(groups) => groups
            .iter()
            .flat_map(|group| {
                group
                    .students
                    .iter()
                    .map(move |s| (group.name.clone(), format!("{} {}", s.id, s.full_name())))
            })
            .collect(),
        QueryOutput::Mapping(mapping) => mapping
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        QueryOutput::Scalar(value) => vec![(String::new(), value.clone())],
    }
}

pub fn render_report(report: &QueryReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for result in &report.results {
                let label = result.label.as_deref().unwrap_or("");
                for (key, value) in output_rows(&result.output) {
                    writer.serialize(ReportRow {
                        query: result.kind.as_str(),
                        label,
                        key,
                        value,
                    })?;
                }
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| StudentDbError::IoError(e.into_error()))?;
            String::from_utf8(bytes).map_err(|e| StudentDbError::ConfigError {
                message: format!("report is not valid UTF-8: {}", e),
            })
        }
    }
}
