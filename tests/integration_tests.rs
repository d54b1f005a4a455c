use anyhow::Result;
use student_db::{
    CliConfig, LocalStorage, OutputFormat, QueryKind, RecordFormat, ReportEngine, ReportPipeline,
    TomlConfig,
};
use tempfile::TempDir;

const STUDENTS_CSV: &str = "id,first_name,last_name,group\n\
                            1,Bob,Lee,G1\n\
                            2,Ann,Lee,G1\n\
                            3,Cid,Fox,G2\n\
                            4,Ann,Lee,G2\n";

fn cli_config(input: &str) -> CliConfig {
    CliConfig {
        input: Some(input.to_string()),
        input_format: None,
        query: vec![],
        value: None,
        indices: None,
        label: None,
        output: None,
        output_format: OutputFormat::Json,
        config: None,
        name: "integration".to_string(),
        verbose: false,
        log_json: false,
    }
}

#[tokio::test]
async fn test_end_to_end_csv_to_json_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path().to_str().unwrap().to_string();
    std::fs::write(temp_dir.path().join("students.csv"), STUDENTS_CSV)?;

    let mut config = cli_config("students.csv");
    config.query = vec![
        QueryKind::SortByName,
        QueryKind::LargestGroup,
        QueryKind::MostPopularName,
    ];
    config.output = Some("reports/report.json".to_string());

    let storage = LocalStorage::new(base);
    let engine = ReportEngine::new(ReportPipeline::new(storage, config));
    let rendered = engine.run().await?;

    let written = std::fs::read_to_string(temp_dir.path().join("reports/report.json"))?;
    assert_eq!(written, rendered);

    let report: serde_json::Value = serde_json::from_str(&written)?;
    assert_eq!(report["name"], "integration");
    assert_eq!(report["student_count"], 4);

    let sorted = report["results"][0]["output"]["value"].as_array().unwrap();
    let ids: Vec<i64> = sorted.iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![3, 2, 4, 1]);

    // G1 and G2 both have two students; the greater name wins.
    assert_eq!(report["results"][1]["output"]["value"], "G2");
    // "Ann Lee" spans two cohorts, everyone else one.
    assert_eq!(report["results"][2]["output"]["value"], "Ann Lee");
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_json_input_csv_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path().to_str().unwrap().to_string();
    let students = serde_json::json!([
        {"id": 1, "firstName": "Zoe", "lastName": "Smith", "group": "G"},
        {"id": 2, "firstName": "Amy", "lastName": "Smith", "group": "G"},
        {"id": 3, "firstName": "Bea", "lastName": "Jones", "group": "H"}
    ]);
    std::fs::write(
        temp_dir.path().join("students.json"),
        serde_json::to_vec(&students)?,
    )?;

    let mut config = cli_config("students.json");
    config.query = vec![QueryKind::NamesByGroup];
    config.value = Some("G".to_string());
    config.output_format = OutputFormat::Csv;

    let engine = ReportEngine::new(ReportPipeline::new(LocalStorage::new(base), config));
    let rendered = engine.run().await?;

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines, vec!["query,label,key,value", "names-by-group,,Smith,Amy"]);
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_bounds_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path().to_str().unwrap().to_string();
    std::fs::write(temp_dir.path().join("students.csv"), STUDENTS_CSV)?;

    let mut config = cli_config("students.csv");
    config.query = vec![QueryKind::FirstNamesAt];
    config.indices = Some(vec![0, 7]);
    config.output = Some("report.json".to_string());

    let engine = ReportEngine::new(ReportPipeline::new(LocalStorage::new(base), config));
    let err = engine.run().await.unwrap_err();

    assert!(matches!(
        err,
        student_db::StudentDbError::IndexOutOfBounds { index: 7, len: 4 }
    ));
    assert!(!temp_dir.path().join("report.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_toml_plan() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path().to_str().unwrap().to_string();
    std::fs::write(temp_dir.path().join("cohort.data"), STUDENTS_CSV)?;

    let plan = r#"
[report]
name = "plan"

[input]
path = "cohort.data"
format = "csv"

[output]
path = "out/plan.json"

[[query]]
kind = "full-names-at"
indices = [3, 0, 3]
label = "picked"

[[query]]
kind = "distinct-first-names"
"#;
    let config = TomlConfig::from_toml_str(plan)?;
    assert_eq!(config.input.format, Some(RecordFormat::Csv));

    let engine = ReportEngine::new(ReportPipeline::new(LocalStorage::new(base), config));
    engine.run().await?;

    let written = std::fs::read_to_string(temp_dir.path().join("out/plan.json"))?;
    let report: serde_json::Value = serde_json::from_str(&written)?;
    assert_eq!(report["results"][0]["label"], "picked");
    assert_eq!(
        report["results"][0]["output"]["value"],
        serde_json::json!(["Ann Lee", "Bob Lee", "Ann Lee"])
    );
    assert_eq!(report["results"][1]["output"]["type"], "name-set");
    assert_eq!(
        report["results"][1]["output"]["value"],
        serde_json::json!(["Ann", "Bob", "Cid"])
    );
    Ok(())
}
