use clap::Parser;
use student_db::core::{ConfigProvider, Storage};
use student_db::utils::error::{ErrorSeverity, StudentDbError};
use student_db::utils::{logger, validation::Validate};
use student_db::{CliConfig, LocalStorage, ReportEngine, ReportPipeline, TomlConfig};

async fn run_report<S, C>(storage: S, config: C) -> student_db::Result<String>
where
    S: Storage + 'static,
    C: ConfigProvider + Validate + 'static,
{
    config.validate()?;

    let output_path = config.output_path().map(str::to_string);

    let pipeline = ReportPipeline::new(storage, config);
    let engine = ReportEngine::new(pipeline);
    let rendered = engine.run().await?;

    match output_path {
        Some(path) => tracing::info!("📁 Report saved to: {}", path),
        None => println!("{}", rendered),
    }

    Ok(rendered)
}

fn exit_code(e: &StudentDbError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting student-db");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let storage = LocalStorage::new(".".to_string());

    let result = match config.config.clone() {
        Some(plan_path) => {
            tracing::info!("📁 Loading query plan from: {}", plan_path);
            match TomlConfig::from_file(&plan_path) {
                Ok(mut plan) => {
                    plan.apply_overrides(config.input.as_deref(), config.output.as_deref());
                    run_report(storage, plan).await
                }
                Err(e) => Err(e),
            }
        }
        None => run_report(storage, config).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Query run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}
