use churn_scoring::utils::{logger, validation::Validate};
use churn_scoring::{BatchConfig, BatchEngine, BatchScoringPipeline, LocalStorage};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = BatchConfig::parse();

    // 驗證配置
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    // 初始化日誌
    if let Err(e) = logger::init_batch_logger(&config.log_file, config.verbose) {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
    tracing::debug!("Batch config: {:?}", config);

    let storage = LocalStorage::current_dir();
    let pipeline = match BatchScoringPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("Failed to create scoring client: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let engine = BatchEngine::new(pipeline);
    match engine.run().await {
        Ok(report) => {
            println!("{}", report.console_line());
        }
        Err(e) => {
            tracing::error!("Batch run failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    }

    Ok(())
}
