use churn_scoring::api::server;
use churn_scoring::utils::{logger, validation::Validate};
use churn_scoring::ServiceArgs;
use clap::Parser;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = ServiceArgs::parse();

    // 初始化日誌
    logger::init_service_logger(args.verbose);

    let config = match args.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    tracing::debug!("Service config: {:?}", config);

    // 產出檔載入失敗時直接結束，不綁定連接埠
    if let Err(e) = server::run(config).await {
        tracing::error!("❌ Scoring service failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    Ok(())
}
