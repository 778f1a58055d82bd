//! 預測服務的啟動流程

use crate::api::handlers::configure_routes;
use crate::config::service_config::ServiceConfig;
use crate::inference::{ModelArtifacts, ScoringService};
use crate::utils::error::Result;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::SocketAddr;

/// 載入產出檔並建立服務狀態；失敗時不應綁定 socket
pub fn load_service(config: &ServiceConfig) -> Result<web::Data<ScoringService>> {
    let artifacts = ModelArtifacts::load(&config.transformer_path, &config.model_path)?;
    tracing::info!(
        "📦 Loaded transformer '{}' and model '{}' ({} features)",
        config.transformer_path,
        config.model_path,
        artifacts.transformer.columns.len()
    );
    Ok(web::Data::new(ScoringService::from_artifacts(artifacts)))
}

/// 綁定位址並回傳尚未執行的 server 與實際監聽位址
pub fn bind(
    service: web::Data<ScoringService>,
    host: &str,
    port: u16,
    workers: Option<usize>,
) -> Result<(Server, Vec<SocketAddr>)> {
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .configure(configure_routes)
    });
    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    let server = server.bind((host, port))?;
    let addrs = server.addrs();
    Ok((server.run(), addrs))
}

pub async fn run(config: ServiceConfig) -> Result<()> {
    let service = load_service(&config)?;
    let (server, addrs) = bind(service, &config.host, config.port, config.workers)?;

    for addr in &addrs {
        tracing::info!("🚀 Scoring service listening on http://{}", addr);
    }
    server.await?;

    tracing::info!("Scoring service stopped");
    Ok(())
}
