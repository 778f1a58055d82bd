use churn_scoring::api::server;
use churn_scoring::{
    BatchConfig, BatchEngine, BatchScoringPipeline, LocalStorage, ScoringError, ServiceConfig,
};
use std::path::Path;
use tempfile::TempDir;

fn repo_path(relative: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join(relative)
        .to_str()
        .unwrap()
        .to_string()
}

fn shipped_service_config() -> ServiceConfig {
    ServiceConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        transformer_path: repo_path("app/transformer.json"),
        model_path: repo_path("app/model.json"),
        workers: Some(1),
    }
}

#[actix_web::test]
async fn test_batch_against_running_service() {
    let config = shipped_service_config();
    let service = server::load_service(&config).unwrap();
    let (running, addrs) = server::bind(service, &config.host, config.port, config.workers).unwrap();
    let handle = running.handle();
    actix_web::rt::spawn(running);

    let temp_dir = TempDir::new().unwrap();
    let mut batch = BatchConfig::with_input(repo_path("demos/customers.csv"));
    batch.endpoint = format!("http://{}/predict", addrs[0]);
    batch.output = temp_dir
        .path()
        .join("scored_customers.csv")
        .to_str()
        .unwrap()
        .to_string();
    batch.timeout_secs = 10;
    let output_path = batch.output.clone();

    let pipeline = BatchScoringPipeline::new(LocalStorage::current_dir(), batch).unwrap();
    let report = BatchEngine::new(pipeline).run().await.unwrap();
    handle.stop(true).await;

    // 第 7 列的 tenure 不是數字，服務回 500
    assert_eq!(report.summary.total, 7);
    assert_eq!(report.summary.failures, 1);
    assert_eq!(
        report.console_line(),
        format!("Scored 6/7 customers. Results saved to '{}'.", output_path)
    );

    let mut reader = csv::Reader::from_path(&output_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 15);
    assert_eq!(&headers[13], "churn_probability");
    assert_eq!(&headers[14], "churn_prediction");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    let ids: Vec<&str> = rows.iter().map(|r| &r[0]).collect();
    assert_eq!(
        ids,
        vec!["7590-VHVEG", "5575-GNVDE", "3668-QPYBK", "7795-CFOCW", "9237-HQITU", "4472-LVYGI"]
    );

    let mut probabilities = Vec::new();
    for row in &rows {
        let probability: f64 = row[13].parse().unwrap();
        assert!((0.0..=1.0).contains(&probability));
        let expected = if probability >= 0.5 { "Yes" } else { "No" };
        // 四捨五入後剛好 0.50 的情況以原始機率判定，這裡只檢查明確的一側
        if (probability - 0.5).abs() > 0.005 {
            assert_eq!(&row[14], expected);
        }
        probabilities.push(probability);
    }

    // 長約、長期客戶的流失機率應低於新的月約客戶
    assert!(probabilities[3] < probabilities[4]);
}

#[actix_web::test]
async fn test_startup_fails_without_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let config = ServiceConfig {
        model_path: temp_dir.path().join("missing.json").to_str().unwrap().to_string(),
        ..shipped_service_config()
    };

    assert!(matches!(
        server::load_service(&config),
        Err(ScoringError::ArtifactError { .. })
    ));
}
