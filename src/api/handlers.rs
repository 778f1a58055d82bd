//! 預測服務的 HTTP 處理器

use crate::domain::model::ErrorBody;
use crate::inference::ScoringService;
use actix_web::{web, HttpResponse};

/// 配置所有 API 路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/predict", web::post().to(predict))
        .route("/health", web::get().to(health_check))
        .route("/model/info", web::get().to(model_info));
}

/// 單筆預測；任何解析、轉換或推論錯誤都回 500 與 `{"error": ...}`
async fn predict(service: web::Data<ScoringService>, body: web::Bytes) -> HttpResponse {
    match service.predict_body(&body) {
        Ok(result) => {
            tracing::debug!(
                "Prediction: probability={}, label={}",
                result.churn_probability,
                result.churn_prediction
            );
            HttpResponse::Ok().json(result)
        }
        Err(e) => {
            tracing::warn!("Prediction failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody {
                error: e.to_string(),
            })
        }
    }
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn model_info(service: web::Data<ScoringService>) -> HttpResponse {
    HttpResponse::Ok().json(service.model_info())
}
