use actix_web::{get, post, web, HttpRequest, HttpResponse};
use prometheus::{Encoder, TextEncoder};
use serde_json::Value;
use tracing::info;

use crate::server::{
    docs,
    errors::ApiError,
    response::{timestamp, ConvertSuccessResponse, HealthResponse},
};
use crate::{AppState, SERVICE_NAME, SERVICE_VERSION};

/// GET /
#[get("/")]
pub async fn index_handler(state: web::Data<AppState>) -> HttpResponse {
    state.metrics.inc_request("index");
    HttpResponse::Ok().json(docs::index_document())
}

/// POST /convert
/// 본문의 `uid` 값을 번호로 변환한다. 숫자 타입 uid는 문자열로 바꿔서 처리한다.
#[post("/convert")]
pub async fn convert_post_handler(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    state.metrics.inc_request("convert_post");

    let payload: Value = serde_json::from_slice(&body).map_err(|_| ApiError::EmptyBody)?;
    let fields = match payload.as_object() {
        Some(fields) if !fields.is_empty() => fields,
        _ => return Err(ApiError::EmptyBody),
    };

    let uid = match fields.get("uid") {
        Some(value) if !is_blank(value) => coerce_uid(value),
        _ => return Err(ApiError::MissingUid),
    };

    run_conversion(&state, uid)
}

/// GET /convert/{uid}
#[get("/convert/{uid}")]
pub async fn convert_get_handler(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state.metrics.inc_request("convert_get");
    run_conversion(&state, path.into_inner())
}

/// GET /health
#[get("/health")]
pub async fn health_handler(state: web::Data<AppState>) -> HttpResponse {
    state.metrics.inc_request("health");
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: timestamp(),
        version: SERVICE_VERSION.to_string(),
    })
}

/// GET /docs
#[get("/docs")]
pub async fn docs_handler(state: web::Data<AppState>) -> HttpResponse {
    state.metrics.inc_request("docs");
    HttpResponse::Ok().json(docs::api_document())
}

/// GET /metrics
/// 토큰이 설정되어 있으면 Bearer 인증을 요구한다.
#[get("/metrics")]
pub async fn metrics_handler(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    state.metrics.inc_request("metrics");

    if let Some(expected_token) = &state.settings.server.metrics_auth_token {
        let provided_token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "));

        if provided_token != Some(expected_token.as_str()) {
            return HttpResponse::Unauthorized().body("Unauthorized: Invalid or missing token");
        }
    }

    let metric_families = state.metrics_registry.gather();
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(format!("Metrics encode error: {}", e));
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}

/// Fallback for unknown routes.
pub async fn not_found_handler() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}

fn run_conversion(state: &AppState, uid: String) -> Result<HttpResponse, ApiError> {
    match state.converter.convert_detailed(&uid) {
        Ok(conversion) => {
            state.metrics.inc_conversion(conversion.path);
            info!(
                "Converted uid {} -> {} ({} path)",
                uid,
                conversion.phone,
                conversion.path.as_str()
            );
            Ok(HttpResponse::Ok().json(ConvertSuccessResponse::new(
                uid,
                conversion.phone.into_string(),
            )))
        }
        Err(source) => {
            state.metrics.inc_conversion_failure(&source);
            Err(ApiError::Conversion { uid, source })
        }
    }
}

/// null, false, 0, "", [] and {} count as a missing uid.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn coerce_uid(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => {
            match n.as_f64() {
                // i64/u64 범위를 넘는 정수 리터럴은 f64로 들어온다. 지수 표기 대신 자릿수 그대로.
                Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() >= 9.2e18 => {
                    format!("{:.0}", f)
                }
                _ => n.to_string(),
            }
        }
        other => other.to_string(),
    }
}
