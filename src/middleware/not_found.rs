use actix_web::HttpResponse;
use serde_json::json;

/// Fallback handler for requests that match no route.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": "Route not found",
    }))
}
