// Route exports
pub mod facilities;

use actix_web::{error, web, HttpRequest, HttpResponse};

use crate::models::ErrorResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_payload_error))
        .service(
            web::scope("/api/v1")
                .configure(facilities::configure),
        );
}

/// Turn malformed request bodies into the same JSON error shape the handlers use
fn json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Rejected request body on {}: {}", req.path(), err);

    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: "Invalid JSON".to_string(),
        message: err.to_string(),
        status_code: 400,
    });
    error::InternalError::from_response(err, response).into()
}
