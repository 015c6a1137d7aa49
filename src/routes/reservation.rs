use crate::handlers::reservation::submit_reservation;
use crate::models::reservation::{ReservationRequest, ReservationResponse};
use crate::state::AppState;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, Responder, post, web};

pub const MALFORMED_BODY: &str = "予約内容を読み取れませんでした。入力内容を確認してください。";

// body errors keep the {success, error} shape so clients can always decode it
fn json_rejection(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!("unreadable reservation body: {}", err);
    let response = HttpResponse::BadRequest().json(ReservationResponse::failed(MALFORMED_BODY));
    InternalError::from_response(err, response).into()
}

#[post("/reservation")]
async fn reservation(
    state: web::Data<AppState>,
    body: web::Json<ReservationRequest>,
) -> impl Responder {
    match submit_reservation(&state, &body).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            tracing::warn!("rejected reservation: {:?}", e);
            HttpResponse::BadRequest().json(ReservationResponse::failed(e.to_string()))
        }
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_rejection))
        .service(reservation);
}
