use crate::handlers::availability::{current_availability, facility_status};
use crate::models::availability::AvailabilityQuery;
use crate::state::AppState;
use actix_web::{HttpResponse, Responder, get, web};

#[get("/availability")]
async fn availability(
    state: web::Data<AppState>,
    query: web::Query<AvailabilityQuery>,
) -> impl Responder {
    HttpResponse::Ok().json(current_availability(state.availability.as_ref(), &query))
}

#[get("/sauna-status")]
async fn sauna_status(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(facility_status(state.availability.as_ref()))
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(availability).service(sauna_status);
}
