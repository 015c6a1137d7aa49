use actix_web::{HttpResponse, Responder, get, http::header::ContentType, web};

const BOOKING_PAGE: &str = include_str!("../../static/index.html");

#[get("/")]
async fn booking_page() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(BOOKING_PAGE)
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(booking_page);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn serves_booking_form() {
        let app = test::init_service(App::new().configure(init)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("サウナ予約"));
        assert!(html.contains("/api/reservation"));
    }
}
