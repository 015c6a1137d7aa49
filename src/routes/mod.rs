pub mod availability;
pub mod health;
pub mod pages;
pub mod reservation;

use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::init))
        .service(
            web::scope("/api")
                .configure(availability::init)
                .configure(reservation::init),
        )
        .configure(pages::init);
}
