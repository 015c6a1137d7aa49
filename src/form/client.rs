use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::models::availability::{AvailabilityEntry, AvailabilityQuery, AvailabilityResponse};
use crate::models::reservation::{ReservationRequest, ReservationResponse};

/// What the booking form needs from the server.
#[async_trait]
pub trait ReservationApi: Send + Sync {
    async fn fetch_availability(&self, query: &AvailabilityQuery) -> Result<Vec<AvailabilityEntry>>;

    async fn submit_reservation(&self, request: &ReservationRequest) -> Result<ReservationResponse>;
}

pub struct HttpReservationApi {
    client: Client,
    base: Url,
}

impl HttpReservationApi {
    pub fn new(mut base: Url) -> Result<Self> {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("building http client")?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("joining {} onto {}", path, self.base))
    }
}

#[async_trait]
impl ReservationApi for HttpReservationApi {
    async fn fetch_availability(&self, query: &AvailabilityQuery) -> Result<Vec<AvailabilityEntry>> {
        let response = self
            .client
            .get(self.endpoint("api/availability")?)
            .query(query)
            .send()
            .await
            .context("requesting availability")?
            .error_for_status()?;

        let body: AvailabilityResponse = response.json().await.context("decoding availability")?;
        Ok(body.sauna_status)
    }

    async fn submit_reservation(&self, request: &ReservationRequest) -> Result<ReservationResponse> {
        let response = self
            .client
            .post(self.endpoint("api/reservation")?)
            .json(request)
            .send()
            .await
            .context("posting reservation")?;

        // validation failures carry the same body shape under a 400
        let status = response.status();
        response
            .json::<ReservationResponse>()
            .await
            .with_context(|| format!("decoding reservation response ({})", status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use crate::testing::{RecordingDispatcher, app_state, scenario_request};
    use actix_web::{App, HttpServer, web};

    async fn serve(dispatcher: std::sync::Arc<RecordingDispatcher>) -> (Url, actix_web::dev::ServerHandle) {
        let data = web::Data::new(app_state(dispatcher));
        let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(routes::init))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        (Url::parse(&format!("http://{}/", addr)).unwrap(), handle)
    }

    #[actix_web::test]
    async fn talks_to_the_reservation_service() {
        let dispatcher = RecordingDispatcher::accepting();
        let (base, handle) = serve(dispatcher.clone()).await;
        let api = HttpReservationApi::new(base).unwrap();

        let entries = api
            .fetch_availability(&AvailabilityQuery {
                date: Some("2025-01-10".into()),
                time: Some("13:00".into()),
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 4);

        let response = api.submit_reservation(&scenario_request()).await.unwrap();
        assert!(response.success);
        assert_eq!(dispatcher.sent().len(), 1);

        handle.stop(true).await;
    }

    #[actix_web::test]
    async fn bad_request_body_is_decoded() {
        let dispatcher = RecordingDispatcher::accepting();
        let (base, handle) = serve(dispatcher.clone()).await;
        let api = HttpReservationApi::new(base).unwrap();

        let request = ReservationRequest {
            email: "nobody".into(),
            ..scenario_request()
        };
        let response = api.submit_reservation(&request).await.unwrap();

        assert!(!response.success);
        assert!(response.error.is_some());
        assert_eq!(dispatcher.attempts(), 0);
        handle.stop(true).await;
    }
}
