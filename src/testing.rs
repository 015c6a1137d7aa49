//! Test doubles shared by the in-crate test suites.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;

use crate::availability::AvailabilitySource;
use crate::config::MailConfig;
use crate::mail::{MailDispatcher, MailError};
use crate::models::availability::{AvailabilityEntry, AvailabilityQuery};
use crate::models::email::MailMessage;
use crate::models::reservation::ReservationRequest;
use crate::state::AppState;

pub fn mail_config() -> MailConfig {
    MailConfig {
        api_base: Url::parse("https://api.mailgun.net").unwrap(),
        account_id: "mg.sauna.example".into(),
        api_token: "key-123".into(),
        sender: "reservations@sauna.example".into(),
        notify_to: "owner@sauna.example".into(),
    }
}

pub fn scenario_request() -> ReservationRequest {
    ReservationRequest {
        date: "2025-01-10".into(),
        time: "13:00".into(),
        email: "a@example.com".into(),
        details: "2名で利用希望".into(),
        sauna_id: None,
    }
}

pub fn app_state(dispatcher: Arc<RecordingDispatcher>) -> AppState {
    AppState::new(
        mail_config(),
        dispatcher,
        Arc::new(FixedAvailability::new(vec![true, false, true, false])),
    )
}

/// Records every message; optionally fails every send.
pub struct RecordingDispatcher {
    sent: Mutex<Vec<MailMessage>>,
    attempts: AtomicUsize,
    failure: Option<String>,
}

impl RecordingDispatcher {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            failure: None,
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            failure: Some(reason.to_string()),
        })
    }

    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MailDispatcher for RecordingDispatcher {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.failure {
            return Err(MailError::new(reason.clone()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Deterministic availability: sauna `i + 1` is open iff `open[i]`.
pub struct FixedAvailability {
    open: Vec<bool>,
}

impl FixedAvailability {
    pub fn new(open: Vec<bool>) -> Self {
        Self { open }
    }
}

impl AvailabilitySource for FixedAvailability {
    fn entries(&self, _query: &AvailabilityQuery) -> Vec<AvailabilityEntry> {
        self.open
            .iter()
            .enumerate()
            .map(|(i, &available)| AvailabilityEntry {
                id: i as u32 + 1,
                available,
            })
            .collect()
    }

    fn facility_open(&self) -> bool {
        self.open.iter().any(|&open| open)
    }
}
