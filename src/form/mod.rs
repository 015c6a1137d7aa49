//! Client-side booking form.
//!
//! `BookingForm` holds the fields the user edits, owns the availability
//! poller, and moves through `Idle → Polling → Submitting → Submitted` as
//! the user works. Views watch [`ViewState`] and the availability channel
//! instead of poking at the form directly.

pub mod client;
pub mod poller;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::constants::{AVAILABILITY_POLL_SECS, SUBMITTED_RESET_SECS};
use crate::models::availability::{AvailabilityEntry, AvailabilityQuery};
use crate::models::reservation::{ReservationRequest, ValidationError};

pub use client::{HttpReservationApi, ReservationApi};
pub use poller::AvailabilityPoller;

pub const SUBMITTED_MESSAGE: &str = "サウナの予約が送信されました。ありがとうございます！";
pub const TRANSPORT_FAILED_MESSAGE: &str = "エラーが発生しました。";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Polling,
    Submitting,
    Submitted,
}

/// `SlotPicker` additionally requires a sauna picked from the open entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVariant {
    Simple,
    SlotPicker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub phase: FormPhase,
    pub message: Option<FormMessage>,
}

#[derive(Debug, Clone, Copy)]
pub struct FormTiming {
    pub poll_every: Duration,
    pub reset_after: Duration,
}

impl Default for FormTiming {
    fn default() -> Self {
        Self {
            poll_every: Duration::from_secs(AVAILABILITY_POLL_SECS),
            reset_after: Duration::from_secs(SUBMITTED_RESET_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blocked locally; nothing was sent.
    Invalid(ValidationError),
    Accepted,
    /// The server answered with `success: false`.
    Rejected(String),
    /// The request never got a usable answer.
    TransportFailed,
}

pub struct BookingForm {
    api: Arc<dyn ReservationApi>,
    variant: FormVariant,
    timing: FormTiming,
    fields: ReservationRequest,
    selected: Option<u32>,
    availability: Arc<watch::Sender<Vec<AvailabilityEntry>>>,
    view: Arc<watch::Sender<ViewState>>,
    poller: Option<AvailabilityPoller>,
    reset_task: Option<JoinHandle<()>>,
}

impl BookingForm {
    pub fn new(api: Arc<dyn ReservationApi>, variant: FormVariant, timing: FormTiming) -> Self {
        let (availability, _) = watch::channel(Vec::new());
        let (view, _) = watch::channel(ViewState {
            phase: FormPhase::Idle,
            message: None,
        });

        Self {
            api,
            variant,
            timing,
            fields: ReservationRequest::default(),
            selected: None,
            availability: Arc::new(availability),
            view: Arc::new(view),
            poller: None,
            reset_task: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.view.borrow().phase
    }

    pub fn message(&self) -> Option<FormMessage> {
        self.view.borrow().message.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    pub fn availability(&self) -> Vec<AvailabilityEntry> {
        self.availability.borrow().clone()
    }

    pub fn availability_updates(&self) -> watch::Receiver<Vec<AvailabilityEntry>> {
        self.availability.subscribe()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(AvailabilityPoller::is_running)
    }

    pub fn fields(&self) -> &ReservationRequest {
        &self.fields
    }

    pub fn selected_sauna(&self) -> Option<u32> {
        self.selected
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.fields.date = date.into();
        self.refresh_polling();
    }

    pub fn set_time(&mut self, time: impl Into<String>) {
        self.fields.time = time.into();
        self.refresh_polling();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.fields.email = email.into();
    }

    pub fn set_details(&mut self, details: impl Into<String>) {
        self.fields.details = details.into();
    }

    /// Picks a sauna from the entries currently shown as open.
    pub fn select_sauna(&mut self, id: u32) -> Result<(), ValidationError> {
        if !self.is_open(id) {
            return Err(ValidationError::SlotUnavailable(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        // leaving the confirmation early; the pending reset must not wipe
        // whatever this attempt reports
        if self.phase() == FormPhase::Submitted {
            self.cancel_reset();
            self.set_view(FormPhase::Idle, None);
        }
        self.set_view(self.phase(), None);

        let request = ReservationRequest {
            sauna_id: self.selected,
            ..self.fields.clone()
        };
        if let Err(e) = self.check_locally(&request) {
            self.set_view(self.phase(), Some(FormMessage::Error(e.to_string())));
            return SubmitOutcome::Invalid(e);
        }

        self.set_view(FormPhase::Submitting, None);

        match self.api.submit_reservation(&request).await {
            Ok(response) if response.success => {
                info!("reservation accepted for {} {}", request.date, request.time);
                self.finish_submission();
                SubmitOutcome::Accepted
            }
            Ok(response) => {
                let reason = response.error.unwrap_or_else(|| "不明なエラー".to_string());
                self.set_view(
                    self.resting_phase(),
                    Some(FormMessage::Error(format!("送信に失敗しました: {}", reason))),
                );
                SubmitOutcome::Rejected(reason)
            }
            Err(e) => {
                warn!("reservation request failed: {:#}", e);
                self.set_view(
                    self.resting_phase(),
                    Some(FormMessage::Error(TRANSPORT_FAILED_MESSAGE.to_string())),
                );
                SubmitOutcome::TransportFailed
            }
        }
    }

    fn check_locally(&self, request: &ReservationRequest) -> Result<(), ValidationError> {
        request.validate()?;
        match request.sauna_id {
            None if self.variant == FormVariant::SlotPicker => Err(ValidationError::SlotNotSelected),
            Some(id) if !self.is_open(id) => Err(ValidationError::SlotUnavailable(id)),
            _ => Ok(()),
        }
    }

    fn is_open(&self, id: u32) -> bool {
        self.availability
            .borrow()
            .iter()
            .any(|entry| entry.id == id && entry.available)
    }

    fn resting_phase(&self) -> FormPhase {
        if self.is_polling() {
            FormPhase::Polling
        } else {
            FormPhase::Idle
        }
    }

    fn set_view(&self, phase: FormPhase, message: Option<FormMessage>) {
        self.view.send_replace(ViewState { phase, message });
    }

    fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
        self.availability.send_replace(Vec::new());
        self.selected = None;
    }

    fn refresh_polling(&mut self) {
        self.cancel_reset();
        self.stop_polling();

        let message = match self.phase() {
            FormPhase::Submitted => None,
            _ => self.message(),
        };

        if self.fields.date.is_empty() || self.fields.time.is_empty() {
            self.set_view(FormPhase::Idle, message);
            return;
        }

        let query = AvailabilityQuery {
            date: Some(self.fields.date.clone()),
            time: Some(self.fields.time.clone()),
        };
        self.poller = Some(AvailabilityPoller::start(
            self.api.clone(),
            query,
            self.timing.poll_every,
            self.availability.clone(),
        ));
        self.set_view(FormPhase::Polling, message);
    }

    fn finish_submission(&mut self) {
        self.stop_polling();
        self.fields = ReservationRequest::default();
        self.set_view(
            FormPhase::Submitted,
            Some(FormMessage::Success(SUBMITTED_MESSAGE.to_string())),
        );

        self.cancel_reset();
        let view = self.view.clone();
        let delay = self.timing.reset_after;
        self.reset_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.send_if_modified(|state| {
                if state.phase != FormPhase::Submitted {
                    return false;
                }
                *state = ViewState {
                    phase: FormPhase::Idle,
                    message: None,
                };
                true
            });
        }));
    }

    fn cancel_reset(&mut self) {
        if let Some(task) = self.reset_task.take() {
            task.abort();
        }
    }
}

impl Drop for BookingForm {
    fn drop(&mut self) {
        self.cancel_reset();
    }
}
