use tracing::{error, info};

use crate::mail::templates::reservation_notification;
use crate::models::reservation::{ReservationRequest, ReservationResponse, ValidationError};
use crate::state::AppState;

pub const DISPATCH_FAILED: &str = "予約通知メールを送信できませんでした";

/// Validates the request and sends exactly one notification for it.
///
/// Validation problems come back as `Err` and nothing is sent. A dispatcher
/// failure is logged and reported as `success: false`; it never escapes.
pub async fn submit_reservation(
    state: &AppState,
    request: &ReservationRequest,
) -> Result<ReservationResponse, ValidationError> {
    let reservation = request.validate()?;
    let message = reservation_notification(&state.mail, &reservation);

    match state.dispatcher.send(&message).await {
        Ok(()) => {
            info!(
                "reservation notification sent for {} {}",
                reservation.date,
                reservation.slot_label()
            );
            Ok(ReservationResponse::ok())
        }
        Err(e) => {
            error!("メール送信エラー: {}", e);
            Ok(ReservationResponse::failed(DISPATCH_FAILED))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingDispatcher, app_state, scenario_request};

    #[tokio::test]
    async fn accepted_request_sends_one_message() {
        let dispatcher = RecordingDispatcher::accepting();
        let state = app_state(dispatcher.clone());

        let response = submit_reservation(&state, &scenario_request()).await.unwrap();

        assert_eq!(response, ReservationResponse::ok());
        let sent = dispatcher.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, state.mail.notify_to);
        assert!(sent[0].text.contains("2025-01-10"));
        assert!(sent[0].text.contains("13:00"));
        assert!(sent[0].text.contains("2名で利用希望"));
    }

    #[tokio::test]
    async fn provider_failure_becomes_unsuccessful_response() {
        let dispatcher = RecordingDispatcher::failing("401 Unauthorized: invalid credentials");
        let state = app_state(dispatcher.clone());

        let response = submit_reservation(&state, &scenario_request()).await.unwrap();

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some(DISPATCH_FAILED));
        assert_eq!(dispatcher.attempts(), 1);
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_dispatcher() {
        let dispatcher = RecordingDispatcher::accepting();
        let state = app_state(dispatcher.clone());
        let request = ReservationRequest {
            details: String::new(),
            ..scenario_request()
        };

        let result = submit_reservation(&state, &request).await;

        assert!(matches!(result, Err(ValidationError::MissingFields(_))));
        assert_eq!(dispatcher.attempts(), 0);
    }

    #[tokio::test]
    async fn retried_requests_send_duplicates() {
        let dispatcher = RecordingDispatcher::accepting();
        let state = app_state(dispatcher.clone());

        for _ in 0..2 {
            submit_reservation(&state, &scenario_request()).await.unwrap();
        }

        assert_eq!(dispatcher.sent().len(), 2);
    }
}
