use html_escape::encode_safe;

use crate::config::MailConfig;
use crate::constants::NOTIFICATION_SUBJECT;
use crate::models::email::MailMessage;
use crate::models::reservation::ValidReservation;

/// Builds the owner notification for one reservation. The customer's address
/// goes into Reply-To; the provider only lets us send from our own domain.
pub fn reservation_notification(mail: &MailConfig, reservation: &ValidReservation) -> MailMessage {
    MailMessage {
        sender: mail.sender.clone(),
        recipient: mail.notify_to.clone(),
        reply_to: Some(reservation.email.clone()),
        subject: NOTIFICATION_SUBJECT.to_string(),
        text: render_text(reservation),
        html: Some(render_html(reservation)),
    }
}

fn sauna_label(reservation: &ValidReservation) -> String {
    match reservation.sauna_id {
        Some(id) => format!("サウナ {}", id),
        None => "指定なし".to_string(),
    }
}

fn render_text(reservation: &ValidReservation) -> String {
    format!(
        "🔹 予約が入りました 🔹\n\
         📅 日付: {date}\n\
         ⏰ 時間: {time}\n\
         🧖 サウナ: {sauna}\n\
         📧 お客様メールアドレス: {email}\n\
         ✏️ ご利用希望内容:\n\
         {details}\n\
         \n\
         ----------------------------------------\n\
         このメールはサウナ予約システムから自動送信されています。\n",
        date = reservation.date.format("%Y-%m-%d"),
        time = reservation.slot_label(),
        sauna = sauna_label(reservation),
        email = reservation.email,
        details = reservation.details,
    )
}

fn render_html(reservation: &ValidReservation) -> String {
    let details = encode_safe(&reservation.details).replace('\n', "<br>");
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #0891b2;">サウナ予約システム - 新規予約</h2>
  <div style="background-color: #164e63; color: white; padding: 20px; border-radius: 10px;">
    <p><strong>日付:</strong> {date}</p>
    <p><strong>時間:</strong> {time}</p>
    <p><strong>サウナ:</strong> {sauna}</p>
    <p><strong>メールアドレス:</strong> {email}</p>
    <p><strong>ご利用希望内容:</strong><br>{details}</p>
  </div>
  <p style="margin-top: 20px; color: #666;">このメールはサウナ予約システムから自動送信されています。</p>
</div>"#,
        date = reservation.date.format("%Y-%m-%d"),
        time = reservation.slot_label(),
        sauna = sauna_label(reservation),
        email = encode_safe(&reservation.email),
        details = details,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservation::ReservationRequest;
    use crate::testing::mail_config;

    fn reservation(details: &str, sauna_id: Option<u32>) -> ValidReservation {
        ReservationRequest {
            date: "2025-01-10".into(),
            time: "13:00".into(),
            email: "a@example.com".into(),
            details: details.into(),
            sauna_id,
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn notification_goes_to_fixed_recipient() {
        let message = reservation_notification(&mail_config(), &reservation("2名で利用希望", None));
        assert_eq!(message.recipient, "owner@sauna.example");
        assert_eq!(message.sender, "reservations@sauna.example");
        assert_eq!(message.reply_to.as_deref(), Some("a@example.com"));
        assert_eq!(message.subject, NOTIFICATION_SUBJECT);
    }

    #[test]
    fn text_body_carries_request_fields() {
        let message = reservation_notification(&mail_config(), &reservation("2名で利用希望", Some(3)));
        assert!(message.text.contains("2025-01-10"));
        assert!(message.text.contains("13:00"));
        assert!(message.text.contains("2名で利用希望"));
        assert!(message.text.contains("サウナ 3"));
    }

    #[test]
    fn html_body_escapes_customer_text() {
        let message = reservation_notification(
            &mail_config(),
            &reservation("<script>alert('x')</script>\n2名", None),
        );
        let html = message.html.unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert("));
        assert!(html.contains("&lt;/script&gt;<br>2名"));
        assert!(!html.contains("alert('x')"));
        assert!(html.contains("指定なし"));
    }
}
