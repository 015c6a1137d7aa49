use chrono::{NaiveDate, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{FIRST_SLOT_HOUR, LAST_SLOT_HOUR, SAUNA_COUNT};

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Booking intent as posted by the form. Missing fields deserialize to empty
/// strings so they are reported by `validate` instead of the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sauna_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReservation {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub email: String,
    pub details: String,
    pub sauna_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("日付、時間、メールアドレス、予約内容をすべて入力してください。")]
    MissingFields(Vec<&'static str>),

    #[error("メールアドレスの形式が正しくありません。")]
    InvalidEmail,

    #[error("日付の形式が正しくありません: {0}")]
    InvalidDate(String),

    #[error("時間は9:00〜19:00の正時から選択してください: {0}")]
    InvalidTime(String),

    #[error("サウナ {0} は存在しません。")]
    UnknownSauna(u32),

    #[error("時間帯を選択してください")]
    SlotNotSelected,

    #[error("サウナ {0} は現在満室です。別の枠を選択してください。")]
    SlotUnavailable(u32),
}

impl ReservationRequest {
    pub fn validate(&self) -> Result<ValidReservation, ValidationError> {
        let missing: Vec<&'static str> = [
            ("date", &self.date),
            ("time", &self.time),
            ("email", &self.email),
            ("details", &self.details),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let email = self.email.trim();
        if !EMAIL_SHAPE.is_match(email) {
            return Err(ValidationError::InvalidEmail);
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(self.date.clone()))?;

        let time = parse_slot(self.time.trim())
            .ok_or_else(|| ValidationError::InvalidTime(self.time.clone()))?;

        if let Some(id) = self.sauna_id {
            if id == 0 || id > SAUNA_COUNT {
                return Err(ValidationError::UnknownSauna(id));
            }
        }

        Ok(ValidReservation {
            date,
            time,
            email: email.to_string(),
            details: self.details.trim().to_string(),
            sauna_id: self.sauna_id,
        })
    }
}

fn parse_slot(raw: &str) -> Option<NaiveTime> {
    let time = NaiveTime::parse_from_str(raw, "%H:%M").ok()?;
    let on_the_hour = time.minute() == 0;
    let open = (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR).contains(&time.hour());
    (on_the_hour && open).then_some(time)
}

impl ValidReservation {
    /// Time in the same `9:00` form the booking page offers.
    pub fn slot_label(&self) -> String {
        self.time.format("%-H:%M").to_string()
    }
}

impl ReservationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
        }
    }
}
