use serde::{Deserialize, Serialize};

use crate::constants::{FIRST_SLOT_HOUR, LAST_SLOT_HOUR};

/// Open/closed status of one sauna unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub id: u32,
    pub available: bool,
}

/// Date and time the caller is looking at. The random source ignores both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub sauna_status: Vec<AvailabilityEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaunaStatus {
    pub is_available: bool,
}

/// Hourly time slots offered by the booking form, formatted like `9:00`.
pub fn opening_slots() -> Vec<String> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .map(|hour| format!("{}:00", hour))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_slots_cover_nine_to_nineteen() {
        let slots = opening_slots();
        assert_eq!(slots.len(), 11);
        assert_eq!(slots.first().map(String::as_str), Some("9:00"));
        assert_eq!(slots.last().map(String::as_str), Some("19:00"));
    }

    #[test]
    fn availability_response_uses_camel_case() {
        let body = AvailabilityResponse {
            sauna_status: vec![AvailabilityEntry { id: 1, available: true }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["saunaStatus"][0]["id"], 1);
        assert_eq!(json["saunaStatus"][0]["available"], true);
    }
}
