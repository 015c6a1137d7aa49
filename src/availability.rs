use rand::Rng;

use crate::constants::SAUNA_COUNT;
use crate::models::availability::{AvailabilityEntry, AvailabilityQuery};

/// Where the booking endpoints get open/closed status from.
///
/// The shipped source is random; a real inventory backend plugs in here
/// without touching the handlers or the form.
pub trait AvailabilitySource: Send + Sync {
    /// One entry per sauna unit, ids starting at 1.
    fn entries(&self, query: &AvailabilityQuery) -> Vec<AvailabilityEntry>;

    /// Facility-wide open flag.
    fn facility_open(&self) -> bool;
}

/// Coin-flip availability. Every call is independent and nothing is cached.
#[derive(Debug, Clone)]
pub struct RandomAvailability {
    saunas: u32,
}

impl RandomAvailability {
    pub fn new(saunas: u32) -> Self {
        Self { saunas }
    }
}

impl Default for RandomAvailability {
    fn default() -> Self {
        Self::new(SAUNA_COUNT)
    }
}

impl AvailabilitySource for RandomAvailability {
    fn entries(&self, _query: &AvailabilityQuery) -> Vec<AvailabilityEntry> {
        let mut rng = rand::thread_rng();
        (1..=self.saunas)
            .map(|id| AvailabilityEntry {
                id,
                available: rng.gen_bool(0.5),
            })
            .collect()
    }

    fn facility_open(&self) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }
}
