use crate::availability::AvailabilitySource;
use crate::models::availability::{AvailabilityQuery, AvailabilityResponse, SaunaStatus};

pub fn current_availability(
    source: &dyn AvailabilitySource,
    query: &AvailabilityQuery,
) -> AvailabilityResponse {
    let sauna_status = source.entries(query);
    tracing::debug!(
        "availability for {:?} {:?}: {} of {} open",
        query.date,
        query.time,
        sauna_status.iter().filter(|e| e.available).count(),
        sauna_status.len()
    );
    AvailabilityResponse { sauna_status }
}

pub fn facility_status(source: &dyn AvailabilitySource) -> SaunaStatus {
    SaunaStatus {
        is_available: source.facility_open(),
    }
}
