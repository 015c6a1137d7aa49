use std::sync::Arc;

use crate::availability::AvailabilitySource;
use crate::config::MailConfig;
use crate::mail::MailDispatcher;

/// Shared, read-only handler dependencies. Cloned into every actix worker.
#[derive(Clone)]
pub struct AppState {
    pub mail: MailConfig,
    pub dispatcher: Arc<dyn MailDispatcher>,
    pub availability: Arc<dyn AvailabilitySource>,
}

impl AppState {
    pub fn new(
        mail: MailConfig,
        dispatcher: Arc<dyn MailDispatcher>,
        availability: Arc<dyn AvailabilitySource>,
    ) -> Self {
        Self {
            mail,
            dispatcher,
            availability,
        }
    }
}
