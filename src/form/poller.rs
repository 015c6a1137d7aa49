use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

use crate::form::client::ReservationApi;
use crate::models::availability::{AvailabilityEntry, AvailabilityQuery};

/// Periodic availability refresh owned by a form. Fetches once immediately,
/// then every `every`, until stopped or dropped.
pub struct AvailabilityPoller {
    task: JoinHandle<()>,
}

impl AvailabilityPoller {
    pub fn start(
        api: Arc<dyn ReservationApi>,
        query: AvailabilityQuery,
        every: Duration,
        sink: Arc<watch::Sender<Vec<AvailabilityEntry>>>,
    ) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match api.fetch_availability(&query).await {
                    Ok(entries) => {
                        debug!("availability refreshed: {} entries", entries.len());
                        sink.send_replace(entries);
                    }
                    Err(e) => {
                        warn!("空き状況取得エラー: {:#}", e);
                        sink.send_replace(Vec::new());
                    }
                }
            }
        });

        Self { task }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for AvailabilityPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}
