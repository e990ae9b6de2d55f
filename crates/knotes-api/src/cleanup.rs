//! Daily purge of notes that were created but never written to.

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use tokio::task::JoinHandle;

use crate::service::NoteService;

const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Run [`NoteService::cleanup`] every day at `hour` local time.
pub fn spawn_cleanup_task(service: NoteService, hour: u32) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let delay = delay_until_next_run(&Local::now(), hour);
            tracing::debug!("Next empty-note cleanup in {}s", delay.as_secs());
            tokio::time::sleep(delay).await;

            match service.cleanup().await {
                Ok(removed) if removed.is_empty() => tracing::debug!("No empty notes to clean"),
                Ok(removed) => tracing::info!("Removed {} empty notes", removed.len()),
                Err(error) => tracing::error!("Empty-note cleanup failed: {}", error),
            }
        }
    })
}

/// Time from `now` until the next `hour:00:00` wall-clock time.
fn delay_until_next_run<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32) -> Duration {
    let now = now.naive_local();
    let Some(today) = now.date().and_hms_opt(hour, 0, 0) else {
        return ONE_DAY;
    };

    let next = if today > now {
        today
    } else {
        today + chrono::Duration::days(1)
    };
    (next - now).to_std().unwrap_or(ONE_DAY)
}
