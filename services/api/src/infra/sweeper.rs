use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::repository::OtpRepository;
use crate::infra::db::DbOtpRepository;

/// Periodically delete expired OTP rows. Reads already ignore them; this keeps
/// the table small.
pub fn spawn_otp_sweeper(otps: DbOtpRepository, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            match otps.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => tracing::debug!(purged, "expired otps removed"),
                Err(e) => tracing::warn!(error = %e, "otp sweep failed"),
            }
        }
    })
}
