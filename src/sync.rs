use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{SourceReport, SyncResult, SyncSources};
use crate::sources::{LicenseProvider, TrainingProvider};

/// Pull both platforms in one shot. The three fetches (Udemy trainings,
/// CSOD trainings, Udemy licenses) run concurrently and are settled
/// individually: a failed call contributes zero records and an error entry
/// in its source's status block, without cancelling or blocking the others.
///
/// Source failures never surface as `Err`; even an all-sources-failed run
/// returns a normal snapshot with two error blocks. Each call is a fresh,
/// independent snapshot with no state carried across invocations.
pub async fn sync_all(
    udemy: &(impl TrainingProvider + LicenseProvider + Sync),
    csod: &(impl TrainingProvider + Sync),
    now: DateTime<Utc>,
) -> SyncResult {
    let mut result = SyncResult {
        sync_id: Uuid::new_v4(),
        trainings: Vec::new(),
        licenses: Vec::new(),
        synced_at: now,
        sources: SyncSources {
            udemy: SourceReport::success(),
            csod: SourceReport::success(),
        },
    };

    let (udemy_trainings, csod_trainings, udemy_licenses) = tokio::join!(
        udemy.fetch_trainings(),
        csod.fetch_trainings(),
        udemy.fetch_licenses(),
    );

    match udemy_trainings {
        Ok(trainings) => {
            result.sources.udemy.trainings = trainings.len();
            result.trainings.extend(trainings);
        }
        Err(err) => {
            warn!(source = "udemy", error = %err, "training fetch failed");
            result.sources.udemy.record_failure(err.to_string());
        }
    }

    match csod_trainings {
        Ok(trainings) => {
            result.sources.csod.trainings = trainings.len();
            result.trainings.extend(trainings);
        }
        Err(err) => {
            warn!(source = "csod", error = %err, "training fetch failed");
            result.sources.csod.record_failure(err.to_string());
        }
    }

    match udemy_licenses {
        Ok(licenses) => {
            result.sources.udemy.licenses = licenses.len();
            result.licenses = licenses;
        }
        Err(err) => {
            warn!(source = "udemy", error = %err, "license fetch failed");
            result.sources.udemy.record_failure(err.to_string());
        }
    }

    info!(
        sync_id = %result.sync_id,
        trainings = result.trainings.len(),
        licenses = result.licenses.len(),
        "sync finished"
    );

    result
}
