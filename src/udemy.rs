use async_trait::async_trait;
use tracing::info;

use crate::mock::MockCatalog;
use crate::models::{Training, TrainingSource, UdemyLicense};
use crate::sources::{LicenseProvider, RevokeOutcome, SourceError, TrainingProvider};

/// Udemy Business adapter. Live mode maps to the organization analytics
/// endpoints (`user-course-activity`, `user-activity`) and the license
/// revocation endpoint; until the backend proxy is deployed those calls fail
/// with a configuration message instead.
pub struct UdemyClient {
    mode: Mode,
}

enum Mode {
    Mock(MockCatalog),
    Live(UdemyConfig),
    Unconfigured,
}

struct UdemyConfig {
    base_url: String,
    #[allow(dead_code)]
    client_id: String,
    #[allow(dead_code)]
    client_secret: String,
}

impl UdemyClient {
    /// Serve the generated dataset, restricted to Udemy-attributed records.
    pub fn mock(catalog: MockCatalog) -> Self {
        UdemyClient {
            mode: Mode::Mock(catalog),
        }
    }

    pub fn from_env() -> Self {
        let config = std::env::var("UDEMY_BASE_URL").ok().and_then(|base_url| {
            let client_id = std::env::var("UDEMY_CLIENT_ID").ok()?;
            let client_secret = std::env::var("UDEMY_CLIENT_SECRET").ok()?;
            Some(UdemyConfig {
                base_url,
                client_id,
                client_secret,
            })
        });

        UdemyClient {
            mode: match config {
                Some(config) => Mode::Live(config),
                None => Mode::Unconfigured,
            },
        }
    }

    fn unavailable(&self) -> SourceError {
        match &self.mode {
            Mode::Live(config) => SourceError::Unavailable(format!(
                "Udemy Business API at {} is not wired up in this build",
                config.base_url
            )),
            _ => SourceError::Unavailable(
                "Udemy API not configured. Set UDEMY_BASE_URL, UDEMY_CLIENT_ID and \
                 UDEMY_CLIENT_SECRET."
                    .to_string(),
            ),
        }
    }
}

#[async_trait]
impl TrainingProvider for UdemyClient {
    async fn fetch_trainings(&self) -> Result<Vec<Training>, SourceError> {
        match &self.mode {
            Mode::Mock(catalog) => Ok(catalog.trainings_for(TrainingSource::Udemy)),
            _ => Err(self.unavailable()),
        }
    }
}

#[async_trait]
impl LicenseProvider for UdemyClient {
    async fn fetch_licenses(&self) -> Result<Vec<UdemyLicense>, SourceError> {
        match &self.mode {
            Mode::Mock(catalog) => Ok(catalog.licenses.clone()),
            _ => Err(self.unavailable()),
        }
    }

    async fn revoke_licenses(&self, emails: &[String]) -> Result<RevokeOutcome, SourceError> {
        match &self.mode {
            Mode::Mock(_) => {
                info!(count = emails.len(), "mock-revoking Udemy licenses");
                Ok(RevokeOutcome {
                    revoked: emails.len(),
                })
            }
            _ => Err(self.unavailable()),
        }
    }
}
