use async_trait::async_trait;

use crate::mock::MockCatalog;
use crate::models::{Training, TrainingSource};
use crate::sources::{SourceError, TrainingProvider};

/// Cornerstone OnDemand adapter. Live mode maps transcript rows from the
/// `vw_rpt_training` reporting view; until the OAuth2 proxy exists those
/// calls fail with a configuration message instead.
pub struct CsodClient {
    mode: Mode,
}

enum Mode {
    Mock(MockCatalog),
    Live(CsodConfig),
    Unconfigured,
}

struct CsodConfig {
    base_url: String,
    #[allow(dead_code)]
    client_id: String,
    #[allow(dead_code)]
    client_secret: String,
    #[allow(dead_code)]
    api_key: String,
}

impl CsodClient {
    pub fn mock(catalog: MockCatalog) -> Self {
        CsodClient {
            mode: Mode::Mock(catalog),
        }
    }

    pub fn from_env() -> Self {
        let config = std::env::var("CSOD_BASE_URL").ok().and_then(|base_url| {
            let client_id = std::env::var("CSOD_CLIENT_ID").ok()?;
            let client_secret = std::env::var("CSOD_CLIENT_SECRET").ok()?;
            let api_key = std::env::var("CSOD_API_KEY").ok()?;
            Some(CsodConfig {
                base_url,
                client_id,
                client_secret,
                api_key,
            })
        });

        CsodClient {
            mode: match config {
                Some(config) => Mode::Live(config),
                None => Mode::Unconfigured,
            },
        }
    }

    fn unavailable(&self) -> SourceError {
        match &self.mode {
            Mode::Live(config) => SourceError::Unavailable(format!(
                "CSOD API at {} is not wired up in this build",
                config.base_url
            )),
            _ => SourceError::Unavailable(
                "CSOD API not configured. Set CSOD_BASE_URL, CSOD_CLIENT_ID, \
                 CSOD_CLIENT_SECRET and CSOD_API_KEY."
                    .to_string(),
            ),
        }
    }
}

#[async_trait]
impl TrainingProvider for CsodClient {
    async fn fetch_trainings(&self) -> Result<Vec<Training>, SourceError> {
        match &self.mode {
            Mode::Mock(catalog) => Ok(catalog.trainings_for(TrainingSource::Csod)),
            _ => Err(self.unavailable()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn mock_mode_serves_only_csod_records() {
        let catalog =
            MockCatalog::generate(11, NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()).unwrap();
        let client = CsodClient::mock(catalog);
        let trainings = client.fetch_trainings().await.unwrap();
        assert!(!trainings.is_empty());
        assert!(trainings.iter().all(|t| t.source == TrainingSource::Csod));
    }

    #[tokio::test]
    async fn unconfigured_client_fails_with_reason() {
        let client = CsodClient {
            mode: Mode::Unconfigured,
        };
        let err = client.fetch_trainings().await.unwrap_err();
        assert!(err.to_string().contains("CSOD API not configured"));
    }
}
