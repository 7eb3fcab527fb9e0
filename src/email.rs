use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::sources::SourceError;
use crate::templates::personalize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailPayload {
    pub to: Vec<Recipient>,
    pub subject: String,
    pub body: String,
}

/// Partial success is the normal shape here: one bad recipient lands in
/// `failed`/`errors` without failing the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailResult {
    pub sent: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// O365 dispatch via Microsoft Graph `sendMail`. The live path needs an
/// Azure AD app registration with Mail.Send; until that exists the mock
/// transport personalizes per recipient and logs instead of sending.
pub struct EmailService {
    mode: Mode,
}

enum Mode {
    Mock,
    Unconfigured,
}

impl EmailService {
    pub fn mock() -> Self {
        EmailService { mode: Mode::Mock }
    }

    pub fn from_env() -> Self {
        let configured = ["AZURE_TENANT_ID", "AZURE_CLIENT_ID", "AZURE_CLIENT_SECRET", "O365_SENDER_EMAIL"]
            .iter()
            .all(|var| std::env::var(var).is_ok());
        // Graph client wiring lands with the backend proxy; a configured
        // environment still routes through the mock transport for now.
        if configured {
            EmailService { mode: Mode::Mock }
        } else {
            EmailService {
                mode: Mode::Unconfigured,
            }
        }
    }

    pub async fn send(&self, payload: &EmailPayload) -> Result<EmailResult, SourceError> {
        match self.mode {
            Mode::Mock => Ok(self.send_mock(payload)),
            Mode::Unconfigured => Err(SourceError::Unavailable(
                "O365 email not configured. Set AZURE_TENANT_ID, AZURE_CLIENT_ID, \
                 AZURE_CLIENT_SECRET and O365_SENDER_EMAIL."
                    .to_string(),
            )),
        }
    }

    fn send_mock(&self, payload: &EmailPayload) -> EmailResult {
        let mut result = EmailResult {
            sent: 0,
            failed: 0,
            errors: Vec::new(),
        };

        for recipient in &payload.to {
            if recipient.email.trim().is_empty() {
                result.failed += 1;
                result
                    .errors
                    .push(format!("no email address for '{}'", recipient.name));
                continue;
            }
            let subject = personalize(&payload.subject, &[("name", &recipient.name)]);
            let body = personalize(&payload.body, &[("name", &recipient.name)]);
            debug!(to = %recipient.email, %subject, body_len = body.len(), "mock email rendered");
            result.sent += 1;
        }

        info!(
            sent = result.sent,
            failed = result.failed,
            "mock email dispatch finished"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(recipients: Vec<Recipient>) -> EmailPayload {
        EmailPayload {
            to: recipients,
            subject: "We miss you on Udemy!".to_string(),
            body: "Hi {{name}}, log back in.".to_string(),
        }
    }

    #[tokio::test]
    async fn sends_to_every_valid_recipient() {
        let service = EmailService::mock();
        let result = service
            .send(&payload(vec![
                Recipient {
                    name: "Lisa Anderson".to_string(),
                    email: "lisa.anderson@company.com".to_string(),
                },
                Recipient {
                    name: "Raj Patel".to_string(),
                    email: "raj.patel@company.com".to_string(),
                },
            ]))
            .await
            .unwrap();
        assert_eq!(result.sent, 2);
        assert_eq!(result.failed, 0);
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn bad_recipient_fails_partially_not_fatally() {
        let service = EmailService::mock();
        let result = service
            .send(&payload(vec![
                Recipient {
                    name: "Carlos Rivera".to_string(),
                    email: "carlos.rivera@company.com".to_string(),
                },
                Recipient {
                    name: "Missing Address".to_string(),
                    email: "  ".to_string(),
                },
            ]))
            .await
            .unwrap();
        assert_eq!(result.sent, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("Missing Address"));
    }

    #[tokio::test]
    async fn unconfigured_service_reports_reason() {
        let service = EmailService {
            mode: Mode::Unconfigured,
        };
        let err = service.send(&payload(Vec::new())).await.unwrap_err();
        assert!(err.to_string().contains("O365 email not configured"));
    }
}
