//! Stand-in for mail and calendar when no Google access token is configured.

use crate::domain::{CalendarEvent, DomainError, EmailRecord, NewEvent};
use crate::ports::{CalendarPort, MailPort};

const HINT: &str = "set ASSISTANT_GOOGLE_ACCESS_TOKEN to enable Gmail and Calendar";

/// Every call fails with [`DomainError::Config`]; the dispatcher turns that into a reply.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconfigured;

fn not_configured<T>() -> Result<T, DomainError> {
    Err(DomainError::Config(HINT.to_string()))
}

#[async_trait::async_trait]
impl MailPort for Unconfigured {
    async fn list(&self, _max: u32, _query: Option<&str>) -> Result<Vec<EmailRecord>, DomainError> {
        not_configured()
    }

    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<bool, DomainError> {
        not_configured()
    }
}

#[async_trait::async_trait]
impl CalendarPort for Unconfigured {
    async fn list_today(&self) -> Result<Vec<CalendarEvent>, DomainError> {
        not_configured()
    }

    async fn list_yesterday(&self) -> Result<Vec<CalendarEvent>, DomainError> {
        not_configured()
    }

    async fn create(&self, _event: &NewEvent) -> Result<CalendarEvent, DomainError> {
        not_configured()
    }

    async fn delete(&self, _event_id: &str) -> Result<bool, DomainError> {
        not_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_call_is_config_error() {
        let err = MailPort::list(&Unconfigured, 5, None).await.unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
        let err = Unconfigured.list_today().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not configured: set ASSISTANT_GOOGLE_ACCESS_TOKEN to enable Gmail and Calendar"
        );
    }
}
