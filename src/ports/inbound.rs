//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;
use serde::{Deserialize, Serialize};

/// Input port: UI/CLI drives the router.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive loop until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}

/// Request body accepted by request/response hosts.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response body returned by request/response hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResponse {
    pub fn ok(response: String) -> Self {
        Self {
            response,
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self {
            response: String::new(),
            success: false,
            error: Some(error.to_string()),
        }
    }
}
