//! Model invocation observers
//!
//! Pre/post hooks attached to every agent node. The execution engine invokes
//! them around each model call; this crate only declares the seam and ships
//! the logging pair.

use std::sync::Arc;

use async_trait::async_trait;

use crate::logging::{LogSeverity, LoggingClient};

/// Observes model traffic for an agent. Implementations are owned by the
/// caller and shared across nodes.
#[async_trait]
pub trait ModelObserver: Send + Sync {
    /// Runs before a query is sent to the model.
    async fn before_model(&self, agent_name: &str, query: &str);

    /// Runs after the model responds.
    async fn after_model(&self, agent_name: &str, response: &str);
}

/// Writes every query and response through the resolved logging handle.
pub struct LoggingObserver {
    client: Arc<LoggingClient>,
}

impl LoggingObserver {
    pub fn new(client: Arc<LoggingClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelObserver for LoggingObserver {
    async fn before_model(&self, agent_name: &str, query: &str) {
        self.client
            .emit(LogSeverity::Info, &format!("[query to {agent_name}] {query}"))
            .await;
    }

    async fn after_model(&self, agent_name: &str, response: &str) {
        self.client
            .emit(
                LogSeverity::Info,
                &format!("[response from {agent_name}] {response}"),
            )
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logging_observer_completes_on_local_client() {
        let observer = LoggingObserver::new(Arc::new(LoggingClient::Local));
        observer.before_model("steering", "where to?").await;
        observer.after_model("steering", "somewhere warm").await;
    }
}
