//! wayfarer-core - bootstrap and agent declarations for the wayfarer travel assistant
//!
//! This crate provides:
//! - Credential resolution for the cloud logging backend, with graceful
//!   fallback from an explicit key file to ambient discovery to local-only
//!   logging
//! - A remote/local logging handle created once at startup
//! - The steering agent tree: a routing parent and two travel specialists
//! - Pre/post model observers shared across agent nodes

pub mod agents;
pub mod config;
pub mod credentials;
pub mod logging;
pub mod observers;

// Re-export main types for convenience
pub use agents::node::{AgentNode, AgentNodeBuilder, GenerationConfig};
pub use agents::topology::{steering_topology, validate};
pub use config::BootstrapConfig;
pub use credentials::{CLOUD_PLATFORM_SCOPE, CredentialKind, ResolutionError, ScopedCredentials};
pub use logging::{CloudLoggingClient, LogSeverity, LoggingBootstrap, LoggingClient, bootstrap};
pub use observers::{LoggingObserver, ModelObserver};
