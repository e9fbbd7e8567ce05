//! Agent topology declarations

pub mod node;
pub mod topology;

pub use node::{AgentNode, AgentNodeBuilder, GenerationConfig};
pub use topology::{steering_topology, validate};
