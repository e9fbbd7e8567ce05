//! Agent node data model

use std::sync::Arc;

use anyhow::{Result, bail};

use crate::observers::ModelObserver;

/// Generation options pinned on an agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
}

impl GenerationConfig {
    /// Deterministic sampling: temperature pinned to zero.
    pub fn deterministic() -> Self {
        Self { temperature: 0.0 }
    }
}

/// One conversational role in the delegation tree.
///
/// Nodes are immutable once built. Children are owned, so the delegation
/// graph is a tree with no cycles by construction; an empty children list
/// marks a leaf that cannot delegate further. Which child handles a given
/// turn is the execution engine's decision — this type only declares the
/// shape.
pub struct AgentNode {
    name: String,
    description: String,
    instruction: String,
    model: String,
    generation: Option<GenerationConfig>,
    observers: Vec<Arc<dyn ModelObserver>>,
    children: Vec<AgentNode>,
}

impl AgentNode {
    pub fn builder(name: impl Into<String>) -> AgentNodeBuilder {
        AgentNodeBuilder {
            name: name.into(),
            description: String::new(),
            instruction: String::new(),
            model: None,
            generation: None,
            observers: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn generation(&self) -> Option<GenerationConfig> {
        self.generation
    }

    pub fn observers(&self) -> &[Arc<dyn ModelObserver>] {
        &self.observers
    }

    /// Children in delegation order.
    pub fn children(&self) -> &[AgentNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl std::fmt::Debug for AgentNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentNode")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("generation", &self.generation)
            .field("observers", &self.observers.len())
            .field("children", &self.children)
            .finish()
    }
}

/// Builder for [`AgentNode`]. `build` is the only place construction can
/// fail, and its error propagates unmodified to whoever declared the node.
pub struct AgentNodeBuilder {
    name: String,
    description: String,
    instruction: String,
    model: Option<String>,
    generation: Option<GenerationConfig>,
    observers: Vec<Arc<dyn ModelObserver>>,
    children: Vec<AgentNode>,
}

impl AgentNodeBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = Some(generation);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn ModelObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Attach a shared set of observers, preserving order.
    pub fn observers(mut self, observers: &[Arc<dyn ModelObserver>]) -> Self {
        self.observers.extend(observers.iter().cloned());
        self
    }

    /// Append a child the node may delegate to.
    pub fn sub_agent(mut self, child: AgentNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn build(self) -> Result<AgentNode> {
        if self.name.trim().is_empty() {
            bail!("agent name must not be empty");
        }
        let Some(model) = self.model else {
            bail!("agent '{}' has no model reference", self.name);
        };
        if model.trim().is_empty() {
            bail!("agent '{}' has an empty model reference", self.name);
        }

        Ok(AgentNode {
            name: self.name,
            description: self.description,
            instruction: self.instruction,
            model,
            generation: self.generation,
            observers: self.observers,
            children: self.children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingObserver {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ModelObserver for CountingObserver {
        async fn before_model(&self, _agent_name: &str, _query: &str) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
        async fn after_model(&self, _agent_name: &str, _response: &str) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn leaf(name: &str) -> AgentNode {
        AgentNode::builder(name)
            .description("a leaf")
            .instruction("do one thing")
            .model("gemini-2.0-flash")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_happy_path() {
        let node = AgentNode::builder("greeter")
            .description("Greets the user.")
            .instruction("Say hello.")
            .model("gemini-2.0-flash")
            .build()
            .unwrap();
        assert_eq!(node.name(), "greeter");
        assert_eq!(node.model(), "gemini-2.0-flash");
        assert!(node.is_leaf());
        assert!(node.generation().is_none());
    }

    #[test]
    fn test_missing_model_fails() {
        let err = AgentNode::builder("greeter").build().unwrap_err();
        assert!(err.to_string().contains("no model reference"));
    }

    #[test]
    fn test_empty_model_fails() {
        let err = AgentNode::builder("greeter").model("  ").build().unwrap_err();
        assert!(err.to_string().contains("empty model reference"));
    }

    #[test]
    fn test_empty_name_fails() {
        assert!(AgentNode::builder("").model("m").build().is_err());
    }

    #[test]
    fn test_children_keep_declaration_order() {
        let parent = AgentNode::builder("parent")
            .model("m")
            .sub_agent(leaf("first"))
            .sub_agent(leaf("second"))
            .build()
            .unwrap();
        let names: Vec<&str> = parent.children().iter().map(AgentNode::name).collect();
        assert_eq!(names, ["first", "second"]);
        assert!(!parent.is_leaf());
    }

    #[test]
    fn test_deterministic_generation_pins_temperature() {
        let node = AgentNode::builder("parent")
            .model("m")
            .generation(GenerationConfig::deterministic())
            .build()
            .unwrap();
        assert_eq!(node.generation(), Some(GenerationConfig { temperature: 0.0 }));
    }

    #[test]
    fn test_observers_are_shared_not_cloned() {
        let observer = Arc::new(CountingObserver {
            calls: AtomicUsize::new(0),
        });
        let shared: Vec<Arc<dyn ModelObserver>> = vec![observer.clone()];

        let a = AgentNode::builder("a").model("m").observers(&shared).build().unwrap();
        let b = AgentNode::builder("b").model("m").observers(&shared).build().unwrap();
        drop(shared);

        assert_eq!(a.observers().len(), 1);
        assert_eq!(b.observers().len(), 1);
        // Three handles to one observer: ours plus one per node.
        assert_eq!(Arc::strong_count(&observer), 3);
    }
}
