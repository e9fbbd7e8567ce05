//! The steering delegation tree
//!
//! Three conversational roles: a parent that figures out whether the user
//! already knows their destination, and the two specialists it hands the
//! conversation to.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::debug;

use crate::agents::node::{AgentNode, GenerationConfig};
use crate::observers::ModelObserver;

pub const STEERING: &str = "steering";
pub const TRAVEL_BRAINSTORMER: &str = "travel_brainstormer";
pub const ATTRACTIONS_PLANNER: &str = "attractions_planner";

const STEERING_INSTRUCTION: &str = "Ask the user if they know where they'd like to travel \
or if they need some help deciding.\n\
If they need help deciding, send them to 'travel_brainstormer'.\n\
If they know what country they'd like to visit, send them to the 'attractions_planner'.";

const BRAINSTORMER_INSTRUCTION: &str = "Provide a few suggestions of popular countries \
for travelers.\n\
Help a user identify their primary goals of travel: \
adventure, leisure, learning, shopping, or viewing art.\n\
Identify countries that would make great destinations based on their priorities.";

const PLANNER_INSTRUCTION: &str =
    "Provide the user options for attractions to visit within their selected country.";

/// Declare the full tree: the steering root (deterministic sampling) with
/// the brainstormer and planner as its only children.
///
/// The engine walking the tree owns routing. Construction fails only when
/// the model reference is unusable, and that error propagates unmodified.
pub fn steering_topology(
    model: &str,
    observers: &[Arc<dyn ModelObserver>],
) -> Result<AgentNode> {
    let travel_brainstormer = AgentNode::builder(TRAVEL_BRAINSTORMER)
        .description("Help a user decide what country to visit.")
        .instruction(BRAINSTORMER_INSTRUCTION)
        .model(model)
        .observers(observers)
        .build()?;

    let attractions_planner = AgentNode::builder(ATTRACTIONS_PLANNER)
        .description("Build a list of attractions to visit in a country.")
        .instruction(PLANNER_INSTRUCTION)
        .model(model)
        .observers(observers)
        .build()?;

    let root = AgentNode::builder(STEERING)
        .description("Start a user on a travel adventure.")
        .instruction(STEERING_INSTRUCTION)
        .model(model)
        .generation(GenerationConfig::deterministic())
        .sub_agent(travel_brainstormer)
        .sub_agent(attractions_planner)
        .build()?;

    debug!(
        "declared agent tree '{}' with {} sub-agents",
        root.name(),
        root.children().len()
    );
    Ok(root)
}

/// Walk the tree and check that every agent name is unique. Ownership
/// already rules out cycles; this catches copy-paste duplicates before the
/// engine sees them.
pub fn validate(root: &AgentNode) -> Result<()> {
    let mut seen = HashSet::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if !seen.insert(node.name().to_string()) {
            bail!("duplicate agent name '{}' in topology", node.name());
        }
        stack.extend(node.children().iter());
    }
    Ok(())
}
