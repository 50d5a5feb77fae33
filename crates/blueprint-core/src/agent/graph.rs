//! Control loop sequencing the stages.

use std::fmt;

use log::debug;

use super::Agent;
use crate::{
    error::{AgentError, Result},
    models::RunState,
};

/// A position in the stage graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Planner,
    Architect,
    Coder,
    End,
}

impl Node {
    /// Where every run starts.
    pub const ENTRY: Self = Self::Planner;

    /// The node that follows `self` given the state it just produced.
    pub fn next(self, state: &RunState) -> Self {
        match self {
            Self::Planner => Self::Architect,
            Self::Architect => Self::Coder,
            Self::Coder if state.is_done() => Self::End,
            Self::Coder => Self::Coder,
            Self::End => Self::End,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planner => "planner",
            Self::Architect => "architect",
            Self::Coder => "coder",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drives an [`Agent`]'s stages from [`Node::ENTRY`] to [`Node::End`].
#[derive(Debug)]
pub struct Graph<'a> {
    agent: &'a Agent,
}

impl<'a> Graph<'a> {
    pub fn new(agent: &'a Agent) -> Self {
        Self { agent }
    }

    /// Runs `state` through the graph until it reaches [`Node::End`].
    ///
    /// Each stage execution counts as one transition in
    /// `state.transitions`.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure, or `AgentError::RecursionLimit` when
    /// another transition would exceed the agent's ceiling.
    pub fn run(&self, mut state: RunState) -> Result<RunState> {
        let limit = self.agent.recursion_limit;
        let mut node = Node::ENTRY;

        while node != Node::End {
            if state.transitions >= limit {
                return Err(AgentError::RecursionLimit { limit });
            }
            debug!("Entering {node} (transition {})", state.transitions + 1);
            self.step(node, &mut state)?;
            state.transitions += 1;
            node = node.next(&state);
        }
        Ok(state)
    }

    /// Executes the stage behind `node` once.
    pub fn step(&self, node: Node, state: &mut RunState) -> Result<()> {
        match node {
            Node::Planner => self.agent.plan(state),
            Node::Architect => self.agent.architect(state),
            Node::Coder => self.agent.code(state),
            Node::End => Ok(()),
        }
    }
}
