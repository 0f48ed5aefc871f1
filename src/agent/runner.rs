//! The agent run loop.
//!
//! `Idle → Discovering → Selecting → Invoking → Done`, with any error
//! ending the run in `Failed`. Nothing is retried.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::discovery::{ActionDescriptor, ModuleDocument};

use super::client::UapClient;
use super::error::AgentError;
use super::invocation::{build_invocation, ActionInvocation, ActionResult};
use super::matcher::{rank_modules, select_action};
use super::params::GoalValues;
use super::summary::summarize;
use super::transport::Transport;

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Discovering,
    Selecting,
    Invoking,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Discovering => "discovering",
            Self::Selecting => "selecting",
            Self::Invoking => "invoking",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub goal: String,
    /// Service name from the discovery document.
    pub service: String,
    /// Module the action came from.
    pub module: String,
    pub action: ActionDescriptor,
    pub invocation: ActionInvocation,
    pub result: ActionResult,
    /// States the run passed through.
    pub states: Vec<RunState>,
}

impl RunReport {
    /// Human-readable result.
    pub fn summary(&self) -> String {
        summarize(&self.action.name, &self.result.body)
    }
}

/// Performs discovery and invokes one action per goal.
pub struct Agent<T: Transport> {
    client: UapClient<T>,
    auto_confirm: bool,
    today: NaiveDate,
    history: Vec<RunState>,
}

impl<T: Transport> fmt::Debug for Agent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("client", &self.client)
            .field("auto_confirm", &self.auto_confirm)
            .field("today", &self.today)
            .field("state", &self.state())
            .finish()
    }
}

impl<T: Transport> Agent<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            client: UapClient::new(base_url, transport),
            auto_confirm: false,
            today: chrono::Local::now().date_naive(),
            history: vec![RunState::Idle],
        }
    }

    /// Allow actions marked `confirm: user` without asking.
    pub fn with_auto_confirm(mut self, auto_confirm: bool) -> Self {
        self.auto_confirm = auto_confirm;
        self
    }

    /// Date relative phrases ("next weekend") are resolved against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn client(&self) -> &UapClient<T> {
        &self.client
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.history.last().copied().unwrap_or(RunState::Idle)
    }

    /// States visited by the latest run.
    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    /// Discover, select, invoke.
    pub async fn run(&mut self, goal: &str) -> Result<RunReport, AgentError> {
        self.history = vec![RunState::Idle];
        log::info!("Agent goal: {}", goal);

        match self.execute(goal).await {
            Ok(mut report) => {
                self.transition(RunState::Done);
                report.states = self.history.clone();
                Ok(report)
            }
            Err(e) => {
                self.transition(RunState::Failed);
                log::warn!("Agent run failed ({}): {}", e.kind(), e);
                Err(e)
            }
        }
    }

    async fn execute(&mut self, goal: &str) -> Result<RunReport, AgentError> {
        self.transition(RunState::Discovering);
        let root = self.client.discover().await?;
        let mut modules: Vec<(String, ModuleDocument)> = Vec::new();
        for module_ref in rank_modules(goal, &root.modules) {
            let doc = self.client.fetch_module(module_ref).await?;
            modules.push((module_ref.id.clone(), doc));
        }

        self.transition(RunState::Selecting);
        let docs: Vec<ModuleDocument> = modules.iter().map(|(_, d)| d.clone()).collect();
        let selection = select_action(goal, &docs).ok_or_else(|| AgentError::SchemaMismatch {
            goal: goal.to_string(),
            available: docs
                .iter()
                .flat_map(|d| d.actions.iter().map(|a| a.name.clone()))
                .collect(),
        })?;
        let module = modules[selection.module].0.clone();
        let action = docs[selection.module].actions[selection.action].clone();
        log::info!(
            "Selected {}/{} (score {})",
            module,
            action.name,
            selection.score
        );

        let values = GoalValues::extract(goal, self.today);
        let invocation = build_invocation(&action, &values)?;
        if action.requires_confirmation() && !self.auto_confirm {
            return Err(AgentError::ConfirmationRequired {
                action: action.name.clone(),
            });
        }

        self.transition(RunState::Invoking);
        let result = self.client.invoke(&invocation).await?;

        Ok(RunReport {
            goal: goal.to_string(),
            service: root.name,
            module,
            action,
            invocation,
            result,
            states: Vec::new(),
        })
    }

    fn transition(&mut self, next: RunState) {
        log::debug!("Agent state: {} -> {}", self.state(), next);
        self.history.push(next);
    }
}
