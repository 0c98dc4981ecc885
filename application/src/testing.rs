//! Scripted completion provider shared by use case tests

use crate::ports::completion_provider::{CompletionProvider, CompletionRequest, ProviderError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use traitor_domain::{Model, Participant, Role, Roster};

/// A scripted reply for one call
#[derive(Debug, Clone)]
pub(crate) enum Step {
    /// Reply with this text
    Text(String),
    /// Fail with a request error
    Error(String),
    /// Never answer (exercises timeouts)
    Hang,
}

pub(crate) fn text(s: &str) -> Step {
    Step::Text(s.to_string())
}

/// Mock provider that returns scripted replies per model, in order
///
/// Discussion calls and ballot calls (JSON mode) draw from separate queues.
/// When a model's queue is empty, the fallback step is used.
pub(crate) struct ScriptedProvider {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    ballots: Mutex<HashMap<String, VecDeque<Step>>>,
    fallback: Step,
    /// Every request seen, in call order
    calls: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self::with_fallback(text("Honestly that take is wild, who agrees?"))
    }

    pub(crate) fn with_fallback(fallback: Step) -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            ballots: Mutex::new(HashMap::new()),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn script(self, model: &str, steps: Vec<Step>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .extend(steps);
        self
    }

    pub(crate) fn ballot(self, model: &str, step: Step) -> Self {
        self.ballots
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .push_back(step);
        self
    }

    pub(crate) fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_for(&self, model: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.model.as_str() == model)
            .count()
    }

    fn next_step(&self, request: &CompletionRequest) -> Step {
        let queues = if request.params.wants_json() {
            &self.ballots
        } else {
            &self.scripts
        };
        let model = request.model.as_str();
        queues
            .lock()
            .unwrap()
            .get_mut(model)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(request.clone());
        match self.next_step(request) {
            Step::Text(t) => Ok(t),
            Step::Error(e) => Err(ProviderError::RequestFailed(e)),
            Step::Hang => std::future::pending().await,
        }
    }
}

/// Three seats: Alpha (`strong-a`), Beta (`weak-b`, Weak), Gamma (`strong-c`)
pub(crate) fn three_seat_roster() -> Roster {
    Roster::new(vec![
        Participant::new(0, Role::Ordinary, Model::new("strong-a"), "Chill & Observant"),
        Participant::new(1, Role::Weak, Model::new("weak-b"), "Chaotic & Random"),
        Participant::new(2, Role::Ordinary, Model::new("strong-c"), "Sarcastic & Witty"),
    ])
    .unwrap()
}
