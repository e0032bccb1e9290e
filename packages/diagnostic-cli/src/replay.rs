//! Non-interactive mode: feed a JSON script of wizard events through a session.

use std::path::Path;

use anyhow::{Context, Result};
use diagnostic::{SubmissionPayload, ValidationErrors, WizardEvent, WizardSession, WizardState};
use tracing::debug;

use crate::deliver::PendingSubmission;

/// Final state of a replayed script.
#[derive(Debug)]
pub struct ReplayOutcome {
    pub state: WizardState,
    pub errors: ValidationErrors,
    pub payload: Option<SubmissionPayload>,
}

pub fn parse_events(json: &str) -> Result<Vec<WizardEvent>> {
    serde_json::from_str(json).context("Replay script must be a JSON array of wizard events")
}

pub fn load_events(path: &Path) -> Result<Vec<WizardEvent>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay script {}", path.display()))?;
    parse_events(&json).with_context(|| format!("Invalid replay script {}", path.display()))
}

pub fn run(events: &[WizardEvent]) -> ReplayOutcome {
    let mut session = WizardSession::new(PendingSubmission::default());
    for (index, event) in events.iter().enumerate() {
        let state = session.dispatch(event);
        debug!(index, ?state, "replayed event");
    }

    let view = session.view();
    ReplayOutcome {
        state: view.state,
        errors: view.errors,
        payload: session.into_submitter().take(),
    }
}
