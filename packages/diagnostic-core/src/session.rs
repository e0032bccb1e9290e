//! Session host: feeds events to the controller and executes its commands.

use tracing::info;

use crate::machine::Machine;
use crate::payload::SubmissionPayload;
use crate::wizard::{WizardCommand, WizardController, WizardEvent, WizardState, WizardView};

/// The submission collaborator.
///
/// Owns transport and whatever happens after a submission. The wizard never
/// retries or inspects the outcome.
pub trait Submitter {
    fn submit(&mut self, payload: SubmissionPayload);
}

impl<F: FnMut(SubmissionPayload)> Submitter for F {
    fn submit(&mut self, payload: SubmissionPayload) {
        self(payload)
    }
}

/// A controller wired to a submitter.
pub struct WizardSession<S> {
    controller: WizardController,
    submitter: S,
}

impl<S: Submitter> WizardSession<S> {
    pub fn new(submitter: S) -> Self {
        Self::with_controller(WizardController::new(), submitter)
    }

    pub fn with_controller(controller: WizardController, submitter: S) -> Self {
        Self {
            controller,
            submitter,
        }
    }

    /// Handle one user action and return the resulting state.
    pub fn dispatch(&mut self, event: &WizardEvent) -> WizardState {
        if let Some(WizardCommand::Submit(payload)) = self.controller.decide(event) {
            info!("handing payload to submitter");
            self.submitter.submit(payload);
        }
        self.controller.state()
    }

    /// Replay a sequence of actions in order.
    pub fn dispatch_all<'a, I>(&mut self, events: I) -> WizardState
    where
        I: IntoIterator<Item = &'a WizardEvent>,
    {
        for event in events {
            self.dispatch(event);
        }
        self.controller.state()
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn view(&self) -> WizardView {
        self.controller.view()
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn into_submitter(self) -> S {
        self.submitter
    }
}
