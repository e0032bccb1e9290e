//! Wizard controller: the two-step state machine.
//!
//! ```text
//!   Identification ──advance [step-1 valid]──► Operational ──submit [step-2 valid]──► Submitted
//!         ▲                                        │
//!         └────────────────── back ────────────────┘
//! ```
//!
//! Guards run a fresh validation pass. A failed guard keeps the current
//! state and exposes the new error map. A passed submit guard assembles the
//! payload and emits [`WizardCommand::Submit`]; nothing is submitted before.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::field::{EnvironmentalSystem, Field, FieldValue};
use crate::geo::{GeoSelector, MapViewport};
use crate::machine::Machine;
use crate::payload::SubmissionPayload;
use crate::store::{AnswerRecord, EnvironmentalAnswers, FieldStore, Snapshot, Step};
use crate::validation::{validate_identification, validate_operational, ValidationErrors};
use crate::visibility::{fields_for_step, visible_fields};

/// User actions dispatched by the presentation layer, one at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    /// Text edit, checkbox toggle or radio selection on a record field
    FieldChanged { field: Field, value: FieldValue },
    /// Radio selection on the environmental question
    EnvironmentalSystemSelected { choice: EnvironmentalSystem },
    /// New file selection; only the names are carried
    DocumentsSelected { names: Vec<String> },
    MapClicked { lat: f64, lng: f64 },
    Advance,
    Back,
    Submit,
}

/// Intent emitted by the controller for the host to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardCommand {
    Submit(SubmissionPayload),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardState {
    Identification,
    Operational,
    Submitted,
}

impl WizardState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardState::Submitted)
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardView {
    pub state: WizardState,
    pub step: Step,
    pub answers: AnswerRecord,
    pub environmental: EnvironmentalAnswers,
    pub errors: ValidationErrors,
    pub visible: BTreeSet<Field>,
    /// Fields to render for the current step, in order.
    pub fields: Vec<Field>,
    pub map: MapViewport,
}

#[derive(Debug, Clone, Default)]
pub struct WizardController {
    store: FieldStore,
    geo: GeoSelector,
    errors: ValidationErrors,
    submitted: bool,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-filled answers.
    pub fn with_store(store: FieldStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn state(&self) -> WizardState {
        if self.submitted {
            return WizardState::Submitted;
        }
        match self.store.step() {
            Step::Identification => WizardState::Identification,
            Step::Operational => WizardState::Operational,
        }
    }

    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn geo(&self) -> &GeoSelector {
        &self.geo
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.store.get()
    }

    pub fn visible_fields(&self) -> BTreeSet<Field> {
        visible_fields(&self.store.get())
    }

    pub fn view(&self) -> WizardView {
        let snapshot = self.store.get();
        WizardView {
            state: self.state(),
            step: self.store.step(),
            answers: snapshot.answers.clone(),
            environmental: snapshot.environmental.clone(),
            errors: self.errors.clone(),
            visible: visible_fields(&snapshot),
            fields: fields_for_step(self.store.step(), &snapshot),
            map: self.geo.viewport(),
        }
    }

    fn change_field(&mut self, field: Field, value: &FieldValue) {
        match self.store.set(field, value.clone()) {
            Ok(()) => {
                self.errors.clear(field);
                self.drop_hidden_errors();
            }
            Err(err) => warn!(field = %field, error = %err, "rejected field change"),
        }
    }

    /// A field that is no longer shown cannot carry an error.
    fn drop_hidden_errors(&mut self) {
        let visible = visible_fields(&self.store.get());
        for field in [Field::LegalRepresentative, Field::AttachedDocuments] {
            if !visible.contains(&field) && self.errors.clear(field) {
                debug!(field = %field, "error dropped for hidden field");
            }
        }
    }

    fn select_environmental_system(&mut self, choice: EnvironmentalSystem) {
        self.store.select_environmental_system(choice);
        self.errors.clear(Field::EnvironmentalSystem);
        self.drop_hidden_errors();
    }

    fn select_documents(&mut self, names: &[String]) {
        if self.store.attach_documents(names) {
            self.errors.clear(Field::AttachedDocuments);
        }
    }

    fn advance(&mut self) {
        self.errors = validate_identification(&self.store.get());
        if self.errors.is_empty() {
            self.store.set_step(Step::Operational);
            info!("advanced to operational step");
        } else {
            debug!(errors = self.errors.len(), "advance blocked");
        }
    }

    fn back(&mut self) {
        self.errors = ValidationErrors::new();
        self.store.set_step(Step::Identification);
        info!("returned to identification step");
    }

    fn submit(&mut self) -> Option<WizardCommand> {
        let snapshot = self.store.get();
        self.errors = validate_operational(&snapshot);
        if !self.errors.is_empty() {
            debug!(errors = self.errors.len(), "submit blocked");
            return None;
        }

        let payload = SubmissionPayload::assemble(&snapshot);
        self.submitted = true;
        info!(
            documents = payload.attached_document_names.as_ref().map_or(0, Vec::len),
            "diagnostic ready for submission"
        );
        Some(WizardCommand::Submit(payload))
    }
}

impl Machine for WizardController {
    type Event = WizardEvent;
    type Command = WizardCommand;

    fn decide(&mut self, event: &WizardEvent) -> Option<WizardCommand> {
        let state = self.state();
        match (state, event) {
            (WizardState::Submitted, _) => {
                debug!(?event, "wizard already submitted, event ignored");
                None
            }

            // =================================================================
            // Input events: accepted on either step
            // =================================================================
            (_, WizardEvent::FieldChanged { field, value }) => {
                self.change_field(*field, value);
                None
            }
            (_, WizardEvent::EnvironmentalSystemSelected { choice }) => {
                self.select_environmental_system(*choice);
                None
            }
            (_, WizardEvent::DocumentsSelected { names }) => {
                self.select_documents(names);
                None
            }
            (_, WizardEvent::MapClicked { lat, lng }) => {
                self.geo
                    .on_map_click(*lat, *lng, &mut self.store, &mut self.errors);
                None
            }

            // =================================================================
            // Transitions
            // =================================================================
            (WizardState::Identification, WizardEvent::Advance) => {
                self.advance();
                None
            }
            (WizardState::Operational, WizardEvent::Back) => {
                self.back();
                None
            }
            (WizardState::Operational, WizardEvent::Submit) => self.submit(),

            (state, event) => {
                debug!(?state, ?event, "event does not apply to current step");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::OrganizationKind;

    fn changed(field: Field, value: impl Into<FieldValue>) -> WizardEvent {
        WizardEvent::FieldChanged {
            field,
            value: value.into(),
        }
    }

    #[test]
    fn starts_on_identification_with_no_errors() {
        let wizard = WizardController::new();
        assert_eq!(wizard.state(), WizardState::Identification);
        assert!(wizard.errors().is_empty());
        assert_eq!(wizard.view().fields.len(), 8);
    }

    #[test]
    fn field_change_clears_only_that_error() {
        let mut wizard = WizardController::new();
        wizard.decide(&WizardEvent::Advance);
        assert!(wizard.errors().contains(Field::Email));
        assert!(wizard.errors().contains(Field::Address));

        wizard.decide(&changed(Field::Email, "not-an-email"));

        // cleared on edit even though still invalid; next pass re-reports it
        assert!(!wizard.errors().contains(Field::Email));
        assert!(wizard.errors().contains(Field::Address));
    }

    #[test]
    fn rejected_change_keeps_error() {
        let mut wizard = WizardController::new();
        wizard.decide(&WizardEvent::Advance);

        wizard.decide(&changed(Field::Email, true));

        assert!(wizard.errors().contains(Field::Email));
        assert!(wizard.store().answers().email.is_empty());
    }

    #[test]
    fn events_out_of_place_are_ignored() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.decide(&WizardEvent::Submit), None);
        assert_eq!(wizard.decide(&WizardEvent::Back), None);
        assert_eq!(wizard.state(), WizardState::Identification);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn switching_to_natural_person_hides_representative() {
        let mut wizard = WizardController::new();
        assert!(wizard.visible_fields().contains(&Field::LegalRepresentative));

        wizard.decide(&changed(Field::OrganizationKind, OrganizationKind::NaturalPerson));

        assert!(!wizard.visible_fields().contains(&Field::LegalRepresentative));
        assert!(!wizard.view().fields.contains(&Field::LegalRepresentative));
    }

    #[test]
    fn choosing_no_clears_both_environmental_errors() {
        let mut wizard = WizardController::new();
        wizard.decide(&WizardEvent::EnvironmentalSystemSelected {
            choice: EnvironmentalSystem::Yes,
        });
        wizard.errors.add(Field::EnvironmentalSystem, "select an option");
        wizard.errors.add(Field::AttachedDocuments, "attach at least one document");

        wizard.decide(&WizardEvent::EnvironmentalSystemSelected {
            choice: EnvironmentalSystem::No,
        });

        assert!(!wizard.errors().contains(Field::EnvironmentalSystem));
        assert!(!wizard.errors().contains(Field::AttachedDocuments));
    }

    #[test]
    fn natural_person_drops_representative_error() {
        let mut wizard = WizardController::new();
        wizard.decide(&WizardEvent::Advance);
        assert!(wizard.errors().contains(Field::LegalRepresentative));

        wizard.decide(&changed(Field::OrganizationKind, OrganizationKind::NaturalPerson));

        let view = wizard.view();
        assert!(!view.visible.contains(&Field::LegalRepresentative));
        assert!(!view.errors.contains(Field::LegalRepresentative));
        assert!(view.errors.contains(Field::Email));
        assert!(view.errors.contains(Field::OrganizationName));
    }

    #[test]
    fn documents_before_yes_are_ignored() {
        let mut wizard = WizardController::new();
        wizard.decide(&WizardEvent::DocumentsSelected {
            names: vec!["plan.pdf".into()],
        });
        assert!(wizard.store().environmental().documents.is_empty());

        wizard.decide(&WizardEvent::EnvironmentalSystemSelected {
            choice: EnvironmentalSystem::Yes,
        });
        wizard.decide(&WizardEvent::DocumentsSelected {
            names: vec!["plan.pdf".into()],
        });
        assert_eq!(wizard.store().environmental().documents, vec!["plan.pdf"]);
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let events: Vec<WizardEvent> = serde_json::from_str(
            r#"[
                {"type": "field_changed", "field": "correo", "value": "a@b.co"},
                {"type": "field_changed", "field": "aceptaTratamiento", "value": true},
                {"type": "environmental_system_selected", "choice": "YES"},
                {"type": "documents_selected", "names": ["plan.pdf"]},
                {"type": "map_clicked", "lat": 4.711, "lng": -74.0721},
                {"type": "advance"}
            ]"#,
        )
        .unwrap();

        assert_eq!(events[0], changed(Field::Email, "a@b.co"));
        assert_eq!(events[1], changed(Field::Consent, true));
        assert_eq!(
            events[2],
            WizardEvent::EnvironmentalSystemSelected {
                choice: EnvironmentalSystem::Yes
            }
        );
        assert_eq!(events[5], WizardEvent::Advance);
    }
}
