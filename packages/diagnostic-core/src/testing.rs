//! Test helpers: a recording submitter and valid-answer fixtures.

use std::sync::{Arc, Mutex};

use crate::field::{EnvironmentalSystem, Field, FieldValue, IdType, OrganizationKind};
use crate::payload::SubmissionPayload;
use crate::session::Submitter;
use crate::store::{AnswerRecord, EnvironmentalAnswers};
use crate::wizard::WizardEvent;

/// Submitter that keeps every payload it receives.
///
/// Clones share the same record, so a test can keep a handle while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSubmitter {
    received: Arc<Mutex<Vec<SubmissionPayload>>>,
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payloads(&self) -> Vec<SubmissionPayload> {
        self.received.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.received.lock().map(|v| v.len()).unwrap_or_default()
    }
}

impl Submitter for RecordingSubmitter {
    fn submit(&mut self, payload: SubmissionPayload) {
        if let Ok(mut received) = self.received.lock() {
            received.push(payload);
        }
    }
}

/// Step-1 answers that pass validation, for a legal entity.
pub fn valid_identification() -> AnswerRecord {
    AnswerRecord {
        email: "gerencia@curtiembres-sanbenito.co".into(),
        organization_name: "Curtiembres San Benito S.A.S".into(),
        organization_kind: OrganizationKind::LegalEntity,
        legal_representative: "María Fernanda Ruiz".into(),
        id_type: IdType::Nit,
        id_number: "901234567-1".into(),
        address: "Calle 59 Sur # 18-40, Bogotá, Cundinamarca".into(),
        georeference: "4.571300, -74.136900".into(),
        ..AnswerRecord::default()
    }
}

/// A full record that passes both steps.
pub fn valid_answers() -> AnswerRecord {
    AnswerRecord {
        economic_activity: "Leather tanning and finishing".into(),
        worker_count: "42".into(),
        work_schedule: "Mon-Sat 6:00-14:00".into(),
        process_inputs_outputs: "Raw hides, chrome salts, water; finished leather, wastewater"
            .into(),
        consent: true,
        ..valid_identification()
    }
}

/// Environmental answers that pass validation with no attachments.
pub fn valid_environmental() -> EnvironmentalAnswers {
    EnvironmentalAnswers {
        system: EnvironmentalSystem::No,
        documents: Vec::new(),
    }
}

fn change(field: Field, value: impl Into<FieldValue>) -> WizardEvent {
    WizardEvent::FieldChanged {
        field,
        value: value.into(),
    }
}

/// Events that fill step 1 with [`valid_identification`].
pub fn valid_identification_events() -> Vec<WizardEvent> {
    let answers = valid_identification();
    vec![
        change(Field::Email, answers.email),
        change(Field::OrganizationName, answers.organization_name),
        change(Field::OrganizationKind, answers.organization_kind),
        change(Field::LegalRepresentative, answers.legal_representative),
        change(Field::IdType, answers.id_type),
        change(Field::IdNumber, answers.id_number),
        change(Field::Address, answers.address),
        WizardEvent::MapClicked {
            lat: 4.5713,
            lng: -74.1369,
        },
    ]
}

/// Events that fill step 2 with [`valid_answers`] and answer NO.
pub fn valid_operational_events() -> Vec<WizardEvent> {
    let answers = valid_answers();
    vec![
        change(Field::EconomicActivity, answers.economic_activity),
        change(Field::WorkerCount, answers.worker_count),
        change(Field::WorkSchedule, answers.work_schedule),
        change(Field::ProcessInputsOutputs, answers.process_inputs_outputs),
        WizardEvent::EnvironmentalSystemSelected {
            choice: EnvironmentalSystem::No,
        },
        change(Field::Consent, true),
    ]
}
