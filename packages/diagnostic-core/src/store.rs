//! Field store: the single owner of every answer and the wizard position.
//!
//! The store performs no validation. It only holds values and hands out
//! immutable [`Snapshot`]s for the validation and visibility derivations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::field::{EnvironmentalSystem, Field, FieldValue, IdType, OrganizationKind};

/// The primary answer record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnswerRecord {
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "razonSocial")]
    pub organization_name: String,
    #[serde(rename = "tipoPersona")]
    pub organization_kind: OrganizationKind,
    #[serde(rename = "representante")]
    pub legal_representative: String,
    #[serde(rename = "tipoId")]
    pub id_type: IdType,
    #[serde(rename = "numeroId")]
    pub id_number: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "georef")]
    pub georeference: String,
    #[serde(rename = "actividad")]
    pub economic_activity: String,
    /// Numeric answer kept as typed; parsed during validation.
    #[serde(rename = "numTrabajadores")]
    pub worker_count: String,
    #[serde(rename = "jornada")]
    pub work_schedule: String,
    #[serde(rename = "entradasSalidas")]
    pub process_inputs_outputs: String,
    #[serde(rename = "procesosSinES")]
    pub fallback_processes: String,
    #[serde(rename = "aceptaTratamiento")]
    pub consent: bool,
}

impl AnswerRecord {
    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Email => Some(&mut self.email),
            Field::OrganizationName => Some(&mut self.organization_name),
            Field::LegalRepresentative => Some(&mut self.legal_representative),
            Field::IdNumber => Some(&mut self.id_number),
            Field::Address => Some(&mut self.address),
            Field::Georeference => Some(&mut self.georeference),
            Field::EconomicActivity => Some(&mut self.economic_activity),
            Field::WorkerCount => Some(&mut self.worker_count),
            Field::WorkSchedule => Some(&mut self.work_schedule),
            Field::ProcessInputsOutputs => Some(&mut self.process_inputs_outputs),
            Field::FallbackProcesses => Some(&mut self.fallback_processes),
            _ => None,
        }
    }

    /// Text content of a text field, `None` for non-text fields.
    pub fn text(&self, field: Field) -> Option<&str> {
        let text = match field {
            Field::Email => &self.email,
            Field::OrganizationName => &self.organization_name,
            Field::LegalRepresentative => &self.legal_representative,
            Field::IdNumber => &self.id_number,
            Field::Address => &self.address,
            Field::Georeference => &self.georeference,
            Field::EconomicActivity => &self.economic_activity,
            Field::WorkerCount => &self.worker_count,
            Field::WorkSchedule => &self.work_schedule,
            Field::ProcessInputsOutputs => &self.process_inputs_outputs,
            Field::FallbackProcesses => &self.fallback_processes,
            _ => return None,
        };
        Some(text)
    }
}

/// Step-2 answers tracked beside the primary record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvironmentalAnswers {
    pub system: EnvironmentalSystem,
    /// Names of the selected documents, in selection order.
    pub documents: Vec<String>,
}

/// Wizard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Step {
    #[default]
    #[serde(rename = "1")]
    Identification,
    #[serde(rename = "2")]
    Operational,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Step::Identification => 1,
            Step::Operational => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Identification => "Organization identification",
            Step::Operational => "Additional information",
        }
    }
}

/// An opaque, externally owned list of locally selected files.
///
/// Only the count and the per-entry names are ever read; file contents are
/// never touched.
pub trait FileSelection {
    fn count(&self) -> usize;
    fn name(&self, index: usize) -> Option<&str>;
}

impl<S: AsRef<str>> FileSelection for [S] {
    fn count(&self) -> usize {
        self.len()
    }

    fn name(&self, index: usize) -> Option<&str> {
        self.get(index).map(|name| name.as_ref())
    }
}

impl<S: AsRef<str>> FileSelection for Vec<S> {
    fn count(&self) -> usize {
        self.len()
    }

    fn name(&self, index: usize) -> Option<&str> {
        self.get(index).map(|name| name.as_ref())
    }
}

/// Immutable read of the store at one point in time.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub answers: &'a AnswerRecord,
    pub environmental: &'a EnvironmentalAnswers,
}

impl<'a> Snapshot<'a> {
    pub fn new(answers: &'a AnswerRecord, environmental: &'a EnvironmentalAnswers) -> Self {
        Self {
            answers,
            environmental,
        }
    }
}

/// Holds the answers and the current step.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    answers: AnswerRecord,
    environmental: EnvironmentalAnswers,
    step: Step,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing answers, starting at step 1.
    pub fn with_answers(answers: AnswerRecord, environmental: EnvironmentalAnswers) -> Self {
        let mut store = Self {
            answers,
            environmental,
            step: Step::Identification,
        };
        if store.environmental.system != EnvironmentalSystem::Yes {
            store.environmental.documents.clear();
        }
        store
    }

    pub fn get(&self) -> Snapshot<'_> {
        Snapshot::new(&self.answers, &self.environmental)
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn environmental(&self) -> &EnvironmentalAnswers {
        &self.environmental
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn set_step(&mut self, step: Step) {
        self.step = step;
    }

    /// Update exactly one field of the answer record.
    ///
    /// Clearing the field's validation error is left to the caller.
    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) -> Result<(), StoreError> {
        let value = value.into().coerce_for(field)?;
        debug!(field = %field, "field updated");

        match value {
            FieldValue::Flag(flag) => self.answers.consent = flag,
            FieldValue::OrganizationKind(kind) => self.answers.organization_kind = kind,
            FieldValue::IdType(id) => self.answers.id_type = id,
            FieldValue::Text(text) => {
                let slot = self
                    .answers
                    .text_mut(field)
                    .ok_or(StoreError::AuxiliaryField(field))?;
                *slot = text;
            }
        }
        Ok(())
    }

    /// Answer the environmental-management-system question.
    ///
    /// Any answer other than YES drops the attached documents.
    pub fn select_environmental_system(&mut self, choice: EnvironmentalSystem) {
        self.environmental.system = choice;
        if choice != EnvironmentalSystem::Yes && !self.environmental.documents.is_empty() {
            debug!(dropped = self.environmental.documents.len(), "attachments cleared");
            self.environmental.documents.clear();
        }
    }

    /// Replace the attachment list with the names from `selection`.
    ///
    /// Attachments only exist under a YES answer; otherwise the selection is
    /// ignored and `false` is returned.
    pub fn attach_documents<F: FileSelection + ?Sized>(&mut self, selection: &F) -> bool {
        if self.environmental.system != EnvironmentalSystem::Yes {
            debug!(system = ?self.environmental.system, "attachments ignored");
            return false;
        }
        self.environmental.documents = (0..selection.count())
            .filter_map(|index| selection.name(index))
            .map(str::to_string)
            .collect();
        debug!(count = self.environmental.documents.len(), "attachments selected");
        true
    }
}
