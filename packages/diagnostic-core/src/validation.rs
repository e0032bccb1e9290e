//! Per-step validation rules.
//!
//! Both passes are pure: they read a [`Snapshot`] and return a fresh
//! [`ValidationErrors`] map. Nothing is carried over from a previous pass,
//! so running a pass twice on the same snapshot yields the same map.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::field::{EnvironmentalSystem, Field, OrganizationKind};
use crate::store::{Snapshot, Step};

pub const MSG_REQUIRED: &str = "required field";
pub const MSG_INVALID_EMAIL: &str = "invalid email";
pub const MSG_REPRESENTATIVE_REQUIRED: &str = "required for legal entities";
pub const MSG_GEOREFERENCE_REQUIRED: &str = "select a location on the map or enter coordinates";
pub const MSG_INVALID_NUMBER: &str = "invalid number";
pub const MSG_DESCRIBE_INPUTS_OUTPUTS: &str = "describe process inputs and outputs";
pub const MSG_CONSENT_REQUIRED: &str = "must accept data-processing terms";
pub const MSG_SELECT_OPTION: &str = "select an option";
pub const MSG_ATTACH_DOCUMENT: &str = "attach at least one document";

lazy_static! {
    // local@domain.tld, whitespace-free runs on each side
    static ref EMAIL_REGEX: Regex = Regex::new(r"^\S+@\S+\.\S+$").unwrap();
}

/// Field → message map produced by one validation pass.
///
/// A missing key means the field is valid. Entries iterate in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Drop the entry for a single corrected field.
    pub fn clear(&mut self, field: Field) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Integer or decimal, finite. Surrounding whitespace is tolerated.
fn is_number(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Identification rules.
pub fn validate_identification(snapshot: &Snapshot<'_>) -> ValidationErrors {
    let answers = snapshot.answers;
    let mut errors = ValidationErrors::new();

    if !is_email(&answers.email) {
        errors.add(Field::Email, MSG_INVALID_EMAIL);
    }
    if is_blank(&answers.organization_name) {
        errors.add(Field::OrganizationName, MSG_REQUIRED);
    }
    if answers.organization_kind == OrganizationKind::LegalEntity
        && is_blank(&answers.legal_representative)
    {
        errors.add(Field::LegalRepresentative, MSG_REPRESENTATIVE_REQUIRED);
    }
    if is_blank(&answers.id_number) {
        errors.add(Field::IdNumber, MSG_REQUIRED);
    }
    if is_blank(&answers.address) {
        errors.add(Field::Address, MSG_REQUIRED);
    }
    if is_blank(&answers.georeference) {
        errors.add(Field::Georeference, MSG_GEOREFERENCE_REQUIRED);
    }

    errors
}

/// Operational rules, including the environmental answers.
pub fn validate_operational(snapshot: &Snapshot<'_>) -> ValidationErrors {
    let answers = snapshot.answers;
    let environmental = snapshot.environmental;
    let mut errors = ValidationErrors::new();

    if is_blank(&answers.economic_activity) {
        errors.add(Field::EconomicActivity, MSG_REQUIRED);
    }
    if !is_number(&answers.worker_count) {
        errors.add(Field::WorkerCount, MSG_INVALID_NUMBER);
    }
    if is_blank(&answers.work_schedule) {
        errors.add(Field::WorkSchedule, MSG_REQUIRED);
    }
    if is_blank(&answers.process_inputs_outputs) {
        errors.add(Field::ProcessInputsOutputs, MSG_DESCRIBE_INPUTS_OUTPUTS);
    }
    if !answers.consent {
        errors.add(Field::Consent, MSG_CONSENT_REQUIRED);
    }

    match environmental.system {
        EnvironmentalSystem::Unset => errors.add(Field::EnvironmentalSystem, MSG_SELECT_OPTION),
        EnvironmentalSystem::Yes if environmental.documents.is_empty() => {
            errors.add(Field::AttachedDocuments, MSG_ATTACH_DOCUMENT)
        }
        EnvironmentalSystem::Yes | EnvironmentalSystem::No => {}
    }

    errors
}

/// Run the pass that gates `step`.
pub fn validate_step(step: Step, snapshot: &Snapshot<'_>) -> ValidationErrors {
    match step {
        Step::Identification => validate_identification(snapshot),
        Step::Operational => validate_operational(snapshot),
    }
}
