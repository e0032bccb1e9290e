//! Conditional field visibility, derived from a snapshot on every call.

use std::collections::BTreeSet;

use crate::field::{EnvironmentalSystem, Field, OrganizationKind};
use crate::store::{Snapshot, Step};

const IDENTIFICATION_FIELDS: [Field; 8] = [
    Field::Email,
    Field::OrganizationName,
    Field::OrganizationKind,
    Field::LegalRepresentative,
    Field::IdType,
    Field::IdNumber,
    Field::Address,
    Field::Georeference,
];

const OPERATIONAL_FIELDS: [Field; 8] = [
    Field::EconomicActivity,
    Field::WorkerCount,
    Field::WorkSchedule,
    Field::ProcessInputsOutputs,
    Field::FallbackProcesses,
    Field::EnvironmentalSystem,
    Field::AttachedDocuments,
    Field::Consent,
];

/// Whether a field's presence depends on another answer.
pub fn is_conditional(field: Field) -> bool {
    matches!(field, Field::LegalRepresentative | Field::AttachedDocuments)
}

/// The conditional fields currently shown.
pub fn visible_fields(snapshot: &Snapshot<'_>) -> BTreeSet<Field> {
    let mut visible = BTreeSet::new();
    if snapshot.answers.organization_kind == OrganizationKind::LegalEntity {
        visible.insert(Field::LegalRepresentative);
    }
    if snapshot.environmental.system == EnvironmentalSystem::Yes {
        visible.insert(Field::AttachedDocuments);
    }
    visible
}

/// Fields to render for `step`, in display order, hidden ones filtered out.
pub fn fields_for_step(step: Step, snapshot: &Snapshot<'_>) -> Vec<Field> {
    let visible = visible_fields(snapshot);
    let fields: &[Field] = match step {
        Step::Identification => &IDENTIFICATION_FIELDS,
        Step::Operational => &OPERATIONAL_FIELDS,
    };

    fields
        .iter()
        .copied()
        .filter(|field| !is_conditional(*field) || visible.contains(field))
        .collect()
}
