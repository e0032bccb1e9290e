//! Field identifiers and the typed values they hold.
//!
//! Every answer in the questionnaire is addressed by a [`Field`]. The field's
//! wire key (`correo`, `razonSocial`, ...) is what appears in error maps,
//! visibility sets, replay scripts and the submission payload.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A single questionnaire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    // =========================================================================
    // Step 1: identification and georeference
    // =========================================================================
    #[serde(rename = "correo")]
    Email,
    #[serde(rename = "razonSocial")]
    OrganizationName,
    #[serde(rename = "tipoPersona")]
    OrganizationKind,
    #[serde(rename = "representante")]
    LegalRepresentative,
    #[serde(rename = "tipoId")]
    IdType,
    #[serde(rename = "numeroId")]
    IdNumber,
    #[serde(rename = "direccion")]
    Address,
    #[serde(rename = "georef")]
    Georeference,

    // =========================================================================
    // Step 2: operational questions
    // =========================================================================
    #[serde(rename = "actividad")]
    EconomicActivity,
    #[serde(rename = "numTrabajadores")]
    WorkerCount,
    #[serde(rename = "jornada")]
    WorkSchedule,
    #[serde(rename = "entradasSalidas")]
    ProcessInputsOutputs,
    #[serde(rename = "procesosSinES")]
    FallbackProcesses,
    #[serde(rename = "sistemaAmbiental")]
    EnvironmentalSystem,
    #[serde(rename = "documentosAmbientales")]
    AttachedDocuments,
    #[serde(rename = "aceptaTratamiento")]
    Consent,
}

/// How a field's value is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    OrganizationKind,
    IdType,
    /// Tracked outside the answer record, set through dedicated operations.
    Auxiliary,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Flag => write!(f, "flag"),
            FieldKind::OrganizationKind => write!(f, "organization kind"),
            FieldKind::IdType => write!(f, "id type"),
            FieldKind::Auxiliary => write!(f, "auxiliary"),
        }
    }
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::Email,
        Field::OrganizationName,
        Field::OrganizationKind,
        Field::LegalRepresentative,
        Field::IdType,
        Field::IdNumber,
        Field::Address,
        Field::Georeference,
        Field::EconomicActivity,
        Field::WorkerCount,
        Field::WorkSchedule,
        Field::ProcessInputsOutputs,
        Field::FallbackProcesses,
        Field::EnvironmentalSystem,
        Field::AttachedDocuments,
        Field::Consent,
    ];

    /// Wire key used in error maps and payloads.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Email => "correo",
            Field::OrganizationName => "razonSocial",
            Field::OrganizationKind => "tipoPersona",
            Field::LegalRepresentative => "representante",
            Field::IdType => "tipoId",
            Field::IdNumber => "numeroId",
            Field::Address => "direccion",
            Field::Georeference => "georef",
            Field::EconomicActivity => "actividad",
            Field::WorkerCount => "numTrabajadores",
            Field::WorkSchedule => "jornada",
            Field::ProcessInputsOutputs => "entradasSalidas",
            Field::FallbackProcesses => "procesosSinES",
            Field::EnvironmentalSystem => "sistemaAmbiental",
            Field::AttachedDocuments => "documentosAmbientales",
            Field::Consent => "aceptaTratamiento",
        }
    }

    /// Label shown by a presentation layer.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Email => "Email",
            Field::OrganizationName => "Name or company name",
            Field::OrganizationKind => "Organization kind",
            Field::LegalRepresentative => "Legal representative name",
            Field::IdType => "Identification type",
            Field::IdNumber => "Identification number",
            Field::Address => "Company address",
            Field::Georeference => "Georeference (lat, lng)",
            Field::EconomicActivity => "What is the company's economic activity?",
            Field::WorkerCount => "How many people work at the company?",
            Field::WorkSchedule => "What is the work schedule?",
            Field::ProcessInputsOutputs => {
                "What are the inputs and outputs of your production processes or services?"
            }
            Field::FallbackProcesses => {
                "If inputs and outputs are not identified, describe your operating processes and materials used"
            }
            Field::EnvironmentalSystem => {
                "Does the company have an environmental management system in place?"
            }
            Field::AttachedDocuments => "Attach documentation (PDF, Word, Excel, images)",
            Field::Consent => "I accept the processing of my personal data",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::OrganizationKind => FieldKind::OrganizationKind,
            Field::IdType => FieldKind::IdType,
            Field::Consent => FieldKind::Flag,
            Field::EnvironmentalSystem | Field::AttachedDocuments => FieldKind::Auxiliary,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.key() == s)
            .ok_or_else(|| StoreError::UnknownField(s.to_string()))
    }
}

/// Whether the respondent is a legal entity or a natural person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrganizationKind {
    #[default]
    #[serde(rename = "JURIDICA")]
    LegalEntity,
    #[serde(rename = "NATURAL")]
    NaturalPerson,
}

impl OrganizationKind {
    pub fn wire(&self) -> &'static str {
        match self {
            OrganizationKind::LegalEntity => "JURIDICA",
            OrganizationKind::NaturalPerson => "NATURAL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrganizationKind::LegalEntity => "Legal entity",
            OrganizationKind::NaturalPerson => "Natural person",
        }
    }

    pub fn variants() -> &'static [OrganizationKind] {
        &[OrganizationKind::LegalEntity, OrganizationKind::NaturalPerson]
    }
}

impl FromStr for OrganizationKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrganizationKind::variants()
            .iter()
            .copied()
            .find(|kind| kind.wire() == s)
            .ok_or_else(|| StoreError::UnknownChoice {
                field: Field::OrganizationKind,
                value: s.to_string(),
            })
    }
}

/// Identification document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdType {
    #[default]
    Nit,
    Cc,
    Ce,
    Pasaporte,
}

impl IdType {
    pub fn wire(&self) -> &'static str {
        match self {
            IdType::Nit => "NIT",
            IdType::Cc => "CC",
            IdType::Ce => "CE",
            IdType::Pasaporte => "PASAPORTE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IdType::Nit => "NIT",
            IdType::Cc => "Citizen ID card",
            IdType::Ce => "Foreigner ID card",
            IdType::Pasaporte => "Passport",
        }
    }

    pub fn variants() -> &'static [IdType] {
        &[IdType::Nit, IdType::Cc, IdType::Ce, IdType::Pasaporte]
    }
}

impl FromStr for IdType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdType::variants()
            .iter()
            .copied()
            .find(|id| id.wire() == s)
            .ok_or_else(|| StoreError::UnknownChoice {
                field: Field::IdType,
                value: s.to_string(),
            })
    }
}

/// Answer to the environmental-management-system question.
///
/// `Unset` is the initial state and never a valid final answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvironmentalSystem {
    Yes,
    No,
    #[default]
    Unset,
}

impl EnvironmentalSystem {
    pub fn label(&self) -> &'static str {
        match self {
            EnvironmentalSystem::Yes => "Yes",
            EnvironmentalSystem::No => "No",
            EnvironmentalSystem::Unset => "Not answered",
        }
    }
}

/// A value written into the [`FieldStore`](crate::FieldStore).
///
/// JSON numbers read as text, so `"numTrabajadores": 12` and `"12"` are
/// the same answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    OrganizationKind(OrganizationKind),
    IdType(IdType),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireValue {
    Flag(bool),
    OrganizationKind(OrganizationKind),
    IdType(IdType),
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        WireValue::deserialize(deserializer).map(FieldValue::from)
    }
}

impl From<WireValue> for FieldValue {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Flag(flag) => FieldValue::Flag(flag),
            WireValue::OrganizationKind(kind) => FieldValue::OrganizationKind(kind),
            WireValue::IdType(id) => FieldValue::IdType(id),
            WireValue::Number(number) => FieldValue::Text(number.to_string()),
            WireValue::Text(text) => FieldValue::Text(text),
        }
    }
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Flag(_) => FieldKind::Flag,
            FieldValue::OrganizationKind(_) => FieldKind::OrganizationKind,
            FieldValue::IdType(_) => FieldKind::IdType,
        }
    }

    /// Convert the value into the storage kind of `field`.
    ///
    /// Values arrive untagged from replay scripts, so a text answer that
    /// happens to spell a choice (`"NIT"`) parses as that choice. Choices
    /// and text convert into each other through their wire names; flags
    /// never convert.
    pub fn coerce_for(self, field: Field) -> Result<FieldValue, StoreError> {
        let expected = field.kind();
        let mismatch = |value: &FieldValue| StoreError::TypeMismatch {
            field,
            expected,
            found: value.kind(),
        };

        match (expected, self) {
            (FieldKind::Auxiliary, _) => Err(StoreError::AuxiliaryField(field)),
            (FieldKind::Text, FieldValue::Text(text)) => Ok(FieldValue::Text(text)),
            (FieldKind::Text, FieldValue::OrganizationKind(kind)) => {
                Ok(FieldValue::Text(kind.wire().to_string()))
            }
            (FieldKind::Text, FieldValue::IdType(id)) => Ok(FieldValue::Text(id.wire().to_string())),
            (FieldKind::Flag, FieldValue::Flag(flag)) => Ok(FieldValue::Flag(flag)),
            (FieldKind::OrganizationKind, FieldValue::OrganizationKind(kind)) => {
                Ok(FieldValue::OrganizationKind(kind))
            }
            (FieldKind::OrganizationKind, FieldValue::Text(text)) => {
                Ok(FieldValue::OrganizationKind(text.parse()?))
            }
            (FieldKind::IdType, FieldValue::IdType(id)) => Ok(FieldValue::IdType(id)),
            (FieldKind::IdType, FieldValue::Text(text)) => Ok(FieldValue::IdType(text.parse()?)),
            (_, other) => Err(mismatch(&other)),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<OrganizationKind> for FieldValue {
    fn from(value: OrganizationKind) -> Self {
        FieldValue::OrganizationKind(value)
    }
}

impl From<IdType> for FieldValue {
    fn from(value: IdType) -> Self {
        FieldValue::IdType(value)
    }
}
