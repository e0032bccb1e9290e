//! Submission payload handed to the submission collaborator.

use serde::{Deserialize, Serialize};

use crate::field::EnvironmentalSystem;
use crate::store::{AnswerRecord, Snapshot};

/// Final answer to the environmental question as submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvironmentalAnswer {
    Yes,
    No,
}

/// Every answer plus the environmental answers, ready for transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub answers: AnswerRecord,
    pub environmental_management_system: EnvironmentalAnswer,
    /// `None` when nothing was attached; serialized as `null`.
    pub attached_document_names: Option<Vec<String>>,
}

impl SubmissionPayload {
    /// Assemble the payload from a snapshot.
    ///
    /// Only called after step-2 validation passed, so `Unset` cannot occur
    /// here; it still maps to NO.
    pub fn assemble(snapshot: &Snapshot<'_>) -> Self {
        let environmental = snapshot.environmental;
        let environmental_management_system = match environmental.system {
            EnvironmentalSystem::Yes => EnvironmentalAnswer::Yes,
            EnvironmentalSystem::No | EnvironmentalSystem::Unset => EnvironmentalAnswer::No,
        };
        let attached_document_names = if environmental.documents.is_empty() {
            None
        } else {
            Some(environmental.documents.clone())
        };

        Self {
            answers: snapshot.answers.clone(),
            environmental_management_system,
            attached_document_names,
        }
    }
}
