//! # Diagnostic
//!
//! The form-wizard core of the initial diagnostic questionnaire: two steps of
//! questions, validated before each transition, with fields that appear
//! depending on earlier answers and a georeference that can be picked by
//! clicking a map.
//!
//! ## Architecture
//!
//! ```text
//! Presentation layer / map widget
//!     │
//!     ▼ WizardEvent (field changed, map clicked, advance, back, submit)
//! WizardSession.dispatch()
//!     │
//!     ▼
//! WizardController.decide() ──► FieldStore.set() / GeoSelector.on_map_click()
//!     │                          │
//!     │                          ▼ Snapshot
//!     │                    validate_step()  visible_fields()
//!     │
//!     └─► Some(WizardCommand::Submit(payload)) ──► Submitter.submit()
//! ```
//!
//! ## Key Invariants
//!
//! 1. **Validation is pure** - a snapshot in, a fresh error map out
//! 2. **Visibility is derived** - never stored, recomputed from the snapshot
//! 3. **Map to text only** - clicks rewrite the georeference, typing never moves the marker
//! 4. **No partial submission** - a payload exists only after step 2 validates
//! 5. **Single writer** - every event is handled synchronously, one at a time
//!
//! ## Example
//!
//! ```
//! use diagnostic::{Field, WizardEvent, WizardSession, WizardState, SubmissionPayload};
//!
//! let mut sent = Vec::new();
//! let mut session = WizardSession::new(|payload: SubmissionPayload| sent.push(payload));
//!
//! let state = session.dispatch(&WizardEvent::Advance);
//! assert_eq!(state, WizardState::Identification);
//! assert!(session.view().errors.contains(Field::Email));
//!
//! session.dispatch(&WizardEvent::MapClicked { lat: 4.711, lng: -74.0721 });
//! assert_eq!(session.view().answers.georeference, "4.711000, -74.072100");
//! ```

mod error;
mod field;
mod geo;
mod machine;
mod payload;
mod session;
mod store;
mod validation;
mod visibility;
mod wizard;

// Testing utilities (feature-gated)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::StoreError;
pub use field::{EnvironmentalSystem, Field, FieldKind, FieldValue, IdType, OrganizationKind};
pub use geo::{GeoPoint, GeoSelector, MapViewport, DEFAULT_MAP_CENTER, DEFAULT_ZOOM};
pub use machine::Machine;
pub use payload::{EnvironmentalAnswer, SubmissionPayload};
pub use session::{Submitter, WizardSession};
pub use store::{AnswerRecord, EnvironmentalAnswers, FieldStore, FileSelection, Snapshot, Step};
pub use validation::{
    validate_identification, validate_operational, validate_step, ValidationErrors,
    MSG_ATTACH_DOCUMENT, MSG_CONSENT_REQUIRED, MSG_DESCRIBE_INPUTS_OUTPUTS,
    MSG_GEOREFERENCE_REQUIRED, MSG_INVALID_EMAIL, MSG_INVALID_NUMBER, MSG_REPRESENTATIVE_REQUIRED,
    MSG_REQUIRED, MSG_SELECT_OPTION,
};
pub use visibility::{fields_for_step, is_conditional, visible_fields};
pub use wizard::{WizardCommand, WizardController, WizardEvent, WizardState, WizardView};
