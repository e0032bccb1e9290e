//! Typed errors for misuse of the field store API.
//!
//! These are programming/input-shape errors raised when a caller writes a
//! value the store cannot hold. Validation failures are never errors: they
//! are reported through [`ValidationErrors`](crate::ValidationErrors).

use thiserror::Error;

use crate::field::{Field, FieldKind};

/// Errors raised by [`FieldStore::set`](crate::FieldStore::set) and by
/// parsing field keys or choice values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Key does not name a questionnaire field
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Value is not one of the field's options
    #[error("unknown option for {field}: {value}")]
    UnknownChoice { field: Field, value: String },

    /// Value kind does not match the field's storage kind
    #[error("field {field} holds {expected} values, got {found}")]
    TypeMismatch {
        field: Field,
        expected: FieldKind,
        found: FieldKind,
    },

    /// Field lives outside the answer record and has its own operation
    #[error("field {0} cannot be set directly")]
    AuxiliaryField(Field),
}
