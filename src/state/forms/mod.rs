//! Form domain layer
//!
//! Field values, validation readouts and the shared form context the change
//! pipeline commits into.

mod field;
mod form_state;

pub use field::{FieldName, FieldState, FieldValue, FormValues};
pub use form_state::{FormBuilder, FormContext};
