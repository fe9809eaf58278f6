//! State management module

pub mod forms;

pub use forms::{FieldName, FieldState, FieldValue, FormBuilder, FormContext, FormValues};
