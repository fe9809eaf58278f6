//! Controlled form fields
//!
//! Fields bind a named value of a shared [`FormContext`] and change it through
//! an async pipeline: an optional `before_change` hook that can veto the
//! change, the commit, then an optional `after_change` hook. A [`Listener`]
//! watches a set of fields and calls one callback per field each time that
//! field's value moves.

pub mod config;
pub mod error;
pub mod fields;
pub mod format;
pub mod hooks;
pub mod listener;
pub mod pipeline;
pub mod props;
pub mod state;

pub use config::FieldsConfig;
pub use error::{FormError, HookError};
pub use format::{
    format_number, parse_number_to_string, parse_string_to_number, Language, MAX_FRACTION_DIGITS,
};
pub use hooks::{hook_fn, listener_fn, ChangeEvent, ChangeHook, FieldListener, HookRegistry, ListenerRegistry};
pub use listener::{DispatchPhase, Dispatcher, Listener};
pub use pipeline::{submit_change, FieldController};
pub use state::{FieldName, FieldState, FieldValue, FormBuilder, FormContext, FormValues};
