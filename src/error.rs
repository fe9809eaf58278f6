//! Error types for the field pipeline and the change listener

use thiserror::Error;

/// Boxed error produced by a consumer-supplied hook or callback
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by form operations
#[derive(Debug, Error)]
pub enum FormError {
    /// The field was never registered with a default value
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// The before-change hook failed, the value was not committed
    #[error("before-change hook rejected `{field}`")]
    BeforeHookRejected {
        field: String,
        #[source]
        source: HookError,
    },

    /// The after-change hook failed, the value stays committed
    #[error("after-change hook rejected `{field}`")]
    AfterHookRejected {
        field: String,
        #[source]
        source: HookError,
    },

    /// A listener callback failed and the rest of the round was skipped
    #[error("listener callback rejected `{field}`")]
    CallbackRejected {
        field: String,
        #[source]
        source: HookError,
    },
}

impl FormError {
    /// Name of the field the error refers to
    pub fn field(&self) -> &str {
        match self {
            FormError::UnknownField(field)
            | FormError::BeforeHookRejected { field, .. }
            | FormError::AfterHookRejected { field, .. }
            | FormError::CallbackRejected { field, .. } => field,
        }
    }

    /// True when the failure happened after the value was committed
    pub fn is_committed(&self) -> bool {
        matches!(self, FormError::AfterHookRejected { .. })
    }
}
