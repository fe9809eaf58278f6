//! Controlled field update pipeline
//!
//! A change runs `before_change`, commits the value, then runs
//! `after_change`. A failing before hook prevents the commit; a failing after
//! hook is reported but the committed value stays.
//!
//! Changes of the same field are serialized: a second change waits until the
//! first one has finished its after hook, then reads the value the first one
//! committed as its old value. Fields without hooks commit immediately.

use crate::error::FormError;
use crate::hooks::ChangeEvent;
use crate::state::{FieldState, FieldValue, FormContext};

/// Binding between a field name and the form that owns its value
#[derive(Debug, Clone)]
pub struct FieldController {
    form: FormContext,
    name: String,
}

impl FieldController {
    /// Bind a field, registering `default` if the form does not know it yet
    pub fn new(form: &FormContext, name: &str, default: impl Into<FieldValue>) -> Self {
        form.register(name, default);
        Self {
            form: form.clone(),
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn form(&self) -> &FormContext {
        &self.form
    }

    /// Current committed value, `Null` if the field was never registered
    pub fn value(&self) -> FieldValue {
        self.form.value(&self.name).unwrap_or_default()
    }

    pub fn field_state(&self) -> FieldState {
        self.form.field_state(&self.name)
    }

    pub async fn submit_change(&self, new_value: FieldValue) -> Result<(), FormError> {
        submit_change(&self.form, &self.name, new_value).await
    }
}

/// Run the hooks of `name` around committing `new_value`
pub async fn submit_change(
    form: &FormContext,
    name: &str,
    new_value: FieldValue,
) -> Result<(), FormError> {
    let Some(hooks) = form.hooks(name) else {
        let old_value = form
            .value(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        tracing::debug!(field = %name, old = %old_value, new = %new_value, "commit");
        return form.commit(name, new_value);
    };

    let field_lock = form.field_lock(name);
    let _guard = field_lock.lock().await;

    let old_value = form
        .value(name)
        .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
    let event = ChangeEvent {
        old_value,
        new_value: new_value.clone(),
    };

    if let Some(before) = &hooks.before_change {
        if let Err(err) = before.run(event.clone()).await {
            tracing::warn!(field = %name, error = %err, "before-change hook rejected the change");
            return Err(FormError::BeforeHookRejected {
                field: name.to_string(),
                source: err.into(),
            });
        }
    }

    tracing::debug!(field = %name, old = %event.old_value, new = %new_value, "commit");
    form.commit(name, new_value)?;

    if let Some(after) = &hooks.after_change {
        if let Err(err) = after.run(event).await {
            tracing::warn!(field = %name, error = %err, "after-change hook failed");
            return Err(FormError::AfterHookRejected {
                field: name.to_string(),
                source: err.into(),
            });
        }
    }

    Ok(())
}
