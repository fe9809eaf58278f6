//! Shared form state: committed values, validation readouts and hooks

use super::field::{FieldName, FieldState, FieldValue, FormValues};
use crate::error::FormError;
use crate::format::Language;
use crate::hooks::{ChangeHookPair, HookRegistry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Builder collecting default values and hooks before the form is shared
#[derive(Debug, Default)]
pub struct FormBuilder {
    defaults: FormValues,
    hooks: HookRegistry,
    language: Language,
}

impl FormBuilder {
    /// Register a field with its initial value
    pub fn field(mut self, name: &str, default: impl Into<FieldValue>) -> Self {
        self.defaults.insert(name.to_string(), default.into());
        self
    }

    pub fn hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn build(self) -> FormContext {
        let (values, _) = watch::channel(Arc::new(self.defaults));
        FormContext {
            inner: Arc::new(Inner {
                values,
                hooks: self.hooks,
                language: self.language,
                states: Mutex::new(HashMap::new()),
                locks: Mutex::new(HashMap::new()),
            }),
        }
    }
}

struct Inner {
    values: watch::Sender<Arc<FormValues>>,
    hooks: HookRegistry,
    language: Language,
    states: Mutex<HashMap<FieldName, FieldState>>,
    locks: Mutex<HashMap<FieldName, Arc<tokio::sync::Mutex<()>>>>,
}

/// Handle to the values of one form, shared by its fields and listeners
///
/// Values change only through the change pipeline. Every effective change is
/// published to subscribers as a new immutable snapshot of all values.
#[derive(Clone)]
pub struct FormContext {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FormContext {
    pub fn builder() -> FormBuilder {
        FormBuilder::default()
    }

    /// Register a field's initial value; an existing value is left untouched
    pub fn register(&self, name: &str, default: impl Into<FieldValue>) -> bool {
        let default = default.into();
        self.inner.values.send_if_modified(|values| {
            if values.contains_key(name) {
                return false;
            }
            Arc::make_mut(values).insert(name.to_string(), default);
            true
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.values.borrow().contains_key(name)
    }

    /// Current committed value of a field
    pub fn value(&self, name: &str) -> Option<FieldValue> {
        self.inner.values.borrow().get(name).cloned()
    }

    /// Snapshot of all committed values
    pub fn values(&self) -> Arc<FormValues> {
        self.inner.values.borrow().clone()
    }

    /// Receive a notification each time a committed value changes
    pub fn subscribe(&self) -> watch::Receiver<Arc<FormValues>> {
        self.inner.values.subscribe()
    }

    pub fn hooks(&self, name: &str) -> Option<&ChangeHookPair> {
        self.inner.hooks.get(name)
    }

    pub fn language(&self) -> Language {
        self.inner.language
    }

    /// Mark a field invalid with an optional message
    pub fn set_error(&self, name: &str, message: Option<&str>) {
        lock(&self.inner.states).insert(
            name.to_string(),
            FieldState {
                invalid: true,
                error: message.map(str::to_string),
            },
        );
    }

    pub fn clear_error(&self, name: &str) {
        lock(&self.inner.states).remove(name);
    }

    /// Validation readout of a field
    pub fn field_state(&self, name: &str) -> FieldState {
        lock(&self.inner.states)
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Write a value in one step, notifying subscribers if it differs
    pub(crate) fn commit(&self, name: &str, value: FieldValue) -> Result<(), FormError> {
        let mut known = false;
        self.inner.values.send_if_modified(|values| {
            match values.get(name) {
                None => return false,
                Some(current) => {
                    known = true;
                    if *current == value {
                        return false;
                    }
                }
            }
            Arc::make_mut(values).insert(name.to_string(), value);
            true
        });
        if known {
            Ok(())
        } else {
            Err(FormError::UnknownField(name.to_string()))
        }
    }

    /// Lock serializing change pipelines of one field
    pub(crate) fn field_lock(&self, name: &str) -> Arc<tokio::sync::Mutex<()>> {
        lock(&self.inner.locks)
            .entry(name.to_string())
            .or_default()
            .clone()
    }
}

impl std::fmt::Debug for FormContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormContext")
            .field("values", &*self.values())
            .field("hooks", &self.inner.hooks)
            .field("language", &self.inner.language)
            .finish()
    }
}
