//! Trait abstractions for change hooks and field listeners, enabling mocking in tests

use crate::state::{FieldValue, FormValues};
use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Values passed to a change hook
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub old_value: FieldValue,
    pub new_value: FieldValue,
}

/// Hook invoked around a field commit
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangeHook: Send + Sync {
    /// Run the hook; an error is reported to the caller of the change
    async fn run(&self, event: ChangeEvent) -> Result<()>;
}

/// Callback invoked by a mounted listener when a watched field changes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FieldListener: Send + Sync {
    /// Receives the new value of the field and every value of the form
    async fn on_change(&self, value: FieldValue, values: Arc<FormValues>) -> Result<()>;
}

/// Adapter turning an async closure into a [`ChangeHook`]
pub struct HookFn<F>(F);

#[async_trait]
impl<F, Fut> ChangeHook for HookFn<F>
where
    F: Fn(ChangeEvent) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn run(&self, event: ChangeEvent) -> Result<()> {
        (self.0)(event).await
    }
}

/// Wrap an async closure as a shareable change hook
pub fn hook_fn<F, Fut>(f: F) -> Arc<dyn ChangeHook>
where
    F: Fn(ChangeEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Arc::new(HookFn(f))
}

/// Adapter turning an async closure into a [`FieldListener`]
pub struct ListenerFn<F>(F);

#[async_trait]
impl<F, Fut> FieldListener for ListenerFn<F>
where
    F: Fn(FieldValue, Arc<FormValues>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn on_change(&self, value: FieldValue, values: Arc<FormValues>) -> Result<()> {
        (self.0)(value, values).await
    }
}

/// Wrap an async closure as a shareable field listener
pub fn listener_fn<F, Fut>(f: F) -> Arc<dyn FieldListener>
where
    F: Fn(FieldValue, Arc<FormValues>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Arc::new(ListenerFn(f))
}
