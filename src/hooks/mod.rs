//! Change hooks and listener callbacks supplied by the form consumer

mod registry;
mod traits;

pub use registry::{ChangeHookPair, HookRegistry, ListenerRegistry};
pub use traits::{hook_fn, listener_fn, ChangeEvent, ChangeHook, FieldListener, HookFn, ListenerFn};

#[cfg(test)]
pub use traits::{MockChangeHook, MockFieldListener};
