//! Presentation settings of fields and the observable bag holding them

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    #[default]
    Medium,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Default,
    Primary,
    Secondary,
    Error,
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPlacement {
    Bottom,
    #[default]
    End,
    Start,
    Top,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Outlined,
    Filled,
    Standard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
}

/// Label shown on a field when none is configured
pub const DEFAULT_LABEL: &str = "Nuova label";

/// A settings struct paired with a partial update of itself
pub trait Settings: Clone + PartialEq + Send + Sync + 'static {
    type Patch: Default;

    /// Overwrite every field set in `patch`
    fn apply(&mut self, patch: Self::Patch);
}

/// Declare a settings struct together with its patch type
///
/// Every field of the patch is an `Option`; `None` leaves the setting as is.
macro_rules! settings {
    (
        $(#[$meta:meta])*
        pub struct $name:ident / $patch:ident {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty = $default:expr, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self { $( $field: $default, )* }
            }
        }

        #[doc = concat!("Partial update of [`", stringify!($name), "`]")]
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $patch {
            $( pub $field: Option<$ty>, )*
        }

        impl $crate::props::Settings for $name {
            type Patch = $patch;

            fn apply(&mut self, patch: $patch) {
                $(
                    if let Some(value) = patch.$field {
                        self.$field = value;
                    }
                )*
            }
        }
    };
}

pub(crate) use settings;

/// Observable holder of a field's settings
///
/// Last write wins. Observers get the new settings after every update that
/// changes something.
#[derive(Debug)]
pub struct PropertyBag<S: Settings> {
    tx: watch::Sender<S>,
}

impl<S: Settings> PropertyBag<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Current settings
    pub fn get(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Read one setting without cloning the rest
    pub fn read<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.tx.borrow())
    }

    /// Apply a partial update, returning whether anything changed
    pub fn update(&self, patch: S::Patch) -> bool {
        self.tx.send_if_modified(|settings| {
            let before = settings.clone();
            settings.apply(patch);
            *settings != before
        })
    }

    /// Replace all settings
    pub fn set(&self, settings: S) {
        self.tx.send_if_modified(|current| {
            if *current == settings {
                return false;
            }
            *current = settings;
            true
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }
}

impl<S: Settings + Default> Default for PropertyBag<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    settings! {
        pub struct Demo / DemoPatch {
            pub label: String = DEFAULT_LABEL.to_string(),
            pub size: Size = Size::Small,
            pub disabled: bool = false,
        }
    }

    #[test]
    fn test_defaults() {
        let demo = Demo::default();
        assert_eq!(demo.label, "Nuova label");
        assert_eq!(demo.size, Size::Small);
        assert!(!demo.disabled);
    }

    #[test]
    fn test_patch_only_touches_set_fields() {
        let bag = PropertyBag::new(Demo::default());
        let changed = bag.update(DemoPatch {
            disabled: Some(true),
            ..Default::default()
        });
        assert!(changed);

        let demo = bag.get();
        assert!(demo.disabled);
        assert_eq!(demo.label, "Nuova label");
        assert_eq!(demo.size, Size::Small);
    }

    #[test]
    fn test_noop_patch_does_not_notify() {
        let bag = PropertyBag::new(Demo::default());
        let mut rx = bag.subscribe();
        rx.borrow_and_update();

        assert!(!bag.update(DemoPatch::default()));
        assert!(!rx.has_changed().unwrap());

        assert!(bag.update(DemoPatch {
            size: Some(Size::Medium),
            ..Default::default()
        }));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().size, Size::Medium);
    }

    #[test]
    fn test_settings_deserialize_with_missing_keys() {
        let demo: Demo = serde_json::from_str(r#"{"size":"medium"}"#).unwrap();
        assert_eq!(demo.size, Size::Medium);
        assert_eq!(demo.label, "Nuova label");
    }

    #[test]
    fn test_set_replaces_everything() {
        let bag = PropertyBag::<Demo>::default();
        bag.set(Demo {
            label: "Name".to_string(),
            size: Size::Medium,
            disabled: true,
        });
        assert_eq!(bag.read(|d| d.label.clone()), "Name");
    }
}
