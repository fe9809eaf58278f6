//! Controlled field kinds
//!
//! Every field binds a form value through a [`FieldController`] and keeps its
//! presentation settings in a [`PropertyBag`]. Value changes go through the
//! change pipeline so the form's hooks run around them.

mod checkfield;
mod eye_button;
mod numberfield;
mod radiofield;
mod textfield;

pub use checkfield::{Checkfield, CheckfieldPatch, CheckfieldSettings};
pub use eye_button::{EyeButton, EyeButtonPatch, EyeButtonSettings};
pub use numberfield::{Numberfield, NumberfieldPatch, NumberfieldSettings};
pub use radiofield::{RadioGroup, Radiofield, RadiofieldPatch, RadiofieldSettings};
pub use textfield::{Textfield, TextfieldPatch, TextfieldSettings};

use crate::pipeline::FieldController;
use crate::props::{PropertyBag, Settings};
use crate::state::{FieldState, FieldValue};
use tokio::sync::watch;

/// Line shown under a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelperLine {
    Error(String),
    Helper(String),
}

impl HelperLine {
    /// Error message when the field is invalid, otherwise the helper text
    pub fn resolve(state: &FieldState, helper_text: Option<&str>) -> Option<Self> {
        if let Some(message) = state.error_message() {
            return Some(HelperLine::Error(message.to_string()));
        }
        helper_text
            .filter(|text| !text.is_empty())
            .map(|text| HelperLine::Helper(text.to_string()))
    }

    pub fn text(&self) -> &str {
        match self {
            HelperLine::Error(s) | HelperLine::Helper(s) => s,
        }
    }
}

/// Common operations of controlled fields
///
/// This is the handle a consumer keeps to read or override a field's
/// settings after it was created.
pub trait Field {
    type Settings: Settings;

    fn controller(&self) -> &FieldController;
    fn props(&self) -> &PropertyBag<Self::Settings>;

    fn name(&self) -> &str {
        self.controller().name()
    }

    fn value(&self) -> FieldValue {
        self.controller().value()
    }

    fn field_state(&self) -> FieldState {
        self.controller().field_state()
    }

    fn settings(&self) -> Self::Settings {
        self.props().get()
    }

    fn update(&self, patch: <Self::Settings as Settings>::Patch) -> bool {
        self.props().update(patch)
    }

    fn subscribe(&self) -> watch::Receiver<Self::Settings> {
        self.props().subscribe()
    }
}

/// Implement [`Field`] for a struct with `controller` and `props` members
macro_rules! impl_field {
    ($field:ty, $settings:ty) => {
        impl $crate::fields::Field for $field {
            type Settings = $settings;

            fn controller(&self) -> &$crate::pipeline::FieldController {
                &self.controller
            }

            fn props(&self) -> &$crate::props::PropertyBag<$settings> {
                &self.props
            }
        }
    };
}

pub(crate) use impl_field;
