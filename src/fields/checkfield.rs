//! Checkbox field bound to a boolean value

use super::{impl_field, Field, HelperLine};
use crate::error::FormError;
use crate::pipeline::FieldController;
use crate::props::{settings, Color, LabelPlacement, PropertyBag, Size, DEFAULT_LABEL};
use crate::state::{FieldValue, FormContext};

settings! {
    pub struct CheckfieldSettings / CheckfieldPatch {
        pub indeterminate_icon: Option<String> = None,
        pub checked_icon: Option<String> = None,
        pub icon: Option<String> = None,
        pub color: Color = Color::Primary,
        pub disabled: bool = false,
        pub required: bool = false,
        pub size: Size = Size::Medium,
        /// Style overrides handed to the presentation layer untouched
        pub sx: serde_json::Value = serde_json::Value::Object(Default::default()),
        pub label: String = DEFAULT_LABEL.to_string(),
        pub label_placement: LabelPlacement = LabelPlacement::End,
    }
}

#[derive(Debug)]
pub struct Checkfield {
    controller: FieldController,
    props: PropertyBag<CheckfieldSettings>,
}

impl_field!(Checkfield, CheckfieldSettings);

impl Checkfield {
    /// Bind `name`, registering `false` when the form has no value for it
    pub fn new(form: &FormContext, name: &str, settings: CheckfieldSettings) -> Self {
        Self {
            controller: FieldController::new(form, name, false),
            props: PropertyBag::new(settings),
        }
    }

    pub fn is_checked(&self) -> bool {
        self.value().is_truthy()
    }

    /// Apply a check/uncheck coming from the input; ignored while disabled
    pub async fn toggle(&self, checked: bool) -> Result<(), FormError> {
        if self.props.read(|s| s.disabled) {
            tracing::trace!(field = %self.name(), "ignoring input on disabled checkfield");
            return Ok(());
        }
        self.controller
            .submit_change(FieldValue::Bool(checked))
            .await
    }

    pub fn helper_line(&self) -> Option<HelperLine> {
        HelperLine::resolve(&self.field_state(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{hook_fn, HookRegistry};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_toggle_commits_bool() {
        let form = FormContext::builder().field("accept", false).build();
        let field = Checkfield::new(&form, "accept", CheckfieldSettings::default());
        assert!(!field.is_checked());

        field.toggle(true).await.unwrap();
        assert!(field.is_checked());
        assert_eq!(form.value("accept"), Some(FieldValue::Bool(true)));
    }

    #[tokio::test]
    async fn test_toggle_runs_hooks() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recorded = events.clone();
        let form = FormContext::builder()
            .field("accept", false)
            .hooks(HookRegistry::new().after_change(
                "accept",
                hook_fn(move |e| {
                    recorded.lock().unwrap().push(e);
                    async { Ok(()) }
                }),
            ))
            .build();
        let field = Checkfield::new(&form, "accept", CheckfieldSettings::default());

        field.toggle(true).await.unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].old_value, FieldValue::Bool(false));
        assert_eq!(events[0].new_value, FieldValue::Bool(true));
    }

    #[tokio::test]
    async fn test_disabled_ignores_input() {
        let form = FormContext::builder().build();
        let field = Checkfield::new(&form, "accept", CheckfieldSettings::default());
        field.update(CheckfieldPatch {
            disabled: Some(true),
            ..Default::default()
        });

        field.toggle(true).await.unwrap();
        assert!(!field.is_checked());
    }

    #[test]
    fn test_numeric_value_is_truthy() {
        let form = FormContext::builder().field("flag", 1).build();
        let field = Checkfield::new(&form, "flag", CheckfieldSettings::default());
        assert!(field.is_checked());
    }

    #[test]
    fn test_handle_overrides_settings() {
        let form = FormContext::builder().build();
        let field = Checkfield::new(&form, "accept", CheckfieldSettings::default());
        assert_eq!(field.settings().color, Color::Primary);
        assert_eq!(field.settings().label, "Nuova label");

        field.update(CheckfieldPatch {
            label: Some("Accept terms".to_string()),
            color: Some(Color::Secondary),
            ..Default::default()
        });

        let settings = field.settings();
        assert_eq!(settings.label, "Accept terms");
        assert_eq!(settings.color, Color::Secondary);
        assert_eq!(settings.size, Size::Medium);
    }

    #[test]
    fn test_helper_line_shows_validation_error() {
        let form = FormContext::builder().build();
        let field = Checkfield::new(&form, "accept", CheckfieldSettings::default());
        assert_eq!(field.helper_line(), None);

        form.set_error("accept", None);
        assert_eq!(field.helper_line(), Some(HelperLine::Error("Errore".to_string())));
    }
}
