//! Radio option fields sharing one form value

use super::{impl_field, Field, HelperLine};
use crate::error::FormError;
use crate::pipeline::FieldController;
use crate::props::{settings, Color, LabelPlacement, PropertyBag, Size, DEFAULT_LABEL};
use crate::state::{FieldValue, FormContext};

settings! {
    pub struct RadiofieldSettings / RadiofieldPatch {
        pub checked_icon: Option<String> = None,
        pub icon: Option<String> = None,
        pub color: Color = Color::Default,
        pub disabled: bool = false,
        pub required: bool = false,
        pub size: Size = Size::Medium,
        pub sx: serde_json::Value = serde_json::Value::Object(Default::default()),
        pub label: String = DEFAULT_LABEL.to_string(),
        pub label_placement: LabelPlacement = LabelPlacement::End,
        /// Value committed when this option is selected
        pub value: FieldValue = FieldValue::Null,
        pub show_error_helper_text: bool = false,
    }
}

/// One option of a radio group
#[derive(Debug)]
pub struct Radiofield {
    controller: FieldController,
    props: PropertyBag<RadiofieldSettings>,
}

impl_field!(Radiofield, RadiofieldSettings);

impl Radiofield {
    pub fn new(form: &FormContext, name: &str, settings: RadiofieldSettings) -> Self {
        Self {
            controller: FieldController::new(form, name, FieldValue::Null),
            props: PropertyBag::new(settings),
        }
    }

    /// Option value of this radio
    pub fn option(&self) -> FieldValue {
        self.props.read(|s| s.value.clone())
    }

    pub fn is_selected(&self) -> bool {
        let current = self.value();
        self.props.read(|s| s.value == current)
    }

    /// Commit this option as the group's value; ignored while disabled
    pub async fn select(&self) -> Result<(), FormError> {
        let (disabled, option) = self.props.read(|s| (s.disabled, s.value.clone()));
        if disabled {
            tracing::trace!(field = %self.name(), "ignoring input on disabled radiofield");
            return Ok(());
        }
        self.controller.submit_change(option).await
    }

    /// Validation error, only on the option that shows the group's errors
    pub fn helper_line(&self) -> Option<HelperLine> {
        if !self.props.read(|s| s.show_error_helper_text) {
            return None;
        }
        HelperLine::resolve(&self.field_state(), None)
    }
}

/// Radios bound to the same field name
///
/// The first option carries the group's error helper text.
#[derive(Debug)]
pub struct RadioGroup {
    radios: Vec<Radiofield>,
}

impl RadioGroup {
    pub fn new(form: &FormContext, name: &str, options: Vec<RadiofieldSettings>) -> Self {
        let radios = options
            .into_iter()
            .enumerate()
            .map(|(i, mut settings)| {
                settings.show_error_helper_text = i == 0;
                Radiofield::new(form, name, settings)
            })
            .collect();
        Self { radios }
    }

    pub fn radios(&self) -> &[Radiofield] {
        &self.radios
    }

    pub fn get(&self, index: usize) -> Option<&Radiofield> {
        self.radios.get(index)
    }

    /// Index of the option matching the current value
    pub fn selected(&self) -> Option<usize> {
        self.radios.iter().position(Radiofield::is_selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn option(label: &str, value: &str) -> RadiofieldSettings {
        RadiofieldSettings {
            label: label.to_string(),
            value: FieldValue::from(value),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_select_commits_option_value() {
        let form = FormContext::builder().field("plan", "free").build();
        let group = RadioGroup::new(
            &form,
            "plan",
            vec![option("Free", "free"), option("Pro", "pro")],
        );
        assert_eq!(group.selected(), Some(0));

        group.get(1).unwrap().select().await.unwrap();

        assert_eq!(form.value("plan"), Some(FieldValue::from("pro")));
        assert_eq!(group.selected(), Some(1));
        assert!(!group.get(0).unwrap().is_selected());
    }

    #[tokio::test]
    async fn test_disabled_option_is_ignored() {
        let form = FormContext::builder().field("plan", "free").build();
        let mut settings = option("Pro", "pro");
        settings.disabled = true;
        let radio = Radiofield::new(&form, "plan", settings);

        radio.select().await.unwrap();
        assert_eq!(form.value("plan"), Some(FieldValue::from("free")));
    }

    #[test]
    fn test_only_first_option_shows_errors() {
        let form = FormContext::builder().build();
        let group = RadioGroup::new(&form, "plan", vec![option("A", "a"), option("B", "b")]);
        form.set_error("plan", Some("Pick one"));

        assert_eq!(
            group.get(0).unwrap().helper_line(),
            Some(HelperLine::Error("Pick one".to_string()))
        );
        assert_eq!(group.get(1).unwrap().helper_line(), None);
    }

    #[test]
    fn test_unselected_group_starts_null() {
        let form = FormContext::builder().build();
        let group = RadioGroup::new(&form, "plan", vec![option("A", "a")]);
        assert_eq!(form.value("plan"), Some(FieldValue::Null));
        assert_eq!(group.selected(), None);
        assert_eq!(group.radios().len(), 1);
    }

    #[test]
    fn test_option_can_be_changed_through_handle() {
        let form = FormContext::builder().field("plan", "b").build();
        let radio = Radiofield::new(&form, "plan", option("A", "a"));
        assert!(!radio.is_selected());

        radio.update(RadiofieldPatch {
            value: Some(FieldValue::from("b")),
            ..Default::default()
        });
        assert_eq!(radio.option(), FieldValue::from("b"));
        assert!(radio.is_selected());
    }
}
