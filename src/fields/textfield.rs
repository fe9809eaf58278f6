//! Free text field

use super::{impl_field, Field, HelperLine};
use crate::error::FormError;
use crate::pipeline::FieldController;
use crate::props::{settings, InputType, PropertyBag, Size, Variant, DEFAULT_LABEL};
use crate::state::{FieldValue, FormContext};

settings! {
    pub struct TextfieldSettings / TextfieldPatch {
        pub input_type: InputType = InputType::Text,
        pub size: Size = Size::Small,
        pub shrink: bool = false,
        pub label: String = DEFAULT_LABEL.to_string(),
        pub helper_text: Option<String> = None,
        pub start_adornment: Option<String> = None,
        pub end_adornment: Option<String> = None,
        pub required: bool = false,
        pub disabled: bool = false,
        pub sx: serde_json::Value = serde_json::Value::Object(Default::default()),
        pub is_upper_case: bool = false,
        pub full_width: bool = true,
        pub variant: Variant = Variant::Outlined,
    }
}

#[derive(Debug)]
pub struct Textfield {
    controller: FieldController,
    props: PropertyBag<TextfieldSettings>,
}

impl_field!(Textfield, TextfieldSettings);

impl Textfield {
    pub fn new(form: &FormContext, name: &str, settings: TextfieldSettings) -> Self {
        Self {
            controller: FieldController::new(form, name, String::new()),
            props: PropertyBag::new(settings),
        }
    }

    /// Commit the raw input text; ignored while disabled
    pub async fn input(&self, raw: &str) -> Result<(), FormError> {
        if self.props.read(|s| s.disabled) {
            tracing::trace!(field = %self.name(), "ignoring input on disabled textfield");
            return Ok(());
        }
        self.controller
            .submit_change(FieldValue::Text(raw.to_string()))
            .await
    }

    /// Text shown in the input
    pub fn display_value(&self) -> String {
        let value = self.value();
        let text = if value.is_truthy() {
            value.to_string()
        } else {
            String::new()
        };
        if self.props.read(|s| s.is_upper_case) {
            text.to_uppercase()
        } else {
            text
        }
    }

    pub fn helper_line(&self) -> Option<HelperLine> {
        let helper_text = self.props.read(|s| s.helper_text.clone());
        HelperLine::resolve(&self.field_state(), helper_text.as_deref())
    }
}
