//! Numeric field with locale-aware separators

use super::{impl_field, Field, HelperLine};
use crate::error::FormError;
use crate::format::{format_number, parse_string_to_number, Language};
use crate::pipeline::FieldController;
use crate::props::{settings, PropertyBag, Size, Variant, DEFAULT_LABEL};
use crate::state::{FieldValue, FormContext};

settings! {
    pub struct NumberfieldSettings / NumberfieldPatch {
        pub size: Size = Size::Small,
        pub shrink: bool = false,
        pub label: String = DEFAULT_LABEL.to_string(),
        pub helper_text: Option<String> = None,
        pub start_adornment: Option<String> = None,
        pub end_adornment: Option<String> = None,
        pub required: bool = false,
        pub disabled: bool = false,
        pub sx: serde_json::Value = serde_json::Value::Object(Default::default()),
        pub full_width: bool = true,
        pub variant: Variant = Variant::Outlined,
        pub allow_negative: bool = false,
        /// Maximum number of decimals kept from the input
        pub decimal_scale: u32 = 0,
        /// Always show `decimal_scale` decimals
        pub fixed_decimal_scale: bool = false,
    }
}

#[derive(Debug)]
pub struct Numberfield {
    controller: FieldController,
    props: PropertyBag<NumberfieldSettings>,
}

impl_field!(Numberfield, NumberfieldSettings);

impl Numberfield {
    pub fn new(form: &FormContext, name: &str, settings: NumberfieldSettings) -> Self {
        Self {
            controller: FieldController::new(form, name, FieldValue::Null),
            props: PropertyBag::new(settings),
        }
    }

    pub fn language(&self) -> Language {
        self.controller.form().language()
    }

    /// Parse the raw input and commit it; empty or malformed input commits null
    pub async fn input(&self, raw: &str) -> Result<(), FormError> {
        let settings = self.settings();
        if settings.disabled {
            tracing::trace!(field = %self.name(), "ignoring input on disabled numberfield");
            return Ok(());
        }
        let value = normalize(raw, self.language(), &settings);
        self.controller.submit_change(FieldValue::from(value)).await
    }

    /// Number shown in the input, with the form language separators
    pub fn display_value(&self) -> String {
        let Some(number) = self.value().as_number() else {
            return String::new();
        };
        let (scale, fixed) = self.props.read(|s| (s.decimal_scale, s.fixed_decimal_scale));
        let language = self.language();
        let formatted = format_number(number, language, scale);
        if fixed || scale == 0 {
            return formatted;
        }
        formatted
            .trim_end_matches('0')
            .trim_end_matches(language.decimal_separator())
            .to_string()
    }

    pub fn helper_line(&self) -> Option<HelperLine> {
        let helper_text = self.props.read(|s| s.helper_text.clone());
        HelperLine::resolve(&self.field_state(), helper_text.as_deref())
    }
}

fn normalize(raw: &str, language: Language, settings: &NumberfieldSettings) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    let mut number = parse_string_to_number(raw, language)?;
    if !settings.allow_negative {
        number = number.abs();
    }
    Some(truncate(number, settings.decimal_scale))
}

/// Drop decimals beyond `scale` without rounding
fn truncate(number: f64, scale: u32) -> f64 {
    let text = number.to_string();
    match text.split_once('.') {
        Some((int, frac)) if frac.len() > scale as usize => {
            let kept = &frac[..scale as usize];
            let cut = if kept.is_empty() {
                int.to_string()
            } else {
                format!("{int}.{kept}")
            };
            cut.parse().unwrap_or(number)
        }
        _ => number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form(language: Language) -> FormContext {
        FormContext::builder()
            .field("amount", FieldValue::Null)
            .language(language)
            .build()
    }

    fn scaled(scale: u32) -> NumberfieldSettings {
        NumberfieldSettings {
            decimal_scale: scale,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_input_parses_with_form_language() {
        let form = form(Language::It);
        let field = Numberfield::new(&form, "amount", scaled(2));

        field.input("1.234,56").await.unwrap();
        assert_eq!(form.value("amount"), Some(FieldValue::Number(1234.56)));
        assert_eq!(field.display_value(), "1.234,56");
    }

    #[tokio::test]
    async fn test_english_separators() {
        let form = form(Language::En);
        let field = Numberfield::new(&form, "amount", scaled(2));

        field.input("1,234.5").await.unwrap();
        assert_eq!(field.value(), FieldValue::Number(1234.5));
        assert_eq!(field.display_value(), "1,234.5");

        field.update(NumberfieldPatch {
            fixed_decimal_scale: Some(true),
            ..Default::default()
        });
        assert_eq!(field.display_value(), "1,234.50");
    }

    #[tokio::test]
    async fn test_empty_and_malformed_input_commit_null() {
        let form = form(Language::En);
        let field = Numberfield::new(&form, "amount", NumberfieldSettings::default());

        field.input("12").await.unwrap();
        assert_eq!(field.value(), FieldValue::Number(12.0));

        field.input("").await.unwrap();
        assert_eq!(field.value(), FieldValue::Null);
        assert_eq!(field.display_value(), "");

        field.input("abc").await.unwrap();
        assert_eq!(field.value(), FieldValue::Null);
    }

    #[tokio::test]
    async fn test_scale_and_sign_are_enforced() {
        let form = form(Language::En);
        let field = Numberfield::new(&form, "amount", scaled(1));

        field.input("-3.99").await.unwrap();
        assert_eq!(field.value(), FieldValue::Number(3.9));

        field.update(NumberfieldPatch {
            allow_negative: Some(true),
            ..Default::default()
        });
        field.input("-3.99").await.unwrap();
        assert_eq!(field.value(), FieldValue::Number(-3.9));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate(1.15, 1), 1.1);
        assert_eq!(truncate(1.15, 2), 1.15);
        assert_eq!(truncate(9.99, 0), 9.0);
        assert_eq!(truncate(42.0, 3), 42.0);
        assert_eq!(truncate(-0.75, 1), -0.7);
    }
}
