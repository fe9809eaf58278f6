//! Toggle button revealing or hiding the content of another field

use crate::props::{settings, PropertyBag};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

settings! {
    pub struct EyeButtonSettings / EyeButtonPatch {
        pub disabled: bool = false,
    }
}

type OnClick = Box<dyn Fn(bool) + Send + Sync>;

/// Visibility toggle; not bound to a form value
pub struct EyeButton {
    visible: AtomicBool,
    props: PropertyBag<EyeButtonSettings>,
    on_click: OnClick,
}

impl EyeButton {
    pub fn new(initial_visible: bool, settings: EyeButtonSettings) -> Self {
        Self {
            visible: AtomicBool::new(initial_visible),
            props: PropertyBag::new(settings),
            on_click: Box::new(|_| {}),
        }
    }

    /// Callback receiving the new visibility after each click
    pub fn on_click(mut self, f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_click = Box::new(f);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Flip visibility and notify the callback; does nothing while disabled
    pub fn click(&self) -> bool {
        if self.is_disabled() {
            return self.is_visible();
        }
        let visible = !self.visible.fetch_xor(true, Ordering::SeqCst);
        (self.on_click)(visible);
        visible
    }

    /// Icon name for the current state
    pub fn icon(&self) -> &'static str {
        if self.is_visible() {
            "visibility"
        } else {
            "visibility_off"
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.props.read(|s| s.disabled)
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.props.update(EyeButtonPatch {
            disabled: Some(disabled),
        });
    }

    pub fn props(&self) -> &PropertyBag<EyeButtonSettings> {
        &self.props
    }
}

impl Default for EyeButton {
    fn default() -> Self {
        Self::new(true, EyeButtonSettings::default())
    }
}

impl fmt::Debug for EyeButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EyeButton")
            .field("visible", &self.is_visible())
            .field("disabled", &self.is_disabled())
            .finish()
    }
}
