//! "has value" presentation state for launcher inputs.

use std::collections::BTreeSet;

/// Class applied to an input whose trimmed value is non-empty.
pub const HAS_VALUE_CLASS: &str = "has-val";

/// Class tagging the inputs the toggler applies to.
pub const INPUT_CLASS: &str = "input100";

/// A form control the toggler can inspect and restyle.
pub trait FormControl {
    fn value(&self) -> &str;
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
}

/// Blur handler: mark the control when it holds a value, clear it otherwise.
pub fn on_blur<C: FormControl + ?Sized>(control: &mut C) {
    if control.value().trim().is_empty() {
        control.remove_class(HAS_VALUE_CLASS);
    } else {
        control.add_class(HAS_VALUE_CLASS);
    }
}

/// A rendered `<input>`: name, current value and class list.
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub name: &'static str,
    pub value: String,
    classes: BTreeSet<String>,
}

impl InputField {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        let mut classes = BTreeSet::new();
        classes.insert(INPUT_CLASS.to_string());
        Self {
            name,
            value: value.into(),
            classes,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Space-separated class attribute value.
    pub fn class_attr(&self) -> String {
        self.classes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FormControl for InputField {
    fn value(&self) -> &str {
        &self.value
    }

    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }
}
