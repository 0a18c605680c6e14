//! Retained scene elements.

use std::collections::BTreeMap;
use std::fmt;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Group,
    Path,
    Rect,
    Line,
    Circle,
    Text,
}


impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Group => "g",
            Self::Path => "path",
            Self::Rect => "rect",
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Text => "text",
        }
    }
}


impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


/// Timing of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    pub duration_ms: u32,
    pub delay_ms: u32,
}


impl Transition {
    pub fn new(duration_ms: u32) -> Self {
        Self { duration_ms, delay_ms: 0 }
    }

    pub fn delayed(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}


/// An attribute animating from one value to another.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub attr: String,
    pub from: String,
    pub to: String,
    pub timing: Transition,
}


impl Animation {
    pub fn new(attr: &str, from: impl ToString, to: impl ToString, timing: Transition) -> Self {
        Self {
            attr: attr.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            timing,
        }
    }
}


/// A keyed scene element.
///
/// `enter` animations only play when the element is created; on later
/// updates the reconciler replaces `animations` with attribute transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub key: String,
    pub tag: Tag,
    pub attrs: BTreeMap<String, String>,
    pub text: Option<String>,
    pub animations: Vec<Animation>,
    pub enter: Vec<Animation>,
}


impl Element {
    pub fn new(key: impl Into<String>, tag: Tag) -> Self {
        Self {
            key: key.into(),
            tag,
            attrs: BTreeMap::new(),
            text: None,
            animations: Vec::new(),
            enter: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Numeric attribute, rounded to two decimals.
    pub fn num(self, name: &str, value: f64) -> Self {
        self.attr(name, fmt_num(value))
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn on_enter(mut self, animation: Animation) -> Self {
        self.enter.push(animation);
        self
    }

    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}


/// Format a number for an attribute value.
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let text = format!("{rounded:.2}");
        text.trim_end_matches('0').to_string()
    }
}
