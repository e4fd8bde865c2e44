/// Value-binding protocol between widgets and the host application
///
/// The host discovers widgets in a `Scope`, initializes them, reads and
/// writes their values as JSON, subscribes to change notifications and
/// forwards messages to them. `InputBinding` is that capability set;
/// `ImageBinding` implements it for image inputs, and `BindingRegistry`
/// keeps bindings under unique qualified names.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::BindingError;
use crate::state::ChangeListener;

pub mod adapter;
pub mod registry;

pub use adapter::{ImageBinding, BINDING_NAME};
pub use registry::BindingRegistry;

/// Callback the host registers through `subscribe`
pub type ChangeCallback = ChangeListener;

/// Identity of a widget element within the host
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        ElementId(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        ElementId(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An element of the host's tree, as seen by discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    pub id: ElementId,
    pub classes: Vec<String>,
}

impl ElementRef {
    pub fn new(id: impl Into<ElementId>, classes: &[&str]) -> Self {
        ElementRef {
            id: id.into(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// A region of the host's tree that bindings search
#[derive(Debug, Clone, Default)]
pub struct Scope {
    elements: Vec<ElementRef>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: ElementRef) {
        self.elements.push(element);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementRef> {
        self.elements.iter()
    }
}

impl FromIterator<ElementRef> for Scope {
    fn from_iter<I: IntoIterator<Item = ElementRef>>(iter: I) -> Self {
        Scope {
            elements: iter.into_iter().collect(),
        }
    }
}

/// The capability set a host needs from an input binding.
///
/// Per element the host calls `initialize` first, then any number of
/// `get_value` / `set_value` / `receive_message`, `subscribe` once and
/// `unsubscribe` on teardown.
pub trait InputBinding {
    /// Every element of `scope` this binding handles
    fn find(&self, scope: &Scope) -> Vec<ElementId>;

    /// Wire up event handling; calling it again is a no-op
    fn initialize(&mut self, element: &ElementId) -> Result<(), BindingError>;

    /// Current value: `null`, one record, or an array of records
    fn get_value(&self, element: &ElementId) -> Result<Value, BindingError>;

    /// Force the element to `value`, bypassing validation and decoding
    fn set_value(&mut self, element: &ElementId, value: Value) -> Result<(), BindingError>;

    /// Register the change callback; replaces any earlier one
    fn subscribe(&mut self, element: &ElementId, callback: ChangeCallback) -> Result<(), BindingError>;

    fn unsubscribe(&mut self, element: &ElementId) -> Result<(), BindingError>;

    /// Handle a message from the host; only a `value` field is interpreted
    fn receive_message(&mut self, element: &ElementId, data: Value) -> Result<(), BindingError>;
}
