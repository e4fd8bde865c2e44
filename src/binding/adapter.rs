use iced::Task;
use serde_json::Value;
use std::collections::BTreeMap;

use super::{ChangeCallback, ElementId, ElementRef, InputBinding, Scope};
use crate::config::ImageInputConfig;
use crate::error::BindingError;
use crate::input::{ClipboardItem, PasteOutcome, PasteRegistry};
use crate::ui::{ImageInput, Message, MARKER_CLASS};

/// Qualified name the image binding registers under
pub const BINDING_NAME: &str = "image_input.image_binding";

/// The image input binding.
///
/// Owns every mounted image input, keyed by element id, plus the paste
/// registrations of the initialized ones. Mount order is kept for
/// rendering and focus traversal.
#[derive(Debug, Default)]
pub struct ImageBinding {
    elements: BTreeMap<ElementId, ImageInput>,
    order: Vec<ElementId>,
    paste: PasteRegistry,
}

impl ImageBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an image input element from its config
    pub fn mount(&mut self, config: ImageInputConfig) -> Result<ElementId, BindingError> {
        let input = ImageInput::new(config);
        let id = input.id().clone();

        if self.elements.contains_key(&id) {
            return Err(BindingError::DuplicateElement(id));
        }

        self.order.push(id.clone());
        self.elements.insert(id.clone(), input);
        Ok(id)
    }

    /// Detach an element; its paste registration and subscription go with it
    pub fn unmount(&mut self, id: &ElementId) -> Result<ImageInput, BindingError> {
        let mut input = self
            .elements
            .remove(id)
            .ok_or_else(|| BindingError::UnknownElement(id.clone()))?;

        self.order.retain(|other| other != id);
        self.paste.unregister(id);
        input.unsubscribe();
        Ok(input)
    }

    /// The mounted elements as a discovery scope
    pub fn scope(&self) -> Scope {
        self.elements()
            .map(|input| ElementRef::new(input.id().clone(), &input.classes()))
            .collect()
    }

    pub fn element(&self, id: &ElementId) -> Option<&ImageInput> {
        self.elements.get(id)
    }

    /// Mounted elements in mount order
    pub fn elements(&self) -> impl Iterator<Item = &ImageInput> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    fn element_mut(&mut self, id: &ElementId) -> Result<&mut ImageInput, BindingError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| BindingError::UnknownElement(id.clone()))
    }

    /// Route a widget message to its element
    pub fn update(&mut self, id: &ElementId, message: Message) -> Task<Message> {
        if matches!(message, Message::SurfacePressed) {
            self.focus(id);
        }

        match self.elements.get_mut(id) {
            Some(input) => input.update(message),
            None => {
                log::warn!("⚠️  Message for unknown image input `{}`", id);
                Task::none()
            }
        }
    }

    /// Give `id` focus and take it from every other element
    pub fn focus(&mut self, id: &ElementId) {
        for (other, input) in self.elements.iter_mut() {
            input.set_focused(other == id);
        }
    }

    pub fn focused(&self) -> Option<&ElementId> {
        self.elements().find(|input| input.is_focused()).map(ImageInput::id)
    }

    /// Move focus to the next element with a visible surface
    pub fn focus_next(&mut self) -> Option<ElementId> {
        let candidates: Vec<ElementId> = self
            .elements()
            .filter(|input| input.surface_visible())
            .map(|input| input.id().clone())
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let next = match self.focused() {
            Some(current) => candidates
                .iter()
                .position(|id| id == current)
                .map(|i| (i + 1) % candidates.len())
                .unwrap_or(0),
            None => 0,
        };

        let id = candidates[next].clone();
        self.focus(&id);
        Some(id)
    }

    /// Element a window-level file drag should go to: the hovered one,
    /// then the focused one, then the first with a visible surface
    pub fn drag_target(&self) -> Option<ElementId> {
        self.elements()
            .find(|input| input.is_hovered() && input.surface_visible())
            .or_else(|| self.elements().find(|input| input.is_focused() && input.surface_visible()))
            .or_else(|| self.elements().find(|input| input.surface_visible()))
            .map(|input| input.id().clone())
    }

    /// Route a paste to the focused, visible element (if any)
    pub fn dispatch_paste(&self, items: &[ClipboardItem]) -> PasteOutcome {
        self.paste.dispatch(items, |id| self.elements.get(id))
    }
}

impl InputBinding for ImageBinding {
    fn find(&self, scope: &Scope) -> Vec<ElementId> {
        scope
            .iter()
            .filter(|element| element.has_class(MARKER_CLASS))
            .map(|element| element.id.clone())
            .collect()
    }

    fn initialize(&mut self, element: &ElementId) -> Result<(), BindingError> {
        if self.element_mut(element)?.initialize() {
            self.paste.register(element.clone());
        }
        Ok(())
    }

    fn get_value(&self, element: &ElementId) -> Result<Value, BindingError> {
        let input = self
            .element(element)
            .ok_or_else(|| BindingError::UnknownElement(element.clone()))?;
        Ok(input.state().to_value()?)
    }

    fn set_value(&mut self, element: &ElementId, value: Value) -> Result<(), BindingError> {
        self.element_mut(element)?
            .set_value(value)
            .map_err(|source| BindingError::InvalidValue {
                element: element.clone(),
                source,
            })
    }

    fn subscribe(&mut self, element: &ElementId, callback: ChangeCallback) -> Result<(), BindingError> {
        self.element_mut(element)?.subscribe(callback);
        Ok(())
    }

    fn unsubscribe(&mut self, element: &ElementId) -> Result<(), BindingError> {
        self.element_mut(element)?.unsubscribe();
        Ok(())
    }

    fn receive_message(&mut self, element: &ElementId, data: Value) -> Result<(), BindingError> {
        self.element_mut(element)?;

        match data.get("value") {
            Some(value) => self.set_value(element, value.clone()),
            None => Ok(()),
        }
    }
}
