use std::collections::{BTreeMap, BTreeSet};

use super::{ChangeCallback, ElementId, InputBinding, Scope};
use crate::error::BindingError;

struct Entry<B> {
    binding: B,
    bound: BTreeSet<ElementId>,
}

/// Bindings registered by the host, each under a unique qualified name
pub struct BindingRegistry<B: InputBinding> {
    entries: BTreeMap<String, Entry<B>>,
}

impl<B: InputBinding> Default for BindingRegistry<B> {
    fn default() -> Self {
        BindingRegistry {
            entries: BTreeMap::new(),
        }
    }
}

impl<B: InputBinding> BindingRegistry<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `binding` under `name`; names are unique
    pub fn register(&mut self, binding: B, name: impl Into<String>) -> Result<(), BindingError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(BindingError::DuplicateBinding(name));
        }

        log::info!("🔗 Registered input binding `{}`", name);
        self.entries.insert(
            name,
            Entry {
                binding,
                bound: BTreeSet::new(),
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&B> {
        self.entries.get(name).map(|entry| &entry.binding)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut B> {
        self.entries.get_mut(name).map(|entry| &mut entry.binding)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Elements currently bound through `name`
    pub fn bound(&self, name: &str) -> Vec<ElementId> {
        self.entries
            .get(name)
            .map(|entry| entry.bound.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Find, initialize and subscribe every element of `scope` each binding
    /// handles. Elements already bound are skipped. Returns how many were
    /// newly bound.
    pub fn bind_all(
        &mut self,
        scope: &Scope,
        mut make_callback: impl FnMut(&ElementId) -> ChangeCallback,
    ) -> Result<usize, BindingError> {
        let mut count = 0;

        for (name, entry) in self.entries.iter_mut() {
            for element in entry.binding.find(scope) {
                if entry.bound.contains(&element) {
                    continue;
                }

                entry.binding.initialize(&element)?;
                entry.binding.subscribe(&element, make_callback(&element))?;
                log::debug!("`{}` bound element `{}`", name, element);
                entry.bound.insert(element);
                count += 1;
            }
        }

        Ok(count)
    }

    /// Unsubscribe every element bound through any binding
    pub fn unbind_all(&mut self) {
        for (name, entry) in self.entries.iter_mut() {
            for element in std::mem::take(&mut entry.bound) {
                if let Err(err) = entry.binding.unsubscribe(&element) {
                    log::warn!("⚠️  `{}` failed to unbind `{}`: {}", name, element, err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{ElementRef, ImageBinding, BINDING_NAME};
    use crate::config::ImageInputConfig;
    use serde_json::json;
    use std::sync::mpsc;

    fn image_binding() -> ImageBinding {
        let mut binding = ImageBinding::new();
        binding.mount(ImageInputConfig::new("avatar")).unwrap();
        binding
            .mount(ImageInputConfig::new("gallery").multiple(true))
            .unwrap();
        binding
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = BindingRegistry::new();
        registry.register(image_binding(), BINDING_NAME).unwrap();

        let result = registry.register(ImageBinding::new(), BINDING_NAME);

        assert!(matches!(result, Err(BindingError::DuplicateBinding(name)) if name == BINDING_NAME));
        assert_eq!(registry.names().collect::<Vec<_>>(), [BINDING_NAME]);
    }

    #[test]
    fn test_bind_all_wires_callbacks() {
        let mut registry = BindingRegistry::new();
        let binding = image_binding();
        let mut scope = binding.scope();
        scope.push(ElementRef::new("title", &["text-input"]));
        registry.register(binding, BINDING_NAME).unwrap();

        let (tx, rx) = mpsc::channel();
        let bound = registry
            .bind_all(&scope, |id| {
                let tx = tx.clone();
                let id = id.clone();
                Box::new(move || {
                    let _ = tx.send(id.clone());
                })
            })
            .unwrap();
        assert_eq!(bound, 2);

        // A second pass binds nothing new
        assert_eq!(registry.bind_all(&scope, |_| Box::new(|| {})).unwrap(), 0);

        let binding = registry.get_mut(BINDING_NAME).unwrap();
        let gallery = ElementId::from("gallery");
        binding
            .set_value(
                &gallery,
                json!({"name": "a.png", "size": 1, "type": "image/png", "dataURL": "data:image/png;base64,AA=="}),
            )
            .unwrap();

        assert_eq!(rx.try_iter().collect::<Vec<_>>(), [gallery]);
        assert!(binding.element(&ElementId::from("avatar")).unwrap().is_initialized());
    }

    #[test]
    fn test_unbind_all_stops_notifications() {
        let mut registry = BindingRegistry::new();
        let binding = image_binding();
        let scope = binding.scope();
        registry.register(binding, BINDING_NAME).unwrap();

        let (tx, rx) = mpsc::channel();
        registry
            .bind_all(&scope, |_| {
                let tx = tx.clone();
                Box::new(move || {
                    let _ = tx.send(());
                })
            })
            .unwrap();
        registry.unbind_all();
        assert!(registry.bound(BINDING_NAME).is_empty());

        registry
            .get_mut(BINDING_NAME)
            .unwrap()
            .set_value(&ElementId::from("avatar"), serde_json::Value::Null)
            .unwrap();
        assert_eq!(rx.try_iter().count(), 0);
    }
}
