/// Paste routing
///
/// There is one paste source (the application-wide shortcut) but many
/// widgets. Each widget registers under its element id, and at dispatch
/// time the registry asks every registered widget whether it currently
/// accepts a paste (focused and visible). At most one widget receives the
/// pasted image.

use std::collections::BTreeSet;

use crate::binding::ElementId;
use crate::state::FileHandle;

/// One entry read from the clipboard
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardItem {
    File(FileHandle),
    Text(String),
}

impl ClipboardItem {
    fn image_file(&self) -> Option<&FileHandle> {
        match self {
            ClipboardItem::File(file) if file.is_image() => Some(file),
            _ => None,
        }
    }
}

/// Checked at dispatch time for every registered widget
pub trait PasteGuard {
    fn accepts_paste(&self) -> bool;
}

/// Result of dispatching a paste
#[derive(Debug, Clone, PartialEq)]
pub enum PasteOutcome {
    /// Nobody took the paste; the platform default must run
    Ignored,
    /// `target` takes `file`; the platform default must be suppressed
    Handled { target: ElementId, file: FileHandle },
}

impl PasteOutcome {
    pub fn prevents_default(&self) -> bool {
        matches!(self, PasteOutcome::Handled { .. })
    }
}

/// Per-widget paste registrations, keyed by element id
#[derive(Debug, Default)]
pub struct PasteRegistry {
    targets: BTreeSet<ElementId>,
}

impl PasteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `id` was already registered
    pub fn register(&mut self, id: ElementId) -> bool {
        self.targets.insert(id)
    }

    pub fn unregister(&mut self, id: &ElementId) -> bool {
        self.targets.remove(id)
    }

    pub fn is_registered(&self, id: &ElementId) -> bool {
        self.targets.contains(id)
    }

    /// Route clipboard `items` to the widget that accepts them.
    ///
    /// Only the first image file among the items is used; the rest are
    /// ignored. `lookup` resolves an element id to its live guard.
    pub fn dispatch<'a, G, F>(&self, items: &[ClipboardItem], lookup: F) -> PasteOutcome
    where
        G: PasteGuard + 'a,
        F: Fn(&ElementId) -> Option<&'a G>,
    {
        let Some(target) = self
            .targets
            .iter()
            .find(|id| lookup(*id).is_some_and(|guard| guard.accepts_paste()))
        else {
            return PasteOutcome::Ignored;
        };

        match items.iter().find_map(ClipboardItem::image_file) {
            Some(file) => PasteOutcome::Handled {
                target: target.clone(),
                file: file.clone(),
            },
            None => PasteOutcome::Ignored,
        }
    }
}
