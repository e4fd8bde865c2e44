/// Window-level file drag tracking
///
/// The window reports one hover event per dragged file, a single
/// "hover left" event, and one drop event per file. This coalesces those
/// into one enter/leave pair and one dropped batch per gesture, addressed
/// to the widget that was targeted when the drag started.

use std::path::PathBuf;

use crate::binding::ElementId;

/// How long to wait for the rest of a multi-file drop
pub const DROP_COALESCE_MS: u64 = 50;

#[derive(Debug, Default)]
pub struct WindowDrop {
    hovering: bool,
    target: Option<ElementId>,
    pending: Vec<PathBuf>,
}

impl WindowDrop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// A file is hovering over the window.
    ///
    /// Returns the widget to send a drag-enter to, only for the first
    /// hover event of a gesture.
    pub fn hovered(&mut self, target: Option<ElementId>) -> Option<ElementId> {
        if self.hovering {
            return None;
        }
        self.hovering = true;
        self.target = target.clone();
        target
    }

    /// The drag left the window; returns the widget to send a drag-leave to
    pub fn left(&mut self) -> Option<ElementId> {
        if !self.hovering {
            return None;
        }
        self.hovering = false;
        self.target.take()
    }

    /// A file was dropped. Returns true for the first file of a batch, when
    /// the caller must schedule a `flush`.
    pub fn dropped(&mut self, path: PathBuf) -> bool {
        self.pending.push(path);
        self.pending.len() == 1
    }

    /// End the gesture, returning the target and every dropped path
    pub fn flush(&mut self) -> (Option<ElementId>, Vec<PathBuf>) {
        self.hovering = false;
        (self.target.take(), std::mem::take(&mut self.pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_enter_per_gesture() {
        let mut tracker = WindowDrop::new();
        let target = ElementId::from("gallery");

        assert_eq!(tracker.hovered(Some(target.clone())), Some(target.clone()));
        assert_eq!(tracker.hovered(Some(target.clone())), None);
        assert_eq!(tracker.hovered(Some(target.clone())), None);

        assert_eq!(tracker.left(), Some(target));
        assert_eq!(tracker.left(), None);
        assert!(!tracker.is_hovering());
    }

    #[test]
    fn test_drop_batches_paths() {
        let mut tracker = WindowDrop::new();
        let target = ElementId::from("gallery");
        tracker.hovered(Some(target.clone()));

        assert!(tracker.dropped(PathBuf::from("a.png")));
        assert!(!tracker.dropped(PathBuf::from("b.png")));

        let (flushed_target, paths) = tracker.flush();
        assert_eq!(flushed_target, Some(target));
        assert_eq!(paths, [PathBuf::from("a.png"), PathBuf::from("b.png")]);
        assert!(!tracker.is_hovering());

        // The next drop starts a new batch
        assert!(tracker.dropped(PathBuf::from("c.png")));
    }
}
