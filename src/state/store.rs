use iced::widget::image::Handle;

use super::data::ImageRecord;
use super::widget::WidgetState;
use crate::input::decoder::data_url_bytes;

/// Callback fired after every mutation of the store
pub type ChangeListener = Box<dyn FnMut() + Send>;

/// One rendered thumbnail
///
/// `index` is assigned from the current state on every render, so remove
/// buttons built from it always point at the right record.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub index: usize,
    pub name: String,
    /// Image handle built from the data URL (None if the payload is not base64)
    pub handle: Option<Handle>,
}

/// The ordered collection of accepted images and its rendered thumbnails.
///
/// The state and the thumbnail list are only ever replaced together, and
/// the change listener runs after both are updated.
pub struct ThumbnailStore {
    multiple: bool,
    state: WidgetState,
    thumbnails: Vec<Thumbnail>,
    listener: Option<ChangeListener>,
}

impl ThumbnailStore {
    pub fn new(multiple: bool) -> Self {
        ThumbnailStore {
            multiple,
            state: WidgetState::Empty,
            thumbnails: Vec::new(),
            listener: None,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    /// Whether the thumbnail list is shown (otherwise the upload prompt is)
    pub fn shows_thumbnails(&self) -> bool {
        !self.thumbnails.is_empty()
    }

    /// Replace the state with freshly decoded records
    pub fn set_all(&mut self, records: Vec<ImageRecord>) {
        let state = WidgetState::from_records(records, self.multiple);
        self.commit(state);
    }

    /// Force the store to a state, as given by the host
    pub fn replace(&mut self, state: WidgetState) {
        // Normalize to this store's mode
        let state = match state {
            WidgetState::Empty => WidgetState::Empty,
            WidgetState::Single(record) => WidgetState::from_records(vec![record], self.multiple),
            WidgetState::Multiple(records) => WidgetState::from_records(records, self.multiple),
        };
        self.commit(state);
    }

    /// Remove the thumbnail at `index`.
    ///
    /// Returns false (and changes nothing) if `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.state.len() {
            log::warn!("⚠️  Ignoring removal of thumbnail {} of {}", index, self.state.len());
            return false;
        }

        let state = match std::mem::take(&mut self.state) {
            WidgetState::Multiple(mut records) => {
                records.remove(index);
                WidgetState::from_records(records, true)
            }
            // A single image always collapses to empty
            WidgetState::Single(_) | WidgetState::Empty => WidgetState::Empty,
        };

        self.commit(state);
        true
    }

    /// Register the change listener, replacing any previous one
    pub fn subscribe(&mut self, listener: ChangeListener) {
        self.listener = Some(listener);
    }

    pub fn unsubscribe(&mut self) {
        self.listener = None;
    }

    pub fn is_subscribed(&self) -> bool {
        self.listener.is_some()
    }

    fn commit(&mut self, state: WidgetState) {
        self.state = state;
        self.render();

        if let Some(listener) = self.listener.as_mut() {
            listener();
        }
    }

    /// Rebuild every thumbnail from the current state, in order
    fn render(&mut self) {
        self.thumbnails = self
            .state
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| Thumbnail {
                index,
                name: record.name.clone(),
                handle: data_url_bytes(&record.data_url).map(Handle::from_bytes),
            })
            .collect();
    }
}

impl std::fmt::Debug for ThumbnailStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailStore")
            .field("multiple", &self.multiple)
            .field("state", &self.state)
            .field("subscribed", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn record(name: &str) -> ImageRecord {
        ImageRecord {
            name: name.to_string(),
            size: 3,
            mime_type: "image/png".to_string(),
            data_url: "data:image/png;base64,AQID".to_string(),
        }
    }

    fn counting_store(multiple: bool) -> (ThumbnailStore, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let mut store = ThumbnailStore::new(multiple);
        let counter = count.clone();
        store.subscribe(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        (store, count)
    }

    fn names(store: &ThumbnailStore) -> Vec<String> {
        store.thumbnails().iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_set_all_renders_in_order() {
        let (mut store, count) = counting_store(true);
        assert!(!store.shows_thumbnails());

        store.set_all(vec![record("a"), record("b"), record("c")]);

        assert_eq!(names(&store), ["a", "b", "c"]);
        assert!(store.shows_thumbnails());
        assert!(store.thumbnails().iter().all(|t| t.handle.is_some()));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_reindexes() {
        let (mut store, count) = counting_store(true);
        store.set_all(vec![record("a"), record("b"), record("c"), record("d")]);

        assert!(store.remove_at(1));

        assert_eq!(names(&store), ["a", "c", "d"]);
        let indices: Vec<usize> = store.thumbnails().iter().map(|t| t.index).collect();
        assert_eq!(indices, [0, 1, 2]);
        assert_eq!(
            store.state(),
            &WidgetState::Multiple(vec![record("a"), record("c"), record("d")])
        );

        // The button now at index 1 removes "c", not the stale "b" slot
        assert!(store.remove_at(1));
        assert_eq!(names(&store), ["a", "d"]);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_removing_last_empties() {
        let (mut store, _) = counting_store(true);
        store.set_all(vec![record("a")]);

        assert!(store.remove_at(0));

        assert_eq!(store.state(), &WidgetState::Empty);
        assert!(!store.shows_thumbnails());
    }

    #[test]
    fn test_single_collapses_to_empty() {
        let (mut store, count) = counting_store(false);
        store.set_all(vec![record("a")]);
        assert_eq!(store.state(), &WidgetState::Single(record("a")));

        assert!(store.remove_at(0));
        assert_eq!(store.state(), &WidgetState::Empty);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_out_of_range_removal_is_ignored() {
        let (mut store, count) = counting_store(true);
        store.set_all(vec![record("a"), record("b")]);

        assert!(!store.remove_at(2));

        assert_eq!(store.state().len(), 2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_replace_normalizes_mode() {
        let (mut store, _) = counting_store(true);
        store.replace(WidgetState::Single(record("a")));
        assert_eq!(store.state(), &WidgetState::Multiple(vec![record("a")]));

        store.replace(WidgetState::Empty);
        assert_eq!(store.state(), &WidgetState::Empty);
    }

    #[test]
    fn test_latest_subscription_wins() {
        let (mut store, first) = counting_store(true);
        let second = Arc::new(AtomicUsize::new(0));
        let counter = second.clone();
        store.subscribe(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        store.set_all(vec![record("a")]);
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        assert!(store.is_subscribed());
        store.unsubscribe();
        assert!(!store.is_subscribed());
        store.set_all(vec![record("b")]);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
