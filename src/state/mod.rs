/// State management module
///
/// This module handles the widget's selection state:
/// - Shared data structures (data.rs)
/// - The Empty / Single / Multiple selection tag (widget.rs)
/// - The thumbnail store that owns the state and its rendered list (store.rs)

pub mod data;
pub mod store;
pub mod widget;

pub use data::{FileHandle, FileSource, ImageRecord};
pub use store::{ChangeListener, Thumbnail, ThumbnailStore};
pub use widget::WidgetState;
