/// File acquisition pipeline
///
/// This module handles:
/// - Drop/click/keyboard surface events (surface.rs)
/// - Paste routing between widgets (paste.rs) and clipboard reading (clipboard.rs)
/// - Validation of candidate files (validator.rs)
/// - Background decoding into data URLs (decoder.rs)

pub mod clipboard;
pub mod decoder;
pub mod paste;
pub mod surface;
pub mod validator;

pub use decoder::{decode, decode_batch, BatchCounter, BatchSeq};
pub use paste::{ClipboardItem, PasteGuard, PasteOutcome, PasteRegistry};
pub use surface::{DragState, InputSurface, SurfaceEffect, SurfaceEvent, SurfaceKey};
pub use validator::validate;
