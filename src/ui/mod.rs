/// iced front-end of the image input
///
/// - `image_input.rs` - the widget element and its update loop
/// - `view.rs` - rendering of the surface, thumbnails and error
/// - `window.rs` - window-level drag/drop coalescing for hosts

pub mod image_input;
pub mod view;
pub mod window;

pub use image_input::{ErrorMessage, ImageInput, Message, MARKER_CLASS};
pub use window::WindowDrop;
