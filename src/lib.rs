/// Image input widget for iced applications
///
/// Users supply images by dropping files on the widget, clicking (or
/// pressing Enter/Space) to open the file picker, or pasting from the
/// clipboard. Accepted images are validated, decoded to data URLs off the
/// UI thread, shown as removable thumbnails, and exposed to the host as a
/// JSON value through the binding protocol.
///
/// - `state` - records, the selection tag and the thumbnail store
/// - `input` - surface events, paste routing, validation and decoding
/// - `binding` - the host-facing value protocol and binding registry
/// - `ui` - iced messages, update loop and rendering
/// - `config` - per-widget configuration
/// - `error` - error types

pub mod binding;
pub mod config;
pub mod error;
pub mod input;
pub mod state;
pub mod ui;
