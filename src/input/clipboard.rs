/// System clipboard reader
///
/// Browsers expose a pasted bitmap as a file item named `image.png`. The
/// system clipboard hands out raw RGBA pixels instead, so they are encoded
/// to PNG here to get the same kind of item.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use tokio::task;

use super::paste::ClipboardItem;
use crate::state::FileHandle;

/// Name browsers give a pasted bitmap
const PASTED_IMAGE_NAME: &str = "image.png";

/// Read the clipboard without blocking the UI thread.
///
/// Clipboard failures are logged and yield an empty item list, since a
/// paste with nothing usable is simply ignored.
pub async fn read_clipboard() -> Vec<ClipboardItem> {
    task::spawn_blocking(read_clipboard_blocking)
        .await
        .unwrap_or_else(|e| {
            log::error!("❌ Clipboard task failed: {}", e);
            Vec::new()
        })
}

fn read_clipboard_blocking() -> Vec<ClipboardItem> {
    let mut clipboard = match arboard::Clipboard::new() {
        Ok(clipboard) => clipboard,
        Err(err) => {
            log::error!("❌ Failed to open clipboard: {}", err);
            return Vec::new();
        }
    };

    let mut items = Vec::new();

    match clipboard.get_image() {
        Ok(image) => {
            match encode_png(image.width as u32, image.height as u32, image.bytes.into_owned()) {
                Some(bytes) => items.push(ClipboardItem::File(FileHandle::from_bytes(
                    PASTED_IMAGE_NAME,
                    "image/png",
                    bytes,
                ))),
                None => log::warn!("⚠️  Clipboard image could not be encoded"),
            }
        }
        Err(err) => log::debug!("No image on clipboard: {}", err),
    }

    if let Ok(text) = clipboard.get_text() {
        items.push(ClipboardItem::Text(text));
    }

    items
}

/// Encode raw RGBA pixels as a PNG file
pub fn encode_png(width: u32, height: u32, rgba: Vec<u8>) -> Option<Vec<u8>> {
    let image = RgbaImage::from_raw(width, height, rgba)?;

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .ok()?;
    Some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png() {
        let rgba = vec![255u8; 2 * 3 * 4];
        let bytes = encode_png(2, 3, rgba).unwrap();

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 3));
    }

    #[test]
    fn test_encode_png_rejects_short_buffer() {
        assert_eq!(encode_png(4, 4, vec![0u8; 10]), None);
    }
}
