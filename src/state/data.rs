/// Shared data structures for the widget state
///
/// `FileHandle` is a candidate file coming from the surface (drop, picker
/// or paste). `ImageRecord` is a decoded image as it crosses the binding
/// boundary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A decoded image exposed to the host
///
/// The serialized field names (`name`, `size`, `type`, `dataURL`) are the
/// wire contract with the host and must not change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Filename only (e.g., "IMG_0001.jpg")
    pub name: String,
    /// Size of the original file in bytes
    pub size: u64,
    /// Declared media type (e.g., "image/jpeg")
    #[serde(rename = "type")]
    pub mime_type: String,
    /// The file contents as a `data:` URL
    #[serde(rename = "dataURL")]
    pub data_url: String,
}

/// Where the bytes of a candidate file live
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    /// A file on disk (dropped or picked)
    Path(PathBuf),
    /// An in-memory buffer (pasted from the clipboard)
    Memory(Arc<[u8]>),
}

/// A candidate file, before validation and decoding
#[derive(Debug, Clone, PartialEq)]
pub struct FileHandle {
    name: String,
    mime_type: String,
    source: FileSource,
}

impl FileHandle {
    /// Describe a file on disk.
    ///
    /// The media type is derived from the extension, the same way a browser
    /// fills `File.type`. Unknown extensions declare an empty type. Nothing
    /// touches the disk here; the decoder reads the file later.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        FileHandle {
            name,
            mime_type: mime_type_for_path(&path),
            source: FileSource::Path(path),
        }
    }

    /// Describe an in-memory file with an explicit media type
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        FileHandle {
            name: name.into(),
            mime_type: mime_type.into(),
            source: FileSource::Memory(bytes.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// True when the declared media type is an image type
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Media type for a path, from its extension
pub fn mime_type_for_path(path: &Path) -> String {
    // SVG isn't an `image` crate format but browsers still type it
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        return "image/svg+xml".to_string();
    }

    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(mime_type_for_path(Path::new("a/photo.JPG")), "image/jpeg");
        assert_eq!(mime_type_for_path(Path::new("shot.png")), "image/png");
        assert_eq!(mime_type_for_path(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(mime_type_for_path(Path::new("notes.txt")), "");
        assert_eq!(mime_type_for_path(Path::new("README")), "");
    }

    #[test]
    fn test_from_path() {
        let file = FileHandle::from_path("photos/cat.webp");
        assert_eq!(file.name(), "cat.webp");
        assert_eq!(file.mime_type(), "image/webp");
        assert_eq!(file.source(), &FileSource::Path(PathBuf::from("photos/cat.webp")));
        assert!(file.is_image());
    }

    #[test]
    fn test_missing_file_is_still_a_candidate() {
        let file = FileHandle::from_path("/nonexistent/dir/photo.png");
        assert_eq!(file.name(), "photo.png");
        assert!(file.is_image());
    }

    #[test]
    fn test_record_wire_field_names() {
        let record = ImageRecord {
            name: "a.png".to_string(),
            size: 3,
            mime_type: "image/png".to_string(),
            data_url: "data:image/png;base64,AAAA".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "a.png");
        assert_eq!(json["size"], 3);
        assert_eq!(json["type"], "image/png");
        assert_eq!(json["dataURL"], "data:image/png;base64,AAAA");
        assert_eq!(json.as_object().unwrap().len(), 4);
    }
}
