use crate::error::{InputError, TooMany};
use crate::state::FileHandle;

/// Gate a batch of candidate files.
///
/// Rules, in order:
/// 1. A single-image input rejects more than one candidate outright.
/// 2. Only files declaring an `image/*` media type are kept; none left is an error.
/// 3. A single-image input rejects more than one remaining image.
pub fn validate(candidates: Vec<FileHandle>, allow_multiple: bool) -> Result<Vec<FileHandle>, InputError> {
    if !allow_multiple && candidates.len() > 1 {
        return Err(InputError::TooManyFiles(TooMany::Candidates));
    }

    let images: Vec<FileHandle> = candidates.into_iter().filter(FileHandle::is_image).collect();

    if images.is_empty() {
        return Err(InputError::NoValidImages);
    }

    if !allow_multiple && images.len() > 1 {
        return Err(InputError::TooManyFiles(TooMany::Images));
    }

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str) -> FileHandle {
        FileHandle::from_bytes(name, mime, vec![1, 2, 3])
    }

    #[test]
    fn test_single_rejects_many_candidates() {
        let result = validate(vec![file("a.png", "image/png"), file("b.txt", "text/plain")], false);
        assert_eq!(result, Err(InputError::TooManyFiles(TooMany::Candidates)));
    }

    #[test]
    fn test_no_images() {
        let result = validate(vec![file("a.txt", "text/plain"), file("b", "")], true);
        assert_eq!(result, Err(InputError::NoValidImages));

        let result = validate(vec![file("a.pdf", "application/pdf")], false);
        assert_eq!(result, Err(InputError::NoValidImages));
    }

    #[test]
    fn test_multiple_filters_non_images() {
        let result = validate(
            vec![
                file("a.png", "image/png"),
                file("notes.txt", "text/plain"),
                file("b.jpg", "image/jpeg"),
            ],
            true,
        )
        .unwrap();

        let names: Vec<&str> = result.iter().map(FileHandle::name).collect();
        assert_eq!(names, ["a.png", "b.jpg"]);
    }

    #[test]
    fn test_single_accepts_one_image() {
        let result = validate(vec![file("a.gif", "image/gif")], false).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_media_type_prefix_is_exact() {
        // "imagefoo/x" is not an image type
        let result = validate(vec![file("a", "imagefoo/x")], true);
        assert_eq!(result, Err(InputError::NoValidImages));
    }
}
