use std::path::Path;

use image::DynamicImage;

use crate::error::LoadError;

/// Decode the image at `path`.
///
/// Missing files are reported as [`LoadError::NotFound`] before the decoder
/// is involved, so callers can tell "nothing there" from "not an image".
pub fn load_image(path: &Path) -> Result<DynamicImage, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    image::open(path).map_err(|source| LoadError::Decode { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");
        assert!(matches!(load_image(&path), Err(LoadError::NotFound(p)) if p == path));
    }

    #[test]
    fn garbage_file_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(load_image(&path), Err(LoadError::Decode { .. })));
    }

    #[test]
    fn png_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        image::RgbaImage::new(7, 3).save(&path).unwrap();
        let img = load_image(&path).unwrap();
        assert_eq!((img.width(), img.height()), (7, 3));
    }
}
