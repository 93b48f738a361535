use std::path::{Path, PathBuf};

use image::{ImageError, RgbaImage};
use shared::error::{SpriteError, SpriteResult};
use tracing::debug;

/// Decoded image shown next to the tree; the source of color and coordinate
/// picks.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    location: PathBuf,
    pixels: RgbaImage,
}

impl PreviewImage {
    pub fn load(location: &Path) -> SpriteResult<Self> {
        let pixels = image::open(location)
            .map_err(|err| match err {
                ImageError::IoError(source) => SpriteError::io(location, source),
                other => SpriteError::Image(format!("{}: {other}", location.display())),
            })?
            .to_rgba8();
        debug!(
            path = %location.display(),
            width = pixels.width(),
            height = pixels.height(),
            "loaded preview image"
        );
        Ok(Self::from_pixels(location, pixels))
    }

    pub fn from_pixels(location: impl Into<PathBuf>, pixels: RgbaImage) -> Self {
        Self {
            location: location.into(),
            pixels,
        }
    }

    /// File name used when the image is referenced from a state's `uri`.
    pub fn uri(&self) -> String {
        self.location
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Color at `(x, y)` as uppercase `RRGGBB`; alpha is dropped.
    pub fn color_hex(&self, x: u32, y: u32) -> SpriteResult<String> {
        let (width, height) = self.pixels.dimensions();
        let Some(pixel) = self.pixels.get_pixel_checked(x, y) else {
            return Err(SpriteError::Image(format!(
                "pixel ({x}, {y}) is outside the {width}x{height} image"
            )));
        };
        let [r, g, b, _] = pixel.0;
        Ok(format!("{r:02X}{g:02X}{b:02X}"))
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    #[test]
    fn color_hex_is_uppercase_rgb() {
        let mut pixels = RgbaImage::new(2, 2);
        pixels.put_pixel(1, 0, Rgba([0xAB, 0x01, 0xFF, 0x10]));
        let preview = PreviewImage::from_pixels("sheet.png", pixels);

        assert_eq!(preview.color_hex(1, 0).expect("pixel"), "AB01FF");
        assert_eq!(preview.color_hex(0, 0).expect("pixel"), "000000");
        assert!(preview.color_hex(2, 0).is_err());
        assert_eq!(preview.uri(), "sheet.png");
    }

    #[test]
    fn missing_image_is_file_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = PreviewImage::load(&dir.path().join("absent.png")).expect_err("missing");
        assert!(matches!(err, SpriteError::FileNotFound { .. }));
    }
}
