use std::path::Path;

use anyhow::{Context, Result};

/// Decoded RGBA8 texture image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA rows, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Loads and decodes a PNG from disk. A failure here is fatal to
    /// startup; there is no fallback for an explicitly requested asset.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            width,
            height,
            pixels: image.into_raw(),
        })
    }

    /// The classic checkerboard used by the texture-mapping modes, built
    /// procedurally so the demo runs without an asset directory.
    pub fn checkerboard() -> Self {
        const CELLS: u32 = 8;
        const CELL_SIZE: u32 = 32;
        let side = CELLS * CELL_SIZE;
        let mut pixels = Vec::with_capacity((side * side * 4) as usize);
        for y in 0..side {
            for x in 0..side {
                let even = ((x / CELL_SIZE) + (y / CELL_SIZE)) % 2 == 0;
                let value = if even { 0xff } else { 0x00 };
                pixels.extend_from_slice(&[value, value, value, 0xff]);
            }
        }
        Self {
            width: side,
            height: side,
            pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn checkerboard_dimensions_and_corners() {
        let image = TextureImage::checkerboard();
        assert_eq!(image.width, 256);
        assert_eq!(image.height, 256);
        assert_eq!(image.pixels.len(), 256 * 256 * 4);
        // Top-left cell is white, the next cell over is black.
        assert_eq!(&image.pixels[0..4], &[0xff, 0xff, 0xff, 0xff]);
        let next_cell = (32 * 4) as usize;
        assert_eq!(&image.pixels[next_cell..next_cell + 4], &[0x00, 0x00, 0x00, 0xff]);
    }

    #[test]
    fn loading_a_missing_file_is_an_error() {
        let result = TextureImage::load("does/not/exist.png");
        assert!(result.is_err());
    }

    #[test]
    fn loading_garbage_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a png").unwrap();
        assert!(TextureImage::load(file.path()).is_err());
    }
}
