use std::path::Path;

use ac_core::buffer::PixelBuffer;
use ac_core::traits::Decoder;
use anyhow::{Context, Result};

/// Décodeur d'images basé sur la crate `image`.
///
/// # Example
/// ```
/// use ac_source::ImageDecoder;
/// use ac_core::traits::Decoder;
/// let decoder = ImageDecoder;
/// assert!(decoder.decode(b"not an image").is_err());
/// ```
pub struct ImageDecoder;

impl Decoder for ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        let img = image::load_from_memory(bytes).context("Impossible de décoder l'image")?;
        Ok(to_buffer(&img))
    }
}

/// Charge une image depuis le disque.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
///
/// # Example
/// ```no_run
/// use ac_source::load_image;
/// use std::path::Path;
/// let buffer = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img =
        image::open(path).with_context(|| format!("Impossible de charger {}", path.display()))?;
    log::debug!(
        "Image chargée : {} ({}×{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(to_buffer(&img))
}

fn to_buffer(img: &image::DynamicImage) -> PixelBuffer {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer {
        data: rgba.into_raw(),
        width,
        height,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decode_roundtrips_png() {
        // PNG 2×1 encodé en mémoire, rouge puis vert opaque.
        let mut png = Vec::new();
        let img = image::RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 255, 0, 255])
            }
        });
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let buffer = ImageDecoder.decode(&png).unwrap();
        assert_eq!((buffer.width, buffer.height), (2, 1));
        assert_eq!(buffer.pixel(0, 0), (255, 0, 0, 255));
        assert_eq!(buffer.pixel(1, 0), (0, 255, 0, 255));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(ImageDecoder.decode(&[0u8; 16]).is_err());
    }
}
