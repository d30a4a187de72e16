use ac_core::buffer::PixelBuffer;
use ac_core::config::{AsciiConfig, ImageFilter};
use ac_core::error::CoreError;
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer};

use crate::quantize;

/// Facteur de compensation vertical : une cellule de caractère est plus
/// haute que large.
const CELL_ASPECT: f64 = 0.55;

/// Rayon du flou gaussien pour `ImageFilter::Blur` (équivalent ~0.75px).
const BLUR_SIGMA: f32 = 0.75;

/// Hauteur de grille cible pour une source `src_w × src_h` à `width` colonnes.
///
/// `floor(src_h × (width / src_w) × 0.55)`.
///
/// # Example
/// ```
/// use ac_pipeline::sampler::target_height;
/// assert_eq!(target_height(200, 110, 100), 30);
/// ```
#[must_use]
pub fn target_height(src_w: u32, src_h: u32, width: u32) -> u32 {
    (f64::from(src_h) * (f64::from(width) / f64::from(src_w)) * CELL_ASPECT).floor() as u32
}

/// Rééchantillonne `src` à la résolution de la grille de caractères.
///
/// Les ajustements globaux (contraste, puis la portion non-convolutive du
/// filtre nommé : blur/sepia/grayscale) sont appliqués sur la source avant
/// le resize. Le sharpen est une convolution post-resize et n'est pas
/// traité ici.
///
/// # Errors
/// Returns `CoreError::InvalidDimensions` for a zero-sized source or a
/// source so wide that the derived height is zero, and
/// `CoreError::Resample` if the resize backend fails.
pub fn resample(src: &PixelBuffer, config: &AsciiConfig) -> Result<PixelBuffer, CoreError> {
    if src.width == 0 || src.height == 0 {
        return Err(CoreError::InvalidDimensions {
            width: src.width,
            height: src.height,
        });
    }
    let height = target_height(src.width, src.height, config.width);
    if height == 0 {
        return Err(CoreError::InvalidDimensions {
            width: config.width,
            height,
        });
    }

    // Copie de travail : la source reste intacte.
    let mut adjusted = src.data.clone();
    apply_contrast(&mut adjusted, config.contrast);
    match config.filter {
        ImageFilter::Sepia => apply_sepia(&mut adjusted),
        ImageFilter::Grayscale => apply_grayscale(&mut adjusted),
        ImageFilter::Blur => adjusted = apply_blur(adjusted, src.width, src.height)?,
        ImageFilter::None | ImageFilter::Sharpen => {}
    }

    let mut dst = PixelBuffer::new(config.width, height);

    let src_image = Image::from_slice_u8(src.width, src.height, &mut adjusted, PixelType::U8x4)
        .map_err(|e| CoreError::Resample(e.to_string()))?;
    let mut dst_image = Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
        .map_err(|e| CoreError::Resample(e.to_string()))?;

    Resizer::new()
        .resize(&src_image, &mut dst_image, Some(&ResizeOptions::new()))
        .map_err(|e| CoreError::Resample(e.to_string()))?;

    Ok(dst)
}

/// Contraste en pourcentage, par canal : `(v − 128) × c + 128`, clampé.
/// Alpha inchangé.
fn apply_contrast(data: &mut [u8], contrast: f32) {
    let c = contrast / 100.0;
    if (c - 1.0).abs() < f32::EPSILON {
        return;
    }
    for px in data.chunks_exact_mut(4) {
        for v in &mut px[..3] {
            *v = ((f32::from(*v) - 128.0) * c + 128.0).clamp(0.0, 255.0) as u8;
        }
    }
}

/// Teinte sépia 100% — matrice classique.
fn apply_sepia(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let (r, g, b) = (f32::from(px[0]), f32::from(px[1]), f32::from(px[2]));
        px[0] = (0.393 * r + 0.769 * g + 0.189 * b).min(255.0) as u8;
        px[1] = (0.349 * r + 0.686 * g + 0.168 * b).min(255.0) as u8;
        px[2] = (0.272 * r + 0.534 * g + 0.131 * b).min(255.0) as u8;
    }
}

/// Désaturation 100% : luminance BT.601 répliquée sur les trois canaux,
/// cohérente avec le quantizer.
fn apply_grayscale(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let l = quantize::luminance(px[0], px[1], px[2]).round().min(255.0) as u8;
        px[0] = l;
        px[1] = l;
        px[2] = l;
    }
}

/// Flou gaussien σ = 0.75 via `image::imageops`.
fn apply_blur(data: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, CoreError> {
    let img = image::RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| CoreError::Resample("buffer RGBA incohérent".to_string()))?;
    Ok(image::imageops::blur(&img, BLUR_SIGMA).into_raw())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn target_height_matches_formula() {
        // floor(110 × (100/200) × 0.55) = floor(30.25) = 30
        assert_eq!(target_height(200, 110, 100), 30);
        assert_eq!(target_height(100, 100, 100), 55);
        assert_eq!(target_height(1, 1, 40), 22);
    }

    #[test]
    fn resample_produces_grid_resolution() {
        let src = PixelBuffer::filled(200, 110, (90, 90, 90, 255));
        let config = AsciiConfig::default();
        let dst = resample(&src, &config).unwrap();
        assert_eq!(dst.width, 100);
        assert_eq!(dst.height, 30);
    }

    #[test]
    fn resample_rejects_zero_source() {
        let src = PixelBuffer {
            data: Vec::new(),
            width: 0,
            height: 10,
        };
        let config = AsciiConfig::default();
        assert!(matches!(
            resample(&src, &config),
            Err(CoreError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn neutral_contrast_is_identity() {
        let mut data = vec![10, 200, 33, 255, 0, 128, 255, 7];
        let expected = data.clone();
        apply_contrast(&mut data, 100.0);
        assert_eq!(data, expected);
    }

    #[test]
    fn contrast_pushes_away_from_midpoint() {
        let mut data = vec![64, 128, 192, 255];
        apply_contrast(&mut data, 200.0);
        // (64−128)×2+128 = 0 ; 128 fixe ; (192−128)×2+128 = 255 (clampé de 256).
        assert_eq!(data, vec![0, 128, 255, 255]);
    }

    #[test]
    fn grayscale_equalizes_channels() {
        let mut data = vec![255, 0, 0, 40];
        apply_grayscale(&mut data);
        assert_eq!(data[0], data[1]);
        assert_eq!(data[1], data[2]);
        assert_eq!(data[0], 76); // round(0.299 × 255)
        assert_eq!(data[3], 40);
    }

    #[test]
    fn sepia_matches_reference_matrix() {
        let mut data = vec![100, 100, 100, 255];
        apply_sepia(&mut data);
        // Gris 100 : r' = 135.1, g' = 120.3, b' = 93.7 (troncature).
        assert_eq!(&data[..3], &[135, 120, 93]);
        assert_eq!(data[3], 255);
    }

    #[test]
    fn blur_preserves_dimensions_and_flat_color() {
        let src = PixelBuffer::filled(8, 8, (50, 100, 150, 255));
        let out = apply_blur(src.data.clone(), 8, 8).unwrap();
        assert_eq!(out.len(), src.data.len());
        // Un flou sur une image uniforme reste uniforme.
        assert_eq!(&out[..4], &[50, 100, 150, 255]);
    }
}
