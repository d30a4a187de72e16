/// Image → character-art conversion pipeline for artiscii.
///
/// Pure et déterministe : fonction de (image, configuration), sans I/O,
/// sans point de suspension, sans état partagé entre invocations. Chaque
/// appel alloue ses propres buffers et les transmet par propriété entre
/// les étages : sampler → convolution → renderer. L'annulation est la
/// responsabilité de l'appelant (abandonner un résultat périmé) ; une
/// invocation lancée court toujours jusqu'au bout.

pub mod quantize;
pub mod render;
pub mod sampler;
pub mod sharpen;

use ac_core::buffer::PixelBuffer;
use ac_core::charset::Ramp;
use ac_core::config::{AsciiConfig, ImageFilter};
use ac_core::error::CoreError;

pub use render::{GlyphCell, GlyphGrid, RenderOutput};

/// Convertit une image décodée en grille de glyphes.
///
/// Valide la configuration et les dimensions AVANT toute allocation de
/// buffer ; en cas d'erreur, aucune sortie partielle n'est produite.
///
/// # Errors
/// Returns `CoreError` for a zero width, an empty charset, or a
/// zero-sized source image.
///
/// # Example
/// ```
/// use ac_core::buffer::PixelBuffer;
/// use ac_core::config::AsciiConfig;
/// use ac_pipeline::convert_grid;
/// let src = PixelBuffer::filled(200, 110, (0, 0, 0, 255));
/// let grid = convert_grid(&src, &AsciiConfig::default()).unwrap();
/// assert_eq!((grid.width, grid.height), (100, 30));
/// ```
pub fn convert_grid(src: &PixelBuffer, config: &AsciiConfig) -> Result<GlyphGrid, CoreError> {
    config.validate()?;
    let ramp = Ramp::new(&config.charset, config.invert)?;

    let mut buffer = sampler::resample(src, config)?;
    if config.filter == ImageFilter::Sharpen {
        buffer = sharpen::sharpen(buffer);
    }

    log::debug!(
        "Conversion {}×{} → grille {}×{} ({} glyphes)",
        src.width,
        src.height,
        buffer.width,
        buffer.height,
        ramp.len()
    );

    Ok(render::render_grid(&buffer, &ramp))
}

/// Convertit une image décodée en texte brut + markup optionnel.
///
/// # Errors
/// Same failure modes as [`convert_grid`].
pub fn convert(src: &PixelBuffer, config: &AsciiConfig) -> Result<RenderOutput, CoreError> {
    let grid = convert_grid(src, config)?;
    Ok(RenderOutput {
        markup: grid.to_markup(config.color_mode),
        text: grid.to_text(),
    })
}
