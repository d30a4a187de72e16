use thiserror::Error;

/// Errors originating from the core pipeline.
///
/// All variants are raised before any output is produced; a failed
/// conversion never surfaces a partial rendering.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Output width must be at least one character column.
    #[error("Largeur de sortie invalide : {0}")]
    InvalidWidth(u32),

    /// The charset must contain at least one glyph.
    #[error("Charset vide : au moins un glyphe est requis")]
    EmptyCharset,

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// The resampling backend rejected the operation.
    #[error("Rééchantillonnage échoué : {0}")]
    Resample(String),
}
