use crate::buffer::PixelBuffer;

/// Décode des bytes d'image en buffer de pixels RGBA.
///
/// Implémenté par `ac-source`. Le pipeline lui-même ne décode jamais :
/// il reçoit un `PixelBuffer` déjà décodé et une configuration, et les
/// erreurs de décodage sont remontées à l'appelant avant toute conversion.
///
/// # Example
/// ```
/// use ac_core::traits::Decoder;
/// use ac_core::buffer::PixelBuffer;
///
/// struct DummyDecoder;
/// impl Decoder for DummyDecoder {
///     fn decode(&self, _bytes: &[u8]) -> anyhow::Result<PixelBuffer> {
///         Ok(PixelBuffer::new(1, 1))
///     }
/// }
/// ```
pub trait Decoder {
    /// Décode les bytes fournis en buffer RGBA.
    ///
    /// # Errors
    /// Returns an error for malformed or unsupported image bytes.
    fn decode(&self, bytes: &[u8]) -> anyhow::Result<PixelBuffer>;
}
