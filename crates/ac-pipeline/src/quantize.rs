/// Luminance perceptuelle BT.601 (ITU-R).
///
/// `0.299·R + 0.587·G + 0.114·B` — la formule exacte compte : le choix du
/// glyphe et la couleur de texte du mode `background` en dépendent tous
/// les deux.
///
/// # Example
/// ```
/// use ac_pipeline::quantize::luminance;
/// assert_eq!(luminance(0, 0, 0), 0.0);
/// assert!((luminance(255, 255, 255) - 255.0).abs() < 0.001);
/// ```
#[inline(always)]
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)
}
