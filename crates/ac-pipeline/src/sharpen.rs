use ac_core::buffer::PixelBuffer;

/// Noyau d'accentuation 3×3.
const KERNEL: [[i32; 3]; 3] = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];

/// Applique le noyau d'accentuation au buffer, par canal R/G/B.
///
/// Les voisins hors-bornes sont IGNORÉS de la somme pondérée (ni
/// zero-padding ni clamp) : les pixels de bord voient donc une somme
/// réduite. Ce traitement asymétrique des bords est volontaire et doit
/// être préservé. Chaque canal de sortie est clampé à [0, 255] ; l'alpha
/// passe inchangé.
///
/// # Example
/// ```
/// use ac_core::buffer::PixelBuffer;
/// use ac_pipeline::sharpen::sharpen;
/// let flat = PixelBuffer::filled(3, 3, (100, 100, 100, 255));
/// let out = sharpen(flat);
/// // Pixel intérieur d'une image plate : 5v − 4v = v.
/// assert_eq!(out.pixel(1, 1), (100, 100, 100, 255));
/// ```
#[must_use]
pub fn sharpen(src: PixelBuffer) -> PixelBuffer {
    let mut dst = PixelBuffer::new(src.width, src.height);

    for y in 0..src.height {
        for x in 0..src.width {
            let mut acc = [0i32; 3];

            for (ky, row) in KERNEL.iter().enumerate() {
                for (kx, &wt) in row.iter().enumerate() {
                    let sy = i64::from(y) + ky as i64 - 1;
                    let sx = i64::from(x) + kx as i64 - 1;
                    if sy < 0 || sy >= i64::from(src.height) || sx < 0 || sx >= i64::from(src.width)
                    {
                        continue;
                    }
                    let (r, g, b, _) = src.pixel(sx as u32, sy as u32);
                    acc[0] += i32::from(r) * wt;
                    acc[1] += i32::from(g) * wt;
                    acc[2] += i32::from(b) * wt;
                }
            }

            let (_, _, _, a) = src.pixel(x, y);
            dst.set_pixel(
                x,
                y,
                (
                    acc[0].clamp(0, 255) as u8,
                    acc[1].clamp(0, 255) as u8,
                    acc[2].clamp(0, 255) as u8,
                    a,
                ),
            );
        }
    }

    dst
}
