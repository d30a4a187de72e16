/// Buffer de pixels RGBA, row-major, 4 bytes par pixel.
///
/// Possédé exclusivement par une invocation du pipeline et transmis par
/// transfert de propriété entre les étages (sampler → filtre → renderer),
/// jamais aliasé.
///
/// # Example
/// ```
/// use ac_core::buffer::PixelBuffer;
/// let buf = PixelBuffer::new(10, 10);
/// assert_eq!(buf.data.len(), 400);
/// ```
#[derive(Clone)]
pub struct PixelBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelBuffer {
    /// Crée un buffer zéroisé aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use ac_core::buffer::PixelBuffer;
    /// let buf = PixelBuffer::new(100, 50);
    /// assert_eq!(buf.width, 100);
    /// assert_eq!(buf.height, 50);
    /// assert_eq!(buf.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; (width * height * 4) as usize],
            width,
            height,
        }
    }

    /// Crée un buffer rempli d'une couleur RGBA uniforme.
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: (u8, u8, u8, u8)) -> Self {
        let mut buf = Self::new(width, height);
        for px in buf.data.chunks_exact_mut(4) {
            px[0] = rgba.0;
            px[1] = rgba.1;
            px[2] = rgba.2;
            px[3] = rgba.3;
        }
        buf
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use ac_core::buffer::PixelBuffer;
    /// let buf = PixelBuffer::new(10, 10);
    /// assert_eq!(buf.pixel(0, 0), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = ((y * self.width + x) * 4) as usize;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Écrit le pixel (x, y).
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: (u8, u8, u8, u8)) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = ((y * self.width + x) * 4) as usize;
        if idx + 3 >= self.data.len() {
            return;
        }
        self.data[idx] = rgba.0;
        self.data[idx + 1] = rgba.1;
        self.data[idx + 2] = rgba.2;
        self.data[idx + 3] = rgba.3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_roundtrip() {
        let mut buf = PixelBuffer::new(4, 3);
        buf.set_pixel(2, 1, (10, 20, 30, 255));
        assert_eq!(buf.pixel(2, 1), (10, 20, 30, 255));
        assert_eq!(buf.pixel(0, 0), (0, 0, 0, 0));
    }

    #[test]
    fn filled_is_uniform() {
        let buf = PixelBuffer::filled(3, 2, (7, 8, 9, 200));
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(buf.pixel(x, y), (7, 8, 9, 200));
            }
        }
    }
}
