use std::fmt::Write as _;

use ac_core::buffer::PixelBuffer;
use ac_core::charset::Ramp;
use ac_core::config::ColorMode;

use crate::quantize;

/// Seuil de luminance au-delà duquel le texte du mode `background`
/// passe au noir pour rester lisible.
const LEGIBILITY_THRESHOLD: f32 = 128.0;

/// Une cellule de la grille de glyphes : le caractère choisi et le RGB
/// brut du pixel échantillonné.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphCell {
    /// Glyphe sélectionné dans la rampe.
    pub ch: char,
    /// Couleur source de la cellule.
    pub rgb: (u8, u8, u8),
}

/// Grille de glyphes row-major, résultat intermédiaire du renderer.
///
/// Sérialisée en texte brut et en markup ; dessinée telle quelle par la TUI.
pub struct GlyphGrid {
    /// Cellules, row-major.
    pub cells: Vec<GlyphCell>,
    /// Largeur en caractères.
    pub width: u32,
    /// Hauteur en caractères.
    pub height: u32,
}

impl GlyphGrid {
    /// Cellule (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> &GlyphCell {
        &self.cells[(y * self.width + x) as usize]
    }

    /// Sortie texte : `height` lignes de `width` glyphes, chacune terminée
    /// par un saut de ligne.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for (i, cell) in self.cells.iter().enumerate() {
            out.push(cell.ch);
            if (i as u32 + 1) % self.width == 0 {
                out.push('\n');
            }
        }
        out
    }

    /// Sortie markup colorisée, `None` en mode mono.
    ///
    /// `text` : glyphe enveloppé d'une directive foreground avec le RGB brut.
    /// `background` : RGB brut en fond, texte `#000000` si la luminance
    /// BT.601 dépasse 128, `#ffffff` sinon. Les glyphes structurellement
    /// significatifs (`&`, `<`, `>`) sont échappés.
    #[must_use]
    pub fn to_markup(&self, mode: ColorMode) -> Option<String> {
        if mode == ColorMode::Mono {
            return None;
        }

        let mut out = String::with_capacity(self.cells.len() * 48);
        for (i, cell) in self.cells.iter().enumerate() {
            let (r, g, b) = cell.rgb;
            match mode {
                ColorMode::Mono => unreachable!(),
                ColorMode::Text => {
                    let _ = write!(out, "<span style=\"color: rgb({r},{g},{b})\">");
                }
                ColorMode::Background => {
                    let text_color = if quantize::luminance(r, g, b) > LEGIBILITY_THRESHOLD {
                        "#000000"
                    } else {
                        "#ffffff"
                    };
                    let _ = write!(
                        out,
                        "<span style=\"background-color: rgb({r},{g},{b}); color: {text_color}\">"
                    );
                }
            }
            push_escaped(&mut out, cell.ch);
            out.push_str("</span>");
            if (i as u32 + 1) % self.width == 0 {
                out.push('\n');
            }
        }
        Some(out)
    }
}

/// Échappe les caractères structurels du markup ; `&` en premier n'a pas
/// d'importance ici puisqu'on échappe caractère par caractère.
fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        _ => out.push(ch),
    }
}

/// Parcourt le buffer row-major et quantifie chaque cellule en glyphe.
///
/// Aucun mode d'échec partiel : le buffer entier est rendu, les entrées
/// sont validées en amont par l'appelant.
#[must_use]
pub fn render_grid(buffer: &PixelBuffer, ramp: &Ramp) -> GlyphGrid {
    let mut cells = Vec::with_capacity(buffer.width as usize * buffer.height as usize);
    for y in 0..buffer.height {
        for x in 0..buffer.width {
            let (r, g, b, _) = buffer.pixel(x, y);
            cells.push(GlyphCell {
                ch: ramp.glyph(quantize::luminance(r, g, b)),
                rgb: (r, g, b),
            });
        }
    }
    GlyphGrid {
        cells,
        width: buffer.width,
        height: buffer.height,
    }
}

/// Résultat d'une conversion : texte brut et markup optionnel.
///
/// Sorties immuables d'une seule invocation ; aucun état partagé ne
/// persiste entre invocations.
pub struct RenderOutput {
    /// Rendu texte, lignes de longueur `width` terminées par `\n`.
    pub text: String,
    /// Rendu markup colorisé, présent si `color_mode != mono`.
    pub markup: Option<String>,
}
