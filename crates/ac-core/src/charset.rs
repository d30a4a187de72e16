use crate::error::CoreError;

/// 12 caractères — ramp par défaut, du plus dense au plus clair.
pub const CHARSET_DEFAULT: &str = "@#S%?*+;:,. ";

/// 10 caractères — compact, bon contraste (du plus clair au plus dense).
pub const CHARSET_MINIMAL: &str = " .:-=+*#%@";

/// 67 caractères — résolution maximale.
pub const CHARSET_DETAILED: &str =
    " .'`^,;!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Blocs Unicode — pseudo-pixels.
pub const CHARSET_BLOCKS: &str = " ░▒▓█";

/// Points Braille progressifs.
pub const CHARSET_PIXEL: &str = " ⣀⣄⣤⣦⣧⣿";

/// Carrés géométriques.
pub const CHARSET_GEOMETRIC: &str = " ▫▪□▣■";

/// Cercles remplis progressivement.
pub const CHARSET_BUBBLE: &str = " ○◔◑◕●";

/// Symboles mathématiques.
pub const CHARSET_MATH: &str = " .~=−+∆π∫∑";

/// Chiffres.
pub const CHARSET_NUMBERS: &str = " 1234567890";

/// Binaire — minimaliste.
pub const CHARSET_BINARY: &str = " 01";

/// Glyphes "glitch" — inclut des caractères significatifs en HTML.
pub const CHARSET_GLITCH: &str = " .`-:;!/>|\\?*#%@$¥£€";

/// Braille, combinaisons de points croissantes.
pub const CHARSET_BRAILLE: &str = " ⠁⠂⠃⠄⠅⠆⠇⠈⠉⠊⠋⠌⠍⠎⠏";

/// Ponctuation légère terminée par des fleurs.
pub const CHARSET_NATURE: &str = " .`'\"^,-~:;!i?*&@#%✿❀❁";

/// Facettes cristallines.
pub const CHARSET_CRYSTAL: &str = " .·:;*+xX❖◆■";

/// Notation musicale.
pub const CHARSET_MUSIC: &str = " .-:|♩♪♫♬♭♮♯";

/// Flèches directionnelles.
pub const CHARSET_ARROWS: &str = " .↑↗→↘↓↙←↖↔↕";

/// Katakana demi-chasse.
pub const CHARSET_KATAKANA: &str =
    " ｡｢｣､･ｦｧｨｩｪｫｬｭｮｯｰｱｲｳｴｵｶｷｸｹｺｻｼｽｾｿﾀﾁﾂﾃﾄﾅﾆﾇﾈﾉﾊﾋﾌﾍﾎﾏﾐﾑﾒﾓﾔﾕﾖﾗﾘﾙﾚﾛﾜﾝ";

/// Runes du futhark ancien.
pub const CHARSET_RUNIC: &str = " ᚠᚢᚦᚨᚱᚲᚺᚾᛁᛃᛈᛇᛉᛊᛏᛒᛖᛗᛚᛜᛞᛟ";

/// Presets nommés, dans l'ordre de cycle de l'UI.
pub const PRESETS: &[(&str, &str)] = &[
    ("default", CHARSET_DEFAULT),
    ("minimal", CHARSET_MINIMAL),
    ("detailed", CHARSET_DETAILED),
    ("blocks", CHARSET_BLOCKS),
    ("pixel", CHARSET_PIXEL),
    ("geometric", CHARSET_GEOMETRIC),
    ("bubble", CHARSET_BUBBLE),
    ("math", CHARSET_MATH),
    ("numbers", CHARSET_NUMBERS),
    ("binary", CHARSET_BINARY),
    ("glitch", CHARSET_GLITCH),
    ("braille", CHARSET_BRAILLE),
    ("nature", CHARSET_NATURE),
    ("crystal", CHARSET_CRYSTAL),
    ("music", CHARSET_MUSIC),
    ("arrows", CHARSET_ARROWS),
    ("katakana", CHARSET_KATAKANA),
    ("runic", CHARSET_RUNIC),
];

/// Retourne le charset d'un preset nommé, ou `None` si inconnu.
///
/// # Example
/// ```
/// use ac_core::charset::preset;
/// assert_eq!(preset("binary"), Some(" 01"));
/// assert_eq!(preset("nope"), None);
/// ```
#[must_use]
pub fn preset(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, charset)| *charset)
}

/// Rampe de glyphes ordonnée, utilisée pour quantifier la luminance.
///
/// L'index est déterministe : `floor((luminance / 256) * len)`, clampé à
/// `[0, len-1]`. Avec `invert`, la rampe est parcourue en sens inverse.
///
/// # Example
/// ```
/// use ac_core::charset::Ramp;
/// let ramp = Ramp::new("@#. ", false).unwrap();
/// assert_eq!(ramp.glyph(0.0), '@');
/// assert_eq!(ramp.glyph(255.0), ' ');
/// ```
pub struct Ramp {
    glyphs: Vec<char>,
}

impl Ramp {
    /// Construit une rampe depuis un charset, inversée si `invert`.
    ///
    /// # Errors
    /// Returns `CoreError::EmptyCharset` if the charset has no glyph.
    pub fn new(charset: &str, invert: bool) -> Result<Self, CoreError> {
        let mut glyphs: Vec<char> = charset.chars().collect();
        if glyphs.is_empty() {
            return Err(CoreError::EmptyCharset);
        }
        if invert {
            glyphs.reverse();
        }
        Ok(Self { glyphs })
    }

    /// Nombre de glyphes dans la rampe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Toujours `false` : la construction rejette les charsets vides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Map une luminance [0, 255] vers un glyphe.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, luminance: f32) -> char {
        let idx = ((luminance / 256.0) * self.glyphs.len() as f32).floor() as usize;
        self.glyphs[idx.min(self.glyphs.len() - 1)]
    }
}
