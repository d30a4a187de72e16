use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::{self, CHARSET_DEFAULT};
use crate::error::CoreError;

/// Largeur de sortie minimale (colonnes de caractères).
pub const MIN_WIDTH: u32 = 40;
/// Largeur de sortie maximale — garde la sortie exploitable.
pub const MAX_WIDTH: u32 = 300;

/// Configuration complète d'une conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine,
/// identique aux défauts de l'UI.
///
/// # Example
/// ```
/// use ac_core::config::AsciiConfig;
/// let config = AsciiConfig::default();
/// assert_eq!(config.width, 100);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AsciiConfig {
    /// Colonnes de caractères en sortie.
    pub width: u32,
    /// Rampe de glyphes ordonnée (du plus dense au plus clair par défaut).
    pub charset: String,
    /// Inverser le sens de parcours de la rampe (pour fond clair).
    pub invert: bool,
    /// Contraste en pourcentage. 100.0 = neutre.
    pub contrast: f32,
    /// Mapping couleur de la sortie markup.
    pub color_mode: ColorMode,
    /// Filtre d'image appliqué avant quantification.
    pub filter: ImageFilter,
}

/// Color mapping mode for the markup rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Texte brut uniquement, pas de markup.
    #[default]
    Mono,
    /// Glyphe colorisé en foreground avec le RGB brut de la cellule.
    Text,
    /// RGB brut en background, texte noir ou blanc selon la luminance.
    Background,
}

/// Image filter applied before sampling (sharpen runs after, as a convolution).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFilter {
    /// Aucun filtre.
    #[default]
    None,
    /// Flou gaussien léger (σ ≈ 0.75).
    Blur,
    /// Convolution 3×3 d'accentuation.
    Sharpen,
    /// Teinte sépia 100%.
    Sepia,
    /// Désaturation 100%.
    Grayscale,
}

impl ColorMode {
    /// Nom court pour l'affichage UI et la sérialisation CLI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mono => "mono",
            Self::Text => "text",
            Self::Background => "background",
        }
    }

    /// Mode suivant dans l'ordre de cycle de l'UI.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Mono => Self::Text,
            Self::Text => Self::Background,
            Self::Background => Self::Mono,
        }
    }
}

impl FromStr for ColorMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mono" => Ok(Self::Mono),
            "text" => Ok(Self::Text),
            "background" => Ok(Self::Background),
            other => Err(CoreError::Config(format!(
                "mode couleur inconnu : {other} (mono|text|background)"
            ))),
        }
    }
}

impl ImageFilter {
    /// Nom court pour l'affichage UI et la sérialisation CLI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::Sepia => "sepia",
            Self::Grayscale => "grayscale",
        }
    }

    /// Filtre suivant dans l'ordre de cycle de l'UI.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::None => Self::Blur,
            Self::Blur => Self::Sharpen,
            Self::Sharpen => Self::Sepia,
            Self::Sepia => Self::Grayscale,
            Self::Grayscale => Self::None,
        }
    }
}

impl FromStr for ImageFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "blur" => Ok(Self::Blur),
            "sharpen" => Ok(Self::Sharpen),
            "sepia" => Ok(Self::Sepia),
            "grayscale" => Ok(Self::Grayscale),
            other => Err(CoreError::Config(format!(
                "filtre inconnu : {other} (none|blur|sharpen|sepia|grayscale)"
            ))),
        }
    }
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            width: 100,
            charset: CHARSET_DEFAULT.to_string(),
            invert: false,
            contrast: 100.0,
            color_mode: ColorMode::Mono,
            filter: ImageFilter::None,
        }
    }
}

impl AsciiConfig {
    /// Fail-fast validation, appelée avant toute allocation de buffer.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidWidth` for a zero width and
    /// `CoreError::EmptyCharset` for an empty charset.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.width == 0 {
            return Err(CoreError::InvalidWidth(self.width));
        }
        if self.charset.chars().next().is_none() {
            return Err(CoreError::EmptyCharset);
        }
        Ok(())
    }

    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization and after every TUI edit.
    pub fn clamp_all(&mut self) {
        self.width = self.width.clamp(MIN_WIDTH, MAX_WIDTH);
        self.contrast = self.contrast.clamp(0.0, 300.0);
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    ascii: AsciiSection,
}

/// Section `[ascii]` du TOML, tous les champs optionnels pour override partiel.
#[derive(Deserialize)]
struct AsciiSection {
    width: Option<u32>,
    charset: Option<String>,
    charset_preset: Option<String>,
    invert: Option<bool>,
    contrast: Option<f32>,
    color_mode: Option<ColorMode>,
    filter: Option<ImageFilter>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// `charset_preset` a priorité sur `charset` ; un nom de preset inconnu
/// est signalé en erreur plutôt qu'ignoré silencieusement.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ac_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<AsciiConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;

    let mut config = AsciiConfig::default();

    let a = file.ascii;
    if let Some(v) = a.width {
        config.width = v;
    }
    if let Some(ref name) = a.charset_preset {
        config.charset = charset::preset(name)
            .with_context(|| format!("Preset de charset inconnu : {name}"))?
            .to_string();
    } else if let Some(v) = a.charset {
        config.charset = v;
    }
    if let Some(v) = a.invert {
        config.invert = v;
    }
    if let Some(v) = a.contrast {
        config.contrast = v;
    }
    if let Some(v) = a.color_mode {
        config.color_mode = v;
    }
    if let Some(v) = a.filter {
        config.filter = v;
    }

    config.clamp_all();
    log::debug!(
        "Config chargée depuis {} : largeur {}, charset {} glyphes, mode {}, filtre {}",
        path.display(),
        config.width,
        config.charset.chars().count(),
        config.color_mode.as_str(),
        config.filter.as_str()
    );
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_match_original_ui() {
        let config = AsciiConfig::default();
        assert_eq!(config.width, 100);
        assert_eq!(config.charset, CHARSET_DEFAULT);
        assert!(!config.invert);
        assert!((config.contrast - 100.0).abs() < f32::EPSILON);
        assert_eq!(config.color_mode, ColorMode::Mono);
        assert_eq!(config.filter, ImageFilter::None);
    }

    #[test]
    fn validate_rejects_invalid_input() {
        let config = AsciiConfig {
            width: 0,
            ..AsciiConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidWidth(0))
        ));

        let config = AsciiConfig {
            charset: String::new(),
            ..AsciiConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::EmptyCharset)));
    }

    #[test]
    fn clamp_bounds_width_and_contrast() {
        let mut config = AsciiConfig {
            width: 5,
            contrast: 900.0,
            ..AsciiConfig::default()
        };
        config.clamp_all();
        assert_eq!(config.width, MIN_WIDTH);
        assert!((config.contrast - 300.0).abs() < f32::EPSILON);

        config.width = 10_000;
        config.contrast = -50.0;
        config.clamp_all();
        assert_eq!(config.width, MAX_WIDTH);
        assert!(config.contrast.abs() < f32::EPSILON);
    }

    #[test]
    fn parse_enums_from_cli_strings() {
        assert_eq!("background".parse::<ColorMode>().unwrap(), ColorMode::Background);
        assert_eq!("sharpen".parse::<ImageFilter>().unwrap(), ImageFilter::Sharpen);
        assert!("rainbow".parse::<ColorMode>().is_err());
        assert!("emboss".parse::<ImageFilter>().is_err());
    }

    #[test]
    fn cycle_covers_all_variants() {
        let mut mode = ColorMode::Mono;
        for _ in 0..3 {
            mode = mode.cycle();
        }
        assert_eq!(mode, ColorMode::Mono);

        let mut filter = ImageFilter::None;
        for _ in 0..5 {
            filter = filter.cycle();
        }
        assert_eq!(filter, ImageFilter::None);
    }

    #[test]
    fn load_config_merges_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[ascii]\nwidth = 120\ncolor_mode = \"text\"\nfilter = \"sepia\"\n"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.width, 120);
        assert_eq!(config.color_mode, ColorMode::Text);
        assert_eq!(config.filter, ImageFilter::Sepia);
        // Champs absents : défauts conservés.
        assert_eq!(config.charset, CHARSET_DEFAULT);
        assert!(!config.invert);
    }

    #[test]
    fn load_config_resolves_preset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ascii]\ncharset_preset = \"blocks\"\n").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.charset, charset::CHARSET_BLOCKS);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "[ascii]\ncharset_preset = \"nope\"\n").unwrap();
        assert!(load_config(bad.path()).is_err());
    }
}
