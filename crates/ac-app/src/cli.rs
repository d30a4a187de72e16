use std::path::PathBuf;

use clap::Parser;

/// artiscii — Image → character-art converter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF, WebP).
    pub image: Option<PathBuf>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Largeur de sortie en colonnes de caractères (40–300).
    #[arg(long)]
    pub width: Option<u32>,

    /// Charset littéral : rampe ordonnée de glyphes.
    #[arg(long)]
    pub charset: Option<String>,

    /// Preset de charset : default, minimal, detailed, blocks, pixel,
    /// geometric, bubble, math, numbers, binary, glitch, braille, nature,
    /// crystal, music, arrows, katakana, runic.
    #[arg(long)]
    pub preset: Option<String>,

    /// Inverser la rampe (pour terminal à fond clair).
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Contraste en pourcentage. 100 = neutre.
    #[arg(long)]
    pub contrast: Option<f32>,

    /// Mode couleur : mono, text, background.
    #[arg(long)]
    pub color_mode: Option<String>,

    /// Filtre : none, blur, sharpen, sepia, grayscale.
    #[arg(long)]
    pub filter: Option<String>,

    /// Écrire le texte dans ce fichier au lieu de stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Écrire le markup colorisé dans ce fichier (modes non-mono).
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Lancer l'interface interactive.
    #[arg(long, default_value_t = false)]
    pub tui: bool,

    /// Demander une légende générée (réseau, clé GEMINI_API_KEY requise).
    #[arg(long, default_value_t = false)]
    pub caption: bool,

    /// Langue de la légende : en, tr.
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Fichier de session.
    #[arg(long, default_value = "artiscii_session.json")]
    pub session: PathBuf,

    /// Désactiver la persistance de session.
    #[arg(long, default_value_t = false)]
    pub no_session: bool,

    /// Restaurer la dernière session (image et réglages).
    #[arg(long, default_value_t = false)]
    pub restore: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate that a visual source is available.
    ///
    /// # Errors
    /// Returns an error if neither an image path nor --restore is given.
    pub fn validate_source(&self) -> anyhow::Result<()> {
        if self.image.is_none() && !self.restore {
            anyhow::bail!(
                "Aucune image spécifiée. Fournissez un chemin d'image, ou --restore pour reprendre la dernière session."
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_typical_invocation() {
        let cli = Cli::try_parse_from([
            "artiscii",
            "photo.png",
            "--width",
            "120",
            "--preset",
            "blocks",
            "--color-mode",
            "text",
            "--filter",
            "sharpen",
        ])
        .unwrap();
        assert_eq!(cli.image.unwrap(), PathBuf::from("photo.png"));
        assert_eq!(cli.width, Some(120));
        assert_eq!(cli.preset.as_deref(), Some("blocks"));
        assert_eq!(cli.color_mode.as_deref(), Some("text"));
        assert_eq!(cli.filter.as_deref(), Some("sharpen"));
        assert!(!cli.tui);
    }

    #[test]
    fn source_required_unless_restore() {
        let bare = Cli::try_parse_from(["artiscii"]).unwrap();
        assert!(bare.validate_source().is_err());

        let restore = Cli::try_parse_from(["artiscii", "--restore"]).unwrap();
        assert!(restore.validate_source().is_ok());
    }
}
