use std::path::PathBuf;

use ac_core::charset;
use ac_core::config::{AsciiConfig, ColorMode, load_config};
use anyhow::{Context, Result};
use clap::Parser;

pub mod app;
pub mod caption;
pub mod cli;
pub mod session;
pub mod ui;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider la source
    cli.validate_source()?;

    // 4. Session sauvegardée, si la persistance est active
    let saved = if cli.no_session {
        None
    } else {
        session::load_optional(&cli.session)
    };

    // 5. Charger la config : --restore part des réglages sauvegardés,
    // sinon du fichier TOML.
    let mut config = if cli.restore {
        match saved {
            Some(ref s) => s.config.clone(),
            None => {
                log::warn!("Aucune session à restaurer, utilisation de la config.");
                resolve_config(&cli)?
            }
        }
    } else {
        resolve_config(&cli)?
    };

    // 5b. Appliquer les overrides CLI
    apply_overrides(&mut config, &cli)?;
    config.clamp_all();

    // 6. Résoudre et décoder l'image source
    let image_path = match (&cli.image, &saved) {
        (Some(path), _) => path.clone(),
        (None, Some(s)) if cli.restore => s.image_path.clone(),
        _ => anyhow::bail!("Aucune image spécifiée et aucune session à restaurer."),
    };
    let source = ac_source::load_image(&image_path)?;

    if cli.tui {
        run_tui(cli, config, source, image_path)
    } else {
        run_once(&cli, &config, &source, &image_path)
    }
}

/// Mode interactif : terminal ratatui, boucle d'événements.
fn run_tui(
    cli: cli::Cli,
    config: AsciiConfig,
    source: ac_core::buffer::PixelBuffer,
    image_path: PathBuf,
) -> Result<()> {
    // Proposer la restauration seulement si elle n'a pas déjà été
    // appliquée via --restore.
    let pending_restore = if cli.restore || cli.no_session {
        None
    } else {
        session::load_optional(&cli.session)
    };

    let terminal = ratatui::init();
    let mut app = app::App::new(
        source,
        image_path,
        config,
        cli.session,
        !cli.no_session,
        pending_restore,
    );
    let result = app.run(terminal);

    // Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();
    result
}

/// Mode one-shot : une conversion, sorties sur disque ou stdout.
fn run_once(
    cli: &cli::Cli,
    config: &AsciiConfig,
    source: &ac_core::buffer::PixelBuffer,
    image_path: &std::path::Path,
) -> Result<()> {
    let output = ac_pipeline::convert(source, config)?;

    match cli.out {
        Some(ref path) => {
            std::fs::write(path, &output.text)
                .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
            log::info!("Texte écrit : {}", path.display());
        }
        None => print!("{}", output.text),
    }

    if let Some(ref path) = cli.html {
        match output.markup {
            Some(ref markup) => {
                std::fs::write(path, markup)
                    .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
                log::info!("Markup écrit : {}", path.display());
            }
            None => log::warn!("--html ignoré : pas de markup en mode {}", ColorMode::Mono.as_str()),
        }
    }

    if cli.caption {
        let lang = cli.lang.parse::<caption::Language>()?;
        eprintln!("{}", caption::caption(&output.text, lang));
    }

    if !cli.no_session {
        session::save_or_warn(
            &cli.session,
            &session::Session::new(image_path.to_path_buf(), config.clone()),
        );
    }
    Ok(())
}

/// Applique les overrides CLI sur la config chargée.
fn apply_overrides(config: &mut AsciiConfig, cli: &cli::Cli) -> Result<()> {
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(ref name) = cli.preset {
        config.charset = charset::preset(name)
            .with_context(|| format!("Preset inconnu : {name}"))?
            .to_string();
    }
    if let Some(ref charset) = cli.charset {
        config.charset.clone_from(charset);
    }
    if cli.invert {
        config.invert = true;
    }
    if let Some(contrast) = cli.contrast {
        config.contrast = contrast;
    }
    if let Some(ref mode) = cli.color_mode {
        config.color_mode = mode.parse()?;
    }
    if let Some(ref filter) = cli.filter {
        config.filter = filter.parse()?;
    }
    Ok(())
}

/// Resolve config from the TOML file, falling back to defaults when absent.
fn resolve_config(cli: &cli::Cli) -> Result<AsciiConfig> {
    if cli.config.exists() {
        load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(AsciiConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ac_core::config::ImageFilter;

    #[test]
    fn overrides_take_precedence() {
        let cli = cli::Cli::try_parse_from([
            "artiscii",
            "photo.png",
            "--width",
            "160",
            "--preset",
            "blocks",
            "--invert",
            "--contrast",
            "140",
            "--color-mode",
            "background",
            "--filter",
            "sepia",
        ])
        .unwrap();
        let mut config = AsciiConfig::default();
        apply_overrides(&mut config, &cli).unwrap();

        assert_eq!(config.width, 160);
        assert_eq!(config.charset, charset::preset("blocks").unwrap());
        assert!(config.invert);
        assert!((config.contrast - 140.0).abs() < f32::EPSILON);
        assert_eq!(config.color_mode, ColorMode::Background);
        assert_eq!(config.filter, ImageFilter::Sepia);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let cli = cli::Cli::try_parse_from(["artiscii", "photo.png", "--preset", "nope"]).unwrap();
        let mut config = AsciiConfig::default();
        assert!(apply_overrides(&mut config, &cli).is_err());
    }
}
