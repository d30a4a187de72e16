use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use ac_core::config::AsciiConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Instantané de session : chemin de l'image, réglages, horodatage.
///
/// La persistance est une optimisation, jamais une exigence de
/// correction : tout échec est signalé en warn et ignoré.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    /// Chemin de l'image source.
    pub image_path: PathBuf,
    /// Réglages au moment de la sauvegarde.
    pub config: AsciiConfig,
    /// Secondes Unix.
    pub timestamp: u64,
}

impl Session {
    /// Crée un instantané horodaté à maintenant.
    #[must_use]
    pub fn new(image_path: PathBuf, config: AsciiConfig) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self {
            image_path,
            config,
            timestamp,
        }
    }
}

/// Écrit la session en JSON.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn save(path: &Path, session: &Session) -> Result<()> {
    let json =
        serde_json::to_string_pretty(session).context("Sérialisation de session échouée")?;
    std::fs::write(path, json)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    Ok(())
}

/// Sauvegarde non-fatale : log-and-continue en cas d'échec.
pub fn save_or_warn(path: &Path, session: &Session) {
    if let Err(e) = save(path, session) {
        log::warn!("Sauvegarde de session échouée : {e:#}");
    }
}

/// Lit et parse une session.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<Session> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Session corrompue : {}", path.display()))
}

/// `None` si la session est absente ou illisible (signalé en warn).
#[must_use]
pub fn load_optional(path: &Path) -> Option<Session> {
    if !path.exists() {
        return None;
    }
    match load(path) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("Session ignorée : {e:#}");
            None
        }
    }
}

/// Supprime la session sauvegardée, non-fatal.
pub fn discard(path: &Path) {
    if path.exists()
        && let Err(e) = std::fs::remove_file(path)
    {
        log::warn!("Suppression de session échouée : {e}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let config = AsciiConfig {
            width: 150,
            invert: true,
            ..AsciiConfig::default()
        };
        let session = Session::new(PathBuf::from("photo.png"), config.clone());

        save(&path, &session).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.image_path, PathBuf::from("photo.png"));
        assert_eq!(loaded.config, config);
        assert_eq!(loaded.timestamp, session.timestamp);
    }

    #[test]
    fn load_optional_absorbs_missing_and_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.json");
        assert!(load_optional(&missing).is_none());

        let corrupt = dir.path().join("bad.json");
        std::fs::write(&corrupt, "{not json").unwrap();
        assert!(load_optional(&corrupt).is_none());
    }

    #[test]
    fn discard_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let session = Session::new(PathBuf::from("x.png"), AsciiConfig::default());
        save(&path, &session).unwrap();
        discard(&path);
        assert!(!path.exists());
        // Idempotent sur fichier absent.
        discard(&path);
    }
}
