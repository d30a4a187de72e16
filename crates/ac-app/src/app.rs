use std::path::PathBuf;
use std::time::{Duration, Instant};

use ac_core::buffer::PixelBuffer;
use ac_core::charset::PRESETS;
use ac_core::config::AsciiConfig;
use ac_core::history::History;
use ac_pipeline::GlyphGrid;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;

use crate::session::{self, Session};
use crate::ui;

/// Délai avant qu'une rafale d'éditions soit committée dans l'historique
/// (le debounce de l'UI d'origine sur les sliders).
const HISTORY_DEBOUNCE: Duration = Duration::from_millis(400);
/// Délai avant la sauvegarde automatique de session.
const SESSION_DEBOUNCE: Duration = Duration::from_secs(1);
/// Profondeur maximale de l'historique undo/redo.
const HISTORY_CAPACITY: usize = 64;
const WIDTH_STEP: u32 = 5;
const CONTRAST_STEP: f32 = 10.0;

/// Nom de fichier des exports (celui du bouton download d'origine).
const EXPORT_TEXT: &str = "masterpiece.txt";
const EXPORT_HTML: &str = "masterpiece.html";

/// Application state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppState {
    /// Exécution normale.
    Running,
    /// Overlay d'aide affiché (touche ?).
    Help,
    /// Proposition de restauration de la session précédente.
    RestorePrompt,
    /// Fermeture au prochain tour de boucle.
    Quitting,
}

/// Main application struct holding all interactive state.
pub struct App {
    /// Current application state.
    pub state: AppState,
    /// Réglages courants (pas encore nécessairement dans l'historique).
    pub config: AsciiConfig,
    /// Historique undo/redo des réglages.
    pub history: History<AsciiConfig>,
    /// Image source décodée.
    pub source: PixelBuffer,
    /// Chemin de l'image source.
    pub image_path: PathBuf,
    /// Dernière conversion réussie. Une conversion échouée la laisse intacte.
    pub grid: Option<GlyphGrid>,
    /// Message de statut affiché dans la sidebar.
    pub status: Option<String>,
    dirty: bool,
    preset_idx: usize,
    pending_edit: Option<Instant>,
    pending_save: Option<Instant>,
    session_path: PathBuf,
    session_enabled: bool,
    pending_restore: Option<Session>,
}

impl App {
    /// Crée l'application. Si `pending_restore` est fourni, le premier
    /// écran propose de reprendre la session sauvegardée.
    #[must_use]
    pub fn new(
        source: PixelBuffer,
        image_path: PathBuf,
        config: AsciiConfig,
        session_path: PathBuf,
        session_enabled: bool,
        pending_restore: Option<Session>,
    ) -> Self {
        let state = if pending_restore.is_some() {
            AppState::RestorePrompt
        } else {
            AppState::Running
        };
        Self {
            state,
            history: History::new(config.clone(), HISTORY_CAPACITY),
            config,
            source,
            image_path,
            grid: None,
            status: None,
            dirty: true,
            preset_idx: 0,
            pending_edit: None,
            pending_save: None,
            session_path,
            session_enabled,
            pending_restore,
        }
    }

    /// Boucle principale : tick debounces, reconversion si besoin, dessin,
    /// événements clavier.
    ///
    /// # Errors
    /// Returns an error if terminal operations fail.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            if self.state == AppState::Quitting {
                break;
            }

            self.tick();
            if self.dirty {
                self.reconvert();
            }

            terminal.draw(|frame| ui::draw(frame, self))?;

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key);
            }
        }

        // Flush final : commit de l'édition en attente puis sauvegarde.
        if self.pending_edit.take().is_some() {
            self.history.push(self.config.clone());
        }
        self.save_session_now();
        Ok(())
    }

    /// Commit les debounces arrivés à échéance.
    fn tick(&mut self) {
        if self
            .pending_edit
            .is_some_and(|t| t.elapsed() >= HISTORY_DEBOUNCE)
        {
            self.pending_edit = None;
            self.history.push(self.config.clone());
        }
        if self
            .pending_save
            .is_some_and(|t| t.elapsed() >= SESSION_DEBOUNCE)
        {
            self.save_session_now();
        }
    }

    /// Relance la conversion. En cas d'erreur, la sortie précédente reste
    /// affichée telle quelle.
    fn reconvert(&mut self) {
        self.dirty = false;
        match ac_pipeline::convert_grid(&self.source, &self.config) {
            Ok(grid) => self.grid = Some(grid),
            Err(e) => {
                log::warn!("Conversion échouée : {e}");
                self.status = Some(format!("Erreur : {e}"));
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.state {
            AppState::RestorePrompt => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.apply_restore(),
                KeyCode::Char('n' | 'd') | KeyCode::Esc => {
                    self.pending_restore = None;
                    session::discard(&self.session_path);
                    self.state = AppState::Running;
                }
                _ => {}
            },
            AppState::Help => {
                self.state = AppState::Running;
            }
            AppState::Running => self.handle_running_key(key),
            AppState::Quitting => {}
        }
    }

    fn handle_running_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.state = AppState::Quitting,
            KeyCode::Char('?') => self.state = AppState::Help,
            KeyCode::Char('+' | '=') => self.edit(|c| c.width = c.width.saturating_add(WIDTH_STEP)),
            KeyCode::Char('-') => self.edit(|c| c.width = c.width.saturating_sub(WIDTH_STEP)),
            KeyCode::Char(']') => self.edit(|c| c.contrast += CONTRAST_STEP),
            KeyCode::Char('[') => self.edit(|c| c.contrast -= CONTRAST_STEP),
            KeyCode::Char('i') => self.edit(|c| c.invert = !c.invert),
            KeyCode::Char('m') => self.edit(|c| c.color_mode = c.color_mode.cycle()),
            KeyCode::Char('f') => self.edit(|c| c.filter = c.filter.cycle()),
            KeyCode::Char('c') => self.cycle_preset(),
            KeyCode::Char('z') => self.undo(),
            KeyCode::Char('y') => self.redo(),
            KeyCode::Char('s') => self.save_outputs(),
            _ => {}
        }
    }

    /// Applique une édition : clamp, reconversion, et armement des
    /// debounces d'historique et de session.
    fn edit(&mut self, apply: impl FnOnce(&mut AsciiConfig)) {
        apply(&mut self.config);
        self.config.clamp_all();
        self.dirty = true;
        self.pending_edit = Some(Instant::now());
        self.pending_save = Some(Instant::now());
    }

    fn cycle_preset(&mut self) {
        self.preset_idx = (self.preset_idx + 1) % PRESETS.len();
        let (name, charset) = PRESETS[self.preset_idx];
        self.edit(|c| c.charset = charset.to_string());
        self.status = Some(format!("Charset : {name}"));
    }

    /// Nom du preset courant si le charset correspond à un preset connu.
    #[must_use]
    pub fn preset_name(&self) -> Option<&'static str> {
        PRESETS
            .iter()
            .find(|(_, charset)| *charset == self.config.charset)
            .map(|(name, _)| *name)
    }

    fn undo(&mut self) {
        // L'édition en attente est abandonnée, comme l'UI d'origine
        // annule son timer de debounce avant un undo.
        self.pending_edit = None;
        if let Some(config) = self.history.undo() {
            self.config = config.clone();
            self.dirty = true;
            self.pending_save = Some(Instant::now());
            self.status = Some("Undo".to_string());
        }
    }

    fn redo(&mut self) {
        self.pending_edit = None;
        if let Some(config) = self.history.redo() {
            self.config = config.clone();
            self.dirty = true;
            self.pending_save = Some(Instant::now());
            self.status = Some("Redo".to_string());
        }
    }

    /// Exporte le texte (et le markup en mode non-mono) sur disque.
    fn save_outputs(&mut self) {
        let Some(grid) = self.grid.as_ref() else {
            self.status = Some("Rien à exporter".to_string());
            return;
        };

        if let Err(e) = std::fs::write(EXPORT_TEXT, grid.to_text()) {
            log::warn!("Export texte échoué : {e}");
            self.status = Some(format!("Export échoué : {e}"));
            return;
        }
        let mut saved = EXPORT_TEXT.to_string();

        if let Some(markup) = grid.to_markup(self.config.color_mode) {
            match std::fs::write(EXPORT_HTML, markup) {
                Ok(()) => saved = format!("{EXPORT_TEXT} + {EXPORT_HTML}"),
                Err(e) => log::warn!("Export markup échoué : {e}"),
            }
        }
        self.status = Some(format!("Exporté : {saved}"));
    }

    /// Reprend la session sauvegardée : image + réglages, historique remis
    /// à l'état restauré.
    fn apply_restore(&mut self) {
        if let Some(saved) = self.pending_restore.take() {
            match ac_source::load_image(&saved.image_path) {
                Ok(buffer) => {
                    self.source = buffer;
                    self.image_path = saved.image_path;
                }
                Err(e) => {
                    log::warn!("Image de session non rechargeable : {e:#}");
                    self.status = Some("Image de session introuvable".to_string());
                }
            }
            let mut config = saved.config;
            config.clamp_all();
            self.history = History::new(config.clone(), HISTORY_CAPACITY);
            self.config = config;
            self.dirty = true;
        }
        self.state = AppState::Running;
    }

    fn save_session_now(&mut self) {
        self.pending_save = None;
        if self.session_enabled {
            session::save_or_warn(
                &self.session_path,
                &Session::new(self.image_path.clone(), self.config.clone()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_core::config::{ColorMode, MAX_WIDTH, MIN_WIDTH};

    fn app() -> App {
        App::new(
            PixelBuffer::filled(200, 110, (60, 60, 60, 255)),
            PathBuf::from("photo.png"),
            AsciiConfig::default(),
            PathBuf::from("session.json"),
            false,
            None,
        )
    }

    #[test]
    fn edits_are_clamped() {
        let mut app = app();
        for _ in 0..200 {
            app.edit(|c| c.width = c.width.saturating_add(WIDTH_STEP));
        }
        assert_eq!(app.config.width, MAX_WIDTH);
        for _ in 0..200 {
            app.edit(|c| c.width = c.width.saturating_sub(WIDTH_STEP));
        }
        assert_eq!(app.config.width, MIN_WIDTH);
    }

    #[test]
    fn reconvert_populates_grid() {
        let mut app = app();
        app.reconvert();
        let grid = app.grid.as_ref().map(|g| (g.width, g.height));
        assert_eq!(grid, Some((100, 30)));
    }

    #[test]
    fn failed_conversion_keeps_previous_grid() {
        let mut app = app();
        app.reconvert();
        assert!(app.grid.is_some());

        app.config.charset.clear();
        app.dirty = true;
        app.reconvert();
        // La grille précédente reste affichée.
        assert!(app.grid.is_some());
        assert!(app.status.as_deref().is_some_and(|s| s.contains("Erreur")));
    }

    #[test]
    fn cycle_preset_changes_charset() {
        let mut app = app();
        let before = app.config.charset.clone();
        app.cycle_preset();
        assert_ne!(app.config.charset, before);
        assert!(app.preset_name().is_some());
    }

    #[test]
    fn undo_redo_walk_history() {
        let mut app = app();
        app.config.color_mode = ColorMode::Text;
        app.history.push(app.config.clone());
        app.config.color_mode = ColorMode::Background;
        app.history.push(app.config.clone());

        app.undo();
        assert_eq!(app.config.color_mode, ColorMode::Text);
        app.undo();
        assert_eq!(app.config.color_mode, ColorMode::Mono);
        app.redo();
        assert_eq!(app.config.color_mode, ColorMode::Text);
    }

    #[test]
    fn restore_prompt_applies_saved_config() {
        let saved = Session::new(
            PathBuf::from("/nonexistent/x.png"),
            AsciiConfig {
                width: 150,
                ..AsciiConfig::default()
            },
        );
        let mut app = App::new(
            PixelBuffer::filled(10, 10, (0, 0, 0, 255)),
            PathBuf::from("photo.png"),
            AsciiConfig::default(),
            PathBuf::from("session.json"),
            false,
            Some(saved),
        );
        assert_eq!(app.state, AppState::RestorePrompt);
        app.apply_restore();
        assert_eq!(app.state, AppState::Running);
        assert_eq!(app.config.width, 150);
        assert!(!app.history.can_undo());
    }
}
