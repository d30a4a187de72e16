use ac_core::config::ColorMode;
use ac_pipeline::quantize;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::{App, AppState};

/// Couleur du rendu monochrome — l'indigo de l'UI d'origine.
const MONO_FG: Color = Color::Rgb(129, 140, 248);

/// Largeur de la sidebar de réglages.
pub const SIDEBAR_WIDTH: u16 = 26;

/// Draw the full UI: canvas + sidebar, plus overlays.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let h_chunks =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(SIDEBAR_WIDTH)]).split(area);

    draw_canvas(frame, h_chunks[0], app);
    draw_sidebar(frame, h_chunks[1], app);

    match app.state {
        AppState::Help => draw_help_overlay(frame, area),
        AppState::RestorePrompt => draw_restore_prompt(frame, area),
        AppState::Running | AppState::Quitting => {}
    }
}

/// Écrit la grille de glyphes directement dans le buffer ratatui.
///
/// Pas de widget intermédiaire — écriture directe, cellule par cellule.
fn draw_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let Some(grid) = app.grid.as_ref() else {
        return;
    };
    let buf = frame.buffer_mut();

    for cy in 0..grid.height.min(u32::from(area.height)) {
        for cx in 0..grid.width.min(u32::from(area.width)) {
            let cell = grid.get(cx, cy);
            let pos = (area.x + cx as u16, area.y + cy as u16);
            let Some(buf_cell) = buf.cell_mut(pos) else {
                continue;
            };

            buf_cell.set_char(cell.ch);
            let (r, g, b) = cell.rgb;
            match app.config.color_mode {
                ColorMode::Mono => {
                    buf_cell.set_fg(MONO_FG);
                }
                ColorMode::Text => {
                    buf_cell.set_fg(Color::Rgb(r, g, b));
                }
                ColorMode::Background => {
                    // Même règle de lisibilité que le markup.
                    let fg = if quantize::luminance(r, g, b) > 128.0 {
                        Color::Black
                    } else {
                        Color::White
                    };
                    buf_cell.set_bg(Color::Rgb(r, g, b));
                    buf_cell.set_fg(fg);
                }
            }
        }
    }
}

/// Draw the parameter sidebar with all live values.
fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let file = app
        .image_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("?");
    let grid_dims = app
        .grid
        .as_ref()
        .map_or_else(|| "—".to_string(), |g| format!("{}×{}", g.width, g.height));
    let charset_label = app.preset_name().map_or_else(
        || format!("{} glyphes", app.config.charset.chars().count()),
        String::from,
    );

    let mut lines = vec![
        Line::from(format!("Image    {file}")),
        Line::from(format!("Grille   {grid_dims}")),
        Line::from(""),
        Line::from(format!("Largeur  {} (+/-)", app.config.width)),
        Line::from(format!("Contrast {:.0}% ([/])", app.config.contrast)),
        Line::from(format!("Charset  {charset_label} (c)")),
        Line::from(format!(
            "Invert   {} (i)",
            if app.config.invert { "oui" } else { "non" }
        )),
        Line::from(format!("Couleur  {} (m)", app.config.color_mode.as_str())),
        Line::from(format!("Filtre   {} (f)", app.config.filter.as_str())),
        Line::from(""),
        Line::from(format!(
            "Undo/Redo {}/{} (z/y)",
            u8::from(app.history.can_undo()),
            u8::from(app.history.can_redo()),
        )),
        Line::from("Export   s"),
        Line::from("Aide     ?"),
        Line::from("Quitter  q"),
    ];

    if let Some(ref status) = app.status {
        lines.push(Line::from(""));
        lines.push(Line::from(status.as_str()).style(Style::default().fg(Color::Yellow)));
    }

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" artiscii "),
    );
    frame.render_widget(sidebar, area);
}

fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(area, 44, 16);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("  +/-   largeur (±5 colonnes)"),
        Line::from("  [/]   contraste (±10%)"),
        Line::from("  c     preset de charset suivant"),
        Line::from("  i     inverser la rampe"),
        Line::from("  m     mode couleur suivant"),
        Line::from("  f     filtre suivant"),
        Line::from("  z/y   undo / redo"),
        Line::from("  s     exporter texte + markup"),
        Line::from("  q     quitter"),
        Line::from(""),
        Line::from("  Une touche pour fermer."),
    ];
    let help = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Aide "));
    frame.render_widget(help, popup);
}

fn draw_restore_prompt(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(area, 48, 6);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("Session précédente détectée."),
        Line::from(""),
        Line::from("  y — restaurer image et réglages"),
        Line::from("  n — repartir de zéro"),
    ];
    let prompt =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Session "));
    frame.render_widget(prompt, popup);
}

/// Rect centré de taille bornée par `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
