use chrono::Utc;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::prefs::MemoryPrefStore;
use crate::io::seed::BuiltinSeed;
use crate::io::session;
use crate::model::config::{PulseConfig, SessionConfig};
use crate::tui::app::App;

pub const TERM_W: u16 = 100;
pub const TERM_H: u16 = 30;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over the builtin seed, acting as `member-1` in the given role,
/// with in-memory prefs.
pub fn seeded_app(role: &str) -> App {
    let session = SessionConfig {
        role: role.into(),
        ..SessionConfig::default()
    };
    let state = session::initial_state(&session, &BuiltinSeed, None, Utc::now()).unwrap();
    App::new(
        state,
        &PulseConfig::default(),
        Box::new(MemoryPrefStore::default()),
    )
}
