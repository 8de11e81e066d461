use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::member::Status;
use crate::model::role::ThemeMode;
use crate::model::roster::RosterStatus;
use crate::ops::derive::TaskCategory;

/// Parsed color theme for the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub selection_bg: Color,
    pub red: Color,
    pub green: Color,
    pub blue: Color,
    pub working: Color,
    pub meeting: Color,
    pub on_break: Color,
    pub offline: Color,
}

const WORKING: Color = Color::Rgb(0x10, 0xB9, 0x81);
const MEETING: Color = Color::Rgb(0x3B, 0x82, 0xF6);
const BREAK: Color = Color::Rgb(0xF5, 0x9E, 0x0B);
const OFFLINE: Color = Color::Rgb(0x9C, 0xA3, 0xAF);

impl Theme {
    pub fn light() -> Self {
        Theme {
            mode: ThemeMode::Light,
            background: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x37, 0x41, 0x51),
            text_bright: Color::Rgb(0x11, 0x18, 0x27),
            highlight: Color::Rgb(0x25, 0x63, 0xEB),
            dim: Color::Rgb(0x9C, 0xA3, 0xAF),
            selection_bg: Color::Rgb(0xE5, 0xE7, 0xEB),
            red: Color::Rgb(0xDC, 0x26, 0x26),
            green: Color::Rgb(0x05, 0x96, 0x69),
            blue: Color::Rgb(0x1D, 0x4E, 0xD8),
            working: WORKING,
            meeting: MEETING,
            on_break: BREAK,
            offline: OFFLINE,
        }
    }

    pub fn dark() -> Self {
        Theme {
            mode: ThemeMode::Dark,
            background: Color::Rgb(0x11, 0x18, 0x27),
            text: Color::Rgb(0xD1, 0xD5, 0xDB),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x60, 0xA5, 0xFA),
            dim: Color::Rgb(0x6B, 0x72, 0x80),
            selection_bg: Color::Rgb(0x1F, 0x29, 0x37),
            red: Color::Rgb(0xF8, 0x71, 0x71),
            green: Color::Rgb(0x34, 0xD3, 0x99),
            blue: Color::Rgb(0x93, 0xC5, 0xFD),
            working: WORKING,
            meeting: MEETING,
            on_break: BREAK,
            offline: OFFLINE,
        }
    }

    /// Palette for `mode`, with `[ui.colors]` overrides applied on top
    pub fn from_config(mode: ThemeMode, ui: &UiConfig) -> Self {
        let mut theme = match mode {
            ThemeMode::Light => Theme::light(),
            ThemeMode::Dark => Theme::dark(),
        };

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring malformed color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "selection_bg" => theme.selection_bg = color,
                "red" => theme.red = color,
                "green" => theme.green = color,
                "blue" => theme.blue = color,
                "working" => theme.working = color,
                "meeting" => theme.meeting = color,
                "break" => theme.on_break = color,
                "offline" => theme.offline = color,
                _ => {}
            }
        }
        theme
    }

    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Working => self.working,
            Status::Meeting => self.meeting,
            Status::Break => self.on_break,
            Status::Offline => self.offline,
        }
    }

    pub fn roster_color(&self, status: RosterStatus) -> Color {
        match status {
            RosterStatus::Working => self.working,
            RosterStatus::Meeting => self.meeting,
            RosterStatus::Break => self.on_break,
            RosterStatus::Offline => self.offline,
        }
    }

    pub fn category_color(&self, category: TaskCategory) -> Color {
        match category {
            TaskCategory::Overdue => self.red,
            TaskCategory::Completed => self.green,
            TaskCategory::InProgress => self.blue,
            TaskCategory::NotStarted => self.text,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#10B981"),
            Some(Color::Rgb(0x10, 0xB9, 0x81))
        );
        assert_eq!(parse_hex_color("10B981"), None); // missing #
        assert_eq!(parse_hex_color("#10B9"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_palettes_share_status_colors() {
        let light = Theme::light();
        let dark = Theme::dark();
        assert_ne!(light.background, dark.background);
        for status in Status::ALL {
            assert_eq!(light.status_color(status), dark.status_color(status));
        }
        assert_eq!(light.status_color(Status::Working), WORKING);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("break".into(), "#000000".into());
        ui.colors.insert("text".into(), "not-a-color".into());

        let theme = Theme::from_config(ThemeMode::Dark, &ui);
        assert_eq!(theme.mode, ThemeMode::Dark);
        assert_eq!(theme.status_color(Status::Break), Color::Rgb(0, 0, 0));
        assert_eq!(theme.roster_color(RosterStatus::Break), Color::Rgb(0, 0, 0));
        // Malformed values leave the palette alone
        assert_eq!(theme.text, Theme::dark().text);
    }

    #[test]
    fn test_category_color() {
        let theme = Theme::light();
        assert_eq!(theme.category_color(TaskCategory::Overdue), theme.red);
        assert_eq!(theme.category_color(TaskCategory::Completed), theme.green);
    }
}
