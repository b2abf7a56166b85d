use ratatui::style::Color;

use crate::task::TaskStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub today: Color,
    pub due_marker: Color,
    pub weekday_header: Color,
    pub muted: Color,
    pub status_bar: Color,
    pub help_title: Color,
    pub help_section: Color,
    pub command_mode: Color,
    pub error: Color,
    pub success: Color,
    pub todo: Color,
    pub doing: Color,
    pub done: Color,
}

/// Base colors a theme is derived from.
struct Palette {
    accent: Color,
    selection: Color,
    text: Color,
    positive: Color,
    warning: Color,
    highlight: Color,
    muted: Color,
    negative: Color,
}

const THEMES: [&str; 6] = ["default", "gruvbox", "nord", "dracula", "solarized-dark", "monokai"];

impl Theme {
    fn from_palette(name: &str, p: Palette) -> Self {
        Self {
            name: name.to_string(),
            title: p.accent,
            selected_bg: p.selection,
            selected_fg: p.text,
            today: p.positive,
            due_marker: p.highlight,
            weekday_header: p.warning,
            muted: p.muted,
            status_bar: p.text,
            help_title: p.accent,
            help_section: p.warning,
            command_mode: p.text,
            error: p.negative,
            success: p.positive,
            todo: p.warning,
            doing: p.accent,
            done: p.positive,
        }
    }

    pub fn default_theme() -> Self {
        Self::from_palette("default", Palette {
            accent: Color::Cyan,
            selection: Color::Blue,
            text: Color::White,
            positive: Color::Green,
            warning: Color::Yellow,
            highlight: Color::Cyan,
            muted: Color::DarkGray,
            negative: Color::Red,
        })
    }

    pub fn gruvbox() -> Self {
        Self::from_palette("gruvbox", Palette {
            accent: Color::Rgb(131, 165, 152),
            selection: Color::Rgb(60, 56, 54),
            text: Color::Rgb(235, 219, 178),
            positive: Color::Rgb(184, 187, 38),
            warning: Color::Rgb(250, 189, 47),
            highlight: Color::Rgb(211, 134, 155),
            muted: Color::Rgb(146, 131, 116),
            negative: Color::Rgb(251, 73, 52),
        })
    }

    pub fn nord() -> Self {
        Self::from_palette("nord", Palette {
            accent: Color::Rgb(136, 192, 208),
            selection: Color::Rgb(67, 76, 94),
            text: Color::Rgb(236, 239, 244),
            positive: Color::Rgb(163, 190, 140),
            warning: Color::Rgb(235, 203, 139),
            highlight: Color::Rgb(180, 142, 173),
            muted: Color::Rgb(76, 86, 106),
            negative: Color::Rgb(191, 97, 106),
        })
    }

    pub fn dracula() -> Self {
        Self::from_palette("dracula", Palette {
            accent: Color::Rgb(189, 147, 249),
            selection: Color::Rgb(68, 71, 90),
            text: Color::Rgb(248, 248, 242),
            positive: Color::Rgb(80, 250, 123),
            warning: Color::Rgb(255, 184, 108),
            highlight: Color::Rgb(255, 121, 198),
            muted: Color::Rgb(98, 114, 164),
            negative: Color::Rgb(255, 85, 85),
        })
    }

    pub fn solarized_dark() -> Self {
        Self::from_palette("solarized-dark", Palette {
            accent: Color::Rgb(38, 139, 210),
            selection: Color::Rgb(7, 54, 66),
            text: Color::Rgb(238, 232, 213),
            positive: Color::Rgb(133, 153, 0),
            warning: Color::Rgb(181, 137, 0),
            highlight: Color::Rgb(211, 54, 130),
            muted: Color::Rgb(88, 110, 117),
            negative: Color::Rgb(220, 50, 47),
        })
    }

    pub fn monokai() -> Self {
        Self::from_palette("monokai", Palette {
            accent: Color::Rgb(102, 217, 239),
            selection: Color::Rgb(73, 72, 62),
            text: Color::Rgb(248, 248, 240),
            positive: Color::Rgb(166, 226, 46),
            warning: Color::Rgb(230, 219, 116),
            highlight: Color::Rgb(174, 129, 255),
            muted: Color::Rgb(117, 113, 94),
            negative: Color::Rgb(249, 38, 114),
        })
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "default" => Some(Self::default_theme()),
            "gruvbox" => Some(Self::gruvbox()),
            "nord" => Some(Self::nord()),
            "dracula" => Some(Self::dracula()),
            "solarized-dark" | "solarized" => Some(Self::solarized_dark()),
            "monokai" => Some(Self::monokai()),
            _ => None,
        }
    }

    /// Like [`Theme::by_name`], falling back to the default theme.
    pub fn get_by_name(name: &str) -> Self {
        Self::by_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown theme '{}', using default", name);
            Self::default_theme()
        })
    }

    pub fn available_themes() -> Vec<&'static str> {
        THEMES.to_vec()
    }

    pub fn column(&self, status: TaskStatus) -> Color {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::Doing => self.doing,
            TaskStatus::Done => self.done,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_theme_resolves_to_itself() {
        for name in Theme::available_themes() {
            assert_eq!(Theme::by_name(name).map(|t| t.name), Some(name.to_string()));
        }
    }

    #[test]
    fn lookup_ignores_case_and_accepts_alias() {
        assert_eq!(Theme::get_by_name("NORD").name, "nord");
        assert_eq!(Theme::get_by_name("solarized").name, "solarized-dark");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert!(Theme::by_name("neon").is_none());
        assert_eq!(Theme::get_by_name("neon"), Theme::default_theme());
    }

    #[test]
    fn columns_have_distinct_colors() {
        let theme = Theme::nord();

        assert_ne!(theme.column(TaskStatus::Todo), theme.column(TaskStatus::Doing));
        assert_ne!(theme.column(TaskStatus::Doing), theme.column(TaskStatus::Done));
    }
}
