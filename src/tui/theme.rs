//! Theme definitions for the TUI.

use ratatui::style::Color;

/// A color theme for the remote.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name
    pub name: &'static str,

    // Base colors
    /// Background around the remote
    pub bg: Color,
    /// Foreground (text) color
    pub fg: Color,

    // Remote body
    /// Remote casing color
    pub body: Color,
    /// Border color
    pub border: Color,
    /// Button face color
    pub button: Color,
    /// Button label color
    pub label: Color,
    /// Label color of the button under the pointer
    pub highlight: Color,

    // Status bar
    /// Status bar background
    pub status_bg: Color,
    /// Color for the last sent command
    pub sent: Color,
    /// Inactive element color
    pub inactive: Color,
    /// Accent color for the title
    pub accent: Color,
}

impl Theme {
    /// Dark theme (default)
    pub const fn dark() -> Self {
        Self {
            name: "dark",
            bg: Color::Rgb(30, 30, 46),
            fg: Color::Rgb(205, 214, 244),
            body: Color::Rgb(49, 50, 68),
            border: Color::Rgb(88, 91, 112),
            button: Color::Rgb(186, 194, 222),
            label: Color::Rgb(17, 17, 27),
            highlight: Color::Rgb(255, 0, 0),
            status_bg: Color::Rgb(69, 71, 90),
            sent: Color::Rgb(166, 227, 161),
            inactive: Color::Rgb(108, 112, 134),
            accent: Color::Rgb(203, 166, 247),
        }
    }

    /// Light theme
    pub const fn light() -> Self {
        Self {
            name: "light",
            bg: Color::Rgb(239, 241, 245),
            fg: Color::Rgb(76, 79, 105),
            body: Color::Rgb(204, 208, 218),
            border: Color::Rgb(172, 176, 190),
            button: Color::Rgb(255, 255, 255),
            label: Color::Rgb(0, 0, 0),
            highlight: Color::Rgb(210, 15, 57),
            status_bg: Color::Rgb(188, 192, 204),
            sent: Color::Rgb(64, 160, 43),
            inactive: Color::Rgb(140, 143, 161),
            accent: Color::Rgb(136, 57, 239),
        }
    }

    /// Solarized Dark theme
    pub const fn solarized_dark() -> Self {
        Self {
            name: "solarized",
            bg: Color::Rgb(0, 43, 54),
            fg: Color::Rgb(131, 148, 150),
            body: Color::Rgb(7, 54, 66),
            border: Color::Rgb(88, 110, 117),
            button: Color::Rgb(238, 232, 213),
            label: Color::Rgb(0, 43, 54),
            highlight: Color::Rgb(220, 50, 47),
            status_bg: Color::Rgb(7, 54, 66),
            sent: Color::Rgb(133, 153, 0),
            inactive: Color::Rgb(101, 123, 131),
            accent: Color::Rgb(108, 113, 196),
        }
    }

    /// Dracula theme
    pub const fn dracula() -> Self {
        Self {
            name: "dracula",
            bg: Color::Rgb(40, 42, 54),
            fg: Color::Rgb(248, 248, 242),
            body: Color::Rgb(68, 71, 90),
            border: Color::Rgb(98, 114, 164),
            button: Color::Rgb(248, 248, 242),
            label: Color::Rgb(40, 42, 54),
            highlight: Color::Rgb(255, 85, 85),
            status_bg: Color::Rgb(68, 71, 90),
            sent: Color::Rgb(80, 250, 123),
            inactive: Color::Rgb(98, 114, 164),
            accent: Color::Rgb(189, 147, 249),
        }
    }

    /// Nord theme
    pub const fn nord() -> Self {
        Self {
            name: "nord",
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(216, 222, 233),
            body: Color::Rgb(59, 66, 82),
            border: Color::Rgb(76, 86, 106),
            button: Color::Rgb(229, 233, 240),
            label: Color::Rgb(46, 52, 64),
            highlight: Color::Rgb(191, 97, 106),
            status_bg: Color::Rgb(67, 76, 94),
            sent: Color::Rgb(163, 190, 140),
            inactive: Color::Rgb(107, 112, 137),
            accent: Color::Rgb(180, 142, 173),
        }
    }

    /// Get theme by name
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|t| t.name == name)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Available themes
pub static THEMES: &[Theme] = &[
    Theme::dark(),
    Theme::light(),
    Theme::solarized_dark(),
    Theme::dracula(),
    Theme::nord(),
];
