//! Colour theme for the swiper TUI.
//!
//! Themes are defined as TOML files. Both built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Resolve one at startup with [`Theme::by_name`] and pass it through
//! the application as a shared reference.
//!
//! # Highlight palette
//!
//! `[highlight] palette` lists one colour per highlight bucket. Matches of
//! the k-th query term on a line are painted with entry `k mod len`, so the
//! order of the list is the order colours are handed out in.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use swiper_core::highlight::MIN_BUCKETS;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawEditor {
    text: RawStyle,
    line_number: RawStyle,
    cursor_line: RawStyle,
    selection: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawPicker {
    prompt: RawStyle,
    active_item: RawStyle,
    description: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    bar: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawHighlight {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    editor: RawEditor,
    borders: RawBorders,
    picker: RawPicker,
    status: RawStatus,
    highlight: RawHighlight,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme.
///
/// All styles are pre-resolved ratatui [`Style`] values: no allocation at
/// render time.
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Style,
    pub line_number: Style,
    /// Patched over the line holding the cursor.
    pub cursor_line: Style,
    pub selection: Style,

    pub border_focused: Style,
    pub border_unfocused: Style,

    /// Query line while it still shows the placeholder prompt.
    pub prompt: Style,
    pub active_item: Style,
    pub description: Style,

    pub status_bar: Style,

    /// One style per highlight bucket.
    highlight_palette: Vec<Style>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. The theme ships inside the
    /// binary and is covered by tests, so this should never happen in
    /// practice.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a theme name from the config, falling back to the default.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "default" => Self::load_default(),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using default");
                Self::load_default()
            }
        }
    }

    /// Parse a theme from a TOML string.
    ///
    /// Returns an error if the string cannot be deserialised into a valid
    /// theme or if fewer than four palette colours resolve. Unknown keys are
    /// ignored so user themes can be forward-compatible with future theme
    /// additions.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let highlight_palette: Vec<Style> = raw
            .highlight
            .palette
            .iter()
            .filter_map(|s| parse_color(s))
            .map(|c| Style::default().fg(c).add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
            .collect();
        if highlight_palette.len() < MIN_BUCKETS {
            anyhow::bail!(
                "highlight palette needs at least {MIN_BUCKETS} colours, got {}",
                highlight_palette.len()
            );
        }

        Ok(Self {
            text: raw.editor.text.into_style(),
            line_number: raw.editor.line_number.into_style(),
            cursor_line: raw.editor.cursor_line.into_style(),
            selection: raw.editor.selection.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            prompt: raw.picker.prompt.into_style(),
            active_item: raw.picker.active_item.into_style(),
            description: raw.picker.description.into_style(),
            status_bar: raw.status.bar.into_style(),
            highlight_palette,
        })
    }

    /// Number of highlight buckets this theme can paint.
    pub fn palette_len(&self) -> usize {
        self.highlight_palette.len()
    }

    /// Style for highlight `bucket`, wrapping around the palette.
    pub fn highlight(&self, bucket: usize) -> Style {
        self.highlight_palette[bucket % self.highlight_palette.len()]
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" | "aqua" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
