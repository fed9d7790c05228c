use serde::Deserialize;

/// Colors for the browser. The defaults echo the site's green-on-black
/// palette.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub accent_fg: ratatui::style::Color,
    pub highlight_fg: ratatui::style::Color,
    pub highlight_bg: ratatui::style::Color,
    pub border_fg: ratatui::style::Color,
    pub help_fg: ratatui::style::Color,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Color;
        Self {
            accent_fg: Color::Rgb(0x00, 0xff, 0x88),
            highlight_fg: Color::Black,
            highlight_bg: Color::Rgb(0x00, 0xff, 0x88),
            border_fg: Color::DarkGray,
            help_fg: Color::Gray,
        }
    }
}

#[derive(Deserialize, Default)]
struct RawTheme {
    accent_fg: Option<String>,
    highlight_fg: Option<String>,
    highlight_bg: Option<String>,
    border_fg: Option<String>,
    help_fg: Option<String>,
}

/// Theme from `theme.toml` in the config dir; anything missing or
/// unparseable keeps its default.
pub fn load_theme() -> Theme {
    let mut theme = Theme::default();
    let path = crate::config::config_dir().join("theme.toml");
    let raw = match std::fs::read_to_string(&path) {
        Ok(s) => toml::from_str::<RawTheme>(&s).unwrap_or_default(),
        Err(_) => return theme,
    };
    if let Some(c) = raw.accent_fg.as_deref().and_then(parse_color) {
        theme.accent_fg = c;
    }
    if let Some(c) = raw.highlight_fg.as_deref().and_then(parse_color) {
        theme.highlight_fg = c;
    }
    if let Some(c) = raw.highlight_bg.as_deref().and_then(parse_color) {
        theme.highlight_bg = c;
    }
    if let Some(c) = raw.border_fg.as_deref().and_then(parse_color) {
        theme.border_fg = c;
    }
    if let Some(c) = raw.help_fg.as_deref().and_then(parse_color) {
        theme.help_fg = c;
    }
    theme
}

/// Accepts named terminal colors, `#rrggbb`, and `rgb(r,g,b)`.
pub fn parse_color(s: &str) -> Option<ratatui::style::Color> {
    use ratatui::style::Color;
    let k = s.trim().to_ascii_lowercase();
    match k.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        _ => {
            if let Some(hex) = k.strip_prefix('#') {
                return parse_hex(hex);
            }
            if let Some(rest) = k.strip_prefix("rgb(") {
                return parse_rgb_tuple(rest);
            }
            None
        }
    }
}

fn parse_hex(hex: &str) -> Option<ratatui::style::Color> {
    // Length is in bytes; non-ASCII input would split a char boundary below.
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(ratatui::style::Color::Rgb(r, g, b))
}

fn parse_rgb_tuple(rest: &str) -> Option<ratatui::style::Color> {
    let t = rest.strip_suffix(')')?;
    let mut parts = t.split(',').map(|p| p.trim().parse::<u8>());
    let r = parts.next()?.ok()?;
    let g = parts.next()?.ok()?;
    let b = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(ratatui::style::Color::Rgb(r, g, b))
}
