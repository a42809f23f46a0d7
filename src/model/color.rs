/// Hex used for labels whose Trello color is unset or unrecognised.
pub const DEFAULT_LABEL_HEX: &str = "b3bac5";

/// Background used when the board has an image background or a color name
/// outside the table. Deliberately a color name, not a hex value.
pub const DEFAULT_BACKGROUND: &str = "green";

/// Trello string length of a background image id.
const IMAGE_BACKGROUND_LEN: usize = 24;

/// Named Trello colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    Blue,
    Sky,
    Lime,
    Pink,
    Black,
}

impl Color {
    pub const ALL: [Color; 10] = [
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Red,
        Color::Purple,
        Color::Blue,
        Color::Sky,
        Color::Lime,
        Color::Pink,
        Color::Black,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Red => "red",
            Color::Purple => "purple",
            Color::Blue => "blue",
            Color::Sky => "sky",
            Color::Lime => "lime",
            Color::Pink => "pink",
            Color::Black => "black",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Color::Green => "49b675",
            Color::Yellow => "FFFF00",
            Color::Orange => "FFA500",
            Color::Red => "FF0000",
            Color::Purple => "800080",
            Color::Blue => "0000FF",
            Color::Sky => "87ceeb",
            Color::Lime => "9efd38",
            Color::Pink => "c09da4",
            Color::Black => "000000",
        }
    }

    /// Exact, case-sensitive lookup of a Trello color name.
    pub fn from_name(name: &str) -> Option<Color> {
        Color::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

/// Hex for a label color. Unset and unknown names share the default.
pub fn resolve_color(name: Option<&str>) -> &'static str {
    name.and_then(Color::from_name)
        .map(|c| c.hex())
        .unwrap_or(DEFAULT_LABEL_HEX)
}

/// Board background from Trello's `prefs.background`.
///
/// A 24 character value is an image id. Anything else is treated as a color
/// name; names outside the table fall back to [`DEFAULT_BACKGROUND`] rather
/// than to the label default.
pub fn background_color(background: &str) -> String {
    if background.chars().count() == IMAGE_BACKGROUND_LEN {
        return DEFAULT_BACKGROUND.to_string();
    }
    Color::from_name(background)
        .map(|c| c.hex())
        .unwrap_or(DEFAULT_BACKGROUND)
        .to_string()
}
