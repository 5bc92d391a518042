//! Text encoding and metrics for the standard Helvetica fonts

/// Standard font faces used by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    /// Resource name in the page font dictionary
    pub fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Average glyph advance as a fraction of the font size
    fn average_advance(&self) -> f32 {
        match self {
            Font::Regular => 0.52,
            Font::Bold => 0.57,
        }
    }
}

/// Typographic characters outside Latin-1 that WinAnsi still covers
const WIN_ANSI_EXTRAS: &[(char, u8)] = &[
    ('\u{20AC}', 0x80), // euro
    ('\u{2026}', 0x85), // ellipsis
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95), // bullet
    ('\u{2013}', 0x96), // en dash
    ('\u{2014}', 0x97), // em dash
    ('\u{2122}', 0x99), // trademark
];

/// Encode `text` for a WinAnsi font. Printable Latin-1 passes through,
/// anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            0x09 => b' ',
            _ => WIN_ANSI_EXTRAS
                .iter()
                .find(|(extra, _)| *extra == c)
                .map(|(_, byte)| *byte)
                .unwrap_or(b'?'),
        })
        .collect()
}

/// Approximate rendered width in points
pub fn text_width(text: &str, size: f32, font: Font) -> f32 {
    text.chars().count() as f32 * (size * font.average_advance())
}

/// Truncate with "..." so the text fits in `max_width`
pub fn fit_text(text: &str, max_width: f32, size: f32, font: Font) -> String {
    if text_width(text, size, font) <= max_width {
        return text.to_string();
    }

    let per_char = size * font.average_advance();
    let budget = ((max_width / per_char) as usize).saturating_sub(3);
    let mut fitted: String = text.chars().take(budget).collect();
    fitted.push_str("...");
    fitted
}

/// Greedy word wrap. A single word wider than the line is kept whole.
pub fn wrap_text(text: &str, max_width: f32, size: f32, font: Font) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, size, font) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
