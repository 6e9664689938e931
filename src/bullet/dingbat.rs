//! Symbol font glyphs mapped to portable Unicode.
//!
//! Bullet characters in Wingdings and friends are stored either as the raw
//! Latin-1 code (`§`, `Ø`, `ü`) or shifted into the private use area
//! (`U+F0A7`). Both forms end up at the same byte, which is looked up per font.

use phf::phf_map;

/// Wingdings glyphs by their Latin-1 character.
static WINGDINGS: phf::Map<char, char> = phf_map! {
    '"' => '✂',
    '(' => '☎',
    '6' => '⌛',
    '?' => '✍',
    'A' => '✌',
    'C' => '👍',
    'D' => '👎',
    'E' => '☜',
    'F' => '☞',
    'G' => '☝',
    'H' => '☟',
    'I' => '✋',
    'J' => '☺',
    'L' => '☹',
    'N' => '☠',
    'Q' => '✈',
    'R' => '☼',
    'T' => '❄',
    'V' => '✞',
    'X' => '✠',
    'Y' => '✡',
    'l' => '●',
    'm' => '❍',
    'n' => '■',
    'o' => '□',
    'p' => '◻',
    'q' => '❑',
    'r' => '❒',
    's' => '⬧',
    't' => '⧫',
    'u' => '◆',
    'v' => '❖',
    'w' => '⬥',
    'x' => '⌧',
    'z' => '⌘',
    '\u{9F}' => '•',
    '¡' => '○',
    '¤' => '◉',
    '¥' => '◎',
    '§' => '■',
    '¨' => '◻',
    'ª' => '✦',
    '«' => '★',
    'Ø' => '⮚',
    'è' => '➔',
    'û' => '✗',
    'ü' => '✔',
    'ý' => '☒',
    'þ' => '☑',
};

/// Symbol font: Greek letters and a few operators.
static SYMBOL: phf::Map<u32, char> = phf_map! {
    0x41u32 => 'Α', 0x42u32 => 'Β', 0x43u32 => 'Χ', 0x44u32 => 'Δ', 0x45u32 => 'Ε',
    0x46u32 => 'Φ', 0x47u32 => 'Γ', 0x48u32 => 'Η', 0x49u32 => 'Ι', 0x4Bu32 => 'Κ',
    0x4Cu32 => 'Λ', 0x4Du32 => 'Μ', 0x4Eu32 => 'Ν', 0x4Fu32 => 'Ο', 0x50u32 => 'Π',
    0x51u32 => 'Θ', 0x52u32 => 'Ρ', 0x53u32 => 'Σ', 0x54u32 => 'Τ', 0x55u32 => 'Υ',
    0x57u32 => 'Ω', 0x58u32 => 'Ξ', 0x59u32 => 'Ψ', 0x5Au32 => 'Ζ',
    0x61u32 => 'α', 0x62u32 => 'β', 0x63u32 => 'χ', 0x64u32 => 'δ', 0x65u32 => 'ε',
    0x66u32 => 'φ', 0x67u32 => 'γ', 0x68u32 => 'η', 0x69u32 => 'ι', 0x6Bu32 => 'κ',
    0x6Cu32 => 'λ', 0x6Du32 => 'μ', 0x6Eu32 => 'ν', 0x6Fu32 => 'ο', 0x70u32 => 'π',
    0x71u32 => 'θ', 0x72u32 => 'ρ', 0x73u32 => 'σ', 0x74u32 => 'τ', 0x75u32 => 'υ',
    0x77u32 => 'ω', 0x78u32 => 'ξ', 0x79u32 => 'ψ', 0x7Au32 => 'ζ',
    0xA7u32 => '♣', 0xA8u32 => '♦', 0xA9u32 => '♥', 0xAAu32 => '♠',
    0xABu32 => '↔', 0xACu32 => '←', 0xADu32 => '↑', 0xAEu32 => '→', 0xAFu32 => '↓',
    0xB0u32 => '°', 0xB1u32 => '±', 0xB4u32 => '×', 0xB7u32 => '•', 0xB8u32 => '÷',
    0xD8u32 => '¬', 0xDEu32 => '⇒', 0xE0u32 => '◊',
};

static WINGDINGS_2: phf::Map<u32, char> = phf_map! {
    0x4Fu32 => '✗',
    0x50u32 => '✓',
    0x51u32 => '☒',
    0x52u32 => '☑',
    0x54u32 => '☒',
    0x97u32 => '●',
    0x98u32 => '○',
    0xA3u32 => '☐',
};

static WINGDINGS_3: phf::Map<u32, char> = phf_map! {
    0x70u32 => '▲',
    0x71u32 => '▼',
    0x74u32 => '◀',
    0x75u32 => '▶',
    0x7Du32 => '➢',
};

static WEBDINGS: phf::Map<u32, char> = phf_map! {
    0x33u32 => '◀',
    0x34u32 => '▶',
    0x35u32 => '▲',
    0x36u32 => '▼',
    0x61u32 => '✔',
    0x72u32 => '✖',
};

/// Whether `font` is one of the symbol fonts handled here.
pub fn is_symbol_font(font: &str) -> bool {
    matches!(
        font.to_ascii_lowercase().as_str(),
        "wingdings" | "wingdings 2" | "wingdings 3" | "webdings" | "symbol"
    )
}

/// Map a bullet character drawn in `font` to a portable Unicode character.
///
/// Fonts other than the symbol fonts, and characters without a mapping,
/// come back unchanged.
pub fn map_symbol(font: &str, ch: char) -> char {
    let code = u32::from(ch);
    let byte = if (0xF000..=0xF0FF).contains(&code) { code & 0xFFF } else { code };
    let font = font.to_ascii_lowercase();

    let mapped = match font.as_str() {
        "wingdings" => char::from_u32(byte).and_then(|c| WINGDINGS.get(&c).copied()),
        "wingdings 2" => WINGDINGS_2.get(&byte).copied(),
        "wingdings 3" => WINGDINGS_3.get(&byte).copied(),
        "webdings" => WEBDINGS.get(&byte).copied(),
        "symbol" => SYMBOL.get(&byte).copied(),
        _ => return ch,
    };
    mapped.unwrap_or_else(|| {
        tracing::trace!(font = font.as_str(), code, "unmapped symbol glyph");
        ch
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wingdings_named_glyphs() {
        assert_eq!(map_symbol("Wingdings", 'q'), '❑');
        assert_eq!(map_symbol("Wingdings", 'v'), '❖');
        assert_eq!(map_symbol("Wingdings", 'Ø'), '⮚');
        assert_eq!(map_symbol("Wingdings", 'ü'), '✔');
        assert_eq!(map_symbol("Wingdings", '§'), '■');
        assert!(WINGDINGS.len() >= 40);
    }

    #[test]
    fn test_private_use_codes() {
        assert_eq!(map_symbol("Wingdings", '\u{F0A7}'), '■');
        assert_eq!(map_symbol("Symbol", '\u{F0B7}'), '•');
        assert_eq!(map_symbol("Wingdings 3", '\u{F075}'), '▶');
    }

    #[test]
    fn test_unmapped_passes_through() {
        assert_eq!(map_symbol("Wingdings", 'Z'), 'Z');
        assert_eq!(map_symbol("Arial", 'q'), 'q');
        assert!(is_symbol_font("WINGDINGS 2"));
        assert!(!is_symbol_font("Calibri"));
    }
}
