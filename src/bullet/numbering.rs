//! Auto-number formatting (`a:buAutoNum type`).

/// Numeral system of an auto-number scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeral {
    Arabic,
    AlphaLower,
    AlphaUpper,
    RomanLower,
    RomanUpper,
    Hebrew,
}

/// Punctuation around the numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affix {
    /// `1. `
    Period,
    /// `1) `
    ParenR,
    /// `(1) `
    ParenBoth,
    /// `1 `
    Plain,
    /// `1-`
    Minus,
}

/// A known auto-number scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub numeral: Numeral,
    pub affix: Affix,
}

impl NumberFormat {
    /// Parse a `buAutoNum type`.
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        use Affix::*;
        use Numeral::*;
        let (numeral, affix) = match scheme {
            "arabicPeriod" => (Arabic, Period),
            "arabicParenR" => (Arabic, ParenR),
            "arabicParenBoth" => (Arabic, ParenBoth),
            "arabicPlain" => (Arabic, Plain),
            "alphaLcPeriod" => (AlphaLower, Period),
            "alphaUcPeriod" => (AlphaUpper, Period),
            "alphaLcParenR" => (AlphaLower, ParenR),
            "alphaUcParenR" => (AlphaUpper, ParenR),
            "alphaLcParenBoth" => (AlphaLower, ParenBoth),
            "alphaUcParenBoth" => (AlphaUpper, ParenBoth),
            "romanLcPeriod" => (RomanLower, Period),
            "romanUcPeriod" => (RomanUpper, Period),
            "romanLcParenR" => (RomanLower, ParenR),
            "romanUcParenR" => (RomanUpper, ParenR),
            "romanLcParenBoth" => (RomanLower, ParenBoth),
            "romanUcParenBoth" => (RomanUpper, ParenBoth),
            "hebrew2Minus" => (Hebrew, Minus),
            _ => return None,
        };
        Some(Self { numeral, affix })
    }

    /// Format `n`. A numeral outside its system's range falls back to arabic.
    pub fn format(&self, n: u32) -> String {
        let numeral = match self.numeral {
            Numeral::Arabic => Some(n.to_string()),
            Numeral::AlphaLower => alphabetic(n).map(|s| s.to_ascii_lowercase()),
            Numeral::AlphaUpper => alphabetic(n),
            Numeral::RomanLower => roman(n).map(|s| s.to_ascii_lowercase()),
            Numeral::RomanUpper => roman(n),
            Numeral::Hebrew => hebrew(n),
        }
        .unwrap_or_else(|| n.to_string());

        match self.affix {
            Affix::Period => format!("{numeral}. "),
            Affix::ParenR => format!("{numeral}) "),
            Affix::ParenBoth => format!("({numeral}) "),
            Affix::Plain => format!("{numeral} "),
            Affix::Minus => format!("{numeral}-"),
        }
    }
}

/// Format `n` under `scheme`; unknown schemes yield the bare numeral.
pub fn format_number(scheme: &str, n: u32) -> String {
    match NumberFormat::from_scheme(scheme) {
        Some(format) => format.format(n),
        None => {
            tracing::debug!(scheme, "unknown auto-number scheme, using raw numeral");
            n.to_string()
        },
    }
}

/// Bijective base-26: `1 -> A`, `26 -> Z`, `27 -> AA`.
pub fn alphabetic(n: u32) -> Option<String> {
    if n == 0 {
        return None;
    }
    let mut n = n;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    String::from_utf8(out).ok()
}

/// Standard subtractive roman numerals, `1..=3999`.
pub fn roman(n: u32) -> Option<String> {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    if !(1..=3999).contains(&n) {
        return None;
    }
    let mut n = n;
    let mut out = String::new();
    for (value, symbol) in TABLE {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    Some(out)
}

const GERESH: char = '\u{05F3}';
const GERSHAYIM: char = '\u{05F4}';

/// Hebrew gematria, `1..=999`, with geresh after a single letter and
/// gershayim before the last of several.
pub fn hebrew(n: u32) -> Option<String> {
    const HUNDREDS: [char; 4] = ['ק', 'ר', 'ש', 'ת'];
    const TENS: [char; 9] = ['י', 'כ', 'ל', 'מ', 'נ', 'ס', 'ע', 'פ', 'צ'];
    const ONES: [char; 9] = ['א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט'];

    if !(1..=999).contains(&n) {
        return None;
    }
    let mut letters = Vec::new();
    let mut hundreds = n / 100;
    while hundreds > 4 {
        letters.push('ת');
        hundreds -= 4;
    }
    if hundreds > 0 {
        letters.push(HUNDREDS[hundreds as usize - 1]);
    }

    // 15 and 16 avoid spelling divine names.
    match n % 100 {
        15 => letters.extend(['ט', 'ו']),
        16 => letters.extend(['ט', 'ז']),
        rest => {
            if rest >= 10 {
                letters.push(TENS[(rest / 10) as usize - 1]);
            }
            if rest % 10 > 0 {
                letters.push(ONES[(rest % 10) as usize - 1]);
            }
        },
    }

    let mut out: String = letters.iter().collect();
    if letters.len() == 1 {
        out.push(GERESH);
    } else if let Some(last) = letters.last() {
        out.pop();
        out.push(GERSHAYIM);
        out.push(*last);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arabic_affixes() {
        assert_eq!(format_number("arabicPeriod", 1), "1. ");
        assert_eq!(format_number("arabicParenR", 2), "2) ");
        assert_eq!(format_number("arabicParenBoth", 3), "(3) ");
        assert_eq!(format_number("arabicPlain", 4), "4 ");
    }

    #[test]
    fn test_alphabetic() {
        assert_eq!(format_number("alphaLcPeriod", 1), "a. ");
        assert_eq!(format_number("alphaUcParenR", 26), "Z) ");
        assert_eq!(format_number("alphaLcParenBoth", 27), "(aa) ");
        assert_eq!(alphabetic(52).as_deref(), Some("AZ"));
        assert_eq!(alphabetic(703).as_deref(), Some("AAA"));
        assert_eq!(alphabetic(0), None);
    }

    #[test]
    fn test_roman() {
        assert_eq!(format_number("romanUcPeriod", 4), "IV. ");
        assert_eq!(format_number("romanLcParenR", 1994), "mcmxciv) ");
        assert_eq!(roman(3999).as_deref(), Some("MMMCMXCIX"));
        assert_eq!(format_number("romanUcPeriod", 4000), "4000. ");
    }

    #[test]
    fn test_hebrew() {
        assert_eq!(format_number("hebrew2Minus", 1), "א׳-");
        assert_eq!(format_number("hebrew2Minus", 15), "ט״ו-");
        assert_eq!(format_number("hebrew2Minus", 16), "ט״ז-");
        assert_eq!(hebrew(11).as_deref(), Some("י״א"));
        assert_eq!(hebrew(100).as_deref(), Some("ק׳"));
        assert_eq!(hebrew(515).as_deref(), Some("תקט״ו"));
    }

    #[test]
    fn test_unknown_scheme_is_raw() {
        assert_eq!(format_number("thaiAlphaPeriod", 7), "7");
    }
}
