//! Roman numeral recognition for repeated-instrument column names.
//!
//! Source files suffix repeated concepts with an uppercase Roman numeral
//! (`colonbioptI`, `colonbioptII`, ...) that the codebooks know nothing
//! about. Everything here is a pure function of the name string; header
//! reconciliation decides which candidate to accept by asking the codebook.

const ROMAN_TABLE: [(u32, &str); 13] = [
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

fn is_roman_char(ch: char) -> bool {
    matches!(ch, 'I' | 'V' | 'X' | 'L' | 'C' | 'D' | 'M')
}

/// Encode a positive number in subtractive Roman notation.
pub fn to_roman(number: u32) -> Option<String> {
    if number == 0 {
        return None;
    }
    let mut rest = number;
    let mut encoded = String::new();
    for (amount, symbol) in ROMAN_TABLE {
        while rest >= amount {
            encoded.push_str(symbol);
            rest -= amount;
        }
    }
    Some(encoded)
}

/// Parse a well-formed subtractive Roman numeral.
///
/// The text must be exactly the canonical encoding of its value, so
/// additive spellings like `IIII` are rejected.
pub fn parse_roman(text: &str) -> Option<u32> {
    if text.is_empty() {
        return None;
    }
    let mut rest = text;
    let mut value = 0u32;
    for (amount, symbol) in ROMAN_TABLE {
        while let Some(stripped) = rest.strip_prefix(symbol) {
            value += amount;
            rest = stripped;
        }
    }
    if !rest.is_empty() {
        return None;
    }
    (to_roman(value).as_deref() == Some(text)).then_some(value)
}

/// Candidate Roman suffixes of a column name, longest first.
///
/// Only the trailing run of uppercase Roman characters is considered;
/// within it, every suffix that parses as a well-formed numeral is a
/// candidate. `colonbioptIII` yields `["III", "II", "I"]`.
pub fn trailing_candidates(name: &str) -> Vec<&str> {
    let mut start = name.len();
    for (idx, ch) in name.char_indices().rev() {
        if !is_roman_char(ch) {
            break;
        }
        start = idx;
    }
    let run = &name[start..];
    run.char_indices()
        .map(|(offset, _)| &name[start + offset..])
        .filter(|candidate| parse_roman(candidate).is_some())
        .collect()
}
