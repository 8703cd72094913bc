// Cleanup for text scraped from HTML responses.
use regex::{Captures, Regex};
use shared::models::{Cell, Table};
use std::sync::LazyLock;

use crate::error::CleanerError;
use crate::pipeline::TableStep;

const SOFT_HYPHEN: char = '\u{00AD}';
const NO_BREAK_SPACE: char = '\u{00A0}';
const ZERO_WIDTH_SPACE: char = '\u{200B}';
const BYTE_ORDER_MARK: char = '\u{FEFF}';
const REPLACEMENT: char = '\u{FFFD}';

// Same tokenization browsers use: the trailing semicolon is optional.
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+;?|#[xX][0-9a-fA-F]+;?|[^\t\n\x0C <&#;]{1,32};?)").expect("valid entity pattern")
});

// Named entities that browsers still decode without a trailing semicolon.
const LEGACY_ENTITIES: [&str; 106] = [
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil", "ETH",
    "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT", "Ntilde",
    "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN", "Uacute", "Ucirc",
    "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave", "amp", "aring", "atilde",
    "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren", "deg", "divide", "eacute", "ecirc",
    "egrave", "eth", "euml", "frac12", "frac14", "frac34", "gt", "iacute", "icirc", "iexcl", "igrave",
    "iquest", "iuml", "laquo", "lt", "macr", "micro", "middot", "nbsp", "not", "ntilde", "oacute",
    "ocirc", "ograve", "ordf", "ordm", "oslash", "otilde", "ouml", "para", "plusmn", "pound", "quot",
    "raquo", "reg", "sect", "shy", "sup1", "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc",
    "ugrave", "uml", "uuml", "yacute", "yen", "yuml",
];

// Windows-1252 meaning of character references in the C1 range.
fn windows_1252(code: u32) -> Option<char> {
    let c = match code {
        0x80 => '€',
        0x82 => '‚',
        0x83 => 'ƒ',
        0x84 => '„',
        0x85 => '…',
        0x86 => '†',
        0x87 => '‡',
        0x88 => 'ˆ',
        0x89 => '‰',
        0x8A => 'Š',
        0x8B => '‹',
        0x8C => 'Œ',
        0x8E => 'Ž',
        0x91 => '‘',
        0x92 => '’',
        0x93 => '“',
        0x94 => '”',
        0x95 => '•',
        0x96 => '–',
        0x97 => '—',
        0x98 => '˜',
        0x99 => '™',
        0x9A => 'š',
        0x9B => '›',
        0x9C => 'œ',
        0x9E => 'ž',
        0x9F => 'Ÿ',
        // 0x81, 0x8D, 0x8F, 0x90, 0x9D have no glyph and stay as they are
        0x81 | 0x8D | 0x8F | 0x90 | 0x9D => char::from_u32(code)?,
        _ => return None,
    };
    Some(c)
}

// Control characters and noncharacters that a reference may not produce.
fn is_disallowed_code_point(code: u32) -> bool {
    matches!(code, 0x01..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F..=0x9F | 0xFDD0..=0xFDEF)
        || (code & 0xFFFE) == 0xFFFE
}

fn decode_numeric_reference(digits: &str, radix: u32) -> String {
    // Anything too large for u32 is also beyond the last code point.
    let Ok(code) = u32::from_str_radix(digits, radix) else {
        return REPLACEMENT.to_string();
    };
    match code {
        0x00 => REPLACEMENT.to_string(),
        0x0D => "\r".to_string(),
        0x80..=0x9F => windows_1252(code).map(String::from).unwrap_or_default(),
        0xD800..=0xDFFF => REPLACEMENT.to_string(),
        _ if code > 0x10FFFF => REPLACEMENT.to_string(),
        _ if is_disallowed_code_point(code) => String::new(),
        _ => char::from_u32(code).map(String::from).unwrap_or_default(),
    }
}

fn decode_named_reference(whole: &str, name: &str) -> Option<String> {
    if whole.ends_with(';') {
        let decoded = html_escape::decode_html_entities(whole);
        if decoded != whole {
            return Some(decoded.into_owned());
        }
    }
    // Longest legacy name at the front wins; the rest is kept literally.
    let body = name.strip_suffix(';').unwrap_or(name);
    (2..=body.len())
        .rev()
        .filter(|&end| body.is_char_boundary(end))
        .find(|&end| LEGACY_ENTITIES.contains(&&body[..end]))
        .map(|end| {
            let entity = format!("&{};", &body[..end]);
            format!("{}{}", html_escape::decode_html_entities(&entity), &name[end..])
        })
}

/// Decodes character references the way HTML5 parsers do: numeric ones
/// with or without `;` (C1 codes read as Windows-1252, NUL and surrogates
/// become U+FFFD), named ones with `;`, and legacy names such as `&nbsp`
/// or `&amp` without it.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let whole = &caps[0];
            let reference = &caps[1];
            if let Some(number) = reference.strip_prefix('#') {
                let number = number.trim_end_matches(';');
                match number.strip_prefix(['x', 'X']) {
                    Some(hex) => decode_numeric_reference(hex, 16),
                    None => decode_numeric_reference(number, 10),
                }
            } else {
                decode_named_reference(whole, reference).unwrap_or_else(|| whole.to_string())
            }
        })
        .into_owned()
}

/// Decodes HTML entities, drops invisible characters and turns non-breaking
/// spaces into regular ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSanitizer;

impl TextSanitizer {
    /// Cleans `text` to a fixed point, so `clean(clean(x)) == clean(x)`.
    /// Double-encoded entities ("&amp;#160;") and entities broken up by
    /// invisible characters are fully resolved in a single call.
    pub fn clean(text: &str) -> String {
        let mut current = Self::clean_once(text);
        loop {
            let next = Self::clean_once(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn clean_once(text: &str) -> String {
        decode_entities(text)
            .chars()
            .filter_map(|c| match c {
                SOFT_HYPHEN | ZERO_WIDTH_SPACE | BYTE_ORDER_MARK => None,
                NO_BREAK_SPACE => Some(' '),
                other => Some(other),
            })
            .collect()
    }
}

impl TableStep for TextSanitizer {
    fn name(&self) -> &str {
        "sanitize_text"
    }

    fn apply(&self, table: &mut Table) -> Result<(), CleanerError> {
        for cell in table.cells_mut() {
            if let Cell::Text(text) = cell {
                *text = Self::clean(text);
            }
        }
        Ok(())
    }
}
