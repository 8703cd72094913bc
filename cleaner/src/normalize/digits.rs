// Unicode decimal digits (general category Nd). Every Nd script block is a
// run of ten code points starting at its zero, so a table of zeros is enough
// to recognize a digit and recover its value.
const DECIMAL_ZEROS: [u32; 68] = [
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66, 0x0CE6,
    0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946, 0x19D0, 0x1A80,
    0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0, 0xA9F0, 0xAA50, 0xABF0,
    0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650,
    0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50, 0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50,
    0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Value of a decimal digit in any script: '7', '٧' (Arabic-Indic) and '７'
/// (fullwidth) all give 7. Superscripts, fractions and roman numerals are
/// numeric but not decimal digits, so they give `None`.
pub fn decimal_digit_value(c: char) -> Option<u32> {
    if c.is_ascii_digit() {
        return c.to_digit(10);
    }
    let code = c as u32;
    DECIMAL_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .map(|&zero| code - zero)
}

pub fn is_decimal_digit(c: char) -> bool {
    decimal_digit_value(c).is_some()
}

/// Rewrites every decimal digit as its ASCII form and leaves other
/// characters alone, so `str::parse::<f64>` sees "123" for "١٢٣".
pub fn to_ascii_digits(text: &str) -> String {
    text.chars()
        .map(|c| match decimal_digit_value(c) {
            Some(value) => char::from(b'0' + value as u8),
            None => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_digit_values_across_scripts() {
        assert_eq!(decimal_digit_value('0'), Some(0));
        assert_eq!(decimal_digit_value('9'), Some(9));
        assert_eq!(decimal_digit_value('٣'), Some(3));
        assert_eq!(decimal_digit_value('۵'), Some(5));
        assert_eq!(decimal_digit_value('५'), Some(5));
        assert_eq!(decimal_digit_value('１'), Some(1));
        assert_eq!(decimal_digit_value('𝟘'), Some(0));
    }

    #[test]
    fn test_other_numerics_are_not_decimal_digits() {
        for c in ['½', '¼', '²', 'Ⅻ', '①', 'a', '-', ','] {
            assert!(!is_decimal_digit(c), "{c:?} should not be a decimal digit");
        }
    }

    #[test]
    fn test_to_ascii_digits() {
        assert_eq!(to_ascii_digits("١٢٣"), "123");
        assert_eq!(to_ascii_digits("１２３.４５"), "123.45");
        assert_eq!(to_ascii_digits("1²"), "1²");
    }
}
