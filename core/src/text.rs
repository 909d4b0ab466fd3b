//! Quake console text decoding.
//!
//! Raw names and print strings carry the game's 8-bit console charset: the
//! high bit selects the "gold" glyph variant and codes below 32 are special
//! glyphs (brackets, gold digits, separators). Each raw byte arrives as one
//! `char` in `0..=255`.

/// Replacement for console glyphs below 32, indexed by code.
const LOW_GLYPHS: [char; 32] = [
    '=', '?', '=', '?', '?', '•', '?', '?', //
    '?', '?', ' ', '?', '?', '?', '•', '•', //
    '[', ']', '0', '1', '2', '3', '4', '5', //
    '6', '7', '8', '9', '•', '=', '=', '=', //
];

/// Decode a single console character.
#[inline]
pub fn decode_char(c: char) -> char {
    let code = c as u32;
    let code = if (128..256).contains(&code) {
        code - 128
    } else {
        code
    };
    if code < 32 {
        LOW_GLYPHS[code as usize]
    } else {
        char::from_u32(code).unwrap_or('?')
    }
}

/// Decode a raw console string into readable text.
pub fn decode(raw: &str) -> String {
    raw.chars().map(decode_char).collect()
}

/// Decode and concatenate the lines of a notification block.
pub fn decode_block(lines: &[String]) -> String {
    lines.iter().map(|line| decode(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ascii_unchanged() {
        assert_eq!(decode("Bob"), "Bob");
    }

    #[test]
    fn test_high_bit_stripped() {
        // 'B' | 0x80, 'o' | 0x80, 'b' | 0x80
        let raw: String = ['\u{c2}', '\u{ef}', '\u{e2}'].iter().collect();
        assert_eq!(decode(&raw), "Bob");
    }

    #[test]
    fn test_low_glyphs() {
        let raw: String = ['\u{10}', 'x', '\u{11}', '\u{12}', '\u{1b}'].iter().collect();
        assert_eq!(decode(&raw), "[x]09");
    }

    #[test]
    fn test_gold_brackets() {
        // 0x90 and 0x91 are the gold variants of '[' and ']'
        let raw: String = ['\u{90}', 'a', '\u{91}'].iter().collect();
        assert_eq!(decode(&raw), "[a]");
    }

    #[test]
    fn test_unknown_low_code() {
        assert_eq!(decode("\u{1}"), "?");
    }

    #[test]
    fn test_decode_block_joins() {
        let lines = vec!["Bob".to_string(), " rides ".to_string(), "Al".to_string()];
        assert_eq!(decode_block(&lines), "Bob rides Al");
    }
}
