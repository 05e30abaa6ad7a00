//! String literal escape handling.
//!
//! `unescape` decodes the escapes found inside source literals and PO
//! strings; `escape` is its inverse for the characters catalogs must quote.

/// Decode escape sequences in the body of a string literal.
///
/// - `\n \t \r \\ \" \' \` \0` map to their usual characters.
/// - `\xHH` and `\uHHHH` need exactly two / four hex digits; anything else
///   (too few digits, a surrogate code point) is kept verbatim, backslash
///   included.
/// - Any other escaped character decodes to itself (`\q` → `q`).
/// - A lone trailing backslash is kept.
///
/// ```
/// use msgsync::core::extract::unescape;
///
/// assert_eq!(unescape(r"Line\nBreak"), "Line\nBreak");
/// assert_eq!(unescape(r"\x41\u00e9"), "Aé");
/// assert_eq!(unescape(r"\xZZ"), r"\xZZ");
/// assert_eq!(unescape(r"\q"), "q");
/// ```
pub fn unescape(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut result = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != '\\' {
            result.push(c);
            i += 1;
            continue;
        }

        let Some(&next) = chars.get(i + 1) else {
            result.push('\\');
            break;
        };

        match next {
            'n' => result.push('\n'),
            't' => result.push('\t'),
            'r' => result.push('\r'),
            '0' => result.push('\0'),
            'x' | 'u' => {
                let width = if next == 'x' { 2 } else { 4 };
                match decode_hex(&chars, i + 2, width) {
                    Some(decoded) => {
                        result.push(decoded);
                        i += 2 + width;
                    }
                    None => {
                        result.push('\\');
                        result.push(next);
                        i += 2;
                    }
                }
                continue;
            }
            // \\ \" \' \` and every unknown escape collapse to the character.
            other => result.push(other),
        }
        i += 2;
    }

    result
}

fn decode_hex(chars: &[char], start: usize, width: usize) -> Option<char> {
    let digits = chars.get(start..start + width)?;
    if !digits.iter().all(char::is_ascii_hexdigit) {
        return None;
    }
    let hex: String = digits.iter().collect();
    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
}

/// Escape text for a double-quoted catalog string.
///
/// Only backslash, double quote, tab, carriage return and newline are
/// escaped, so `unescape(&escape(s)) == s` for every string.
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\n' => result.push_str("\\n"),
            other => result.push(other),
        }
    }
    result
}
