//! CSS identifier escaping
//!
//! Serializes an arbitrary string as a CSS identifier, following the
//! `CSS.escape()` algorithm from CSSOM:
//! https://drafts.csswg.org/cssom/#serialize-an-identifier

use std::fmt::Write;

/// Escape `value` so it can be used verbatim as an identifier in a selector.
///
/// `single-spa-application:@org/app` becomes
/// `single-spa-application\:\@org\/app`.
pub fn escape_identifier(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 8);
    let chars: Vec<char> = value.chars().collect();
    let first = chars.first().copied();

    for (index, &ch) in chars.iter().enumerate() {
        let code = ch as u32;

        if code == 0 {
            result.push('\u{FFFD}');
            continue;
        }

        let leading_digit = ch.is_ascii_digit()
            && (index == 0 || (index == 1 && first == Some('-')));
        if (0x01..=0x1F).contains(&code) || code == 0x7F || leading_digit {
            // Hex escapes are terminated by a single space.
            let _ = write!(result, "\\{:x} ", code);
            continue;
        }

        if index == 0 && chars.len() == 1 && ch == '-' {
            result.push('\\');
            result.push(ch);
            continue;
        }

        if code >= 0x80 || ch == '-' || ch == '_' || ch.is_ascii_alphanumeric() {
            result.push(ch);
            continue;
        }

        result.push('\\');
        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::escape_identifier;

    #[test]
    fn escapes_colon_at_and_slash() {
        assert_eq!(
            escape_identifier("single-spa-application:@org/app-name"),
            r"single-spa-application\:\@org\/app-name"
        );
    }

    #[test]
    fn leaves_plain_identifiers_alone() {
        assert_eq!(escape_identifier("my_app-2"), "my_app-2");
        assert_eq!(escape_identifier("appli\u{e9}"), "appli\u{e9}");
    }

    #[test]
    fn hex_escapes_leading_digits() {
        assert_eq!(escape_identifier("1app"), r"\31 app");
        assert_eq!(escape_identifier("-1app"), r"-\31 app");
    }

    #[test]
    fn escapes_lone_hyphen_and_control_characters() {
        assert_eq!(escape_identifier("-"), r"\-");
        assert_eq!(escape_identifier("a\u{7}b"), r"a\7 b");
        assert_eq!(escape_identifier("a\0b"), "a\u{FFFD}b");
    }
}
