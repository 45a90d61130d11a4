/*
 * Character Codes
 *
 * Byte constants for the punctuation the style-sheet scanner cares about.
 */

pub const TAB: u8 = b'\t';
pub const LF: u8 = b'\n';
pub const FF: u8 = b'\x0C';
pub const CR: u8 = b'\r';
pub const SPACE: u8 = b' ';

pub const DQ: u8 = b'"';
pub const SQ: u8 = b'\'';
pub const LPAREN: u8 = b'(';
pub const RPAREN: u8 = b')';
pub const STAR: u8 = b'*';
pub const COMMA: u8 = b',';
pub const SLASH: u8 = b'/';
pub const COLON: u8 = b':';
pub const SEMICOLON: u8 = b';';
pub const GT: u8 = b'>';
pub const PLUS: u8 = b'+';
pub const TILDE: u8 = b'~';
pub const AT: u8 = b'@';

// Brackets
pub const LBRACKET: u8 = b'[';
pub const BACKSLASH: u8 = b'\\';
pub const RBRACKET: u8 = b']';
pub const LBRACE: u8 = b'{';
pub const RBRACE: u8 = b'}';

/// Whitespace as defined by the CSS syntax spec.
pub fn is_whitespace(code: u8) -> bool {
    matches!(code, SPACE | TAB | LF | CR | FF)
}

/// Characters allowed in an at-rule keyword after the `@`.
pub fn is_name_char(code: u8) -> bool {
    code.is_ascii_alphanumeric() || code == b'-' || code == b'_' || code >= 0x80
}

/// Descendant, child and sibling combinators.
pub fn is_combinator(code: u8) -> bool {
    matches!(code, GT | PLUS | TILDE) || is_whitespace(code)
}
