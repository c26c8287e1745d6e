//! Character classes of the DID grammar.
//!
//! All classes are ASCII-only, so the parser can work on bytes and every
//! component boundary it finds is also a `char` boundary.

/// `[a-z0-9]`
pub fn is_method_char(c: u8) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// `[A-Za-z0-9.-]`
pub fn is_id_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'.' || c == b'-'
}

/// `[A-Za-z0-9._:-]` (percent triples are handled by the parser).
pub fn is_param_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'.' | b'-' | b'_' | b':')
}

/// RFC 3986 unreserved (`ALPHA DIGIT - . _ ~`) or sub-delims
/// (`! $ & ' ( ) * + , ; =`).
pub fn is_unreserved_or_sub_delim(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            b'-' | b'.'
                | b'_'
                | b'~'
                | b'!'
                | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
        )
}

/// pchar without the percent triple: unreserved, sub-delims, `:` or `@`.
pub fn is_path_char(c: u8) -> bool {
    is_unreserved_or_sub_delim(c) || c == b':' || c == b'@'
}

/// pchar plus `/` and `?`.
pub fn is_query_or_fragment_char(c: u8) -> bool {
    is_path_char(c) || c == b'/' || c == b'?'
}

pub fn is_hex_digit(c: u8) -> bool {
    c.is_ascii_hexdigit()
}
