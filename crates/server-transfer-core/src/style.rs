// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Core - Text styling
//
// Messages are written with `&` shorthand codes (`&a`, `&l`, ...) and
// rendered with the game's native `§` escape.

/// Native style escape character
pub const STYLE_ESCAPE: char = '\u{00A7}';

/// Shorthand marker used in configuration files
pub const ALT_STYLE_CHAR: char = '&';

/// Codes recognized after the marker (colors, formats, reset, hex)
const STYLE_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

fn is_style_code(c: char) -> bool {
    STYLE_CODES.contains(c)
}

/// Translate `&`-codes into native style escapes.
///
/// Only a marker followed by a recognized code is rewritten; the code is
/// lowercased. Anything else passes through unchanged.
pub fn colorize(text: &str) -> String {
    let mut styled = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ALT_STYLE_CHAR {
            if let Some(&code) = chars.peek() {
                if is_style_code(code) {
                    styled.push(STYLE_ESCAPE);
                    styled.push(code.to_ascii_lowercase());
                    chars.next();
                    continue;
                }
            }
        }
        styled.push(c);
    }

    styled
}

/// Remove native style escapes, leaving plain text
pub fn strip_styles(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == STYLE_ESCAPE {
            if let Some(&code) = chars.peek() {
                if is_style_code(code) {
                    chars.next();
                    continue;
                }
            }
        }
        plain.push(c);
    }

    plain
}
