//! Primitive scanners for common token shapes
//!
//! A [`Cursor`] holds the unconsumed remainder of the input. Each `pop_*` method
//! carves a token off the front of the remainder and advances past it.
//!
//! Most scanners assume the caller already checked the opening character (a quote,
//! a comment opener, a letter); only [`Cursor::pop_number`] validates its input and
//! reports `None` without consuming anything when the remainder is not a number.

use crate::token::Token;
use crate::token_type::{
    self, CODE_COMMENT, CODE_IDENTIFIER, CODE_NUMBER_DECIMAL, CODE_NUMBER_HEXADECIMAL,
    CODE_NUMBER_INTEGER, CODE_NUMBER_OCTAL, CODE_STRING_DOUBLE, CODE_STRING_MULTILINE,
    CODE_STRING_SINGLE, TokenType,
};

/// The unconsumed remainder of an input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    /// Create a cursor over `text`
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    /// The text not consumed yet
    #[must_use]
    pub const fn rest(&self) -> &'a str {
        self.rest
    }

    /// True when everything was consumed
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Carve the first `end` bytes off as a token of type `kind`
    ///
    /// # Panics
    ///
    /// Panics if `end` is not on a char boundary of the remainder.
    pub fn pop(&mut self, kind: TokenType, end: usize) -> Token<'a> {
        let (head, tail) = self.rest.split_at(end.min(self.rest.len()));
        self.rest = tail;
        Token::new(kind, head)
    }

    /// Pop a `'` quoted string.
    ///
    /// Ends after the first `'` not preceded by `\`, before a `\n`, or at the end of
    /// the text, whichever comes first.
    pub fn pop_single_quoted_string(&mut self) -> Token<'a> {
        self.pop_quoted(b'\'', CODE_STRING_SINGLE)
    }

    /// Pop a `"` quoted string, with the same termination rules as
    /// [`Cursor::pop_single_quoted_string`].
    pub fn pop_double_quoted_string(&mut self) -> Token<'a> {
        self.pop_quoted(b'"', CODE_STRING_DOUBLE)
    }

    fn pop_quoted(&mut self, quote: u8, kind: TokenType) -> Token<'a> {
        let bytes = self.rest.as_bytes();
        let mut end = bytes.len();
        for i in 1..bytes.len() {
            match bytes[i] {
                c if c == quote && bytes[i - 1] != b'\\' => {
                    end = i + 1;
                    break;
                },
                b'\n' => {
                    end = i;
                    break;
                },
                _ => {},
            }
        }
        self.pop(kind, end)
    }

    /// Pop a back-tick quoted string, ending after the next back-tick or at the end
    /// of the text. There are no escapes.
    pub fn pop_back_tick_string(&mut self) -> Token<'a> {
        let end = self.rest.as_bytes()[1.min(self.rest.len())..]
            .iter()
            .position(|&c| c == b'`')
            .map_or(self.rest.len(), |i| i + 2);
        self.pop(CODE_STRING_MULTILINE, end)
    }

    /// Pop a `"""` quoted string, ending after the next `"""` or at the end of the
    /// text. There are no escapes.
    pub fn pop_triple_double_quoted_string(&mut self) -> Token<'a> {
        let bytes = self.rest.as_bytes();
        let mut end = bytes.len();
        // A closing delimiter ends at index 5 at the earliest. Stepping three bytes at
        // a time can not jump over a delimiter unless the probed byte is a quote, in
        // which case the scan resumes one byte further.
        let mut i = 5;
        while i < bytes.len() {
            if bytes[i] == b'"' {
                if bytes[i - 1] == b'"' && bytes[i - 2] == b'"' {
                    end = i + 1;
                    break;
                }
                i += 1;
            } else {
                i += 3;
            }
        }
        self.pop(CODE_STRING_MULTILINE, end)
    }

    /// Pop a comment introduced by one character (`#`, `;`, `'`, ...) up to, but not
    /// including, the next `\n`.
    pub fn pop_one_char_line_comment(&mut self) -> Token<'a> {
        self.pop_line_comment(1)
    }

    /// Pop a comment introduced by two characters (`//`, `--`, ...) up to, but not
    /// including, the next `\n`.
    pub fn pop_two_char_line_comment(&mut self) -> Token<'a> {
        self.pop_line_comment(2)
    }

    fn pop_line_comment(&mut self, opener: usize) -> Token<'a> {
        let start = opener.min(self.rest.len());
        let end = self.rest.as_bytes()[start..]
            .iter()
            .position(|&c| c == b'\n')
            .map_or(self.rest.len(), |i| start + i);
        self.pop(CODE_COMMENT, end)
    }

    /// Pop a `/* */` comment, including the closing `*/`, or the rest of the text
    /// when it is not terminated.
    pub fn pop_slash_star_comment(&mut self) -> Token<'a> {
        let start = 2.min(self.rest.len());
        let end = self.rest.as_bytes()[start..]
            .windows(2)
            .position(|w| w == b"*/")
            .map_or(self.rest.len(), |i| start + i + 2);
        self.pop(CODE_COMMENT, end)
    }

    /// Pop a number literal, or return `None` without consuming anything.
    ///
    /// Recognized shapes, all with an optional leading sign:
    /// - `0x1F`: hexadecimal
    /// - `017`: octal
    /// - `12`: integer
    /// - `1.5`, `.5`, `1.`, `1e9`, `1.5e-3`: decimal
    ///
    /// An exponent is only taken when its digits are present; `1e` is the integer `1`
    /// followed by an unconsumed `e`.
    pub fn pop_number(&mut self) -> Option<Token<'a>> {
        let bytes = self.rest.as_bytes();
        let mut end = 0;
        let mut c = *bytes.first()?;

        if c == b'-' || c == b'+' {
            end += 1;
            c = *bytes.get(end)?;
        }

        if c == b'.' {
            end += 1;
            if !bytes.get(end)?.is_ascii_digit() {
                return None;
            }
            return Some(self.pop_decimal(end + 1));
        }

        if !c.is_ascii_digit() {
            return None;
        }

        end += 1;
        if c == b'0' {
            let Some(&next) = bytes.get(end) else {
                return Some(self.pop(CODE_NUMBER_INTEGER, end));
            };
            return match next {
                b'0'..=b'7' => {
                    end += 1;
                    while bytes.get(end).is_some_and(|c| (b'0'..=b'7').contains(c)) {
                        end += 1;
                    }
                    Some(self.pop(CODE_NUMBER_OCTAL, end))
                },
                b'x' | b'X' => {
                    end += 1;
                    if !bytes.get(end)?.is_ascii_hexdigit() {
                        return None;
                    }
                    while bytes.get(end).is_some_and(u8::is_ascii_hexdigit) {
                        end += 1;
                    }
                    Some(self.pop(CODE_NUMBER_HEXADECIMAL, end))
                },
                b'.' => Some(self.pop_decimal(end + 1)),
                // 08 and 09 are neither octal nor decimal
                b'8' | b'9' => None,
                _ => Some(self.pop_integer_or_exponent(end)),
            };
        }

        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if bytes.get(end) == Some(&b'.') {
            return Some(self.pop_decimal(end + 1));
        }
        Some(self.pop_integer_or_exponent(end))
    }

    /// Pop an integer ending at `end`, or a decimal if an exponent follows it.
    fn pop_integer_or_exponent(&mut self, end: usize) -> Token<'a> {
        match self.exponent_end(end) {
            Some(exp_end) => self.pop(CODE_NUMBER_DECIMAL, exp_end),
            None => self.pop(CODE_NUMBER_INTEGER, end),
        }
    }

    /// Pop a decimal whose fraction digits start at `end`.
    fn pop_decimal(&mut self, mut end: usize) -> Token<'a> {
        let bytes = self.rest.as_bytes();
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        let end = self.exponent_end(end).unwrap_or(end);
        self.pop(CODE_NUMBER_DECIMAL, end)
    }

    /// End of an exponent (`e`, optional sign, digits) starting at `start`, if any.
    fn exponent_end(&self, start: usize) -> Option<usize> {
        let bytes = self.rest.as_bytes();
        if bytes.get(start)? | 0x20 != b'e' {
            return None;
        }
        let mut end = start + 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        if !bytes.get(end)?.is_ascii_digit() {
            return None;
        }
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        Some(end)
    }

    /// End of the run made of the first character and the bytes after it matching `more`
    ///
    /// The first character is taken whole, even when it is multi-byte.
    fn run_end(&self, more: impl Fn(u8) -> bool) -> usize {
        let start = self.rest.chars().next().map_or(0, char::len_utf8);
        self.rest.as_bytes()[start..]
            .iter()
            .position(|&c| !more(c))
            .map_or(self.rest.len(), |i| start + i)
    }

    /// Pop a run of white space: bytes up to `' '` except `\n` and `\r`, and DEL.
    ///
    /// Assumes the first byte is white space.
    pub fn pop_whitespace(&mut self) -> Token<'a> {
        let end = self.run_end(is_whitespace);
        self.pop(token_type::TEXT_WHITESPACE, end)
    }

    /// Pop a run of `\n` and `\r`.
    ///
    /// Assumes the first byte is a newline.
    pub fn pop_newlines(&mut self) -> Token<'a> {
        let end = self.run_end(is_newline);
        self.pop(token_type::TEXT_NEWLINE, end)
    }

    /// Pop an identifier made of ASCII letters, digits and `_`.
    ///
    /// Assumes the first byte is an ASCII letter or `_`.
    pub fn pop_ascii_identifier(&mut self) -> Token<'a> {
        let end = self.run_end(|c| c == b'_' || c.is_ascii_alphanumeric());
        self.pop(CODE_IDENTIFIER, end)
    }
}

/// True for the bytes [`Cursor::pop_whitespace`] consumes.
#[must_use]
pub const fn is_whitespace(c: u8) -> bool {
    c == 0x7f || (c <= b' ' && !is_newline(c))
}

/// True for `\n` and `\r`.
#[must_use]
pub const fn is_newline(c: u8) -> bool {
    c == b'\n' || c == b'\r'
}
