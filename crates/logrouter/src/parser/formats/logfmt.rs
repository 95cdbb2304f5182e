use std::iter::Peekable;
use std::str::CharIndices;

use serde_json::Value;

use crate::parser::traits::*;
use crate::parser::{check_size, MAX_LINE_SIZE};

type Scanner<'a> = Peekable<CharIndices<'a>>;

/// Logfmt decoder.
///
/// Every `key=value` token on the line becomes one string entry. Values may
/// be double-quoted to carry whitespace; quoted values use JSON escapes. A
/// bare `key` with no `=` is kept with an empty value. Any malformed token
/// fails the whole line.
pub struct LogfmtDecoder {
    max_line_bytes: usize,
}

impl LogfmtDecoder {
    pub fn new() -> Self {
        Self::with_limit(MAX_LINE_SIZE)
    }

    pub fn with_limit(max_line_bytes: usize) -> Self {
        Self { max_line_bytes }
    }
}

impl Default for LogfmtDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldDecoder for LogfmtDecoder {
    fn decode(&self, line: &str) -> Result<DecodedLine, DecodeError> {
        check_size(line, self.max_line_bytes)?;
        parse_pairs(line).map(DecodedLine::from_fields)
    }

    fn format(&self) -> InputFormat {
        InputFormat::Logfmt
    }

    fn max_line_bytes(&self) -> Option<usize> {
        Some(self.max_line_bytes)
    }
}

fn invalid(pos: usize, reason: &'static str) -> DecodeError {
    DecodeError::InvalidLogfmt { column: pos + 1, reason }
}

fn parse_pairs(text: &str) -> Result<Fields, DecodeError> {
    let mut chars = text.char_indices().peekable();
    let mut fields = Fields::new();

    loop {
        while chars.peek().map_or(false, |&(_, c)| c.is_whitespace()) {
            chars.next();
        }

        let Some(&(start, first)) = chars.peek() else {
            break;
        };
        if first == '=' {
            return Err(invalid(start, "missing key before '='"));
        }

        let mut key = String::new();
        while let Some(&(pos, c)) = chars.peek() {
            if c == '=' || c.is_whitespace() {
                break; // Stop peeking, do not consume
            }
            if c == '"' {
                return Err(invalid(pos, "unexpected '\"' in key"));
            }
            key.push(c);
            chars.next();
        }

        let value = if chars.next_if(|&(_, c)| c == '=').is_some() {
            match chars.peek() {
                Some(&(open, '"')) => {
                    chars.next(); // Consume opening quote
                    let value = read_quoted(&mut chars, open)?;
                    if let Some(&(pos, c)) = chars.peek() {
                        if !c.is_whitespace() {
                            return Err(invalid(pos, "expected whitespace after closing quote"));
                        }
                    }
                    value
                }
                _ => read_unquoted(&mut chars)?,
            }
        } else {
            String::new()
        };

        fields.insert(key, Value::String(value));
    }

    Ok(fields)
}

fn read_unquoted(chars: &mut Scanner<'_>) -> Result<String, DecodeError> {
    let mut val = String::new();
    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            break;
        }
        if c == '"' {
            return Err(invalid(pos, "unexpected '\"' in unquoted value"));
        }
        val.push(c);
        chars.next();
    }
    Ok(val)
}

fn read_quoted(chars: &mut Scanner<'_>, open: usize) -> Result<String, DecodeError> {
    let mut val = String::new();

    while let Some((pos, c)) = chars.next() {
        match c {
            '"' => return Ok(val),
            '\\' => {
                let Some((_, esc)) = chars.next() else {
                    break;
                };
                match esc {
                    '"' => val.push('"'),
                    '\\' => val.push('\\'),
                    '/' => val.push('/'),
                    'b' => val.push('\u{8}'),
                    'f' => val.push('\u{c}'),
                    'n' => val.push('\n'),
                    'r' => val.push('\r'),
                    't' => val.push('\t'),
                    'u' => val.push(read_unicode_escape(chars, pos)?),
                    _ => return Err(invalid(pos, "invalid escape sequence")),
                }
            }
            _ => val.push(c),
        }
    }

    Err(invalid(open, "unterminated quoted value"))
}

fn read_hex4(chars: &mut Scanner<'_>, pos: usize) -> Result<u32, DecodeError> {
    let mut code = 0u32;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or_else(|| invalid(pos, "invalid unicode escape"))?;
        code = code * 16 + digit;
    }
    Ok(code)
}

/// Reads the `XXXX` after `\u`, combining UTF-16 surrogate pairs.
fn read_unicode_escape(chars: &mut Scanner<'_>, pos: usize) -> Result<char, DecodeError> {
    let high = read_hex4(chars, pos)?;
    let code = if (0xD800..=0xDBFF).contains(&high) {
        let backslash = chars.next().map(|(_, c)| c);
        let u = chars.next().map(|(_, c)| c);
        if backslash != Some('\\') || u != Some('u') {
            return Err(invalid(pos, "unpaired surrogate in unicode escape"));
        }
        let low = read_hex4(chars, pos)?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(invalid(pos, "unpaired surrogate in unicode escape"));
        }
        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
    } else {
        high
    };

    char::from_u32(code).ok_or_else(|| invalid(pos, "invalid unicode escape"))
}
