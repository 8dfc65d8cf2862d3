//! Decoder for PHP `serialize()` payloads
//!
//! The legacy proposal system stored each proposal's justifications as a
//! serialized PHP object. This module parses that wire format into a
//! [`PhpValue`] tree and flattens a top-level array or object into ordered
//! [`Justifications`], discarding the class name.
//!
//! Supported tokens:
//!
//! | token | form |
//! |-------|------|
//! | null | `N;` |
//! | bool | `b:0;` / `b:1;` |
//! | int | `i:42;` |
//! | float | `d:1.5;` |
//! | string | `s:<byte len>:"...";` |
//! | array | `a:<count>:{<key><value>...}` |
//! | object | `O:<len>:"<class>":<count>:{<key><value>...}` |
//!
//! References (`r:` / `R:`) and custom serialization (`C:`) are rejected.

use crate::error::{ArchiveError, ArchiveResult};
use crate::models::Justifications;

/// Deepest array/object nesting accepted before the payload is rejected
pub const MAX_DEPTH: usize = 32;

/// A decoded PHP value
#[derive(Debug, Clone, PartialEq)]
pub enum PhpValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<(PhpValue, PhpValue)>),
    Object {
        class: String,
        fields: Vec<(PhpValue, PhpValue)>,
    },
}

impl PhpValue {
    /// Render a scalar as text; `None` for arrays and objects
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => Some(String::new()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Str(s) => Some(s.clone()),
            Self::Array(_) | Self::Object { .. } => None,
        }
    }
}

/// Parse a complete serialized value
pub fn unserialize(input: &str) -> ArchiveResult<PhpValue> {
    let mut parser = Parser::new(input.as_bytes());
    let value = parser.value()?;
    parser.skip_whitespace();
    if parser.pos != parser.input.len() {
        return Err(ArchiveError::decode(parser.pos, "trailing data after value"));
    }
    Ok(value)
}

/// Decode a justification payload into an ordered field → text mapping
pub fn decode_justifications(payload: &str) -> ArchiveResult<Justifications> {
    let fields = match unserialize(payload)? {
        PhpValue::Array(entries) => entries,
        PhpValue::Object { fields, .. } => fields,
        other => {
            return Err(ArchiveError::decode(
                0,
                format!("expected array or object, found {:?}", other),
            ));
        }
    };

    let mut out = Justifications::new();
    for (key, value) in fields {
        let name = match key.as_text() {
            Some(name) => strip_visibility(&name).to_string(),
            None => return Err(ArchiveError::decode(0, "composite key")),
        };
        let text = value
            .as_text()
            .ok_or_else(|| ArchiveError::decode(0, format!("nested value for '{}'", name)))?;
        out.insert(name, text);
    }
    Ok(out)
}

/// Drop the `\0*\0` (protected) or `\0Class\0` (private) property prefix
fn strip_visibility(name: &str) -> &str {
    match name.strip_prefix('\0') {
        Some(rest) => match rest.find('\0') {
            Some(idx) => &rest[idx + 1..],
            None => name,
        },
        None => name,
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&self) -> ArchiveResult<u8> {
        self.input
            .get(self.pos)
            .copied()
            .ok_or_else(|| ArchiveError::decode(self.pos, "unexpected end of input"))
    }

    fn expect(&mut self, byte: u8) -> ArchiveResult<()> {
        let found = self.peek()?;
        if found != byte {
            return Err(ArchiveError::decode(
                self.pos,
                format!("expected '{}', found '{}'", byte as char, found as char),
            ));
        }
        self.pos += 1;
        Ok(())
    }

    /// Consume bytes up to (not including) `delim`, then skip the delimiter
    fn until(&mut self, delim: u8) -> ArchiveResult<&'a str> {
        let input = self.input;
        let start = self.pos;
        let len = input[start..]
            .iter()
            .position(|b| *b == delim)
            .ok_or_else(|| ArchiveError::decode(start, format!("missing '{}'", delim as char)))?;
        self.pos = start + len + 1;
        std::str::from_utf8(&input[start..start + len])
            .map_err(|e| ArchiveError::decode(start, e.to_string()))
    }

    fn number<T: std::str::FromStr>(&mut self, delim: u8) -> ArchiveResult<T> {
        let start = self.pos;
        let text = self.until(delim)?;
        text.parse()
            .map_err(|_| ArchiveError::decode(start, format!("invalid number '{}'", text)))
    }

    fn value(&mut self) -> ArchiveResult<PhpValue> {
        let start = self.pos;
        let tag = self.peek()?;
        self.pos += 1;
        match tag {
            b'N' => {
                self.expect(b';')?;
                Ok(PhpValue::Null)
            }
            b'b' => {
                self.expect(b':')?;
                match self.number::<u8>(b';')? {
                    0 => Ok(PhpValue::Bool(false)),
                    1 => Ok(PhpValue::Bool(true)),
                    n => Err(ArchiveError::decode(start, format!("invalid bool {}", n))),
                }
            }
            b'i' => {
                self.expect(b':')?;
                Ok(PhpValue::Int(self.number(b';')?))
            }
            b'd' => {
                self.expect(b':')?;
                Ok(PhpValue::Float(self.number(b';')?))
            }
            b's' => {
                self.expect(b':')?;
                let s = self.string_body()?;
                self.expect(b';')?;
                Ok(PhpValue::Str(s))
            }
            b'a' => {
                self.expect(b':')?;
                Ok(PhpValue::Array(self.entries()?))
            }
            b'O' => {
                self.expect(b':')?;
                let class = self.string_body()?;
                self.expect(b':')?;
                let fields = self.entries()?;
                Ok(PhpValue::Object { class, fields })
            }
            other => Err(ArchiveError::decode(
                start,
                format!("unsupported token '{}'", other as char),
            )),
        }
    }

    /// `<len>:"<bytes>"` with the length counted in bytes
    fn string_body(&mut self) -> ArchiveResult<String> {
        let len: usize = self.number(b':')?;
        self.expect(b'"')?;
        let input = self.input;
        let start = self.pos;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= input.len())
            .ok_or_else(|| ArchiveError::decode(start, "string runs past end of input"))?;
        let text = std::str::from_utf8(&input[start..end])
            .map_err(|e| ArchiveError::decode(start, e.to_string()))?;
        self.pos = end;
        self.expect(b'"')?;
        Ok(text.to_string())
    }

    /// `<count>:{<key><value>...}`
    fn entries(&mut self) -> ArchiveResult<Vec<(PhpValue, PhpValue)>> {
        if self.depth >= MAX_DEPTH {
            return Err(ArchiveError::decode(
                self.pos,
                format!("nesting deeper than {} levels", MAX_DEPTH),
            ));
        }
        self.depth += 1;
        let entries = self.entry_list();
        self.depth -= 1;
        entries
    }

    fn entry_list(&mut self) -> ArchiveResult<Vec<(PhpValue, PhpValue)>> {
        let count: usize = self.number(b':')?;
        self.expect(b'{')?;
        let mut entries = Vec::new();
        for _ in 0..count {
            let key_pos = self.pos;
            let key = self.value()?;
            if !matches!(key, PhpValue::Int(_) | PhpValue::Str(_)) {
                return Err(ArchiveError::decode(key_pos, "keys must be int or string"));
            }
            let value = self.value()?;
            entries.push((key, value));
        }
        self.expect(b'}')?;
        Ok(entries)
    }
}
