//! PDF object serialization.
//!
//! Serializes PDF objects to their byte representation. Top-level
//! dictionaries of indirect objects are written one entry per line; nested
//! values are written inline.

use crate::object::{Dictionary, Object, ObjectId};
use std::io::{self, Write};

/// End-of-line sequence used throughout the file.
pub(crate) const EOL: &[u8] = b"\r\n";

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Serializer for PDF objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a new object serializer.
    pub fn new() -> Self {
        Self
    }

    /// Write an indirect object definition.
    ///
    /// Format: `{id} 0 obj\r\n{object}\r\nendobj\r\n`
    pub fn write_indirect<W: Write>(&self, w: &mut W, id: ObjectId, obj: &Object) -> io::Result<()> {
        write!(w, "{} 0 obj\r\n", id)?;
        match obj {
            Object::Dictionary(dict) => self.write_block_dictionary(w, dict)?,
            other => self.write_object(w, other)?,
        }
        w.write_all(EOL)?;
        w.write_all(b"endobj")?;
        w.write_all(EOL)
    }

    /// Write an indirect stream object.
    ///
    /// `/Length` is appended to `dict` from the size of `data`, so callers
    /// never compute it themselves.
    pub fn write_stream<W: Write>(
        &self,
        w: &mut W,
        id: ObjectId,
        dict: &Dictionary,
        data: &[u8],
    ) -> io::Result<()> {
        let mut dict = dict.clone();
        dict.insert("Length".to_string(), Object::from(data.len()));

        write!(w, "{} 0 obj\r\n", id)?;
        self.write_block_dictionary(w, &dict)?;
        w.write_all(EOL)?;
        w.write_all(b"stream")?;
        w.write_all(EOL)?;
        w.write_all(data)?;
        w.write_all(EOL)?;
        w.write_all(b"endstream")?;
        w.write_all(EOL)?;
        w.write_all(b"endobj")?;
        w.write_all(EOL)
    }

    /// Write a dictionary with one entry per line.
    pub fn write_block_dictionary<W: Write>(&self, w: &mut W, dict: &Dictionary) -> io::Result<()> {
        w.write_all(b"<<")?;
        w.write_all(EOL)?;
        for (key, value) in dict {
            self.write_name(w, key)?;
            w.write_all(b" ")?;
            self.write_object(w, value)?;
            w.write_all(EOL)?;
        }
        w.write_all(b">>")
    }

    /// Write an object inline.
    pub fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> io::Result<()> {
        match obj {
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => self.write_real(w, *r),
            Object::String(s) => self.write_string(w, s),
            Object::HexString(s) => self.write_hex_string(w, s),
            Object::Name(n) => self.write_name(w, n),
            Object::Array(arr) => self.write_array(w, arr),
            Object::Dictionary(dict) => self.write_dictionary(w, dict),
            Object::Reference(id) => write!(w, "{} 0 R", id),
        }
    }

    /// Write a real number in fixed-point notation.
    ///
    /// PDF has no exponent syntax, so values are never written with `e`.
    /// Up to five decimals are kept and trailing zeros are trimmed.
    pub fn write_real<W: Write>(&self, w: &mut W, value: f64) -> io::Result<()> {
        w.write_all(format_real(value).as_bytes())
    }

    /// Write a PDF string.
    ///
    /// Uses literal string syntax `(...)` with proper escaping,
    /// or hex string syntax `<...>` for binary data.
    pub fn write_string<W: Write>(&self, w: &mut W, data: &[u8]) -> io::Result<()> {
        w.write_all(&encode_string(data))
    }

    /// Write a hex string `<...>`.
    pub fn write_hex_string<W: Write>(&self, w: &mut W, data: &[u8]) -> io::Result<()> {
        w.write_all(&encode_hex_string(data))
    }

    /// Write a PDF name.
    ///
    /// Names start with `/` and escape special characters with `#xx`.
    pub fn write_name<W: Write>(&self, w: &mut W, name: &str) -> io::Result<()> {
        w.write_all(&encode_name(name))
    }

    /// Write a PDF array.
    fn write_array<W: Write>(&self, w: &mut W, arr: &[Object]) -> io::Result<()> {
        w.write_all(b"[")?;
        for obj in arr {
            w.write_all(b" ")?;
            self.write_object(w, obj)?;
        }
        w.write_all(b" ]")
    }

    /// Write an inline dictionary.
    fn write_dictionary<W: Write>(&self, w: &mut W, dict: &Dictionary) -> io::Result<()> {
        w.write_all(b"<<")?;
        for (key, value) in dict {
            w.write_all(b" ")?;
            self.write_name(w, key)?;
            w.write_all(b" ")?;
            self.write_object(w, value)?;
        }
        w.write_all(b" >>")
    }
}

/// Encode a string as a literal `(...)` when every byte is printable,
/// otherwise as a hex string.
pub(crate) fn encode_string(data: &[u8]) -> Vec<u8> {
    let is_printable = data
        .iter()
        .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));
    if !is_printable {
        return encode_hex_string(data);
    }

    let mut out = Vec::with_capacity(data.len() + 2);
    out.push(b'(');
    for &byte in data {
        match byte {
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            _ => out.push(byte),
        }
    }
    out.push(b')');
    out
}

fn encode_hex_string(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() * 2 + 2);
    out.push(b'<');
    for &byte in data {
        out.push(HEX_DIGITS[usize::from(byte >> 4)]);
        out.push(HEX_DIGITS[usize::from(byte & 0x0F)]);
    }
    out.push(b'>');
    out
}

/// Encode a name with its leading `/`, escaping delimiters and
/// non-regular bytes as `#xx`.
pub(crate) fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(name.len() + 1);
    out.push(b'/');
    for byte in name.bytes() {
        match byte {
            b'!'
            | b'"'
            | b'$'..=b'&'
            | b'\''..=b'.'
            | b'0'..=b'9'
            | b';'
            | b'<'
            | b'>'
            | b'?'
            | b'@'
            | b'A'..=b'Z'
            | b'^'..=b'z'
            | b'|'
            | b'~' => out.push(byte),
            _ => {
                out.push(b'#');
                out.push(HEX_DIGITS[usize::from(byte >> 4)]);
                out.push(HEX_DIGITS[usize::from(byte & 0x0F)]);
            },
        }
    }
    out
}

/// Format a real number the way it appears in the file.
pub(crate) fn format_real(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        let formatted = format!("{:.0}", value);
        return if formatted == "-0" { "0".to_string() } else { formatted };
    }
    let formatted = format!("{:.5}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
