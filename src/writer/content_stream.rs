//! Page content stream accumulation.
//!
//! A [`ContentStream`] is an append-only buffer of operator records for one
//! page. It knows its own size but nothing about where it will land in the
//! output file; the page writer drains it in one piece at page end.

use super::object_serializer::{encode_name, encode_string, format_real, EOL};
use bytes::{Bytes, BytesMut};

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f64, f64, f64, f64, f64, f64),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f64),
    /// Move text position (Td)
    MoveText(f64, f64),
    /// Show text (Tj); bytes are already in the font's encoding
    ShowText(Vec<u8>),
    /// Set fill color RGB (rg)
    SetFillColorRGB(f64, f64, f64),
    /// Set stroke color RGB (RG)
    SetStrokeColorRGB(f64, f64, f64),
    /// Set line width (w)
    SetLineWidth(f64),
    /// Move to (m)
    MoveTo(f64, f64),
    /// Line to (l)
    LineTo(f64, f64),
    /// Close path (h)
    ClosePath,
    /// Stroke (S)
    Stroke,
    /// Fill using the even-odd rule (f*)
    FillEvenOdd,
    /// Fill using the even-odd rule, then stroke (B*)
    FillStrokeEvenOdd,
    /// Paint XObject (Do)
    PaintXObject(String),
}

/// Append-only buffer of content stream records.
#[derive(Debug, Default, Clone)]
pub struct ContentStream {
    buffer: BytesMut,
}

impl ContentStream {
    /// Create an empty content stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes.
    pub fn append(&mut self, bytes: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(bytes);
        self
    }

    /// Append `operands... operator` as one record.
    ///
    /// Operands are written in fixed-point notation; the format has no
    /// exponent syntax.
    pub fn append_operator(&mut self, operator: &str, operands: &[f64]) -> &mut Self {
        for &operand in operands {
            self.buffer.extend_from_slice(format_real(operand).as_bytes());
            self.buffer.extend_from_slice(b" ");
        }
        self.buffer.extend_from_slice(operator.as_bytes());
        self.buffer.extend_from_slice(EOL);
        self
    }

    /// Append one operation.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        match op {
            ContentStreamOp::SaveState => self.append_operator("q", &[]),
            ContentStreamOp::RestoreState => self.append_operator("Q", &[]),
            ContentStreamOp::Transform(a, b, c, d, e, f) => {
                self.append_operator("cm", &[a, b, c, d, e, f])
            },
            ContentStreamOp::BeginText => self.append_operator("BT", &[]),
            ContentStreamOp::EndText => self.append_operator("ET", &[]),
            ContentStreamOp::SetFont(name, size) => {
                self.buffer.extend_from_slice(&encode_name(&name));
                self.buffer.extend_from_slice(b" ");
                self.append_operator("Tf", &[size])
            },
            ContentStreamOp::MoveText(tx, ty) => self.append_operator("Td", &[tx, ty]),
            ContentStreamOp::ShowText(text) => {
                self.buffer.extend_from_slice(&encode_string(&text));
                self.buffer.extend_from_slice(b" ");
                self.append_operator("Tj", &[])
            },
            ContentStreamOp::SetFillColorRGB(r, g, b) => self.append_operator("rg", &[r, g, b]),
            ContentStreamOp::SetStrokeColorRGB(r, g, b) => self.append_operator("RG", &[r, g, b]),
            ContentStreamOp::SetLineWidth(width) => self.append_operator("w", &[width]),
            ContentStreamOp::MoveTo(x, y) => self.append_operator("m", &[x, y]),
            ContentStreamOp::LineTo(x, y) => self.append_operator("l", &[x, y]),
            ContentStreamOp::ClosePath => self.append_operator("h", &[]),
            ContentStreamOp::Stroke => self.append_operator("S", &[]),
            ContentStreamOp::FillEvenOdd => self.append_operator("f*", &[]),
            ContentStreamOp::FillStrokeEvenOdd => self.append_operator("B*", &[]),
            ContentStreamOp::PaintXObject(name) => {
                self.buffer.extend_from_slice(&encode_name(&name));
                self.buffer.extend_from_slice(b" ");
                self.append_operator("Do", &[])
            },
        }
    }

    /// Append several operations in order.
    pub fn ops(&mut self, ops: impl IntoIterator<Item = ContentStreamOp>) -> &mut Self {
        for op in ops {
            self.op(op);
        }
        self
    }

    /// Number of bytes accumulated.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing has been appended since the last clear.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Snapshot of the accumulated bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Discard all content.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Take the accumulated bytes, leaving the stream empty.
    pub fn take(&mut self) -> Bytes {
        self.buffer.split().freeze()
    }
}
