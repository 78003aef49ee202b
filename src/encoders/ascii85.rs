//! ASCII85 (Base85) encoding and decoding.
//!
//! Every 4 input bytes become 5 characters in the range '!' to 'u'.
//! Special case: a group of four zero bytes is written as a single 'z'.
//! Encoded output is wrapped into lines and terminated with `~>`.

use crate::encoders::StreamEncoder;
use crate::error::{Error, Result};

/// Maximum number of characters on one encoded line.
const LINE_WIDTH: usize = 72;

/// End-of-data marker.
const EOD: &[u8] = b"~>";

const EOL: &[u8] = b"\r\n";

/// ASCII85 encoder.
///
/// Holds the output buffer and the partially filled group between bytes.
/// State is reset at the start of every [`encode`](StreamEncoder::encode)
/// call, so an instance can be reused for successive streams.
#[derive(Debug, Default)]
pub struct Ascii85Encoder {
    output: Vec<u8>,
    column: usize,
    tuple: u32,
    count: usize,
}

impl Ascii85Encoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, capacity: usize) {
        self.output = Vec::with_capacity(capacity);
        self.column = 0;
        self.tuple = 0;
        self.count = 0;
    }

    fn push_byte(&mut self, byte: u8) {
        self.tuple |= u32::from(byte) << (24 - 8 * self.count);
        self.count += 1;
        if self.count == 4 {
            if self.tuple == 0 {
                self.emit(b'z');
            } else {
                self.emit_tuple(4);
            }
            self.tuple = 0;
            self.count = 0;
        }
    }

    /// Emit the high-order `count + 1` base-85 digits of the current tuple.
    fn emit_tuple(&mut self, count: usize) {
        let mut digits = [0u8; 5];
        let mut value = self.tuple;
        for digit in digits.iter_mut().rev() {
            *digit = (value % 85) as u8;
            value /= 85;
        }
        for &digit in &digits[..=count] {
            self.emit(digit + b'!');
        }
    }

    fn emit(&mut self, c: u8) {
        if self.column == LINE_WIDTH {
            self.output.extend_from_slice(EOL);
            self.column = 0;
        }
        self.output.push(c);
        self.column += 1;
    }
}

impl StreamEncoder for Ascii85Encoder {
    fn encode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        // 5 characters per 4 bytes plus line breaks and the terminator.
        self.reset(input.len() / 4 * 5 + input.len() / 32 + 16);

        for &byte in input {
            self.push_byte(byte);
        }

        if self.count > 0 {
            let count = self.count;
            self.emit_tuple(count);
        }

        if self.column + EOD.len() > LINE_WIDTH {
            self.output.extend_from_slice(EOL);
        }
        self.output.extend_from_slice(EOD);
        self.output.extend_from_slice(EOL);

        self.tuple = 0;
        self.count = 0;
        self.column = 0;
        Ok(std::mem::take(&mut self.output))
    }

    fn filter_name(&self) -> &str {
        "ASCII85Decode"
    }
}

/// ASCII85 decoder, the inverse of [`Ascii85Encoder`].
pub struct Ascii85Decoder;

impl Ascii85Decoder {
    /// Decode ASCII85 data up to the `~>` marker. Whitespace is ignored.
    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() / 5 * 4 + 4);
        let mut acc: u32 = 0;
        let mut count = 0;

        for &byte in input {
            match byte {
                b'~' => break,
                b'z' => {
                    if count != 0 {
                        return Err(decode_error(
                            "'z' must not appear in the middle of a group",
                        ));
                    }
                    output.extend_from_slice(&[0, 0, 0, 0]);
                },
                b'!'..=b'u' => {
                    acc = acc
                        .checked_mul(85)
                        .and_then(|v| v.checked_add((byte - b'!') as u32))
                        .ok_or_else(|| decode_error("overflow in decoding"))?;
                    count += 1;

                    if count == 5 {
                        output.extend_from_slice(&acc.to_be_bytes());
                        acc = 0;
                        count = 0;
                    }
                },
                _ if byte.is_ascii_whitespace() => {},
                _ => {
                    return Err(decode_error(&format!(
                        "invalid character '{}'",
                        byte as char
                    )));
                },
            }
        }

        if count > 0 {
            if count == 1 {
                return Err(decode_error("incomplete group (need at least 2 characters)"));
            }

            // Pad with 'u' (84) to complete the group.
            for _ in count..5 {
                acc = acc
                    .checked_mul(85)
                    .and_then(|v| v.checked_add(84))
                    .ok_or_else(|| decode_error("overflow in padding"))?;
            }

            let bytes = acc.to_be_bytes();
            output.extend_from_slice(&bytes[..count - 1]);
        }

        Ok(output)
    }
}

fn decode_error(reason: &str) -> Error {
    Error::InvalidInput(format!("ASCII85Decode: {}", reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(data: &[u8]) -> Vec<u8> {
        Ascii85Encoder::new().encode(data).unwrap()
    }

    #[test]
    fn test_encode_full_group() {
        assert_eq!(encode(b"Test"), b"<+U,m~>\r\n");
    }

    #[test]
    fn test_encode_zero_group_shortcut() {
        assert_eq!(encode(&[0, 0, 0, 0]), b"z~>\r\n");
        assert_eq!(encode(&[0; 8]), b"zz~>\r\n");
    }

    #[test]
    fn test_encode_partial_group_emits_count_plus_one() {
        // One leftover byte produces two characters, three produce four.
        assert_eq!(encode(b"T"), b";u~>\r\n");
        let three = encode(b"Tes");
        assert_eq!(&three[..three.len() - 4], b"<+U+");
    }

    #[test]
    fn test_partial_zero_bytes_are_not_shortened() {
        assert_eq!(encode(&[0]), b"!!~>\r\n");
    }

    #[test]
    fn test_encode_empty_still_terminates() {
        assert_eq!(encode(b""), b"~>\r\n");
    }

    #[test]
    fn test_lines_wrap_at_width() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let encoded = encode(&data);
        let text = std::str::from_utf8(&encoded).unwrap();
        for line in text.split("\r\n") {
            assert!(line.len() <= LINE_WIDTH, "line too long: {}", line.len());
        }
        assert!(text.ends_with("~>\r\n"));
        assert!(encoded.iter().all(|&b| b.is_ascii() && b != 0));
    }

    #[test]
    fn test_terminator_moves_to_new_line_near_width() {
        // 14 groups = 70 characters; "~>" would reach column 72 and fits.
        let fits = encode(&[1u8; 56]);
        assert!(fits.ends_with(b"~>\r\n"));
        assert_eq!(fits.iter().filter(|&&b| b == b'\n').count(), 1);

        // 72 characters leave no room for the marker.
        let mut data = vec![1u8; 56];
        data.push(1);
        let wrapped = encode(&data);
        assert_eq!(wrapped.iter().filter(|&&b| b == b'\n').count(), 2);
        assert!(wrapped.ends_with(b"\r\n~>\r\n"));
    }

    #[test]
    fn test_encoder_is_restartable() {
        let mut encoder = Ascii85Encoder::new();
        let first = encoder.encode(b"Te").unwrap();
        let second = encoder.encode(b"Te").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_trip_small_lengths() {
        let decoder = Ascii85Decoder;
        for len in 0..=4 {
            let data: Vec<u8> = (1..=len as u8).map(|b| b.wrapping_mul(73)).collect();
            assert_eq!(decoder.decode(&encode(&data)).unwrap(), data, "len {}", len);
        }
    }

    #[test]
    fn test_round_trip_with_zero_group() {
        let data = [1u8, 2, 3, 4, 0, 0, 0, 0, 250, 251, 252, 253];
        let encoded = encode(&data);
        assert!(encoded.contains(&b'z'));
        assert_eq!(Ascii85Decoder.decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_decode_z_special_case() {
        assert_eq!(Ascii85Decoder.decode(b"z").unwrap(), b"\x00\x00\x00\x00");
    }

    #[test]
    fn test_decode_with_whitespace() {
        assert_eq!(Ascii85Decoder.decode(b"<+U ,m").unwrap(), b"Test");
    }

    #[test]
    fn test_decode_invalid_character() {
        assert!(Ascii85Decoder.decode(b"Hello\x00").is_err());
    }

    #[test]
    fn test_decode_z_in_middle() {
        assert!(Ascii85Decoder.decode(b"!z").is_err());
    }

    #[test]
    fn test_decode_single_char() {
        assert!(Ascii85Decoder.decode(b"!").is_err());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(Ascii85Encoder::new().filter_name(), "ASCII85Decode");
    }
}
