//! Helpers for inspecting written documents.

#![allow(dead_code)]

/// Position of the first occurrence of `needle`.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Position of the last occurrence of `needle`.
pub fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}

/// Number of non-overlapping occurrences of `needle`.
pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    let mut total = 0;
    let mut rest = haystack;
    while let Some(pos) = find(rest, needle) {
        total += 1;
        rest = &rest[pos + needle.len()..];
    }
    total
}

/// Offset stored after the `startxref` keyword.
pub fn startxref(bytes: &[u8]) -> usize {
    let keyword = rfind(bytes, b"startxref\r\n").expect("missing startxref");
    let tail = std::str::from_utf8(&bytes[keyword + 11..]).expect("tail is ASCII");
    let digits = tail.split("\r\n").next().expect("missing offset");
    digits.parse().expect("offset is numeric")
}

/// In-use cross-reference entries as (object number, offset), in table order.
pub fn parse_xref(bytes: &[u8]) -> Vec<(u32, u64)> {
    let start = startxref(bytes);
    let tail = std::str::from_utf8(&bytes[start..]).expect("xref section is ASCII");
    let mut lines = tail.split("\r\n");
    assert_eq!(lines.next(), Some("xref"));

    let mut entries = Vec::new();
    loop {
        let header = lines.next().expect("unterminated xref section");
        if header == "trailer" {
            break;
        }
        let mut parts = header.split(' ');
        let first: u32 = parts.next().unwrap().parse().unwrap();
        let count: u32 = parts.next().unwrap().parse().unwrap();
        for i in 0..count {
            let line = lines.next().expect("missing xref entry");
            assert_eq!(line.len(), 18, "entry {:?}", line);
            let offset: u64 = line[..10].parse().unwrap();
            if &line[17..] == "n" {
                entries.push((first + i, offset));
            }
        }
    }
    entries
}

/// Text of the trailer dictionary.
pub fn trailer(bytes: &[u8]) -> String {
    let start = rfind(bytes, b"trailer\r\n").expect("missing trailer");
    let end = rfind(bytes, b"startxref").expect("missing startxref");
    String::from_utf8(bytes[start..end].to_vec()).expect("trailer is ASCII")
}

/// Dictionary text and stream data of object `id`.
pub fn stream_object(bytes: &[u8], id: u32) -> (String, Vec<u8>) {
    let offset = parse_xref(bytes)
        .into_iter()
        .find(|(number, _)| *number == id)
        .map(|(_, offset)| offset as usize)
        .expect("object not in xref");
    let body = &bytes[offset..];
    let stream_kw = find(body, b">>\r\nstream\r\n").expect("not a stream object") + 2;
    let dict = String::from_utf8(body[..stream_kw].to_vec()).expect("dictionary is ASCII");

    let length_at = dict.find("/Length ").expect("missing /Length") + 8;
    let length: usize = dict[length_at..]
        .split("\r\n")
        .next()
        .unwrap()
        .parse()
        .unwrap();
    let data_start = stream_kw + b"\r\nstream\r\n".len();
    let data = body[data_start..data_start + length].to_vec();
    assert_eq!(
        &body[data_start + length..data_start + length + 21],
        b"\r\nendstream\r\nendobj\r\n"
    );
    (dict, data)
}

/// Text of non-stream object `id`, from its header to `endobj`.
pub fn object_text(bytes: &[u8], id: u32) -> String {
    let offset = parse_xref(bytes)
        .into_iter()
        .find(|(number, _)| *number == id)
        .map(|(_, offset)| offset as usize)
        .expect("object not in xref");
    let body = &bytes[offset..];
    let end = find(body, b"endobj\r\n").expect("missing endobj") + 8;
    String::from_utf8(body[..end].to_vec()).expect("object is ASCII")
}
