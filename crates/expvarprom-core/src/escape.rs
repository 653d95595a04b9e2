//! `\xNN` escape repair (panic-free, linear).
//!
//! Some expvar producers emit byte escapes such as `\xe2` inside JSON strings,
//! which the JSON grammar rejects. Every `\x` followed by two characters (any
//! characters except newline) is replaced by a single `?` before parsing. The
//! original byte is lost.

/// Replace each `\x..` occurrence with `?`. Never fails.
pub fn repair_escapes(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        if body[i] == b'\\' && body.get(i + 1) == Some(&b'x') {
            if let Some(end) = two_chars_from(body, i + 2) {
                out.push(b'?');
                i = end;
                continue;
            }
        }
        out.push(body[i]);
        i += 1;
    }
    out
}

/// End offset after two non-newline characters starting at `start`, if present.
fn two_chars_from(body: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    for _ in 0..2 {
        let b = *body.get(pos)?;
        if b == b'\n' {
            return None;
        }
        pos += char_width(body, pos);
    }
    Some(pos)
}

/// Width of the UTF-8 character at `pos`; an invalid sequence counts as one byte.
fn char_width(body: &[u8], pos: usize) -> usize {
    let want = match body[pos] {
        0x00..=0x7f => return 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return 1,
    };
    let end = pos + want;
    match body.get(pos..end) {
        Some(seq) if std::str::from_utf8(seq).is_ok() => want,
        _ => 1,
    }
}
