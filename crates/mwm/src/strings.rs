//! Length-prefixed and multilingual string decoding.

use crate::constants::language_name;
use crate::cursor::Cursor;
use crate::error::Result;
use std::collections::HashMap;

/// Read `varuint() + (plain ? 0 : 1)` raw bytes. `plain` is only true for
/// tag-directory names.
pub(crate) fn read_string(cur: &mut Cursor, plain: bool) -> Result<Vec<u8>> {
    let len = cur.read_varuint() as usize + if plain { 0 } else { 1 };
    Ok(cur.take(len)?.to_vec())
}

pub(crate) fn read_str(cur: &mut Cursor, plain: bool) -> Result<String> {
    let bytes = read_string(cur, plain)?;
    Ok(std::str::from_utf8(&bytes)?.to_string())
}

/// `read_uint_array`: a varuint-prefixed list of varuints.
pub(crate) fn read_uint_array(cur: &mut Cursor) -> Vec<u64> {
    let len = cur.read_varuint() as usize;
    (0..len).map(|_| cur.read_varuint()).collect()
}

/// A varuint `s` whose low bit distinguishes an inline decimal integer
/// (`s` odd, value is `s >> 1` formatted as decimal) from a string payload
/// (`s` even, length is `(s >> 1) + 1` UTF-8 bytes).
pub(crate) fn read_numeric_string(cur: &mut Cursor) -> Result<String> {
    let s = cur.read_varuint();
    if s & 1 != 0 {
        Ok((s >> 1).to_string())
    } else {
        let len = (s >> 1) + 1;
        let bytes = cur.take(len as usize)?;
        Ok(std::str::from_utf8(bytes)?.to_string())
    }
}

/// Scan a multilingual-string byte buffer into a language-tag -> text map.
///
/// Each sub-record begins with a header byte whose low 6 bits are a
/// language index and whose high 2 bits are never `10`; everything up to
/// the next header byte (recognized by walking UTF-8 lead-byte widths) is
/// that language's UTF-8 payload. Unknown language indices are dropped.
pub(crate) fn read_multilang(cur: &mut Cursor) -> Result<HashMap<String, String>> {
    let bytes = read_string(cur, false)?;
    let mut result = HashMap::new();
    let mut i = 0usize;
    while i < bytes.len() {
        let next = find_multilang_next(&bytes, i);
        let lang_idx = (bytes[i] & 0x3F) as u64;
        if let Some(tag) = language_name(lang_idx) {
            let end = next.min(bytes.len());
            if let Ok(text) = std::str::from_utf8(&bytes[i + 1..end]) {
                result.insert(tag.to_string(), text.to_string());
            }
        }
        i = next;
    }
    Ok(result)
}

fn find_multilang_next(s: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < s.len() {
        let c = s[i];
        if c & 0xC0 == 0x80 {
            break;
        }
        if c & 0x80 == 0 {
            // ASCII continuation byte of the payload, nothing to skip.
        } else if c & 0xFE == 0xFE {
            i += 6;
        } else if c & 0xFC == 0xFC {
            i += 5;
        } else if c & 0xF8 == 0xF8 {
            i += 4;
        } else if c & 0xF0 == 0xF0 {
            i += 3;
        } else if c & 0xE0 == 0xE0 {
            i += 2;
        } else if c & 0xC0 == 0xC0 {
            i += 1;
        }
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cur(bytes: &[u8]) -> Cursor {
        Cursor::new(bytes, 0)
    }

    #[test]
    fn multilang_literal_example() {
        // default="Hi", en="Bonjour"
        let mut payload = vec![0x00];
        payload.extend_from_slice(b"Hi");
        payload.push(0x01);
        payload.extend_from_slice(b"Bonjour");

        // read_string(plain=false) expects len = varuint + 1, so encode len-1 here.
        let mut encoded = Vec::new();
        encoded.push((payload.len() - 1) as u8);
        encoded.extend_from_slice(&payload);

        let mut c = cur(&encoded);
        let map = read_multilang(&mut c).unwrap();
        assert_eq!(map.get("default").map(String::as_str), Some("Hi"));
        assert_eq!(map.get("en").map(String::as_str), Some("Bonjour"));
    }

    #[test]
    fn numeric_string_inline_integer() {
        // s = 7 (odd) -> value 3
        let mut c = cur(&[0x07]);
        assert_eq!(read_numeric_string(&mut c).unwrap(), "3");
    }

    #[test]
    fn numeric_string_payload() {
        // s = 4 (even) -> length (4>>1)+1 = 3 bytes "abc"
        let mut data = vec![0x04];
        data.extend_from_slice(b"abc");
        let mut c = cur(&data);
        assert_eq!(read_numeric_string(&mut c).unwrap(), "abc");
    }
}
