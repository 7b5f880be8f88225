//! The `rgninfo` section: a flat key/value table keyed by a small index
//! into [`REGION_DATA_KEYS`](crate::constants::REGION_DATA_KEYS), with one
//! key (`languages`) using a different wire shape than the rest: a raw byte
//! string whose bytes are themselves language-table indices, rather than a
//! UTF-8 payload.

use crate::constants::{language_name, region_data_key};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::strings::read_string;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionValue {
    Text(String),
    Languages(Vec<String>),
}

pub(crate) fn read_region_info(data: &[u8]) -> Result<HashMap<String, RegionValue>> {
    let mut cur = Cursor::new(data, 0);
    let mut result = HashMap::new();

    let count = cur.read_varuint();
    for _ in 0..count {
        let idx = cur.read_varuint();
        let key = region_data_key(idx);
        let raw = read_string(&mut cur, false)?;
        let value = if key == "languages" {
            RegionValue::Languages(
                raw.iter().filter_map(|&b| language_name(b as u64)).map(str::to_string).collect(),
            )
        } else {
            RegionValue::Text(std::str::from_utf8(&raw)?.to_string())
        };
        result.insert(key, value);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_text_and_languages_entries() {
        let mut data = vec![2u8]; // count = 2
        // driving = "right" (idx 1, plain=false so len-1 prefix)
        data.push(1);
        data.push(4); // len-1 for "right" (5 bytes)
        data.extend_from_slice(b"right");
        // languages = bytes [1] meaning language index 1 = "en" (key idx 0)
        data.push(0);
        data.push(0); // len-1 for a 1-byte string
        data.push(1); // language index 1 = "en"

        let result = read_region_info(&data).unwrap();
        assert_eq!(result.get("driving"), Some(&RegionValue::Text("right".to_string())));
        assert_eq!(
            result.get("languages"),
            Some(&RegionValue::Languages(vec!["en".to_string()]))
        );
    }

    #[test]
    fn stops_after_declared_count_even_if_bytes_remain() {
        let mut data = vec![1u8]; // count = 1
        data.push(2); // timezone (idx 2)
        data.push(2); // len-1 for "UTC" (3 bytes)
        data.extend_from_slice(b"UTC");
        data.push(0xFF); // trailing junk, never parsed

        let result = read_region_info(&data).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("timezone"), Some(&RegionValue::Text("UTC".to_string())));
    }
}
