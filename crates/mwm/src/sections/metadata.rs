//! `metaidx` + `meta`: a sparse feature-id -> key/value table.
//!
//! `metaidx` is an unsorted `(feature_id, meta_offset)` index; `meta` is a
//! flat stream of records with no length prefix of their own. Matching one
//! to the other is a single forward sweep: walk `meta` front to back
//! parsing one record at a time, and for each record's starting offset,
//! advance through `metaidx` (sorted by offset) until its next entry's
//! offset is no longer less than the record's offset. An exact match
//! assigns the record to that feature id; records with no match are still
//! fully parsed (to stay aligned with the next record) but discarded.

use crate::constants::metadata_key;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::strings::read_str;
use std::collections::HashMap;

/// Containers built before format 8 store each field as
/// `{tag_and_terminator: u8, length: u8, length bytes}` instead of the
/// varuint-keyed `{count, (key, string)*}` shape.
const LEGACY_KEY_FORMAT_THRESHOLD: u32 = 8;

pub(crate) fn read_metadata(
    metaidx: &[u8],
    meta: &[u8],
    fmt: u32,
) -> Result<HashMap<u32, HashMap<String, String>>> {
    let mut idx_cur = Cursor::new(metaidx, 0);
    let mut entries = Vec::new();
    while idx_cur.pos() < idx_cur.len() {
        let feature_id = idx_cur.read_uint(4)? as u32;
        let offset = idx_cur.read_uint(4)? as u32;
        entries.push((offset, feature_id));
    }
    entries.sort_by_key(|&(offset, _)| offset);

    let mut result = HashMap::new();
    let mut cur = Cursor::new(meta, 0);
    let mut ftpos = 0usize;

    while cur.pos() < cur.len() {
        let tag_pos = cur.pos() as u32;
        let fields = if fmt >= LEGACY_KEY_FORMAT_THRESHOLD {
            read_fields_v8(&mut cur)?
        } else {
            read_fields_legacy(&mut cur)?
        };

        if !fields.is_empty() {
            while ftpos < entries.len() && entries[ftpos].0 < tag_pos {
                ftpos += 1;
            }
            if ftpos < entries.len() && entries[ftpos].0 == tag_pos {
                result.insert(entries[ftpos].1, fields);
            }
        }
    }

    Ok(result)
}

fn apply_fuel_split(key: &str, value: String) -> String {
    if key == "fuel" {
        value.replace('\u{1}', ";")
    } else {
        value
    }
}

fn read_fields_v8(cur: &mut Cursor) -> Result<HashMap<String, String>> {
    let mut fields = HashMap::new();
    let count = cur.read_varuint();
    for _ in 0..count {
        let key_idx = cur.read_varuint();
        let key = metadata_key(key_idx);
        let value = read_str(cur, false)?;
        fields.insert(key.clone(), apply_fuel_split(&key, value));
    }
    Ok(fields)
}

fn read_fields_legacy(cur: &mut Cursor) -> Result<HashMap<String, String>> {
    let mut fields = HashMap::new();
    loop {
        let tag = cur.read_uint(1)? as u8;
        let is_last = tag & 0x80 != 0;
        let key = metadata_key((tag & 0x7F) as u64);
        let len = cur.read_uint(1)? as usize;
        let bytes = cur.take(len)?;
        let value = std::str::from_utf8(bytes)?.to_string();
        fields.insert(key.clone(), apply_fuel_split(&key, value));
        if is_last {
            break;
        }
    }
    Ok(fields)
}
