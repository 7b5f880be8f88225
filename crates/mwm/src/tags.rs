//! The tag directory: a flat index of named sections inside an MWM
//! container, each bounded by a byte offset and length. Every section
//! reader borrows a [`Cursor`](crate::cursor::Cursor) seeked to its tag's
//! start and is handed the tag's bound, so "never read past the tag's
//! declared end" is enforced once here rather than by each reader.

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::strings::read_str;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntry {
    pub offset: u64,
    pub length: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TagDirectory(HashMap<String, TagEntry>);

impl TagDirectory {
    /// Parse the directory out of `data`: an 8-byte pointer at offset 0
    /// names where the directory itself starts; from there it is a varuint
    /// count followed by that many `(name, offset, length)` records, each
    /// field varuint except the plain (non-multilang) length-prefixed name.
    pub(crate) fn parse(data: &[u8]) -> Result<Self> {
        let mut cur = Cursor::new(data, 0);
        let dir_offset = cur.read_uint(8)?;
        cur.seek(dir_offset as usize);

        let count = cur.read_varuint();
        let mut entries = HashMap::with_capacity(count as usize);
        for _ in 0..count {
            let name = read_str(&mut cur, true)?;
            let offset = cur.read_varuint();
            let length = cur.read_varuint();
            if offset.checked_add(length).map_or(true, |end| end > data.len() as u64) {
                return Err(Error::BadMagicOrLayout(format!(
                    "tag {name:?} bounds ({offset}, {length}) exceed container size {}",
                    data.len()
                )));
            }
            entries.insert(name, TagEntry { offset, length });
        }
        Ok(TagDirectory(entries))
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.0.get(name).map_or(false, |e| e.length > 0)
    }

    pub(crate) fn get(&self, name: &str) -> Option<TagEntry> {
        self.0.get(name).copied()
    }

    pub fn tags(&self) -> impl Iterator<Item = (&str, &TagEntry)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_entry(name: &str, offset: u64, length: u64) -> Vec<u8> {
        let mut out = vec![name.len() as u8];
        out.extend_from_slice(name.as_bytes());
        out.push(offset as u8);
        out.push(length as u8);
        out
    }

    /// Wraps a directory body in the leading 8-byte pointer every real
    /// container carries, so tests exercise the same entry point `Reader`
    /// uses.
    fn container_with_directory(body: &[u8]) -> Vec<u8> {
        let mut data = 8u64.to_le_bytes().to_vec();
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn parses_entries_and_validates_bounds() {
        let mut body = vec![1u8]; // count = 1
        body.extend_from_slice(&encode_entry("version", 0, 4));
        let data = container_with_directory(&body);

        let dir = TagDirectory::parse(&data).unwrap();
        assert!(dir.has_tag("version"));
        assert_eq!(dir.get("version"), Some(TagEntry { offset: 0, length: 4 }));
        assert!(!dir.has_tag("header"));
    }

    #[test]
    fn empty_tag_is_not_has_tag() {
        let mut body = vec![1u8];
        body.extend_from_slice(&encode_entry("chrysler", 0, 0));
        let data = container_with_directory(&body);

        let dir = TagDirectory::parse(&data).unwrap();
        assert!(!dir.has_tag("chrysler"));
    }

    #[test]
    fn rejects_out_of_bounds_entry() {
        let mut body = vec![1u8];
        body.extend_from_slice(&encode_entry("version", 0, 9999));
        let data = container_with_directory(&body);

        assert!(TagDirectory::parse(&data).is_err());
    }
}
