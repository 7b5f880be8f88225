//! The `osm2ft` sidecar file: a flat table of
//! `(osm_id: u64, feature_id: u32, filler: u32)` records mapping a
//! container's internal feature ids to the OpenStreetMap object they were
//! generated from, per `osm2ft.py::Osm2Ft`.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::osmid::{unpack_osm_id, OsmId, OsmIdKind};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    FeatureToOsm,
    OsmToFeature,
}

#[derive(Debug, Clone)]
pub struct Osm2FtIndex {
    direction: Direction,
    by_feature: Option<HashMap<u32, OsmId>>,
    by_osm: Option<HashMap<(OsmIdKind, u64), u32>>,
}

impl Osm2FtIndex {
    /// Parse a sidecar buffer: `varuint count` then `count` fixed-width
    /// records. Records whose osm code doesn't decode to a known entity
    /// type are skipped, not treated as an error.
    pub fn load(data: &[u8], direction: Direction) -> Result<Self> {
        let mut cur = Cursor::new(data, 0);
        let count = cur.read_varuint() as usize;

        let mut by_feature = HashMap::new();
        let mut by_osm = HashMap::new();

        for _ in 0..count {
            let osm_code = cur.read_uint(8)?;
            let feature_id = cur.read_uint(4)? as u32;
            let _filler = cur.read_uint(4)?;

            let Some(osm_id) = unpack_osm_id(osm_code) else {
                continue;
            };

            match direction {
                Direction::FeatureToOsm => {
                    by_feature.insert(feature_id, osm_id);
                }
                Direction::OsmToFeature => {
                    by_osm.insert((osm_id.kind, osm_id.id), feature_id);
                }
            }
        }

        Ok(Osm2FtIndex {
            direction,
            by_feature: (direction == Direction::FeatureToOsm).then_some(by_feature),
            by_osm: (direction == Direction::OsmToFeature).then_some(by_osm),
        })
    }

    pub fn len(&self) -> usize {
        match self.direction {
            Direction::FeatureToOsm => self.by_feature.as_ref().map_or(0, HashMap::len),
            Direction::OsmToFeature => self.by_osm.as_ref().map_or(0, HashMap::len),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_by_feature(&self, feature_id: u32) -> Option<OsmId> {
        self.by_feature.as_ref()?.get(&feature_id).copied()
    }

    pub fn get_by_osm(&self, id: OsmId) -> Option<u32> {
        self.by_osm.as_ref()?.get(&(id.kind, id.id)).copied()
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = (u32, OsmId)> + '_> {
        match (&self.by_feature, &self.by_osm) {
            (Some(map), _) => Box::new(map.iter().map(|(&fid, &osm)| (fid, osm))),
            (_, Some(map)) => Box::new(map.iter().map(|(&(kind, id), &fid)| (fid, OsmId { kind, id }))),
            (None, None) => Box::new(std::iter::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(osm_code: u64, feature_id: u32) -> Vec<u8> {
        let mut out = osm_code.to_le_bytes().to_vec();
        out.extend_from_slice(&feature_id.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out
    }

    #[test]
    fn feature_to_osm_lookup() {
        let node_code = 0x4000_0000_0000_0001u64;
        let mut data = vec![1u8];
        data.extend_from_slice(&record(node_code, 7));
        let index = Osm2FtIndex::load(&data, Direction::FeatureToOsm).unwrap();
        assert_eq!(index.len(), 1);
        let osm = index.get_by_feature(7).unwrap();
        assert_eq!(osm.kind, OsmIdKind::Node);
        assert_eq!(osm.id, 1);
    }

    #[test]
    fn unparseable_codes_are_skipped_not_errors() {
        let mut data = vec![1u8];
        data.extend_from_slice(&record(42, 7)); // top bits 00: not a valid tag
        let index = Osm2FtIndex::load(&data, Direction::FeatureToOsm).unwrap();
        assert!(index.is_empty());
    }
}
