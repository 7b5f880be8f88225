//! The `dat` section: a flat, self-delimiting sequence of feature records.
//! Each record declares its own byte length up front (`feature_size`), which
//! is what lets [`FeatureIter`] detect a reader bug or malformed record
//! (walking past the declared end) instead of silently misaligning on the
//! next feature.

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::mercator::{to_wgs84, LonLat};
use crate::morton::decode_delta;
use crate::strings::{read_multilang, read_numeric_string, read_str};
use std::collections::HashMap;

const GEOM_POINT: u8 = 0x00;
const GEOM_LINE: u8 = 0x20;
const GEOM_AREA: u8 = 0x40;
const GEOM_POINT_EX: u8 = 0x60;
const GEOM_MASK: u8 = 0x60;

const FLAG_NAME: u8 = 0x08;
const FLAG_LAYER: u8 = 0x10;
/// Meaning depends on `geom_type`: rank for POINT, a road ref for LINE, a
/// house number for AREA/POINT_EX.
const FLAG_EXTRA: u8 = 0x80;
const TYPES_COUNT_MASK: u8 = 0x07;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeomType {
    Point,
    Line,
    Area,
    PointEx,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: u32,
    pub types: Vec<String>,
    pub name: Option<HashMap<String, String>>,
    pub layer: Option<u8>,
    pub rank: Option<u8>,
    pub road_ref: Option<String>,
    pub house: Option<String>,
    pub geom_type: GeomType,
    pub coordinates: Option<LonLat>,
    pub metadata: Option<HashMap<String, String>>,
}

/// A lazy, forward-only iterator over the `dat` section's feature records.
pub struct FeatureIter<'a> {
    cur: Cursor<'a>,
    next_id: u32,
    types_table: &'a [String],
    metadata: Option<&'a HashMap<u32, HashMap<String, String>>>,
    coord_size: u64,
    base_point: (i64, i64),
}

impl<'a> FeatureIter<'a> {
    pub(crate) fn new(
        data: &'a [u8],
        types_table: &'a [String],
        metadata: Option<&'a HashMap<u32, HashMap<String, String>>>,
        coord_size: u64,
        base_point: (i64, i64),
    ) -> Self {
        FeatureIter { cur: Cursor::new(data, 0), next_id: 0, types_table, metadata, coord_size, base_point }
    }

    fn read_one(&mut self, id: u32) -> Result<Feature> {
        let feature_size = self.cur.read_varuint() as usize;
        let limit = self.cur.pos() + feature_size;

        let header = self.cur.read_uint(1)? as u8;
        let geom_type = match header & GEOM_MASK {
            GEOM_POINT => GeomType::Point,
            GEOM_LINE => GeomType::Line,
            GEOM_AREA => GeomType::Area,
            GEOM_POINT_EX => GeomType::PointEx,
            _ => unreachable!("GEOM_MASK covers exactly these four patterns"),
        };

        // Encoded directly in the header byte's low 3 bits, not a
        // separately-read count.
        let type_count = ((header & TYPES_COUNT_MASK) + 1) as usize;
        let mut types = Vec::with_capacity(type_count);
        for _ in 0..type_count {
            let idx = self.cur.read_varuint() as usize;
            match self.types_table.get(idx) {
                Some(name) => types.push(name.clone()),
                // Keeps numbers aligned with mapcss-mapping.csv even
                // without types.txt loaded.
                None => types.push((idx + 1).to_string()),
            }
        }

        let name = if header & FLAG_NAME != 0 { Some(read_multilang(&mut self.cur)?) } else { None };
        let layer = if header & FLAG_LAYER != 0 { Some(self.cur.read_uint(1)? as u8) } else { None };

        let mut rank = None;
        let mut road_ref = None;
        let mut house = None;
        let mut coordinates = None;

        match geom_type {
            GeomType::Point => {
                if header & FLAG_EXTRA != 0 {
                    rank = Some(self.cur.read_uint(1)? as u8);
                }
                let coded = self.cur.read_varuint();
                let (x, y) = decode_delta(coded, self.base_point);
                coordinates = Some(to_wgs84(x, y, self.coord_size));
            }
            GeomType::Line => {
                if header & FLAG_EXTRA != 0 {
                    road_ref = Some(read_str(&mut self.cur, false)?);
                }
            }
            GeomType::Area | GeomType::PointEx => {
                if header & FLAG_EXTRA != 0 {
                    house = Some(read_numeric_string(&mut self.cur)?);
                }
            }
        }

        if self.cur.pos() > limit {
            return Err(Error::FeatureOverread { id, limit });
        }
        self.cur.seek(limit);

        let metadata = self.metadata.and_then(|m| m.get(&id)).cloned();

        Ok(Feature { id, types, name, layer, rank, road_ref, house, geom_type, coordinates, metadata })
    }
}

impl<'a> Iterator for FeatureIter<'a> {
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur.pos() >= self.cur.len() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        Some(self.read_one(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_feature(header_byte: u8) -> Vec<u8> {
        // header, 1 type (idx 0), no name/layer, rank (if flagged), point delta=0
        let mut body = vec![header_byte, 0u8];
        if header_byte & FLAG_EXTRA != 0 {
            body.push(3); // rank
        }
        body.push(0); // point varuint 0 -> delta (0,0) from base_point
        let mut out = vec![body.len() as u8];
        out.extend_from_slice(&body);
        out
    }

    #[test]
    fn iterates_single_point_feature_with_rank() {
        let data = point_feature(GEOM_POINT | FLAG_EXTRA);
        let types: Vec<String> = Vec::new();
        let mut it = FeatureIter::new(&data, &types, None, (1 << 20) - 1, (0, 0));
        let feature = it.next().unwrap().unwrap();
        assert_eq!(feature.id, 0);
        assert_eq!(feature.geom_type, GeomType::Point);
        assert_eq!(feature.rank, Some(3));
        assert_eq!(feature.types, vec!["1".to_string()]); // idx 0 -> fallback "1"
        assert!(feature.coordinates.is_some());
        assert!(it.next().is_none());
    }

    #[test]
    fn types_count_comes_from_header_low_bits() {
        // header encodes 3 types (0x02 -> (0x02 & 7) + 1 = 3), geom POINT.
        let mut body = vec![GEOM_POINT | 0x02];
        body.extend_from_slice(&[0, 0, 0]); // three type indices, all 0
        body.push(0); // point delta 0
        let mut data = vec![body.len() as u8];
        data.extend_from_slice(&body);

        let types: Vec<String> = Vec::new();
        let mut it = FeatureIter::new(&data, &types, None, (1 << 20) - 1, (0, 0));
        let feature = it.next().unwrap().unwrap();
        assert_eq!(feature.types.len(), 3);
    }

    #[test]
    fn overread_is_reported_not_panicked() {
        // feature_size = 1, but a full point record (header, 1 type index,
        // coordinate) takes 3 more bytes to parse.
        let data = vec![1u8, GEOM_POINT, 0u8, 0u8];
        let types: Vec<String> = Vec::new();
        let mut it = FeatureIter::new(&data, &types, None, (1 << 20) - 1, (0, 0));
        match it.next() {
            Some(Err(Error::FeatureOverread { id: 0, .. })) => {}
            other => panic!("expected FeatureOverread, got {other:?}"),
        }
    }

    #[test]
    fn point_decodes_relative_to_base_point_not_zero() {
        let data = point_feature(GEOM_POINT);
        let types: Vec<String> = Vec::new();
        let base = (100, 200);
        let mut it = FeatureIter::new(&data, &types, None, (1 << 20) - 1, base);
        let feature = it.next().unwrap().unwrap();
        let expected = to_wgs84(base.0, base.1, (1 << 20) - 1);
        assert_eq!(feature.coordinates, Some(expected));
    }
}
