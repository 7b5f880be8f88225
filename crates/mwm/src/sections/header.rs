//! The `header` section: coordinate quantization size, the container's base
//! point and bounding rectangle, scale list, language list, and map type,
//! per `mwm.py::read_header` / `read_bounds`.

use crate::constants::language_name;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::mercator::{to_wgs84, LonLat};
use crate::morton::bitwise_split;
use crate::strings::read_uint_array;

/// Coordinate quantization used when a container has no `header` tag at all
/// (matches `mwmfile.py`'s fallback, `(1 << 30) - 1`).
pub(crate) const DEFAULT_COORD_SIZE: u64 = (1 << 30) - 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapType {
    World,
    WorldCoasts,
    Country,
    Unknown(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub coord_size: u64,
    /// Raw (unprojected) integer-mercator point: the reference every other
    /// `packed`-delta point in this container decodes against.
    pub base_point: (i64, i64),
    pub base_point_wgs84: Option<LonLat>,
    pub bounds: Option<(LonLat, LonLat)>,
    pub scales: Vec<u64>,
    pub langs: Vec<String>,
    pub map_type: Option<MapType>,
}

impl Default for Header {
    fn default() -> Self {
        Header {
            coord_size: DEFAULT_COORD_SIZE,
            base_point: (0, 0),
            base_point_wgs84: None,
            bounds: None,
            scales: Vec::new(),
            langs: Vec::new(),
            map_type: None,
        }
    }
}

/// Read a varint, reinterpret its bit pattern as a Morton code, and split
/// it. The source applies `mwm_bitwise_split` directly to a zigzag-decoded
/// varint here, not the usual delta-from-reference path — reproduced
/// verbatim for `read_bounds`.
fn read_split_varint(cur: &mut Cursor) -> (i64, i64) {
    let v = cur.read_varint() as u64;
    let (x, y) = bitwise_split(v);
    (x as i64, y as i64)
}

fn read_bounds(cur: &mut Cursor, coord_size: u64) -> (LonLat, LonLat) {
    let rmin = read_split_varint(cur);
    let rmax = read_split_varint(cur);
    (to_wgs84(rmin.0, rmin.1, coord_size), to_wgs84(rmax.0, rmax.1, coord_size))
}

pub(crate) fn read_header(data: &[u8]) -> Result<Header> {
    let mut cur = Cursor::new(data, 0);

    let coord_bits = cur.read_varuint();
    let coord_size = (1u64 << coord_bits) - 1;

    // The base point is a raw Morton split, not a zigzag delta: it becomes
    // the reference every other `packed` point in this container decodes
    // against.
    let raw_base = cur.read_varuint();
    let (bx, by) = bitwise_split(raw_base);
    let base_point = (bx as i64, by as i64);
    let base_point_wgs84 = to_wgs84(base_point.0, base_point.1, coord_size);

    let bounds = read_bounds(&mut cur, coord_size);
    let scales = read_uint_array(&mut cur);

    let lang_codes = read_uint_array(&mut cur);
    let langs = lang_codes
        .iter()
        .map(|&code| language_name(code).map(str::to_string).unwrap_or_else(|| code.to_string()))
        .collect();

    let map_type = match cur.read_varint() {
        0 => MapType::World,
        1 => MapType::WorldCoasts,
        2 => MapType::Country,
        other => MapType::Unknown(other),
    };

    Ok(Header {
        coord_size,
        base_point,
        base_point_wgs84: Some(base_point_wgs84),
        bounds: Some(bounds),
        scales,
        langs,
        map_type: Some(map_type),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_varuint(mut v: u64) -> Vec<u8> {
        let mut out = Vec::new();
        loop {
            let mut byte = (v & 0x7F) as u8;
            v >>= 7;
            if v != 0 {
                byte |= 0x80;
            }
            out.push(byte);
            if v == 0 {
                break;
            }
        }
        out
    }

    #[test]
    fn reads_coord_size_base_point_and_map_type() {
        let mut data = Vec::new();
        data.extend(encode_varuint(20)); // coord_bits
        data.extend(encode_varuint(0)); // base point raw = 0 -> (0, 0)
        data.extend(encode_varuint(0)); // bounds min varint 0 -> split (0,0)
        data.extend(encode_varuint(0)); // bounds max varint 0 -> split (0,0)
        data.push(0); // scales array len 0
        data.push(0); // langs array len 0
        data.push(0); // map_type varint 0 -> world

        let header = read_header(&data).unwrap();
        assert_eq!(header.coord_size, (1u64 << 20) - 1);
        assert_eq!(header.base_point, (0, 0));
        assert!(header.scales.is_empty());
        assert!(header.langs.is_empty());
        assert_eq!(header.map_type, Some(MapType::World));
    }

    #[test]
    fn resolves_known_and_unknown_language_codes() {
        let mut data = Vec::new();
        data.extend(encode_varuint(20));
        data.extend(encode_varuint(0));
        data.extend(encode_varuint(0));
        data.extend(encode_varuint(0));
        data.push(0); // scales
        data.push(2); // langs len 2
        data.push(1); // "en"
        data.push(200); // out of range -> falls back to decimal
        data.push(2); // map_type varint 2 -> country

        let header = read_header(&data).unwrap();
        assert_eq!(header.langs, vec!["en".to_string(), "200".to_string()]);
        assert_eq!(header.map_type, Some(MapType::Country));
    }

    #[test]
    fn missing_header_tag_falls_back_to_default_coord_size() {
        let header = Header::default();
        assert_eq!(header.coord_size, DEFAULT_COORD_SIZE);
        assert_eq!(header.base_point, (0, 0));
        assert!(header.map_type.is_none());
    }
}
