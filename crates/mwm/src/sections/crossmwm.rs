//! The cross-mwm routing section (`chrysler`): entry/exit points at this
//! container's border with its neighbours, plus a small adjacency matrix
//! recording which exits can reach which neighbour, per
//! `mwm.py::read_crossmwm`.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::mercator::{to_wgs84, LonLat};
use crate::morton::decode_delta;

#[derive(Debug, Clone, PartialEq)]
pub struct CrossMwm {
    pub incoming: Vec<(u32, LonLat)>,
    pub outgoing: Vec<(u32, LonLat, u8)>,
    /// `matrix[i][j]` is the routing cost from `incoming[i]` to `outgoing[j]`.
    pub matrix: Vec<Vec<u32>>,
    pub neighbours: Vec<String>,
}

fn read_point(cur: &mut Cursor, base_point: (i64, i64), coord_size: u64) -> Result<LonLat> {
    let coded = cur.read_uint(8)?; // unpacked: fixed 8-byte, not varuint
    let (x, y) = decode_delta(coded, base_point);
    Ok(to_wgs84(x, y, coord_size))
}

pub(crate) fn read_crossmwm(data: &[u8], base_point: (i64, i64), coord_size: u64) -> Result<CrossMwm> {
    let mut cur = Cursor::new(data, 0);

    let incoming_count = cur.read_uint(4)? as usize;
    let mut incoming = Vec::with_capacity(incoming_count);
    for _ in 0..incoming_count {
        let node_id = cur.read_uint(4)? as u32;
        let point = read_point(&mut cur, base_point, coord_size)?;
        incoming.push((node_id, point));
    }

    let outgoing_count = cur.read_uint(4)? as usize;
    let mut outgoing = Vec::with_capacity(outgoing_count);
    for _ in 0..outgoing_count {
        let node_id = cur.read_uint(4)? as u32;
        let point = read_point(&mut cur, base_point, coord_size)?;
        let out_index = cur.read_uint(1)? as u8;
        outgoing.push((node_id, point, out_index));
    }

    let mut matrix = Vec::with_capacity(incoming_count);
    for _ in 0..incoming_count {
        let mut row = Vec::with_capacity(outgoing_count);
        for _ in 0..outgoing_count {
            row.push(cur.read_uint(4)? as u32);
        }
        matrix.push(row);
    }

    let neighbour_count = cur.read_uint(4)? as usize;
    let mut neighbours = Vec::with_capacity(neighbour_count);
    for _ in 0..neighbour_count {
        let size = cur.read_uint(4)? as usize;
        let bytes = cur.take(size)?;
        neighbours.push(std::str::from_utf8(bytes)?.to_string());
    }

    Ok(CrossMwm { incoming, outgoing, matrix, neighbours })
}
