//! OSM id packing, per `mwmfile.py::OsmIdCode`.
//!
//! MWM stores OSM node/way/relation ids inside a single `u64`: the top two
//! bits tag the entity type, the rest is the numeric OSM id. Feature ids
//! (as opposed to OSM ids) are stored as a signed/unsigned bijection so
//! that small negative "synthetic" ids stay close to zero on the wire.

const NODE_TAG: u64 = 0x4000_0000_0000_0000;
const WAY_TAG: u64 = 0x8000_0000_0000_0000;
const RELATION_TAG: u64 = 0xC000_0000_0000_0000;
const TYPE_MASK: u64 = 0xC000_0000_0000_0000;
const ID_MASK: u64 = !TYPE_MASK;

/// The kind of OSM entity a packed id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsmIdKind {
    Node,
    Way,
    Relation,
}

/// An OSM id together with its entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsmId {
    pub kind: OsmIdKind,
    pub id: u64,
}

/// Pack an OSM id with its type tag into wire format. When `signed` is true
/// and the tagged value is ≥2^63, the result is run through
/// [`unsigned_to_signed`] and cast back, so a caller that needs to hand the
/// packed id to a signed-64-bit sink (matching `OsmIdCode.pack`'s `int64`
/// flag) gets back the two's-complement-equivalent value instead of one that
/// silently overflows a signed column.
pub(crate) fn pack_osm_id(kind: OsmIdKind, id: u64, signed: bool) -> u64 {
    let tag = match kind {
        OsmIdKind::Node => NODE_TAG,
        OsmIdKind::Way => WAY_TAG,
        OsmIdKind::Relation => RELATION_TAG,
    };
    let tagged = tag | (id & ID_MASK);
    if signed && tagged >= 0x8000_0000_0000_0000 {
        unsigned_to_signed(tagged) as u64
    } else {
        tagged
    }
}

/// Unpack a wire-format OSM id. The top-bits pattern `00` (neither node,
/// way, nor relation) is not a valid OSM id code and yields `None`.
pub(crate) fn unpack_osm_id(coded: u64) -> Option<OsmId> {
    let kind = match coded & TYPE_MASK {
        NODE_TAG => OsmIdKind::Node,
        WAY_TAG => OsmIdKind::Way,
        RELATION_TAG => OsmIdKind::Relation,
        _ => return None,
    };
    Some(OsmId { kind, id: coded & ID_MASK })
}

/// Map a signed feature id onto the unsigned bijection used on the wire:
/// non-negative values map to themselves, negative values map to
/// `(-1 - s) ^ u64::MAX`.
pub(crate) fn signed_to_unsigned(s: i64) -> u64 {
    if s >= 0 {
        s as u64
    } else {
        (-1 - s) as u64 ^ u64::MAX
    }
}

/// Reverse of [`signed_to_unsigned`].
pub(crate) fn unsigned_to_signed(num: u64) -> i64 {
    if num & 0x8000_0000_0000_0000 == 0 {
        num as i64
    } else {
        -1 - (num ^ u64::MAX) as i64
    }
}
