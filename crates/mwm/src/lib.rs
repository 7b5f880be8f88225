//! Reader for MAPS.ME MWM binary map containers.
//!
//! An MWM file bundles several named sections (`version`, `header`,
//! `rgninfo`, `metaidx`/`meta`, `chrysler`, `dat`, ...) behind a flat tag
//! directory. [`Reader`] loads a container once from a byte buffer and
//! exposes one method per section, each parsing lazily and independently —
//! reading `rgninfo` never touches `dat`, and vice versa.
//!
//! ```no_run
//! let bytes = std::fs::read("region.mwm").unwrap();
//! let reader = mwm::Reader::from_bytes(&bytes).unwrap();
//! let version = reader.read_version().unwrap();
//! let header = reader.read_header().unwrap();
//! let types = mwm::types_txt::read_types(std::path::Path::new("types.txt"));
//! let features = reader.iter_features(false, &types).unwrap();
//! for feature in &features {
//!     let feature = feature.unwrap();
//!     println!("{}: {:?}", feature.id, feature.coordinates);
//! }
//! ```

mod constants;
mod cursor;
mod error;
mod mercator;
mod morton;
mod osmid;
mod sections;
mod strings;
mod tags;
mod varint;

pub mod osm2ft;
pub mod types_txt;

use std::cell::Cell;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;

pub use error::{Error, Result};
pub use mercator::LonLat;
pub use osmid::{OsmId, OsmIdKind};
pub use sections::{CrossMwm, Feature, FeatureIter, GeomType, Header, MapType, RegionValue, Version};
pub use tags::{TagDirectory, TagEntry};

/// A loaded MWM container. Construction only parses the tag directory;
/// every other section is read on demand and the result is not cached,
/// matching the reference reader's "call it again if you need it twice"
/// contract.
pub struct Reader<'a> {
    data: &'a [u8],
    tags: TagDirectory,
    coord_size: Cell<Option<u64>>,
    base_point: Cell<(i64, i64)>,
}

impl<'a> Reader<'a> {
    /// Parse the tag directory out of `data`. Does not read any section.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        log::trace!("loading tag directory from {} byte container", data.len());
        let tags = TagDirectory::parse(data)?;
        Ok(Reader { data, tags, coord_size: Cell::new(None), base_point: Cell::new((0, 0)) })
    }

    pub fn tags(&self) -> &TagDirectory {
        &self.tags
    }

    fn section_bytes(&self, name: &str) -> Option<&'a [u8]> {
        let entry = self.tags.get(name)?;
        log::trace!("seeking to tag {name:?} at offset {}, length {}", entry.offset, entry.length);
        Some(&self.data[entry.offset as usize..(entry.offset + entry.length) as usize])
    }

    pub fn read_version(&self) -> Result<Version> {
        match self.section_bytes("version") {
            Some(bytes) => sections::version::read_version(bytes),
            None => Err(Error::BadMagicOrLayout("missing version tag".to_string())),
        }
    }

    /// Parse `header`, establishing `coord_size` for every subsequent
    /// coordinate decode in this `Reader`. Safe to call more than once; a
    /// missing tag falls back to [`Header::default`] rather than erroring.
    pub fn read_header(&self) -> Result<Header> {
        let header = match self.section_bytes("header") {
            Some(bytes) => sections::header::read_header(bytes)?,
            None => {
                log::warn!("container has no header tag, falling back to default coord_size");
                Header::default()
            }
        };
        self.coord_size.set(Some(header.coord_size));
        self.base_point.set(header.base_point);
        Ok(header)
    }

    pub fn read_region_info(&self) -> Result<HashMap<String, RegionValue>> {
        match self.section_bytes("rgninfo") {
            Some(bytes) => sections::rgninfo::read_region_info(bytes),
            None => Ok(HashMap::new()),
        }
    }

    pub fn read_metadata(&self) -> Result<HashMap<u32, HashMap<String, String>>> {
        let (metaidx, meta) = match (self.section_bytes("metaidx"), self.section_bytes("meta")) {
            (Some(idx), Some(m)) => (idx, m),
            _ => return Ok(HashMap::new()),
        };
        let fmt = self.read_version().map(|v| v.fmt).unwrap_or(u32::MAX);
        sections::metadata::read_metadata(metaidx, meta, fmt)
    }

    /// Coordinate decoding (incoming/outgoing node points) requires
    /// `coord_size` and `base_point`, established by [`Reader::read_header`];
    /// call it first or this returns [`Error::HeaderNotRead`].
    pub fn read_crossmwm(&self) -> Result<CrossMwm> {
        let coord_size = self.coord_size.get().ok_or(Error::HeaderNotRead)?;
        let base_point = self.base_point.get();
        match self.section_bytes("chrysler") {
            Some(bytes) => sections::crossmwm::read_crossmwm(bytes, base_point, coord_size),
            None => Err(Error::BadMagicOrLayout("missing chrysler tag".to_string())),
        }
    }

    /// Iterate the `dat` section's features. `types` is the caller-loaded
    /// `types.txt` line list (see [`types_txt::read_types`]); pass an empty
    /// slice if type names are not needed.
    ///
    /// Coordinate decoding requires `coord_size` and `base_point`,
    /// established by [`Reader::read_header`]; call it first or this
    /// returns [`Error::HeaderNotRead`].
    pub fn iter_features(&self, with_metadata: bool, types: &'a [String]) -> Result<FeatureIterHandle<'a>> {
        let coord_size = self.coord_size.get().ok_or(Error::HeaderNotRead)?;
        let base_point = self.base_point.get();
        let data = self
            .section_bytes("dat")
            .ok_or_else(|| Error::BadMagicOrLayout("missing dat tag".to_string()))?;
        let metadata = if with_metadata { Some(self.read_metadata()?) } else { None };
        log::debug!("starting feature iteration, with_metadata={with_metadata}");
        Ok(FeatureIterHandle { data, types, metadata, coord_size, base_point })
    }
}

/// Owns the pieces [`FeatureIter`] borrows from, so `Reader::iter_features`
/// can return an iterator without fighting the borrow checker over a
/// temporary metadata map.
pub struct FeatureIterHandle<'a> {
    data: &'a [u8],
    types: &'a [String],
    metadata: Option<HashMap<u32, HashMap<String, String>>>,
    coord_size: u64,
    base_point: (i64, i64),
}

impl<'a> FeatureIterHandle<'a> {
    pub fn iter(&self) -> FeatureIter<'_> {
        FeatureIter::new(self.data, self.types, self.metadata.as_ref(), self.coord_size, self.base_point)
    }
}

impl<'a> IntoIterator for &'a FeatureIterHandle<'a> {
    type Item = Result<Feature>;
    type IntoIter = FeatureIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read a container file into memory and parse its tag directory.
pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
    std::fs::read(path)
}

/// Fast path: memory-map the container instead of copying it. Parsing still
/// only sees `&[u8]`, so callers on either path use the same `Reader` API.
#[cfg(feature = "mmap")]
pub fn map_file<P: AsRef<Path>>(path: P) -> io::Result<memmap2::Mmap> {
    let file = File::open(path)?;
    unsafe { memmap2::MmapOptions::new().map(&file) }
}
