//! One module per MWM section, each exposing a free function that takes the
//! section's raw bytes (already bounds-checked by the tag directory) and
//! returns the parsed record.

pub mod crossmwm;
pub mod dat;
pub mod header;
pub mod metadata;
pub mod rgninfo;
pub mod version;

pub use crossmwm::CrossMwm;
pub use dat::{Feature, FeatureIter, GeomType};
pub use header::{Header, MapType};
pub use rgninfo::RegionValue;
pub use version::Version;
