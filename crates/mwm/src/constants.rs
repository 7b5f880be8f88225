//! Fixed, order-sensitive lookup tables. Positional indices here are part of
//! the MWM wire format contract — do not reorder, insert, or remove entries.

/// `coding/multilang_utf8_string.cpp`'s language table. A multilingual string
/// sub-record's 6-bit language id indexes into this list.
pub const LANGUAGES: [&str; 64] = [
    "default", "en", "ja", "fr", "ko_rm", "ar", "de", "int_name", "ru", "sv", "zh", "fi", "be",
    "ka", "ko", "he", "nl", "ga", "ja_rm", "el", "it", "es", "zh_pinyin", "th", "cy", "sr", "uk",
    "ca", "hu", "hsb", "eu", "fa", "br", "pl", "hy", "kn", "sl", "ro", "sq", "am", "fy", "cs",
    "gd", "sk", "af", "ja_kana", "lb", "pt", "hr", "fur", "vi", "tr", "bg", "eo", "lt", "la",
    "kk", "gsw", "et", "ku", "mn", "mk", "lv", "hi",
];

/// `indexer/feature_meta.hpp`'s metadata key table. Index 0 is a literal
/// placeholder (never a real key) kept so later indices stay aligned with
/// the reference implementation.
pub const METADATA_KEYS: [&str; 29] = [
    "0",
    "cuisine",
    "open_hours",
    "phone_number",
    "fax_number",
    "stars",
    "operator",
    "url",
    "website",
    "internet",
    "ele",
    "turn_lanes",
    "turn_lanes_forward",
    "turn_lanes_backward",
    "email",
    "postcode",
    "wikipedia",
    "maxspeed",
    "flats",
    "height",
    "min_height",
    "denomination",
    "building_levels",
    "test_id",
    "ref:sponsored",
    "price_rate",
    "rating",
    "banner_url",
    "level",
];

/// `rgninfo` key table.
pub const REGION_DATA_KEYS: [&str; 8] = [
    "languages",
    "driving",
    "timezone",
    "addr_fmt",
    "phone_fmt",
    "postcode_fmt",
    "holidays",
    "housenames",
];

/// Resolve a language index, logging and dropping it if out of range.
pub(crate) fn language_name(index: u64) -> Option<&'static str> {
    LANGUAGES.get(index as usize).copied()
}

/// Resolve a metadata key index, falling back to its decimal string form.
pub(crate) fn metadata_key(index: u64) -> String {
    METADATA_KEYS
        .get(index as usize)
        .map(|s| s.to_string())
        .unwrap_or_else(|| {
            log::warn!("unknown metadata key index {index}, falling back to decimal");
            index.to_string()
        })
}

/// Resolve a region-data key index, falling back to its decimal string form.
pub(crate) fn region_data_key(index: u64) -> String {
    REGION_DATA_KEYS
        .get(index as usize)
        .map(|s| s.to_string())
        .unwrap_or_else(|| {
            log::warn!("unknown region-data key index {index}, falling back to decimal");
            index.to_string()
        })
}
