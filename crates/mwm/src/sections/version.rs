//! The `version` section: a format byte, a version number, and the date it
//! encodes, per `mwm.py::read_version`.

use crate::cursor::Cursor;
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub fmt: u32,
    pub version: u64,
    pub date: NaiveDate,
}

/// `version` values below this are a literal `YYMMDD` decimal; at or above
/// it, `version` is a Unix timestamp (seconds) and gets renormalized to the
/// `YYMMDD` form after decoding.
const YYMMDD_THRESHOLD: u64 = 161231;

pub(crate) fn read_version(data: &[u8]) -> Result<Version> {
    let mut cur = Cursor::new(data, 0);
    cur.take(4)?; // prolog, unused
    let fmt = cur.read_varuint() as u32 + 1;
    let mut version = cur.read_varuint();

    let date = if version < YYMMDD_THRESHOLD {
        decode_yymmdd(version)
    } else {
        let date = DateTime::<Utc>::from_timestamp(version as i64, 0)
            .map(|dt| dt.date_naive())
            .unwrap_or_else(|| decode_yymmdd(version));
        version = yymmdd_number(date);
        date
    };

    Ok(Version { fmt, version, date })
}

fn decode_yymmdd(v: u64) -> NaiveDate {
    let year = 2000 + (v / 10_000) as i32;
    let month = ((v / 100) % 100) as u32;
    let day = (v % 100) as u32;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
}

fn yymmdd_number(date: NaiveDate) -> u64 {
    use chrono::Datelike;
    let yy = (date.year() - 2000) as u64;
    yy * 10_000 + date.month() as u64 * 100 + date.day() as u64
}
