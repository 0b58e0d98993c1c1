//! ISO-8601 UTC millisecond timestamps from signed Unix milliseconds.
//!
//! The output is bit-exact with JavaScript `Date.prototype.toISOString`
//! for years 0000-9999; outside that range the rendering is unspecified.

use time::format_description::FormatItem;
use time::OffsetDateTime;

use crate::error::TranscodeError;
use crate::sink::Sink;

const DATE_FORMAT: &[FormatItem<'static>] = time::macros::format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// Writes `ms` since the Unix epoch as a quoted `YYYY-MM-DDTHH:MM:SS.mmmZ`
/// timestamp (26 bytes with the quotes).
pub(crate) fn write_date(sink: &mut Sink, ms: i64) -> Result<(), TranscodeError> {
    // Years outside 0000-9999 have no defined rendering; out-of-range
    // timestamps clamp to the epoch.
    let dt = OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH);
    let text = dt.format(DATE_FORMAT).unwrap_or_default();
    sink.ensure_space(text.len() + 2)?;
    sink.put(b'"');
    sink.put_slice(text.as_bytes());
    sink.put(b'"');
    Ok(())
}
