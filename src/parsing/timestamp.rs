//! Localized timestamp normalization.
//!
//! The export writes send times like `den 15 februari 2018 kl. 12:40 UTC+01`:
//! a prefix word, day, localized month name, year, an optional time marker,
//! the clock time and a timezone label. Only day, month, year and clock time
//! are used.

use chrono::NaiveDate;

use crate::error::{ChatstatsError, Result};
use crate::lexicon::MonthMap;
use crate::message::CanonicalTimestamp;

/// Fewest whitespace tokens a timestamp can have (prefix, day, month, year, time).
pub const MIN_TOKENS: usize = 5;

/// Named fields of a raw timestamp, before month lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTimestamp<'a> {
    /// Day of month token.
    pub day: &'a str,
    /// Localized month name.
    pub month: &'a str,
    /// Year token.
    pub year: &'a str,
    /// `H:MM` clock token.
    pub time: &'a str,
}

impl<'a> RawTimestamp<'a> {
    /// Splits a raw timestamp into its named fields.
    ///
    /// Day, month and year sit at fixed positions after the prefix word; the
    /// clock time is the first `H:MM` token after the year, so exports with
    /// and without a time marker (`kl.`) are both accepted.
    ///
    /// ```rust
    /// use chatstats::parsing::timestamp::RawTimestamp;
    ///
    /// let raw = RawTimestamp::tokenize("den 15 februari 2018 kl. 12:40 UTC+01")?;
    /// assert_eq!(raw.month, "februari");
    /// assert_eq!(raw.time, "12:40");
    /// # Ok::<(), chatstats::ChatstatsError>(())
    /// ```
    pub fn tokenize(raw: &'a str) -> Result<Self> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.len() < MIN_TOKENS {
            return Err(ChatstatsError::malformed_timestamp(
                raw,
                format!("expected at least {MIN_TOKENS} tokens, found {}", tokens.len()),
            ));
        }

        let time = tokens[4..]
            .iter()
            .copied()
            .find(|t| t.contains(':'))
            .ok_or_else(|| ChatstatsError::malformed_timestamp(raw, "no HH:MM time token"))?;

        Ok(Self {
            day: tokens[1],
            month: tokens[2],
            year: tokens[3],
            time,
        })
    }
}

/// Normalizes a localized timestamp into a [`CanonicalTimestamp`].
///
/// # Errors
///
/// - [`ChatstatsError::MalformedTimestamp`] if the text has fewer than five
///   tokens, a non-numeric day or year, no valid clock time, or names an
///   impossible date
/// - [`ChatstatsError::UnknownMonth`] if the month name is not in `months`
///
/// # Example
///
/// ```rust
/// use chatstats::lexicon::MonthMap;
/// use chatstats::parsing::normalize_timestamp;
///
/// let months = MonthMap::from_json_str(r#"{"februari": "02"}"#)?;
/// let ts = normalize_timestamp("den 15 februari 2018 kl. 12:40 UTC+01", &months)?;
/// assert_eq!(ts.to_string(), "2018-02-15 12:40:00 Thursday");
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
pub fn normalize_timestamp(raw: &str, months: &MonthMap) -> Result<CanonicalTimestamp> {
    let fields = RawTimestamp::tokenize(raw)?;

    let month = months
        .get(fields.month)
        .ok_or_else(|| ChatstatsError::unknown_month(fields.month))?;

    let day: u32 = parse_number(raw, fields.day, "day")?;
    let year: i32 = parse_number(raw, fields.year, "year")?;
    let (hour, minute) = parse_clock(raw, fields.time)?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ChatstatsError::malformed_timestamp(raw, format!("no such date {year}-{month:02}-{day:02}"))
    })?;

    CanonicalTimestamp::new(date, hour, minute)
        .ok_or_else(|| ChatstatsError::malformed_timestamp(raw, format!("invalid time {}", fields.time)))
}

fn parse_number<T: std::str::FromStr>(raw: &str, token: &str, what: &str) -> Result<T> {
    // Some locales write the day as "15."
    token
        .trim_end_matches(['.', ','])
        .parse()
        .map_err(|_| ChatstatsError::malformed_timestamp(raw, format!("{what} {token:?} is not a number")))
}

fn parse_clock(raw: &str, token: &str) -> Result<(u32, u32)> {
    let (hour, minute) = token
        .split_once(':')
        .ok_or_else(|| ChatstatsError::malformed_timestamp(raw, "no HH:MM time token"))?;
    // Tolerate a trailing seconds field, it is dropped anyway.
    let minute = minute.split(':').next().unwrap_or(minute);
    Ok((
        parse_number(raw, hour, "hour")?,
        parse_number(raw, minute, "minute")?,
    ))
}
