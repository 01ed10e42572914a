use crate::types::errors::DateError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Timezone suffix of an OFX date, e.g. `[-5:EST]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneOffset {
    /// Signed offset from UTC in hours; may be fractional (`+5.75`).
    pub offset_hours: Decimal,
    pub zone_name: Option<String>
}

impl ZoneOffset {
    fn offset_minutes(&self) -> Result<i64, DateError> {
        self.offset_hours.checked_mul(Decimal::from(60))
            .and_then(|minutes| minutes.round().to_i64())
            .ok_or(DateError::Overflow)
    }
}

/// A decoded OFX date-time (`YYYYMMDDHHMMSS.XXX[gmt offset:tz name]`).
///
/// The literal fields are the wall clock of the zone named by `offset`. Without a zone
/// suffix they are read as UTC. Values are only obtainable through [`FromStr`], so the
/// absolute instant is always valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstant {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
    pub offset: Option<ZoneOffset>,
    utc: DateTime<Utc>
}

impl DecodedInstant {
    /// The absolute instant these fields denote.
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.utc
    }
}

impl FromStr for DecodedInstant {
    type Err = DateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(DateError::Empty);
        }

        let (stamp, offset) = match value.split_once('[') {
            Some((stamp, suffix)) => {
                let inner = suffix.strip_suffix(']').ok_or(DateError::UnterminatedZone)?;
                (stamp, Some(parse_zone(inner)?))
            }
            None => (value, None)
        };

        let (digits, fraction) = match stamp.split_once('.') {
            Some((digits, fraction)) => (digits, Some(fraction)),
            None => (stamp, None)
        };

        if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(DateError::InvalidDigits(value.to_string()));
        }

        if !matches!(digits.len(), 8 | 12 | 14) {
            return Err(DateError::InvalidLength(digits.len()));
        }

        let field = |start: usize, end: usize| -> Result<u32, DateError> {
            digits.get(start..end)
                .map_or(Ok(0), |slice| slice.parse().map_err(|_| DateError::InvalidDigits(value.to_string())))
        };

        let year = field(0, 4)? as i32;
        let month = field(4, 6)?;
        let day = field(6, 8)?;
        let hour = field(8, 10)?;
        let minute = field(10, 12)?;
        let second = field(12, 14)?;

        let millisecond = match fraction {
            Some(fraction) => parse_millisecond(fraction, digits.len())?,
            None => 0
        };

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(DateError::InvalidCalendarDate { year, month, day })?;
        let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millisecond)
            .ok_or(DateError::InvalidTime { hour, minute, second })?;

        let utc = to_utc(NaiveDateTime::new(date, time), offset.as_ref())?;

        Ok(DecodedInstant { year, month, day, hour, minute, second, millisecond, offset, utc })
    }
}

/// Decodes an OFX date-time straight into its absolute instant.
pub fn decode_date(value: &str) -> Result<DateTime<Utc>, DateError> {
    DecodedInstant::from_str(value).map(|instant| instant.to_utc())
}

fn to_utc(local: NaiveDateTime, offset: Option<&ZoneOffset>) -> Result<DateTime<Utc>, DateError> {
    let Some(offset) = offset else {
        return Ok(local.and_utc());
    };

    let shift = TimeDelta::try_minutes(offset.offset_minutes()?).ok_or(DateError::Overflow)?;

    local.checked_sub_signed(shift)
        .map(|naive| naive.and_utc())
        .ok_or(DateError::Overflow)
}

fn parse_millisecond(fraction: &str, digit_count: usize) -> Result<u32, DateError> {
    if digit_count != 14 || fraction.is_empty() || !fraction.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(DateError::InvalidFraction(fraction.to_string()));
    }

    //NOTE: Only millisecond precision is meaningful in OFX, extra digits are truncated
    let padded = format!("{:0<3}", &fraction[..fraction.len().min(3)]);

    padded.parse().map_err(|_| DateError::InvalidFraction(fraction.to_string()))
}

fn parse_zone(inner: &str) -> Result<ZoneOffset, DateError> {
    let (hours, name) = match inner.split_once(':') {
        Some((hours, name)) => (hours.trim(), Some(name.trim())),
        None => (inner.trim(), None)
    };

    let unsigned = hours.strip_prefix('+').unwrap_or(hours);
    let offset_hours = Decimal::from_str(unsigned)
        .map_err(|_| DateError::InvalidOffset(hours.to_string()))?;

    Ok(ZoneOffset {
        offset_hours,
        zone_name: name.filter(|name| !name.is_empty()).map(str::to_string)
    })
}
