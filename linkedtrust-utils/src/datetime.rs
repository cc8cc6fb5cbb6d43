use chrono::{
    DateTime,
    NaiveDate,
    NaiveDateTime,
    SecondsFormat,
    TimeZone,
    Utc,
};

#[derive(thiserror::Error, Debug)]
#[error("invalid date")]
pub struct DateTimeParseError;

/// Same format as JavaScript's Date.toISOString()
pub fn format_iso_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses RFC 3339 date-time, date-time without offset (UTC is assumed)
/// or plain date (UTC midnight)
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, DateTimeParseError> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.with_timezone(&Utc));
    };
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        };
    };
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DateTimeParseError)?;
    let naive = date.and_hms_opt(0, 0, 0).ok_or(DateTimeParseError)?;
    Ok(Utc.from_utc_datetime(&naive))
}
