use super::registry::DEFAULT_LOG_NAME;
use super::LogError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use std::fmt::Write as _;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%y - %-H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat(String);

impl TimestampFormat {
    pub fn parse(raw: &str) -> Result<Self, LogError> {
        let invalid = || LogError::InvalidTimestampFormat {
            format: raw.to_string(),
        };
        if StrftimeItems::new(raw).any(|item| matches!(item, Item::Error)) {
            return Err(invalid());
        }
        // parse-only specifiers such as `%#z` only fail once rendered
        let mut trial = String::new();
        write!(&mut trial, "{}", Utc::now().format(raw)).map_err(|_| invalid())?;
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self(DEFAULT_TIMESTAMP_FORMAT.to_string())
    }
}

impl std::fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampZone {
    #[default]
    Local,
    Named(Tz),
}

impl TimestampZone {
    pub fn parse(raw: &str) -> Result<Self, LogError> {
        raw.parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| LogError::InvalidTimezone {
                timezone: raw.to_string(),
            })
    }
}

pub fn render_timestamp(
    format: &TimestampFormat,
    zone: TimestampZone,
    instant: DateTime<Utc>,
) -> Result<String, LogError> {
    let rendered = match zone {
        TimestampZone::Local => instant.with_timezone(&Local).format(format.as_str()),
        TimestampZone::Named(tz) => instant.with_timezone(&tz).format(format.as_str()),
    };
    let mut text = String::new();
    write!(&mut text, "{rendered}").map_err(|_| LogError::InvalidTimestampFormat {
        format: format.as_str().to_string(),
    })?;
    Ok(text)
}

pub fn format_entry<S: AsRef<str>>(content: &str, meta: &[S], timestamp: Option<&str>) -> String {
    let mut line = String::new();
    if let Some(timestamp) = timestamp {
        line.push('[');
        line.push_str(timestamp);
        line.push_str("]: ");
    }
    if !meta.is_empty() {
        for item in meta {
            line.push('[');
            line.push_str(item.as_ref());
            line.push(']');
        }
        line.push_str(" - ");
    }
    line.push_str(content);
    line.push('\n');
    line
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOptions {
    pub meta: Vec<String>,
    pub timestamp: bool,
    pub log_name: String,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            meta: Vec::new(),
            timestamp: true,
            log_name: DEFAULT_LOG_NAME.to_string(),
        }
    }
}

impl EntryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meta<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.meta = items.into_iter().map(|item| item.to_string()).collect();
        self
    }

    pub fn tag(mut self, item: impl ToString) -> Self {
        self.meta.push(item.to_string());
        self
    }

    pub fn timestamp(mut self, enabled: bool) -> Self {
        self.timestamp = enabled;
        self
    }

    pub fn log(mut self, log_name: impl Into<String>) -> Self {
        self.log_name = log_name.into();
        self
    }

    pub fn from_legacy(meta: LegacyMeta, timestamp: bool, log_name: &str) -> Self {
        let (meta, timestamp) = match meta {
            LegacyMeta::Tags(tags) => (tags, timestamp),
            LegacyMeta::Flag(flag) => (Vec::new(), flag),
        };
        Self {
            meta,
            timestamp,
            log_name: log_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyMeta {
    Tags(Vec<String>),
    Flag(bool),
}

impl From<bool> for LegacyMeta {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl<T: ToString> From<Vec<T>> for LegacyMeta {
    fn from(value: Vec<T>) -> Self {
        Self::Tags(value.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for LegacyMeta {
    fn from(value: [T; N]) -> Self {
        Self::Tags(value.iter().map(ToString::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, 3, 7, 8, 5, 9)
            .single()
            .expect("valid instant")
    }

    #[test]
    fn plain_content_gets_only_a_newline() {
        assert_eq!(format_entry::<&str>("hello", &[], None), "hello\n");
    }

    #[test]
    fn meta_segments_keep_input_order() {
        assert_eq!(
            format_entry("Entry with meta", &["5678", "Label"], None),
            "[5678][Label] - Entry with meta\n"
        );
    }

    #[test]
    fn timestamp_and_meta_combine() {
        assert_eq!(
            format_entry("hit", &["GET"], Some("07/03/13 - 8:05:09")),
            "[07/03/13 - 8:05:09]: [GET] - hit\n"
        );
    }

    #[test]
    fn default_format_matches_day_month_year_pattern() {
        let zone = TimestampZone::parse("UTC").expect("utc");
        assert_eq!(
            render_timestamp(&TimestampFormat::default(), zone, fixed_instant())
                .expect("render"),
            "07/03/13 - 8:05:09"
        );
    }

    #[test]
    fn named_zone_shifts_rendered_time() {
        let zone = TimestampZone::parse("Asia/Tokyo").expect("tokyo");
        let format = TimestampFormat::parse("%Y-%m-%d %H:%M").expect("format");
        assert_eq!(
            render_timestamp(&format, zone, fixed_instant()).expect("render"),
            "2013-03-07 17:05"
        );
    }

    #[test]
    fn rejects_bad_zone_and_format() {
        assert!(matches!(
            TimestampZone::parse("Mars/Olympus"),
            Err(LogError::InvalidTimezone { .. })
        ));
        assert!(matches!(
            TimestampFormat::parse("%Q"),
            Err(LogError::InvalidTimestampFormat { .. })
        ));
    }

    #[test]
    fn parse_only_offset_specifier_is_rejected() {
        assert!(matches!(
            TimestampFormat::parse("%#z"),
            Err(LogError::InvalidTimestampFormat { ref format }) if format == "%#z"
        ));
        for accepted in ["%:::z", "%.3f %s %Z", "%+", "%c", "", "%n%t"] {
            let format = TimestampFormat::parse(accepted).expect("renderable format");
            render_timestamp(&format, TimestampZone::Local, fixed_instant()).expect("render");
        }
    }

    #[test]
    fn legacy_flag_in_meta_position_overrides_timestamp() {
        let options = EntryOptions::from_legacy(LegacyMeta::from(false), true, "default");
        assert!(!options.timestamp);
        assert!(options.meta.is_empty());

        let options = EntryOptions::from_legacy(LegacyMeta::from(["a", "b"]), false, "other");
        assert_eq!(options.meta, vec!["a", "b"]);
        assert!(!options.timestamp);
        assert_eq!(options.log_name, "other");
    }
}
