//! Application constants for the weather archive
//!
//! Formats, file naming conventions and source-schema key names shared by
//! the crawler, the parser and the stack builder.

// =============================================================================
// Temporal Formats
// =============================================================================

/// Local observation timestamp as reported by the source, e.g. `2023-01-05 09:12 AM`
pub const OBS_DATETIME_FORMAT: &str = "%Y-%m-%d %I:%M %p";

/// 12-hour clock time of day, e.g. `06:48 PM`
pub const CLOCK_TIME_FORMAT: &str = "%I:%M %p";

/// Compact 24-hour time of day after zero-padding, e.g. `0900`
pub const COMPACT_TIME_FORMAT: &str = "%H%M";

/// Calendar date used by daily entries and user-supplied range boundaries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date prefix of archived file names
pub const FILE_DATE_FORMAT: &str = "%Y%m%d";

/// Full timestamp prefix of archived file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M";

/// Timestamp written into crawler log lines
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M%S";

// =============================================================================
// Archive Layout
// =============================================================================

/// Extension of archived observation files
pub const WEATHER_FILE_EXTENSION: &str = "json";

/// Regex matching `YYYYMMDD-HHMM_<location>.json`
pub const WEATHER_FILE_NAME_PATTERN: &str = r"^(\d{8})-(\d{4})_(.+)\.json$";

// =============================================================================
// Crawler Defaults
// =============================================================================

/// Default weather API endpoint
pub const DEFAULT_BASE_URL: &str = "http://v2.wttr.in";

/// Query string selecting the JSON (j1) response format
pub const JSON_FORMAT_QUERY: &str = "format=j1";

/// Default crawler configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Application directory name under the user config directory
pub const APP_DIR_NAME: &str = "wttr-archive";

// =============================================================================
// Source Schema
// =============================================================================

/// Top-level keys of a raw weather document
pub mod keys {
    pub const CURRENT_CONDITION: &str = "current_condition";
    pub const NEAREST_AREA: &str = "nearest_area";
    pub const REQUEST: &str = "request";
    pub const WEATHER: &str = "weather";
    pub const ASTRONOMY: &str = "astronomy";
    pub const HOURLY: &str = "hourly";

    /// Key inside the `[{"value": ...}]` wrapper
    pub const WRAPPED_VALUE: &str = "value";

    pub const LOCAL_OBS_DATETIME: &str = "localObsDateTime";
    pub const WEATHER_DESC: &str = "weatherDesc";
    pub const WEATHER_ICON_URL: &str = "weatherIconUrl";
    pub const AREA_NAME: &str = "areaName";
    pub const COUNTRY: &str = "country";
    pub const REGION: &str = "region";
    pub const WEATHER_URL: &str = "weatherUrl";
    pub const TIME: &str = "time";
}

/// Fields that may legitimately be missing from a raw document.
///
/// Each of these resolves to `None` instead of failing the whole record.
pub mod optional_fields {
    pub const PRECIP_INCHES: &str = "precipInches";
    pub const PRESSURE_INCHES: &str = "pressureInches";
    pub const VISIBILITY_MILES: &str = "visibilityMiles";
    pub const POPULATION: &str = "population";
    pub const WEATHER_URL: &str = "weatherUrl";
    pub const AVG_TEMP_C: &str = "avgtempC";
    pub const AVG_TEMP_F: &str = "avgtempF";
}
