//! Record schema for archived weather observations.
//!
//! One [`WeatherFileConfig`] is built from exactly one archived JSON file and
//! never mutated afterwards. Fields the source may omit, or whose text may
//! not parse, are `Option`s.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A measurement reported in both Celsius and Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemperatureConfig {
    pub celsius: i32,
    pub fahrenheit: i32,
}

impl TemperatureConfig {
    pub fn new(celsius: i32, fahrenheit: i32) -> Self {
        Self {
            celsius,
            fahrenheit,
        }
    }

    /// Value in the requested unit
    pub fn in_unit(&self, unit: TemperatureUnit) -> i32 {
        match unit {
            TemperatureUnit::Celsius => self.celsius,
            TemperatureUnit::Fahrenheit => self.fahrenheit,
        }
    }
}

/// Degree unit used when reading a [`TemperatureConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Short axis label, `C` or `F`
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }
}

impl std::str::FromStr for TemperatureUnit {
    type Err = crate::error::ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "celsius" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            other => Err(crate::error::ArchiveError::configuration(format!(
                "Unknown degree unit '{}'. Choose 'celsius' or 'fahrenheit'",
                other
            ))),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureUnit::Celsius => write!(f, "celsius"),
            TemperatureUnit::Fahrenheit => write!(f, "fahrenheit"),
        }
    }
}

/// Atmospheric conditions at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub feelslike: TemperatureConfig,
    /// Cloud cover in percent
    pub cloudcover: i32,
    /// Relative humidity in percent
    pub humidity: i32,
    pub precip_inch: Option<f64>,
    pub precip_mm: f64,
    pub pressure_mbar: i32,
    pub pressure_inch: Option<i32>,
    pub temp: TemperatureConfig,
    pub uv_index: i32,
    pub visibility_km: i32,
    pub visibility_mi: Option<i32>,
    pub weathercode: i32,
    /// 16-point compass label, e.g. `WSW`
    pub winddirection_16point: String,
    pub winddirection_deg: i32,
    pub windspeed_kmh: i32,
    pub windspeed_mph: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoonConfig {
    /// Illuminated fraction in percent
    pub illumination: i32,
    pub phase: String,
    pub rise: Option<NaiveTime>,
    pub set: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunConfig {
    pub rise: Option<NaiveTime>,
    pub set: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstronomyConfig {
    pub moon: MoonConfig,
    pub sun: SunConfig,
}

/// Percentage likelihoods attached to an hourly slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChanceOfConfig {
    pub fog: i32,
    pub frost: i32,
    pub hightemp: i32,
    pub overcast: i32,
    pub rain: i32,
    pub remdry: i32,
    pub snow: i32,
    pub sunshine: i32,
    pub thunder: i32,
    pub windy: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatConfig {
    pub dewpoint: TemperatureConfig,
    pub heatindex: TemperatureConfig,
    pub windchill: TemperatureConfig,
}

/// Forecast for one reported hour of a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyConfig {
    pub heat: HeatConfig,
    pub chanceof: ChanceOfConfig,
    pub time: Option<NaiveTime>,
    pub description: String,
    pub icon_url: String,
    pub weather: WeatherConfig,
}

impl fmt::Display for HourlyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weather at {}", display_or_unknown(self.time.as_ref()))
    }
}

/// Forecast for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyConfig {
    pub astronomy: AstronomyConfig,
    pub average: Option<TemperatureConfig>,
    pub date: Option<NaiveDate>,
    /// Hourly slots in source order (ascending time of day)
    pub hourly: Vec<HourlyConfig>,
    /// `(min, max)`
    pub temprange: (TemperatureConfig, TemperatureConfig),
    pub sunhours: f64,
    pub totalsnow_cm: f64,
    pub uv_index: i32,
}

impl DailyConfig {
    pub fn min_temp(&self) -> TemperatureConfig {
        self.temprange.0
    }

    pub fn max_temp(&self) -> TemperatureConfig {
        self.temprange.1
    }
}

impl fmt::Display for DailyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weather at {}", display_or_unknown(self.date.as_ref()))
    }
}

/// The observation at fetch time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditionConfig {
    pub description: String,
    pub icon_url: String,
    pub weather: WeatherConfig,
    /// Local observation timestamp
    pub obs_datetime_loc: Option<NaiveDateTime>,
    pub obs_time: Option<NaiveTime>,
}

impl fmt::Display for CurrentConditionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Current weather condition at {}",
            display_or_unknown(self.obs_datetime_loc.as_ref())
        )
    }
}

/// Station and location metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestAreaConfig {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub population: Option<i64>,
    pub region: String,
    pub weather_url: Option<String>,
}

/// Echo of the query that produced a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfig {
    pub query: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One archived observation: current condition plus the forecast horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherFileConfig {
    pub location: String,
    pub current: CurrentConditionConfig,
    pub nearest_area: NearestAreaConfig,
    pub request: RequestConfig,
    /// Daily forecasts in source order, never empty
    pub daily: Vec<DailyConfig>,
}

impl WeatherFileConfig {
    /// Forecast for "today" as seen by the observation
    pub fn today(&self) -> Option<&DailyConfig> {
        self.daily.first()
    }
}

impl fmt::Display for WeatherFileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeatherFile: {}", self.location)
    }
}

fn display_or_unknown<T: fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}
