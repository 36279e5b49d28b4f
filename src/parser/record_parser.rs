//! Mapping of one raw weather document into the record schema
//!
//! Each builder below handles one level of the nested document and tags
//! its errors with the element it was working on, so a failure reads like
//! `weather[1].hourly[3]: Required field 'tempC' not found`.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use super::field_parsers::{
    FieldError, FieldResult, Object, element_object, first_object, parse_compact_time,
    parse_optional, parse_optional_int, parse_required, parse_required_int,
    parse_required_string, parse_temporal, required_array, unwrap_optional_value,
    unwrap_required_value,
};
use crate::constants::{
    CLOCK_TIME_FORMAT, DATE_FORMAT, OBS_DATETIME_FORMAT, keys, optional_fields,
};
use crate::error::{ArchiveError, Result};
use crate::models::{
    AstronomyConfig, ChanceOfConfig, CurrentConditionConfig, DailyConfig, HeatConfig,
    HourlyConfig, MoonConfig, NearestAreaConfig, RequestConfig, SunConfig, TemperatureConfig,
    WeatherConfig, WeatherFileConfig,
};

/// Key names of the air temperature pair, which differ between the
/// current condition (`temp_C`) and hourly slots (`tempC`)
#[derive(Debug, Clone, Copy)]
struct TempKeys {
    celsius: &'static str,
    fahrenheit: &'static str,
}

const CURRENT_TEMP_KEYS: TempKeys = TempKeys {
    celsius: "temp_C",
    fahrenheit: "temp_F",
};

const HOURLY_TEMP_KEYS: TempKeys = TempKeys {
    celsius: "tempC",
    fahrenheit: "tempF",
};

/// Read and parse one archived weather file
///
/// Any structural problem is reported as [`ArchiveError::MalformedRecord`]
/// naming the file and the offending field.
pub fn parse_weather_file(path: &Path, location: &str) -> Result<WeatherFileConfig> {
    debug!("Parsing weather file: {}", path.display());

    let content = std::fs::read_to_string(path)
        .map_err(|e| ArchiveError::malformed(path, format!("could not read file ({})", e)))?;
    let document: Value = serde_json::from_str(&content)
        .map_err(|e| ArchiveError::malformed(path, format!("invalid JSON ({})", e)))?;

    parse_weather_document(&document, location)
        .map_err(|e| ArchiveError::malformed(path, e.to_string()))
}

/// Parse an already decoded raw document
pub fn parse_weather_document(document: &Value, location: &str) -> FieldResult<WeatherFileConfig> {
    let root = element_object(document).map_err(|e| e.within("document"))?;

    let current = first_object(root, keys::CURRENT_CONDITION)
        .and_then(parse_current_condition)
        .map_err(|e| e.within(keys::CURRENT_CONDITION))?;

    let nearest_area = first_object(root, keys::NEAREST_AREA)
        .and_then(parse_nearest_area)
        .map_err(|e| e.within(keys::NEAREST_AREA))?;

    let request = first_object(root, keys::REQUEST)
        .and_then(parse_request)
        .map_err(|e| e.within(keys::REQUEST))?;

    let weather = required_array(root, keys::WEATHER)?;
    if weather.is_empty() {
        return Err(FieldError::new(format!(
            "Field '{}' contains no daily entries",
            keys::WEATHER
        )));
    }

    let daily = weather
        .iter()
        .enumerate()
        .map(|(i, day)| {
            element_object(day)
                .and_then(parse_daily)
                .map_err(|e| e.within(format!("{}[{}]", keys::WEATHER, i)))
        })
        .collect::<FieldResult<Vec<_>>>()?;

    Ok(WeatherFileConfig {
        location: location.to_string(),
        current,
        nearest_area,
        request,
        daily,
    })
}

fn parse_temperature(object: &Object, celsius: &str, fahrenheit: &str) -> FieldResult<TemperatureConfig> {
    Ok(TemperatureConfig {
        celsius: parse_required_int(object, celsius)?,
        fahrenheit: parse_required_int(object, fahrenheit)?,
    })
}

fn parse_weather(object: &Object, temp_keys: TempKeys) -> FieldResult<WeatherConfig> {
    Ok(WeatherConfig {
        feelslike: parse_temperature(object, "FeelsLikeC", "FeelsLikeF")?,
        cloudcover: parse_required_int(object, "cloudcover")?,
        humidity: parse_required_int(object, "humidity")?,
        precip_inch: parse_optional(object, optional_fields::PRECIP_INCHES),
        precip_mm: parse_required(object, "precipMM")?,
        pressure_mbar: parse_required_int(object, "pressure")?,
        pressure_inch: parse_optional_int(object, optional_fields::PRESSURE_INCHES),
        temp: parse_temperature(object, temp_keys.celsius, temp_keys.fahrenheit)?,
        uv_index: parse_required_int(object, "uvIndex")?,
        visibility_km: parse_required_int(object, "visibility")?,
        visibility_mi: parse_optional_int(object, optional_fields::VISIBILITY_MILES),
        weathercode: parse_required_int(object, "weatherCode")?,
        winddirection_16point: parse_required_string(object, "winddir16Point")?,
        winddirection_deg: parse_required_int(object, "winddirDegree")?,
        windspeed_kmh: parse_required_int(object, "windspeedKmph")?,
        windspeed_mph: parse_required_int(object, "windspeedMiles")?,
    })
}

fn parse_current_condition(current: &Object) -> FieldResult<CurrentConditionConfig> {
    Ok(CurrentConditionConfig {
        description: unwrap_required_value(current, keys::WEATHER_DESC)?,
        icon_url: unwrap_required_value(current, keys::WEATHER_ICON_URL)?,
        weather: parse_weather(current, CURRENT_TEMP_KEYS)?,
        obs_datetime_loc: parse_temporal::<NaiveDateTime>(
            current,
            keys::LOCAL_OBS_DATETIME,
            OBS_DATETIME_FORMAT,
        )?,
        obs_time: parse_temporal(current, "observation_time", CLOCK_TIME_FORMAT)?,
    })
}

fn parse_nearest_area(nearest: &Object) -> FieldResult<NearestAreaConfig> {
    Ok(NearestAreaConfig {
        name: unwrap_required_value(nearest, keys::AREA_NAME)?,
        country: unwrap_required_value(nearest, keys::COUNTRY)?,
        lat: parse_required(nearest, "latitude")?,
        lon: parse_required(nearest, "longitude")?,
        population: parse_optional(nearest, optional_fields::POPULATION),
        region: unwrap_required_value(nearest, keys::REGION)?,
        weather_url: unwrap_optional_value(nearest, optional_fields::WEATHER_URL),
    })
}

fn parse_request(request: &Object) -> FieldResult<RequestConfig> {
    Ok(RequestConfig {
        query: parse_required_string(request, "query")?,
        kind: parse_required_string(request, "type")?,
    })
}

fn parse_astronomy(astronomy: &Object) -> FieldResult<AstronomyConfig> {
    Ok(AstronomyConfig {
        moon: MoonConfig {
            illumination: parse_required_int(astronomy, "moon_illumination")?,
            phase: parse_required_string(astronomy, "moon_phase")?,
            rise: parse_temporal(astronomy, "moonrise", CLOCK_TIME_FORMAT)?,
            set: parse_temporal(astronomy, "moonset", CLOCK_TIME_FORMAT)?,
        },
        sun: SunConfig {
            rise: parse_temporal(astronomy, "sunrise", CLOCK_TIME_FORMAT)?,
            set: parse_temporal(astronomy, "sunset", CLOCK_TIME_FORMAT)?,
        },
    })
}

/// Average temperature is absent unless both units are reported
fn parse_average(day: &Object) -> Option<TemperatureConfig> {
    let celsius = parse_optional_int(day, optional_fields::AVG_TEMP_C)?;
    let fahrenheit = parse_optional_int(day, optional_fields::AVG_TEMP_F)?;
    Some(TemperatureConfig::new(celsius, fahrenheit))
}

fn parse_daily(day: &Object) -> FieldResult<DailyConfig> {
    let astronomy = first_object(day, keys::ASTRONOMY)
        .and_then(parse_astronomy)
        .map_err(|e| e.within(keys::ASTRONOMY))?;

    let hourly = required_array(day, keys::HOURLY)?
        .iter()
        .enumerate()
        .map(|(i, hour)| {
            element_object(hour)
                .and_then(parse_hourly)
                .map_err(|e| e.within(format!("{}[{}]", keys::HOURLY, i)))
        })
        .collect::<FieldResult<Vec<_>>>()?;

    Ok(DailyConfig {
        astronomy,
        average: parse_average(day),
        date: parse_temporal::<NaiveDate>(day, "date", DATE_FORMAT)?,
        hourly,
        temprange: (
            parse_temperature(day, "mintempC", "mintempF")?,
            parse_temperature(day, "maxtempC", "maxtempF")?,
        ),
        sunhours: parse_required(day, "sunHour")?,
        totalsnow_cm: parse_required(day, "totalSnow_cm")?,
        uv_index: parse_required_int(day, "uvIndex")?,
    })
}

fn parse_hourly(hour: &Object) -> FieldResult<HourlyConfig> {
    Ok(HourlyConfig {
        heat: HeatConfig {
            dewpoint: parse_temperature(hour, "DewPointC", "DewPointF")?,
            heatindex: parse_temperature(hour, "HeatIndexC", "HeatIndexF")?,
            windchill: parse_temperature(hour, "WindChillC", "WindChillF")?,
        },
        chanceof: ChanceOfConfig {
            fog: parse_required_int(hour, "chanceoffog")?,
            frost: parse_required_int(hour, "chanceoffrost")?,
            hightemp: parse_required_int(hour, "chanceofhightemp")?,
            overcast: parse_required_int(hour, "chanceofovercast")?,
            rain: parse_required_int(hour, "chanceofrain")?,
            remdry: parse_required_int(hour, "chanceofremdry")?,
            snow: parse_required_int(hour, "chanceofsnow")?,
            sunshine: parse_required_int(hour, "chanceofsunshine")?,
            thunder: parse_required_int(hour, "chanceofthunder")?,
            windy: parse_required_int(hour, "chanceofwindy")?,
        },
        time: parse_compact_time(hour, keys::TIME)?,
        description: unwrap_required_value(hour, keys::WEATHER_DESC)?,
        icon_url: unwrap_required_value(hour, keys::WEATHER_ICON_URL)?,
        weather: parse_weather(hour, HOURLY_TEMP_KEYS)?,
    })
}
