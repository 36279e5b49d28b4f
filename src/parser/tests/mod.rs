//! Test utilities and fixture documents for weather file parser testing
//!
//! The fixtures mirror the shape of a real `format=j1` response: every
//! value is a string, text is wrapped as `[{"value": ...}]` and each day
//! carries eight three-hourly slots.

use serde_json::{Value, json};
use std::path::{Path, PathBuf};


/// Hours reported per day, every three hours
pub const HOURLY_TIMES: [u32; 8] = [0, 300, 600, 900, 1200, 1500, 1800, 2100];

/// Helper to create one hourly slot
pub fn sample_hourly(time: u32, temp_c: i32) -> Value {
    let temp_f = temp_c * 9 / 5 + 32;
    json!({
        "DewPointC": "2",
        "DewPointF": "36",
        "FeelsLikeC": (temp_c - 2).to_string(),
        "FeelsLikeF": (temp_f - 4).to_string(),
        "HeatIndexC": temp_c.to_string(),
        "HeatIndexF": temp_f.to_string(),
        "WindChillC": (temp_c - 2).to_string(),
        "WindChillF": (temp_f - 4).to_string(),
        "WindGustKmph": "24",
        "WindGustMiles": "15",
        "chanceoffog": "0",
        "chanceoffrost": "0",
        "chanceofhightemp": "0",
        "chanceofovercast": "87",
        "chanceofrain": "64",
        "chanceofremdry": "0",
        "chanceofsnow": "0",
        "chanceofsunshine": "12",
        "chanceofthunder": "0",
        "chanceofwindy": "0",
        "cloudcover": "92",
        "diffRad": "0.0",
        "humidity": "87",
        "precipInches": "0.0",
        "precipMM": "0.2",
        "pressure": "1012",
        "pressureInches": "30",
        "shortRad": "0.0",
        "tempC": temp_c.to_string(),
        "tempF": temp_f.to_string(),
        "time": time.to_string(),
        "uvIndex": "1",
        "visibility": "10",
        "visibilityMiles": "6",
        "weatherCode": "176",
        "weatherDesc": [{"value": "Patchy rain nearby"}],
        "weatherIconUrl": [{"value": ""}],
        "winddir16Point": "WSW",
        "winddirDegree": "248",
        "windspeedKmph": "17",
        "windspeedMiles": "11"
    })
}

/// Helper to create one daily entry with a full set of hourly slots
pub fn sample_day(date: &str) -> Value {
    let hourly: Vec<Value> = HOURLY_TIMES
        .iter()
        .enumerate()
        .map(|(i, &time)| sample_hourly(time, 2 + i as i32))
        .collect();

    json!({
        "astronomy": [{
            "moon_illumination": "93",
            "moon_phase": "Waxing Gibbous",
            "moonrise": "02:19 PM",
            "moonset": "06:42 AM",
            "sunrise": "08:16 AM",
            "sunset": "04:12 PM"
        }],
        "avgtempC": "5",
        "avgtempF": "41",
        "date": date,
        "hourly": hourly,
        "maxtempC": "9",
        "maxtempF": "48",
        "mintempC": "2",
        "mintempF": "36",
        "sunHour": "2.5",
        "totalSnow_cm": "0.3",
        "uvIndex": "1"
    })
}

/// Helper to create a complete raw document observed at `obs_datetime`
///
/// `obs_datetime` uses the source format, e.g. `2023-01-05 09:12 AM`.
pub fn sample_document(obs_datetime: &str) -> Value {
    let date = obs_datetime.split(' ').next().unwrap_or("2023-01-05");

    json!({
        "current_condition": [{
            "FeelsLikeC": "16",
            "FeelsLikeF": "61",
            "cloudcover": "75",
            "humidity": "72",
            "localObsDateTime": obs_datetime,
            "observation_time": "08:12 AM",
            "precipInches": "0.0",
            "precipMM": "0.1",
            "pressure": "1015",
            "pressureInches": "30",
            "temp_C": "18",
            "temp_F": "64",
            "uvIndex": "4",
            "visibility": "10",
            "visibilityMiles": "6",
            "weatherCode": "116",
            "weatherDesc": [{"value": "Partly cloudy"}],
            "weatherIconUrl": [{"value": ""}],
            "winddir16Point": "WSW",
            "winddirDegree": "250",
            "windspeedKmph": "13",
            "windspeedMiles": "8"
        }],
        "nearest_area": [{
            "areaName": [{"value": "Berlin"}],
            "country": [{"value": "Germany"}],
            "latitude": "52.517",
            "longitude": "13.400",
            "population": "3426354",
            "region": [{"value": "Berlin"}],
            "weatherUrl": [{"value": ""}]
        }],
        "request": [{
            "query": "Lat 52.52 and Lon 13.40",
            "type": "LatLon"
        }],
        "weather": [sample_day(date), sample_day("2023-01-06"), sample_day("2023-01-07")]
    })
}

/// Helper to write a document into `dir` under `file_name`
pub fn write_weather_file(dir: &Path, file_name: &str, document: &Value) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
    path
}

/// Remove `key` from the first current condition entry
pub fn remove_current_key(document: &mut Value, key: &str) {
    document["current_condition"][0]
        .as_object_mut()
        .unwrap()
        .remove(key);
}
