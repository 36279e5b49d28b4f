//! Temperature time series extracted from a stack.
//!
//! This is the data behind a temperature plot: one point per archived
//! observation, in stack order. Rendering is left to the caller; the series
//! converts to a polars [`DataFrame`] and can be written out as CSV.

use chrono::NaiveDateTime;
use polars::prelude::*;
use serde::Serialize;
use std::io::Write;

use crate::error::Result;
use crate::models::TemperatureUnit;

/// Timestamp format of the `time` column
const SERIES_TIME_FORMAT: &str = "%y-%m-%d %H:%M";

/// Temperature reading at one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemperaturePoint {
    pub observed_at: Option<NaiveDateTime>,
    pub temperature: i32,
    pub feelslike: Option<i32>,
}

/// Temperature readings of one location over time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemperatureSeries {
    pub location: String,
    pub unit: TemperatureUnit,
    /// Whether the feels-like reading was requested
    pub feelslike: bool,
    pub points: Vec<TemperaturePoint>,
}

impl TemperatureSeries {
    /// Axis label in the style `Temperature [C]`
    pub fn label(&self) -> String {
        format!("Temperature [{}]", self.unit.symbol())
    }

    /// Columns `time`, `real` and, if requested, `feels like`
    ///
    /// Observations without a parsed timestamp have a null time cell.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let times: Vec<Option<String>> = self
            .points
            .iter()
            .map(|p| p.observed_at.map(|t| t.format(SERIES_TIME_FORMAT).to_string()))
            .collect();
        let real: Vec<i32> = self.points.iter().map(|p| p.temperature).collect();

        let mut columns = vec![
            Column::new("time".into(), times),
            Column::new("real".into(), real),
        ];
        if self.feelslike {
            let feels: Vec<Option<i32>> = self.points.iter().map(|p| p.feelslike).collect();
            columns.push(Column::new("feels like".into(), feels));
        }

        Ok(DataFrame::new(columns)?)
    }

    /// Write the series as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut df = self.to_dataframe()?;
        CsvWriter::new(writer).include_header(true).finish(&mut df)?;
        Ok(())
    }

    /// Render the series as CSV text
    pub fn to_csv(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
