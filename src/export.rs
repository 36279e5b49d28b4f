//! Flattened export of a whole archive directory.
//!
//! Each archived document is reshaped so that every value sits at a fixed
//! key path, flattened into `a_b_c` column names and collected into a
//! [`FlatTable`]: one row per file, one column per key path seen in any
//! file. The table converts to a polars [`DataFrame`] for CSV output.

use polars::prelude::*;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::constants::{WEATHER_FILE_EXTENSION, keys};
use crate::error::{ArchiveError, Result};
use crate::naming::location_from_file_name;
use crate::parser::field_parsers::{
    FieldResult, Object, first_object, parse_required_int, required_array, unwrap_value,
};
use crate::parser::FieldError;

/// Column used as the row index of an export
pub const INDEX_COLUMN: &str = "current_condition_localObsDateTime";

/// Separator between nested key names
const KEY_SEPARATOR: &str = "_";

/// Replace a `[{"value": ...}]` wrapper in place with its text
fn unwrap_in_place(object: &mut Object, field_name: &str) -> FieldResult<()> {
    let text = object
        .get(field_name)
        .and_then(unwrap_value)
        .ok_or_else(|| {
            FieldError::new(format!(
                "Field '{}' is not a wrapped value",
                field_name
            ))
        })?;
    object.insert(field_name.to_string(), Value::String(text));
    Ok(())
}

/// Reshape one raw document into a nested record with stable key paths
///
/// The daily entries become `weather0`, `weather1`, ... and each hourly
/// entry is keyed by its zero-padded time, e.g. `weather0.hourly0900`.
pub fn prepare_record(document: &Value, location: &str) -> FieldResult<Object> {
    let root = document
        .as_object()
        .ok_or_else(|| FieldError::new("Document is not a JSON object"))?;

    let mut record = Object::new();
    record.insert("location".to_string(), Value::String(location.to_string()));

    let mut current = first_object(root, keys::CURRENT_CONDITION)
        .map_err(|e| e.within(keys::CURRENT_CONDITION))?
        .clone();
    for field in [keys::WEATHER_DESC, keys::WEATHER_ICON_URL] {
        unwrap_in_place(&mut current, field).map_err(|e| e.within(keys::CURRENT_CONDITION))?;
    }
    record.insert(keys::CURRENT_CONDITION.to_string(), Value::Object(current));

    let mut area = first_object(root, keys::NEAREST_AREA)
        .map_err(|e| e.within(keys::NEAREST_AREA))?
        .clone();
    for field in [keys::AREA_NAME, keys::COUNTRY, keys::REGION, keys::WEATHER_URL] {
        unwrap_in_place(&mut area, field).map_err(|e| e.within(keys::NEAREST_AREA))?;
    }
    record.insert(keys::NEAREST_AREA.to_string(), Value::Object(area));

    let request = first_object(root, keys::REQUEST)?.clone();
    record.insert(keys::REQUEST.to_string(), Value::Object(request));

    for (i, day) in required_array(root, keys::WEATHER)?.iter().enumerate() {
        let day = prepare_day(day).map_err(|e| e.within(format!("{}[{}]", keys::WEATHER, i)))?;
        record.insert(format!("{}{}", keys::WEATHER, i), Value::Object(day));
    }

    Ok(record)
}

fn prepare_day(day: &Value) -> FieldResult<Object> {
    let mut day = day
        .as_object()
        .ok_or_else(|| FieldError::new("Daily entry is not an object"))?
        .clone();

    let astronomy = first_object(&day, keys::ASTRONOMY)?.clone();
    day.insert(keys::ASTRONOMY.to_string(), Value::Object(astronomy));

    let hourly = match day.remove(keys::HOURLY) {
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(FieldError::new("Field 'hourly' is not an array")),
        None => return Err(FieldError::new("Required field 'hourly' not found")),
    };

    for (j, entry) in hourly.into_iter().enumerate() {
        let Value::Object(mut entry) = entry else {
            return Err(FieldError::new("Hourly entry is not an object")
                .within(format!("{}[{}]", keys::HOURLY, j)));
        };
        let time = prepare_hour(&mut entry)
            .map_err(|e| e.within(format!("{}[{}]", keys::HOURLY, j)))?;
        day.insert(format!("{}{:04}", keys::HOURLY, time), Value::Object(entry));
    }

    Ok(day)
}

fn prepare_hour(entry: &mut Object) -> FieldResult<i32> {
    unwrap_in_place(entry, keys::WEATHER_DESC)?;
    unwrap_in_place(entry, keys::WEATHER_ICON_URL)?;
    parse_required_int(entry, keys::TIME)
}

/// Flatten nested objects into `parent_child` keys
///
/// Arrays are kept as compact JSON text and null leaves are dropped.
pub fn flatten(value: &Object) -> BTreeMap<String, String> {
    let mut flat = BTreeMap::new();
    flatten_into(value, None, &mut flat);
    flat
}

fn flatten_into(
    object: &Map<String, Value>,
    prefix: Option<&str>,
    out: &mut BTreeMap<String, String>,
) {
    for (key, value) in object {
        let name = match prefix {
            Some(prefix) => format!("{}{}{}", prefix, KEY_SEPARATOR, key),
            None => key.clone(),
        };
        match value {
            Value::Object(inner) => flatten_into(inner, Some(&name), out),
            Value::Null => {}
            Value::String(text) => {
                out.insert(name, text.clone());
            }
            other => {
                out.insert(name, other.to_string());
            }
        }
    }
}

/// Flattened rows of an archive, one per document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatTable {
    columns: Vec<String>,
    rows: Vec<BTreeMap<String, String>>,
}

impl FlatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row, extending the column set with any new keys
    ///
    /// The index column always stays in first position.
    pub fn push(&mut self, row: BTreeMap<String, String>) {
        let known: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        let new_columns: Vec<String> = row
            .keys()
            .filter(|k| !known.contains(k.as_str()))
            .cloned()
            .collect();

        for column in new_columns {
            if column == INDEX_COLUMN {
                self.columns.insert(0, column);
            } else {
                self.columns.push(column);
            }
        }
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value, `None` when the row lacks the column
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Build a DataFrame of string columns, missing cells as nulls
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .map(|name| {
                let values: Vec<Option<&str>> = self
                    .rows
                    .iter()
                    .map(|row| row.get(name).map(String::as_str))
                    .collect();
                Column::new(name.as_str().into(), values)
            })
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    /// Write the table as CSV with a header row
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut df = self.to_dataframe()?;
        let mut file = std::fs::File::create(path)?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;

        info!(
            "Exported {} rows x {} columns to {}",
            df.height(),
            df.width(),
            path.display()
        );
        Ok(())
    }
}

fn load_row(path: &Path) -> Result<BTreeMap<String, String>> {
    let location = location_from_file_name(path)
        .ok_or_else(|| ArchiveError::InvalidFileName {
            path: path.to_path_buf(),
        })?;

    let content = std::fs::read_to_string(path)
        .map_err(|e| ArchiveError::malformed(path, format!("could not read file ({})", e)))?;
    let document: Value = serde_json::from_str(&content)
        .map_err(|e| ArchiveError::malformed(path, format!("invalid JSON ({})", e)))?;
    let record = prepare_record(&document, &location)
        .map_err(|e| ArchiveError::malformed(path, e.to_string()))?;

    Ok(flatten(&record))
}

/// Flatten every `*.json` document in `directory`, sorted by file name
///
/// Documents that cannot be read or reshaped are logged and skipped.
pub fn load_all(directory: &Path) -> Result<FlatTable> {
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&directory.to_string_lossy()),
        WEATHER_FILE_EXTENSION
    );
    let mut files: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    debug!("Found {} documents to export in {}", files.len(), directory.display());

    let mut table = FlatTable::new();
    for path in &files {
        match load_row(path) {
            Ok(row) => table.push(row),
            Err(e) => error!("File {} could not be exported. Error: {}", path.display(), e),
        }
    }

    Ok(table)
}
