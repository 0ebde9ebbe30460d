//! Point source: CSV exports of the address spreadsheet.
//!
//! Header names are matched case-insensitively, each field under one of two
//! spellings. Numbers are read from the leading numeric part of a cell, so
//! `"12.5 km"` is `12.5`; missing or unreadable numbers become `0.0`.

use std::fs::File;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::point::Point;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
}

const LABEL: [&str; 2] = ["direccion", "address"];
const LATITUDE: [&str; 2] = ["latitud", "latitude"];
const LONGITUDE: [&str; 2] = ["longitud", "longitude"];
const REFERENCE_KM: [&str; 2] = ["distancia_km", "distance_km"];

/// Column positions for each field, in header order.
#[derive(Debug, Default)]
struct Columns {
    label: Vec<usize>,
    lat: Vec<usize>,
    lng: Vec<usize>,
    reference_km: Vec<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut columns = Self::default();
        for (index, header) in headers.iter().enumerate() {
            let name = header.trim().to_lowercase();
            let name = name.as_str();
            if LABEL.contains(&name) {
                columns.label.push(index);
            } else if LATITUDE.contains(&name) {
                columns.lat.push(index);
            } else if LONGITUDE.contains(&name) {
                columns.lng.push(index);
            } else if REFERENCE_KM.contains(&name) {
                columns.reference_km.push(index);
            }
        }
        columns
    }
}

/// Load points from a CSV file.
pub fn load_points(path: impl AsRef<Path>) -> Result<Vec<Point>, ImportError> {
    let file = File::open(path)?;
    read_points(file)
}

/// Parse points from CSV with a header row. Row `i` gets id `loc-i`.
pub fn read_points<R: io::Read>(reader: R) -> Result<Vec<Point>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(reader.headers()?);

    let mut points = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let id = format!("loc-{index}");
        let label = first_value(&record, &columns.label).unwrap_or_default();
        let lat = number(&record, &columns.lat, &id, "latitude");
        let lng = number(&record, &columns.lng, &id, "longitude");
        let reference_km = number(&record, &columns.reference_km, &id, "reference distance");

        points.push(Point::new(id, label, lat, lng).with_reference_km(reference_km));
    }

    Ok(points)
}

fn first_value(record: &csv::StringRecord, columns: &[usize]) -> Option<String> {
    columns
        .iter()
        .filter_map(|&index| record.get(index))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn number(record: &csv::StringRecord, columns: &[usize], id: &str, field: &str) -> f64 {
    let Some(raw) = first_value(record, columns) else {
        return 0.0;
    };
    match leading_number(&raw) {
        Some(value) if value.is_finite() => value,
        _ => {
            warn!(%id, field, value = %raw, "unreadable number, using 0");
            0.0
        }
    }
}

/// Parses the longest decimal prefix of `raw`: optional sign, digits with an
/// optional fraction, optional exponent. Trailing text is ignored.
fn leading_number(raw: &str) -> Option<f64> {
    let bytes = raw.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        // "1e" and "1e+" keep just the mantissa
        if exp_end > exp {
            end = exp_end;
        }
    }

    raw[..end].parse().ok()
}
