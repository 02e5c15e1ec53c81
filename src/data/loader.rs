use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::model::{Axis, Point, PointCloud};
use super::writer::ANNOTATION_PREFIX;
use crate::error::{LoadError, LoadErrorKind};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a point cloud from a comma-separated file.
///
/// Every row must hold exactly three numeric fields, read positionally as
/// X, Y, Z. There is no header detection: a non-numeric first row is a
/// malformed row like any other. Blank lines are skipped, and so is a final
/// `# Crown Z value: …` line, so files written by a save load back; any
/// other `#` line is rejected.
pub fn load_point_cloud(path: &Path) -> Result<PointCloud, LoadError> {
    read_points(path).map_err(|kind| LoadError {
        path: path.to_path_buf(),
        kind,
    })
}

fn read_points(path: &Path) -> Result<PointCloud, LoadErrorKind> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let mut points = Vec::new();
    let mut records = reader.records().peekable();
    while let Some(result) = records.next() {
        let record = result?;
        if records.peek().is_none() && is_annotation(&record) {
            break;
        }
        points.push(parse_row(&record)?);
    }

    if points.is_empty() {
        return Err(LoadErrorKind::Empty);
    }
    Ok(PointCloud::from_points(points))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Turn one CSV record into a [`Point`], or say exactly what is wrong with it.
fn parse_row(record: &StringRecord) -> Result<Point, LoadErrorKind> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    if record.len() != 3 {
        return Err(LoadErrorKind::FieldCount {
            line,
            found: record.len(),
        });
    }

    let mut xyz = [0.0; 3];
    for ((slot, text), axis) in xyz.iter_mut().zip(record.iter()).zip(Axis::ALL) {
        *slot = parse_coordinate(text).ok_or_else(|| LoadErrorKind::InvalidNumber {
            line,
            axis,
            text: text.to_string(),
        })?;
    }

    Ok(Point::new(xyz[0], xyz[1], xyz[2]))
}

fn is_annotation(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].starts_with(ANNOTATION_PREFIX.trim_end())
}

fn parse_coordinate(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
