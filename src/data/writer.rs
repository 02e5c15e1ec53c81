use std::ffi::OsString;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use tempfile::NamedTempFile;

use super::model::PointCloud;
use crate::error::SaveError;

/// Marker inserted before the extension of a saved copy.
const CROWN_SUFFIX: &str = "_crown";

/// Prefix of the trailing comment line that records the chosen threshold.
pub const ANNOTATION_PREFIX: &str = "# Crown Z value: ";

/// `dir/name.ext` → `dir/name_crown.ext`.
///
/// Only the last extension is kept after the marker (`a.b.csv` →
/// `a.b_crown.csv`); a file without an extension just gets the marker.
pub fn crown_path(source: &Path) -> PathBuf {
    let mut name: OsString = source.file_stem().unwrap_or_default().to_os_string();
    name.push(CROWN_SUFFIX);
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    source.with_file_name(name)
}

/// The annotation line (without newline) for `threshold`.
///
/// Always plain decimal notation, never an exponent. Whole numbers keep a
/// decimal point, so `15` is written as `15.0`.
pub fn annotation_line(threshold: f64) -> String {
    let mut value = threshold.to_string();
    if !value.contains('.') {
        value.push_str(".0");
    }
    format!("{ANNOTATION_PREFIX}{value}")
}

/// Write `cloud` followed by the threshold annotation to `target`.
///
/// Rows go to a temporary file next to `target` first; the target is only
/// replaced once everything was written and flushed, so a failed save never
/// leaves a half-written file under the derived name. The result gets the
/// permissions of `source`, the file the cloud was loaded from.
pub fn write_crown_file(
    target: &Path,
    source: &Path,
    cloud: &PointCloud,
    threshold: f64,
) -> Result<(), SaveError> {
    write_atomically(target, source, cloud, threshold).map_err(|err| SaveError {
        path: target.to_path_buf(),
        source: err,
    })
}

fn write_atomically(
    target: &Path,
    source: &Path,
    cloud: &PointCloud,
    threshold: f64,
) -> io::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;

    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write_rows(&mut out, cloud, threshold)?;
        out.flush()?;
    }

    // Temp files are created owner-only; match the source instead.
    match fs::metadata(source) {
        Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
        Err(e) => log::warn!(
            "Cannot read permissions of {}, keeping defaults: {e}",
            source.display()
        ),
    }

    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

/// Rows use the shortest decimal form that reads back to the same value
/// (`1`, `2.5`), matching what integer-valued source files contain.
fn write_rows<W: Write>(out: W, cloud: &PointCloud, threshold: f64) -> io::Result<()> {
    let mut csv = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    for p in cloud.points() {
        csv.write_record([p.x.to_string(), p.y.to_string(), p.z.to_string()])?;
    }

    let mut out = csv.into_inner().map_err(|e| e.into_error())?;
    writeln!(out, "{}", annotation_line(threshold))?;
    Ok(())
}
