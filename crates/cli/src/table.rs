//! CSV table I/O and column naming.
//!
//! Output columns are appended with the classifier's initials as suffix and are
//! never allowed to replace an existing column.

use anyhow::{bail, Context, Result};
use jellyfish::api::{ClassificationResult, JellyfishFlag, TailConfidence};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// Input column names and the suffix used for derived columns.
#[derive(Clone, Debug)]
pub struct Columns {
    pub ra: String,
    pub dec: String,
    pub bcg_ra: String,
    pub bcg_dec: String,
    pub initials: String,
}

impl Columns {
    pub fn flag(&self) -> String {
        format!("JF_flag_{}", self.initials)
    }
    pub fn confidence(&self) -> String {
        format!("tail_confidence_{}", self.initials)
    }
    pub fn tail_angle(&self) -> String {
        format!("tail_angle_{}", self.initials)
    }
    pub fn bearing(&self) -> String {
        "BCG_angle_sky".to_string()
    }
    pub fn deviation(&self) -> String {
        format!("tail_offset_deviation_{}", self.initials)
    }
    pub fn alignment(&self) -> String {
        format!("tail_offset_BCG_{}", self.initials)
    }

    pub fn classification_outputs(&self) -> Vec<String> {
        vec![self.flag(), self.confidence(), self.tail_angle()]
    }

    pub fn offset_outputs(&self) -> Vec<String> {
        vec![self.bearing(), self.deviation(), self.alignment()]
    }
}

pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), path = %path.display(), "read table");
    Ok(df)
}

pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), path = %path.display(), "wrote table");
    Ok(())
}

/// Numeric column as `f64`; empty cells are an error.
pub fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .with_context(|| format!("missing column {name:?}"))?;
    let cast = series
        .cast(&DataType::Float64)
        .with_context(|| format!("column {name:?} is not numeric"))?;
    let values = cast.f64()?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("column {name:?} row {row} is empty")))
        .collect()
}

/// Numeric column as `f64` with empty cells read as NaN (undefined offsets).
pub fn f64_column_nullable(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .with_context(|| format!("missing column {name:?}"))?;
    let cast = series
        .cast(&DataType::Float64)
        .with_context(|| format!("column {name:?} is not numeric"))?;
    Ok(cast.f64()?.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Integer column as `i64`; empty cells are an error.
pub fn i64_column(df: &DataFrame, name: &str) -> Result<Vec<i64>> {
    let series = df
        .column(name)
        .with_context(|| format!("missing column {name:?}"))?;
    let cast = series
        .cast(&DataType::Int64)
        .with_context(|| format!("column {name:?} is not an integer column"))?;
    let values = cast.i64()?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("column {name:?} row {row} is empty")))
        .collect()
}

/// Fail if any of `names` is already present.
pub fn ensure_absent(df: &DataFrame, names: &[String]) -> Result<()> {
    for name in names {
        if df.column(name).is_ok() {
            bail!("column {name:?} already exists; refusing to overwrite it");
        }
    }
    Ok(())
}

pub fn append_column(df: &mut DataFrame, series: Series) -> Result<()> {
    let name = series.name().to_string();
    ensure_absent(df, std::slice::from_ref(&name))?;
    df.with_column(series)
        .with_context(|| format!("appending column {name:?}"))?;
    Ok(())
}

pub fn append_classifications(
    df: &mut DataFrame,
    results: &[ClassificationResult],
    cols: &Columns,
) -> Result<()> {
    if results.len() != df.height() {
        bail!(
            "{} classifications for a table of {} rows",
            results.len(),
            df.height()
        );
    }
    let flags: Vec<i32> = results.iter().map(|r| r.flag().code()).collect();
    let confidence: Vec<i32> = results.iter().map(|r| r.confidence().code()).collect();
    let angles: Vec<f64> = results.iter().map(|r| r.tail_angle()).collect();
    append_column(df, Series::new(cols.flag().as_str().into(), flags))?;
    append_column(df, Series::new(cols.confidence().as_str().into(), confidence))?;
    append_column(df, Series::new(cols.tail_angle().as_str().into(), angles))?;
    Ok(())
}

/// Flag and confidence columns written by `append_classifications`.
pub fn classification_labels(
    df: &DataFrame,
    cols: &Columns,
) -> Result<Vec<(JellyfishFlag, TailConfidence)>> {
    let flags = i64_column(df, &cols.flag())?;
    let confidence = i64_column(df, &cols.confidence())?;
    flags
        .into_iter()
        .zip(confidence)
        .enumerate()
        .map(|(row, (f, c))| {
            let flag = JellyfishFlag::from_code(f)
                .with_context(|| format!("row {row}: unknown jellyfish flag {f}"))?;
            Ok((flag, TailConfidence::clamped(c)))
        })
        .collect()
}
