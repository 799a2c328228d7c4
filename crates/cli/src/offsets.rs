//! BCG bearing and tail offset columns for a classified table.

use crate::table::{self, Columns};
use anyhow::{bail, Context, Result};
use jellyfish::api::{
    alignment_histogram, bcg_bearing, tail_offset, AlignmentHistogram, SkyPosition, TailOffset,
};
use polars::prelude::*;

/// Derived columns, one entry per table row.
#[derive(Debug, Default)]
pub struct OffsetColumns {
    pub bearing: Vec<f64>,
    pub deviation: Vec<f64>,
    pub alignment: Vec<f64>,
    pub histogram: Option<AlignmentHistogram>,
}

pub fn compute(df: &DataFrame, cols: &Columns) -> Result<OffsetColumns> {
    let ra = table::f64_column(df, &cols.ra)?;
    let dec = table::f64_column(df, &cols.dec)?;
    let bcg_ra = table::f64_column(df, &cols.bcg_ra)?;
    let bcg_dec = table::f64_column(df, &cols.bcg_dec)?;
    let angles = table::f64_column(df, &cols.tail_angle())?;
    let labels = table::classification_labels(df, cols)?;
    if [dec.len(), bcg_ra.len(), bcg_dec.len(), angles.len(), labels.len()]
        .iter()
        .any(|&n| n != ra.len())
    {
        bail!("input columns differ in length");
    }

    let mut out = OffsetColumns::default();
    let mut rows = Vec::with_capacity(ra.len());
    for row in 0..ra.len() {
        let galaxy = SkyPosition::new(ra[row], dec[row]).with_context(|| format!("row {row}"))?;
        let bcg =
            SkyPosition::new(bcg_ra[row], bcg_dec[row]).with_context(|| format!("row {row} BCG"))?;
        let (flag, confidence) = labels[row];
        let bearing = bcg_bearing(&bcg, &galaxy);
        let offset = tail_offset(angles[row], bearing, flag, confidence);
        out.bearing.push(bearing);
        out.deviation.push(offset.deviation);
        out.alignment.push(offset.alignment);
        rows.push((flag, confidence, offset));
    }
    out.histogram = Some(alignment_histogram(rows));
    Ok(out)
}

pub fn append(df: &mut DataFrame, cols: &Columns, offsets: &OffsetColumns) -> Result<()> {
    table::ensure_absent(df, &cols.offset_outputs())?;
    table::append_column(df, Series::new(cols.bearing().as_str().into(), offsets.bearing.clone()))?;
    table::append_column(
        df,
        Series::new(cols.deviation().as_str().into(), offsets.deviation.clone()),
    )?;
    table::append_column(
        df,
        Series::new(cols.alignment().as_str().into(), offsets.alignment.clone()),
    )?;
    Ok(())
}

/// Histogram from an already post-processed table.
pub fn histogram_from_table(df: &DataFrame, cols: &Columns) -> Result<AlignmentHistogram> {
    let labels = table::classification_labels(df, cols)?;
    let deviation = table::f64_column_nullable(df, &cols.deviation())?;
    let alignment = table::f64_column_nullable(df, &cols.alignment())?;
    let rows = labels
        .into_iter()
        .zip(deviation.into_iter().zip(alignment))
        .map(|((flag, confidence), (deviation, alignment))| {
            (flag, confidence, TailOffset { deviation, alignment })
        });
    Ok(alignment_histogram(rows))
}

pub fn print_histogram(hist: &AlignmentHistogram) {
    println!("Tail offset from BCG direction (0 = pointing at the BCG):");
    for (k, count) in hist.counts.iter().enumerate() {
        println!(
            "  [{:>3}, {:>3}{} {:>4} {}",
            hist.edges[k],
            hist.edges[k + 1],
            if k + 1 == hist.counts.len() { "]" } else { ")" },
            count,
            "#".repeat(*count)
        );
    }
    if hist.undefined > 0 {
        println!("  {} galaxies coincide with their BCG (offset undefined)", hist.undefined);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn columns() -> Columns {
        Columns {
            ra: "RA".into(),
            dec: "Dec".into(),
            bcg_ra: "BCGRA".into(),
            bcg_dec: "BCGDec".into(),
            initials: "JC".into(),
        }
    }

    const TABLE: &str = "\
RA,Dec,BCGRA,BCGDec,JF_flag_JC,tail_confidence_JC,tail_angle_JC
150.0,0.1,150.0,0.0,1,2,90.0
150.0,-0.1,150.0,0.0,1,1,90.0
150.0,0.0,150.0,0.0,1,2,45.0
150.1,0.0,150.0,0.0,0,0,0.0
";

    #[test]
    fn offsets_follow_bearing_and_policy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, TABLE).unwrap();
        let mut df = table::read_csv(&path).unwrap();
        let cols = columns();
        let offsets = compute(&df, &cols).unwrap();

        assert_eq!(offsets.bearing, vec![90.0, -90.0, 0.0, 180.0]);
        // North galaxy, tail north: pointing away.
        assert_eq!((offsets.deviation[0], offsets.alignment[0]), (0.0, 180.0));
        // South galaxy, tail north: pointing at the BCG.
        assert_eq!((offsets.deviation[1], offsets.alignment[1]), (180.0, 0.0));
        // On the BCG: undefined.
        assert!(offsets.deviation[2].is_nan() && offsets.alignment[2].is_nan());
        // Not a jellyfish: placeholder.
        assert_eq!((offsets.deviation[3], offsets.alignment[3]), (0.0, 180.0));

        let hist = offsets.histogram.as_ref().unwrap();
        assert_eq!(hist.counts, vec![1, 0, 0, 0, 0, 1]);
        assert_eq!(hist.undefined, 1);

        append(&mut df, &cols, &offsets).unwrap();
        assert_eq!(df.width(), 10);
        assert!(append(&mut df, &cols, &offsets).is_err());

        let out = dir.path().join("out.csv");
        table::write_csv(&mut df, &out).unwrap();
        let back = table::read_csv(&out).unwrap();
        let again = histogram_from_table(&back, &cols).unwrap();
        assert_eq!(again.counts, hist.counts);
        assert_eq!(again.undefined, 1);
    }

    #[test]
    fn missing_bcg_columns_fail() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "RA,Dec,JF_flag_JC,tail_confidence_JC,tail_angle_JC\n1,2,0,0,0\n").unwrap();
        let df = table::read_csv(&path).unwrap();
        assert!(compute(&df, &columns()).is_err());
    }
}
