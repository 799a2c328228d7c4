//! BCG offset walk-through for a handful of pre-classified galaxies.
//!
//! Purpose
//! - Show the post-processing path without a terminal session: committed
//!   verdicts → results → bearing and tail offset → alignment histogram.
//!
//! Run: `cargo run -p jellyfish --example bcg_offsets`

use jellyfish::api::{
    alignment_histogram, bcg_offset, classify_batch, JellyfishFlag, SkyPosition, TailConfidence,
    TailSegment, Verdict,
};
use jellyfish::geom::Point2D;

fn main() -> jellyfish::Result<()> {
    // Coma X-ray centre as the reference point.
    let bcg = SkyPosition::new(194.953054, 27.980694)?;
    let galaxies = [
        (195.1, 28.1, Some((Point2D::new(0.0, 0.0), Point2D::new(-12.0, 20.0)))),
        (194.7, 27.8, Some((Point2D::new(2.0, -1.0), Point2D::new(30.0, -25.0)))),
        (194.953054, 27.980694, Some((Point2D::new(0.0, 0.0), Point2D::new(5.0, 5.0)))),
        (195.3, 27.6, None),
    ];
    let positions = galaxies
        .iter()
        .map(|&(ra, dec, _)| SkyPosition::new(ra, dec))
        .collect::<jellyfish::Result<Vec<_>>>()?;

    let mut replay = |i: usize, _: &SkyPosition| -> jellyfish::Result<Verdict> {
        Ok(match galaxies[i].2 {
            Some((centre, tail_end)) => Verdict {
                flag: JellyfishFlag::Jellyfish,
                confidence: TailConfidence::Clear,
                tail: Some(TailSegment { centre, tail_end }),
            },
            None => Verdict::without_tail(JellyfishFlag::NotJellyfish),
        })
    };
    let results = classify_batch(&positions, &mut replay)?;

    let mut rows = Vec::with_capacity(results.len());
    for (result, galaxy) in results.iter().zip(&positions) {
        let (bearing, offset) = bcg_offset(result, galaxy, &bcg);
        println!(
            "ra={:.4} dec={:+.4} flag={} tail={} bearing={} deviation={} alignment={}",
            galaxy.ra(),
            galaxy.dec(),
            result.flag().code(),
            result.tail_angle(),
            bearing,
            offset.deviation,
            offset.alignment
        );
        rows.push((result.flag(), result.confidence(), offset));
    }

    let hist = alignment_histogram(rows);
    for (k, count) in hist.counts.iter().enumerate() {
        println!("[{:>3}, {:>3}) {}", hist.edges[k], hist.edges[k + 1], "#".repeat(*count));
    }
    println!("undefined (on BCG): {}", hist.undefined);
    Ok(())
}
