//! Human-readable and JSON rendering of simulation results.
//!
//! Text layout is stable for golden-output tests:
//!
//! ```text
//! Dotplot: [0, 3, 41, ...]
//! Stat. Sig. threshold: >25 (<= sum of 5000.0)
//! Stat. Sig. test: {30: [true, 44/100001 (0.000440)], 20: [false, ...]}
//! ```

use serde::Serialize;

use crate::types::{Histogram, SignificanceThreshold, SignificanceVerdict};

/// `Dotplot: [...]` line followed by the threshold line.
pub fn render_dotplot(histogram: &Histogram, threshold: &SignificanceThreshold) -> String {
    let counts: Vec<String> = histogram.counts().iter().map(u64::to_string).collect();
    format!(
        "Dotplot: [{}]\nStat. Sig. threshold: >{} (<= sum of {:?})",
        counts.join(", "),
        threshold.index,
        threshold.cutoff_mass
    )
}

/// `Stat. Sig. test: {...}` line, entries in evaluation order.
pub fn render_tests(verdicts: &[SignificanceVerdict]) -> String {
    let entries: Vec<String> = verdicts
        .iter()
        .map(|v| {
            format!(
                "{}: [{}, {} ({:.6})]",
                v.score,
                v.is_significant,
                v.tail_probability,
                v.tail_probability.as_f64()
            )
        })
        .collect();
    format!("Stat. Sig. test: {{{}}}", entries.join(", "))
}

#[derive(Serialize)]
struct JsonVerdict {
    score: u64,
    is_significant: bool,
    numerator: u64,
    denominator: u64,
    probability: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    exam_size: usize,
    iterations: u64,
    seed: u64,
    dotplot: &'a Histogram,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold: Option<&'a SignificanceThreshold>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tests: Option<Vec<JsonVerdict>>,
}

/// Everything the CLI computed, as one pretty-printed JSON object.
pub fn render_json(
    seed: u64,
    histogram: &Histogram,
    threshold: Option<&SignificanceThreshold>,
    verdicts: Option<&[SignificanceVerdict]>,
) -> serde_json::Result<String> {
    let report = JsonReport {
        exam_size: histogram.max_score(),
        iterations: histogram.total_trials(),
        seed,
        dotplot: histogram,
        threshold,
        tests: verdicts.map(|vs| {
            vs.iter()
                .map(|v| JsonVerdict {
                    score: v.score,
                    is_significant: v.is_significant,
                    numerator: v.tail_probability.numerator,
                    denominator: v.tail_probability.denominator,
                    probability: v.tail_probability.as_f64(),
                })
                .collect()
        }),
    };
    serde_json::to_string_pretty(&report)
}
