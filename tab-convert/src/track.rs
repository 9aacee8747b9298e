//! Track-format policy shared by the converters: UCSC track lines,
//! chromosome naming, coordinate fix-ups and item colours.

use crate::common::*;

/// Header line for a BED custom track with per-item colours
pub fn bed_track_line(name: &str, description: &str) -> String {
    format!(
        "track name=\"{}\" description=\"{}\" visibility=pack itemRgb=\"On\"",
        name, description
    )
}

/// Header line for a bedGraph custom track
pub fn bedgraph_track_line(name: &str) -> String {
    format!(
        "track type=bedGraph name=\"{}\" description=\"BedGraph format\" \
         visibility=full color=2,100,0 altColor=0,100,200 priority=20",
        name
    )
}

/// Prepend `chr` unless the name already has it
pub fn fix_chromosome(name: &str) -> String {
    if name.starts_with("chr") {
        name.to_string()
    } else {
        format!("chr{}", name)
    }
}

/// Move an end coordinate back by one base
pub fn adjust_stop(stop: &str) -> anyhow::Result<String> {
    let stop: i64 = stop
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("not an integer position: '{}'", stop))?;
    Ok((stop - 1).to_string())
}

/// True if the record's start and stop columns hold plain digits;
/// used to spot a header row that was loaded as data
pub fn looks_like_data(rec: &Record) -> bool {
    let is_digits = |key: &str| {
        rec.get(key)
            .map(|x| !x.is_empty() && x.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false)
    };
    is_digits("start") && is_digits("stop")
}

/// Item colour by significance
pub fn rgb_from_p_value(p_value: f64) -> &'static str {
    if p_value < 0.001 {
        "255,0,0"
    } else if p_value < 0.05 {
        "205,0,0"
    } else {
        "139,0,0"
    }
}

/// Item colour for long, well-covered regions
pub fn rgb_from_coverage(length: f64, average_coverage: f64) -> &'static str {
    if length > 300.0 && average_coverage > 300.0 {
        "0,0,255"
    } else {
        "139,0,0"
    }
}

/// Parse a numeric field, naming the source line on failure
pub fn parse_f64(rec: &Record, key: &str) -> anyhow::Result<f64> {
    let value = rec.get(key)?;
    value.trim().parse::<f64>().with_context(|| {
        format!(
            "couldn't convert {} to a number (line {}): '{}'",
            key,
            line_label(rec),
            value
        )
    })
}

pub fn line_label(rec: &Record) -> String {
    rec.line_number()
        .map(|x| x.to_string())
        .unwrap_or_else(|| "?".to_string())
}
