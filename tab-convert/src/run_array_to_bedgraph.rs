use crate::common::*;
use crate::track::*;

use indicatif::{ProgressBar, ProgressStyle};
use std::io::BufRead;

#[derive(Args, Debug)]
pub struct ArrayToBedGraphArgs {
    /// probe set BED file: chromosome, start, end, probe set id
    pub probesets: Box<str>,

    /// microarray data: first line is a header (id column, then one
    /// name per sample); each row is a probe set id and its values
    pub microarray: Box<str>,

    /// directory for the output files
    #[arg(short, long, default_value = ".")]
    pub output_dir: Box<str>,
}

/// Counts reported after a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArraySummary {
    pub read: usize,
    pub skipped: usize,
    pub files: Vec<Box<str>>,
}

/// Stream microarray rows, look each probe set id up in the index and
/// write one bedGraph row per sample column
pub fn array_to_bedgraph<R: BufRead>(
    index: &SortedIndex<Feature>,
    microarray: R,
    output_root: &str,
) -> anyhow::Result<ArraySummary> {
    let mut lines = microarray.lines();

    let header: Vec<String> = match lines.next() {
        Some(line) => line?.split_whitespace().map(str::to_string).collect(),
        None => anyhow::bail!("empty microarray file"),
    };
    debug!("Found {} columns in microarray header", header.len());
    debug!("Header from microarray file: {:?}", header);

    let mut summary = ArraySummary::default();
    let mut writers = vec![];
    for name in header.iter().skip(1) {
        let file = format!("{}_{}.bedGraph", output_root, name).into_boxed_str();
        info!("Output file: {}", file);
        io::mkdir(&file)?;
        let mut buf = io::open_buf_writer(&file)?;
        writeln!(buf, "{}", bedgraph_track_line(name))?;
        writers.push(buf);
        summary.files.push(file);
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {pos} rows ({per_sec})") {
        pb.set_style(style);
    }

    for (i, line) in lines.enumerate() {
        let line = line?;
        let items: Vec<&str> = line.split_whitespace().collect();
        let Some(&probe_set_id) = items.first() else {
            continue;
        };
        summary.read += 1;
        pb.inc(1);

        match index.lookup(probe_set_id) {
            Some(feature) => {
                if items.len() < writers.len() + 1 {
                    anyhow::bail!(
                        "line {}: expected {} values for {}, found {}",
                        i + 2,
                        writers.len(),
                        probe_set_id,
                        items.len() - 1
                    );
                }
                for (buf, value) in writers.iter_mut().zip(items.iter().skip(1)) {
                    writeln!(buf, "{}\t{}", feature, value)?;
                }
            }
            None => {
                warn!(
                    "Microarray data has id not found in probe set data: {}",
                    probe_set_id
                );
                summary.skipped += 1;
            }
        }
    }
    pb.finish_and_clear();

    for buf in writers.iter_mut() {
        buf.flush()?;
    }
    Ok(summary)
}

pub fn run_array_to_bedgraph(args: &ArrayToBedGraphArgs) -> anyhow::Result<ArraySummary> {
    let index = SortedIndex::from_bed_path(&args.probesets)
        .with_context(|| format!("failed to read probe sets from {}", args.probesets))?;
    info!("Read in {} probe set ids", index.len());
    debug!(
        "Probe set ids (first 20): {:?}",
        index.keys().iter().take(20).collect::<Vec<_>>()
    );

    let stem = io::basename(&args.microarray)?;
    let output_root = Path::new(&*args.output_dir)
        .join(&*stem)
        .to_string_lossy()
        .into_owned();
    debug!("Basename for output files: {}", output_root);

    let summary = array_to_bedgraph(&index, io::open_buf_reader(&args.microarray)?, &output_root)?;
    info!(
        "Finished: read {}, skipped {}",
        summary.read, summary.skipped
    );
    Ok(summary)
}
