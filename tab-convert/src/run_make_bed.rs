use crate::common::*;
use crate::track::*;

/// Columns expected in a differential expression table
pub const EXPRESSION_COLUMNS: [&str; 7] = [
    "chr",
    "start",
    "stop",
    "strand",
    "transcript",
    "fold_change",
    "p_value",
];

/// Columns expected in a coverage table
pub const COVERAGE_COLUMNS: [&str; 6] = [
    "chr",
    "start",
    "stop",
    "sample_id",
    "length",
    "average_coverage",
];

const EXPRESSION_BED_COLUMNS: [&str; 9] = [
    "chr",
    "start",
    "stop",
    "name",
    "p_value",
    "strand",
    "start",
    "stop",
    "RGB",
];

const COVERAGE_BED_COLUMNS: [&str; 9] = [
    "chr", "start", "stop", "name", "score", "strand", "start", "stop", "RGB",
];

#[derive(Args, Debug)]
pub struct MakeBedArgs {
    /// tab-delimited input file
    pub input: Box<str>,

    /// output BED file (default: `<input stem>.bed`)
    #[arg(short, long)]
    pub output: Option<Box<str>>,

    /// track name and description (default: input stem)
    #[arg(short, long)]
    pub name: Option<Box<str>>,

    /// leave chromosome names as they are instead of prefixing `chr`
    #[arg(long, default_value_t = false)]
    pub keep_chromosome: bool,
}

#[derive(Args, Debug)]
pub struct MakeCoverageBedArgs {
    /// tab-delimited input file
    pub input: Box<str>,

    /// output BED file (default: `<input stem>.bed`)
    #[arg(short, long)]
    pub output: Option<Box<str>>,

    /// track name and description (default: input stem)
    #[arg(short, long)]
    pub name: Option<Box<str>>,

    /// prefix chromosome names with `chr` where missing
    #[arg(long, default_value_t = false)]
    pub fix_chromosome: bool,

    /// keep stop positions instead of subtracting one base
    #[arg(long, default_value_t = false)]
    pub keep_stop: bool,
}

/// Load a table with fixed column names, dropping a leading row that
/// is not data (a header line) and any blank rows
pub fn load_bed_input(input_file: &str, columns: &[&str]) -> anyhow::Result<Table> {
    let mut table = Table::with_columns(columns);
    let reader = io::open_buf_reader(input_file)?;
    let summary = table
        .load_reader(reader, LoadOptions::new().skip_blank_lines(true))
        .with_context(|| format!("failed to load {}", input_file))?;

    if summary.blank_lines > 0 {
        info!("Skipped {} blank lines", summary.blank_lines);
    }

    if table.get(0).is_some_and(|x| !looks_like_data(x)) {
        info!("First line of input file doesn't look like data, removing");
        table.remove(0)?;
    }

    let n = table.len();
    table.retain(|x| !x.is_blank());
    if table.len() < n {
        info!("Removed {} empty rows", n - table.len());
    }
    Ok(table)
}

/// Add `name` and `RGB` columns to a differential expression table and
/// project each row onto the BED layout
pub fn expression_bed_records(table: &mut Table, fix_chrom: bool) -> anyhow::Result<Vec<Record>> {
    if fix_chrom {
        table.transform_column("chr", |rec| -> anyhow::Result<String> {
            Ok(fix_chromosome(rec.get("chr")?))
        })?;
    }

    table.compute_column("name", |rec| -> anyhow::Result<String> {
        Ok(format!(
            "{}_fc{}",
            rec.get("transcript")?,
            rec.get("fold_change")?
        ))
    })?;

    table.compute_column("RGB", |rec| -> anyhow::Result<String> {
        Ok(rgb_from_p_value(parse_f64(rec, "p_value")?).to_string())
    })?;

    let records = table
        .iter()
        .map(|rec| rec.project(EXPRESSION_BED_COLUMNS))
        .collect::<tab_util::Result<Vec<_>>>()?;
    Ok(records)
}

/// Coverage table to BED rows: stop minus one (optional), name from
/// sample and length, fixed `+` strand, score capped at 1000
pub fn coverage_bed_records(
    table: &mut Table,
    fix_chrom: bool,
    correct_stop: bool,
) -> anyhow::Result<Vec<Record>> {
    if fix_chrom {
        info!("Prepending 'chr' to chromosome names");
        table.transform_column("chr", |rec| -> anyhow::Result<String> {
            Ok(fix_chromosome(rec.get("chr")?))
        })?;
    }

    if correct_stop {
        info!("Correcting 'stop' position by subtracting one base");
        table.transform_column("stop", |rec| -> anyhow::Result<String> {
            adjust_stop(rec.get("stop")?)
                .with_context(|| format!("bad stop position at line {}", line_label(rec)))
        })?;
    }

    table.compute_column("name", |rec| -> anyhow::Result<String> {
        Ok(format!("{}_{}bp", rec.get("sample_id")?, rec.get("length")?))
    })?;

    table.compute_column("strand", |_| -> anyhow::Result<String> { Ok("+".to_string()) })?;

    table.compute_column("score", |rec| -> anyhow::Result<String> {
        let coverage = parse_f64(rec, "average_coverage")?;
        Ok((coverage.trunc() as i64).min(1000).to_string())
    })?;

    table.compute_column("RGB", |rec| -> anyhow::Result<String> {
        let length = parse_f64(rec, "length")?;
        let coverage = parse_f64(rec, "average_coverage")?;
        Ok(rgb_from_coverage(length, coverage).to_string())
    })?;

    let records = table
        .iter()
        .map(|rec| rec.project(COVERAGE_BED_COLUMNS))
        .collect::<tab_util::Result<Vec<_>>>()?;
    Ok(records)
}

fn output_and_name(
    input: &str,
    output: &Option<Box<str>>,
    name: &Option<Box<str>>,
) -> anyhow::Result<(Box<str>, Box<str>)> {
    let stem = io::basename(input)?;
    let output = output
        .clone()
        .unwrap_or_else(|| format!("{}.bed", stem).into_boxed_str());
    let name = name.clone().unwrap_or(stem);
    Ok((output, name))
}

fn write_bed(output: &str, track_name: &str, records: &[Record]) -> anyhow::Result<()> {
    io::mkdir(output)?;
    let mut buf = io::open_buf_writer(output)?;
    writeln!(buf, "{}", bed_track_line(track_name, track_name))?;
    io::write_types_to(records, &mut buf)?;
    info!("Wrote {} records to {}", records.len(), output);
    Ok(())
}

/// BED track from a differential expression table
pub fn run_make_bed(args: &MakeBedArgs) -> anyhow::Result<()> {
    let (output, name) = output_and_name(&args.input, &args.output, &args.name)?;
    info!("Output file: {}", output);

    let mut table = load_bed_input(&args.input, &EXPRESSION_COLUMNS)?;
    let records = expression_bed_records(&mut table, !args.keep_chromosome)?;
    write_bed(&output, &name, &records)
}

/// BED track from a coverage table
pub fn run_make_coverage_bed(args: &MakeCoverageBedArgs) -> anyhow::Result<()> {
    let (output, name) = output_and_name(&args.input, &args.output, &args.name)?;
    info!("Output file: {}", output);

    let mut table = load_bed_input(&args.input, &COVERAGE_COLUMNS)?;
    let records = coverage_bed_records(&mut table, args.fix_chromosome, !args.keep_stop)?;
    write_bed(&output, &name, &records)
}
