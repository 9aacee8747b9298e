use crate::common::*;
use crate::track::*;

#[derive(Args, Debug)]
pub struct SplitBedGraphArgs {
    /// tab-delimited file with chromosome, start and end as the first
    /// three columns, followed by data columns
    pub input: Box<str>,

    /// columns to output, as 1-based indices or header names
    /// (with `--first-line-is-header`), e.g. `4,6,7`. One bedGraph
    /// file is written per selected column.
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub select: Vec<Box<str>>,

    /// skip first line of input file
    #[arg(long, default_value_t = false)]
    pub skip_first_line: bool,

    /// take column names from first line of input file
    #[arg(long, default_value_t = false)]
    pub first_line_is_header: bool,

    /// prefix chromosome names with `chr` where missing
    #[arg(long, default_value_t = false)]
    pub fix_chromosome: bool,

    /// text to write as the first line of every bedGraph
    #[arg(long)]
    pub bedgraph_header: Option<Box<str>>,

    /// directory for the output files
    #[arg(short, long, default_value = ".")]
    pub output_dir: Box<str>,
}

/// Map user column selectors (1-based index or header name) onto
/// 0-based positions
pub fn resolve_selection(table: &Table, selectors: &[Box<str>]) -> anyhow::Result<Vec<usize>> {
    let ncols = table.iter().map(Record::len).max().unwrap_or(0).max(table.n_columns());

    let mut ret = vec![];
    for sel in selectors {
        let col = match sel.trim().parse::<usize>() {
            Ok(0) => anyhow::bail!("column indices start from 1, got '{}'", sel),
            Ok(n) => n - 1,
            Err(_) => table
                .header()
                .iter()
                .position(|x| &**x == sel.trim())
                .ok_or_else(|| anyhow::anyhow!("unable to find column '{}' in input file", sel))?,
        };
        if col >= ncols {
            anyhow::bail!(
                "unable to find column {}, not enough columns in input file",
                sel
            );
        }
        ret.push(col);
    }
    Ok(ret)
}

/// `<header name>.bedGraph` when the input had a header, otherwise
/// `<input stem>_<selector>.bedGraph`; spaces become underscores
pub fn bedgraph_file_name(
    table: &Table,
    input_stem: &str,
    selector: &str,
    col: usize,
) -> Box<str> {
    let name = match table.header().get(col) {
        Some(name) => format!("{}.bedGraph", name),
        None => format!("{}_{}.bedGraph", input_stem, selector),
    };
    name.replace(' ', "_").into_boxed_str()
}

/// Chromosome fix-up and end position correction, in place
pub fn fix_positions(table: &mut Table, fix_chrom: bool) -> anyhow::Result<()> {
    for rec in table.iter_mut() {
        if fix_chrom {
            let chrom = rec.get(0usize).map(fix_chromosome);
            match chrom {
                Ok(chrom) => rec.set(0usize, chrom)?,
                Err(_) => warn!("No chromosome to fix for L{}", line_label(rec)),
            }
        }

        let end = rec.get(2usize).map_err(anyhow::Error::from).and_then(adjust_stop);
        match end {
            Ok(end) => rec.set(2usize, end)?,
            Err(_) => warn!("Unable to fix end position for L{}", line_label(rec)),
        }
    }
    Ok(())
}

/// Split into one bedGraph per selected column; returns the files
/// written
pub fn run_split_bedgraph(args: &SplitBedGraphArgs) -> anyhow::Result<Vec<Box<str>>> {
    let options = LoadOptions::new()
        .skip_first_line(args.skip_first_line)
        .first_line_is_header(args.first_line_is_header);

    let mut table = Table::new();
    let summary = table
        .load_reader(io::open_buf_reader(&args.input)?, options)
        .with_context(|| format!("failed to load {}", args.input))?;

    if let Some(over) = &summary.header_override {
        warn!("{}", over);
    }

    info!("Read in {} lines", table.len());
    if args.first_line_is_header {
        info!("Header: {}", table.header().join(", "));
    }

    let selected = resolve_selection(&table, &args.select)?;
    info!("Selected columns = {}", args.select.join(" "));

    let stem = io::basename(&args.input)?;
    let files: Vec<Box<str>> = selected
        .iter()
        .zip(args.select.iter())
        .map(|(&col, sel)| {
            let name = bedgraph_file_name(&table, &stem, sel, col);
            Path::new(&*args.output_dir)
                .join(&*name)
                .to_string_lossy()
                .into_owned()
                .into_boxed_str()
        })
        .collect();

    let mut writers = vec![];
    for file in files.iter() {
        info!("Opening output file {}", file);
        io::mkdir(file)?;
        let mut buf = io::open_buf_writer(file)?;
        if let Some(header) = &args.bedgraph_header {
            writeln!(buf, "{}", header)?;
        }
        writers.push(buf);
    }

    fix_positions(&mut table, args.fix_chromosome)?;

    for rec in table.iter() {
        for ((&col, sel), buf) in selected.iter().zip(args.select.iter()).zip(writers.iter_mut()) {
            match rec.project([0usize, 1, 2, col]) {
                Ok(line) => writeln!(buf, "{}", line)?,
                Err(_) => warn!(
                    "Error outputting data for column '{}' at L{}",
                    sel,
                    line_label(rec)
                ),
            }
        }
    }

    for buf in writers.iter_mut() {
        buf.flush()?;
    }

    info!("Finished");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_header_table() -> Table {
        let data = "chrom\tstart\tend\t1\t2\n7\t10\t20\t7\t9\nchr2\t30\tNA\t1\t2\n";
        Table::from_reader(data.as_bytes(), LoadOptions::new().first_line_is_header(true)).unwrap()
    }

    #[test]
    fn test_fix_positions_with_numeric_header() -> anyhow::Result<()> {
        let mut table = numeric_header_table();
        fix_positions(&mut table, true)?;
        assert_eq!(table[0].to_string(), "chr7\t10\t19\t7\t9");
        assert_eq!(table[1].to_string(), "chr2\t30\tNA\t1\t2");
        Ok(())
    }

    #[test]
    fn test_resolve_selection() -> anyhow::Result<()> {
        let table = numeric_header_table();
        let sel = |x: &[&str]| -> Vec<Box<str>> { x.iter().map(|&s| s.into()).collect() };

        assert_eq!(resolve_selection(&table, &sel(&["4", "5"]))?, vec![3, 4]);
        assert_eq!(resolve_selection(&table, &sel(&["end"]))?, vec![2]);
        assert!(resolve_selection(&table, &sel(&["6"])).is_err());
        assert_eq!(bedgraph_file_name(&table, "x", "4", 3).as_ref(), "1.bedGraph");
        Ok(())
    }
}
