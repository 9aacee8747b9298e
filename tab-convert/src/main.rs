use tab_convert::common::*;
use tab_convert::run_array_to_bedgraph::*;
use tab_convert::run_make_bed::*;
use tab_convert::run_probeset_to_bed::*;
use tab_convert::run_split_bedgraph::*;

/// Convert tab-delimited genomic data into BED and bedGraph tracks
#[derive(Parser, Debug)]
#[command(version, about, long_about, term_width = 80)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// verbosity
    #[arg(
        long,
        short,
        global = true,
        help = "verbosity",
        long_help = "Enable verbose output `RUST_LOG=info`"
    )]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// BED track from a differential expression table
    /// (chr, start, stop, strand, transcript, fold_change, p_value)
    MakeBed(MakeBedArgs),

    /// BED track from a coverage table
    /// (chr, start, stop, sample_id, length, average_coverage)
    MakeCoverageBed(MakeCoverageBedArgs),

    /// One bedGraph file per selected column of a tab-delimited file
    #[command(alias = "split")]
    SplitBedgraph(SplitBedGraphArgs),

    /// One bedGraph file per sample of a microarray table, located
    /// through a probe set BED file
    #[command(alias = "array")]
    ArrayToBedgraph(ArrayToBedGraphArgs),

    /// Probe set locations from `>probe_set:` annotation lines
    ProbesetToBed(ProbesetToBedArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    match &cli.commands {
        Commands::MakeBed(args) => {
            run_make_bed(args)?;
        }
        Commands::MakeCoverageBed(args) => {
            run_make_coverage_bed(args)?;
        }
        Commands::SplitBedgraph(args) => {
            let files = run_split_bedgraph(args)?;
            info!("Wrote {} bedGraph files", files.len());
        }
        Commands::ArrayToBedgraph(args) => {
            run_array_to_bedgraph(args)?;
        }
        Commands::ProbesetToBed(args) => {
            run_probeset_to_bed(args)?;
        }
    }

    Ok(())
}
