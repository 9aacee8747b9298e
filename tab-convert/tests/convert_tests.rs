use tab_convert::run_array_to_bedgraph::*;
use tab_convert::run_make_bed::*;
use tab_convert::run_probeset_to_bed::*;
use tab_convert::run_split_bedgraph::*;
use tab_util::common_io::{read_lines, write_lines};

fn write_input(dir: &std::path::Path, name: &str, lines: &[&str]) -> anyhow::Result<Box<str>> {
    let file = dir.join(name).to_str().unwrap().to_string().into_boxed_str();
    let lines: Vec<Box<str>> = lines.iter().map(|&x| x.into()).collect();
    write_lines(&lines, &file)?;
    Ok(file)
}

fn as_strs(lines: &[Box<str>]) -> Vec<&str> {
    lines.iter().map(|x| &**x).collect()
}

#[test]
fn make_bed_drops_header_row() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(
        dir.path(),
        "de_genes.txt",
        &[
            "Chromosome\tStart\tStop\tStrand\tTranscript\tFold change\tP value",
            "1\t100\t200\t+\tNM_001\t2.5\t0.02",
            "",
        ],
    )?;
    let output = dir.path().join("out.bed").to_str().unwrap().to_string();

    run_make_bed(&MakeBedArgs {
        input,
        output: Some(output.clone().into_boxed_str()),
        name: None,
        keep_chromosome: false,
    })?;

    let lines = read_lines(&output)?;
    assert_eq!(
        as_strs(&lines),
        vec![
            "track name=\"de_genes\" description=\"de_genes\" visibility=pack itemRgb=\"On\"",
            "chr1\t100\t200\tNM_001_fc2.5\t0.02\t+\t100\t200\t205,0,0",
        ]
    );
    Ok(())
}

#[test]
fn split_bedgraph_by_name_and_index() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(
        dir.path(),
        "signal.txt",
        &[
            "#chrom\tstart\tend\tsample A\tsample B",
            "1\t10\t20\t0.5\t1.5",
            "chr2\t30\t40\t2.5\t3.5",
        ],
    )?;

    let files = run_split_bedgraph(&SplitBedGraphArgs {
        input,
        select: vec!["sample A".into(), "5".into()],
        skip_first_line: false,
        first_line_is_header: true,
        fix_chromosome: true,
        bedgraph_header: Some("track type=bedGraph".into()),
        output_dir: dir.path().to_str().unwrap().into(),
    })?;

    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("sample_A.bedGraph"));
    assert!(files[1].ends_with("sample_B.bedGraph"));

    let a = read_lines(&files[0])?;
    assert_eq!(
        as_strs(&a),
        vec!["track type=bedGraph", "chr1\t10\t19\t0.5", "chr2\t30\t39\t2.5"]
    );
    let b = read_lines(&files[1])?;
    assert_eq!(b[2].as_ref(), "chr2\t30\t39\t3.5");
    Ok(())
}

#[test]
fn split_bedgraph_rejects_unknown_column() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(dir.path(), "signal.txt", &["chr1\t10\t20\t0.5"])?;

    let args = |select: &str| SplitBedGraphArgs {
        input: input.clone(),
        select: vec![select.into()],
        skip_first_line: false,
        first_line_is_header: false,
        fix_chromosome: false,
        bedgraph_header: None,
        output_dir: dir.path().to_str().unwrap().into(),
    };

    assert!(run_split_bedgraph(&args("7")).is_err());
    assert!(run_split_bedgraph(&args("0")).is_err());
    assert!(run_split_bedgraph(&args("score")).is_err());

    let files = run_split_bedgraph(&args("4"))?;
    assert!(files[0].ends_with("signal_4.bedGraph"));
    Ok(())
}

#[test]
fn probe_sets_feed_microarray_conversion() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let annotation = write_input(
        dir.path(),
        "probes.fa",
        &[
            ">probe_set:HuEx-1_0-st-v2:2315103; Assembly=build-34/hg16; Seqname=chr1; Start=5000; Stop=5100; Strand=+",
            "ACGT",
            ">probe_set:HuEx-1_0-st-v2:2315101; Assembly=build-34/hg16; Seqname=chr1; Start=1788; Stop=2030; Strand=+",
            "ACGT",
            ">probe_set:HuEx-1_0-st-v2:2315102; Assembly=build-34/hg16; Seqname=chr2; Start=100; Stop=200; Strand=-",
        ],
    )?;
    let probes_bed = dir.path().join("probes.bed").to_str().unwrap().to_string();
    run_probeset_to_bed(&ProbesetToBedArgs {
        input: annotation,
        output: probes_bed.clone().into_boxed_str(),
    })?;

    let microarray = write_input(
        dir.path(),
        "exon.txt",
        &[
            "probeset_id s1 s2",
            "2315102 7.1 7.2",
            "2315999 0.0 0.0",
            "2315101 5.1 5.2",
        ],
    )?;

    let summary = run_array_to_bedgraph(&ArrayToBedGraphArgs {
        probesets: probes_bed.into_boxed_str(),
        microarray,
        output_dir: dir.path().to_str().unwrap().into(),
    })?;

    assert_eq!(summary.read, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.files.len(), 2);
    assert!(summary.files[1].ends_with("exon_s2.bedGraph"));

    let s1 = read_lines(&summary.files[0])?;
    assert_eq!(s1.len(), 3);
    assert!(s1[0].starts_with("track type=bedGraph name=\"s1\""));
    assert_eq!(s1[1].as_ref(), "chr2\t100\t200\t7.1");
    assert_eq!(s1[2].as_ref(), "chr1\t1788\t2030\t5.1");

    let s2 = read_lines(&summary.files[1])?;
    assert_eq!(s2[2].as_ref(), "chr1\t1788\t2030\t5.2");
    Ok(())
}

#[test]
fn split_bedgraph_with_numeric_header() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(
        dir.path(),
        "samples.txt",
        &["chrom\tstart\tend\t1\t2", "chr1\t10\t20\t7\t9"],
    )?;

    let files = run_split_bedgraph(&SplitBedGraphArgs {
        input,
        select: vec!["4".into(), "5".into()],
        skip_first_line: false,
        first_line_is_header: true,
        fix_chromosome: false,
        bedgraph_header: None,
        output_dir: dir.path().to_str().unwrap().into(),
    })?;

    assert!(files[0].ends_with("1.bedGraph"));
    assert_eq!(as_strs(&read_lines(&files[0])?), vec!["chr1\t10\t19\t7"]);
    assert_eq!(as_strs(&read_lines(&files[1])?), vec!["chr1\t10\t19\t9"]);
    Ok(())
}
