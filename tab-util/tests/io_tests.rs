use tab_util::common_io::{read_lines, write_lines};
use tab_util::{Feature, LoadOptions, SortedIndex, TabError, Table};

#[test]
fn table_file_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("input.txt.gz");
    let output = dir.path().join("output.txt");
    let input = input.to_str().unwrap();
    let output = output.to_str().unwrap();

    let lines: Vec<Box<str>> = vec![
        "#chr\tstart\tend\tvalue".into(),
        "chr1\t1\t234\t4.6".into(),
        "# a comment".into(),
        "chr2\t1234\t5678\t6.8".into(),
    ];
    write_lines(&lines, input)?;

    let mut table = Table::from_path(input, LoadOptions::new().first_line_is_header(true))?;
    assert_eq!(table.len(), 2);
    assert_eq!(table[1].line_number(), Some(4));

    table.compute_column("name", |rec| -> anyhow::Result<String> {
        Ok(format!("{}_{}", rec.get("chr")?, rec.get("start")?))
    })?;
    table.write_file(output)?;

    let written = read_lines(output)?;
    assert_eq!(
        written,
        vec![
            Box::<str>::from("chr1\t1\t234\t4.6\tchr1_1"),
            Box::<str>::from("chr2\t1234\t5678\t6.8\tchr2_1234"),
        ]
    );
    Ok(())
}

#[test]
fn short_line_reports_physical_line() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("short.txt");
    let input = input.to_str().unwrap();
    let lines: Vec<Box<str>> = vec![
        "skip me".into(),
        "a\tb\tc".into(),
        "# comment".into(),
        "1\t2\t3".into(),
        "4\t5".into(),
    ];
    write_lines(&lines, input)?;

    let options = LoadOptions::new()
        .skip_first_line(true)
        .first_line_is_header(true);
    match Table::from_path(input, options) {
        Err(TabError::Parse { line, .. }) => assert_eq!(line, 5),
        other => panic!("expected a parse error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn feature_index_end_to_end() -> anyhow::Result<()> {
    let mut index = SortedIndex::new();
    index.insert_feature("p1", "chr1", "10", "20");
    index.insert_feature("p3", "chr3", "30", "40");
    index.insert_feature("p2", "chr2", "50", "60");

    assert_eq!(index.len(), 3);
    assert_eq!(index.lookup("p2"), Some(&Feature::new("chr2", "50", "60")));
    assert_eq!(index.lookup("p1").map(|x| &*x.chrom), Some("chr1"));
    assert_eq!(index.lookup("p0"), None);

    let dir = tempfile::tempdir()?;
    let bed = dir.path().join("probes.bed");
    let bed = bed.to_str().unwrap();
    let lines: Vec<Box<str>> = vec!["chr1\t10\t20\tp1".into(), "chr2\t50\t60\tp2".into()];
    write_lines(&lines, bed)?;

    let from_file = SortedIndex::from_bed_path(bed)?;
    assert_eq!(from_file.lookup("p2"), index.lookup("p2"));
    Ok(())
}
