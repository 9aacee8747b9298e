use crate::common::*;

use std::io::BufRead;

const PROBE_SET_PREFIX: &str = ">probe_set:";

#[derive(Args, Debug)]
pub struct ProbesetToBedArgs {
    /// probe set annotation (FASTA-style `>probe_set:` description lines)
    pub input: Box<str>,

    /// output file
    #[arg(short, long, default_value = "stdout")]
    pub output: Box<str>,
}

/// Location of one probe set, from a line like
/// `>probe_set:HuEx-1_0-st-v2:2315101; Assembly=build-34/hg16; Seqname=chr1; Start=1788; Stop=2030; ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSet {
    pub name: Box<str>,
    pub id: Box<str>,
    pub seqname: Box<str>,
    pub start: Box<str>,
    pub stop: Box<str>,
}

/// BED-like `seqname start stop id`
impl std::fmt::Display for ProbeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}\t{}", self.seqname, self.start, self.stop, self.id)
    }
}

fn field_value<'a>(fields: &[&'a str], i: usize, line: &str) -> anyhow::Result<&'a str> {
    fields
        .get(i)
        .and_then(|x| x.split_once('='))
        .map(|(_, v)| v.trim())
        .ok_or_else(|| anyhow::anyhow!("missing field {} in probe set line: {}", i + 1, line))
}

/// Parse a `>probe_set:` line; `None` for any other line
pub fn parse_probe_set_line(line: &str) -> anyhow::Result<Option<ProbeSet>> {
    if !line.starts_with(PROBE_SET_PREFIX) {
        return Ok(None);
    }

    let fields: Vec<&str> = line.trim_end().split(';').collect();

    let ids: Vec<&str> = fields[0].split(':').collect();
    if ids.len() < 3 {
        anyhow::bail!("no probe set name and id in: {}", line);
    }

    Ok(Some(ProbeSet {
        name: ids[1].trim().into(),
        id: ids[2].trim().into(),
        seqname: field_value(&fields, 2, line)?.into(),
        start: field_value(&fields, 3, line)?.into(),
        stop: field_value(&fields, 4, line)?.into(),
    }))
}

pub fn probe_sets<R: BufRead>(reader: R) -> anyhow::Result<Vec<ProbeSet>> {
    let mut ret = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(x) = parse_probe_set_line(&line).with_context(|| format!("line {}", i + 1))? {
            ret.push(x);
        }
    }
    Ok(ret)
}

pub fn run_probeset_to_bed(args: &ProbesetToBedArgs) -> anyhow::Result<()> {
    let reader = io::open_buf_reader(&args.input)?;
    let probes = probe_sets(reader).with_context(|| format!("failed to parse {}", args.input))?;
    info!("Found {} probe sets", probes.len());
    io::write_types(&probes, &args.output)?;
    Ok(())
}
