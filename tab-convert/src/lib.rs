//! Converters from tab-delimited data to genome browser tracks (BED,
//! bedGraph), built on the `tab-util` records, tables and sorted index.

pub mod common;
pub mod run_array_to_bedgraph;
pub mod run_make_bed;
pub mod run_probeset_to_bed;
pub mod run_split_bedgraph;
pub mod track;
