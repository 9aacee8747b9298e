#![allow(unused)]

pub use tab_util::common_io as io;
pub use tab_util::{Feature, Key, LoadOptions, LoadSummary, Record, SortedIndex, TabError, Table};

pub use anyhow::Context;
pub use clap::{ArgAction, Args, Parser, Subcommand};
pub use env_logger;

pub use log::{debug, info, warn};
pub use std::io::Write;
pub use std::path::Path;
