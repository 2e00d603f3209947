use std::fs;
use std::io::Read;

use log::{debug, info};
use snafu::prelude::*;

use crate::{ReadingInputSnafu, TallyResult};

pub mod csv_tally;
pub mod number;
pub mod scale;
pub mod shape;

/// The name standing for the standard input.
pub const STDIN: &str = "-";

/// One row of raw cells, with its line number in the input (starting at 1).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawRow {
    pub lineno: usize,
    pub cells: Vec<String>,
}

/// The cells of the input, as read, before any interpretation.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawMatrix {
    rows: Vec<RawRow>,
}

impl RawMatrix {
    pub fn new(rows: Vec<Vec<String>>) -> RawMatrix {
        RawMatrix {
            rows: rows
                .into_iter()
                .enumerate()
                .map(|(idx, cells)| RawRow {
                    lineno: idx + 1,
                    cells,
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// The rows holding at least a label and a value.
    /// Shorter rows (usually blank trailing lines) take no part in the tally.
    pub fn usable_rows(&self) -> impl Iterator<Item = &RawRow> {
        self.rows.iter().filter(|r| r.cells.len() >= 2)
    }
}

/// What a reader extracts from its input.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ParsedTally {
    /// In the order they were submitted.
    pub proposals: Vec<String>,
    /// From "worst" to "best", like each tally.
    pub grades: Vec<String>,
    /// For each proposal, the tally of each grade.
    pub tallies: Vec<Vec<f64>>,
}

/// Implement this to read another kind of input.
pub trait TallyReader {
    fn read(&self, input: &str) -> TallyResult<ParsedTally>;
}

/// Reads the whole input at once, from a file or from the standard input (`-`).
pub fn read_source(path: &str) -> TallyResult<String> {
    let path = path.trim();
    let contents = if path == STDIN {
        info!("Reading tally from the standard input");
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context(ReadingInputSnafu { path })?;
        buf
    } else {
        info!("Reading tally file {:?}", path);
        fs::read_to_string(path).context(ReadingInputSnafu { path })?
    };
    debug!("read_source: {} bytes", contents.len());
    Ok(contents)
}
