/*!
Reads majority judgment tallies from CSV-like inputs and renders the outcome of a
deliberation as ASCII merit or opinion profiles, CSV, JSON, YAML or gnuplot scripts.

Say you have the following tally:

```text
     , reject, poor, fair, good, very good, excellent
Pizza,      3,    2,    1,    4,         4,        2
Chips,      2,    3,    0,    4,         3,        4
Pasta,      4,    5,    1,    4,         0,        2
```

The reader infers that the first row holds the grades and the first column the
proposals, converts the tallies into exact integers, and hands them to a
[`mj_judgment::Deliberator`]. The formatters then turn the result into text.

```
use mj_tally::poll::Poll;
use mj_tally::reader::csv_tally::CsvTallyReader;

let input = "\
     , reject, poor, fair, good
Pizza,      3,    2,    1,    4
Chips,    2.5,    3,    0,    4
";
let poll = Poll::from_input(input, &CsvTallyReader::default())?;
assert_eq!(poll.proposals, vec!["Pizza", "Chips"]);
assert_eq!(poll.grades, vec!["reject", "poor", "fair", "good"]);
assert_eq!(poll.scale, 10.0);
assert_eq!(poll.tally.proposals[1].tally, vec![25, 30, 0, 40]);
# Ok::<(), mj_tally::TallyError>(())
```

Ranking itself is out of the scope of this crate: the pipeline only consumes the
[`mj_judgment::Deliberator`] and [`mj_judgment::PaletteGenerator`] traits.
*/

use mj_judgment::JudgmentErrors;
use snafu::prelude::*;

pub mod config;
pub mod formatter;
pub mod poll;
pub mod reader;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::config::{DefaultGrade, DeliberationSettings, GlyphSet, Options, OutputFormat};
pub use crate::reader::number::NumberError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TallyError {
    #[snafu(display("Failed to read input `{path}`"))]
    ReadingInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Failed to read input CSV: {source}"))]
    CsvRead { source: csv::Error },
    #[snafu(display("too many delimiters: found `{first}` and `{second}`"))]
    TooManyDelimiters { first: char, second: char },
    #[snafu(display("The input does not contain any tally"))]
    EmptyInput {},

    #[snafu(display("Failed to read input tally: cell {column} of row {row}: {source}"))]
    MalformedCell {
        row: usize,
        column: usize,
        source: NumberError,
    },
    #[snafu(display(
        "strictly negative numbers are not allowed, but got `{content}` in cell {column} of row {row}"
    ))]
    NegativeTally {
        row: usize,
        column: usize,
        content: String,
    },
    #[snafu(display("row {row} holds {found} tallies, but there are {expected} grades"))]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[snafu(display(
        "the tally of proposal {proposal} for grade {grade} does not fit in an integer once scaled: `{value}`"
    ))]
    TallyOverflow {
        proposal: usize,
        grade: usize,
        value: f64,
    },
    #[snafu(display("proposal {proposal} received more judgments than can be counted"))]
    JudgmentsOverflow { proposal: usize },
    #[snafu(display("grade {grade} received more judgments than can be counted"))]
    GradeTotalOverflow { grade: usize },
    #[snafu(display("{judges} judges cannot be counted at a scale of {scale}"))]
    JudgesOverflow { judges: u64, scale: f64 },
    #[snafu(display("no more than {available} different grades can be generated (tried {requested})"))]
    TooManyGrades { requested: usize, available: usize },
    #[snafu(display(
        "no more than {available} different proposals can be named (tried {requested})"
    ))]
    TooManyProposals { requested: usize, available: usize },

    #[snafu(display("cannot render the profile of a proposal without any judgment"))]
    EmptyTally {},
    #[snafu(display("No grade at index {index} (there are {amount} grades)"))]
    MissingGrade { index: usize, amount: usize },
    #[snafu(display("No proposal at index {index} (there are {amount} proposals)"))]
    MissingProposal { index: usize, amount: usize },

    #[snafu(display(
        "Format `{format}` is not supported.  Supported formats: text, opinion, csv, json, yaml, gnuplot"
    ))]
    UnsupportedFormat { format: String },
    #[snafu(display("Chart `{chart}` is not supported.  Supported charts: merit, opinion"))]
    UnsupportedChart { chart: String },
    #[snafu(display("Unrecognized default grade `{value}`"))]
    UnknownDefaultGrade { value: String },

    #[snafu(display("Balancing error: {source}"))]
    Balancing { source: JudgmentErrors },
    #[snafu(display("Deliberation error: {source}"))]
    Deliberating { source: JudgmentErrors },

    #[snafu(display("Failed to write CSV output"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Failed to flush CSV output"))]
    CsvFlush { source: std::io::Error },
    #[snafu(display("The output is not valid UTF-8"))]
    OutputEncoding { source: std::string::FromUtf8Error },
    #[snafu(display("Failed to serialize JSON output"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Failed to serialize YAML output"))]
    SerializingYaml { source: serde_yaml::Error },
}

pub type TallyResult<T> = Result<T, TallyError>;
