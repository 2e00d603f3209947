// Reads a poll's tally in a CSV like so:
//
//      , reject, poor, fair, good
// Pizza,      3,    2,    1,    4
// Chips,      2,    3,    0,    4

use std::borrow::Cow;
use std::sync::OnceLock;

use log::{debug, info};
use regex::Regex;
use snafu::prelude::*;

use crate::reader::number::read_number;
use crate::reader::shape::{FirstRowColumnProbe, Shape, ShapeDetector};
use crate::reader::{ParsedTally, RawMatrix, RawRow, TallyReader};
use crate::*;

/// Letters used to name the grades and proposals that the input leaves anonymous.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const DELIMITER_CANDIDATES: &[u8] = &[b'\t', b';', b',', b'|'];
const SNIFF_SAMPLE_LINES: usize = 10;
const FALLBACK_DELIMITER: u8 = b' ';

pub struct CsvTallyReader {
    delimiter: Option<u8>,
    shape_detector: Box<dyn ShapeDetector>,
}

impl Default for CsvTallyReader {
    fn default() -> Self {
        CsvTallyReader {
            delimiter: None,
            shape_detector: Box::new(FirstRowColumnProbe),
        }
    }
}

impl CsvTallyReader {
    /// Skips the detection of the delimiter.
    pub fn with_delimiter(self, delimiter: u8) -> CsvTallyReader {
        CsvTallyReader {
            delimiter: Some(delimiter),
            ..self
        }
    }

    /// Skips the detection of the shape.
    pub fn with_shape(self, shape: Shape) -> CsvTallyReader {
        self.with_shape_detector(Box::new(shape))
    }

    pub fn with_shape_detector(self, shape_detector: Box<dyn ShapeDetector>) -> CsvTallyReader {
        CsvTallyReader {
            shape_detector,
            ..self
        }
    }

    /// Splits the input into cells, without interpreting them.
    pub fn read_matrix(&self, input: &str) -> TallyResult<RawMatrix> {
        let delimiter = match self.delimiter {
            Some(d) => d,
            None => sniff_delimiter(input)?.unwrap_or(FALLBACK_DELIMITER),
        };
        info!("read_matrix: delimiter: {:?}", delimiter as char);

        let content: Cow<str> = if delimiter == FALLBACK_DELIMITER {
            Cow::Owned(sanitize_spaces(input))
        } else {
            Cow::Borrowed(input)
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(content.as_bytes());

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.context(CsvReadSnafu {})?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }
        Ok(RawMatrix::new(rows))
    }
}

impl TallyReader for CsvTallyReader {
    fn read(&self, input: &str) -> TallyResult<ParsedTally> {
        let matrix = self.read_matrix(input)?;
        let shape = self.shape_detector.detect_shape(&matrix);
        info!("read: shape: {:?}", shape);
        extract_tally(&matrix, shape)
    }
}

/// Walks the matrix according to its shape to collect names and tallies.
pub fn extract_tally(matrix: &RawMatrix, shape: Shape) -> TallyResult<ParsedTally> {
    let skip_first = shape.has_proposal_names_column;
    let rows: Vec<&RawRow> = matrix.usable_rows().collect();
    let (first_row, other_rows) = rows.split_first().context(EmptyInputSnafu {})?;

    let grades = if shape.has_grade_labels_row {
        read_names_row(&first_row.cells, skip_first)
    } else {
        let amount = first_row.cells.len() - usize::from(skip_first);
        dummy_grade_names(amount)?
    };
    debug!("extract_tally: grades: {:?}", grades);

    let tally_rows: &[&RawRow] = if shape.has_grade_labels_row {
        other_rows
    } else {
        &rows
    };

    let mut res = ParsedTally {
        proposals: Vec::new(),
        grades,
        tallies: Vec::new(),
    };
    for row in tally_rows {
        let name = if skip_first {
            row.cells[0].trim().to_string()
        } else {
            dummy_proposal_name(res.proposals.len())?
        };
        let tally = read_tally_row(row, skip_first)?;
        ensure!(
            tally.len() == res.grades.len(),
            RaggedRowSnafu {
                row: row.lineno,
                expected: res.grades.len(),
                found: tally.len(),
            }
        );
        debug!("extract_tally: row {}: {:?} {:?}", row.lineno, name, tally);
        res.proposals.push(name);
        res.tallies.push(tally);
    }
    Ok(res)
}

/// Reads the tally of a proposal. Cells are numbered from 1 in error messages.
pub fn read_tally_row(row: &RawRow, skip_first: bool) -> TallyResult<Vec<f64>> {
    let mut tallies: Vec<f64> = Vec::with_capacity(row.cells.len());
    for (idx, cell) in row.cells.iter().enumerate() {
        if skip_first && idx == 0 {
            continue;
        }
        let column = idx + 1;
        let n = read_number(cell).context(MalformedCellSnafu {
            row: row.lineno,
            column,
        })?;
        ensure!(
            n >= 0.0,
            NegativeTallySnafu {
                row: row.lineno,
                column,
                content: cell.trim(),
            }
        );
        tallies.push(n);
    }
    Ok(tallies)
}

pub fn read_names_row(cells: &[String], skip_first: bool) -> Vec<String> {
    cells
        .iter()
        .skip(usize::from(skip_first))
        .map(|name| name.trim().to_string())
        .collect()
}

/// Generates grade names in reverse alphabetical order, so that the last grade,
/// the best one, gets the letter A.
pub fn dummy_grade_names(amount: usize) -> TallyResult<Vec<String>> {
    let letters: Vec<char> = ALPHABET.chars().collect();
    ensure!(
        amount <= letters.len(),
        TooManyGradesSnafu {
            requested: amount,
            available: letters.len(),
        }
    );
    Ok(letters[..amount]
        .iter()
        .rev()
        .map(|letter| format!("Grade {}", letter))
        .collect())
}

pub fn dummy_proposal_name(position: usize) -> TallyResult<String> {
    let letter = ALPHABET.chars().nth(position).context(TooManyProposalsSnafu {
        requested: position + 1,
        available: ALPHABET.len(),
    })?;
    Ok(format!("Proposal {}", letter))
}

/// Detects the most likely delimiter by checking the consistency of the amount of fields
/// across the first lines. Returns None when no candidate splits the first line.
///
/// The score of a candidate is the amount of lines having as many fields as the first line,
/// times that amount of fields.
pub fn sniff_delimiter(content: &str) -> TallyResult<Option<u8>> {
    let sample_lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_SAMPLE_LINES)
        .collect();

    let mut scores: Vec<(u8, u64)> = Vec::new();
    for &delim in DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| count_fields(line, delim))
            .collect();
        let target = match counts.first() {
            Some(&c) if c > 1 => c,
            _ => continue,
        };
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        scores.push((delim, consistent * target as u64));
    }
    debug!("sniff_delimiter: scores: {:?}", scores);

    // Stable: on equal scores, candidates keep their order.
    scores.sort_by(|a, b| b.1.cmp(&a.1));
    match scores.as_slice() {
        [] => Ok(None),
        [(first, best), (second, runner_up), ..] if best == runner_up => TooManyDelimitersSnafu {
            first: *first as char,
            second: *second as char,
        }
        .fail(),
        [(best, _), ..] => Ok(Some(*best)),
    }
}

fn count_fields(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|r| r.ok())
        .map(|r| r.len())
        .unwrap_or(1)
}

/// Collapses runs of spaces and trims the end of lines, for inputs separated by spaces.
/// A leading space is kept: it stands for the blank top-left corner.
fn sanitize_spaces(input: &str) -> String {
    static SPACES: OnceLock<Regex> = OnceLock::new();
    let spaces = SPACES.get_or_init(|| Regex::new(" +").expect("valid regex"));
    input
        .lines()
        .map(|line| spaces.replace_all(line.trim_end(), " ").into_owned())
        .collect::<Vec<String>>()
        .join("\n")
}
