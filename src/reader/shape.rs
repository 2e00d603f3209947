// Detection of the structure of a tally: where are the labels?

use serde::{Deserialize, Serialize};

use crate::reader::number::{is_blank, read_number};
use crate::reader::RawMatrix;

/// Which axes of the raw matrix hold labels instead of tallies.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// The first row holds the names of the grades.
    pub has_grade_labels_row: bool,
    /// The first column holds the names of the proposals.
    pub has_proposal_names_column: bool,
}

impl Shape {
    pub const LABELLED: Shape = Shape {
        has_grade_labels_row: true,
        has_proposal_names_column: true,
    };
    pub const BARE: Shape = Shape {
        has_grade_labels_row: false,
        has_proposal_names_column: false,
    };
}

/// Decides the shape of a raw matrix.
///
/// The default heuristic is [`FirstRowColumnProbe`]. Callers that know the layout of
/// their input should pass a [`Shape`] instead, which always detects itself.
pub trait ShapeDetector {
    fn detect_shape(&self, matrix: &RawMatrix) -> Shape;
}

impl ShapeDetector for Shape {
    fn detect_shape(&self, _matrix: &RawMatrix) -> Shape {
        *self
    }
}

/// Probes the first row and the first column for non-numeric cells.
///
/// A single non-blank cell that does not read as a number marks the whole axis as labels.
/// This is ambiguous for polls whose proposals are numbered: their names read as numbers.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct FirstRowColumnProbe;

impl ShapeDetector for FirstRowColumnProbe {
    fn detect_shape(&self, matrix: &RawMatrix) -> Shape {
        let mut shape = Shape::BARE;

        for (idx, row) in matrix.usable_rows().enumerate() {
            if idx == 0 {
                // Right to left, so that the usually blank top-left corner is looked at last.
                shape.has_grade_labels_row = row.cells[1..]
                    .iter()
                    .rev()
                    .filter(|cell| !is_blank(cell))
                    .any(|cell| read_number(cell).is_err());
            }

            if idx > 0 || !shape.has_grade_labels_row {
                let first = &row.cells[0];
                if !is_blank(first) && read_number(first).is_err() {
                    shape.has_proposal_names_column = true;
                }
            }
        }

        shape
    }
}
