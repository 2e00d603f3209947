// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The amount of judgments received by one proposal, for each grade.
///
/// Grades are ordered from "worst" to "best".
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalTally {
    pub tally: Vec<u64>,
}

impl ProposalTally {
    pub fn new(tally: Vec<u64>) -> ProposalTally {
        ProposalTally { tally }
    }

    /// The total amount of judgments, all grades included. Saturates at `u64::MAX`.
    pub fn count_judgments(&self) -> u64 {
        self.tally.iter().fold(0, |acc, &t| acc.saturating_add(t))
    }

    pub fn count_available_grades(&self) -> usize {
        self.tally.len()
    }

    /// The tally for one grade. A grade that this proposal does not know about has no judgments.
    pub fn grade(&self, grade_index: usize) -> u64 {
        self.tally.get(grade_index).copied().unwrap_or(0)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollTally {
    /// The amount of participants, declared or guessed.
    pub amount_of_judges: u64,
    /// In the order they were submitted.
    pub proposals: Vec<ProposalTally>,
}

impl PollTally {
    /// Builds a poll from integer tallies and guesses the amount of judges.
    pub fn new(tallies: Vec<Vec<u64>>) -> PollTally {
        let mut poll = PollTally {
            amount_of_judges: 0,
            proposals: tallies.into_iter().map(ProposalTally::new).collect(),
        };
        poll.guess_amount_of_judges();
        poll
    }

    /// Sets the amount of judges to the largest amount of judgments received by a proposal.
    pub fn guess_amount_of_judges(&mut self) {
        self.amount_of_judges = self
            .proposals
            .iter()
            .map(|p| p.count_judgments())
            .max()
            .unwrap_or(0);
        log::debug!(
            "guess_amount_of_judges: {} judges over {} proposals",
            self.amount_of_judges,
            self.proposals.len()
        );
    }

    pub fn count_grades(&self) -> usize {
        self.proposals
            .iter()
            .map(|p| p.count_available_grades())
            .max()
            .unwrap_or(0)
    }

    /// The amount of judgments given to one grade, all proposals included.
    /// Saturates at `u64::MAX`.
    pub fn grade_total(&self, grade_index: usize) -> u64 {
        self.proposals
            .iter()
            .fold(0, |acc, p| acc.saturating_add(p.grade(grade_index)))
    }

    /// The largest per-grade total, used to share one scale between all the grades.
    pub fn max_grade_total(&self) -> u64 {
        (0..self.count_grades())
            .map(|g| self.grade_total(g))
            .max()
            .unwrap_or(0)
    }
}

/// How to fill the judgments missing from proposals that received fewer than
/// the amount of judges.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Balancing {
    /// The missing judgments go to the grade at this index.
    StaticDefault(usize),
    /// The missing judgments go to the median grade of each proposal.
    MedianDefault,
}

// ******** Output data structures *********

/// The statistics the engine computed for one proposal.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalAnalysis {
    pub total_size: u64,
    pub median_grade: usize,
    pub median_group_size: u64,
    pub second_median_grade: usize,
    pub second_group_size: u64,
    /// -1 for the contestation group, +1 for the adhesion group, 0 when empty.
    pub second_group_sign: i8,
    pub adhesion_group_grade: usize,
    pub adhesion_group_size: u64,
    pub contestation_group_grade: usize,
    pub contestation_group_size: u64,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalResult {
    /// Position of the proposal in the input.
    pub index: usize,
    /// Starts at 1. Proposals may share a rank.
    pub rank: usize,
    /// Opaque, lexicographically comparable score.
    pub score: String,
    pub analysis: ProposalAnalysis,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResult {
    /// In the order of the input.
    pub proposals: Vec<ProposalResult>,
    /// By increasing rank.
    pub proposals_sorted: Vec<ProposalResult>,
}

impl PollResult {
    /// The results in input order, or by rank when `sorted` is set.
    pub fn ordered(&self, sorted: bool) -> &[ProposalResult] {
        if sorted {
            &self.proposals_sorted
        } else {
            &self.proposals
        }
    }

    pub fn biggest_rank(&self) -> usize {
        self.proposals.iter().map(|p| p.rank).max().unwrap_or(1).max(1)
    }
}

/// A color of a palette.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Errors that prevent the engine from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum JudgmentErrors {
    EmptyPoll,
    /// A proposal received more judgments than there are judges.
    TooManyJudgments { proposal_index: usize },
    /// The default grade does not exist in the poll.
    UnknownGrade(usize),
    /// Proposals must be balanced before deliberation.
    Unbalanced,
}

impl Error for JudgmentErrors {}

impl Display for JudgmentErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JudgmentErrors::EmptyPoll => write!(f, "the poll has no proposals"),
            JudgmentErrors::TooManyJudgments { proposal_index } => write!(
                f,
                "proposal #{} received more judgments than there are judges",
                proposal_index
            ),
            JudgmentErrors::UnknownGrade(idx) => write!(f, "no grade at index {}", idx),
            JudgmentErrors::Unbalanced => {
                write!(f, "proposals do not all have the same amount of judgments")
            }
        }
    }
}
