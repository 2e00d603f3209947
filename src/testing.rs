// Helpers shared by the unit tests: a small engine and golden-output comparison.

use mj_judgment::*;
use text_diff::print_diff;

pub(crate) fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Compares an output with its expected value, printing a line diff on mismatch.
pub(crate) fn assert_golden(expected: &str, actual: &str) {
    if expected != actual {
        print_diff(expected, actual, "\n");
        panic!("output differs from the expected one (diff above)");
    }
}

pub(crate) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Ranks proposals by their low median grade, best first, ties broken by input order.
///
/// Good enough to exercise the pipeline, not a majority judgment implementation.
pub(crate) struct MedianEngine;

fn low_median(tally: &ProposalTally) -> usize {
    let total = tally.count_judgments();
    if total == 0 {
        return 0;
    }
    let target = (total - 1) / 2;
    let mut cursor = 0;
    for (idx, &t) in tally.tally.iter().enumerate() {
        cursor += t;
        if cursor > target {
            return idx;
        }
    }
    0
}

impl Deliberator for MedianEngine {
    fn balance(&self, poll: &mut PollTally, policy: Balancing) -> Result<(), JudgmentErrors> {
        let amount_of_judges = poll.amount_of_judges;
        let grades = poll.count_grades();
        for (proposal_index, proposal) in poll.proposals.iter_mut().enumerate() {
            let judgments = proposal.count_judgments();
            if judgments > amount_of_judges {
                return Err(JudgmentErrors::TooManyJudgments { proposal_index });
            }
            let grade = match policy {
                Balancing::StaticDefault(g) => g,
                Balancing::MedianDefault => low_median(proposal),
            };
            if grade >= grades {
                return Err(JudgmentErrors::UnknownGrade(grade));
            }
            proposal.tally.resize(grades, 0);
            proposal.tally[grade] += amount_of_judges - judgments;
        }
        Ok(())
    }

    fn deliberate(&self, poll: &PollTally) -> Result<PollResult, JudgmentErrors> {
        if poll.proposals.is_empty() {
            return Err(JudgmentErrors::EmptyPoll);
        }
        let medians: Vec<usize> = poll.proposals.iter().map(low_median).collect();
        let mut order: Vec<usize> = (0..medians.len()).collect();
        order.sort_by_key(|&idx| std::cmp::Reverse(medians[idx]));
        let mut proposals: Vec<ProposalResult> = medians
            .iter()
            .enumerate()
            .map(|(index, &median)| ProposalResult {
                index,
                rank: 0,
                score: format!("{:03}", median),
                analysis: ProposalAnalysis {
                    total_size: poll.proposals[index].count_judgments(),
                    median_grade: median,
                    second_median_grade: median,
                    ..Default::default()
                },
            })
            .collect();
        for (position, &idx) in order.iter().enumerate() {
            proposals[idx].rank = position + 1;
        }
        let proposals_sorted = order.iter().map(|&idx| proposals[idx].clone()).collect();
        Ok(PollResult {
            proposals,
            proposals_sorted,
        })
    }
}

impl PaletteGenerator for MedianEngine {
    fn palette(&self, amount: usize) -> Vec<Rgb> {
        RedToGreen.palette(amount)
    }
}

/// Interpolates from red to green.
pub(crate) struct RedToGreen;

impl PaletteGenerator for RedToGreen {
    fn palette(&self, amount: usize) -> Vec<Rgb> {
        let steps = amount.saturating_sub(1).max(1) as u32;
        (0..amount as u32)
            .map(|i| {
                let g = (255 * i / steps) as u8;
                Rgb::new(255 - g, g, 0x33)
            })
            .collect()
    }
}

#[test]
fn median_engine_ranks() {
    let poll = PollTally::new(vec![vec![3, 2, 1, 4], vec![0, 0, 1, 9], vec![9, 1, 0, 0]]);
    let res = MedianEngine.deliberate(&poll).unwrap();
    let ranks: Vec<usize> = res.proposals.iter().map(|p| p.rank).collect();
    assert_eq!(ranks, vec![2, 1, 3]);
    assert_eq!(res.proposals_sorted[0].index, 1);
    assert_eq!(RedToGreen.palette(2), vec![Rgb::new(255, 0, 0x33), Rgb::new(0, 255, 0x33)]);
    assert_eq!(MedianEngine.palette(3), RedToGreen.palette(3));
}
