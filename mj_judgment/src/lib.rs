/*!
Data types shared between the readers and renderers of majority judgment tallies
and the engine that deliberates on them.

This crate carries no ranking algorithm. An engine plugs in by implementing
[`Deliberator`] and [`PaletteGenerator`]:

```
use mj_judgment::*;

struct InputOrder;

impl Deliberator for InputOrder {
    fn balance(&self, _poll: &mut PollTally, _policy: Balancing) -> Result<(), JudgmentErrors> {
        Ok(())
    }

    fn deliberate(&self, poll: &PollTally) -> Result<PollResult, JudgmentErrors> {
        let proposals: Vec<ProposalResult> = (0..poll.proposals.len())
            .map(|index| ProposalResult {
                index,
                rank: index + 1,
                score: String::new(),
                analysis: ProposalAnalysis::default(),
            })
            .collect();
        Ok(PollResult {
            proposals_sorted: proposals.clone(),
            proposals,
        })
    }
}

let poll = PollTally::new(vec![vec![3, 2, 1, 4], vec![2, 3, 0, 4]]);
let result = InputOrder.deliberate(&poll)?;
assert_eq!(result.proposals[1].rank, 2);
assert_eq!(poll.amount_of_judges, 10);
# Ok::<(), JudgmentErrors>(())
```
*/

mod types;

pub use crate::types::*;

/// Ranks the proposals of a poll.
pub trait Deliberator {
    /// Fills the missing judgments of the proposals, so that they all have
    /// `poll.amount_of_judges` judgments.
    fn balance(&self, poll: &mut PollTally, policy: Balancing) -> Result<(), JudgmentErrors>;

    fn deliberate(&self, poll: &PollTally) -> Result<PollResult, JudgmentErrors>;
}

/// Provides a color per category (grade or proposal), in category order.
pub trait PaletteGenerator {
    fn palette(&self, amount: usize) -> Vec<Rgb>;
}
