// Fixed-width ASCII bars: merit profiles (one proposal across the grades) and
// opinion profiles (one grade across the proposals).

use colored::Colorize;
use mj_judgment::{PollTally, ProposalTally, Rgb};
use snafu::prelude::*;

use crate::config::GlyphSet;
use crate::*;

/// Narrower bars are widened to this.
pub const MIN_PROFILE_WIDTH: usize = 3;

/// The grade of the judgment at `position` out of `width`, when the judgments are
/// laid out from the worst grade to the best.
///
/// Grades without judgments never claim a cell.
pub fn grade_at_position(
    tally: &ProposalTally,
    position: usize,
    width: usize,
) -> TallyResult<usize> {
    let total = tally.count_judgments();
    // Exact floor(position / width * total).
    let target = (position as u128 * total as u128 / width.max(1) as u128) as u64;
    let mut cursor = 0u64;
    for (grade_index, &grade_tally) in tally.tally.iter().enumerate() {
        if grade_tally == 0 {
            continue;
        }
        let cursor_start = cursor;
        cursor = cursor.saturating_add(grade_tally);
        if cursor_start <= target && target < cursor {
            return Ok(grade_index);
        }
    }
    EmptyTallySnafu.fail()
}

/// The grade shown in each cell of the merit profile of a proposal.
///
/// Fails on proposals without any judgment.
pub fn merit_profile(tally: &ProposalTally, width: usize) -> TallyResult<Vec<usize>> {
    let width = width.max(MIN_PROFILE_WIDTH);
    ensure!(tally.count_judgments() > 0, EmptyTallySnafu);
    (0..width)
        .map(|position| grade_at_position(tally, position, width))
        .collect()
}

/// The cell bisecting a profile of this width.
pub fn median_cell(width: usize) -> usize {
    width.max(MIN_PROFILE_WIDTH) / 2
}

/// Renders the merit profile of a proposal, the median cell holding the median marker.
///
/// `colors` holds one color per grade.
pub fn render_merit_profile(
    tally: &ProposalTally,
    width: usize,
    glyphs: &GlyphSet,
    colors: Option<&[Rgb]>,
) -> TallyResult<String> {
    let cells = merit_profile(tally, width)?;
    let median = median_cell(width);
    let mut ascii = String::new();
    for (cursor, &grade_index) in cells.iter().enumerate() {
        let is_median = cursor == median;
        let glyph = if is_median {
            glyphs.median_marker
        } else {
            glyphs.glyph(grade_index)
        };
        match colors.and_then(|c| c.get(grade_index)) {
            Some(color) => ascii.push_str(&paint(&glyph.to_string(), *color, !is_median)),
            None => ascii.push(glyph),
        }
    }
    Ok(ascii)
}

/// The amount of cells given to each proposal in the opinion profile of a grade.
///
/// `maximum` is the largest per-grade total of the poll, so that all the grades share
/// one scale. The rounding remainder is carried over to the next proposal, which keeps
/// the total within `width` cells.
pub fn opinion_profile(
    poll: &PollTally,
    grade_index: usize,
    maximum: u64,
    width: usize,
) -> Vec<usize> {
    let width = width.max(MIN_PROFILE_WIDTH) as f64;
    if maximum == 0 {
        return vec![0; poll.proposals.len()];
    }
    let mut carry = 0.0;
    poll.proposals
        .iter()
        .map(|proposal| {
            let grade_tally = proposal.grade(grade_index);
            if grade_tally == 0 {
                return 0;
            }
            let exact = width * grade_tally as f64 / maximum as f64 + carry;
            let amount = exact.round().max(0.0);
            carry = exact - amount;
            amount as usize
        })
        .collect()
}

/// Renders the opinion profile of a grade. `colors` holds one color per proposal.
pub fn render_opinion_profile(
    poll: &PollTally,
    grade_index: usize,
    maximum: u64,
    width: usize,
    glyphs: &GlyphSet,
    colors: Option<&[Rgb]>,
) -> String {
    let amounts = opinion_profile(poll, grade_index, maximum, width);
    let mut ascii = String::new();
    for (proposal_index, &amount) in amounts.iter().enumerate() {
        if amount == 0 {
            continue;
        }
        let bricks: String = std::iter::repeat(glyphs.glyph(proposal_index))
            .take(amount)
            .collect();
        match colors.and_then(|c| c.get(proposal_index)) {
            Some(color) => ascii.push_str(&paint(&bricks, *color, true)),
            None => ascii.push_str(&bricks),
        }
    }
    ascii
}

/// Paints the background, and the foreground too unless the text must stand out.
pub fn paint(text: &str, color: Rgb, hide_text: bool) -> String {
    let painted = text.on_truecolor(color.r, color.g, color.b);
    if hide_text {
        painted.truecolor(color.r, color.g, color.b).to_string()
    } else {
        painted.to_string()
    }
}
