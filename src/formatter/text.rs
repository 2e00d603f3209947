use log::debug;
use snafu::prelude::*;

use crate::formatter::legend::{make_text_legend, MINIMUM_DEFINITION_LENGTH};
use crate::formatter::profile::{paint, render_merit_profile, MIN_PROFILE_WIDTH};
use crate::formatter::*;

/// Proposal names are truncated beyond this.
pub const MAXIMUM_PROPOSAL_NAME_LENGTH: usize = 30;

/// The default formatter: one merit profile per proposal, with its rank, and a legend
/// of the grades.
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, d: &Deliberation, options: &Options) -> TallyResult<String> {
        let expected_width = options.effective_width();
        let glyphs = &options.glyphs;
        glyphs.check_capacity(d.grades.len(), "grades");
        let colors = d.colors(d.grades.len(), options);

        let results = d.ordered_results(options);
        let rank_digits = count_digits(d.result.biggest_rank() as u64);
        let name_length = d
            .proposals
            .iter()
            .map(|p| measure_string_length(p))
            .max()
            .unwrap_or(1)
            .clamp(1, MAXIMUM_PROPOSAL_NAME_LENGTH);

        let mut out = String::new();
        let mut chart_width = 0;
        let mut table_width = 0;
        for proposal_result in results {
            let name = d.proposal_name(proposal_result.index)?;
            let mut line = format!("#{:0width$}  ", proposal_result.rank, width = rank_digits);
            line.push_str(&format!(
                " {:>width$} ",
                truncate_string(name, name_length, Some(ELLIPSIS)),
                width = name_length
            ));

            table_width = measure_string_length(&line);
            chart_width = expected_width.saturating_sub(table_width);
            if chart_width % 2 == 0 {
                chart_width = chart_width.saturating_sub(1);
            }

            let tally = d
                .tally
                .proposals
                .get(proposal_result.index)
                .context(MissingProposalSnafu {
                    index: proposal_result.index,
                    amount: d.tally.proposals.len(),
                })?;
            if tally.count_judgments() == 0 {
                debug!("TextFormatter: no judgment for {:?}", name);
                line.push_str(&"-".repeat(chart_width.max(MIN_PROFILE_WIDTH)));
            } else {
                line.push_str(&render_merit_profile(
                    tally,
                    chart_width,
                    glyphs,
                    colors.as_deref(),
                )?);
            }
            out.push_str(&line);
            out.push('\n');
        }

        let maximum_definition_length = chart_width
            .saturating_sub(2)
            .max(MINIMUM_DEFINITION_LENGTH);
        let definitions: Vec<String> = d
            .grades
            .iter()
            .enumerate()
            .map(|(grade_index, grade)| {
                let glyph = glyphs.glyph(grade_index).to_string();
                let glyph = match colors.as_ref().and_then(|c| c.get(grade_index)) {
                    Some(color) => paint(&glyph, *color, true),
                    None => glyph,
                };
                format!(
                    "{}={}",
                    glyph,
                    truncate_string(grade, maximum_definition_length, Some(ELLIPSIS))
                )
            })
            .collect();

        out.push('\n');
        out.push_str(&make_text_legend(
            "Legend:",
            &definitions,
            table_width,
            expected_width,
        ));
        Ok(out)
    }
}
