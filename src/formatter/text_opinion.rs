use crate::formatter::legend::{make_text_legend, MINIMUM_DEFINITION_LENGTH};
use crate::formatter::profile::{paint, render_opinion_profile};
use crate::formatter::*;

/// Grade names are truncated beyond this.
pub const MAXIMUM_GRADE_NAME_LENGTH: usize = 20;

/// One opinion profile per grade, all drawn to the same scale, and a legend of the
/// proposals.
pub struct TextOpinionFormatter;

impl Formatter for TextOpinionFormatter {
    fn format(&self, d: &Deliberation, options: &Options) -> TallyResult<String> {
        let expected_width = options.effective_width();
        let glyphs = &options.glyphs;
        glyphs.check_capacity(d.proposals.len(), "proposals");
        let colors = d.colors(d.proposals.len(), options);

        let grade_length = d
            .grades
            .iter()
            .map(|g| measure_string_length(g))
            .max()
            .unwrap_or(1)
            .clamp(1, MAXIMUM_GRADE_NAME_LENGTH);
        let maximum = d.tally.max_grade_total();
        let total_digits = count_digits(maximum);

        let mut out = String::new();
        let mut chart_width = 0;
        let mut table_width = 0;
        for (grade_index, grade) in d.grades.iter().enumerate() {
            let total = d.tally.grade_total(grade_index);
            let mut line = if options.scale == 1.0 {
                format!("{:>width$} ", total, width = total_digits)
            } else {
                format!(
                    "{:>width$.2} ",
                    total as f64 / options.scale,
                    width = total_digits
                )
            };
            line.push_str(&format!(
                "{:>width$} ",
                truncate_string(grade, grade_length, Some(ELLIPSIS)),
                width = grade_length
            ));

            table_width = measure_string_length(&line);
            chart_width = expected_width.saturating_sub(table_width);

            line.push_str(&render_opinion_profile(
                d.tally,
                grade_index,
                maximum,
                chart_width,
                glyphs,
                colors.as_deref(),
            ));
            out.push_str(&line);
            out.push('\n');
        }

        let maximum_definition_length = chart_width
            .saturating_sub(2)
            .max(MINIMUM_DEFINITION_LENGTH);
        let mut definitions = Vec::new();
        for proposal_result in d.ordered_results(options) {
            let name = d.proposal_name(proposal_result.index)?;
            let glyph = glyphs.glyph(proposal_result.index).to_string();
            let glyph = match colors.as_ref().and_then(|c| c.get(proposal_result.index)) {
                Some(color) => paint(&glyph, *color, true),
                None => glyph,
            };
            definitions.push(format!(
                "{}={}",
                glyph,
                truncate_string(name, maximum_definition_length, Some(ELLIPSIS))
            ));
        }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::tests::Fixture;
    use crate::testing::*;

    fn small() -> Fixture {
        Fixture::new(
            &["Pizza", "Chips"],
            &["reject", "poor", "fair", "good"],
            vec![vec![3, 2, 1, 4], vec![2, 3, 0, 4]],
        )
    }

    #[test]
    fn opinion_profiles_with_legend() {
        init_logs();
        let f = small();
        let options = Options {
            width: 30,
            ..Default::default()
        };
        let out = TextOpinionFormatter
            .format(&f.deliberation(), &options)
            .unwrap();
        let expected = concat!(
            "5 reject 0000000011111\n",
            "5   poor 0000011111111\n",
            "1   fair 000\n",
            "8   good 000000000001111111111\n",
            "\n",
            " Legend: 0=Pizza 1=Chips",
        );
        assert_golden(expected, &out);
    }

    #[test]
    fn decimal_totals() {
        let f = small();
        let options = Options {
            width: 30,
            scale: 10.0,
            ..Default::default()
        };
        let out = TextOpinionFormatter
            .format(&f.deliberation(), &options)
            .unwrap();
        assert!(out.starts_with("0.50 reject "));
        assert!(out.contains("\n0.80   good "));
    }

    #[test]
    fn legend_follows_the_ranking() {
        let f = Fixture::new(
            &["Pasta", "Pizza"],
            &["reject", "good"],
            vec![vec![4, 1], vec![1, 4]],
        );
        let options = Options {
            sorted: true,
            ..Default::default()
        };
        let out = TextOpinionFormatter
            .format(&f.deliberation(), &options)
            .unwrap();
        assert!(out.ends_with("1=Pizza 0=Pasta"));
    }
}
