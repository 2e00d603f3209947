use crate::formatter::gnuplot_merit::{color_array, gnuplot_name};
use crate::formatter::*;

pub const OPINION_CANVAS_BASE_WIDTH: usize = 400;
/// Added to the width of the canvas for each grade.
pub const OPINION_CANVAS_COLUMN_WIDTH: usize = 90;
pub const OPINION_CANVAS_HEIGHT: usize = 600;

/// A gnuplot script drawing one stacked column per grade, each proposal with its color.
pub struct GnuplotOpinionFormatter;

impl Formatter for GnuplotOpinionFormatter {
    fn format(&self, d: &Deliberation, options: &Options) -> TallyResult<String> {
        let results = d.ordered_results(options);

        let mut header = vec!["Grade \\ Proposal".to_string()];
        for proposal_result in results {
            header.push(gnuplot_name(d.proposal_name(proposal_result.index)?));
        }
        let mut records = vec![header];
        for (grade_index, grade) in d.grades.iter().enumerate() {
            let mut row = vec![grade.clone()];
            for proposal_result in results {
                let tally = d.proposal_tally(proposal_result.index)?.grade(grade_index);
                row.push(format_tally_value(tally, options.scale));
            }
            records.push(row);
        }
        let data = write_csv_records(records)?;

        let width = OPINION_CANVAS_BASE_WIDTH + OPINION_CANVAS_COLUMN_WIDTH * d.grades.len();
        // Each proposal keeps its color whatever the order of the columns.
        let palette = d.palette.palette(d.proposals.len());
        let colors: Vec<_> = results
            .iter()
            .filter_map(|r| palette.get(r.index).copied())
            .collect();

        Ok(format!(
            r##"# This is a script for gnuplot http://www.gnuplot.info/
# Pipe it into `gnuplot -p` to display the opinion profile.

$tally << EOD
{data}
EOD
set datafile separator ","

set term wxt \
    persist \
    size {width}, {height} \
    background rgb '#f0f0f0' \
    title 'Opinion Profile' \
    font ',14'

set ylabel 'Judges'

set border 11

set key samplen 2 spacing 0.85

set key \
    out \
    center bottom \
    horizontal \
    spacing 1 \
    box \
    maxrows 1 \
    autotitle \
    columnhead \
    width 0.8541

set xtics nomirror scale 0
set ytics out nomirror

set grid ytics lt 0 lw 1 lc rgb "#bbbbbb"

set style data histogram
set style histogram rowstacked
set style fill solid border -1
set boxwidth 0.8541

nb_proposals = {nb_proposals}
array colors = {colors}

plot for [col = 2 : nb_proposals+1] \
    "$tally" using col:xticlabels(1) \
    lt rgb colors[col-1]
"##,
            data = data.trim(),
            width = width,
            height = OPINION_CANVAS_HEIGHT,
            nb_proposals = results.len(),
            colors = color_array(&colors),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::tests::Fixture;
    use crate::testing::*;

    fn data_block(out: &str) -> &str {
        let start = out.find("$tally << EOD").unwrap();
        let end = out.find("\nEOD\n").unwrap() + 5;
        &out[start..end]
    }

    #[test]
    fn opinion_script() {
        let f = Fixture::pizza();
        let out = GnuplotOpinionFormatter
            .format(&f.deliberation(), &Options::default())
            .unwrap();
        let expected = concat!(
            "$tally << EOD\n",
            "Grade \\ Proposal,Pizza,Chips,Pasta\n",
            "reject,3,2,4\n",
            "poor,2,3,5\n",
            "fair,1,0,1\n",
            "good,4,4,4\n",
            "very good,4,3,0\n",
            "excellent,2,4,2\n",
            "EOD\n",
        );
        assert_golden(expected, data_block(&out));
        assert!(out.contains("    size 940, 600 \\\n"));
        assert!(out.contains("\nnb_proposals = 3\n"));
        assert!(out.contains("\narray colors = ['#ff0033', '#807f33', '#00ff33']\n"));
    }

    #[test]
    fn sorted_columns_keep_their_colors() {
        let f = Fixture::new(
            &["Pasta", "Pizza"],
            &["bad", "good"],
            vec![vec![4, 1], vec![1, 4]],
        );
        let options = Options {
            sorted: true,
            ..Default::default()
        };
        let out = GnuplotOpinionFormatter
            .format(&f.deliberation(), &options)
            .unwrap();
        let expected = concat!(
            "$tally << EOD\n",
            "Grade \\ Proposal,Pizza,Pasta\n",
            "bad,1,4\n",
            "good,4,1\n",
            "EOD\n",
        );
        assert_golden(expected, data_block(&out));
        assert!(out.contains("\narray colors = ['#00ff33', '#ff0033']\n"));
        assert!(out.contains("    size 580, 600 \\\n"));
    }

    #[test]
    fn missing_tally_is_an_error() {
        let mut f = Fixture::pizza();
        f.tally.proposals.pop();
        let res = GnuplotOpinionFormatter.format(&f.deliberation(), &Options::default());
        assert!(matches!(
            res,
            Err(TallyError::MissingProposal {
                index: 2,
                amount: 2
            })
        ));
    }
}
