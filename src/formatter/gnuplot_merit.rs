use mj_judgment::Rgb;

use crate::formatter::*;

/// Names in the charts are truncated beyond this.
pub const MAXIMUM_GNUPLOT_NAME_LENGTH: usize = 16;

pub const MERIT_CANVAS_WIDTH: usize = 1000;
pub const MERIT_CANVAS_BASE_HEIGHT: usize = 190;
/// Added to the height of the canvas for each proposal.
pub const MERIT_CANVAS_ROW_HEIGHT: usize = 70;

/// A gnuplot array literal, like `['#e63333', '#338033']`.
pub fn color_array(colors: &[Rgb]) -> String {
    let quoted: Vec<String> = colors
        .iter()
        .map(|c| format!("'{}'", c.to_hex()))
        .collect();
    format!("[{}]", quoted.join(", "))
}

pub fn gnuplot_name(name: &str) -> String {
    truncate_string(name, MAXIMUM_GNUPLOT_NAME_LENGTH, Some(ELLIPSIS))
}

/// A gnuplot script drawing the merit profiles as stacked horizontal bars, one per
/// proposal, the median shown as a dashed line.
pub struct GnuplotMeritFormatter;

impl Formatter for GnuplotMeritFormatter {
    fn format(&self, d: &Deliberation, options: &Options) -> TallyResult<String> {
        let results = d.ordered_results(options);

        let mut header = vec!["Proposal".to_string()];
        header.extend(d.grades.iter().cloned());
        let mut records = vec![header];
        for proposal_result in results {
            let mut row = vec![gnuplot_name(d.proposal_name(proposal_result.index)?)];
            for grade_index in 0..d.grades.len() {
                let tally = d.proposal_tally(proposal_result.index)?.grade(grade_index);
                row.push(format_tally_value(tally, options.scale));
            }
            records.push(row);
        }
        let data = write_csv_records(records)?;

        let height = MERIT_CANVAS_BASE_HEIGHT + MERIT_CANVAS_ROW_HEIGHT * results.len();
        let colors = color_array(&d.palette.palette(d.grades.len()));

        Ok(format!(
            r"# This is a script for gnuplot http://www.gnuplot.info/
# Pipe it into `gnuplot -p` to display the merit profiles.

$data << EOD
{data}
EOD
set datafile separator ','

set term wxt \
    persist \
    size {width}, {height} \
    background rgb '#f0f0f0' \
    title 'Merit Profile' \
    font ',12'

set xrange [:]
set yrange [:] reverse

set key \
    out \
    center bottom \
    horizontal \
    spacing 1.5 \
    box \
    maxrows 1 \
    width 0.8

set style fill solid 1.0

set arrow \
    from 50,-0.5 \
    to 50,{arrow_end:.1} \
    nohead \
    dt 2 \
    front

set format x '%.0f%%'
set xtics out 20

unset mouse

nb_grades = {nb_grades}
box_width = 0.9
array colors = {colors}

plot for [col=2: nb_grades + 1] \
    $data u col: 0 : \
    ( total = sum [i=2: nb_grades + 1] column(i), \
    ( sum [i=2: col-1] column(i) / total * 100)): \
    ( sum [i=2: col  ] column(i) / total * 100) : \
    ($0 - box_width / 2.) : \
    ($0 + box_width / 2.) : \
    ytic(1) \
    with boxxyerror \
    title columnhead(col) \
    lt rgb colors[col-1]
",
            data = data.trim(),
            width = MERIT_CANVAS_WIDTH,
            height = height,
            arrow_end = results.len() as f64 - 0.5,
            nb_grades = d.grades.len(),
            colors = colors,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::tests::Fixture;
    use crate::testing::*;
    use mj_judgment::PaletteGenerator;

    #[test]
    fn colors_as_gnuplot_array() {
        assert_eq!(
            color_array(&[Rgb::new(0xe6, 0x33, 0x33), Rgb::new(0x33, 0x80, 0x33)]),
            "['#e63333', '#338033']"
        );
        assert_eq!(color_array(&[]), "[]");
    }

    #[test]
    fn merit_script() {
        let f = Fixture::pizza();
        let out = GnuplotMeritFormatter
            .format(&f.deliberation(), &Options::default())
            .unwrap();
        let data = concat!(
            "$data << EOD\n",
            "Proposal,reject,poor,fair,good,very good,excellent\n",
            "Pizza,3,2,1,4,4,2\n",
            "Chips,2,3,0,4,3,4\n",
            "Pasta,4,5,1,4,0,2\n",
            "EOD\n",
        );
        assert!(out.contains(data), "{}", out);
        assert!(out.contains("    size 1000, 400 \\\n"));
        assert!(out.contains("    to 50,2.5 \\\n"));
        assert!(out.contains("\nnb_grades = 6\n"));
        let colors = color_array(&RedToGreen.palette(6));
        assert!(out.contains(&format!("\narray colors = {}\n", colors)));
        assert!(out.ends_with("    lt rgb colors[col-1]\n"));
    }

    #[test]
    fn sorted_and_scaled_rows() {
        let f = Fixture::new(
            &["A proposal with a long name", "Pizza"],
            &["bad", "good"],
            vec![vec![25, 5], vec![5, 25]],
        );
        let options = Options {
            sorted: true,
            scale: 10.0,
            ..Default::default()
        };
        let out = GnuplotMeritFormatter
            .format(&f.deliberation(), &options)
            .unwrap();
        let data = concat!(
            "$data << EOD\n",
            "Proposal,bad,good\n",
            "Pizza,0.5,2.5\n",
            "A proposal with…,2.5,0.5\n",
            "EOD\n",
        );
        let start = out.find("$data").unwrap();
        let end = out.find("\nEOD\n").unwrap() + 5;
        assert_golden(data, &out[start..end]);
        assert!(out.contains("    size 1000, 330 \\\n"));
    }

    #[test]
    fn missing_tally_is_an_error() {
        let mut f = Fixture::pizza();
        f.tally.proposals.pop();
        let res = GnuplotMeritFormatter.format(&f.deliberation(), &Options::default());
        assert!(matches!(
            res,
            Err(TallyError::MissingProposal {
                index: 2,
                amount: 2
            })
        ));
    }
}
