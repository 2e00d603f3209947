use mj_judgment::{PaletteGenerator, PollResult, PollTally, ProposalResult, ProposalTally, Rgb};
use snafu::prelude::*;

use crate::config::{OutputFormat, Options};
use crate::*;

pub mod csv;
pub mod gnuplot_merit;
pub mod gnuplot_opinion;
pub mod json;
pub mod legend;
pub mod profile;
pub mod text;
pub mod text_opinion;
pub mod yaml;

/// The suffix of truncated names.
pub const ELLIPSIS: char = '…';

/// Everything a formatter may need about a deliberated poll.
pub struct Deliberation<'a> {
    /// In the order they were submitted.
    pub proposals: &'a [String],
    /// From "worst" to "best".
    pub grades: &'a [String],
    /// Scaled integer tallies, after balancing.
    pub tally: &'a PollTally,
    pub result: &'a PollResult,
    pub palette: &'a dyn PaletteGenerator,
}

impl<'a> Deliberation<'a> {
    pub fn proposal_name(&self, index: usize) -> TallyResult<&'a str> {
        let proposals = self.proposals;
        proposals.get(index).map(|s| s.as_str()).context(MissingProposalSnafu {
            index,
            amount: proposals.len(),
        })
    }

    pub fn grade_name(&self, index: usize) -> TallyResult<&'a str> {
        let grades = self.grades;
        grades.get(index).map(|s| s.as_str()).context(MissingGradeSnafu {
            index,
            amount: grades.len(),
        })
    }

    pub fn proposal_tally(&self, index: usize) -> TallyResult<&'a ProposalTally> {
        let proposals = &self.tally.proposals;
        proposals.get(index).context(MissingProposalSnafu {
            index,
            amount: proposals.len(),
        })
    }

    /// The proposal results, by rank when the options ask for it.
    pub fn ordered_results(&self, options: &Options) -> &'a [ProposalResult] {
        self.result.ordered(options.sorted)
    }

    /// Only when colors are requested.
    pub fn colors(&self, amount: usize, options: &Options) -> Option<Vec<Rgb>> {
        if options.colorized {
            Some(self.palette.palette(amount))
        } else {
            None
        }
    }
}

/// Implement this to add another output.
pub trait Formatter {
    fn format(&self, deliberation: &Deliberation, options: &Options) -> TallyResult<String>;
}

pub fn formatter_for(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(text::TextFormatter),
        OutputFormat::TextOpinion => Box::new(text_opinion::TextOpinionFormatter),
        OutputFormat::Csv => Box::new(csv::CsvFormatter),
        OutputFormat::Json => Box::new(json::JsonFormatter),
        OutputFormat::Yaml => Box::new(yaml::YamlFormatter),
        OutputFormat::GnuplotMerit => Box::new(gnuplot_merit::GnuplotMeritFormatter),
        OutputFormat::GnuplotOpinion => Box::new(gnuplot_opinion::GnuplotOpinionFormatter),
    }
}

/// The displayed length, in unicode scalar values rather than bytes.
pub fn measure_string_length(s: &str) -> usize {
    s.chars().count()
}

/// Truncates to `length` characters, the suffix included.
pub fn truncate_string(s: &str, length: usize, suffix: Option<char>) -> String {
    if measure_string_length(s) <= length {
        return s.to_string();
    }
    match suffix {
        Some(c) if length > 0 => {
            let mut truncated: String = s.chars().take(length - 1).collect();
            truncated.push(c);
            truncated
        }
        _ => s.chars().take(length).collect(),
    }
}

pub fn count_digits(mut i: u64) -> usize {
    let mut count = 1;
    while i >= 10 {
        i /= 10;
        count += 1;
    }
    count
}

/// Displays a scaled tally with the precision of the input.
pub fn format_tally_value(value: u64, scale: f64) -> String {
    if scale == 1.0 {
        value.to_string()
    } else {
        format!("{}", value as f64 / scale)
    }
}

/// Writes CSV records into a string.
pub(crate) fn write_csv_records<I>(records: I) -> TallyResult<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = ::csv::Writer::from_writer(vec![]);
    for record in records {
        writer.write_record(&record).context(CsvWriteSnafu)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context(CsvFlushSnafu)?;
    String::from_utf8(bytes).context(OutputEncodingSnafu)
}
