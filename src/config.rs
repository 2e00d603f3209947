// Settings consumed by the pipeline and the formatters.
// Loading them from a file or from command-line flags is left to the caller.

use std::str::FromStr;

use log::warn;
use mj_judgment::Balancing;
use serde::{Deserialize, Serialize};

use crate::reader::number::{is_blank, read_number};
use crate::*;

/// Width of the text outputs, in characters, when none is requested.
pub const DEFAULT_WIDTH: usize = 79;

/// Digits, then uppercase, then lowercase letters.
pub const DEFAULT_GLYPHS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

pub const DEFAULT_MEDIAN_MARKER: char = '|';

/// The one-character symbols standing for grades or proposals in the ASCII charts.
///
/// Category `i` gets the symbol at `i` modulo the size of the alphabet: beyond
/// [`GlyphSet::capacity`] categories, symbols repeat.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphSet {
    pub alphabet: String,
    pub median_marker: char,
}

impl Default for GlyphSet {
    fn default() -> Self {
        GlyphSet {
            alphabet: DEFAULT_GLYPHS.to_string(),
            median_marker: DEFAULT_MEDIAN_MARKER,
        }
    }
}

impl GlyphSet {
    /// The amount of categories that get distinct symbols.
    pub fn capacity(&self) -> usize {
        self.alphabet.chars().count()
    }

    pub fn glyph(&self, index: usize) -> char {
        let capacity = self.capacity();
        if capacity == 0 {
            return '?';
        }
        self.alphabet.chars().nth(index % capacity).unwrap_or('?')
    }

    /// Warns when some categories will share their symbol.
    pub fn check_capacity(&self, amount: usize, what: &str) {
        if amount > self.capacity() {
            warn!(
                "{} {} but only {} distinct symbols: symbols will repeat",
                amount,
                what,
                self.capacity()
            );
        }
    }
}

/// Options shared by all the formatters. Some formatters ignore some options.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub colorized: bool,
    /// The tallies are integers multiplied by this, so that they can be displayed as decimals.
    pub scale: f64,
    /// List the proposals by rank rather than in input order.
    pub sorted: bool,
    /// Desired width of the text outputs, 0 for the default.
    pub width: usize,
    pub glyphs: GlyphSet,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            colorized: false,
            scale: 1.0,
            sorted: false,
            width: DEFAULT_WIDTH,
            glyphs: GlyphSet::default(),
        }
    }
}

impl Options {
    pub fn effective_width(&self) -> usize {
        if self.width == 0 {
            DEFAULT_WIDTH
        } else {
            self.width
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// ASCII merit profiles, one line per proposal.
    Text,
    /// ASCII opinion profiles, one line per grade.
    TextOpinion,
    Csv,
    Json,
    Yaml,
    GnuplotMerit,
    GnuplotOpinion,
}

impl OutputFormat {
    /// Resolves a format name, with the chart (`merit` or `opinion`) for the generic
    /// chart formats.
    pub fn from_names(format: &str, chart: &str) -> TallyResult<OutputFormat> {
        let chart = chart.trim();
        let opinion = match chart {
            "" | "merit" => false,
            "opinion" => true,
            _ => return UnsupportedChartSnafu { chart }.fail(),
        };
        match format.trim() {
            "text" | "txt" if opinion => Ok(OutputFormat::TextOpinion),
            "gnuplot" | "plot" if opinion => Ok(OutputFormat::GnuplotOpinion),
            f => f.parse(),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "text" | "txt" => Ok(OutputFormat::Text),
            "opinion" | "text-opinion" | "text_opinion" => Ok(OutputFormat::TextOpinion),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "yml" | "yaml" => Ok(OutputFormat::Yaml),
            "gnuplot" | "plot" | "gnuplot-merit" | "gnuplot_merit" => {
                Ok(OutputFormat::GnuplotMerit)
            }
            "gnuplot-opinion" | "gnuplot_opinion" => Ok(OutputFormat::GnuplotOpinion),
            format => UnsupportedFormatSnafu { format }.fail(),
        }
    }
}

/// The grade given to the judges that did not judge a proposal.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefaultGrade {
    /// By name, or by index when the name is a number.
    Named(String),
    /// The median grade of each proposal.
    Median,
}

impl Default for DefaultGrade {
    fn default() -> Self {
        DefaultGrade::Named("0".to_string())
    }
}

impl FromStr for DefaultGrade {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DefaultGrade::Named(s.trim().to_string()))
    }
}

impl DefaultGrade {
    /// The grade names take precedence over the keywords and the indices.
    pub fn resolve(&self, grades: &[String]) -> TallyResult<Balancing> {
        let value = match self {
            DefaultGrade::Median => return Ok(Balancing::MedianDefault),
            DefaultGrade::Named(value) => value.as_str(),
        };
        if let Some(idx) = grades.iter().position(|g| g == value) {
            return Ok(Balancing::StaticDefault(idx));
        }
        if value == "majority" || value == "median" {
            return Ok(Balancing::MedianDefault);
        }
        // Indices are read like tallies, so `1.0` stands for the second grade.
        match read_number(value) {
            Ok(idx)
                if !is_blank(value)
                    && idx >= 0.0
                    && idx.fract() == 0.0
                    && idx < grades.len() as f64 =>
            {
                Ok(Balancing::StaticDefault(idx as usize))
            }
            _ => UnknownDefaultGradeSnafu { value }.fail(),
        }
    }
}

/// What the engine needs besides the tally.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeliberationSettings {
    pub default_grade: DefaultGrade,
    /// When unknown, the largest amount of judgments received by a proposal.
    pub amount_of_judges: Option<u64>,
}
