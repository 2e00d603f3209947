// The whole pipeline: read, scale, balance, deliberate, format.

use log::{debug, info};
use mj_judgment::{Deliberator, PaletteGenerator, PollResult, PollTally};
use snafu::prelude::*;

use crate::config::{DeliberationSettings, Options, OutputFormat};
use crate::formatter::{formatter_for, Deliberation};
use crate::reader::scale::scale_tallies;
use crate::reader::{read_source, TallyReader};
use crate::*;

/// A poll as read from its input, with integer tallies.
#[derive(PartialEq, Debug, Clone)]
pub struct Poll {
    /// In the order they were submitted.
    pub proposals: Vec<String>,
    /// From "worst" to "best".
    pub grades: Vec<String>,
    pub tally: PollTally,
    /// The tallies of the input, multiplied by this, are the integer tallies.
    pub scale: f64,
}

impl Poll {
    pub fn from_input(input: &str, reader: &dyn TallyReader) -> TallyResult<Poll> {
        let parsed = reader.read(input)?;
        let scaled = scale_tallies(&parsed.tallies)?;
        info!(
            "Read {} proposals and {} grades (scale: {})",
            parsed.proposals.len(),
            parsed.grades.len(),
            scaled.scale
        );
        Ok(Poll {
            proposals: parsed.proposals,
            grades: parsed.grades,
            tally: PollTally::new(scaled.tallies),
            scale: scaled.scale,
        })
    }

    /// Reads a file, or the standard input when the path is `-`.
    pub fn from_source(path: &str, reader: &dyn TallyReader) -> TallyResult<Poll> {
        let input = read_source(path)?;
        Poll::from_input(&input, reader)
    }

    /// Balances a copy of the tally, then ranks the proposals.
    pub fn deliberate(
        &self,
        engine: &dyn Deliberator,
        settings: &DeliberationSettings,
    ) -> TallyResult<(PollTally, PollResult)> {
        let mut tally = self.tally.clone();
        if let Some(judges) = settings.amount_of_judges {
            // Declared judges are counted at the scale of the tallies.
            tally.amount_of_judges = judges
                .checked_mul(self.scale as u64)
                .context(JudgesOverflowSnafu {
                    judges,
                    scale: self.scale,
                })?;
        }
        let balancing = settings.default_grade.resolve(&self.grades)?;
        debug!(
            "deliberate: {} judges, balancing: {:?}",
            tally.amount_of_judges, balancing
        );
        engine
            .balance(&mut tally, balancing)
            .context(BalancingSnafu)?;
        let result = engine.deliberate(&tally).context(DeliberatingSnafu)?;
        Ok((tally, result))
    }

    /// Deliberates and formats the outcome.
    ///
    /// The scale of the options is replaced by the scale of the poll.
    pub fn render<E>(
        &self,
        engine: &E,
        settings: &DeliberationSettings,
        format: OutputFormat,
        options: &Options,
    ) -> TallyResult<String>
    where
        E: Deliberator + PaletteGenerator,
    {
        let (tally, result) = self.deliberate(engine, settings)?;
        let options = Options {
            scale: self.scale,
            ..options.clone()
        };
        let deliberation = Deliberation {
            proposals: &self.proposals,
            grades: &self.grades,
            tally: &tally,
            result: &result,
            palette: engine,
        };
        debug!("render: {:?}", format);
        formatter_for(format).format(&deliberation, &options)
    }
}
