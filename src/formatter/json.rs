use mj_judgment::{PollResult, PollTally};
use serde::Serialize;
use snafu::prelude::*;

use crate::formatter::*;

/// Everything there is to know about a deliberation, for the machine-readable outputs.
/// The ordering option is ignored: both orders are in the result.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub proposals: &'a [String],
    pub grades: &'a [String],
    pub tally: &'a PollTally,
    pub result: &'a PollResult,
}

impl<'a> Report<'a> {
    pub fn new(d: &Deliberation<'a>) -> Report<'a> {
        Report {
            proposals: d.proposals,
            grades: d.grades,
            tally: d.tally,
            result: d.result,
        }
    }
}

/// All on one line.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, d: &Deliberation, _options: &Options) -> TallyResult<String> {
        serde_json::to_string(&Report::new(d)).context(SerializingJsonSnafu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::tests::Fixture;
    use serde_json::json;

    #[test]
    fn bundles_the_whole_poll() {
        let f = Fixture::new(&["Pizza", "Chips"], &["bad", "good"], vec![vec![1, 2], vec![3, 0]]);
        let out = JsonFormatter
            .format(&f.deliberation(), &Options::default())
            .unwrap();
        assert!(!out.contains('\n'));
        let js: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(js["proposals"], json!(["Pizza", "Chips"]));
        assert_eq!(js["grades"], json!(["bad", "good"]));
        assert_eq!(js["tally"]["amountOfJudges"], json!(3));
        assert_eq!(js["tally"]["proposals"][1]["tally"], json!([3, 0]));
        assert_eq!(js["result"]["proposals"][0]["rank"], json!(1));
        assert_eq!(js["result"]["proposalsSorted"][1]["index"], json!(1));
        assert_eq!(
            js["result"]["proposals"][0]["analysis"]["medianGrade"],
            json!(1)
        );
    }
}
