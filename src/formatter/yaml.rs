use snafu::prelude::*;

use crate::formatter::json::Report;
use crate::formatter::*;

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn format(&self, d: &Deliberation, _options: &Options) -> TallyResult<String> {
        serde_yaml::to_string(&Report::new(d)).context(SerializingYamlSnafu)
    }
}
