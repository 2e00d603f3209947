use std::sync::OnceLock;

use regex::Regex;

use crate::formatter::measure_string_length;

/// Legend definitions are never truncated below this length.
pub const MINIMUM_DEFINITION_LENGTH: usize = 7;

/// Removes the ANSI escape sequences, so that colored text can be measured.
pub fn strip_ansi(s: &str) -> String {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    let ansi = ANSI.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("valid regex"));
    ansi.replace_all(s, "").into_owned()
}

/// Lays out `glyph=label` definitions under a chart, wrapping them to `max_width`.
///
/// The title is right-aligned in the first `indentation - 1` columns of the first line,
/// and the following lines are indented just as much. The first definition of a line
/// is always placed, even when it does not fit.
pub fn make_text_legend(
    title: &str,
    definitions: &[String],
    indentation: usize,
    max_width: usize,
) -> String {
    let margin = indentation.saturating_sub(1);
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_length = 0;
    for (i, def) in definitions.iter().enumerate() {
        if i == 0 {
            line = format!("{:>width$}", title, width = margin);
            line_length = measure_string_length(&line);
        }
        let needed = measure_string_length(&strip_ansi(def)) + 1;
        if i > 0 && line_length + needed > max_width {
            lines.push(std::mem::take(&mut line));
            line = " ".repeat(margin);
            line_length = margin;
        }
        line.push(' ');
        line.push_str(def);
        line_length += needed;
    }
    if !line.trim().is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}
