//! Counting identifiers in plain-text output.

use super::section::{COUNTRY_LABEL, DETAILS_UNAVAILABLE, IDENTIFIER_LABEL, WARNING_MARKER};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Layout {
    List,
    Details,
    Summary,
}

/// Counts identifiers in plain-text output, one per identifier in every layout.
///
/// Plain lists count each line under a `[label]:` heading. Detail exports
/// count `IP Address:` lines and `[details unavailable]` rows. Summary exports
/// count the rows under the `IP Address | Country/Region` header. Titles,
/// rules, blank lines and warning lines are never counted. An identifier that
/// itself ends with `:` (such as `2001:db8::`) is still counted.
pub fn count_text(text: &str) -> usize {
    let summary_header = format!("{} | {}", IDENTIFIER_LABEL, COUNTRY_LABEL);
    let detail_prefix = format!("{}: ", IDENTIFIER_LABEL);
    let failure_suffix = format!(" {}", DETAILS_UNAVAILABLE);

    let mut layout = Layout::List;
    let mut count = 0;
    let mut lines = text.lines().map(str::trim).peekable();

    while let Some(line) = lines.next() {
        if line.is_empty() || line.starts_with(WARNING_MARKER) || is_rule(line) {
            continue;
        }
        if is_heading(line) {
            layout = Layout::List;
            continue;
        }
        if lines.peek().is_some_and(|next| is_title_rule(next)) {
            layout = Layout::Details;
            continue;
        }
        if line == summary_header {
            layout = Layout::Summary;
            continue;
        }

        let counted = match layout {
            Layout::List => true,
            Layout::Details => line.starts_with(&detail_prefix) || line.ends_with(&failure_suffix),
            Layout::Summary => line.contains(" | "),
        };
        if counted {
            count += 1;
        }
    }
    count
}

fn is_heading(line: &str) -> bool {
    (line.starts_with('[') && line.ends_with("]:")) || line.starts_with('【')
}

fn is_rule(line: &str) -> bool {
    line.chars().all(|c| c == '=') || line.chars().all(|c| c == '-')
}

/// Table titles are underlined with `=`.
fn is_title_rule(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == '=')
}
