use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::TallyError;

/// One parsed `<name> <count>` line from a persisted tally file.
#[derive(Debug, PartialEq, Eq)]
struct Entry {
    name: String,
    count: u64,
}

fn parse_line(line: &str) -> Option<Entry> {
    let (name, count) = line.split_once(' ')?;
    let count = count.trim().parse().ok()?;
    Some(Entry {
        name: name.to_string(),
        count,
    })
}

/// Draws an asterisk bar chart from a persisted tally file.
///
/// Names are right-justified to the longest name, bars are one `*` per unit
/// left-justified to the largest count, and the border width follows the
/// data. Lines that do not parse as `<name> <count>` are skipped.
pub fn render_histogram<P: AsRef<Path>>(data_file: P) -> Result<String, TallyError> {
    let label = data_file.as_ref().display().to_string();
    let file = File::open(&data_file).map_err(|err| TallyError::SourceUnavailable {
        label: label.clone(),
        source: err,
    })?;

    let mut entries = Vec::new();
    let mut longest_name = 0;
    let mut largest_count = 0;
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|err| TallyError::SourceUnavailable {
            label: label.clone(),
            source: err,
        })?;
        if let Some(entry) = parse_line(&line) {
            longest_name = longest_name.max(entry.name.len());
            largest_count = largest_count.max(entry.count as usize);
            entries.push(entry);
        }
    }

    let border = "=".repeat(longest_name + largest_count + 5);
    let mut out = String::new();
    out.push_str(&format!(" {} \n", border));
    for entry in &entries {
        let bar = "*".repeat(entry.count as usize);
        out.push_str(&format!(
            "| {:>name_width$} | {:<bar_width$} |\n",
            entry.name,
            bar,
            name_width = longest_name,
            bar_width = largest_count,
        ));
    }
    out.push_str(&format!(" {} \n", border));
    Ok(out)
}
