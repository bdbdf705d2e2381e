use crate::dbc::core::strings::{has_open_quoted_segment, is_terminated};

/// One logical DBC record: a keyword line plus any continuation lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Record {
    /// 1-based line number of the first line.
    pub(crate) line: usize,
    /// Leading keyword (`BO_`, `SG_`, `CM_`, ...), `:` stripped.
    pub(crate) keyword: String,
    /// Record text, continuation lines joined with `\n`.
    pub(crate) text: String,
}

fn keyword_of(line: &str) -> &str {
    let end: usize = line
        .find(|c: char| c.is_whitespace() || c == ':')
        .unwrap_or(line.len());
    &line[..end]
}

fn is_skippable(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.starts_with("//")
}

// A VAL_/VAL_TABLE_ entry wrapped on the next line starts with a raw value or a description.
fn is_value_continuation(trimmed: &str) -> bool {
    trimmed.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '"' || c == ';')
}

/// Splits DBC text into logical records.
///
/// - Blank lines and `//` lines are skipped.
/// - A record continues while it has an unterminated quoted string.
/// - `VAL_` and `VAL_TABLE_` records continue until their `;` when the following
///   lines carry more value/description pairs.
/// - The indented symbol list after `NS_ :` is folded into the `NS_` record.
pub(crate) fn split(text: &str) -> Vec<Record> {
    let lines: Vec<&str> = text.lines().collect();
    let mut records: Vec<Record> = Vec::new();
    let mut i: usize = 0;

    while i < lines.len() {
        let trimmed: &str = lines[i].trim();
        if is_skippable(trimmed) {
            i += 1;
            continue;
        }

        let line_no: usize = i + 1;
        let keyword: String = keyword_of(trimmed).to_string();
        let mut full: String = trimmed.to_string();
        i += 1;

        if keyword == "NS_" {
            // indented single-symbol lines
            while i < lines.len() {
                let raw: &str = lines[i];
                let t: &str = raw.trim();
                let indented: bool = raw.starts_with([' ', '\t']);
                if t.is_empty() || !indented || t.split_ascii_whitespace().count() != 1 {
                    break;
                }
                full.push('\n');
                full.push_str(t);
                i += 1;
            }
        } else {
            loop {
                while has_open_quoted_segment(&full) && i < lines.len() {
                    full.push('\n');
                    full.push_str(lines[i].trim_end_matches(['\r', '\n']));
                    i += 1;
                }
                let wants_more: bool = (keyword == "VAL_" || keyword == "VAL_TABLE_")
                    && !is_terminated(&full)
                    && i < lines.len()
                    && is_value_continuation(lines[i].trim());
                if !wants_more {
                    break;
                }
                full.push('\n');
                full.push_str(lines[i].trim());
                i += 1;
            }
        }

        records.push(Record {
            line: line_no,
            keyword,
            text: full,
        });
    }

    records
}
