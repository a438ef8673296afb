use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

/// Lines with fewer readable characters than this share are treated as
/// binary residue.
const MIN_PRINTABLE_RATIO: f32 = 0.6;

/// Normalizes text recovered from a document before it is sent for
/// translation. Unreadable lines act as paragraph breaks.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect();
    let joined = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in joined.lines().map(str::trim) {
        if line.is_empty() || !is_readable(line) {
            close_paragraph(&mut current, &mut paragraphs);
            continue;
        }
        current.push(line.split_whitespace().collect::<Vec<_>>().join(" "));
    }
    close_paragraph(&mut current, &mut paragraphs);

    paragraphs.join("\n\n")
}

fn close_paragraph(lines: &mut Vec<String>, paragraphs: &mut Vec<String>) {
    if !lines.is_empty() {
        paragraphs.push(lines.join("\n"));
        lines.clear();
    }
}

fn is_readable(line: &str) -> bool {
    let total = line.chars().count();
    let readable = line
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || c.is_ascii_punctuation())
        .count();
    readable as f32 / total as f32 >= MIN_PRINTABLE_RATIO
}
