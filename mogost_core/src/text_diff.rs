use crate::line_diff::{diff_lines, split_lines, DiffRecord, DiffStats};
use mogost_common::FileCompareResult;
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const DELETE_STYLE: &str = "background:#ffe6e6;";
const INSERT_STYLE: &str = "background:#e6ffe6;";

/// Configuration for text comparison
#[derive(Debug, Clone)]
pub struct TextDiffConfig {
    /// Time budget for the character-level diff behind the HTML rendering.
    /// Past the deadline the diff degrades to coarser changes instead of failing.
    pub html_timeout: Option<Duration>,
}

impl Default for TextDiffConfig {
    fn default() -> Self {
        Self {
            html_timeout: Some(Duration::from_secs(1)),
        }
    }
}

/// Result of comparing two texts
#[derive(Debug, Clone)]
pub struct TextComparison {
    pub left: String,
    pub right: String,
    pub lines1: Vec<String>,
    pub lines2: Vec<String>,
    pub diff_lines: Vec<DiffRecord>,
    pub diff_html: String,
}

impl TextComparison {
    pub fn stats(&self) -> DiffStats {
        DiffStats::from_records(&self.diff_lines)
    }

    /// Package the comparison for the browser front end
    pub fn into_report(self, file1_name: &str, file2_name: &str) -> FileCompareResult {
        FileCompareResult {
            file1_name: file1_name.to_string(),
            file2_name: file2_name.to_string(),
            diff_lines: self.diff_lines.iter().map(DiffRecord::to_wire).collect(),
            file1_content: self.left,
            file2_content: self.right,
            diff_html: self.diff_html,
            lines1: self.lines1,
            lines2: self.lines2,
        }
    }
}

/// Text comparison: line alignment plus a character-level HTML rendering
#[derive(Debug, Clone, Default)]
pub struct TextDiffEngine {
    config: TextDiffConfig,
}

impl TextDiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TextDiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TextDiffConfig {
        &self.config
    }

    /// Compare two files on disk. Invalid UTF-8 is replaced, not rejected.
    pub fn compare_files(
        &self,
        left_path: &Path,
        right_path: &Path,
    ) -> mogost_common::Result<TextComparison> {
        let left = decode_text(&fs::read(left_path)?);
        let right = decode_text(&fs::read(right_path)?);

        Ok(self.compare_text(&left, &right))
    }

    pub fn compare_text(&self, left: &str, right: &str) -> TextComparison {
        let lines1 = split_lines(left);
        let lines2 = split_lines(right);
        let diff_lines = diff_lines(&lines1, &lines2);
        let diff_html = self.render_html(left, right);

        debug!(
            "Compared {} and {} lines into {} records",
            lines1.len(),
            lines2.len(),
            diff_lines.len()
        );

        TextComparison {
            left: left.to_string(),
            right: right.to_string(),
            lines1: lines1.into_iter().map(str::to_string).collect(),
            lines2: lines2.into_iter().map(str::to_string).collect(),
            diff_lines,
            diff_html,
        }
    }

    /// Render a character-level diff of the two full texts as HTML.
    ///
    /// Runs of equal text become `<span>`, removed text `<del>` and added
    /// text `<ins>`. Content is escaped and newlines are shown as `&para;<br>`.
    pub fn render_html(&self, left: &str, right: &str) -> String {
        let mut configure = TextDiff::configure();
        if let Some(timeout) = self.config.html_timeout {
            configure.timeout(timeout);
        }
        let diff = configure.diff_chars(left, right);

        let mut html = String::with_capacity(left.len().max(right.len()) * 2);
        let mut run: Option<(ChangeTag, String)> = None;

        for change in diff.iter_all_changes() {
            let tag = change.tag();
            if let Some((run_tag, text)) = run.as_mut() {
                if *run_tag == tag {
                    text.push_str(change.value());
                    continue;
                }
            }
            if let Some((run_tag, text)) = run.take() {
                push_html_run(&mut html, run_tag, &text);
            }
            run = Some((tag, change.value().to_string()));
        }

        if let Some((run_tag, text)) = run {
            push_html_run(&mut html, run_tag, &text);
        }

        html
    }
}

/// Decode uploaded or loaded bytes as text, replacing invalid UTF-8
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn push_html_run(html: &mut String, tag: ChangeTag, text: &str) {
    let body = escape_html(text).replace('\n', "&para;<br>");
    match tag {
        ChangeTag::Equal => {
            html.push_str("<span>");
            html.push_str(&body);
            html.push_str("</span>");
        }
        ChangeTag::Delete => {
            html.push_str("<del style=\"");
            html.push_str(DELETE_STYLE);
            html.push_str("\">");
            html.push_str(&body);
            html.push_str("</del>");
        }
        ChangeTag::Insert => {
            html.push_str("<ins style=\"");
            html.push_str(INSERT_STYLE);
            html.push_str("\">");
            html.push_str(&body);
            html.push_str("</ins>");
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
