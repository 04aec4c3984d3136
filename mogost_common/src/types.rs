use serde::{Deserialize, Serialize};

/// Classification of one aligned line pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Line present and identical on both sides
    Equal,
    /// Line present only on the left (file A)
    Delete,
    /// Line present only on the right (file B)
    Insert,
}

impl DiffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffKind::Equal => "equal",
            DiffKind::Delete => "delete",
            DiffKind::Insert => "insert",
        }
    }
}

impl std::fmt::Display for DiffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form of a diff record.
///
/// Absent text is sent as an empty string and an absent line number as `0`,
/// which is what the browser front end expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    #[serde(rename = "type")]
    pub kind: DiffKind,
    pub line1: String,
    pub line2: String,
    pub line_num1: usize,
    pub line_num2: usize,
}

/// Response body of a two-file comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCompareResult {
    pub file1_name: String,
    pub file2_name: String,
    pub file1_content: String,
    pub file2_content: String,
    pub diff_html: String,
    pub lines1: Vec<String>,
    pub lines2: Vec<String>,
    pub diff_lines: Vec<DiffLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_line_wire_names() {
        let line = DiffLine {
            kind: DiffKind::Delete,
            line1: "old".to_string(),
            line2: String::new(),
            line_num1: 4,
            line_num2: 0,
        };

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["type"], "delete");
        assert_eq!(value["line1"], "old");
        assert_eq!(value["line2"], "");
        assert_eq!(value["line_num1"], 4);
        assert_eq!(value["line_num2"], 0);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DiffKind::Equal.to_string(), "equal");
        assert_eq!(DiffKind::Insert.as_str(), "insert");
    }
}
