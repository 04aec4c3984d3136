//! Line-oriented diff used for side-by-side rendering.
//!
//! The aligner is a single forward scan with one line of lookahead. It never
//! backtracks, so its output is not a minimal edit script: repeated lines can
//! produce more deletes and inserts than a full LCS would. Callers depend on
//! the exact alignment, so the precedence of the lookahead rules is fixed.

use mogost_common::{DiffKind, DiffLine};

/// One classified alignment step between file A and file B.
///
/// Line numbers are 1-based positions in their own source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiffRecord {
    Equal {
        text: String,
        line_a: usize,
        line_b: usize,
    },
    Delete {
        text: String,
        line_a: usize,
    },
    Insert {
        text: String,
        line_b: usize,
    },
}

impl DiffRecord {
    pub fn kind(&self) -> DiffKind {
        match self {
            DiffRecord::Equal { .. } => DiffKind::Equal,
            DiffRecord::Delete { .. } => DiffKind::Delete,
            DiffRecord::Insert { .. } => DiffKind::Insert,
        }
    }

    pub fn text_a(&self) -> Option<&str> {
        match self {
            DiffRecord::Equal { text, .. } | DiffRecord::Delete { text, .. } => Some(text),
            DiffRecord::Insert { .. } => None,
        }
    }

    pub fn text_b(&self) -> Option<&str> {
        match self {
            DiffRecord::Equal { text, .. } | DiffRecord::Insert { text, .. } => Some(text),
            DiffRecord::Delete { .. } => None,
        }
    }

    pub fn line_num_a(&self) -> Option<usize> {
        match self {
            DiffRecord::Equal { line_a, .. } | DiffRecord::Delete { line_a, .. } => Some(*line_a),
            DiffRecord::Insert { .. } => None,
        }
    }

    pub fn line_num_b(&self) -> Option<usize> {
        match self {
            DiffRecord::Equal { line_b, .. } | DiffRecord::Insert { line_b, .. } => Some(*line_b),
            DiffRecord::Delete { .. } => None,
        }
    }

    /// Flatten into the wire shape, using `""` and `0` for the missing side.
    pub fn to_wire(&self) -> DiffLine {
        DiffLine {
            kind: self.kind(),
            line1: self.text_a().unwrap_or_default().to_string(),
            line2: self.text_b().unwrap_or_default().to_string(),
            line_num1: self.line_num_a().unwrap_or(0),
            line_num2: self.line_num_b().unwrap_or(0),
        }
    }
}

/// Split a text blob into lines on `'\n'`.
///
/// This is plain split semantics: an empty text gives one empty line and a
/// trailing newline gives a trailing empty line. `'\r'` is kept.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Align two line sequences.
///
/// Total and deterministic: any two sequences, empty ones included, produce a
/// result, and the same inputs always produce the same records.
pub fn diff_lines<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<DiffRecord> {
    Aligner::new(a, b).run()
}

/// Record counts per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub equal: usize,
    pub delete: usize,
    pub insert: usize,
}

impl DiffStats {
    pub fn from_records(records: &[DiffRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            match record.kind() {
                DiffKind::Equal => stats.equal += 1,
                DiffKind::Delete => stats.delete += 1,
                DiffKind::Insert => stats.insert += 1,
            }
            stats
        })
    }

    pub fn is_identical(&self) -> bool {
        self.delete == 0 && self.insert == 0
    }
}

struct Aligner<'a, S> {
    a: &'a [S],
    b: &'a [S],
    i: usize,
    j: usize,
    out: Vec<DiffRecord>,
}

impl<'a, S: AsRef<str>> Aligner<'a, S> {
    fn new(a: &'a [S], b: &'a [S]) -> Self {
        Self {
            a,
            b,
            i: 0,
            j: 0,
            out: Vec::with_capacity(a.len().max(b.len())),
        }
    }

    fn run(mut self) -> Vec<DiffRecord> {
        while self.i < self.a.len() || self.j < self.b.len() {
            self.step();
        }
        self.out
    }

    fn step(&mut self) {
        let (left, right) = match (self.left(0), self.right(0)) {
            (None, _) => return self.insert(),
            (_, None) => return self.delete(),
            (Some(left), Some(right)) => (left, right),
        };

        if left == right {
            return self.equal();
        }

        let next_left = self.left(1);
        let next_right = self.right(1);

        if next_left.is_some() && next_left == next_right {
            // Both sides realign on the next line: substitution.
            self.delete();
            self.insert();
        } else if next_left == Some(right) {
            // Extra line in A.
            self.delete();
        } else if next_right == Some(left) {
            // Extra line in B.
            self.insert();
        } else {
            self.delete();
            self.insert();
        }
    }

    fn left(&self, ahead: usize) -> Option<&'a str> {
        self.a.get(self.i + ahead).map(AsRef::as_ref)
    }

    fn right(&self, ahead: usize) -> Option<&'a str> {
        self.b.get(self.j + ahead).map(AsRef::as_ref)
    }

    fn equal(&mut self) {
        self.out.push(DiffRecord::Equal {
            text: self.a[self.i].as_ref().to_string(),
            line_a: self.i + 1,
            line_b: self.j + 1,
        });
        self.i += 1;
        self.j += 1;
    }

    fn delete(&mut self) {
        self.out.push(DiffRecord::Delete {
            text: self.a[self.i].as_ref().to_string(),
            line_a: self.i + 1,
        });
        self.i += 1;
    }

    fn insert(&mut self) {
        self.out.push(DiffRecord::Insert {
            text: self.b[self.j].as_ref().to_string(),
            line_b: self.j + 1,
        });
        self.j += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn equal(text: &str, line_a: usize, line_b: usize) -> DiffRecord {
        DiffRecord::Equal { text: text.to_string(), line_a, line_b }
    }

    fn delete(text: &str, line_a: usize) -> DiffRecord {
        DiffRecord::Delete { text: text.to_string(), line_a }
    }

    fn insert(text: &str, line_b: usize) -> DiffRecord {
        DiffRecord::Insert { text: text.to_string(), line_b }
    }

    #[test]
    fn test_substitution_when_next_lines_realign() {
        let diff = diff_lines(&["x", "y", "z"], &["x", "w", "z"]);
        assert_eq!(
            diff,
            vec![equal("x", 1, 1), delete("y", 2), insert("w", 2), equal("z", 3, 3)]
        );
    }

    #[test]
    fn test_extra_line_in_a() {
        let diff = diff_lines(&["x", "y", "z"], &["x", "z"]);
        assert_eq!(diff, vec![equal("x", 1, 1), delete("y", 2), equal("z", 3, 2)]);
    }

    #[test]
    fn test_extra_line_in_b() {
        let diff = diff_lines(&["x", "z"], &["x", "y", "z"]);
        assert_eq!(diff, vec![equal("x", 1, 1), insert("y", 2), equal("z", 2, 3)]);
    }

    #[test]
    fn test_empty_a() {
        let a: [&str; 0] = [];
        let diff = diff_lines(&a, &["p", "q"]);
        assert_eq!(diff, vec![insert("p", 1), insert("q", 2)]);
        assert!(diff.iter().all(|r| r.line_num_a().is_none()));
        assert_eq!(diff[0].to_wire().line_num1, 0);
    }

    #[test]
    fn test_empty_b() {
        let b: [&str; 0] = [];
        let diff = diff_lines(&["p", "q"], &b);
        assert_eq!(diff, vec![delete("p", 1), delete("q", 2)]);
    }

    #[test]
    fn test_both_empty_sequences() {
        let empty: [&str; 0] = [];
        assert!(diff_lines(&empty, &empty).is_empty());
    }

    #[test]
    fn test_two_empty_texts() {
        let a = split_lines("");
        let b = split_lines("");
        assert_eq!(a, vec![""]);
        assert_eq!(diff_lines(&a, &b), vec![equal("", 1, 1)]);
    }

    #[test]
    fn test_split_keeps_trailing_segment() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
        assert_eq!(split_lines("a\r\nb"), vec!["a\r", "b"]);
        assert_eq!(split_lines("\n"), vec!["", ""]);
    }

    #[test]
    fn test_substitution_takes_precedence_over_extra_line() {
        // a[1] == b[0] would allow rule (b), but a[1] == b[1] wins.
        let diff = diff_lines(&["p", "q"], &["q", "q"]);
        assert_eq!(diff, vec![delete("p", 1), insert("q", 1), equal("q", 2, 2)]);
    }

    #[test]
    fn test_extra_line_in_a_takes_precedence_over_extra_line_in_b() {
        let diff = diff_lines(&["a", "b"], &["b", "a"]);
        assert_eq!(diff, vec![delete("a", 1), equal("b", 2, 1), insert("a", 2)]);
    }

    #[test]
    fn test_repeated_lines_are_not_minimal() {
        let diff = diff_lines(&["x", "x"], &["x"]);
        assert_eq!(diff, vec![equal("x", 1, 1), delete("x", 2)]);

        // An LCS diff would keep "x" and "y"; two inserted lines defeat the lookahead.
        let diff = diff_lines(&["x", "y"], &["p", "q", "x", "y"]);
        assert_eq!(
            diff,
            vec![
                delete("x", 1),
                insert("p", 1),
                delete("y", 2),
                insert("q", 2),
                insert("x", 3),
                insert("y", 4),
            ]
        );
    }

    #[test]
    fn test_no_resync_falls_back_to_substitution() {
        let diff = diff_lines(&["a", "b", "c"], &["x", "y"]);
        assert_eq!(
            diff,
            vec![
                delete("a", 1),
                insert("x", 1),
                delete("b", 2),
                insert("y", 2),
                delete("c", 3),
            ]
        );
    }

    #[test]
    fn test_record_accessors() {
        let record = delete("gone", 7);
        assert_eq!(record.kind(), DiffKind::Delete);
        assert_eq!(record.text_a(), Some("gone"));
        assert_eq!(record.text_b(), None);
        assert_eq!(record.line_num_a(), Some(7));
        assert_eq!(record.line_num_b(), None);

        let wire = record.to_wire();
        assert_eq!(wire.line1, "gone");
        assert_eq!(wire.line2, "");
        assert_eq!(wire.line_num1, 7);
        assert_eq!(wire.line_num2, 0);
    }

    #[test]
    fn test_equal_empty_line_is_not_absent() {
        let record = equal("", 3, 4);
        assert_eq!(record.text_a(), Some(""));
        assert_eq!(record.text_b(), Some(""));
    }

    #[test]
    fn test_accepts_owned_lines() {
        let a: Vec<String> = vec!["one".into(), "two".into()];
        let b: Vec<String> = vec!["one".into(), "three".into()];
        let diff = diff_lines(&a, &b);
        assert_eq!(DiffStats::from_records(&diff), DiffStats { equal: 1, delete: 1, insert: 1 });
    }

    fn lines(alphabet: &'static str) -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(alphabet, 0..24)
    }

    proptest! {
        #[test]
        fn prop_counts_cover_both_inputs(a in lines("[abc]"), b in lines("[abc]")) {
            let diff = diff_lines(&a, &b);
            let stats = DiffStats::from_records(&diff);
            prop_assert_eq!(stats.delete + stats.equal, a.len());
            prop_assert_eq!(stats.insert + stats.equal, b.len());
        }

        #[test]
        fn prop_records_replay_both_inputs(a in lines("[abc]"), b in lines("[abc]")) {
            let diff = diff_lines(&a, &b);
            let replay_a: Vec<&str> = diff.iter().filter_map(DiffRecord::text_a).collect();
            let replay_b: Vec<&str> = diff.iter().filter_map(DiffRecord::text_b).collect();
            prop_assert_eq!(replay_a, a.iter().map(String::as_str).collect::<Vec<_>>());
            prop_assert_eq!(replay_b, b.iter().map(String::as_str).collect::<Vec<_>>());

            let nums_a: Vec<usize> = diff.iter().filter_map(DiffRecord::line_num_a).collect();
            prop_assert_eq!(nums_a, (1..=a.len()).collect::<Vec<_>>());
        }

        #[test]
        fn prop_identical_inputs_are_all_equal(a in lines("[a-z]{0,3}")) {
            let diff = diff_lines(&a, &a);
            prop_assert_eq!(diff.len(), a.len());
            for (idx, record) in diff.iter().enumerate() {
                prop_assert_eq!(record, &equal(&a[idx], idx + 1, idx + 1));
            }
        }

        #[test]
        fn prop_disjoint_inputs_pair_up(a in lines("a[0-9]"), b in lines("b[0-9]")) {
            let diff = diff_lines(&a, &b);
            let paired = a.len().min(b.len());
            for pair in 0..paired {
                prop_assert_eq!(diff[2 * pair].kind(), DiffKind::Delete);
                prop_assert_eq!(diff[2 * pair + 1].kind(), DiffKind::Insert);
            }
            let tail_kind = if a.len() > b.len() { DiffKind::Delete } else { DiffKind::Insert };
            prop_assert!(diff[2 * paired..].iter().all(|r| r.kind() == tail_kind));
        }

        #[test]
        fn prop_deterministic(a in lines("[ab]"), b in lines("[ab]")) {
            prop_assert_eq!(diff_lines(&a, &b), diff_lines(&a, &b));
        }
    }
}
