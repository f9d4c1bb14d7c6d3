// Offset-based text editing
//
// Every edit is expressed against the frozen original text and the whole set
// is applied in one pass, so no edit ever sees offsets shifted by another.

use crate::error::{ExtractError, Result};

#[derive(Debug, Clone)]
struct Edit {
    start: usize,
    end: usize,
    replacement: String,
}

/// Batch of non-overlapping replacements over an immutable source
#[derive(Debug, Clone)]
pub struct SourceEdits<'a> {
    source: &'a str,
    edits: Vec<Edit>,
}

impl<'a> SourceEdits<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    pub fn replace(&mut self, start: usize, end: usize, text: impl Into<String>) -> &mut Self {
        self.edits.push(Edit {
            start,
            end,
            replacement: text.into(),
        });
        self
    }

    pub fn remove(&mut self, start: usize, end: usize) -> &mut Self {
        self.replace(start, end, String::new())
    }

    pub fn insert(&mut self, at: usize, text: impl Into<String>) -> &mut Self {
        self.replace(at, at, text)
    }

    pub fn prepend(&mut self, text: impl Into<String>) -> &mut Self {
        self.insert(0, text)
    }

    pub fn append(&mut self, text: impl Into<String>) -> &mut Self {
        let len = self.source.len();
        self.insert(len, text)
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply all edits in offset order.
    ///
    /// Insertions at the same offset keep their registration order and land
    /// before a removal starting there.
    pub fn apply(&self) -> Result<String> {
        let mut edits: Vec<&Edit> = self.edits.iter().collect();
        // stable: equal (start, end) keep registration order
        edits.sort_by_key(|e| (e.start, e.end));

        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;

        for edit in edits {
            if edit.start > edit.end || edit.end > self.source.len() {
                return Err(invalid(edit, "out of bounds"));
            }
            if !self.source.is_char_boundary(edit.start) || !self.source.is_char_boundary(edit.end)
            {
                return Err(invalid(edit, "not on a character boundary"));
            }
            if edit.start < cursor {
                return Err(invalid(edit, "overlaps a previous edit"));
            }
            out.push_str(&self.source[cursor..edit.start]);
            out.push_str(&edit.replacement);
            cursor = edit.end;
        }

        out.push_str(&self.source[cursor..]);
        Ok(out)
    }
}

fn invalid(edit: &Edit, reason: &str) -> ExtractError {
    ExtractError::Edit {
        start: edit.start,
        end: edit.end,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_span_with_prefix() {
        let source = "before(ARG)after";
        let mut edits = SourceEdits::new(source);
        // registration order mirrors extraction: tail, head, prefix
        edits
            .remove(10, source.len())
            .remove(0, 7)
            .prepend("export default ");
        assert_eq!(edits.apply().unwrap(), "export default ARG");
    }

    #[test]
    fn test_no_edits_is_identity() {
        let edits = SourceEdits::new("unchanged\r\n text");
        assert!(edits.is_empty());
        assert_eq!(edits.apply().unwrap(), "unchanged\r\n text");
    }

    #[test]
    fn test_insert_and_append() {
        let mut edits = SourceEdits::new("abc");
        edits.insert(1, "X").append("!").insert(1, "Y");
        assert_eq!(edits.apply().unwrap(), "aXYbc!");
    }

    #[test]
    fn test_overlap_rejected() {
        let mut edits = SourceEdits::new("0123456789");
        edits.remove(2, 6).remove(4, 8);
        let err = edits.apply().unwrap_err();
        assert!(matches!(err, ExtractError::Edit { start: 4, end: 8, .. }));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut edits = SourceEdits::new("abc");
        edits.remove(1, 10);
        assert!(edits.apply().is_err());
    }

    #[test]
    fn test_char_boundary_rejected() {
        let mut edits = SourceEdits::new("é");
        edits.remove(0, 1);
        assert!(edits.apply().is_err());
    }
}
