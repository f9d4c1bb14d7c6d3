//! Locale-independent segment collation
//!
//! Reproduces a "numeric, lowercase-first" collation without depending on a
//! host collator:
//! - primary: punctuation < numbers < letters, letters case-folded, numeric
//!   runs compared by value
//! - secondary: fewer leading zeros first (`1` before `01`)
//! - tertiary: lowercase before uppercase
//!
//! Callers add the raw text as a final tie-break to get a strict order.

/// Significant digits of a numeric run: longer means larger, then lexical
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Digits {
    len: usize,
    digits: String,
}

/// Variant order is the primary class order
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Token {
    Other(char),
    Number(Digits),
    Letter(char),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<Token>,
    leading_zeros: Vec<usize>,
    uppercase: Vec<bool>,
}

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let mut primary = Vec::new();
        let mut leading_zeros = Vec::new();
        let mut uppercase = Vec::new();

        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                let mut run = String::from(c);
                while let Some(&next) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    run.push(next);
                    chars.next();
                }
                let significant = run.trim_start_matches('0');
                // "000" is the number zero, keep one digit
                let significant = if significant.is_empty() { "0" } else { significant };
                leading_zeros.push(run.len() - significant.len());
                primary.push(Token::Number(Digits {
                    len: significant.len(),
                    digits: significant.to_string(),
                }));
            } else if c.is_alphanumeric() {
                uppercase.push(c.is_uppercase());
                primary.extend(c.to_lowercase().map(Token::Letter));
            } else {
                primary.push(Token::Other(c));
            }
        }

        Self {
            primary,
            leading_zeros,
            uppercase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    fn cmp(a: &str, b: &str) -> Ordering {
        CollationKey::new(a).cmp(&CollationKey::new(b))
    }

    #[test]
    fn test_numeric_runs_compare_by_value() {
        assert_eq!(cmp("file2", "file10"), Ordering::Less);
        assert_eq!(cmp("file10", "file9"), Ordering::Greater);
        assert_eq!(cmp("v1.2", "v1.10"), Ordering::Less);
        // far beyond u64
        assert_eq!(
            cmp("n99999999999999999999999", "n100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_leading_zeros_are_secondary() {
        assert_eq!(cmp("file1", "file01"), Ordering::Less);
        assert_eq!(cmp("file01", "file2"), Ordering::Less);
        assert_eq!(cmp("0", "000"), Ordering::Less);
    }

    #[test]
    fn test_case_insensitive_with_lowercase_first() {
        assert_eq!(cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(cmp("Apple", "banana"), Ordering::Less);
        assert_eq!(cmp("about", "About"), Ordering::Less);
        assert_eq!(cmp("aBc", "abC"), Ordering::Greater);
        assert_eq!(cmp("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn test_class_order() {
        // punctuation < digits < letters
        assert_eq!(cmp("[id]", "1"), Ordering::Less);
        assert_eq!(cmp("1", "a"), Ordering::Less);
        assert_eq!(cmp("-", "_"), Ordering::Less);
        assert_eq!(cmp("", "a"), Ordering::Less);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(cmp("user", "users"), Ordering::Less);
        assert_eq!(cmp("parent", "parent.vue"), Ordering::Less);
    }
}
