//! # Compiled wildcard filters over the identifier space.
//!
//! [`compile_pattern`] turns a filter pattern into a [`Matcher`]; the
//! engine evaluates one matcher per subscription against each published
//! code. Matching operates on the decoded identifier text with the trailing
//! pad suffix stripped, so a pattern addresses the identifier as written:
//! `"A?C"` matches the identifier `ABC`, and a wildcard-free pattern
//! matches exactly one identifier.
//!
//! Matchers support a specificity partial order meant to let the engine
//! disambiguate overlapping filters. Only the exact-pattern kind exists
//! today and it never claims to be more specific; the order becomes
//! meaningful once other kinds (e.g. numeric ranges) join [`MatcherKind`].

use crate::code::Code;
use crate::filters::glob::glob_match;

/// Kind of a compiled matcher.
///
/// A single kind today; the enum is the growth point for range and
/// numeric-class filters.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// Glob over the identifier text (`?`, `*`).
    Exact,
}

/// A compiled filter pattern.
///
/// Stateless with respect to any particular identifier; one matcher is
/// evaluated against many codes over its lifetime.
pub trait Matcher: Send + Sync {
    /// Whether `code`'s identifier satisfies the pattern.
    fn matches(&self, code: &Code) -> bool;

    /// The original pattern text.
    fn pattern(&self) -> &str;

    /// The matcher's kind.
    fn kind(&self) -> MatcherKind;

    /// Specificity partial order across matchers.
    ///
    /// The exact-pattern kind always answers `false`.
    fn more_specific_than(&self, other: &dyn Matcher) -> bool;
}

/// Glob matcher over the decoded identifier text.
struct GlobMatcher {
    pattern: Box<str>,
}

impl Matcher for GlobMatcher {
    fn matches(&self, code: &Code) -> bool {
        let decoded = code.decode();
        glob_match(&self.pattern, decoded.trimmed())
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Exact
    }

    fn more_specific_than(&self, other: &dyn Matcher) -> bool {
        match other.kind() {
            MatcherKind::Exact => false,
        }
    }
}

/// Compiles `pattern` into a matcher.
///
/// Compilation never fails: any text is a valid pattern, wildcards or not.
pub fn compile_pattern(pattern: &str) -> Box<dyn Matcher> {
    Box::new(GlobMatcher {
        pattern: pattern.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_against_the_trimmed_identifier() {
        let code = Code::new("ABCDEF").unwrap();
        assert!(compile_pattern("A*").matches(&code));
        assert!(compile_pattern("AB*").matches(&code));
        assert!(compile_pattern("ABCDEF").matches(&code));
        assert!(compile_pattern("ABCDE?").matches(&code));
        assert!(!compile_pattern("ABCDE").matches(&code));
        assert!(!compile_pattern("XYZ").matches(&code));
    }

    #[test]
    fn test_short_identifier_matches_without_pad_awareness() {
        let code = Code::new("ABC").unwrap();
        assert!(compile_pattern("A?C").matches(&code));
        assert!(compile_pattern("ABC").matches(&code));
        assert!(!compile_pattern("ABC?").matches(&code));
    }

    #[test]
    fn test_catch_all_pattern() {
        assert!(compile_pattern("*").matches(&Code::new("ABCDEF").unwrap()));
        assert!(compile_pattern("*").matches(&Code::new("").unwrap()));
    }

    #[test]
    fn test_exact_kind_is_never_more_specific() {
        let narrow = compile_pattern("ABCDEF");
        let wide = compile_pattern("*");
        assert_eq!(narrow.kind(), MatcherKind::Exact);
        assert!(!narrow.more_specific_than(wide.as_ref()));
        assert!(!wide.more_specific_than(narrow.as_ref()));
    }

    #[test]
    fn test_compiled_matcher_keeps_the_pattern_text() {
        assert_eq!(compile_pattern("AB*").pattern(), "AB*");
    }
}
