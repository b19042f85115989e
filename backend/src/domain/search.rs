//! Free-text search terms used by the paginated listings.

/// Case-insensitive substring filter.
///
/// Blank input disables filtering, so an empty search box lists everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(Option<String>);

impl SearchTerm {
    /// Build a filter from raw query input.
    ///
    /// # Examples
    /// ```
    /// use hostel_backend::domain::SearchTerm;
    ///
    /// let search = SearchTerm::new(Some(" b1 "));
    /// assert!(search.matches("B101"));
    /// assert!(!search.matches("A101"));
    /// assert!(SearchTerm::new(Some("   ")).matches("anything"));
    /// ```
    #[must_use]
    pub fn new(raw: Option<&str>) -> Self {
        Self(
            raw.map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_lowercase),
        )
    }

    /// Lower-cased term, if any.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether `value` contains the term.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.matches_any(&[value])
    }

    /// Whether any of `values` contains the term.
    #[must_use]
    pub fn matches_any(&self, values: &[&str]) -> bool {
        match &self.0 {
            Some(term) => values
                .iter()
                .any(|value| value.to_lowercase().contains(term.as_str())),
            None => true,
        }
    }

    /// SQL `LIKE` pattern for the term with wildcards escaped.
    ///
    /// # Examples
    /// ```
    /// use hostel_backend::domain::SearchTerm;
    ///
    /// assert_eq!(SearchTerm::new(Some("50%_a")).like_pattern().as_deref(), Some("%50\\%\\_a%"));
    /// ```
    #[must_use]
    pub fn like_pattern(&self) -> Option<String> {
        self.0.as_ref().map(|term| {
            let escaped = term
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{escaped}%")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "A-101", true)]
    #[case(Some(""), "A-101", true)]
    #[case(Some("a-1"), "A-101", true)]
    #[case(Some("A-101"), "a-101", true)]
    #[case(Some("B"), "A-101", false)]
    fn matches_case_insensitively(
        #[case] raw: Option<&str>,
        #[case] value: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(SearchTerm::new(raw).matches(value), expected);
    }

    #[rstest]
    fn matches_any_checks_every_value() {
        let search = SearchTerm::new(Some("example.org"));
        assert!(search.matches_any(&["Ada", "ada@example.org"]));
        assert!(!search.matches_any(&["Ada", "ada@example.com"]));
    }
}
