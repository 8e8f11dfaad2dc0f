// src/query.rs

//! Package search query language
//!
//! A query is a whitespace-separated list of terms. Every term must match
//! (terms are conjunctive). Each term has the form:
//!
//! `[field:][~][^]pattern[$]`
//!
//! - `field:` scopes the term to one package attribute (`name`, `filename`,
//!   `version`, `architecture`, `distribution`, `tag`, `format`, `status`,
//!   `uploader`). Without a recognized prefix the term is matched by the
//!   service against its default fields, and any `:` is part of the pattern.
//! - `~` negates the term.
//! - `^` / `$` anchor the pattern to the start / end of the value.
//! - `*` inside the pattern requests fuzzy matching. It is passed through
//!   to the service untouched.
//!
//! Example: `name:^foo$ filename:.zip$ architecture:~x86`

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Keyword used to join terms when encoding a query for the service
const CONJUNCTION: &str = " AND ";

/// Package attributes a term can be scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    Name,
    Filename,
    Version,
    Architecture,
    Distribution,
    Tag,
    Format,
    Status,
    Uploader,
}

impl QueryField {
    /// All recognized fields
    pub const ALL: [QueryField; 9] = [
        QueryField::Name,
        QueryField::Filename,
        QueryField::Version,
        QueryField::Architecture,
        QueryField::Distribution,
        QueryField::Tag,
        QueryField::Format,
        QueryField::Status,
        QueryField::Uploader,
    ];

    /// The field name as written in a query
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryField::Name => "name",
            QueryField::Filename => "filename",
            QueryField::Version => "version",
            QueryField::Architecture => "architecture",
            QueryField::Distribution => "distribution",
            QueryField::Tag => "tag",
            QueryField::Format => "format",
            QueryField::Status => "status",
            QueryField::Uploader => "uploader",
        }
    }

    /// Look up a field by its exact query name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed clause of a package search query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryTerm {
    /// Attribute the term is scoped to; `None` for implicit terms
    pub field: Option<QueryField>,
    /// Pattern with all markers except `*` stripped
    pub pattern: String,
    pub negated: bool,
    pub anchor_start: bool,
    pub anchor_end: bool,
    /// Pattern contains a `*` wildcard
    pub fuzzy: bool,
}

impl QueryTerm {
    /// Parse a single whitespace-free token
    ///
    /// Never fails: anything that is not a recognized field prefix is
    /// treated as part of the pattern.
    pub fn parse(token: &str) -> Self {
        let (field, rest) = match token.split_once(':') {
            Some((prefix, rest)) => match QueryField::from_name(prefix) {
                Some(field) => (Some(field), rest),
                None => (None, token),
            },
            None => (None, token),
        };

        let (negated, rest) = match rest.strip_prefix('~') {
            Some(stripped) => (true, stripped),
            None => (false, rest),
        };

        let (anchor_start, rest) = match rest.strip_prefix('^') {
            Some(stripped) => (true, stripped),
            None => (false, rest),
        };

        let (anchor_end, rest) = match rest.strip_suffix('$') {
            Some(stripped) => (true, stripped),
            None => (false, rest),
        };

        Self {
            field,
            pattern: rest.to_string(),
            negated,
            anchor_start,
            anchor_end,
            fuzzy: rest.contains('*'),
        }
    }
}

impl FromStr for QueryTerm {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for QueryTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = self.field {
            write!(f, "{}:", field)?;
        }
        if self.negated {
            f.write_str("~")?;
        }
        if self.anchor_start {
            f.write_str("^")?;
        }
        f.write_str(&self.pattern)?;
        if self.anchor_end {
            f.write_str("$")?;
        }
        Ok(())
    }
}

/// Split a query string into terms, preserving their order
///
/// An absent or blank query yields no terms (no filtering).
pub fn parse_query(query: Option<&str>) -> Vec<QueryTerm> {
    query
        .map(|q| q.split_whitespace().map(QueryTerm::parse).collect())
        .unwrap_or_default()
}

/// Encode terms into the filter string sent to the service
///
/// Returns `None` when there is nothing to filter on.
pub fn encode_query(terms: &[QueryTerm]) -> Option<String> {
    if terms.is_empty() {
        return None;
    }
    let encoded: Vec<String> = terms.iter().map(ToString::to_string).collect();
    Some(encoded.join(CONJUNCTION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scoped_terms() {
        let terms = parse_query(Some("name:^foo$ filename:.zip$ architecture:~x86"));
        assert_eq!(terms.len(), 3);

        assert_eq!(terms[0].field, Some(QueryField::Name));
        assert_eq!(terms[0].pattern, "foo");
        assert!(terms[0].anchor_start);
        assert!(terms[0].anchor_end);
        assert!(!terms[0].negated);

        assert_eq!(terms[1].field, Some(QueryField::Filename));
        assert_eq!(terms[1].pattern, ".zip");
        assert!(!terms[1].anchor_start);
        assert!(terms[1].anchor_end);

        assert_eq!(terms[2].field, Some(QueryField::Architecture));
        assert_eq!(terms[2].pattern, "x86");
        assert!(terms[2].negated);
        assert!(!terms[2].anchor_start);
        assert!(!terms[2].anchor_end);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let query = Some("name:^foo$ filename:.zip$ architecture:~x86 bar*baz");
        assert_eq!(parse_query(query), parse_query(query));
        assert_eq!(
            encode_query(&parse_query(query)),
            encode_query(&parse_query(query))
        );
    }

    #[test]
    fn test_implicit_term() {
        let terms = parse_query(Some("my-package"));
        assert_eq!(
            terms,
            vec![QueryTerm {
                field: None,
                pattern: "my-package".to_string(),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn test_unknown_prefix_is_pattern() {
        let term = QueryTerm::parse("epoch:1:2.0");
        assert_eq!(term.field, None);
        assert_eq!(term.pattern, "epoch:1:2.0");

        // Field names are matched exactly
        let term = QueryTerm::parse("Name:foo");
        assert_eq!(term.field, None);
        assert_eq!(term.pattern, "Name:foo");
    }

    #[test]
    fn test_colon_inside_scoped_pattern() {
        let term = QueryTerm::parse("version:1:2.3-4");
        assert_eq!(term.field, Some(QueryField::Version));
        assert_eq!(term.pattern, "1:2.3-4");
    }

    #[test]
    fn test_fuzzy_keeps_wildcard() {
        let term = QueryTerm::parse("name:foo*bar");
        assert!(term.fuzzy);
        assert_eq!(term.pattern, "foo*bar");
        assert_eq!(term.to_string(), "name:foo*bar");
    }

    #[test]
    fn test_standalone_negation() {
        let term = QueryTerm::parse("~^debug");
        assert!(term.negated);
        assert!(term.anchor_start);
        assert_eq!(term.pattern, "debug");
    }

    #[test]
    fn test_empty_query() {
        assert!(parse_query(None).is_empty());
        assert!(parse_query(Some("   ")).is_empty());
        assert_eq!(encode_query(&[]), None);
    }

    #[test]
    fn test_encode_joins_terms() {
        let terms = parse_query(Some("name:^foo$  filename:.zip$\tarchitecture:~x86"));
        assert_eq!(
            encode_query(&terms).as_deref(),
            Some("name:^foo$ AND filename:.zip$ AND architecture:~x86")
        );
    }

    #[test]
    fn test_bare_markers() {
        let term = QueryTerm::parse("^$");
        assert!(term.anchor_start);
        assert!(term.anchor_end);
        assert_eq!(term.pattern, "");

        let term = QueryTerm::parse("name:");
        assert_eq!(term.field, Some(QueryField::Name));
        assert_eq!(term.pattern, "");
    }
}
