//! # Filters
//!
//! Four inputs narrow the directory: a free-text name search and one selection per dimension
//! (district, type, ownership). A record is shown only when every clause holds.
//!
//! - Search: case-insensitive substring of the name, an empty term matches everything
//! - Selections: [`ALL`] or exact equality with the record's normalized value
//!
//! Selections are compared after whitespace normalization only, `"Pune"` never matches `"pune"`.
use std::collections::BTreeSet;

use colleges::{CollegeRecord, normalize_text};
use serde::Serialize;

/// Sentinel selection meaning "no restriction".
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    /// `"all"`, blank, and missing input all mean no restriction.
    pub fn parse(input: Option<&str>) -> Self {
        match input.map(normalize_text) {
            None => Choice::All,
            Some(value) if value.is_empty() || value == ALL => Choice::All,
            Some(value) => Choice::Only(value),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(selected) => *selected == normalize_text(value),
        }
    }

    /// Value for the `<select>`, either [`ALL`] or the selected option.
    pub fn as_str(&self) -> &str {
        match self {
            Choice::All => ALL,
            Choice::Only(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search: String,
    pub district: Choice,
    pub kind: Choice,
    pub ownership: Choice,
}

impl FilterState {
    pub fn matches(&self, college: &CollegeRecord) -> bool {
        let matches_search = college
            .name
            .to_lowercase()
            .contains(&self.search.to_lowercase());

        matches_search
            && self.district.matches(&college.district)
            && self.kind.matches(&college.kind)
            && self.ownership.matches(&college.ownership)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterOptions {
    pub districts: Vec<String>,
    pub types: Vec<String>,
    pub ownerships: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(colleges: &[CollegeRecord]) -> Self {
        Self {
            districts: distinct(colleges, |c| c.district.as_str()),
            types: distinct(colleges, |c| c.kind.as_str()),
            ownerships: distinct(colleges, |c| c.ownership.as_str()),
        }
    }
}

/// Distinct non-empty normalized values, ascending.
pub fn distinct<'a>(
    colleges: &'a [CollegeRecord],
    field: impl Fn(&'a CollegeRecord) -> &'a str,
) -> Vec<String> {
    colleges
        .iter()
        .map(|college| normalize_text(field(college)))
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn filter_colleges<'a>(
    colleges: &'a [CollegeRecord],
    filters: &FilterState,
) -> Vec<&'a CollegeRecord> {
    colleges
        .iter()
        .filter(|college| filters.matches(college))
        .collect()
}
