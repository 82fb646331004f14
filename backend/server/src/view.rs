//! # Directory View
//!
//! Holds one page's worth of state: the fetched records and the four filter inputs.
//!
//! ## Lifecycle
//! - `NotLoaded`: nothing fetched yet, the visible set is empty
//! - `Loaded`: the fetch finished, possibly with zero records
//!
//! [`DirectoryView::activate`] fetches exactly once. A failed fetch is logged and leaves the
//! view `Loaded` with no records, so the page renders "No colleges found." and the filters keep
//! working on an empty set. There is no way back to `NotLoaded`.
use colleges::{CollegeRecord, CollegeSource};
use tracing::error;

use crate::{
    card::CardView,
    filter::{FilterOptions, FilterState, filter_colleges},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotLoaded,
    Loaded,
}

#[derive(Debug, Clone)]
pub struct DirectoryView {
    phase: Phase,
    colleges: Vec<CollegeRecord>,
    pub filters: FilterState,
}

impl DirectoryView {
    pub fn new(filters: FilterState) -> Self {
        Self {
            phase: Phase::NotLoaded,
            colleges: Vec::new(),
            filters,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn colleges(&self) -> &[CollegeRecord] {
        &self.colleges
    }

    pub async fn activate(&mut self, source: &dyn CollegeSource) {
        if self.phase == Phase::Loaded {
            return;
        }

        match source.fetch_verified_colleges().await {
            Ok(colleges) => self.colleges = colleges,
            Err(e) => error!(error = %e, "Error fetching colleges"),
        }

        self.phase = Phase::Loaded;
    }

    /// Recomputed on every call from the records currently held.
    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.colleges)
    }

    pub fn visible(&self) -> Vec<&CollegeRecord> {
        filter_colleges(&self.colleges, &self.filters)
    }

    pub fn cards(&self) -> Vec<CardView> {
        self.visible()
            .into_iter()
            .map(CardView::from_record)
            .collect()
    }
}
