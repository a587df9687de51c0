//! Primary source: depth-chart tables.
//!
//! A row whose `<th>` carries a role label switches the current role and
//! restarts its depth count. Every non-empty `<td>` in the following rows is
//! one entry, ranked by how many named entries precede it under that role.
//! Entries seen before any header keep the `UNK` role.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use roster_model::{PlayerRecord, SourceKind};

use crate::html::{ElementRange, elements_within, next_element, text_content};
use crate::name::{ordinal, role_from_header, split_name_injury};
use crate::outcome::{ParseOutcome, SkipReason};
use crate::roster_json::UNKNOWN_ROLE;

/// Lazy walk over the entries of a depth-chart document.
#[derive(Debug, Clone)]
pub struct DepthChartEntries<'a> {
    body: &'a str,
    lower: String,
    organization: String,
    observed_at: DateTime<Utc>,
    pos: usize,
    role: Option<String>,
    depth_index: usize,
    pending: VecDeque<String>,
}

impl<'a> DepthChartEntries<'a> {
    pub fn new(body: &'a str, organization: &str, observed_at: DateTime<Utc>) -> Self {
        Self {
            body,
            lower: body.to_ascii_lowercase(),
            organization: organization.to_string(),
            observed_at,
            pos: 0,
            role: None,
            depth_index: 0,
            pending: VecDeque::new(),
        }
    }

    /// Load the cells of the next data row; false once the document is done.
    fn advance_row(&mut self) -> bool {
        while let Some(row) = next_element(self.body, &self.lower, "tr", self.pos) {
            self.pos = row.end.max(row.inner_start);
            if let Some(role) = self.header_role(&row) {
                self.role = Some(role);
                self.depth_index = 0;
                continue;
            }
            let cells =
                elements_within(self.body, &self.lower, "td", row.inner_start, row.inner_end);
            self.pending = cells
                .into_iter()
                .map(|cell| text_content(&self.body[cell.inner_start..cell.inner_end]))
                .filter(|text| !is_placeholder(text))
                .collect();
            if !self.pending.is_empty() {
                return true;
            }
        }
        false
    }

    fn header_role(&self, row: &ElementRange) -> Option<String> {
        let th = elements_within(self.body, &self.lower, "th", row.inner_start, row.inner_end)
            .into_iter()
            .next()?;
        role_from_header(&text_content(&self.body[th.inner_start..th.inner_end]))
    }

    fn entry(&mut self, fragment: String) -> ParseOutcome {
        let (name, status) = split_name_injury(&fragment);
        if !name.chars().any(char::is_alphabetic) {
            return ParseOutcome::Skip(SkipReason::InvalidName { fragment });
        }
        self.depth_index += 1;
        let role = self.role.as_deref().unwrap_or(UNKNOWN_ROLE);
        ParseOutcome::Record(
            PlayerRecord::new(
                name,
                self.organization.as_str(),
                role,
                SourceKind::Primary,
                self.observed_at,
            )
            .with_depth_order(ordinal(self.depth_index))
            .with_injury_status(status),
        )
    }
}

impl Iterator for DepthChartEntries<'_> {
    type Item = ParseOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending.is_empty() && !self.advance_row() {
            return None;
        }
        let fragment = self.pending.pop_front()?;
        Some(self.entry(fragment))
    }
}

fn is_placeholder(text: &str) -> bool {
    matches!(text, "" | "-" | "\u{2013}" | "\u{2014}" | "--")
}
