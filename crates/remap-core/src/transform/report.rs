//! Write-outcome tracking for transformation sessions
//!
//! The merge engine never fails on a collision; it suppresses or replaces
//! the write according to policy. This module records those outcomes, plus
//! writes skipped because a source path did not resolve, so callers can
//! audit what the accumulated output does not reflect.
//!
//! Copyright (c) 2026 Remap Team
//! Licensed under the Apache-2.0 license

use crate::{ReportCode, Severity};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Individual write-outcome record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportItem {
    pub code: ReportCode,
    pub path: String,
    pub message: String,
    pub severity: Severity,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
}

/// Summary statistics over a report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub total_items: usize,
    pub by_severity: HashMap<String, usize>,
    pub by_code: HashMap<String, usize>,
}

/// Report of every write that deviated from a plain insert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformReport {
    /// List of recorded outcomes, in directive order
    pub items: Vec<ReportItem>,

    /// Overall severity of the report
    pub max_severity: Severity,

    /// Summary statistics
    pub summary: ReportSummary,

    /// RFC 3339 timestamp of when the report was built
    pub generated_at: String,
}

impl TransformReport {
    /// Check whether any outcome was recorded
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Tracker collecting write outcomes as directives execute
///
/// One tracker lives inside each session. Read directives are never
/// tracked; they take `&self` and mutate nothing.
#[derive(Debug, Default)]
pub struct ReportTracker {
    items: Vec<ReportItem>,
}

impl ReportTracker {
    /// Create a new, empty tracker
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a suppressed write: the slot already held a value and the
    /// keep-existing policy left it untouched
    pub fn add_collision(&mut self, path: &str, existing: Value, attempted: Value) {
        self.items.push(ReportItem {
            code: ReportCode::Collision,
            path: path.to_string(),
            message: format!("slot '{}' already occupied; write suppressed", path),
            severity: self.determine_severity(ReportCode::Collision),
            before: Some(existing),
            after: Some(attempted),
        });
    }

    /// Record a replacement performed under the last-write-wins policy
    pub fn add_overwrite(&mut self, path: &str, previous: Value, replacement: Value) {
        self.items.push(ReportItem {
            code: ReportCode::Overwrite,
            path: path.to_string(),
            message: format!("slot '{}' replaced by a later write", path),
            severity: self.determine_severity(ReportCode::Overwrite),
            before: Some(previous),
            after: Some(replacement),
        });
    }

    /// Record a write skipped because its source path did not resolve
    pub fn add_missing_source(&mut self, source_path: &str, target_path: &str) {
        self.items.push(ReportItem {
            code: ReportCode::MissingSource,
            path: source_path.to_string(),
            message: format!(
                "source path '{}' did not resolve; write to '{}' skipped",
                source_path, target_path
            ),
            severity: self.determine_severity(ReportCode::MissingSource),
            before: None,
            after: None,
        });
    }

    /// Add a custom report item
    pub fn add_item(&mut self, item: ReportItem) {
        self.items.push(item);
    }

    /// Determine severity for a report code
    fn determine_severity(&self, code: ReportCode) -> Severity {
        match code {
            // Suppressed and skipped writes mean the output diverges from
            // what the directive asked for
            ReportCode::Collision => Severity::Warning,
            ReportCode::MissingSource => Severity::Warning,

            // Overwrites are the policy working as requested
            ReportCode::Overwrite => Severity::Info,
        }
    }

    /// Get the current number of recorded items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Build a point-in-time report
    ///
    /// Non-consuming: the session stays open after reporting, so the
    /// tracker keeps accumulating.
    pub fn build_report(&self) -> TransformReport {
        let max_severity = self
            .items
            .iter()
            .map(|item| item.severity)
            .max()
            .unwrap_or(Severity::Info);

        let mut by_severity = HashMap::new();
        let mut by_code = HashMap::new();

        for item in &self.items {
            *by_severity.entry(item.severity.to_string()).or_insert(0) += 1;
            *by_code.entry(item.code.to_string()).or_insert(0) += 1;
        }

        let summary = ReportSummary {
            total_items: self.items.len(),
            by_severity,
            by_code,
        };

        TransformReport {
            items: self.items.clone(),
            max_severity,
            summary,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
