//! Transformation engine for reshaping JSON documents by dotted paths
//!
//! This module implements the core of Remap: resolving dot-separated
//! property paths against a source document, materializing target paths
//! into nested skeletons, and structurally merging those skeletons into an
//! accumulating output without destroying previously written branches.
//! [`TransformSession`] ties the three together behind the directive
//! surface.
//!
//! Copyright (c) 2026 Remap Team
//! Licensed under the Apache-2.0 license

pub mod merge;
pub mod path;
pub mod report;
pub mod session;

pub use merge::{merge, merge_into, CollisionPolicy};
pub use path::{build_skeleton, resolve, resolve_strict};
pub use report::{ReportItem, ReportSummary, ReportTracker, TransformReport};
pub use session::{SessionConfig, SourceView, TransformSession};
