//! Remap Core - declarative JSON-to-JSON document reshaping
//!
//! This crate provides a small transformation engine: a caller binds a
//! session to an already-parsed source document, issues directives that
//! read values from dotted-path locations (optionally mapped through a
//! caller-supplied expression) and write them to dotted-path locations in
//! an output document, then serializes the accumulated output.
//!
//! # Main Components
//!
//! - **Error Handling**: library error types using `thiserror` and `anyhow`
//! - **Path Resolution**: lenient and strict dotted-path traversal, plus
//!   skeleton construction for target paths
//! - **Structural Merge**: non-destructive, policy-driven combination of
//!   nested objects
//! - **Sessions**: the stateful directive surface with write-outcome
//!   reporting
//!
//! # Example
//!
//! ```
//! use remap_core::{Result, TransformSession};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let source = json!({"user": {"name": "Ada", "visits": 4}});
//!     let mut session = TransformSession::new(&source);
//!     session.set_property_value("profile.active", json!(true));
//!     session.set_property_value_from_source("user.name", "profile.display_name")?;
//!     session.set_property_value_from_expression("user.visits", "profile.visits", |v, _| {
//!         json!(v.as_i64().unwrap_or(0) + 1)
//!     })?;
//!
//!     assert_eq!(
//!         session.get_json()?,
//!         r#"{"profile":{"active":true,"display_name":"Ada","visits":5}}"#
//!     );
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod transform;

// Re-export main types for convenience
pub use error::{Error, ReportCode, ResolutionMode, Result, Severity};
pub use transform::{
    // Directive surface
    TransformSession,

    // Configuration
    CollisionPolicy, SessionConfig,

    // Expression capability
    SourceView,

    // Reporting
    ReportItem, ReportSummary, ReportTracker, TransformReport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
