//! Transformation sessions: the stateful directive surface
//!
//! A session binds one read-only source document and accumulates output
//! across directive calls. Each write directive builds a skeleton for its
//! target path and merges it into the owned output accumulator; the source
//! is held in a separate field and can never leak into the serialized
//! result.
//!
//! Copyright (c) 2026 Remap Team
//! Licensed under the Apache-2.0 license

use crate::transform::merge::{self, CollisionPolicy};
use crate::transform::path;
use crate::transform::report::{ReportTracker, TransformReport};
use crate::{ResolutionMode, Result};
use serde_json::{Map, Value};

/// Configuration for a transformation session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How source paths are resolved
    pub resolution: ResolutionMode,

    /// How writes into occupied slots are resolved
    pub collision: CollisionPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            resolution: ResolutionMode::Lenient,
            collision: CollisionPolicy::KeepExisting,
        }
    }
}

/// Read-only view of the bound source document
///
/// Passed to caller-supplied expressions so their capabilities are
/// declared in the signature rather than reached through shared session
/// state. The view always resolves leniently, regardless of the session's
/// resolution mode: expressions probing optional fields must not abort
/// the run.
#[derive(Debug, Clone, Copy)]
pub struct SourceView<'a> {
    source: &'a Value,
}

impl<'a> SourceView<'a> {
    fn new(source: &'a Value) -> Self {
        Self { source }
    }

    /// Resolve a dotted path against the source, leniently
    pub fn get(&self, source_path: &str) -> Option<&'a Value> {
        path::resolve(self.source, source_path)
    }
}

/// Stateful accumulator for one transformation run
///
/// The session holds a non-owning reference to the source document and an
/// owned output accumulator, kept strictly apart. Directives are issued
/// one at a time against `&mut self`; there is no terminal state, and
/// [`get_json`](TransformSession::get_json) may be called repeatedly with
/// directives continuing afterward.
///
/// # Example
///
/// ```
/// use remap_core::TransformSession;
/// use serde_json::json;
///
/// # fn main() -> remap_core::Result<()> {
/// let source = json!({"user": {"name": "Ada"}});
/// let mut session = TransformSession::new(&source);
/// session.set_property_value_from_source("user.name", "profile.display_name")?;
/// assert_eq!(session.get_json()?, r#"{"profile":{"display_name":"Ada"}}"#);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TransformSession<'a> {
    source: &'a Value,
    output: Value,
    config: SessionConfig,
    tracker: ReportTracker,
}

impl<'a> TransformSession<'a> {
    /// Create a session bound to a source document, with default
    /// configuration (lenient resolution, keep-existing collisions)
    pub fn new(source: &'a Value) -> Self {
        Self::with_config(source, SessionConfig::default())
    }

    /// Create a session with custom configuration
    pub fn with_config(source: &'a Value, config: SessionConfig) -> Self {
        Self {
            source,
            output: Value::Object(Map::new()),
            config,
            tracker: ReportTracker::new(),
        }
    }

    /// Write a literal value at a dotted target path.
    ///
    /// Builds a skeleton for the path and merges it into the accumulated
    /// output; previously written branches survive, and a write into an
    /// occupied slot is resolved by the session's collision policy.
    pub fn set_property_value(&mut self, target_path: &str, value: Value) {
        self.write(target_path, value);
    }

    /// Copy a value from a source path to a target path.
    ///
    /// Under lenient resolution a missing source path skips the write and
    /// records a `MissingSource` report item; under strict resolution it
    /// is an error.
    pub fn set_property_value_from_source(
        &mut self,
        source_path: &str,
        target_path: &str,
    ) -> Result<()> {
        match self.resolve_source(source_path)? {
            Some(value) => {
                let value = value.clone();
                self.write(target_path, value);
            }
            None => self.skip_missing(source_path, target_path),
        }
        Ok(())
    }

    /// Read a value from a source path, apply a caller-supplied expression
    /// to it, and write the result at a target path.
    ///
    /// The expression receives the resolved value and a read-only
    /// [`SourceView`]; its return value is the only contract, and a panic
    /// inside it unwinds to the caller unchanged. It is invoked only when
    /// the source path resolved.
    pub fn set_property_value_from_expression<F>(
        &mut self,
        source_path: &str,
        target_path: &str,
        expression: F,
    ) -> Result<()>
    where
        F: FnOnce(&Value, &SourceView<'_>) -> Value,
    {
        match self.resolve_source(source_path)? {
            Some(value) => {
                let view = SourceView::new(self.source);
                let mapped = expression(value, &view);
                self.write(target_path, mapped);
            }
            None => self.skip_missing(source_path, target_path),
        }
        Ok(())
    }

    /// Read a value from a source path without writing any output.
    ///
    /// Lenient resolution returns `Ok(None)` on a miss; strict resolution
    /// returns the resolution error instead.
    pub fn get_property_value(&self, source_path: &str) -> Result<Option<&'a Value>> {
        self.resolve_source(source_path)
    }

    /// Read a value from a source path and apply an expression to it,
    /// without writing any output.
    ///
    /// The expression is not invoked when a lenient resolution misses.
    pub fn get_property_value_from_expression<F>(
        &self,
        source_path: &str,
        expression: F,
    ) -> Result<Option<Value>>
    where
        F: FnOnce(&Value, &SourceView<'_>) -> Value,
    {
        match self.resolve_source(source_path)? {
            Some(value) => {
                let view = SourceView::new(self.source);
                Ok(Some(expression(value, &view)))
            }
            None => Ok(None),
        }
    }

    /// Serialize the accumulated output to a JSON string.
    ///
    /// The result reflects directive-written data only; the bound source
    /// document lives in a separate field and cannot appear. The call is
    /// non-destructive and repeatable: consecutive calls return identical
    /// text, and directives may continue afterward.
    pub fn get_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.output)?)
    }

    /// Pretty-printed variant of [`get_json`](TransformSession::get_json)
    pub fn get_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.output)?)
    }

    /// Borrow the accumulated output document
    pub fn output(&self) -> &Value {
        &self.output
    }

    /// Consume the session and take ownership of the output document
    pub fn into_output(self) -> Value {
        self.output
    }

    /// Borrow the bound source document
    pub fn source(&self) -> &'a Value {
        self.source
    }

    /// Get the session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Build a point-in-time report of suppressed, replaced, and skipped
    /// writes
    pub fn report(&self) -> TransformReport {
        self.tracker.build_report()
    }

    fn resolve_source(&self, source_path: &str) -> Result<Option<&'a Value>> {
        match self.config.resolution {
            ResolutionMode::Lenient => Ok(path::resolve(self.source, source_path)),
            ResolutionMode::Strict => path::resolve_strict(self.source, source_path).map(Some),
        }
    }

    fn write(&mut self, target_path: &str, value: Value) {
        let skeleton = path::build_skeleton(target_path, value);
        merge::merge(
            &mut self.output,
            skeleton,
            self.config.collision,
            &mut self.tracker,
        );
    }

    fn skip_missing(&mut self, source_path: &str, target_path: &str) {
        log::warn!(
            "source path '{}' did not resolve; skipping write to '{}'",
            source_path,
            target_path
        );
        self.tracker.add_missing_source(source_path, target_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReportCode;
    use serde_json::json;

    fn sample_source() -> Value {
        json!({
            "user": {
                "name": "Ada",
                "address": {"city": "London"}
            },
            "count": 4
        })
    }

    #[test]
    fn test_set_property_value_top_level() {
        let source = json!({});
        let mut session = TransformSession::new(&source);
        session.set_property_value("flag", json!(true));
        assert_eq!(session.output(), &json!({"flag": true}));
    }

    #[test]
    fn test_sibling_writes_share_namespace() {
        let source = json!({});
        let mut session = TransformSession::new(&source);
        session.set_property_value("a.b", json!(1));
        session.set_property_value("a.c", json!(2));

        assert_eq!(session.get_json().unwrap(), r#"{"a":{"b":1,"c":2}}"#);
    }

    #[test]
    fn test_copy_from_source() {
        let source = sample_source();
        let mut session = TransformSession::new(&source);
        session
            .set_property_value_from_source("user.name", "profile.display_name")
            .unwrap();

        assert_eq!(
            session.output(),
            &json!({"profile": {"display_name": "Ada"}})
        );
    }

    #[test]
    fn test_expression_maps_value() {
        let source = sample_source();
        let mut session = TransformSession::new(&source);
        session
            .set_property_value_from_expression("count", "count", |value, _source| {
                json!(value.as_i64().unwrap() + 1)
            })
            .unwrap();

        assert_eq!(session.output(), &json!({"count": 5}));
    }

    #[test]
    fn test_expression_reads_through_source_view() {
        let source = sample_source();
        let mut session = TransformSession::new(&source);
        session
            .set_property_value_from_expression("user.name", "label", |value, source| {
                let city = source
                    .get("user.address.city")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                json!(format!("{} of {}", value.as_str().unwrap(), city))
            })
            .unwrap();

        assert_eq!(session.output(), &json!({"label": "Ada of London"}));
    }

    #[test]
    fn test_get_property_value() {
        let source = sample_source();
        let session = TransformSession::new(&source);
        assert_eq!(
            session.get_property_value("user.address.city").unwrap(),
            Some(&json!("London"))
        );
        assert_eq!(session.get_property_value("user.missing").unwrap(), None);
    }

    #[test]
    fn test_get_property_value_from_expression() {
        let source = sample_source();
        let session = TransformSession::new(&source);
        let doubled = session
            .get_property_value_from_expression("count", |value, _source| {
                json!(value.as_i64().unwrap() * 2)
            })
            .unwrap();
        assert_eq!(doubled, Some(json!(8)));

        let missing = session
            .get_property_value_from_expression("absent", |_value, _source| json!(0))
            .unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_reads_do_not_mutate_output() {
        let source = sample_source();
        let mut session = TransformSession::new(&source);
        session.set_property_value("kept", json!(1));
        let before = session.output().clone();

        let _ = session.get_property_value("user.name").unwrap();
        let _ = session
            .get_property_value_from_expression("count", |v, _| v.clone())
            .unwrap();

        assert_eq!(session.output(), &before);
        assert!(session.report().is_empty());
    }

    #[test]
    fn test_get_json_excludes_source() {
        let source = sample_source();
        let mut session = TransformSession::new(&source);
        session
            .set_property_value_from_source("count", "total")
            .unwrap();

        let text = session.get_json().unwrap();
        assert_eq!(text, r#"{"total":4}"#);
        assert!(!text.contains("Ada"));
    }

    #[test]
    fn test_get_json_is_repeatable() {
        let source = sample_source();
        let mut session = TransformSession::new(&source);
        session.set_property_value("a.b", json!(1));

        let first = session.get_json().unwrap();
        let second = session.get_json().unwrap();
        assert_eq!(first, second);

        // The session stays open after serialization
        session.set_property_value("a.c", json!(2));
        assert_eq!(session.get_json().unwrap(), r#"{"a":{"b":1,"c":2}}"#);
    }

    #[test]
    fn test_empty_session_serializes_to_empty_object() {
        let source = sample_source();
        let session = TransformSession::new(&source);
        assert_eq!(session.get_json().unwrap(), "{}");
    }

    #[test]
    fn test_scalar_collision_default_keeps_first_write() {
        let source = json!({});
        let mut session = TransformSession::new(&source);
        session.set_property_value("a", json!(1));
        session.set_property_value("a", json!(5));

        assert_eq!(session.output(), &json!({"a": 1}));
        let report = session.report();
        assert_eq!(report.items[0].code, ReportCode::Collision);
        assert_eq!(report.items[0].path, "a");
    }

    #[test]
    fn test_scalar_collision_last_write_wins_config() {
        let source = json!({});
        let config = SessionConfig {
            collision: CollisionPolicy::LastWriteWins,
            ..SessionConfig::default()
        };
        let mut session = TransformSession::with_config(&source, config);
        session.set_property_value("a", json!(1));
        session.set_property_value("a", json!(5));

        assert_eq!(session.output(), &json!({"a": 5}));
        assert_eq!(session.report().items[0].code, ReportCode::Overwrite);
    }

    #[test]
    fn test_lenient_missing_source_skips_write() {
        let source = sample_source();
        let mut session = TransformSession::new(&source);
        session
            .set_property_value_from_source("user.nickname", "profile.alias")
            .unwrap();

        assert_eq!(session.output(), &json!({}));
        let report = session.report();
        assert_eq!(report.items[0].code, ReportCode::MissingSource);
        assert_eq!(report.items[0].path, "user.nickname");
    }

    #[test]
    fn test_lenient_missing_source_skips_expression() {
        let source = sample_source();
        let mut session = TransformSession::new(&source);
        session
            .set_property_value_from_expression("user.nickname", "alias", |_value, _source| {
                panic!("expression must not run on a missing source path")
            })
            .unwrap();
        assert_eq!(session.output(), &json!({}));
    }

    #[test]
    fn test_strict_missing_source_errors() {
        let source = sample_source();
        let config = SessionConfig {
            resolution: ResolutionMode::Strict,
            ..SessionConfig::default()
        };
        let mut session = TransformSession::with_config(&source, config);

        let err = session
            .set_property_value_from_source("user.nickname", "profile.alias")
            .unwrap_err();
        match err {
            crate::Error::PathResolution { segment, .. } => assert_eq!(segment, "nickname"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(session.output(), &json!({}));
    }

    #[test]
    fn test_strict_resolution_success() {
        let source = sample_source();
        let config = SessionConfig {
            resolution: ResolutionMode::Strict,
            ..SessionConfig::default()
        };
        let mut session = TransformSession::with_config(&source, config);
        session
            .set_property_value_from_source("user.address.city", "city")
            .unwrap();
        assert_eq!(session.output(), &json!({"city": "London"}));
    }

    #[test]
    fn test_source_view_is_lenient_in_strict_sessions() {
        let source = sample_source();
        let config = SessionConfig {
            resolution: ResolutionMode::Strict,
            ..SessionConfig::default()
        };
        let mut session = TransformSession::with_config(&source, config);
        session
            .set_property_value_from_expression("count", "summary", |value, source| {
                // Probing an optional field must not abort the run
                let nickname = source.get("user.nickname");
                json!({"count": value, "has_nickname": nickname.is_some()})
            })
            .unwrap();

        assert_eq!(
            session.output(),
            &json!({"summary": {"count": 4, "has_nickname": false}})
        );
    }

    #[test]
    fn test_into_output() {
        let source = sample_source();
        let mut session = TransformSession::new(&source);
        session.set_property_value("a", json!(1));
        assert_eq!(session.into_output(), json!({"a": 1}));
    }

    #[test]
    fn test_source_accessor() {
        let source = sample_source();
        let session = TransformSession::new(&source);
        assert_eq!(session.source(), &source);
        assert_eq!(session.config(), &SessionConfig::default());
    }
}
