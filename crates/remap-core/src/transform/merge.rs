//! Structural merge of nested JSON objects
//!
//! Combines an incoming object graph into an accumulator in place,
//! preferring to recurse into existing branches rather than overwrite
//! them. Each collision is an explicit branch resolved by policy, never an
//! accident of untyped property lookup.
//!
//! Copyright (c) 2026 Remap Team
//! Licensed under the Apache-2.0 license

use crate::transform::report::ReportTracker;
use serde_json::map::Entry;
use serde_json::{Map, Value};

/// Strategies for resolving a write into an already-occupied slot
///
/// A slot is occupied when the accumulator has an entry for the key, with
/// any value at all; an explicit `null` counts as occupied. `KeepExisting`
/// preserves the engine's historical behavior, where a value already
/// present at a key was never overwritten by a later write to the exact
/// same path. `LastWriteWins` is the opt-in redefinition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Keep the value already in the accumulator; suppress the write
    KeepExisting,
    /// Replace the existing value wholesale with the incoming one
    LastWriteWins,
}

/// Merge `incoming` into `accumulator` in place under the given policy.
///
/// For every key in `incoming`:
/// - a vacant slot adopts the incoming sub-tree by move, never by clone;
/// - two objects merge recursively, so sibling branches coexist;
/// - anything else is a collision, resolved by `policy` and recorded on
///   `tracker`. Sequences are leaves here; arrays never merge
///   element-wise.
///
/// A non-object `accumulator` or `incoming` is left untouched; the
/// operation has nothing to iterate.
pub fn merge(
    accumulator: &mut Value,
    incoming: Value,
    policy: CollisionPolicy,
    tracker: &mut ReportTracker,
) {
    if let (Value::Object(acc), Value::Object(inc)) = (accumulator, incoming) {
        merge_maps(acc, inc, policy, tracker, "");
    }
}

/// Merge with the default keep-existing policy, discarding outcomes.
///
/// Convenience entry point for callers that do not care about the report.
pub fn merge_into(accumulator: &mut Value, incoming: Value) {
    let mut tracker = ReportTracker::new();
    merge(accumulator, incoming, CollisionPolicy::KeepExisting, &mut tracker);
}

fn merge_maps(
    acc: &mut Map<String, Value>,
    inc: Map<String, Value>,
    policy: CollisionPolicy,
    tracker: &mut ReportTracker,
    prefix: &str,
) {
    for (key, incoming_value) in inc {
        let slot_path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match acc.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(incoming_value);
            }
            Entry::Occupied(mut slot) => match (slot.get_mut(), incoming_value) {
                (Value::Object(existing_map), Value::Object(incoming_map)) => {
                    merge_maps(existing_map, incoming_map, policy, tracker, &slot_path);
                }
                (existing, incoming_value) => match policy {
                    CollisionPolicy::KeepExisting => {
                        log::debug!("write to '{}' suppressed: slot already occupied", slot_path);
                        tracker.add_collision(&slot_path, existing.clone(), incoming_value);
                    }
                    CollisionPolicy::LastWriteWins => {
                        let previous = std::mem::replace(&mut *existing, incoming_value);
                        tracker.add_overwrite(&slot_path, previous, existing.clone());
                    }
                },
            },
        }
    }
}
