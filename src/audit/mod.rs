//! Audit logging
//!
//! Every create, update and delete made through the services is appended to
//! `audit.log` as one JSON object per line, with the entity's state before
//! and after the change and a short field-level diff.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: appends and reads the JSONL file
//! - `generate_diff`: summarizes changed fields between two serialized states

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
