//! # EdgeLedger
//!
//! A content-delivery task-assignment ledger:
//! - Customers submit delivery tasks (a URL plus size/type metadata)
//! - CDN nodes register themselves and claim tasks (bidirectional linking)
//! - Client fetches are recorded as visit records and later acknowledged
//!   (settled) for accounting
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Dispatcher                              │
//! │            (named operations, invoke/query)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Ledger                                 │
//! │   Registry · TaskIndex · AssignmentEngine · VisitLedger      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!               ┌───────▼────────┐
//!               │  Entity codec  │
//!               │    (JSON)      │
//!               └───────┬────────┘
//!                       │
//!               ┌───────▼────────┐
//!               │    KvStore     │
//!               │ (prefix scans) │
//!               └────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod entity;
pub mod registry;
pub mod index;
pub mod assignment;
pub mod visit;
pub mod protocol;
pub mod ledger;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LedgerError, Result};
pub use config::Config;
pub use entity::{CdnNode, Task, VisitRecord};
pub use ledger::Ledger;
pub use store::{FileStore, KvStore, MemoryStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of EdgeLedger
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
