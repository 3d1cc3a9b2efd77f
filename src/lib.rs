//! Citrine Board Engine
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - store: In-memory collections and id counters
//! - reconcile: Pure drag reconciliation
//! - session: Transient drag gesture state
//! - repository: Persistence gateways
//! - context: Owned application state and the gesture boundary API

pub mod context;
pub mod domain;
pub mod reconcile;
pub mod repository;
pub mod session;
pub mod store;

pub use context::AppContext;
pub use dragdrop_core::{DropTarget, PointerTracker};
