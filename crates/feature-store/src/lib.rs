//! Record store collaborator for the features API.
//!
//! The query pipeline treats persistence as an external collaborator that
//! supports composable (AND) filter predicates plus count and slice access.
//! This crate defines that contract ([`RecordStore`]), the predicate model,
//! the pager, and an in-memory backend used by the service and its tests.

pub mod pager;
pub mod predicate;
pub mod record;
pub mod store;

pub use pager::{has_next_page, has_prev_page, paginate, Page};
pub use predicate::Predicate;
pub use store::{MemoryStore, RecordStore, StoreError};
