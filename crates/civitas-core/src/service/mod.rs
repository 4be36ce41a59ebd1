//! # Rule Engines
//!
//! One service per entity. Each operation validates, checks the rules
//! against storage, then performs a single write.
//!
//! ## Check Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create / update                                                        │
//! │                                                                         │
//! │  1. validate name            ──► Validation                             │
//! │  2. uniqueness scan          ──► AlreadyExists                          │
//! │  3. id lookup (update only)  ──► NotFound                               │
//! │  4. city lookup (states)     ──► NotFound                               │
//! │  5. write                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order decides which error wins when several conditions hold, so it
//! is part of the contract. The uniqueness scan on update does not exclude
//! the record being updated: renaming "Springfield" to "SPRINGFIELD" is
//! rejected as a duplicate.
//!
//! There is no locking here. Two concurrent creates with the same name can
//! both pass step 2; the SQLite gateway's unique indexes reject the loser,
//! which surfaces as `AlreadyExists`.

pub mod city;
pub mod state;

pub use city::CityService;
pub use state::StateService;
