//! The resolution pipeline.
//!
//! Data flows one way through four stages:
//!
//! ```text
//! entity strings
//!       │
//!       ▼
//! ┌──────────────┐   ┌──────────────┐   ┌────────────────┐   ┌──────────┐
//! │  candidates  │──►│   matcher    │──►│  disambiguate  │──►│   rank   │
//! │ (derivation) │   │ exact+fuzzy  │   │ cross-listings │   │  dedupe  │
//! └──────────────┘   └──────────────┘   └────────────────┘   └──────────┘
//!                                                                  │
//!                                                                  ▼
//!                                                      ranked StockRecords
//! ```
//!
//! [`ResolutionEngine`] composes the stages; each stage is also callable on
//! its own for testing and embedding.

pub mod candidates;
pub mod disambiguate;
pub mod engine;
pub mod matcher;
pub mod rank;

pub use candidates::derive_candidates;
pub use disambiguate::disambiguate;
pub use engine::{ResolutionEngine, ResolveOptions};
pub use matcher::match_candidates;
pub use rank::rank;
