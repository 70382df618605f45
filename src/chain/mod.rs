//! Trigger chains: canonical legs, category and chain-level comparison.
//!
//! # Key Types
//!
//! - [`TriggerChain`]: parsed chain with activity numbers
//! - [`ChainRecord`]: raw `(name, l1seed, livefraction, activeLB, hasRerun)` input
//! - [`ChainRelation`]: three-valued chain dominance result
//!
//! # Example
//!
//! ```
//! use trigger_api::chain::{ChainRelation, TriggerChain};
//! use trigger_api::diagnostics::TracingDiagnostics;
//! use trigger_api::flags::TriggerPeriod;
//!
//! let diag = TracingDiagnostics;
//! let a = TriggerChain::parse("HLT_e26_lhtight_ivarloose_L1EM22VHI", "L1_EM22VHI", 1.0, 10, &diag)?;
//! let b = TriggerChain::parse("HLT_e28_lhtight_ivarloose_L1EM24VHI", "L1_EM24VHI", 1.0, 10, &diag)?;
//! assert_eq!(a.is_lower_than(&b, TriggerPeriod::Y2017), ChainRelation::ALower);
//! # Ok::<(), trigger_api::TriggerError>(())
//! ```

mod classify;
mod compare;
mod types;

pub use classify::{classify_chain, fold_legs, rescan_l1};
pub use compare::{is_lower_than, is_subset_of, ChainRelation};
pub use types::{ChainRecord, TriggerChain};
