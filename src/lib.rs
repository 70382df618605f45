//! Trigger chain classification and dominance ordering.
//!
//! Parses HLT chain names such as `HLT_e17_lhloose_nod0_mu14_L1EM15VH_MU10`
//! into legs, assigns each chain a physics category, and orders chains of
//! the same category by how loose their selection is:
//!
//! - **Legs** ([`leg`]): tokenizer state machine, leg parser and the
//!   four-valued leg comparison over thresholds, working points and
//!   optional markers (`noL1`, `nod0`, `cut*`).
//! - **Chains** ([`chain`]): canonical leg order, category folding with an
//!   L1 seed rescan, chain dominance and leg-multiset containment.
//! - **Periods** ([`info`]): per-period collections with the lowest
//!   unprescaled frontier, consistency checks, multi-period merge and a
//!   JSON view.
//! - **Flags** ([`flags`]): [`TriggerType`] and [`TriggerPeriod`] bit sets.
//!
//! # Architecture
//!
//! Data flows one way: legs are parsed once into [`chain::TriggerChain`]
//! values, and [`info::TriggerInfo`] only combines those results. Nothing
//! is mutated after construction. Non-fatal findings go to an injected
//! [`diagnostics::Diagnostics`] sink.

pub mod chain;
pub mod diagnostics;
pub mod error;
pub mod flags;
pub mod info;
pub mod leg;

pub use error::{Result, TriggerError};
pub use flags::{TriggerPeriod, TriggerType};
