//! Trigger legs: tokenizing, parsing and comparing.
//!
//! A chain name such as `HLT_e17_lhloose_nod0_mu14_L1EM15VH_MU10` is a
//! sequence of legs, each opened by a head token (`e17`, `mu14`) and
//! followed by qualifier tokens and optional `_L1` seed overrides.
//!
//! # Key Types
//!
//! - [`TriggerLeg`]: one parsed leg
//! - [`Comparison`]: four-valued dominance result
//!
//! # Submodules
//!
//! - [`tokenizer`]: state machine splitting names into [`LegSegment`]s

mod compare;
mod parser;
pub mod tokenizer;
mod types;

pub use compare::{
    compare_details, compare_tags, is_leg_lower_than, Comparison, INVERSE_CUTS, LADDER,
};
pub use parser::{parse_legs, strip_l1_prefix};
pub use tokenizer::{LegSegment, TokenState};
pub use types::{TriggerLeg, MAX_MULTIPLICITY};
