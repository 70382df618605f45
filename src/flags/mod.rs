//! Flag sets for categories and periods.
//!
//! - [`TriggerType`]: leg and chain physics-object categories, with the
//!   single→multi promotion and override rules as named functions
//! - [`TriggerPeriod`]: data-taking period sets

mod period;
mod trigger_type;

pub use period::TriggerPeriod;
pub use trigger_type::{TriggerType, LEG_TOKENS};
