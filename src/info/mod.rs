//! Period-level chain collections and the query family.
//!
//! # Key Types
//!
//! - [`TriggerInfo`]: every chain of a period, with merge and JSON view
//! - [`ChainFilter`]: category, name pattern and prescale thresholds
//! - [`ChainSource`]: where per-period records come from
//!
//! # Example
//!
//! ```
//! use trigger_api::chain::ChainRecord;
//! use trigger_api::diagnostics::TracingDiagnostics;
//! use trigger_api::flags::{TriggerPeriod, TriggerType};
//! use trigger_api::info::{ChainFilter, TriggerInfo};
//!
//! let records = vec![
//!     ChainRecord::new("HLT_mu26_ivarmedium", "L1_MU20", 1.0, 100),
//!     ChainRecord::new("HLT_mu28_ivarmedium", "L1_MU20", 1.0, 100),
//! ];
//! let info = TriggerInfo::from_records(TriggerPeriod::Y2017, 100, &records, &TracingDiagnostics)?;
//! let lowest = info.lowest_unprescaled(&ChainFilter::of(TriggerType::MU))?;
//! assert_eq!(lowest, vec!["HLT_mu26_ivarmedium"]);
//! # Ok::<(), trigger_api::TriggerError>(())
//! ```

mod config;
mod query;
mod source;
mod types;

pub use config::ChainFilter;
pub use source::{ChainSource, PeriodRecords, StaticSource};
pub use types::TriggerInfo;
