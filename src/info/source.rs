//! Record sources: where per-period chain records come from.

use crate::chain::ChainRecord;
use crate::error::{Result, TriggerError};
use crate::flags::TriggerPeriod;
use std::collections::HashMap;

/// Chain records and luminosity-block count for one period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodRecords {
    pub records: Vec<ChainRecord>,
    pub total_lb: u64,
}

impl PeriodRecords {
    pub fn new(records: Vec<ChainRecord>, total_lb: u64) -> Self {
        Self { records, total_lb }
    }
}

/// Supplies chain records for a period.
///
/// This is the only boundary call of the crate; one blocking fetch per
/// period, no retries.
pub trait ChainSource {
    /// Fetches the records for `period`.
    fn fetch(&self, period: TriggerPeriod) -> Result<PeriodRecords>;
}

/// In-memory source keyed by exact period.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    periods: HashMap<TriggerPeriod, PeriodRecords>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the records for one period.
    pub fn with_period(mut self, period: TriggerPeriod, records: PeriodRecords) -> Self {
        self.periods.insert(period, records);
        self
    }
}

impl ChainSource for StaticSource {
    fn fetch(&self, period: TriggerPeriod) -> Result<PeriodRecords> {
        self.periods
            .get(&period)
            .cloned()
            .ok_or_else(|| TriggerError::Source(format!("no records for period {period}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_lookup() {
        let records = PeriodRecords::new(
            vec![ChainRecord::new("HLT_mu26_ivarmedium", "L1_MU20", 1.0, 100)],
            100,
        );
        let source = StaticSource::new().with_period(TriggerPeriod::Y2017_PERIOD_B1, records.clone());
        assert_eq!(source.fetch(TriggerPeriod::Y2017_PERIOD_B1).unwrap(), records);

        let err = source.fetch(TriggerPeriod::Y2015).unwrap_err();
        assert!(matches!(err, TriggerError::Source(_)));
    }
}
