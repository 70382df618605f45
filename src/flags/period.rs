//! Data-taking period flags.
//!
//! Periods are consumed as opaque flag sets; the only property the
//! comparators read is whether 2015 data is part of the set.

use crate::error::{Result, TriggerError};
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// A set of data-taking periods.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct TriggerPeriod: u32 {
        const Y2015 = 1 << 0;
        const Y2016_PERIOD_A = 1 << 1;
        const Y2016_PERIOD_BD3 = 1 << 2;
        const Y2016_PERIOD_D4PLUS = 1 << 3;
        const Y2017_PERIOD_B1 = 1 << 4;
        const Y2017_PERIOD_B2B4 = 1 << 5;
        const Y2017_PERIOD_B5B7 = 1 << 6;
        const Y2017_PERIOD_B8 = 1 << 7;
        const Y2017_PERIOD_C = 1 << 8;
        const Y2017_PERIOD_D1D5 = 1 << 9;
        const Y2017_PERIOD_D6 = 1 << 10;
        const Y2017_PERIOD_EF = 1 << 11;
        const Y2017_PERIOD_GHIK = 1 << 12;
        const Y2017_LOWMU = 1 << 13;
        const Y2018_PERIOD_BE = 1 << 14;
        const Y2018_PERIOD_FI = 1 << 15;
        const Y2018_LOWMU = 1 << 16;
        const Y2018_PERIOD_KQ = 1 << 17;
        const RUN_NUMBER = 1 << 18;
        const CUSTOM_GRL = 1 << 19;
        const FUTURE_1P8E34 = 1 << 20;
        const FUTURE_2E34 = 1 << 21;

        const Y2016 = Self::Y2016_PERIOD_A.bits()
            | Self::Y2016_PERIOD_BD3.bits()
            | Self::Y2016_PERIOD_D4PLUS.bits();
        const Y2017 = Self::Y2017_PERIOD_B1.bits()
            | Self::Y2017_PERIOD_B2B4.bits()
            | Self::Y2017_PERIOD_B5B7.bits()
            | Self::Y2017_PERIOD_B8.bits()
            | Self::Y2017_PERIOD_C.bits()
            | Self::Y2017_PERIOD_D1D5.bits()
            | Self::Y2017_PERIOD_D6.bits()
            | Self::Y2017_PERIOD_EF.bits()
            | Self::Y2017_PERIOD_GHIK.bits();
        const Y2018 = Self::Y2018_PERIOD_BE.bits()
            | Self::Y2018_PERIOD_FI.bits()
            | Self::Y2018_PERIOD_KQ.bits();
        const FUTURE = Self::FUTURE_1P8E34.bits() | Self::FUTURE_2E34.bits();
    }
}

const BASE_NAMES: [(&str, TriggerPeriod); 22] = [
    ("y2015", TriggerPeriod::Y2015),
    ("y2016periodA", TriggerPeriod::Y2016_PERIOD_A),
    ("y2016periodBD3", TriggerPeriod::Y2016_PERIOD_BD3),
    ("y2016periodD4plus", TriggerPeriod::Y2016_PERIOD_D4PLUS),
    ("y2017periodB1", TriggerPeriod::Y2017_PERIOD_B1),
    ("y2017periodB2B4", TriggerPeriod::Y2017_PERIOD_B2B4),
    ("y2017periodB5B7", TriggerPeriod::Y2017_PERIOD_B5B7),
    ("y2017periodB8", TriggerPeriod::Y2017_PERIOD_B8),
    ("y2017periodC", TriggerPeriod::Y2017_PERIOD_C),
    ("y2017periodD1D5", TriggerPeriod::Y2017_PERIOD_D1D5),
    ("y2017periodD6", TriggerPeriod::Y2017_PERIOD_D6),
    ("y2017periodEF", TriggerPeriod::Y2017_PERIOD_EF),
    ("y2017periodGHIK", TriggerPeriod::Y2017_PERIOD_GHIK),
    ("y2017lowmu", TriggerPeriod::Y2017_LOWMU),
    ("y2018periodBE", TriggerPeriod::Y2018_PERIOD_BE),
    ("y2018periodFI", TriggerPeriod::Y2018_PERIOD_FI),
    ("y2018lowmu", TriggerPeriod::Y2018_LOWMU),
    ("y2018periodKQ", TriggerPeriod::Y2018_PERIOD_KQ),
    ("runNumber", TriggerPeriod::RUN_NUMBER),
    ("customGRL", TriggerPeriod::CUSTOM_GRL),
    ("future1p8e34", TriggerPeriod::FUTURE_1P8E34),
    ("future2e34", TriggerPeriod::FUTURE_2E34),
];

const AGGREGATE_NAMES: [(&str, TriggerPeriod); 4] = [
    ("y2016", TriggerPeriod::Y2016),
    ("y2017", TriggerPeriod::Y2017),
    ("y2018", TriggerPeriod::Y2018),
    ("future", TriggerPeriod::FUTURE),
];

impl TriggerPeriod {
    /// Whether 2015 data is part of this period set.
    ///
    /// 2015 menus had no L1 parity for `noL1` legs, so the marker cannot be
    /// treated as a loosening there.
    pub fn is_2015(self) -> bool {
        self.contains(Self::Y2015)
    }

    /// Whether the set is exactly one base period.
    pub fn is_base_period(self) -> bool {
        self.bits().count_ones() == 1
    }

    /// Splits the set into its base periods, in bit order.
    pub fn base_periods(self) -> Vec<Self> {
        BASE_NAMES
            .iter()
            .map(|(_, p)| *p)
            .filter(|p| self.contains(*p))
            .collect()
    }

    /// Name used in the JSON view.
    ///
    /// Base periods and the yearly aggregates have their own names; any
    /// other set is the `|`-joined list of its base names. The empty set is
    /// `"0"`.
    pub fn name(self) -> String {
        if self.is_empty() {
            return "0".to_string();
        }
        if let Some((name, _)) = BASE_NAMES
            .iter()
            .chain(AGGREGATE_NAMES.iter())
            .find(|(_, p)| *p == self)
        {
            return (*name).to_string();
        }
        BASE_NAMES
            .iter()
            .filter(|(_, p)| self.contains(*p))
            .map(|(n, _)| *n)
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Parses a name produced by [`name`](Self::name).
    pub fn parse_name(name: &str) -> Result<Self> {
        if name == "0" {
            return Ok(Self::empty());
        }
        name.split('|').try_fold(Self::empty(), |acc, part| {
            BASE_NAMES
                .iter()
                .chain(AGGREGATE_NAMES.iter())
                .find(|(n, _)| *n == part)
                .map(|(_, p)| acc | *p)
                .ok_or_else(|| TriggerError::UnknownPeriod(part.to_string()))
        })
    }
}

impl fmt::Display for TriggerPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
