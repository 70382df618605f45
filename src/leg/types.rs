//! The leg value type.

use crate::flags::TriggerType;
use std::hash::{Hash, Hasher};

/// Largest leg multiplicity accepted from a chain name.
pub const MAX_MULTIPLICITY: u32 = 32;

/// One physics-object requirement of a chain.
///
/// Legs are immutable once built. Equality and hashing are structural over
/// `(l1seed, count, thr, legtype, details)`; the raw `legname` is carried
/// for display only.
#[derive(Debug, Clone)]
pub struct TriggerLeg {
    legname: String,
    l1seed: String,
    count: u32,
    thr: i64,
    legtype: TriggerType,
    details: Vec<String>,
}

impl TriggerLeg {
    /// Builds a leg from already-interpreted parts.
    ///
    /// `count` is clamped to `1..=MAX_MULTIPLICITY`.
    pub fn new(
        legname: impl Into<String>,
        l1seed: impl Into<String>,
        count: u32,
        thr: i64,
        legtype: TriggerType,
        details: Vec<String>,
    ) -> Self {
        Self {
            legname: legname.into(),
            l1seed: l1seed.into(),
            count: count.clamp(1, MAX_MULTIPLICITY),
            thr,
            legtype,
            details,
        }
    }

    pub fn legname(&self) -> &str {
        &self.legname
    }

    /// Effective L1 seed: the leg override, else the chain seed.
    pub fn l1seed(&self) -> &str {
        &self.l1seed
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Threshold encoded in the leg head.
    pub fn thr(&self) -> i64 {
        self.thr
    }

    pub fn legtype(&self) -> TriggerType {
        self.legtype
    }

    /// Qualifier tokens in name order.
    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// Expands a multiplicity-`n` leg into `n` single legs.
    ///
    /// Each copy has `count == 1` and the single bit of its family.
    pub(crate) fn expand(&self) -> impl Iterator<Item = TriggerLeg> + '_ {
        (0..self.count).map(move |_| Self {
            count: 1,
            legtype: self.legtype.to_single(),
            ..self.clone()
        })
    }
}

impl PartialEq for TriggerLeg {
    fn eq(&self, other: &Self) -> bool {
        self.l1seed == other.l1seed
            && self.count == other.count
            && self.thr == other.thr
            && self.legtype == other.legtype
            && self.details == other.details
    }
}

impl Eq for TriggerLeg {}

impl Hash for TriggerLeg {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.l1seed.hash(state);
        self.count.hash(state);
        self.thr.hash(state);
        self.legtype.hash(state);
        self.details.hash(state);
    }
}

impl std::fmt::Display for TriggerLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (L1 {}, {}x thr {}, {}, [{}])",
            self.legname,
            self.l1seed,
            self.count,
            self.thr,
            self.legtype,
            self.details.join(",")
        )
    }
}
