//! Chain value type and its input record.

use super::classify::classify_chain;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::flags::TriggerType;
use crate::leg::{parse_legs, TriggerLeg};
use serde::{Deserialize, Serialize};

/// One chain as delivered by the record source for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRecord {
    /// HLT chain name, e.g. `HLT_e26_lhtight_ivarloose`.
    pub name: String,
    /// Chain L1 seed, e.g. `L1_EM22VHI`.
    pub l1seed: String,
    /// Fraction of the period's luminosity blocks where the chain ran
    /// unprescaled (0.0–1.0).
    pub livefraction: f64,
    /// Number of luminosity blocks where the chain ran unprescaled.
    #[serde(rename = "activeLB")]
    pub active_lb: u64,
    /// Whether the chain ran in rerun mode.
    #[serde(rename = "hasRerun", default)]
    pub has_rerun: bool,
}

impl ChainRecord {
    /// Creates a record with `has_rerun = false`.
    pub fn new(
        name: impl Into<String>,
        l1seed: impl Into<String>,
        livefraction: f64,
        active_lb: u64,
    ) -> Self {
        Self {
            name: name.into(),
            l1seed: l1seed.into(),
            livefraction,
            active_lb,
            has_rerun: false,
        }
    }

    /// Sets the rerun flag.
    pub fn with_rerun(mut self, has_rerun: bool) -> Self {
        self.has_rerun = has_rerun;
        self
    }
}

/// A parsed chain: canonical legs, category and activity.
///
/// Legs are expanded to multiplicity one and grouped by the bit order of
/// their [`TriggerType`], so `mu8_e17` and `e17_mu8` carry the same leg
/// sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerChain {
    name: String,
    l1seed: String,
    legs: Vec<TriggerLeg>,
    livefraction: f64,
    active_lb: u64,
    has_rerun: bool,
    trigger_type: TriggerType,
}

impl TriggerChain {
    /// Parses a chain from its record.
    ///
    /// # Errors
    ///
    /// [`TriggerError::MultipleL1Overrides`](crate::TriggerError::MultipleL1Overrides)
    /// when a leg names two distinct L1 overrides. Every other oddity is
    /// soft: the chain just ends up with fewer (or no) legs.
    pub fn from_record(record: &ChainRecord, diag: &dyn Diagnostics) -> Result<Self> {
        let parsed = parse_legs(&record.name, &record.l1seed, diag)?;
        let legs = canonical_legs(parsed);
        let trigger_type = classify_chain(&legs, &record.l1seed);
        Ok(Self {
            name: record.name.clone(),
            l1seed: record.l1seed.clone(),
            legs,
            livefraction: record.livefraction,
            active_lb: record.active_lb,
            has_rerun: record.has_rerun,
            trigger_type,
        })
    }

    /// Shorthand for [`from_record`](Self::from_record).
    pub fn parse(
        name: &str,
        l1seed: &str,
        livefraction: f64,
        active_lb: u64,
        diag: &dyn Diagnostics,
    ) -> Result<Self> {
        Self::from_record(&ChainRecord::new(name, l1seed, livefraction, active_lb), diag)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn l1seed(&self) -> &str {
        &self.l1seed
    }

    /// Canonical legs (multiplicity expanded, grouped by category).
    pub fn legs(&self) -> &[TriggerLeg] {
        &self.legs
    }

    pub fn livefraction(&self) -> f64 {
        self.livefraction
    }

    pub fn active_lb(&self) -> u64 {
        self.active_lb
    }

    pub fn has_rerun(&self) -> bool {
        self.has_rerun
    }

    /// Aggregate category.
    pub fn trigger_type(&self) -> TriggerType {
        self.trigger_type
    }

    /// The record this chain was built from (with current activity).
    pub fn record(&self) -> ChainRecord {
        ChainRecord {
            name: self.name.clone(),
            l1seed: self.l1seed.clone(),
            livefraction: self.livefraction,
            active_lb: self.active_lb,
            has_rerun: self.has_rerun,
        }
    }

    /// Copy with replaced activity numbers; legs and category are kept.
    pub(crate) fn with_activity(&self, active_lb: u64, livefraction: f64) -> Self {
        Self {
            active_lb,
            livefraction,
            ..self.clone()
        }
    }

    /// Whether the chain ran unprescaled for at least `threshold` of the
    /// period.
    pub fn is_unprescaled(&self, threshold: f64) -> bool {
        self.livefraction >= threshold
    }

    /// Whether the chain ran unprescaled for more than `threshold` of the
    /// period.
    pub fn is_active(&self, threshold: f64) -> bool {
        self.livefraction > threshold
    }

    /// Category filter.
    ///
    /// `UNDEFINED` chains never pass and `ALL` chains always do. Otherwise
    /// `primary` must intersect the chain type, each of `additional` must
    /// intersect what is left after removing the previous matches, and
    /// nothing may be left at the end.
    pub fn pass_type(&self, primary: TriggerType, additional: &[TriggerType]) -> bool {
        if self.trigger_type.is_empty() {
            return false;
        }
        if self.trigger_type == TriggerType::ALL {
            return true;
        }
        if !self.trigger_type.intersects(primary) {
            return false;
        }
        let mut rest = self.trigger_type - primary;
        for t in additional {
            if !rest.intersects(*t) {
                return false;
            }
            rest -= *t;
        }
        rest.is_empty()
    }
}

/// Groups legs by category bit order and expands multiplicities.
fn canonical_legs(mut legs: Vec<TriggerLeg>) -> Vec<TriggerLeg> {
    legs.sort_by_key(|leg| leg.legtype().order_index());
    legs.iter().flat_map(|leg| leg.expand()).collect()
}

impl std::fmt::Display for TriggerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] L1 {} livefraction {:.3} activeLB {}",
            self.name, self.trigger_type, self.l1seed, self.livefraction, self.active_lb
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;

    fn chain(name: &str, l1: &str, lf: f64) -> TriggerChain {
        TriggerChain::parse(name, l1, lf, 10, &RecordingDiagnostics::new()).unwrap()
    }

    #[test]
    fn test_canonical_order_is_name_order_independent() {
        let a = chain("HLT_e17_lhloose_nod0_mu14", "L1_EM15VH_MU10", 1.0);
        let b = chain("HLT_mu14_e17_lhloose_nod0", "L1_EM15VH_MU10", 1.0);
        assert_eq!(a.legs(), b.legs());
        assert_eq!(a.trigger_type(), b.trigger_type());
    }

    #[test]
    fn test_multiplicity_expansion() {
        let c = chain("HLT_2e17_lhvloose_nod0", "L1_2EM15VHI", 1.0);
        assert_eq!(c.legs().len(), 2);
        assert!(c.legs().iter().all(|l| l.count() == 1));
        assert!(c.legs().iter().all(|l| l.legtype() == TriggerType::EL_SINGLE));
        assert_eq!(c.trigger_type(), TriggerType::EL_MULTI);
    }

    #[test]
    fn test_single_legs_grouped_before_multi() {
        let c = chain("HLT_2mu10_e12_lhloose_mu8", "L1_EM8VH_2MU6", 1.0);
        let types: Vec<_> = c.legs().iter().map(|l| l.thr()).collect();
        // e12 (el_single), mu8 (mu_single), then 2mu10 expanded (mu_multi).
        assert_eq!(types, vec![12, 8, 10, 10]);
    }

    #[test]
    fn test_unprescaled_and_active() {
        let c = chain("HLT_e26_lhtight_ivarloose", "L1_EM22VHI", 0.5);
        assert!(!c.is_unprescaled(1.0));
        assert!(c.is_unprescaled(0.5));
        assert!(c.is_active(1e-99));

        let dead = chain("HLT_e26_lhtight_ivarloose", "L1_EM22VHI", 0.0);
        assert!(!dead.is_active(1e-99));
    }

    #[test]
    fn test_pass_type() {
        let el = chain("HLT_e26_lhtight_ivarloose", "L1_EM22VHI", 1.0);
        assert!(el.pass_type(TriggerType::EL_SINGLE, &[]));
        assert!(el.pass_type(TriggerType::EL, &[]));
        assert!(el.pass_type(TriggerType::ALL, &[]));
        assert!(!el.pass_type(TriggerType::MU, &[]));

        let elmu = chain("HLT_e17_lhloose_nod0_mu14", "L1_EM15VH_MU10", 1.0);
        assert!(!elmu.pass_type(TriggerType::EL_SINGLE, &[]));
        assert!(elmu.pass_type(TriggerType::EL_SINGLE, &[TriggerType::MU_SINGLE]));
        assert!(elmu.pass_type(TriggerType::MU, &[TriggerType::EL]));
        assert!(!elmu.pass_type(TriggerType::EL_SINGLE, &[TriggerType::MU_MULTI]));
        assert!(!elmu.pass_type(
            TriggerType::EL_SINGLE,
            &[TriggerType::MU_SINGLE, TriggerType::XE]
        ));

        let undefined = chain("HLT_noalg_L1EM22VHI", "L1_EM22VHI", 1.0);
        assert!(undefined.legs().is_empty());
        assert!(!undefined.pass_type(TriggerType::ALL, &[]));
    }

    #[test]
    fn test_record_round_trip() {
        let record = ChainRecord::new("HLT_mu26_ivarmedium", "L1_MU20", 0.9, 42).with_rerun(true);
        let c = TriggerChain::from_record(&record, &RecordingDiagnostics::new()).unwrap();
        assert_eq!(c.record(), record);
        assert!(c.has_rerun());
    }

    #[test]
    fn test_with_activity_keeps_legs() {
        let c = chain("HLT_mu26_ivarmedium", "L1_MU20", 0.9);
        let d = c.with_activity(99, 0.25);
        assert_eq!(d.active_lb(), 99);
        assert!((d.livefraction() - 0.25).abs() < 1e-12);
        assert_eq!(d.legs(), c.legs());
        assert_eq!(d.trigger_type(), c.trigger_type());
    }
}
