//! Query family over a [`TriggerInfo`].
//!
//! Every query takes a [`ChainFilter`]; an invalid filter is the only
//! failure.

use super::config::ChainFilter;
use super::types::TriggerInfo;
use crate::chain::{ChainRelation, TriggerChain};
use crate::diagnostics::{DiagnosticEvent, Diagnostics};
use crate::error::Result;
use crate::flags::{TriggerPeriod, TriggerType};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

impl TriggerInfo {
    /// Names of unprescaled chains passing the filter.
    pub fn unprescaled(&self, filter: &ChainFilter) -> Result<Vec<String>> {
        let compiled = filter.compile()?;
        Ok(self
            .chains()
            .iter()
            .filter(|c| compiled.selects(c) && compiled.is_unprescaled(c))
            .map(|c| c.name().to_string())
            .collect())
    }

    /// Pareto-minimal unprescaled chains per category.
    ///
    /// Chains are offered one by one to the frontier of their category: a
    /// candidate is dropped when a member is lower, otherwise it evicts
    /// every member it is lower than and joins. Categories come out in
    /// first-seen order, members in insertion order.
    pub fn lowest_unprescaled(&self, filter: &ChainFilter) -> Result<Vec<String>> {
        let compiled = filter.compile()?;
        let candidates = self
            .chains()
            .iter()
            .filter(|c| compiled.selects(c) && compiled.is_unprescaled(c));
        Ok(frontier(candidates, self.period())
            .into_iter()
            .map(|c| c.name().to_string())
            .collect())
    }

    /// Livefraction of every chain passing the filter, by name.
    pub fn all_hlt(&self, filter: &ChainFilter) -> Result<BTreeMap<String, f64>> {
        let compiled = filter.compile()?;
        Ok(self
            .chains()
            .iter()
            .filter(|c| compiled.selects(c))
            .map(|c| (c.name().to_string(), c.livefraction()))
            .collect())
    }

    /// Names of chains that ran unprescaled for some of the period.
    pub fn active(&self, filter: &ChainFilter) -> Result<Vec<String>> {
        let compiled = filter.compile()?;
        Ok(self
            .chains()
            .iter()
            .filter(|c| compiled.selects(c) && compiled.is_active(c))
            .map(|c| c.name().to_string())
            .collect())
    }

    /// Names of chains that never ran unprescaled.
    pub fn inactive(&self, filter: &ChainFilter) -> Result<Vec<String>> {
        let compiled = filter.compile()?;
        Ok(self
            .chains()
            .iter()
            .filter(|c| compiled.selects(c) && !compiled.is_active(c))
            .map(|c| c.name().to_string())
            .collect())
    }

    /// Prescaled chains that are tighter than an unprescaled chain.
    ///
    /// Each offending pair is reported as
    /// [`DiagnosticEvent::InconsistentPair`]. Returns the flagged prescaled
    /// names, sorted.
    pub fn check_period_consistency(
        &self,
        filter: &ChainFilter,
        diag: &dyn Diagnostics,
    ) -> Result<Vec<String>> {
        let compiled = filter.compile()?;
        let (unprescaled, prescaled): (Vec<&TriggerChain>, Vec<&TriggerChain>) = self
            .chains()
            .iter()
            .filter(|c| compiled.selects(c))
            .partition(|c| compiled.is_unprescaled(c));

        let mut flagged = BTreeSet::new();
        for low in &unprescaled {
            for high in &prescaled {
                if low.is_lower_than(high, self.period()) == ChainRelation::ALower {
                    diag.report(DiagnosticEvent::InconsistentPair {
                        unprescaled: low.name().to_string(),
                        prescaled: high.name().to_string(),
                    });
                    flagged.insert(high.name().to_string());
                }
            }
        }
        Ok(flagged.into_iter().collect())
    }

    /// Union of [`lowest_unprescaled`](Self::lowest_unprescaled) over
    /// several infos, first-seen order.
    pub fn lowest_unprescaled_any_period(
        infos: &[TriggerInfo],
        filter: &ChainFilter,
    ) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for info in infos {
            for name in info.lowest_unprescaled(filter)? {
                if seen.insert(name.clone()) {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }
}

/// Per-category Pareto frontier, flattened.
fn frontier<'a>(
    candidates: impl Iterator<Item = &'a TriggerChain>,
    period: TriggerPeriod,
) -> Vec<&'a TriggerChain> {
    let mut slots: HashMap<TriggerType, usize> = HashMap::new();
    let mut groups: Vec<Vec<&TriggerChain>> = Vec::new();

    for candidate in candidates {
        let next = groups.len();
        let slot = *slots.entry(candidate.trigger_type()).or_insert(next);
        if slot == next {
            groups.push(Vec::new());
        }
        let members = &mut groups[slot];

        if members
            .iter()
            .any(|m| m.is_lower_than(candidate, period) == ChainRelation::ALower)
        {
            continue;
        }
        members.retain(|m| candidate.is_lower_than(m, period) != ChainRelation::ALower);
        members.push(candidate);
    }

    groups.into_iter().flatten().collect()
}
