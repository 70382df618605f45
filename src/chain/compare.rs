//! Chain-level dominance and leg containment.

use super::types::TriggerChain;
use crate::flags::TriggerPeriod;
use crate::leg::{is_leg_lower_than, Comparison, TriggerLeg};
use std::collections::HashMap;

/// Three-valued chain relation.
///
/// `Unordered` covers both "identical" and "unrelated": a chain is never
/// reported as lower than an equal chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainRelation {
    /// No relation, or every leg identical.
    Unordered,
    /// The first chain is the looser selection.
    ALower,
    /// The second chain is the looser selection.
    BLower,
}

impl ChainRelation {
    /// Integer encoding used by existing tooling: -1, 1, 0.
    pub fn legacy_code(self) -> i32 {
        match self {
            ChainRelation::Unordered => -1,
            ChainRelation::ALower => 1,
            ChainRelation::BLower => 0,
        }
    }

    pub fn from_legacy_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(ChainRelation::Unordered),
            1 => Some(ChainRelation::ALower),
            0 => Some(ChainRelation::BLower),
            _ => None,
        }
    }

    /// Same relation seen from the other side.
    pub fn reverse(self) -> Self {
        match self {
            ChainRelation::ALower => ChainRelation::BLower,
            ChainRelation::BLower => ChainRelation::ALower,
            ChainRelation::Unordered => ChainRelation::Unordered,
        }
    }
}

/// Compares two chains leg by leg.
///
/// Chains of different category or leg count are unordered. The `noL1`
/// marker is only strippable outside 2015 periods.
pub fn is_lower_than(
    chain_a: &TriggerChain,
    chain_b: &TriggerChain,
    period: TriggerPeriod,
) -> ChainRelation {
    if chain_a.trigger_type() != chain_b.trigger_type()
        || chain_a.legs().len() != chain_b.legs().len()
    {
        return ChainRelation::Unordered;
    }

    let is2015 = period.is_2015();
    let mut direction = Comparison::Identical;
    for (leg_a, leg_b) in chain_a.legs().iter().zip(chain_b.legs()) {
        direction = direction.combine(is_leg_lower_than(leg_a, leg_b, is2015));
        if direction == Comparison::Incomparable {
            return ChainRelation::Unordered;
        }
    }

    match direction {
        Comparison::ALower => ChainRelation::ALower,
        Comparison::BLower => ChainRelation::BLower,
        Comparison::Identical | Comparison::Incomparable => ChainRelation::Unordered,
    }
}

/// Multiset containment of legs.
///
/// `ALower` when every leg of `chain_a` (with multiplicity) also appears in
/// `chain_b`, `BLower` for the converse, `Unordered` otherwise. Chains
/// without legs are never contained.
pub fn is_subset_of(chain_a: &TriggerChain, chain_b: &TriggerChain) -> ChainRelation {
    if chain_a.legs().is_empty() || chain_b.legs().is_empty() {
        return ChainRelation::Unordered;
    }

    let counts_a = leg_counts(chain_a.legs());
    let counts_b = leg_counts(chain_b.legs());
    if contained_in(&counts_a, &counts_b) {
        ChainRelation::ALower
    } else if contained_in(&counts_b, &counts_a) {
        ChainRelation::BLower
    } else {
        ChainRelation::Unordered
    }
}

fn leg_counts(legs: &[TriggerLeg]) -> HashMap<&TriggerLeg, usize> {
    let mut counts = HashMap::with_capacity(legs.len());
    for leg in legs {
        *counts.entry(leg).or_insert(0) += 1;
    }
    counts
}

fn contained_in(inner: &HashMap<&TriggerLeg, usize>, outer: &HashMap<&TriggerLeg, usize>) -> bool {
    inner
        .iter()
        .all(|(leg, n)| outer.get(leg).is_some_and(|m| m >= n))
}

impl TriggerChain {
    /// See [`is_lower_than`].
    pub fn is_lower_than(&self, other: &TriggerChain, period: TriggerPeriod) -> ChainRelation {
        is_lower_than(self, other, period)
    }

    /// See [`is_subset_of`].
    pub fn is_subset_of(&self, other: &TriggerChain) -> ChainRelation {
        is_subset_of(self, other)
    }
}
