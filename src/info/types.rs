//! The per-period chain collection and its JSON view.

use super::source::{ChainSource, PeriodRecords};
use crate::chain::{ChainRecord, TriggerChain};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::flags::TriggerPeriod;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// All chains of a period (or of several merged periods).
///
/// Built once and never mutated; [`merge`](Self::merge) and
/// [`reparse`](Self::reparse) return new values.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerInfo {
    period: TriggerPeriod,
    total_lb: u64,
    chains: Vec<TriggerChain>,
}

/// Serialized form: `{ "period", "totalLB", "triggerChains" }`.
#[derive(Debug, Serialize, Deserialize)]
struct TriggerInfoView {
    period: String,
    #[serde(rename = "totalLB")]
    total_lb: u64,
    #[serde(rename = "triggerChains")]
    trigger_chains: Vec<ChainRecord>,
}

impl TriggerInfo {
    /// Parses every record into a chain, keeping input order.
    ///
    /// # Errors
    ///
    /// The first [`TriggerError::MultipleL1Overrides`](crate::TriggerError::MultipleL1Overrides)
    /// met while parsing.
    pub fn from_records(
        period: TriggerPeriod,
        total_lb: u64,
        records: &[ChainRecord],
        diag: &dyn Diagnostics,
    ) -> Result<Self> {
        let chains = parse_records(records, diag)?;
        tracing::debug!(
            period = %period,
            chains = chains.len(),
            total_lb,
            "built trigger info"
        );
        Ok(Self {
            period,
            total_lb,
            chains,
        })
    }

    /// Fetches the period from `source` and parses it.
    pub fn load(
        period: TriggerPeriod,
        source: &impl ChainSource,
        diag: &dyn Diagnostics,
    ) -> Result<Self> {
        let PeriodRecords { records, total_lb } = source.fetch(period)?;
        Self::from_records(period, total_lb, &records, diag)
    }

    pub fn period(&self) -> TriggerPeriod {
        self.period
    }

    pub fn total_lb(&self) -> u64 {
        self.total_lb
    }

    pub fn chains(&self) -> &[TriggerChain] {
        &self.chains
    }

    /// Chain with the given name, if present.
    pub fn chain(&self, name: &str) -> Option<&TriggerChain> {
        self.chains.iter().find(|c| c.name() == name)
    }

    /// Combines several infos into one.
    ///
    /// Periods are OR-ed and luminosity blocks summed. Chains sharing a
    /// name have their `activeLB` summed (the first occurrence supplies
    /// everything else) and livefraction recomputed against the merged
    /// total; a merged total of zero gives livefraction 0.
    pub fn merge(infos: &[TriggerInfo]) -> TriggerInfo {
        let period = infos
            .iter()
            .fold(TriggerPeriod::empty(), |acc, info| acc | info.period);
        let total_lb: u64 = infos.iter().map(|info| info.total_lb).sum();

        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut merged: Vec<(&TriggerChain, u64)> = Vec::new();
        for chain in infos.iter().flat_map(|info| info.chains.iter()) {
            let next = merged.len();
            let i = *index.entry(chain.name()).or_insert(next);
            if i == next {
                merged.push((chain, 0));
            }
            merged[i].1 += chain.active_lb();
        }

        let chains = merged
            .into_iter()
            .map(|(chain, active_lb)| {
                let livefraction = if total_lb == 0 {
                    0.0
                } else {
                    active_lb as f64 / total_lb as f64
                };
                chain.with_activity(active_lb, livefraction)
            })
            .collect();

        TriggerInfo {
            period,
            total_lb,
            chains,
        }
    }

    /// Rebuilds every chain from its record.
    pub fn reparse(&self, diag: &dyn Diagnostics) -> Result<TriggerInfo> {
        let records: Vec<ChainRecord> = self.chains.iter().map(TriggerChain::record).collect();
        Self::from_records(self.period, self.total_lb, &records, diag)
    }

    /// Serializes to the JSON view.
    pub fn to_json(&self) -> Result<String> {
        let view = TriggerInfoView {
            period: self.period.name(),
            total_lb: self.total_lb,
            trigger_chains: self.chains.iter().map(TriggerChain::record).collect(),
        };
        Ok(serde_json::to_string(&view)?)
    }

    /// Reads the JSON view; chains are parsed again from their names.
    pub fn from_json(json: &str, diag: &dyn Diagnostics) -> Result<TriggerInfo> {
        let view: TriggerInfoView = serde_json::from_str(json)?;
        let period = TriggerPeriod::parse_name(&view.period)?;
        Self::from_records(period, view.total_lb, &view.trigger_chains, diag)
    }
}

#[cfg(not(feature = "parallel"))]
fn parse_records(records: &[ChainRecord], diag: &dyn Diagnostics) -> Result<Vec<TriggerChain>> {
    records
        .iter()
        .map(|record| TriggerChain::from_record(record, diag))
        .collect()
}

#[cfg(feature = "parallel")]
fn parse_records(records: &[ChainRecord], diag: &dyn Diagnostics) -> Result<Vec<TriggerChain>> {
    records
        .par_iter()
        .map(|record| TriggerChain::from_record(record, diag))
        .collect()
}
