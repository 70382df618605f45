//! Chain selection used by the query family.

use crate::chain::TriggerChain;
use crate::error::{Result, TriggerError};
use crate::flags::TriggerType;
use regex::Regex;

/// Which chains a query looks at.
///
/// # Examples
///
/// ```
/// use trigger_api::flags::TriggerType;
/// use trigger_api::info::ChainFilter;
///
/// let filter = ChainFilter::of(TriggerType::EL_SINGLE)
///     .with_additional_type(TriggerType::MU_SINGLE)
///     .with_match_pattern("lhtight")
///     .with_livefraction(0.95);
/// assert!(filter.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ChainFilter {
    /// Primary category; must intersect the chain category.
    pub trigger_type: TriggerType,

    /// Further categories, each of which must be present in the chain.
    pub additional_types: Vec<TriggerType>,

    /// Regex searched in the chain name. `None` matches everything.
    pub match_pattern: Option<String>,

    /// Minimum livefraction for a chain to count as unprescaled.
    pub livefraction: f64,

    /// A chain with livefraction above this is active.
    pub active_threshold: f64,
}

impl Default for ChainFilter {
    fn default() -> Self {
        Self {
            trigger_type: TriggerType::ALL,
            additional_types: Vec::new(),
            match_pattern: None,
            livefraction: 1.0,
            active_threshold: 1e-99,
        }
    }
}

impl ChainFilter {
    /// Every chain with a known category.
    pub fn all() -> Self {
        Self::default()
    }

    /// Chains of one primary category.
    pub fn of(trigger_type: TriggerType) -> Self {
        Self::default().with_trigger_type(trigger_type)
    }

    pub fn with_trigger_type(mut self, trigger_type: TriggerType) -> Self {
        self.trigger_type = trigger_type;
        self
    }

    pub fn with_additional_type(mut self, trigger_type: TriggerType) -> Self {
        self.additional_types.push(trigger_type);
        self
    }

    pub fn with_additional_types(mut self, types: impl IntoIterator<Item = TriggerType>) -> Self {
        self.additional_types = types.into_iter().collect();
        self
    }

    pub fn with_match_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.match_pattern = Some(pattern.into());
        self
    }

    pub fn with_livefraction(mut self, livefraction: f64) -> Self {
        self.livefraction = livefraction;
        self
    }

    pub fn with_active_threshold(mut self, threshold: f64) -> Self {
        self.active_threshold = threshold;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..=1.0).contains(&self.livefraction) {
            return Err(format!(
                "livefraction must be in [0, 1], got {}",
                self.livefraction
            ));
        }
        if !(0.0..1.0).contains(&self.active_threshold) {
            return Err(format!(
                "active_threshold must be in [0, 1), got {}",
                self.active_threshold
            ));
        }
        if self.trigger_type.is_empty() {
            return Err("trigger_type must not be UNDEFINED".into());
        }
        if self.additional_types.iter().any(|t| t.is_empty()) {
            return Err("additional types must not be UNDEFINED".into());
        }
        Ok(())
    }

    /// Validates and compiles the filter.
    pub(crate) fn compile(&self) -> Result<CompiledFilter<'_>> {
        self.validate().map_err(TriggerError::InvalidFilter)?;
        let pattern = match &self.match_pattern {
            Some(p) => Some(Regex::new(p).map_err(|source| TriggerError::InvalidPattern {
                pattern: p.clone(),
                source,
            })?),
            None => None,
        };
        Ok(CompiledFilter {
            filter: self,
            pattern,
        })
    }
}

/// A validated filter with its pattern compiled.
pub(crate) struct CompiledFilter<'a> {
    filter: &'a ChainFilter,
    pattern: Option<Regex>,
}

impl CompiledFilter<'_> {
    /// Category and name pattern, ignoring prescale.
    pub fn selects(&self, chain: &TriggerChain) -> bool {
        chain.pass_type(self.filter.trigger_type, &self.filter.additional_types)
            && self
                .pattern
                .as_ref()
                .map_or(true, |p| p.is_match(chain.name()))
    }

    pub fn is_unprescaled(&self, chain: &TriggerChain) -> bool {
        chain.is_unprescaled(self.filter.livefraction)
    }

    pub fn is_active(&self, chain: &TriggerChain) -> bool {
        chain.is_active(self.filter.active_threshold)
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
    fn test_default_config() {
        let filter = ChainFilter::default();
        assert_eq!(filter.trigger_type, TriggerType::ALL);
        assert!(filter.additional_types.is_empty());
        assert!(filter.match_pattern.is_none());
        assert!((filter.livefraction - 1.0).abs() < 1e-12);
        assert!(filter.active_threshold > 0.0 && filter.active_threshold < 1e-90);
    }

    #[test]
    fn test_validate_ok() {
        assert!(ChainFilter::all().validate().is_ok());
        assert!(ChainFilter::of(TriggerType::MU).validate().is_ok());
    }

    #[test]
    fn test_validate_bad_livefraction() {
        assert!(ChainFilter::all().with_livefraction(1.5).validate().is_err());
        assert!(ChainFilter::all().with_livefraction(-0.1).validate().is_err());
    }

    #[test]
    fn test_validate_undefined_type() {
        assert!(ChainFilter::of(TriggerType::UNDEFINED).validate().is_err());
        assert!(ChainFilter::all()
            .with_additional_type(TriggerType::UNDEFINED)
            .validate()
            .is_err());
    }

    #[test]
    fn test_compile_invalid_pattern() {
        let err = ChainFilter::all().with_match_pattern("(").compile().err();
        assert!(matches!(err, Some(TriggerError::InvalidPattern { .. })));

        let err = ChainFilter::all().with_livefraction(2.0).compile().err();
        assert!(matches!(err, Some(TriggerError::InvalidFilter(_))));
    }

    #[test]
    fn test_selects_by_type_and_pattern() {
        let filter = ChainFilter::of(TriggerType::EL).with_match_pattern("ivar");
        let compiled = filter.compile().unwrap();
        assert!(compiled.selects(&chain("HLT_e26_lhtight_ivarloose", "L1_EM22VHI", 1.0)));
        assert!(!compiled.selects(&chain("HLT_e60_lhmedium", "L1_EM22VHI", 1.0)));
        assert!(!compiled.selects(&chain("HLT_mu26_ivarmedium", "L1_MU20", 1.0)));
    }

    #[test]
    fn test_prescale_thresholds() {
        let filter = ChainFilter::all().with_livefraction(0.9);
        let compiled = filter.compile().unwrap();
        assert!(compiled.is_unprescaled(&chain("HLT_mu26_ivarmedium", "L1_MU20", 0.95)));
        assert!(!compiled.is_unprescaled(&chain("HLT_mu26_ivarmedium", "L1_MU20", 0.5)));
        assert!(compiled.is_active(&chain("HLT_mu26_ivarmedium", "L1_MU20", 0.5)));
        assert!(!compiled.is_active(&chain("HLT_mu26_ivarmedium", "L1_MU20", 0.0)));
    }
}
