//! Splits a chain name into raw per-leg segments.
//!
//! The name is split on `_` and walked by a small state machine. A token
//! matching [`LEG_START`] opens a new segment; `L1`-prefixed tokens open
//! per-leg L1 override blocks; everything else is attached to the segment
//! (or block) currently open. If the very first token is not a leg head the
//! walk stops and no segments are returned.

use crate::flags::LEG_TOKENS;
use regex::Regex;
use std::sync::LazyLock;

/// Leg head: optional multiplicity, base type from [`LEG_TOKENS`],
/// threshold, optional `noL1`.
pub(crate) static LEG_START: LazyLock<Regex> = LazyLock::new(|| {
    let types: Vec<&str> = LEG_TOKENS.iter().map(|(t, _)| *t).collect();
    Regex::new(&format!(r"^(\d*)({})(\d+)(noL1)?", types.join("|")))
        .expect("leg head pattern is valid")
});

/// Walk state while tokenizing a chain name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Nothing consumed yet; the next token must be a leg head.
    SeekingLegStart,
    /// Inside a leg, before any L1 override block.
    InLeg,
    /// Inside an L1 override block of the current leg.
    InL1Override,
}

/// Raw text of one leg, already split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegSegment {
    /// The token that matched [`LEG_START`].
    pub head: String,
    /// Detail tokens following the head, in order.
    pub details: Vec<String>,
    /// L1 override blocks (text after `_L1`, inner `_` kept).
    pub l1_blocks: Vec<String>,
}

impl LegSegment {
    fn new(head: &str) -> Self {
        Self {
            head: head.to_string(),
            details: Vec::new(),
            l1_blocks: Vec::new(),
        }
    }

    /// The segment text as it appeared in the chain name.
    pub fn text(&self) -> String {
        let mut text = self.head.clone();
        for detail in &self.details {
            text.push('_');
            text.push_str(detail);
        }
        for block in &self.l1_blocks {
            text.push_str("_L1");
            text.push_str(block);
        }
        text
    }
}

/// Whether a token opens a new leg.
pub fn is_leg_start(token: &str) -> bool {
    LEG_START.is_match(token)
}

/// Splits a chain name (with or without the `HLT_` prefix) into segments.
///
/// Returns an empty vector when the first token is not a leg head.
pub fn split_legs(name: &str) -> Vec<LegSegment> {
    let name = name.strip_prefix("HLT_").unwrap_or(name);
    let mut segments: Vec<LegSegment> = Vec::new();
    let mut state = TokenState::SeekingLegStart;

    for token in name.split('_') {
        if is_leg_start(token) {
            segments.push(LegSegment::new(token));
            state = TokenState::InLeg;
            continue;
        }
        let Some(current) = segments.last_mut() else {
            return Vec::new();
        };
        if let Some(block) = token.strip_prefix("L1") {
            current.l1_blocks.push(block.to_string());
            state = TokenState::InL1Override;
            continue;
        }
        match state {
            TokenState::InLeg => current.details.push(token.to_string()),
            TokenState::InL1Override => {
                if let Some(block) = current.l1_blocks.last_mut() {
                    block.push('_');
                    block.push_str(token);
                }
            }
            TokenState::SeekingLegStart => return Vec::new(),
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_leg() {
        let segs = split_legs("HLT_e26_lhtight_ivarloose_L1EM22VHI");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].head, "e26");
        assert_eq!(segs[0].details, vec!["lhtight", "ivarloose"]);
        assert_eq!(segs[0].l1_blocks, vec!["EM22VHI"]);
        assert_eq!(segs[0].text(), "e26_lhtight_ivarloose_L1EM22VHI");
    }

    #[test]
    fn test_multi_leg() {
        let segs = split_legs("e17_lhloose_nod0_mu14");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].text(), "e17_lhloose_nod0");
        assert_eq!(segs[1].text(), "mu14");
    }

    #[test]
    fn test_override_block_keeps_following_tokens() {
        let segs = split_legs("j0_L1J12_EMPTY");
        assert_eq!(segs[0].l1_blocks, vec!["J12_EMPTY"]);
        assert!(segs[0].details.is_empty());
    }

    #[test]
    fn test_leg_after_override_block() {
        let segs = split_legs("j45_L1J15_j45_L1J15.31ETA49");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].l1_blocks, vec!["J15"]);
        assert_eq!(segs[1].l1_blocks, vec!["J15.31ETA49"]);
    }

    #[test]
    fn test_unmatched_first_token_aborts() {
        assert!(split_legs("HLT_noalg_L1J400").is_empty());
        assert!(split_legs("x").is_empty());
        assert!(split_legs("").is_empty());
    }

    #[test]
    fn test_leg_head_patterns() {
        for head in ["e26", "2e17", "mu4noL1", "xe110", "ht1000", "tau25", "g35", "3j175"] {
            assert!(is_leg_start(head), "{head}");
        }
        for token in ["gsc75", "ivarmedium", "L1EM22VHI", "boffperf", "020jvt", "XE55"] {
            assert!(!is_leg_start(token), "{token}");
        }
    }

    #[test]
    fn test_every_leg_token_opens_a_typed_leg() {
        use crate::flags::TriggerType;
        for (token, ty) in LEG_TOKENS {
            assert!(is_leg_start(&format!("{token}20")), "{token}");
            assert_eq!(TriggerType::for_leg_token(token, 1), Some(ty));
        }
    }

    #[test]
    fn test_uppercase_l1_tokens_stay_in_block() {
        let segs = split_legs("xe100_L12J15_XE55");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].l1_blocks, vec!["2J15_XE55"]);
    }
}
