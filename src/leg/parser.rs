//! Turns raw leg segments into [`TriggerLeg`] values.
//!
//! The head token fixes count, base type and threshold. Detail tokens are
//! kept in order and can re-classify the leg (b-jet, b-physics, exotics,
//! AFP keywords, checked in that order). L1 override blocks replace the
//! chain seed for this leg; more than one distinct override is an error.

use super::tokenizer::{split_legs, LegSegment, LEG_START};
use super::types::{TriggerLeg, MAX_MULTIPLICITY};
use crate::diagnostics::{DiagnosticEvent, Diagnostics};
use crate::error::{Result, TriggerError};
use crate::flags::TriggerType;
use regex::Regex;
use std::sync::LazyLock;

static BJET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:bmv|bhmv|btight|bmedium|bloose|bld1|bdl1|bgn1|bgn2)")
        .expect("b-jet pattern is valid")
});

static BPHYS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:bJpsi|bTau|bDimu|bBmumu|bPhi|bUpsi|bBmu|bDsPhi|bBee|b3mu|bLowMass|bNocut|bBkmumu)",
    )
    .expect("b-physics pattern is valid")
});

static EXOTICS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"llp|LLP|muvtx|hiptrt|LATE|NOMATCH|distrk|dedx|hitdv|fslrt|isotrk|dispj|calratio|emerging",
    )
    .expect("exotics pattern is valid")
});

static AFP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"afp|AFP").expect("afp pattern is valid"));

/// Strips every `L1_` prefix from a seed string (seed lists are comma
/// separated, each entry carries its own prefix).
pub fn strip_l1_prefix(l1seed: &str) -> String {
    l1seed.replace("L1_", "")
}

/// Parses every leg of a chain.
///
/// Returns an empty vector when the name does not start with a leg
/// (reported as [`DiagnosticEvent::UnparseableChain`]) or when any leg head
/// has a multiplicity or threshold out of range (reported as
/// [`DiagnosticEvent::MalformedLeg`]). Fails only when a leg carries more
/// than one L1 override that differs from the chain seed.
pub fn parse_legs(name: &str, l1seed: &str, diag: &dyn Diagnostics) -> Result<Vec<TriggerLeg>> {
    let chain_seed = strip_l1_prefix(l1seed);
    let segments = split_legs(name);
    if segments.is_empty() {
        diag.report(DiagnosticEvent::UnparseableChain {
            name: name.to_string(),
        });
        return Ok(Vec::new());
    }

    let mut legs = Vec::with_capacity(segments.len());
    for segment in &segments {
        match parse_segment(segment, &chain_seed, name, diag)? {
            Segment::Leg(leg) => legs.push(leg),
            Segment::Dropped => {}
            Segment::Malformed => return Ok(Vec::new()),
        }
    }
    Ok(legs)
}

impl TriggerLeg {
    /// Parses a single leg from its text, e.g. `"2e17_lhvloose"`.
    ///
    /// Returns `Ok(None)` when the text is not exactly one well-formed leg.
    pub fn parse(text: &str, chain_l1seed: &str, diag: &dyn Diagnostics) -> Result<Option<Self>> {
        let segments = split_legs(text);
        match segments.as_slice() {
            [segment] => match parse_segment(segment, &strip_l1_prefix(chain_l1seed), text, diag)? {
                Segment::Leg(leg) => Ok(Some(leg)),
                Segment::Dropped | Segment::Malformed => Ok(None),
            },
            [] => {
                diag.report(DiagnosticEvent::UnparseableChain {
                    name: text.to_string(),
                });
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

/// Outcome of parsing one segment.
enum Segment {
    Leg(TriggerLeg),
    /// Unknown base type; the rest of the chain is still usable.
    Dropped,
    /// Numbers out of range; the chain cannot be decomposed.
    Malformed,
}

/// Multiplicity from the head prefix; empty means one.
fn parse_count(digits: &str) -> Option<u32> {
    if digits.is_empty() {
        return Some(1);
    }
    digits
        .parse::<u32>()
        .ok()
        .filter(|n| *n <= MAX_MULTIPLICITY)
        .map(|n| n.max(1))
}

fn parse_segment(
    segment: &LegSegment,
    chain_seed: &str,
    chain: &str,
    diag: &dyn Diagnostics,
) -> Result<Segment> {
    let Some(caps) = LEG_START.captures(&segment.head) else {
        return Ok(Segment::Dropped);
    };

    let (Some(count), Ok(thr)) = (parse_count(&caps[1]), caps[3].parse::<i64>()) else {
        diag.report(DiagnosticEvent::MalformedLeg {
            chain: chain.to_string(),
            leg: segment.head.clone(),
        });
        return Ok(Segment::Malformed);
    };
    // LEG_START is built from the same token table, so this only fires if
    // the two ever diverge.
    let Some(mut legtype) = TriggerType::for_leg_token(&caps[2], count) else {
        diag.report(DiagnosticEvent::UnknownLegType {
            chain: chain.to_string(),
            token: caps[2].to_string(),
        });
        return Ok(Segment::Dropped);
    };

    let mut details = Vec::with_capacity(segment.details.len() + 2);
    if caps.get(4).is_some() {
        details.push("noL1".to_string());
    }
    let matched = caps.get(0).map_or(0, |m| m.end());
    let rest = &segment.head[matched..];
    if !rest.is_empty() {
        details.push(rest.to_string());
    }
    details.extend(segment.details.iter().cloned());

    for detail in &details {
        legtype = classify_detail(legtype, detail);
    }

    let mut override_seed: Option<&str> = None;
    for block in &segment.l1_blocks {
        legtype = classify_special(legtype, block);
        if block == chain_seed {
            continue;
        }
        if override_seed.is_some() {
            return Err(TriggerError::MultipleL1Overrides {
                chain: chain.to_string(),
                leg: segment.text(),
                blocks: segment.l1_blocks.clone(),
            });
        }
        override_seed = Some(block.as_str());
    }

    Ok(Segment::Leg(TriggerLeg::new(
        segment.text(),
        override_seed.unwrap_or(chain_seed),
        count,
        thr,
        legtype,
        details,
    )))
}

/// Applies one detail token to the leg type.
fn classify_detail(legtype: TriggerType, token: &str) -> TriggerType {
    let mut legtype = legtype;
    if BJET.is_match(token) {
        legtype = legtype.to_bjet();
    }
    if BPHYS.is_match(token) {
        legtype = TriggerType::MU_BPHYS;
    }
    classify_special(legtype, token)
}

/// Exotics and AFP keywords; AFP wins over exotics.
fn classify_special(legtype: TriggerType, text: &str) -> TriggerType {
    if AFP.is_match(text) {
        TriggerType::AFP
    } else if EXOTICS.is_match(text) && legtype != TriggerType::AFP {
        TriggerType::EXOTICS
    } else {
        legtype
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;

    fn parse(name: &str, l1: &str) -> Vec<TriggerLeg> {
        parse_legs(name, l1, &RecordingDiagnostics::new()).unwrap()
    }

    #[test]
    fn test_multiplicity_in_head_token() {
        let diag = RecordingDiagnostics::new();
        let leg = TriggerLeg::parse("2e17lhvloose", "", &diag).unwrap().unwrap();
        assert_eq!(leg.count(), 2);
        assert_eq!(leg.thr(), 17);
        assert_eq!(leg.legtype(), TriggerType::EL_MULTI);
        assert_eq!(leg.details(), ["lhvloose"]);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_chain_seed_used_without_override() {
        let legs = parse("HLT_e26_lhtight_ivarloose", "L1_EM22VHI");
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].l1seed(), "EM22VHI");
        assert_eq!(legs[0].details(), ["lhtight", "ivarloose"]);
        assert_eq!(legs[0].legtype(), TriggerType::EL_SINGLE);
    }

    #[test]
    fn test_override_equal_to_chain_seed_is_ignored() {
        let legs = parse("HLT_e7_lhmedium_mu24_L1MU20", "L1_MU20");
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].l1seed(), "MU20");
        assert_eq!(legs[1].l1seed(), "MU20");
        assert_eq!(legs[1].legtype(), TriggerType::MU_SINGLE);
    }

    #[test]
    fn test_leg_local_override() {
        let legs = parse("HLT_mu20_mu8noL1_L1MU15", "L1_MU20");
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].l1seed(), "MU20");
        assert_eq!(legs[1].l1seed(), "MU15");
        assert_eq!(legs[1].details(), ["noL1"]);
    }

    #[test]
    fn test_second_override_is_fatal() {
        let diag = RecordingDiagnostics::new();
        let err = parse_legs("HLT_mu20_L1MU15_L1MU10", "L1_MU20", &diag).unwrap_err();
        assert!(matches!(err, TriggerError::MultipleL1Overrides { .. }));
    }

    #[test]
    fn test_unparseable_is_soft() {
        let diag = RecordingDiagnostics::new();
        let legs = parse_legs("HLT_noalg_L1J400", "L1_J400", &diag).unwrap();
        assert!(legs.is_empty());
        assert_eq!(
            diag.events(),
            vec![DiagnosticEvent::UnparseableChain {
                name: "HLT_noalg_L1J400".into()
            }]
        );
    }

    #[test]
    fn test_bjet_promotion() {
        let legs = parse("HLT_2j35_bmv2c1060_split_2j35_boffperf_split", "L1_4J15");
        assert_eq!(legs[0].legtype(), TriggerType::BJ_MULTI);
        assert_eq!(legs[1].legtype(), TriggerType::J_MULTI);
    }

    #[test]
    fn test_bphys_override() {
        let legs = parse("HLT_2mu6_bJpsimumu", "L1_2MU6");
        assert_eq!(legs[0].legtype(), TriggerType::MU_BPHYS);
        assert_eq!(legs[0].count(), 2);
    }

    #[test]
    fn test_bphys_keyword_forces_bphys_on_any_leg() {
        let legs = parse("HLT_2e5_lhvloose_nod0_bBeexM6000t", "L1_2EM3");
        assert_eq!(legs[0].legtype(), TriggerType::MU_BPHYS);
        assert_eq!(legs[0].count(), 2);

        let legs = parse("HLT_e5_bJpsi", "L1_EM3");
        assert_eq!(legs[0].legtype(), TriggerType::MU_BPHYS);
    }

    #[test]
    fn test_count_out_of_range_is_soft() {
        for name in ["HLT_99999999999mu4", "HLT_100000000mu4", "HLT_mu20_33mu4"] {
            let diag = RecordingDiagnostics::new();
            let legs = parse_legs(name, "L1_MU20", &diag).unwrap();
            assert!(legs.is_empty(), "{name}");
            assert!(
                matches!(diag.events()[..], [DiagnosticEvent::MalformedLeg { .. }]),
                "{name}"
            );
        }
    }

    #[test]
    fn test_threshold_out_of_range_is_soft() {
        let diag = RecordingDiagnostics::new();
        let legs = parse_legs("HLT_mu99999999999999999999", "L1_MU20", &diag).unwrap();
        assert!(legs.is_empty());
        assert_eq!(
            diag.events(),
            vec![DiagnosticEvent::MalformedLeg {
                chain: "HLT_mu99999999999999999999".into(),
                leg: "mu99999999999999999999".into(),
            }]
        );
        assert!(TriggerLeg::parse("mu99999999999999999999", "", &diag)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_largest_multiplicity_accepted() {
        let legs = parse("HLT_32j20", "L1_4J15");
        assert_eq!(legs[0].count(), MAX_MULTIPLICITY);
    }

    #[test]
    fn test_exotics_and_afp() {
        let legs = parse("HLT_j30_muvtx", "L1_MU6");
        assert_eq!(legs[0].legtype(), TriggerType::EXOTICS);

        let legs = parse("HLT_j20_L1AFP_A_AND_C", "L1_MBTS_1");
        assert_eq!(legs[0].legtype(), TriggerType::AFP);
        assert_eq!(legs[0].l1seed(), "AFP_A_AND_C");

        let legs = parse("HLT_mu20_LATE_L1LATE-MU10_XE40", "L1_LATE-MU10_XE40");
        assert_eq!(legs[0].legtype(), TriggerType::EXOTICS);
    }

    #[test]
    fn test_no_l1_head_suffix() {
        let legs = parse("HLT_mu4noL1", "");
        assert_eq!(legs[0].thr(), 4);
        assert_eq!(legs[0].details(), ["noL1"]);
    }

    #[test]
    fn test_seed_list_prefixes_stripped() {
        assert_eq!(strip_l1_prefix("L1_MU20,L1_MU21"), "MU20,MU21");
        assert_eq!(strip_l1_prefix("EM22VHI"), "EM22VHI");
    }

    #[test]
    fn test_parse_rejects_multiple_legs() {
        let diag = RecordingDiagnostics::new();
        assert!(TriggerLeg::parse("e17_mu14", "", &diag).unwrap().is_none());
        assert!(diag.is_empty());
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let a = parse("HLT_e17_lhloose_nod0_mu14_L1EM15VH_MU10", "L1_EM15VH_MU10");
        let b = parse("HLT_e17_lhloose_nod0_mu14_L1EM15VH_MU10", "L1_EM15VH_MU10");
        assert_eq!(a, b);
    }
}
