//! Chain category from legs and L1 seed.
//!
//! Legs are folded into an accumulator with [`TriggerType::promote`] and the
//! override helpers; afterwards the L1 seed is scanned for signatures that
//! are only required at L1 (a jet or muon item under an electron chain,
//! missing energy, HT).

use crate::flags::TriggerType;
use crate::leg::{strip_l1_prefix, TriggerLeg};
use regex::Regex;
use std::sync::LazyLock;

static L1_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d*)(EM|J|MU|TAU|XE|XS|HT)(\d+)").expect("L1 item pattern is valid")
});

/// Aggregate category of a chain.
pub fn classify_chain(legs: &[TriggerLeg], l1seed: &str) -> TriggerType {
    rescan_l1(fold_legs(legs), l1seed)
}

/// Folds leg categories into a chain category.
///
/// Two legs of one family make the chain multi. `MU_BPHYS` clears and
/// blocks the muon bits, `EXOTICS` is kept once seen, and `AFP` replaces
/// everything and ends the fold.
pub fn fold_legs(legs: &[TriggerLeg]) -> TriggerType {
    let mut acc = TriggerType::UNDEFINED;
    for leg in legs {
        if acc.contains(TriggerType::AFP) {
            break;
        }
        let legtype = leg.legtype();
        acc = if legtype == TriggerType::AFP {
            acc.with_afp()
        } else if legtype == TriggerType::EXOTICS {
            acc.with_exotics()
        } else if legtype == TriggerType::MU_BPHYS {
            acc.with_bphys()
        } else if legtype.intersects(TriggerType::MU) && acc.contains(TriggerType::MU_BPHYS) {
            acc
        } else {
            acc.promote(legtype)
        };
    }
    acc
}

/// Adds bits for signatures requested only at L1.
///
/// Exotics and AFP chains are returned unchanged. `EM` and `TAU` items add
/// nothing. An L1 muon is ignored for b-physics chains, and an L1 jet is
/// ignored when the HLT already asks for jets, b-jets, taus or HT.
pub fn rescan_l1(acc: TriggerType, l1seed: &str) -> TriggerType {
    if acc.is_special() {
        return acc;
    }

    let seed = strip_l1_prefix(l1seed);
    let mut acc = acc;
    for token in seed.split('_') {
        let Some(caps) = L1_ITEM.captures(token) else {
            continue;
        };
        let count = caps[1].parse::<u32>().unwrap_or(1);
        match &caps[2] {
            "MU" => {
                if !acc.contains(TriggerType::MU_BPHYS) {
                    acc |= l1_object(acc, count, TriggerType::MU_SINGLE);
                }
            }
            "J" => {
                let hlt_jets =
                    TriggerType::BJ | TriggerType::J | TriggerType::TAU | TriggerType::HT;
                if !acc.intersects(hlt_jets) {
                    acc |= l1_object(acc, count, TriggerType::J_SINGLE);
                }
            }
            "XE" | "XS" => acc |= TriggerType::XE,
            "HT" => acc |= TriggerType::HT,
            _ => {}
        }
    }
    acc
}

/// Single or multi bit for an L1 item; a family already multi stays multi.
fn l1_object(acc: TriggerType, count: u32, single: TriggerType) -> TriggerType {
    let multi = single.to_multi();
    if count > 1 {
        multi
    } else if acc.contains(multi) {
        TriggerType::UNDEFINED
    } else {
        single
    }
}
