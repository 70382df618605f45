//! Leg-level dominance comparison.
//!
//! All comparisons answer "which side is the looser selection". A side is
//! *lower* when its cuts are a loosening of the other side's: smaller
//! thresholds, looser identification working points, fewer requirements.

use super::types::TriggerLeg;
use regex::Regex;
use std::sync::LazyLock;

/// Cuts where a numerically smaller value is the tighter selection.
///
/// A `-` is inserted after each name so the following number tokenizes as
/// negative and the ordering flips.
pub const INVERSE_CUTS: [&str; 7] = ["mv2c", "dr", "dz", "dphi", "dl1d", "dl1r", "gn1"];

/// Textual working points, loosest first.
pub const LADDER: [&str; 4] = ["vloose", "loose", "medium", "tight"];

static TAG_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:-?\d+)|(?:[^0-9 -]+)").expect("tag token pattern is valid"));

/// Four-valued result of comparing two legs or two tag strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// Same selection.
    Identical,
    /// The first argument is the looser selection.
    ALower,
    /// The second argument is the looser selection.
    BLower,
    /// No dominance relation.
    Incomparable,
}

impl Comparison {
    /// Integer code used by existing menu tooling:
    /// `-1` identical, `1` first lower, `0` second lower, `-9` incomparable.
    pub fn legacy_code(self) -> i32 {
        match self {
            Self::Identical => -1,
            Self::ALower => 1,
            Self::BLower => 0,
            Self::Incomparable => -9,
        }
    }

    /// Inverse of [`legacy_code`](Self::legacy_code).
    pub fn from_legacy_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Identical),
            1 => Some(Self::ALower),
            0 => Some(Self::BLower),
            -9 => Some(Self::Incomparable),
            _ => None,
        }
    }

    /// The same result seen with the arguments swapped.
    pub fn reverse(self) -> Self {
        match self {
            Self::ALower => Self::BLower,
            Self::BLower => Self::ALower,
            other => other,
        }
    }

    /// Merges two partial results about the same pair.
    ///
    /// `Identical` is neutral; opposite directions or any `Incomparable`
    /// give `Incomparable`.
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Incomparable, _) | (_, Self::Incomparable) => Self::Incomparable,
            (Self::Identical, x) | (x, Self::Identical) => x,
            (a, b) if a == b => a,
            _ => Self::Incomparable,
        }
    }

    fn from_ordering(ord: std::cmp::Ordering) -> Self {
        match ord {
            std::cmp::Ordering::Less => Self::ALower,
            std::cmp::Ordering::Greater => Self::BLower,
            std::cmp::Ordering::Equal => Self::Identical,
        }
    }
}

fn invert_cuts(tag: &str) -> String {
    INVERSE_CUTS
        .iter()
        .fold(tag.to_string(), |acc, cut| acc.replace(cut, &format!("{cut}-")))
}

/// Compares two rung-swapped words, e.g. `lhmedium` against `lhtight`.
fn ladder_compare(x: &str, y: &str) -> Option<Comparison> {
    for (rx, rung_x) in LADDER.iter().enumerate() {
        for (pos, _) in x.match_indices(rung_x) {
            let prefix = &x[..pos];
            let suffix = &x[pos + rung_x.len()..];
            for (ry, rung_y) in LADDER.iter().enumerate() {
                if rx == ry || y.len() != prefix.len() + rung_y.len() + suffix.len() {
                    continue;
                }
                if y.starts_with(prefix) && y[prefix.len()..].starts_with(rung_y) && y.ends_with(suffix)
                {
                    return Some(Comparison::from_ordering(rx.cmp(&ry)));
                }
            }
        }
    }
    None
}

fn compare_token(x: &str, y: &str, string_subset: bool) -> Comparison {
    if let (Ok(a), Ok(b)) = (x.parse::<i64>(), y.parse::<i64>()) {
        return Comparison::from_ordering(a.cmp(&b));
    }
    if x == y {
        return Comparison::Identical;
    }
    if let Some(result) = ladder_compare(x, y) {
        return result;
    }
    if string_subset {
        if y.contains(x) {
            return Comparison::ALower;
        }
        if x.contains(y) {
            return Comparison::BLower;
        }
    }
    Comparison::Incomparable
}

/// Compares two tag strings token by token.
///
/// Numbers compare by value, words by the [`LADDER`], and with
/// `string_subset` a word contained in the other is the looser one. Any
/// incomparable token pair, a token-count mismatch or tokens pointing in
/// both directions make the whole result [`Comparison::Incomparable`].
///
/// ```
/// use trigger_api::leg::{compare_tags, Comparison};
///
/// assert_eq!(compare_tags("medium", "tight", false), Comparison::ALower);
/// assert_eq!(compare_tags("EM22VHI", "EM24VHI", true), Comparison::ALower);
/// assert_eq!(compare_tags("bmv2c1070", "bmv2c1077", false), Comparison::BLower);
/// ```
pub fn compare_tags(tag_a: &str, tag_b: &str, string_subset: bool) -> Comparison {
    let a = invert_cuts(tag_a);
    let b = invert_cuts(tag_b);
    let tokens_a: Vec<&str> = TAG_TOKEN.find_iter(&a).map(|m| m.as_str()).collect();
    let tokens_b: Vec<&str> = TAG_TOKEN.find_iter(&b).map(|m| m.as_str()).collect();
    if tokens_a.len() != tokens_b.len() {
        return Comparison::Incomparable;
    }

    let mut result = Comparison::Identical;
    for (x, y) in tokens_a.iter().zip(tokens_b.iter()) {
        result = result.combine(compare_token(x, y, string_subset));
        if result == Comparison::Incomparable {
            break;
        }
    }
    result
}

/// Optional detail markers that may be present on only one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    /// `noL1` / `nod0`: the side carrying it is looser.
    Loosening,
    /// `cut*`: the side carrying it is tighter.
    Tightening,
}

fn find_marker(details: &[String], is2015: bool) -> Option<(usize, Marker)> {
    let no_l1 = if is2015 {
        None
    } else {
        details.iter().position(|d| d == "noL1")
    };
    no_l1
        .or_else(|| details.iter().position(|d| d == "nod0"))
        .map(|idx| (idx, Marker::Loosening))
        .or_else(|| {
            details
                .iter()
                .position(|d| d.starts_with("cut"))
                .map(|idx| (idx, Marker::Tightening))
        })
}

fn compare_detail_lists(
    details_a: &[String],
    seed_a: &str,
    details_b: &[String],
    seed_b: &str,
    is2015: bool,
) -> Comparison {
    if details_a.len() == details_b.len() + 1 {
        return strip_marker(details_a, seed_a, details_b, seed_b, is2015);
    }
    if details_b.len() == details_a.len() + 1 {
        return strip_marker(details_b, seed_b, details_a, seed_a, is2015).reverse();
    }
    if details_a.len() != details_b.len() {
        return Comparison::Incomparable;
    }

    let l1 = compare_tags(seed_a, seed_b, true);
    let detail = compare_tags(&details_a.join(" "), &details_b.join(" "), false);
    l1.combine(detail)
}

/// Result is relative to `(longer, shorter)`.
fn strip_marker(
    longer: &[String],
    seed_longer: &str,
    shorter: &[String],
    seed_shorter: &str,
    is2015: bool,
) -> Comparison {
    let Some((idx, marker)) = find_marker(longer, is2015) else {
        return Comparison::Incomparable;
    };
    let mut stripped = longer.to_vec();
    stripped.remove(idx);
    let inner = compare_detail_lists(&stripped, seed_longer, shorter, seed_shorter, is2015);

    match (marker, inner) {
        (Marker::Loosening, Comparison::Identical | Comparison::ALower) => Comparison::ALower,
        (Marker::Tightening, Comparison::Identical | Comparison::BLower) => Comparison::BLower,
        _ => Comparison::Incomparable,
    }
}

/// Compares the qualifier lists and L1 seeds of two legs.
///
/// A single extra `noL1` (outside 2015), `nod0` or `cut*` token on one side
/// is stripped and the remainder compared; the marker then fixes which
/// side may be lower. Otherwise seeds and joined details are compared with
/// [`compare_tags`] and must agree.
pub fn compare_details(leg_a: &TriggerLeg, leg_b: &TriggerLeg, is2015: bool) -> Comparison {
    compare_detail_lists(
        leg_a.details(),
        leg_a.l1seed(),
        leg_b.details(),
        leg_b.l1seed(),
        is2015,
    )
}

/// Compares two legs of the same category.
///
/// With identical details and seeds only the threshold decides. Otherwise
/// the details direction holds unless the threshold order contradicts it.
pub fn is_leg_lower_than(leg_a: &TriggerLeg, leg_b: &TriggerLeg, is2015: bool) -> Comparison {
    if leg_a.legtype() != leg_b.legtype() || leg_a.count() != leg_b.count() {
        return Comparison::Incomparable;
    }

    let by_thr = Comparison::from_ordering(leg_a.thr().cmp(&leg_b.thr()));
    if leg_a.details() == leg_b.details() && leg_a.l1seed() == leg_b.l1seed() {
        return by_thr;
    }

    match compare_details(leg_a, leg_b, is2015) {
        Comparison::Identical => by_thr,
        Comparison::Incomparable => Comparison::Incomparable,
        direction if by_thr == direction.reverse() => Comparison::Incomparable,
        direction => direction,
    }
}
