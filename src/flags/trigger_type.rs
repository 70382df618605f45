//! Physics-object category flags.
//!
//! A leg carries exactly one base bit; a chain carries the union of its
//! legs' bits after promotion and overrides. The bit order defines the
//! canonical leg order inside a chain.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Category flag set for legs and chains.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct TriggerType: u32 {
        const UNDEFINED = 0;

        const EL_SINGLE = 1 << 0;
        const EL_MULTI = 1 << 1;
        const MU_SINGLE = 1 << 2;
        const MU_MULTI = 1 << 3;
        const J_SINGLE = 1 << 4;
        const J_MULTI = 1 << 5;
        const BJ_SINGLE = 1 << 6;
        const BJ_MULTI = 1 << 7;
        const TAU_SINGLE = 1 << 8;
        const TAU_MULTI = 1 << 9;
        const G_SINGLE = 1 << 10;
        const G_MULTI = 1 << 11;
        const XE = 1 << 12;
        const HT = 1 << 13;
        const MU_BPHYS = 1 << 14;
        const EXOTICS = 1 << 15;
        const AFP = 1 << 16;

        const EL = Self::EL_SINGLE.bits() | Self::EL_MULTI.bits();
        const MU = Self::MU_SINGLE.bits() | Self::MU_MULTI.bits();
        const J = Self::J_SINGLE.bits() | Self::J_MULTI.bits();
        const BJ = Self::BJ_SINGLE.bits() | Self::BJ_MULTI.bits();
        const TAU = Self::TAU_SINGLE.bits() | Self::TAU_MULTI.bits();
        const G = Self::G_SINGLE.bits() | Self::G_MULTI.bits();

        const ALL = Self::EL.bits()
            | Self::MU.bits()
            | Self::J.bits()
            | Self::BJ.bits()
            | Self::TAU.bits()
            | Self::G.bits()
            | Self::XE.bits()
            | Self::HT.bits()
            | Self::MU_BPHYS.bits()
            | Self::EXOTICS.bits()
            | Self::AFP.bits();
    }
}

/// Families that distinguish single- from multi-object selections.
const FAMILIES: [TriggerType; 6] = [
    TriggerType::EL,
    TriggerType::MU,
    TriggerType::J,
    TriggerType::BJ,
    TriggerType::TAU,
    TriggerType::G,
];

/// HLT leg head tokens and the single-object type each one opens.
///
/// The leg head pattern is built from this table.
pub const LEG_TOKENS: [(&str, TriggerType); 7] = [
    ("e", TriggerType::EL_SINGLE),
    ("j", TriggerType::J_SINGLE),
    ("mu", TriggerType::MU_SINGLE),
    ("tau", TriggerType::TAU_SINGLE),
    ("xe", TriggerType::XE),
    ("g", TriggerType::G_SINGLE),
    ("ht", TriggerType::HT),
];

/// Names of every base bit, in bit order, followed by the aggregates.
const NAMES: [(&str, TriggerType); 24] = [
    ("el_single", TriggerType::EL_SINGLE),
    ("el_multi", TriggerType::EL_MULTI),
    ("mu_single", TriggerType::MU_SINGLE),
    ("mu_multi", TriggerType::MU_MULTI),
    ("j_single", TriggerType::J_SINGLE),
    ("j_multi", TriggerType::J_MULTI),
    ("bj_single", TriggerType::BJ_SINGLE),
    ("bj_multi", TriggerType::BJ_MULTI),
    ("tau_single", TriggerType::TAU_SINGLE),
    ("tau_multi", TriggerType::TAU_MULTI),
    ("g_single", TriggerType::G_SINGLE),
    ("g_multi", TriggerType::G_MULTI),
    ("xe", TriggerType::XE),
    ("ht", TriggerType::HT),
    ("mu_bphys", TriggerType::MU_BPHYS),
    ("exotics", TriggerType::EXOTICS),
    ("afp", TriggerType::AFP),
    ("el", TriggerType::EL),
    ("mu", TriggerType::MU),
    ("j", TriggerType::J),
    ("bj", TriggerType::BJ),
    ("tau", TriggerType::TAU),
    ("g", TriggerType::G),
    ("ALL", TriggerType::ALL),
];

impl TriggerType {
    /// Leg category for an HLT leg head token (`e`, `mu`, `j`, ...).
    ///
    /// `count > 1` selects the multi bit of the family. Returns `None` for
    /// tokens outside [`LEG_TOKENS`].
    pub fn for_leg_token(token: &str, count: u32) -> Option<Self> {
        let single = LEG_TOKENS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, ty)| *ty)?;
        Some(if count > 1 { single.to_multi() } else { single })
    }

    /// The single/multi family this type belongs to, if any.
    pub fn family(self) -> Option<Self> {
        FAMILIES
            .iter()
            .copied()
            .find(|f| !self.is_empty() && f.contains(self))
    }

    /// Maps a multi bit to the single bit of its family; other types are
    /// returned unchanged.
    pub fn to_single(self) -> Self {
        match self.family() {
            Some(f) if self == f - Self::singles() => f & Self::singles(),
            _ => self,
        }
    }

    /// Maps a single bit to the multi bit of its family; other types are
    /// returned unchanged.
    pub fn to_multi(self) -> Self {
        match self.family() {
            Some(f) if self == f & Self::singles() => f - Self::singles(),
            _ => self,
        }
    }

    /// Turns a b-jet-tagged jet type into the matching b-jet type.
    pub fn to_bjet(self) -> Self {
        if self == Self::J_SINGLE {
            Self::BJ_SINGLE
        } else if self == Self::J_MULTI {
            Self::BJ_MULTI
        } else {
            self
        }
    }

    fn singles() -> Self {
        Self::EL_SINGLE
            | Self::MU_SINGLE
            | Self::J_SINGLE
            | Self::BJ_SINGLE
            | Self::TAU_SINGLE
            | Self::G_SINGLE
    }

    /// Adds a leg's bit to a chain accumulator.
    ///
    /// A second leg of a family already present turns the family's single
    /// bit into its multi bit, even when neither leg is multi on its own.
    pub fn promote(self, leg: Self) -> Self {
        match leg.family() {
            Some(family) if self.intersects(family) => {
                (self - family) | (family - Self::singles())
            }
            _ => self | leg,
        }
    }

    /// B-physics override: sets `MU_BPHYS` and clears both muon bits.
    pub fn with_bphys(self) -> Self {
        (self | Self::MU_BPHYS) - Self::MU
    }

    /// Exotics override: sticky, never cleared once set.
    pub fn with_exotics(self) -> Self {
        self | Self::EXOTICS
    }

    /// AFP override: replaces the whole accumulator.
    pub fn with_afp(self) -> Self {
        Self::AFP
    }

    /// Whether the type is exempt from cross-category bookkeeping
    /// (exotics or AFP).
    pub fn is_special(self) -> bool {
        self.intersects(Self::EXOTICS | Self::AFP)
    }

    /// Position of the lowest set bit; orders legs canonically.
    pub fn order_index(self) -> u32 {
        self.bits().trailing_zeros()
    }

    /// Human-readable name: an exact table name when one exists, otherwise
    /// the base names joined with `|`.
    pub fn name(self) -> String {
        if self.is_empty() {
            return "UNDEFINED".to_string();
        }
        if let Some((name, _)) = NAMES.iter().find(|(_, t)| *t == self) {
            return (*name).to_string();
        }
        NAMES[..17]
            .iter()
            .filter(|(_, t)| self.contains(*t))
            .map(|(n, _)| *n)
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Parses a name produced by [`name`](Self::name).
    pub fn parse_name(name: &str) -> Option<Self> {
        if name == "UNDEFINED" {
            return Some(Self::UNDEFINED);
        }
        name.split('|').try_fold(Self::UNDEFINED, |acc, part| {
            NAMES
                .iter()
                .find(|(n, _)| *n == part)
                .map(|(_, t)| acc | *t)
        })
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
