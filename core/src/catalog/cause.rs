//! Kill and death causes.
//!
//! Catalog files name causes with upper-case tokens, either spelled out
//! (`ROCKET_LAUNCHER`) or in the short weapon-class form (`RL`). Both resolve
//! through a static alias table so an unknown cause fails at load time
//! instead of surfacing as a stray statistic key in a report.

use phf::phf_map;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cause {
    Axe,
    Shotgun,
    SuperShotgun,
    Nailgun,
    SuperNailgun,
    GrenadeLauncher,
    RocketLauncher,
    LightningGun,
    Grapple,
    Discharge,
    Drown,
    Lava,
    Slime,
    Fall,
    Squish,
    Trap,
    Telefrag,
    Stomp,
    /// Bucket for catalog entries that name no cause
    Unspecified,
}

static CAUSE_ALIASES: phf::Map<&'static str, Cause> = phf_map! {
    "AXE" => Cause::Axe,
    "SG" => Cause::Shotgun,
    "SHOTGUN" => Cause::Shotgun,
    "SSG" => Cause::SuperShotgun,
    "SUPER_SHOTGUN" => Cause::SuperShotgun,
    "NG" => Cause::Nailgun,
    "NAILGUN" => Cause::Nailgun,
    "SNG" => Cause::SuperNailgun,
    "SUPER_NAILGUN" => Cause::SuperNailgun,
    "GL" => Cause::GrenadeLauncher,
    "GRENADE_LAUNCHER" => Cause::GrenadeLauncher,
    "RL" => Cause::RocketLauncher,
    "ROCKET_LAUNCHER" => Cause::RocketLauncher,
    "LG" => Cause::LightningGun,
    "LIGHTNING_GUN" => Cause::LightningGun,
    "HOOK" => Cause::Grapple,
    "GRAPPLE" => Cause::Grapple,
    "DISCHARGE" => Cause::Discharge,
    "DROWN" => Cause::Drown,
    "LAVA" => Cause::Lava,
    "SLIME" => Cause::Slime,
    "FALL" => Cause::Fall,
    "SQUISH" => Cause::Squish,
    "TRAP" => Cause::Trap,
    "TELEFRAG" => Cause::Telefrag,
    "STOMP" => Cause::Stomp,
    "STOMPS" => Cause::Stomp,
};

impl Cause {
    /// Weapons reported individually in session summaries, in display order.
    pub const WEAPONS: [Cause; 8] = [
        Cause::Axe,
        Cause::Shotgun,
        Cause::SuperShotgun,
        Cause::Nailgun,
        Cause::SuperNailgun,
        Cause::GrenadeLauncher,
        Cause::RocketLauncher,
        Cause::LightningGun,
    ];

    /// Resolve a catalog token. Case-insensitive; `-` and `_` are interchangeable.
    pub fn from_token(token: &str) -> Option<Cause> {
        let normalized = token.to_ascii_uppercase().replace('-', "_");
        CAUSE_ALIASES.get(normalized.as_str()).copied()
    }

    /// Statistic key fragment, e.g. `rocket-launcher` in `kills-rocket-launcher`.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Axe => "axe",
            Self::Shotgun => "shotgun",
            Self::SuperShotgun => "super-shotgun",
            Self::Nailgun => "nailgun",
            Self::SuperNailgun => "super-nailgun",
            Self::GrenadeLauncher => "grenade-launcher",
            Self::RocketLauncher => "rocket-launcher",
            Self::LightningGun => "lightning-gun",
            Self::Grapple => "grapple",
            Self::Discharge => "discharge",
            Self::Drown => "drown",
            Self::Lava => "lava",
            Self::Slime => "slime",
            Self::Fall => "fall",
            Self::Squish => "squish",
            Self::Trap => "trap",
            Self::Telefrag => "telefrag",
            Self::Stomp => "stomp",
            Self::Unspecified => "unspecified",
        }
    }

    /// Short weapon name used in summary records (`rl`, `lg`, ...).
    pub const fn short_name(&self) -> Option<&'static str> {
        match self {
            Self::Axe => Some("axe"),
            Self::Shotgun => Some("sg"),
            Self::SuperShotgun => Some("ssg"),
            Self::Nailgun => Some("ng"),
            Self::SuperNailgun => Some("sng"),
            Self::GrenadeLauncher => Some("gl"),
            Self::RocketLauncher => Some("rl"),
            Self::LightningGun => Some("lg"),
            _ => None,
        }
    }

    /// Weapons whose non-quad frag by the quad owner means the quad ran out.
    pub const fn is_high_tier(&self) -> bool {
        matches!(self, Self::RocketLauncher | Self::LightningGun)
    }
}

impl std::fmt::Display for Cause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
