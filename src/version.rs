//! Title identifiers
//!
//! A `GameVersion` names the title a snapshot was taken from. Its short name
//! is what the host reports and what report artifact names are built from
//! (e.g. `checklist_FRLG.txt`).

use std::fmt;

macro_rules! game_versions {
    ($($variant:ident),+ $(,)?) => {
        /// Title identifier as reported by the host
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum GameVersion {
            $($variant,)+
        }

        impl GameVersion {
            /// Every known title identifier
            pub const ALL: &'static [GameVersion] = &[$(GameVersion::$variant,)+];

            /// Short name of the title (e.g. "HGSS")
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(GameVersion::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

game_versions! {
    Any, Unknown, Invalid,
    RBY, StadiumJ, Stadium, Stadium2, RSBOX, COLO, XD, CXD, BATREV, ORASDEMO, GO,
    RD, GN, RB, YW,
    GD, SI, GS, C,
    R, S, RS, FR, LG, FRLG, E,
    D, P, DP, Pt, HG, SS, HGSS,
    B, W, BW, B2, W2, B2W2,
    X, Y, XY, OR, AS, ORAS,
    SN, MN, SM, US, UM, USUM, GP, GE, GG,
    BD, SP, BDSP, SW, SH, SWSH, PLA, SL, VL, SV,
}

impl GameVersion {
    /// Look up a title by its short name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
