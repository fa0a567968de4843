//! Built-in title families
//!
//! Adding a title is one entry here: point it at its definition table (or a
//! synthesizer) and the registry picks it up.

use super::{DummyFactory, TitleProfile};
use crate::version::GameVersion;

const PROFILES: &[TitleProfile] = &[
    // Gen 1
    TitleProfile::dense(
        "gen1_rb",
        &[GameVersion::RD, GameVersion::GN, GameVersion::RB],
        "chkdb_gen1rb.txt",
    ),
    TitleProfile::dense("gen1_y", &[GameVersion::YW], "chkdb_gen1y.txt"),
    // Gen 2
    TitleProfile::dense(
        "gen2_gs",
        &[GameVersion::GD, GameVersion::SI, GameVersion::GS],
        "chkdb_gen2gs.txt",
    ),
    TitleProfile::dense("gen2_c", &[GameVersion::C], "chkdb_gen2c.txt"),
    // Gen 3
    TitleProfile::dense(
        "gen3_rs",
        &[GameVersion::R, GameVersion::S, GameVersion::RS],
        "chkdb_gen3rs.txt",
    ),
    TitleProfile::dense(
        "gen3_frlg",
        &[GameVersion::FR, GameVersion::LG, GameVersion::FRLG],
        "chkdb_gen3frlg.txt",
    ),
    TitleProfile::dense("gen3_e", &[GameVersion::E], "chkdb_gen3e.txt"),
    // Gen 4
    TitleProfile::dense(
        "gen4_dp",
        &[GameVersion::D, GameVersion::P, GameVersion::DP],
        "chkdb_gen4dp.txt",
    ),
    TitleProfile::dense("gen4_pt", &[GameVersion::Pt], "chkdb_gen4pt.txt"),
    TitleProfile::dense(
        "gen4_hgss",
        &[GameVersion::HG, GameVersion::SS, GameVersion::HGSS],
        "chkdb_gen4hgss.txt",
    ),
    // Gen 5
    TitleProfile::dense(
        "gen5_bw",
        &[GameVersion::B, GameVersion::W, GameVersion::BW],
        "chkdb_gen5bw.txt",
    ),
    TitleProfile::dense(
        "gen5_b2w2",
        &[GameVersion::B2, GameVersion::W2, GameVersion::B2W2],
        "chkdb_gen5b2w2.txt",
    ),
    // Gen 6
    TitleProfile::dense(
        "gen6_xy",
        &[GameVersion::X, GameVersion::Y, GameVersion::XY],
        "chkdb_gen6xy.txt",
    ),
    TitleProfile::dense(
        "gen6_oras",
        &[GameVersion::OR, GameVersion::AS, GameVersion::ORAS],
        "chkdb_gen6oras.txt",
    ),
    // Gen 7
    TitleProfile::dense(
        "gen7_sm",
        &[GameVersion::SN, GameVersion::MN, GameVersion::SM],
        "chkdb_gen7sm.txt",
    ),
    TitleProfile::dense(
        "gen7_usum",
        &[GameVersion::US, GameVersion::UM, GameVersion::USUM],
        "chkdb_gen7usum.txt",
    ),
    TitleProfile::dense(
        "gen7b_gpge",
        &[GameVersion::GP, GameVersion::GE, GameVersion::GG],
        "chkdb_gen7bgpge.txt",
    ),
    // Gen 8
    TitleProfile::dense(
        "gen8bs_bdsp",
        &[GameVersion::BD, GameVersion::SP, GameVersion::BDSP],
        "chkdb_gen8bsbdsp.txt",
    ),
    TitleProfile::keyed("gen8_la", &[GameVersion::PLA], "chkdb_gen8la.txt"),
];

// Block-store titles without an authored checklist
const DUMMIES: &[DummyFactory] = &[DummyFactory::keyed(
    "block_flags",
    &[
        GameVersion::SW,
        GameVersion::SH,
        GameVersion::SWSH,
        GameVersion::SL,
        GameVersion::VL,
        GameVersion::SV,
    ],
)];

/// Titles with no known storage layout
pub const UNSUPPORTED_TITLES: &[GameVersion] = &[
    GameVersion::Any,
    GameVersion::RBY,
    GameVersion::StadiumJ,
    GameVersion::Stadium,
    GameVersion::Stadium2,
    GameVersion::RSBOX,
    GameVersion::COLO,
    GameVersion::XD,
    GameVersion::CXD,
    GameVersion::BATREV,
    GameVersion::ORASDEMO,
    GameVersion::GO,
    GameVersion::Unknown,
    GameVersion::Invalid,
];

/// Built-in table-driven families
pub fn builtin_profiles() -> &'static [TitleProfile] {
    PROFILES
}

/// Built-in placeholder families
pub(crate) fn builtin_dummies() -> &'static [DummyFactory] {
    DUMMIES
}
