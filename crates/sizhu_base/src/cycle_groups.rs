//! Fixed branch groupings used by marker rules.
//!
//! - Triad (三合) groups: four 3-branch harmony groups, each represented by
//!   its cardinal (middle) branch.
//! - Seasonal (三会) groups: four runs of three consecutive branches.
//! - Xunkong (旬空): the two branches left over by each 10-pillar decade of
//!   the 60-cycle.

use crate::pillar::Pillar;
use crate::symbols::Branch;

/// Triad groups, keyed by representative and ordered by `index mod 4`:
/// Shen-Zi-Chen (Zi), Si-You-Chou (You), Yin-Wu-Xu (Wu), Hai-Mao-Wei (Mao).
pub const TRIADS: [(Branch, [Branch; 3]); 4] = [
    (Branch::Zi, [Branch::Shen, Branch::Zi, Branch::Chen]),
    (Branch::You, [Branch::Si, Branch::You, Branch::Chou]),
    (Branch::Wu, [Branch::Yin, Branch::Wu, Branch::Xu]),
    (Branch::Mao, [Branch::Hai, Branch::Mao, Branch::Wei]),
];

/// Representative of the triad group containing `branch`.
///
/// The triads partition the 12 branches by `index mod 4`.
pub const fn triad_of(branch: Branch) -> Branch {
    TRIADS[(branch.index() % 4) as usize].0
}

/// The three members of the triad containing `branch`.
pub const fn triad_members(branch: Branch) -> [Branch; 3] {
    TRIADS[(branch.index() % 4) as usize].1
}

/// Seasonal groups: Yin-Mao-Chen (spring), Si-Wu-Wei (summer),
/// Shen-You-Xu (autumn), Hai-Zi-Chou (winter).
pub const fn season_members(branch: Branch) -> [Branch; 3] {
    // Shift so Yin starts a group, then take the run of three.
    let start = (branch.index() as i64 - 2).rem_euclid(12) / 3 * 3 + 2;
    [
        Branch::from_index(start),
        Branch::from_index(start + 1),
        Branch::from_index(start + 2),
    ]
}

/// Decade (旬) of a pillar within the 60-cycle: 0 = Jia-Zi decade,
/// 1 = Jia-Xu, 2 = Jia-Shen, 3 = Jia-Wu, 4 = Jia-Chen, 5 = Jia-Yin.
pub const fn decade_of(pillar: Pillar) -> u8 {
    ((pillar.stem.index() as i16 - pillar.branch.index() as i16).rem_euclid(12) / 2) as u8
}

/// Empty branches per decade.
pub const EMPTY_BRANCHES: [[Branch; 2]; 6] = [
    [Branch::Xu, Branch::Hai],
    [Branch::Shen, Branch::You],
    [Branch::Wu, Branch::Wei],
    [Branch::Chen, Branch::Si],
    [Branch::Yin, Branch::Mao],
    [Branch::Zi, Branch::Chou],
];

/// The two empty branches of the decade containing `pillar`.
pub const fn empty_branches(pillar: Pillar) -> [Branch; 2] {
    EMPTY_BRANCHES[decade_of(pillar) as usize]
}
