// src/group_fans.rs
//! Patterns formed between melds: groups of chows, groups of pungs, and the
//! mix of kongs and concealed pungs.

use crate::fan::{Fan, FanTable};
use crate::meld::Meld;
use crate::rule::ScoringRule;
use crate::tiles::{Tile, Wind};

fn same_suit(tiles: &[Tile]) -> bool {
    tiles.windows(2).all(|w| w[0].suit() == w[1].suit())
}

fn distinct_suits(tiles: &[Tile]) -> bool {
    tiles.iter().enumerate().all(|(i, a)| tiles[i + 1..].iter().all(|b| a.suit() != b.suit()))
}

/// Sorted ranks step by exactly `step`.
fn ranks_step_by(ranks: &[u8], step: u8) -> bool {
    ranks.windows(2).all(|w| w[1] == w[0] + step)
}

fn sorted_ranks(tiles: &[Tile]) -> Vec<u8> {
    let mut ranks: Vec<u8> = tiles.iter().map(|t| t.rank()).collect();
    ranks.sort_unstable();
    ranks
}

// --- Chows, each given by its middle tile ---

pub fn two_chows_fan(a: Tile, b: Tile) -> Option<Fan> {
    if a == b {
        return Some(Fan::PureDoubleChow);
    }
    if a.rank() == b.rank() {
        return Some(Fan::MixedDoubleChow);
    }
    if a.suit() == b.suit() {
        match a.rank().abs_diff(b.rank()) {
            3 => return Some(Fan::ShortStraight),
            6 => return Some(Fan::TwoTerminalChows),
            _ => {}
        }
    }
    None
}

pub fn three_chows_fan(mids: [Tile; 3]) -> Option<Fan> {
    let ranks = sorted_ranks(&mids);
    if distinct_suits(&mids) {
        if ranks_step_by(&ranks, 1) {
            return Some(Fan::MixedShiftedChows);
        }
        if ranks_step_by(&ranks, 0) {
            return Some(Fan::MixedTripleChow);
        }
        if ranks == [2, 5, 8] {
            return Some(Fan::MixedStraight);
        }
    } else if same_suit(&mids) {
        if ranks_step_by(&ranks, 1) || ranks_step_by(&ranks, 2) {
            return Some(Fan::PureShiftedChows);
        }
        if ranks == [2, 5, 8] {
            return Some(Fan::PureStraight);
        }
        if ranks_step_by(&ranks, 0) {
            return Some(Fan::PureTripleChow);
        }
    }
    None
}

pub fn four_chows_fan(mids: [Tile; 4]) -> Option<Fan> {
    if !same_suit(&mids) {
        return None;
    }
    let ranks = sorted_ranks(&mids);
    if ranks_step_by(&ranks, 1) || ranks_step_by(&ranks, 2) {
        return Some(Fan::FourPureShiftedChows);
    }
    if ranks_step_by(&ranks, 0) {
        return Some(Fan::QuadrupleChow);
    }
    None
}

/// 123 and 789 in two suits with a pair of 5 in the third.
fn is_three_suited_terminal_chows(mids: &[Tile; 4], pair: Tile) -> bool {
    if !pair.is_numbered() || pair.rank() != 5 {
        return false;
    }
    let mut lows: Vec<Tile> = mids.iter().copied().filter(|m| m.rank() == 2).collect();
    let mut highs: Vec<Tile> = mids.iter().copied().filter(|m| m.rank() == 8).collect();
    if lows.len() != 2 || highs.len() != 2 {
        return false;
    }
    lows.sort_unstable_by_key(|t| t.suit());
    highs.sort_unstable_by_key(|t| t.suit());
    lows.iter().zip(&highs).all(|(l, h)| l.suit() == h.suit())
        && distinct_suits(&[lows[0], lows[1], pair])
}

/// 123, 123, 789, 789 and a pair of 5, all in one suit.
fn is_pure_terminal_chows(mids: &[Tile; 4], pair: Tile) -> bool {
    if !pair.is_numbered() || pair.rank() != 5 || !same_suit(&[mids[0], mids[1], mids[2], mids[3], pair]) {
        return false;
    }
    sorted_ranks(mids) == [2, 2, 8, 8]
}

/// Trims the pairwise chow patterns down to `max` occurrences: first every
/// kind to at most one, then to none, starting with Two Terminal Chows and
/// working down to Pure Double Chow.
fn exclusionary_rule(all: &[Option<Fan>], max: usize, fans: &mut FanTable) {
    const KINDS: [Fan; 4] = [
        Fan::PureDoubleChow,
        Fan::MixedDoubleChow,
        Fan::ShortStraight,
        Fan::TwoTerminalChows,
    ];
    let mut table = [0usize; 4];
    for fan in all.iter().flatten() {
        if let Some(i) = KINDS.iter().position(|k| k == fan) {
            table[i] += 1;
        }
    }
    let mut count: usize = table.iter().sum();

    for limit in [1, 0] {
        for i in (0..KINDS.len()).rev() {
            while table[i] > limit && count > max {
                table[i] -= 1;
                count -= 1;
            }
        }
    }

    for (fan, n) in KINDS.iter().zip(table) {
        fans[*fan] = n as u8;
    }
}

fn calculate_4_chows(mut mids: [Tile; 4], fans: &mut FanTable) {
    mids.sort_unstable();

    if let Some(fan) = four_chows_fan(mids) {
        fans.add(fan);
        return;
    }

    // A three-chow pattern, plus at most one more with the remaining chow
    const SUBSETS: [([usize; 3], usize); 4] = [
        ([0, 1, 2], 3),
        ([0, 1, 3], 2),
        ([0, 2, 3], 1),
        ([1, 2, 3], 0),
    ];
    for (subset, free) in SUBSETS {
        if let Some(fan) = three_chows_fan(subset.map(|i| mids[i])) {
            fans.add(fan);
            if let Some(extra) = subset.iter().find_map(|&i| two_chows_fan(mids[i], mids[free])) {
                fans.add(extra);
            }
            return;
        }
    }

    // Pairwise only: at most three, one fewer per chow that relates to nothing
    let pairs: Vec<(usize, usize)> = (0..4).flat_map(|i| (i + 1..4).map(move |j| (i, j))).collect();
    let all: Vec<Option<Fan>> = pairs.iter().map(|&(i, j)| two_chows_fan(mids[i], mids[j])).collect();
    let mut max = 3usize;
    for chow in 0..4 {
        let isolated = pairs
            .iter()
            .zip(&all)
            .filter(|((i, j), _)| *i == chow || *j == chow)
            .all(|(_, fan)| fan.is_none());
        if isolated {
            max = max.saturating_sub(1);
        }
    }
    if max > 0 {
        exclusionary_rule(&all, max, fans);
    }
}

fn calculate_3_chows(mut mids: [Tile; 3], fans: &mut FanTable) {
    mids.sort_unstable();
    if let Some(fan) = three_chows_fan(mids) {
        fans.add(fan);
        return;
    }
    let all = [
        two_chows_fan(mids[0], mids[1]),
        two_chows_fan(mids[0], mids[2]),
        two_chows_fan(mids[1], mids[2]),
    ];
    exclusionary_rule(&all, 2, fans);
}

fn calculate_2_chows(mids: [Tile; 2], fans: &mut FanTable) {
    if let Some(fan) = two_chows_fan(mids[0], mids[1]) {
        fans.add(fan);
    }
}

// --- Pungs and kongs, each given by its tile ---

pub fn two_pungs_fan(a: Tile, b: Tile) -> Option<Fan> {
    if a.is_numbered() && b.is_numbered() && a.rank() == b.rank() {
        return Some(Fan::DoublePung);
    }
    if a.is_dragon() && b.is_dragon() {
        return Some(Fan::TwoDragonsPungs);
    }
    None
}

pub fn three_pungs_fan(tiles: [Tile; 3]) -> Option<Fan> {
    if tiles.iter().all(|t| t.is_numbered()) {
        let ranks = sorted_ranks(&tiles);
        if distinct_suits(&tiles) {
            if ranks_step_by(&ranks, 1) {
                return Some(Fan::MixedShiftedPungs);
            }
            if ranks_step_by(&ranks, 0) {
                return Some(Fan::TriplePung);
            }
        } else if same_suit(&tiles) && ranks_step_by(&ranks, 1) {
            return Some(Fan::PureShiftedPungs);
        }
        return None;
    }
    if tiles.iter().all(|t| t.is_wind()) {
        return Some(Fan::BigThreeWinds);
    }
    if tiles.iter().all(|t| t.is_dragon()) {
        return Some(Fan::BigThreeDragons);
    }
    None
}

pub fn four_pungs_fan(tiles: [Tile; 4]) -> Option<Fan> {
    if tiles.iter().all(|t| t.is_numbered()) && same_suit(&tiles) && ranks_step_by(&sorted_ranks(&tiles), 1) {
        return Some(Fan::FourPureShiftedPungs);
    }
    if tiles.iter().all(|t| t.is_wind()) {
        return Some(Fan::BigFourWinds);
    }
    None
}

fn calculate_4_pungs(mut tiles: [Tile; 4], fans: &mut FanTable) {
    tiles.sort_unstable();

    if let Some(fan) = four_pungs_fan(tiles) {
        fans.add(fan);
        return;
    }

    const SUBSETS: [([usize; 3], usize); 4] = [
        ([0, 1, 2], 3),
        ([0, 1, 3], 2),
        ([0, 2, 3], 1),
        ([1, 2, 3], 0),
    ];
    for (subset, free) in SUBSETS {
        if let Some(fan) = three_pungs_fan(subset.map(|i| tiles[i])) {
            fans.add(fan);
            if let Some(extra) = subset.iter().find_map(|&i| two_pungs_fan(tiles[i], tiles[free])) {
                fans.add(extra);
            }
            return;
        }
    }

    for i in 0..4 {
        for j in i + 1..4 {
            if let Some(fan) = two_pungs_fan(tiles[i], tiles[j]) {
                fans.add(fan);
            }
        }
    }
}

fn calculate_3_pungs(mut tiles: [Tile; 3], fans: &mut FanTable) {
    tiles.sort_unstable();
    if let Some(fan) = three_pungs_fan(tiles) {
        fans.add(fan);
        return;
    }
    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        if let Some(fan) = two_pungs_fan(tiles[i], tiles[j]) {
            fans.add(fan);
        }
    }
}

fn calculate_2_pungs(tiles: [Tile; 2], fans: &mut FanTable) {
    if let Some(fan) = two_pungs_fan(tiles[0], tiles[1]) {
        fans.add(fan);
    }
}

/// Dragon Pung and Pung of Terminals or Honors, once per pung or kong.
pub fn single_pung_fans(tiles: &[Tile], fans: &mut FanTable) {
    for &tile in tiles {
        if tile.is_dragon() {
            fans.add(Fan::DragonPung);
        } else if tile.is_terminal_or_honor() {
            fans.add(Fan::PungOfTerminalsOrHonors);
        }
    }
}

/// Scores the patterns between the four melds of a division. Exactly one
/// path runs per chow count.
pub fn evaluate_groups(groups: &[Meld], pair: Tile, fans: &mut FanTable) {
    let mids: Vec<Tile> = groups.iter().filter(|m| m.is_chow()).map(|m| m.tile).collect();
    let pungs: Vec<Tile> = groups.iter().filter(|m| m.is_pung_like()).map(|m| m.tile).collect();

    match (mids.as_slice(), pungs.as_slice()) {
        (&[a, b, c, d], _) => {
            let mids = [a, b, c, d];
            if is_three_suited_terminal_chows(&mids, pair) {
                fans.add(Fan::ThreeSuitedTerminalChows);
            } else if is_pure_terminal_chows(&mids, pair) {
                fans.add(Fan::PureTerminalChows);
            } else {
                calculate_4_chows(mids, fans);
            }
        }
        (&[a, b, c], _) => calculate_3_chows([a, b, c], fans),
        (&[a, b], &[p, q]) => {
            calculate_2_chows([a, b], fans);
            calculate_2_pungs([p, q], fans);
        }
        (_, &[p, q, r]) => calculate_3_pungs([p, q, r], fans),
        (_, &[p, q, r, s]) => calculate_4_pungs([p, q, r, s], fans),
        _ => {}
    }

    single_pung_fans(&pungs, fans);
}

/// A pung or kong as the kong table sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PungGroup {
    pub tile: Tile,
    pub kong: bool,
    /// Formed from concealed tiles. A pung completed by a discard is not.
    pub concealed: bool,
}

/// Kong patterns, concealed-pung patterns and All Pungs.
pub fn calculate_kongs(pungs: &[PungGroup], fans: &mut FanTable, rule: &ScoringRule) {
    let melded_kongs = pungs.iter().filter(|p| p.kong && !p.concealed).count();
    let concealed_kongs = pungs.iter().filter(|p| p.kong && p.concealed).count();
    let concealed_pungs = pungs.iter().filter(|p| !p.kong && p.concealed).count();

    match melded_kongs + concealed_kongs {
        0 => match concealed_pungs {
            2 => fans.add(Fan::TwoConcealedPungs),
            3 => fans.add(Fan::ThreeConcealedPungs),
            4 => fans.add(Fan::FourConcealedPungs),
            _ => {}
        },
        1 if melded_kongs == 1 => {
            fans.add(Fan::MeldedKong);
            match concealed_pungs {
                2 => fans.add(Fan::TwoConcealedPungs),
                3 => fans.add(Fan::ThreeConcealedPungs),
                _ => {}
            }
        }
        1 => {
            fans.add(Fan::ConcealedKong);
            match concealed_pungs {
                1 => fans.add(Fan::TwoConcealedPungs),
                2 => fans.add(Fan::ThreeConcealedPungs),
                3 => fans.add(Fan::FourConcealedPungs),
                _ => {}
            }
        }
        2 => match concealed_kongs {
            0 => {
                fans.add(Fan::TwoMeldedKongs);
                if concealed_pungs == 2 {
                    fans.add(Fan::TwoConcealedPungs);
                }
            }
            1 => {
                if rule.concealed_kong_and_melded_kong {
                    fans.add(Fan::ConcealedKongAndMeldedKong);
                } else {
                    fans.add(Fan::MeldedKong);
                    fans.add(Fan::ConcealedKong);
                }
                match concealed_pungs {
                    1 => fans.add(Fan::TwoConcealedPungs),
                    2 => fans.add(Fan::ThreeConcealedPungs),
                    _ => {}
                }
            }
            _ => {
                fans.add(Fan::TwoConcealedKongs);
                match concealed_pungs {
                    1 => fans.add(Fan::ThreeConcealedPungs),
                    2 => fans.add(Fan::FourConcealedPungs),
                    _ => {}
                }
            }
        },
        3 => {
            fans.add(Fan::ThreeKongs);
            match (concealed_kongs, concealed_pungs) {
                (1, cp) if cp > 0 => fans.add(Fan::TwoConcealedPungs),
                (2, 0) => fans.add(Fan::TwoConcealedPungs),
                (2, _) => fans.add(Fan::ThreeConcealedPungs),
                (3, 0) => fans.add(Fan::ThreeConcealedPungs),
                (3, _) => fans.add(Fan::FourConcealedPungs),
                _ => {}
            }
        }
        _ => {
            fans.add(Fan::FourKongs);
            match concealed_kongs {
                2 => fans.add(Fan::TwoConcealedPungs),
                3 => fans.add(Fan::ThreeConcealedPungs),
                4 => fans.add(Fan::FourConcealedPungs),
                _ => {}
            }
        }
    }

    if pungs.len() == 4 && !fans.has(Fan::FourKongs) && !fans.has(Fan::FourConcealedPungs) {
        fans.add(Fan::AllPungs);
    }
}

/// Prevalent Wind and Seat Wind from wind pungs and kongs.
pub fn wind_pung_fans(groups: &[Meld], prevalent: Wind, seat: Wind, fans: &mut FanTable) {
    for meld in groups.iter().filter(|m| m.is_pung_like()) {
        if meld.tile == prevalent.tile() {
            fans.add(Fan::PrevalentWind);
        }
        if meld.tile == seat.tile() {
            fans.add(Fan::SeatWind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meld::Supplier;
    use crate::tiles::Tile::*;

    fn chows(mids: &[Tile]) -> Vec<Meld> {
        mids.iter().map(|&t| Meld::chow(t)).collect()
    }

    fn score(groups: &[Meld], pair: Tile) -> FanTable {
        let mut fans = FanTable::new();
        evaluate_groups(groups, pair, &mut fans);
        fans
    }

    #[test]
    fn two_chow_patterns() {
        assert_eq!(two_chows_fan(Man3, Man3), Some(Fan::PureDoubleChow));
        assert_eq!(two_chows_fan(Man3, Pin3), Some(Fan::MixedDoubleChow));
        assert_eq!(two_chows_fan(Sou2, Sou5), Some(Fan::ShortStraight));
        assert_eq!(two_chows_fan(Sou8, Sou2), Some(Fan::TwoTerminalChows));
        assert_eq!(two_chows_fan(Sou2, Pin5), None);
    }

    #[test]
    fn three_chow_patterns() {
        assert_eq!(three_chows_fan([Man3, Sou4, Pin2]), Some(Fan::MixedShiftedChows));
        assert_eq!(three_chows_fan([Man4, Sou4, Pin4]), Some(Fan::MixedTripleChow));
        assert_eq!(three_chows_fan([Man8, Sou2, Pin5]), Some(Fan::MixedStraight));
        assert_eq!(three_chows_fan([Pin3, Pin5, Pin7]), Some(Fan::PureShiftedChows));
        assert_eq!(three_chows_fan([Pin2, Pin5, Pin8]), Some(Fan::PureStraight));
        assert_eq!(three_chows_fan([Pin6, Pin6, Pin6]), Some(Fan::PureTripleChow));
        assert_eq!(three_chows_fan([Pin6, Pin6, Sou6]), None);
    }

    #[test]
    fn four_pure_shifted_chows_stands_alone() {
        let fans = score(&chows(&[Man2, Man3, Man4, Man5]), Sou9);
        assert_eq!(fans, FanTable::with(Fan::FourPureShiftedChows));
    }

    #[test]
    fn three_chow_pattern_takes_one_extra_pair() {
        // 123m 456m 789m + 789s: pure straight, and 8m/8s is a mixed double chow
        let fans = score(&chows(&[Man2, Man5, Man8, Sou8]), Pin5);
        assert_eq!(fans[Fan::PureStraight], 1);
        assert_eq!(fans[Fan::MixedDoubleChow], 1);
        assert_eq!(fans.total(), 17);
    }

    #[test]
    fn pairwise_chows_are_capped_at_three() {
        // 123m 123m 456m 456m: two pure doubles and four short straights found,
        // trimmed to two pure doubles and one short straight
        let fans = score(&chows(&[Man2, Man2, Man5, Man5]), East);
        assert_eq!(fans[Fan::PureDoubleChow], 2);
        assert_eq!(fans[Fan::ShortStraight], 1);

        // 234m 567m 234s 567s: two mixed doubles and two short straights, cap 3
        let fans = score(&chows(&[Man3, Man6, Sou3, Sou6]), East);
        assert_eq!(fans[Fan::MixedDoubleChow], 2);
        assert_eq!(fans[Fan::ShortStraight], 1);
    }

    #[test]
    fn isolated_chows_lower_the_cap() {
        let fans = score(&chows(&[Man3, Man3, Sou5, Pin7]), East);
        assert_eq!(fans, FanTable::with(Fan::PureDoubleChow));
    }

    #[test]
    fn terminal_chow_hands() {
        let fans = score(&chows(&[Man2, Man8, Sou2, Sou8]), Pin5);
        assert_eq!(fans, FanTable::with(Fan::ThreeSuitedTerminalChows));

        let fans = score(&chows(&[Pin2, Pin2, Pin8, Pin8]), Pin5);
        assert_eq!(fans, FanTable::with(Fan::PureTerminalChows));

        // pair in the wrong suit: just the pairwise patterns
        let fans = score(&chows(&[Man2, Man8, Sou2, Sou8]), Man5);
        assert!(!fans.has(Fan::ThreeSuitedTerminalChows));
    }

    #[test]
    fn pung_groups() {
        let winds: Vec<Meld> = [East, South, West, North].iter().map(|&t| Meld::pung(t)).collect();
        let fans = score(&winds, Man2);
        assert_eq!(fans[Fan::BigFourWinds], 1);
        assert_eq!(fans[Fan::PungOfTerminalsOrHonors], 4);

        let dragons = vec![Meld::pung(Man1), Meld::pung(Red), Meld::pung(Green), Meld::pung(White)];
        let fans = score(&dragons, Man2);
        assert_eq!(fans[Fan::BigThreeDragons], 1);
        assert_eq!(fans[Fan::DragonPung], 3);
        assert_eq!(fans[Fan::PungOfTerminalsOrHonors], 1);

        let triple = vec![Meld::pung(Man5), Meld::pung(Sou5), Meld::pung(Pin5), Meld::pung(Sou7)];
        let fans = score(&triple, Man2);
        assert_eq!(fans[Fan::TriplePung], 1);
        assert_eq!(fans.total(), 16);

        let shifted = [Meld::pung(Man5), Meld::pung(Sou3), Meld::pung(Pin4)];
        let mut groups = shifted.to_vec();
        groups.push(Meld::chow(Man7));
        assert_eq!(score(&groups, Man2)[Fan::MixedShiftedPungs], 1);
    }

    #[test]
    fn two_chows_two_pungs() {
        let groups = vec![Meld::chow(Man3), Meld::chow(Pin3), Meld::pung(Red), Meld::pung(Green)];
        let fans = score(&groups, Sou5);
        assert_eq!(fans[Fan::MixedDoubleChow], 1);
        assert_eq!(fans[Fan::TwoDragonsPungs], 1);
        assert_eq!(fans[Fan::DragonPung], 2);
    }

    fn group(tile: Tile, kong: bool, concealed: bool) -> PungGroup {
        PungGroup { tile, kong, concealed }
    }

    #[test]
    fn concealed_kong_and_melded_kong() {
        let pungs = [group(Red, true, true), group(Man1, true, false)];
        let mut fans = FanTable::new();
        calculate_kongs(&pungs, &mut fans, &ScoringRule::official());
        assert_eq!(fans, FanTable::with(Fan::ConcealedKongAndMeldedKong));

        let mut fans = FanTable::new();
        calculate_kongs(&pungs, &mut fans, &ScoringRule::legacy());
        assert_eq!(fans[Fan::MeldedKong], 1);
        assert_eq!(fans[Fan::ConcealedKong], 1);
        assert_eq!(fans[Fan::ConcealedKongAndMeldedKong], 0);
    }

    #[test]
    fn kong_table_counts_concealed_kongs_as_concealed_pungs() {
        let mut fans = FanTable::new();
        let pungs = [group(Red, true, true), group(Man1, false, true), group(Man3, false, true)];
        calculate_kongs(&pungs, &mut fans, &ScoringRule::default());
        assert_eq!(fans[Fan::ConcealedKong], 1);
        assert_eq!(fans[Fan::ThreeConcealedPungs], 1);

        let mut fans = FanTable::new();
        let pungs = [
            group(Red, true, true),
            group(Man1, true, true),
            group(Man3, true, false),
            group(Sou3, false, false),
        ];
        calculate_kongs(&pungs, &mut fans, &ScoringRule::default());
        assert_eq!(fans[Fan::ThreeKongs], 1);
        assert_eq!(fans[Fan::TwoConcealedPungs], 1);
        assert_eq!(fans[Fan::AllPungs], 1);

        let mut fans = FanTable::new();
        let pungs = [
            group(Red, false, true),
            group(Man1, false, true),
            group(Man3, false, true),
            group(Sou3, false, true),
        ];
        calculate_kongs(&pungs, &mut fans, &ScoringRule::default());
        assert_eq!(fans[Fan::FourConcealedPungs], 1);
        assert_eq!(fans[Fan::AllPungs], 0);
    }

    #[test]
    fn wind_pungs_match_seat_and_round() {
        let groups = vec![Meld::pung(East).claimed(Supplier::Previous), Meld::kong(South), Meld::chow(Man2)];
        let mut fans = FanTable::new();
        wind_pung_fans(&groups, Wind::East, Wind::South, &mut fans);
        assert_eq!(fans[Fan::PrevalentWind], 1);
        assert_eq!(fans[Fan::SeatWind], 1);

        let mut fans = FanTable::new();
        wind_pung_fans(&groups, Wind::East, Wind::East, &mut fans);
        assert_eq!(fans[Fan::PrevalentWind], 1);
        assert_eq!(fans[Fan::SeatWind], 1);
    }
}
