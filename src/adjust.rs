// src/adjust.rs
//! Whole-hand passes run after the meld patterns are known.

use crate::fan::{Fan, FanTable};
use crate::fan_calculation::WinFlags;
use crate::hand::{count_tiles, Tally};
use crate::meld::{Meld, MeldKind};
use crate::tiles::{Suit, Tile};
use crate::wait::WaitSet;

/// Concealment of the hand against how the winning tile arrived.
pub fn adjust_by_self_drawn(fixed: &[Meld], self_drawn: bool, fans: &mut FanTable) {
    let melded = fixed.iter().filter(|m| !m.is_concealed()).count();
    match (melded, self_drawn) {
        (0, true) => fans.add(Fan::FullyConcealedHand),
        (0, false) => fans.add(Fan::ConcealedHand),
        (4, false) => fans.add(Fan::MeldedHand),
        (_, true) => fans.add(Fan::SelfDrawn),
        _ => {}
    }
}

pub fn adjust_by_win_flags(flags: &WinFlags, fans: &mut FanTable) {
    if flags.fourth_tile {
        fans.add(Fan::LastTile);
    }
    if flags.wall_last {
        fans.add(if flags.self_drawn { Fan::LastTileDraw } else { Fan::LastTileClaim });
    }
    if flags.about_kong {
        fans.add(if flags.self_drawn { Fan::OutWithReplacementTile } else { Fan::RobbingTheKong });
    }
}

/// Little three dragons and little four winds complete with the pair.
pub fn adjust_by_pair(pair: Tile, fans: &mut FanTable) {
    if pair.is_dragon() && fans.has(Fan::TwoDragonsPungs) {
        fans.add(Fan::LittleThreeDragons);
    } else if pair.is_wind() && fans.has(Fan::BigThreeWinds) {
        fans.add(Fan::LittleFourWinds);
    }
}

/// Outside Hand, All Five and All Even Pungs, judged meld by meld (pair included).
pub fn adjust_by_pack_traits(melds: &[Meld], fans: &mut FanTable) {
    let has_terminal_or_honor = |m: &Meld| match m.kind {
        MeldKind::Chow => matches!(m.tile.rank(), 2 | 8),
        _ => m.tile.is_terminal_or_honor(),
    };
    let has_five = |m: &Meld| {
        m.tile.is_numbered()
            && match m.kind {
                MeldKind::Chow => (4..=6).contains(&m.tile.rank()),
                _ => m.tile.rank() == 5,
            }
    };
    let is_even_pung = |m: &Meld| !m.is_chow() && m.tile.is_numbered() && m.tile.rank() % 2 == 0;

    if melds.iter().all(has_terminal_or_honor) {
        fans.add(Fan::OutsideHand);
    }
    if melds.iter().all(has_five) {
        fans.add(Fan::AllFive);
    }
    if melds.iter().all(is_even_pung) {
        fans.add(Fan::AllEvenPungs);
    }
}

/// Four chows and a numbered pair.
pub fn adjust_by_all_chows(groups: &[Meld], pair: Tile, fans: &mut FanTable) {
    if groups.iter().filter(|m| m.is_chow()).count() == 4 && pair.is_numbered() {
        fans.add(Fan::AllChows);
    }
}

pub fn adjust_by_suits(tiles: &[Tile], fans: &mut FanTable) {
    let has = |suit: Suit| tiles.iter().any(|t| t.suit() == suit);
    let suits = [Suit::Characters, Suit::Bamboo, Suit::Dots]
        .into_iter()
        .filter(|&s| has(s))
        .count();
    let winds = tiles.iter().any(|t| t.is_wind());
    let dragons = tiles.iter().any(|t| t.is_dragon());

    if !winds && !dragons {
        fans.add(Fan::NoHonors);
    }
    match suits {
        2 => fans.add(Fan::OneVoidedSuit),
        1 if winds || dragons => fans.add(Fan::HalfFlush),
        1 => fans.add(Fan::FullFlush),
        _ => {}
    }
    if suits == 3 && winds && dragons {
        fans.add(Fan::AllTypes);
    }
}

/// Upper/middle/lower tiles and upper/lower four. Only hands without honors qualify.
pub fn adjust_by_rank_range(tiles: &[Tile], fans: &mut FanTable) {
    if tiles.iter().any(|t| t.is_honor()) {
        return;
    }
    let all = |f: fn(u8) -> bool| tiles.iter().all(|t| f(t.rank()));

    if all(|r| r <= 3) {
        fans.add(Fan::LowerTiles);
    } else if all(|r| r <= 4) {
        fans.add(Fan::LowerFour);
    } else if all(|r| r >= 7) {
        fans.add(Fan::UpperTiles);
    } else if all(|r| r >= 6) {
        fans.add(Fan::UpperFour);
    } else if all(|r| (4..=6).contains(&r)) {
        fans.add(Fan::MiddleTiles);
    }
}

pub fn adjust_by_tiles_traits(tiles: &[Tile], fans: &mut FanTable) {
    if tiles.iter().all(|t| !t.is_terminal_or_honor()) {
        fans.add(Fan::AllSimples);
    }
    if tiles.iter().all(|t| t.is_reversible()) {
        fans.add(Fan::ReversibleTiles);
    }
    if tiles.iter().all(|t| t.is_green()) {
        fans.add(Fan::AllGreen);
    }
    if fans.has(Fan::AllSimples) {
        return;
    }
    if tiles.iter().all(|t| t.is_honor()) {
        fans.add(Fan::AllHonors);
    } else if tiles.iter().all(|t| t.is_terminal()) {
        fans.add(Fan::AllTerminals);
    } else if tiles.iter().all(|t| t.is_terminal_or_honor()) {
        fans.add(Fan::AllTerminalsAndHonors);
    }
}

/// All four copies of a kind used without declaring them as a kong.
pub fn adjust_by_tiles_hog(tiles: &[Tile], fans: &mut FanTable) {
    let kongs = tiles.len().saturating_sub(14);
    let fours = count_tiles(tiles).iter().filter(|&&c| c == 4).count();
    fans[Fan::TileHog] = fours.saturating_sub(kongs) as u8;
}

/// Edge, closed or single wait.
///
/// Only scored when `waits` holds exactly one kind; the shape is then read
/// from the concealed melds that hold the winning tile.
pub fn adjust_by_waiting_form(concealed: &[Meld], waits: &WaitSet, win_tile: Tile, fans: &mut FanTable) {
    if fans.has(Fan::MeldedHand) || fans.has(Fan::FourKongs) {
        return;
    }
    if waits.iter().filter(|&&w| w).count() != 1 {
        return;
    }

    let mut edge = false;
    let mut closed = false;
    let mut single = false;
    for meld in concealed {
        match meld.kind {
            MeldKind::Chow if meld.tile == win_tile => closed = true,
            MeldKind::Chow if meld.contains(win_tile) => edge = true,
            MeldKind::Pair if meld.tile == win_tile => single = true,
            _ => {}
        }
    }

    if edge {
        fans.add(Fan::EdgeWait);
    } else if closed {
        fans.add(Fan::ClosedWait);
    } else if single {
        fans.add(Fan::SingleWait);
    }
}

/// The thirteen concealed tiles before the win are 1112345678999 of one suit.
pub fn is_nine_gates(standing: &Tally) -> bool {
    let tiles = standing.tiles();
    let Some(&first) = tiles.first() else {
        return false;
    };
    if tiles.len() != 13 || !first.is_numbered() || tiles.iter().any(|t| t.suit() != first.suit()) {
        return false;
    }
    let mut by_rank = [0u8; 9];
    for t in &tiles {
        by_rank[t.rank() as usize - 1] += 1;
    }
    by_rank == [3, 1, 1, 1, 1, 1, 1, 1, 3]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meld::Supplier;
    use crate::rule::ScoringRule;
    use crate::tiles::Tile::*;
    use crate::wait::waiting_tiles;

    #[test]
    fn self_drawn_classification() {
        let claimed = Meld::pung(Red).claimed(Supplier::Previous);
        let cases: [(&[Meld], bool, Fan); 5] = [
            (&[], true, Fan::FullyConcealedHand),
            (&[], false, Fan::ConcealedHand),
            (&[Meld::kong(East)], false, Fan::ConcealedHand),
            (&[claimed, claimed, claimed, claimed], false, Fan::MeldedHand),
            (&[claimed], true, Fan::SelfDrawn),
        ];
        for (fixed, self_drawn, expected) in cases {
            let mut fans = FanTable::new();
            adjust_by_self_drawn(fixed, self_drawn, &mut fans);
            assert_eq!(fans, FanTable::with(expected), "{:?} self_drawn={}", fixed, self_drawn);
        }
        let mut fans = FanTable::new();
        adjust_by_self_drawn(&[claimed], false, &mut fans);
        assert!(fans.is_empty());
    }

    #[test]
    fn win_flags() {
        let flags = WinFlags { self_drawn: true, wall_last: true, about_kong: true, ..WinFlags::default() };
        let mut fans = FanTable::new();
        adjust_by_win_flags(&flags, &mut fans);
        assert!(fans.has(Fan::LastTileDraw) && fans.has(Fan::OutWithReplacementTile));

        let flags = WinFlags { fourth_tile: true, about_kong: true, ..WinFlags::default() };
        let mut fans = FanTable::new();
        adjust_by_win_flags(&flags, &mut fans);
        assert!(fans.has(Fan::LastTile) && fans.has(Fan::RobbingTheKong));
    }

    #[test]
    fn suits() {
        let mut fans = FanTable::new();
        adjust_by_suits(&[Man1, Man2, Sou3, East], &mut fans);
        assert!(fans.has(Fan::OneVoidedSuit));
        assert!(!fans.has(Fan::NoHonors));

        let mut fans = FanTable::new();
        adjust_by_suits(&[Pin1, Pin2, Pin3], &mut fans);
        assert!(fans.has(Fan::FullFlush) && fans.has(Fan::NoHonors));

        let mut fans = FanTable::new();
        adjust_by_suits(&[Pin1, Red], &mut fans);
        assert_eq!(fans, FanTable::with(Fan::HalfFlush));

        let mut fans = FanTable::new();
        adjust_by_suits(&[Man1, Sou1, Pin1, South, Green], &mut fans);
        assert_eq!(fans, FanTable::with(Fan::AllTypes));
    }

    #[test]
    fn rank_ranges() {
        let check = |tiles: &[Tile], expected: Option<Fan>| {
            let mut fans = FanTable::new();
            adjust_by_rank_range(tiles, &mut fans);
            assert_eq!(fans.iter().next().map(|(f, _)| f), expected, "{:?}", tiles);
        };
        check(&[Man1, Sou2, Pin3], Some(Fan::LowerTiles));
        check(&[Man1, Sou4, Pin3], Some(Fan::LowerFour));
        check(&[Man7, Sou8, Pin9], Some(Fan::UpperTiles));
        check(&[Man6, Sou8, Pin9], Some(Fan::UpperFour));
        check(&[Man4, Sou5, Pin6], Some(Fan::MiddleTiles));
        check(&[Man4, Sou5, Pin7], None);
        check(&[Man1, Man2, East], None);
    }

    #[test]
    fn tile_traits() {
        let mut fans = FanTable::new();
        adjust_by_tiles_traits(&[Sou2, Sou3, Sou4, Sou6, Sou8, Green], &mut fans);
        assert!(fans.has(Fan::AllGreen));
        assert!(!fans.has(Fan::AllSimples));

        let mut fans = FanTable::new();
        adjust_by_tiles_traits(&[Man1, Sou9, Pin1], &mut fans);
        assert_eq!(fans, FanTable::with(Fan::AllTerminals));

        let mut fans = FanTable::new();
        adjust_by_tiles_traits(&[Man1, East, Red], &mut fans);
        assert_eq!(fans, FanTable::with(Fan::AllTerminalsAndHonors));

        let mut fans = FanTable::new();
        adjust_by_tiles_traits(&[Pin2, Pin4, Sou5, White], &mut fans);
        assert_eq!(fans, FanTable::with(Fan::ReversibleTiles));
    }

    #[test]
    fn pack_traits() {
        let melds = [Meld::chow(Man2), Meld::chow(Sou8), Meld::pung(Pin9), Meld::pung(East), Meld::pair(Man1)];
        let mut fans = FanTable::new();
        adjust_by_pack_traits(&melds, &mut fans);
        assert_eq!(fans, FanTable::with(Fan::OutsideHand));

        let melds = [Meld::chow(Man4), Meld::chow(Sou6), Meld::pung(Pin5), Meld::chow(Pin5), Meld::pair(Man5)];
        let mut fans = FanTable::new();
        adjust_by_pack_traits(&melds, &mut fans);
        assert_eq!(fans, FanTable::with(Fan::AllFive));

        let melds = [Meld::pung(Man2), Meld::pung(Sou4), Meld::kong(Pin6), Meld::pung(Pin8), Meld::pair(Man6)];
        let mut fans = FanTable::new();
        adjust_by_pack_traits(&melds, &mut fans);
        assert_eq!(fans, FanTable::with(Fan::AllEvenPungs));
    }

    #[test]
    fn tile_hog_ignores_kongs() {
        let mut tiles = vec![Man1; 4];
        tiles.extend([Man2, Man3, Sou5, Sou5, Sou5, Pin7, Pin8, Pin9, East, East]);
        let mut fans = FanTable::new();
        adjust_by_tiles_hog(&tiles, &mut fans);
        assert_eq!(fans[Fan::TileHog], 1);

        // same four 1m, but declared as a kong: 15 tiles
        tiles.push(Man4);
        let mut fans = FanTable::new();
        adjust_by_tiles_hog(&tiles, &mut fans);
        assert_eq!(fans[Fan::TileHog], 0);
    }

    #[test]
    fn waiting_shapes() {
        let waits = |standing: &Tally| waiting_tiles(standing, 0, &ScoringRule::official());
        // 12m waiting on 3m
        let standing = Tally::from_tiles([Man1, Man2, Sou4, Sou5, Sou6, Pin7, Pin8, Pin9, East, East, East, Red, Red]);
        let concealed = [Meld::chow(Man2), Meld::chow(Sou5), Meld::chow(Pin8), Meld::pung(East), Meld::pair(Red)];
        let mut fans = FanTable::new();
        adjust_by_waiting_form(&concealed, &waits(&standing), Man3, &mut fans);
        assert_eq!(fans, FanTable::with(Fan::EdgeWait));

        // 13m waiting on 2m
        let standing = Tally::from_tiles([Man1, Man3, Sou4, Sou5, Sou6, Pin7, Pin8, Pin9, East, East, East, Red, Red]);
        let mut fans = FanTable::new();
        adjust_by_waiting_form(&concealed, &waits(&standing), Man2, &mut fans);
        assert_eq!(fans, FanTable::with(Fan::ClosedWait));

        // 23m waiting on 1m or 4m: no wait pattern
        let standing = Tally::from_tiles([Man2, Man3, Sou4, Sou5, Sou6, Pin7, Pin8, Pin9, East, East, East, Red, Red]);
        let mut fans = FanTable::new();
        adjust_by_waiting_form(&concealed, &waits(&standing), Man1, &mut fans);
        assert!(fans.is_empty());
    }

    #[test]
    fn nine_gates_shape() {
        let standing = Tally::from_tiles([Pin1, Pin1, Pin1, Pin2, Pin3, Pin4, Pin5, Pin6, Pin7, Pin8, Pin9, Pin9, Pin9]);
        assert!(is_nine_gates(&standing));
        let standing = Tally::from_tiles([Pin1, Pin1, Pin1, Pin2, Pin3, Pin4, Pin5, Pin6, Pin7, Pin8, Pin8, Pin9, Pin9]);
        assert!(!is_nine_gates(&standing));
    }
}
