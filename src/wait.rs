// src/wait.rs
use crate::hand::Tally;
use crate::rule::ScoringRule;
use crate::special_forms::is_knitted_straight_win;
use crate::tiles::{ALL_TILES, TILE_KINDS};

/// Tile kinds that complete a hand, indexed by [`Tile::index`](crate::tiles::Tile::index).
pub type WaitSet = [bool; TILE_KINDS];

/// Recursively try to peel off melds (pungs or chows) until nothing is left.
fn can_form_melds(tally: Tally) -> bool {
    let Some((tile, n)) = tally.iter().next() else {
        return true;
    };
    // Pung
    if n >= 3 && tally.take(tile, 3).is_some_and(can_form_melds) {
        return true;
    }
    // Chow
    tally.take_run(tile).is_some_and(can_form_melds)
}

/// Melds plus one pair, with nothing left over.
pub fn is_basic_form_win(tally: &Tally) -> bool {
    if tally.total() % 3 != 2 {
        return false;
    }
    tally
        .iter()
        .filter(|&(_, c)| c >= 2)
        .any(|(tile, _)| tally.take(tile, 2).is_some_and(can_form_melds))
}

/// Marks in `waits` every kind that completes `standing` as melds plus a pair.
pub fn is_basic_form_waiting(standing: &Tally, waits: &mut WaitSet) -> bool {
    let mut waiting = false;
    for tile in ALL_TILES {
        if is_basic_form_win(&standing.with(tile)) {
            waits[tile.index()] = true;
            waiting = true;
        }
    }
    waiting
}

/// Marks in `waits` the kind that completes 13 concealed tiles as seven pairs.
/// Without `seven_pairs_four_of_a_kind` a third copy of any kind rules it out.
pub fn is_seven_pairs_waiting(standing: &Tally, rule: &ScoringRule, waits: &mut WaitSet) -> bool {
    if standing.total() != 13 {
        return false;
    }
    if !rule.seven_pairs_four_of_a_kind && standing.iter().any(|(_, c)| c > 2) {
        return false;
    }
    let odd: Vec<_> = standing.iter().filter(|&(_, c)| c % 2 == 1).collect();
    let [(tile, _)] = odd.as_slice() else {
        return false;
    };
    waits[tile.index()] = true;
    true
}

/// Marks in `waits` every kind that completes a knitted straight hand.
pub fn is_knitted_straight_waiting(standing: &Tally, fixed_count: usize, waits: &mut WaitSet) -> bool {
    let mut waiting = false;
    for tile in ALL_TILES {
        if is_knitted_straight_win(&standing.with(tile), fixed_count) {
            waits[tile.index()] = true;
            waiting = true;
        }
    }
    waiting
}

/// Every kind that completes `standing` in any shape the hand can still take.
pub fn waiting_tiles(standing: &Tally, fixed_count: usize, rule: &ScoringRule) -> WaitSet {
    let mut waits = [false; TILE_KINDS];
    is_basic_form_waiting(standing, &mut waits);
    if fixed_count == 0 {
        is_seven_pairs_waiting(standing, rule, &mut waits);
    }
    if fixed_count <= 1 {
        is_knitted_straight_waiting(standing, fixed_count, &mut waits);
    }
    waits
}
