// src/hand_parser.rs

use std::collections::HashSet;

use crate::errors::{ScoreError, ScoreResult};
use crate::hand::Tally;
use crate::meld::{Meld, MeldKind};
use crate::tiles::{Tile, ALL_TILES};

/// Upper bound on distinct divisions of one hand. Real hands stay well below it.
pub const MAX_DIVISIONS: usize = 20;

/// One way to read a winning hand: four melds followed by the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Division {
    /// Fixed melds first (as declared), then the searched melds in canonical
    /// order, then the pair.
    pub melds: Vec<Meld>,
    /// How many leading entries of `melds` were fixed before the search.
    pub fixed_count: usize,
}

impl Division {
    pub fn pair(&self) -> Tile {
        self.melds[self.melds.len() - 1].tile
    }

    /// The four melds, pair excluded.
    pub fn groups(&self) -> &[Meld] {
        &self.melds[..self.melds.len() - 1]
    }

    pub fn fixed(&self) -> &[Meld] {
        &self.melds[..self.fixed_count]
    }

    /// Melds formed from the standing tiles, pair included.
    pub fn concealed(&self) -> &[Meld] {
        &self.melds[self.fixed_count..]
    }

    /// Every physical tile of the division, kongs counted as four.
    pub fn tiles(&self) -> Vec<Tile> {
        self.melds.iter().flat_map(|m| m.tiles()).collect()
    }
}

/// Enumerates every distinct division of a winning hand.
///
/// `tally` holds the standing tiles plus the winning tile; `fixed` are the
/// melds already declared.
pub fn divide_win_hand(tally: Tally, fixed: &[Meld]) -> ScoreResult<Vec<Division>> {
    let found = divide_tiles(tally, fixed.len())?;
    Ok(found
        .into_iter()
        .map(|unfixed| {
            let mut melds = fixed.to_vec();
            melds.extend(unfixed);
            Division { melds, fixed_count: fixed.len() }
        })
        .collect())
}

/// Splits `tally` into `4 - filled_slots` melds and a pair, every possible way.
///
/// Each result lists the melds in canonical order with the pair last.
pub fn divide_tiles(tally: Tally, filled_slots: usize) -> ScoreResult<Vec<Vec<Meld>>> {
    let mut divider = Divider {
        filled_slots,
        found: Vec::new(),
        found_set: HashSet::new(),
        explored: HashSet::new(),
    };
    let mut work = Vec::with_capacity(4);
    divider.divide_recursively(tally, &mut work)?;
    debug!("{} division(s) over {} free slot(s)", divider.found.len(), 4 - filled_slots.min(4));
    Ok(divider.found)
}

struct Divider {
    filled_slots: usize,
    /// Recorded divisions, melds sorted and pair last.
    found: Vec<Vec<Meld>>,
    /// Canonical (sorted, pair excluded) meld lists of `found`.
    found_set: HashSet<Vec<Meld>>,
    /// Every sorted sub-multiset of size ≥ 3 of a recorded division's melds.
    explored: HashSet<Vec<Meld>>,
}

impl Divider {
    fn divide_recursively(&mut self, tally: Tally, work: &mut Vec<Meld>) -> ScoreResult<()> {
        if self.filled_slots + work.len() >= 4 {
            return self.divide_tail(tally, work);
        }

        for tile in ALL_TILES {
            let n = tally.count(tile);
            if n == 0 {
                continue;
            }

            // 1. Try a pung
            if n >= 3 {
                if let Some(rest) = tally.take(tile, 3) {
                    self.try_branch(rest, Meld::pung(tile), work)?;
                }
            }

            // 2. Try a chow starting here, recorded by its middle tile
            if tile.is_numbered() && tile.rank() <= 7 {
                if let (Some(rest), Some(middle)) = (tally.take_run(tile), tile.offset(1)) {
                    self.try_branch(rest, Meld::chow(middle), work)?;
                }
            }
        }
        Ok(())
    }

    fn try_branch(&mut self, rest: Tally, meld: Meld, work: &mut Vec<Meld>) -> ScoreResult<()> {
        work.push(meld);
        let result = if self.is_branch_explored(work) {
            Ok(())
        } else {
            self.divide_recursively(rest, work)
        };
        work.pop();
        result
    }

    /// A partial with three or more melds that already sits inside a recorded
    /// division leads to nothing new.
    fn is_branch_explored(&self, work: &[Meld]) -> bool {
        if work.len() < 3 {
            return false;
        }
        let mut partial = work.to_vec();
        partial.sort_unstable();
        self.explored.contains(&partial)
    }

    /// All melds placed: what is left must be exactly one pair.
    fn divide_tail(&mut self, tally: Tally, work: &[Meld]) -> ScoreResult<()> {
        if tally.total() != 2 {
            return Ok(());
        }
        let Some(pair) = tally.iter().find(|&(_, c)| c == 2).map(|(t, _)| t) else {
            return Ok(());
        };

        let mut melds = work.to_vec();
        melds.sort_unstable();
        if self.found_set.contains(&melds) {
            return Ok(());
        }

        if self.found.len() >= MAX_DIVISIONS {
            warn!("division limit {} exceeded", MAX_DIVISIONS);
            debug_assert!(false, "more than {} divisions", MAX_DIVISIONS);
            return Err(ScoreError::Internal {
                message: format!("more than {} divisions", MAX_DIVISIONS),
            });
        }

        self.remember_subsets(&melds);
        self.found_set.insert(melds.clone());
        melds.push(Meld::pair(pair));
        self.found.push(melds);
        Ok(())
    }

    fn remember_subsets(&mut self, melds: &[Meld]) {
        let n = melds.len();
        for mask in 1u32..(1 << n) {
            if mask.count_ones() < 3 {
                continue;
            }
            // Picking in index order from a sorted list keeps the subset sorted.
            let subset: Vec<Meld> = (0..n)
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| melds[i])
                .collect();
            self.explored.insert(subset);
        }
    }
}

/// Rebuilds the tally a division accounts for. Kongs count as three, the way
/// they occupy a meld slot.
pub fn division_slot_tally(melds: &[Meld]) -> Tally {
    let mut tally = Tally::default();
    for meld in melds {
        let tiles = meld.tiles();
        let take = if meld.kind == MeldKind::Kong { 3 } else { tiles.len() };
        for &tile in &tiles[..take] {
            tally.add(tile);
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meld::Supplier;
    use crate::tiles::Tile::*;

    fn tally(tiles: &[Tile]) -> Tally {
        Tally::from_tiles(tiles.iter().copied())
    }

    #[test]
    fn simple_hand_has_one_division() {
        // 123m 456m 789s 234p 55p
        let t = tally(&[Man1, Man2, Man3, Man4, Man5, Man6, Sou7, Sou8, Sou9,
                        Pin2, Pin3, Pin4, Pin5, Pin5]);
        let divisions = divide_win_hand(t, &[]).unwrap();
        assert_eq!(divisions.len(), 1);
        let d = &divisions[0];
        assert_eq!(d.pair(), Pin5);
        assert_eq!(d.groups(), &[Meld::chow(Man2), Meld::chow(Man5), Meld::chow(Sou8), Meld::chow(Pin3)]);
    }

    #[test]
    fn triple_chow_reads_as_pungs_too() {
        // 111222333m 456s 99p: three chows of 123m or three pungs
        let t = tally(&[Man1, Man1, Man1, Man2, Man2, Man2, Man3, Man3, Man3,
                        Sou4, Sou5, Sou6, Pin9, Pin9]);
        let divisions = divide_win_hand(t, &[]).unwrap();
        assert_eq!(divisions.len(), 2);
        assert!(divisions.iter().any(|d| d.groups().iter().filter(|m| m.is_chow()).count() == 4));
        assert!(divisions.iter().any(|d| d.groups().iter().filter(|m| m.is_pung_like()).count() == 3));
    }

    #[test]
    fn only_complete_readings_survive() {
        // 1112345678999m + 5m (nine gates shape) has exactly one split
        let t = tally(&[Man1, Man1, Man1, Man2, Man3, Man4, Man5, Man5, Man6, Man7,
                        Man8, Man9, Man9, Man9]);
        let divisions = divide_win_hand(t, &[]).unwrap();
        assert_eq!(divisions.len(), 1);
        assert_eq!(divisions[0].pair(), Man5);

        // 2223344m 55m 123p 77p: only 222m 345m 345m fits
        let t = tally(&[Man2, Man2, Man2, Man3, Man3, Man4, Man4, Man5, Man5,
                        Pin1, Pin2, Pin3, Pin7, Pin7]);
        let divisions = divide_win_hand(t, &[]).unwrap();
        assert_eq!(divisions.len(), 1);
        assert_eq!(divisions[0].pair(), Pin7);
        assert_eq!(divisions[0].groups()[..2], [Meld::chow(Man4), Meld::chow(Man4)]);
    }

    #[test]
    fn fixed_melds_come_first() {
        let fixed = [Meld::pung(Red).claimed(Supplier::Opposite)];
        let t = tally(&[Man1, Man2, Man3, Sou4, Sou5, Sou6, Pin7, Pin8, Pin9, East, East]);
        let divisions = divide_win_hand(t, &fixed).unwrap();
        assert_eq!(divisions.len(), 1);
        assert_eq!(divisions[0].fixed(), &fixed);
        assert_eq!(divisions[0].concealed().len(), 4);
        assert_eq!(divisions[0].pair(), East);
    }

    #[test]
    fn every_division_uses_every_tile() {
        // 1112233445566s + 7s overlaps in several ways
        let tiles = [Sou1, Sou1, Sou1, Sou2, Sou2, Sou3, Sou3, Sou4, Sou4, Sou5,
                     Sou5, Sou6, Sou6, Sou7];
        let t = tally(&tiles);
        let divisions = divide_win_hand(t, &[]).unwrap();
        assert!(!divisions.is_empty());
        assert!(divisions.len() <= MAX_DIVISIONS);
        for d in &divisions {
            assert_eq!(division_slot_tally(&d.melds), t, "{:?}", d.melds);
        }
        let unique: HashSet<_> = divisions.iter().collect();
        assert_eq!(unique.len(), divisions.len());
    }

    #[test]
    fn non_winning_hand_has_no_division() {
        let t = tally(&[Man1, Man2, Man4, Man5, Man6, Man7, Sou7, Sou8, Sou9,
                        Pin2, Pin3, Pin4, Pin5, Pin5]);
        assert!(divide_win_hand(t, &[]).unwrap().is_empty());
    }

    #[test]
    fn residue_after_knitted_template() {
        // 3 slots already filled: one meld and a pair remain
        let t = tally(&[Pin4, Pin5, Pin6, White, White]);
        let found = divide_tiles(t, 3).unwrap();
        assert_eq!(found, vec![vec![Meld::chow(Pin5), Meld::pair(White)]]);
    }
}
