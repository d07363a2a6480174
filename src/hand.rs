// src/hand.rs
use serde::{Deserialize, Serialize};

use crate::meld::Meld;
use crate::tiles::{Tile, ALL_TILES, TILE_KINDS};

/// Bit-packed tile counts: 3 bits per tile kind (0–7 copies is enough).
///
/// `Tally` is `Copy`, so search code hands a fresh value to every branch
/// instead of decrementing and restoring a shared table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tally(u128);

impl Tally {
    pub fn from_tiles<I: IntoIterator<Item = Tile>>(tiles: I) -> Self {
        let mut tally = Tally::default();
        for tile in tiles {
            tally.add(tile);
        }
        tally
    }

    pub fn add(&mut self, tile: Tile) {
        let shift = tile.index() * 3;
        let mask = 0b111u128 << shift;
        let count = ((self.0 & mask) >> shift) + 1;
        debug_assert!(count <= 7, "too many copies of {:?}", tile);
        self.0 = (self.0 & !mask) | ((count & 0b111) << shift);
    }

    /// Copy of this tally with one more `tile`.
    pub fn with(mut self, tile: Tile) -> Self {
        self.add(tile);
        self
    }

    pub fn count(&self, tile: Tile) -> u8 {
        let shift = tile.index() * 3;
        ((self.0 >> shift) & 0b111) as u8
    }

    pub fn remove(&mut self, tile: Tile) -> bool {
        let shift = tile.index() * 3;
        let mask = 0b111u128 << shift;
        let count = (self.0 & mask) >> shift;
        if count == 0 {
            return false;
        }
        self.0 = (self.0 & !mask) | ((count - 1) << shift);
        true
    }

    /// Copy with `n` copies of `tile` removed, or `None` if there are fewer than `n`.
    pub fn take(self, tile: Tile, n: u8) -> Option<Self> {
        if self.count(tile) < n {
            return None;
        }
        let shift = tile.index() * 3;
        Some(Tally(self.0 - ((n as u128) << shift)))
    }

    /// Copy with the run `low, low+1, low+2` removed.
    pub fn take_run(self, low: Tile) -> Option<Self> {
        let mid = low.offset(1)?;
        let high = low.offset(2)?;
        self.take(low, 1)?.take(mid, 1)?.take(high, 1)
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, c)| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn counts(&self) -> [u8; TILE_KINDS] {
        let mut counts = [0u8; TILE_KINDS];
        for (tile, c) in self.iter() {
            counts[tile.index()] = c;
        }
        counts
    }

    /// Non-empty kinds in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        ALL_TILES.into_iter().filter_map(move |t| {
            let c = self.count(t);
            (c > 0).then_some((t, c))
        })
    }

    /// Expands back into a sorted tile list.
    pub fn tiles(&self) -> Vec<Tile> {
        self.iter()
            .flat_map(|(t, c)| std::iter::repeat(t).take(c as usize))
            .collect()
    }
}

/// Plain per-kind counts of a tile list. Unlike [`Tally`] this never saturates,
/// so it is what input validation counts with.
pub fn count_tiles<'a, I: IntoIterator<Item = &'a Tile>>(tiles: I) -> [u8; TILE_KINDS] {
    let mut counts = [0u8; TILE_KINDS];
    for tile in tiles {
        counts[tile.index()] = counts[tile.index()].saturating_add(1);
    }
    counts
}

/// A player's hand before the winning tile: 0–4 fixed melds (claimed melds and
/// concealed kongs) plus the standing tiles, `3 × fixed + standing == 13`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub fixed: Vec<Meld>,
    pub standing: Vec<Tile>,
}

impl Hand {
    pub fn new(fixed: Vec<Meld>, standing: Vec<Tile>) -> Self {
        Hand { fixed, standing }
    }

    /// Concealed hand with no fixed melds.
    pub fn concealed(standing: Vec<Tile>) -> Self {
        Hand { fixed: Vec::new(), standing }
    }

    pub fn standing_tally(&self) -> Tally {
        Tally::from_tiles(self.standing.iter().copied())
    }

    /// Every physical tile the hand holds, kongs counted as four.
    pub fn all_tiles(&self) -> Vec<Tile> {
        self.fixed
            .iter()
            .flat_map(|m| m.tiles())
            .chain(self.standing.iter().copied())
            .collect()
    }
}
