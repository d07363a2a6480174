// src/special_forms.rs
//! Hands that do not split into four melds and a pair, plus the knitted
//! straight, which replaces three melds with a fixed nine-tile template.

use crate::errors::ScoreResult;
use crate::fan::{Fan, FanTable};
use crate::hand::Tally;
use crate::hand_parser::divide_tiles;
use crate::meld::Meld;
use crate::rule::ScoringRule;
use crate::tiles::{Tile, KNITTED_STRAIGHTS, THIRTEEN_ORPHANS};

/// Seven pairs or seven shifted pairs.
pub fn seven_pairs_fans(tally: &Tally, rule: &ScoringRule) -> Option<FanTable> {
    if tally.total() != 14 {
        return None;
    }
    let mut pairs = 0;
    for (_, c) in tally.iter() {
        match c {
            2 => pairs += 1,
            4 if rule.seven_pairs_four_of_a_kind => pairs += 2,
            _ => return None,
        }
    }
    if pairs != 7 {
        return None;
    }

    if is_seven_shifted_pairs(tally) {
        Some(FanTable::with(Fan::SevenShiftedPairs))
    } else {
        Some(FanTable::with(Fan::SevenPairs))
    }
}

/// Seven consecutive ranks of one suit, one pair each.
fn is_seven_shifted_pairs(tally: &Tally) -> bool {
    let kinds: Vec<(Tile, u8)> = tally.iter().collect();
    if kinds.len() != 7 || kinds.iter().any(|&(_, c)| c != 2) {
        return false;
    }
    let first = kinds[0].0;
    first.is_numbered()
        && kinds
            .iter()
            .enumerate()
            .all(|(i, &(t, _))| first.offset(i as i8) == Some(t))
}

/// One of each terminal and honor plus a duplicate of any of them.
pub fn thirteen_orphans_fans(tally: &Tally) -> Option<FanTable> {
    if tally.total() != 14 {
        return None;
    }
    let mut duplicate = false;
    for &tile in &THIRTEEN_ORPHANS {
        match tally.count(tile) {
            1 => {}
            2 if !duplicate => duplicate = true,
            _ => return None,
        }
    }
    duplicate.then(|| FanTable::with(Fan::ThirteenOrphans))
}

/// Greater or lesser honors and knitted tiles.
///
/// Fourteen different tiles: honors plus 7–9 numbered tiles drawn from a
/// single knitted template.
pub fn honors_and_knitted_fans(tally: &Tally) -> Option<FanTable> {
    if tally.total() != 14 || tally.iter().any(|(_, c)| c != 1) {
        return None;
    }
    let numbered: Vec<Tile> = tally.iter().map(|(t, _)| t).filter(|t| t.is_numbered()).collect();
    if !(7..=9).contains(&numbered.len()) {
        return None;
    }
    let template = KNITTED_STRAIGHTS
        .iter()
        .find(|template| numbered.iter().all(|t| template.contains(t)))?;

    let honors = 14 - numbered.len();
    if honors == 7 {
        return Some(FanTable::with(Fan::GreaterHonorsAndKnittedTiles));
    }
    let mut fans = FanTable::with(Fan::LesserHonorsAndKnittedTiles);
    if numbered.len() == template.len() {
        fans.add(Fan::KnittedStraight);
    }
    Some(fans)
}

/// First knitted template fully present in `tally`.
pub fn find_knitted_straight(tally: &Tally) -> Option<&'static [Tile; 9]> {
    KNITTED_STRAIGHTS
        .iter()
        .find(|template| template.iter().all(|&t| tally.count(t) > 0))
}

/// A knitted straight completed by one meld and a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnittedStraightHand {
    pub template: &'static [Tile; 9],
    /// The fourth meld: the fixed meld if there is one, otherwise read from the tiles.
    pub meld: Meld,
    pub pair: Tile,
}

impl KnittedStraightHand {
    /// Every physical tile, a kong counted as four.
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles = self.template.to_vec();
        tiles.extend(self.meld.tiles());
        tiles.extend([self.pair, self.pair]);
        tiles
    }
}

/// Reads `tally` (standing tiles plus the winning tile) as a knitted straight,
/// the fixed meld if any, and whatever the residue resolves to.
///
/// Only one reading is accepted; an ambiguous residue is not a knitted hand.
pub fn match_knitted_straight(tally: &Tally, fixed: &[Meld]) -> ScoreResult<Option<KnittedStraightHand>> {
    if fixed.len() > 1 {
        return Ok(None);
    }
    let Some(template) = find_knitted_straight(tally) else {
        return Ok(None);
    };

    let mut rest = *tally;
    for &tile in template {
        rest.remove(tile);
    }
    let found = divide_tiles(rest, fixed.len() + 3)?;
    let [residue] = found.as_slice() else {
        return Ok(None);
    };

    let (meld, pair) = match (fixed.first(), residue.as_slice()) {
        (Some(&meld), [pair]) => (meld, pair.tile),
        (None, [meld, pair]) => (*meld, pair.tile),
        _ => return Ok(None),
    };
    Ok(Some(KnittedStraightHand { template, meld, pair }))
}

/// Whether `tally` completes as a knitted straight hand with `fixed_count`
/// fixed melds, without scoring it.
pub fn is_knitted_straight_win(tally: &Tally, fixed_count: usize) -> bool {
    if fixed_count > 1 {
        return false;
    }
    let Some(template) = find_knitted_straight(tally) else {
        return false;
    };
    let mut rest = *tally;
    for &tile in template {
        rest.remove(tile);
    }
    matches!(divide_tiles(rest, fixed_count + 3), Ok(found) if !found.is_empty())
}
