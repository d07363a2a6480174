// src/fan_calculation.rs

use serde::{Deserialize, Serialize};

use crate::adjust::{
    adjust_by_all_chows, adjust_by_pack_traits, adjust_by_pair, adjust_by_rank_range,
    adjust_by_self_drawn, adjust_by_suits, adjust_by_tiles_hog, adjust_by_tiles_traits,
    adjust_by_waiting_form, adjust_by_win_flags, is_nine_gates,
};
use crate::errors::{ScoreError, ScoreResult};
use crate::exclusion::adjust_fan_table;
use crate::fan::{Fan, FanTable};
use crate::group_fans::{calculate_kongs, evaluate_groups, single_pung_fans, wind_pung_fans, PungGroup};
use crate::hand::{count_tiles, Hand, Tally};
use crate::hand_parser::{divide_win_hand, Division};
use crate::meld::Meld;
use crate::rule::ScoringRule;
use crate::special_forms::{
    honors_and_knitted_fans, match_knitted_straight, seven_pairs_fans, thirteen_orphans_fans,
    KnittedStraightHand,
};
use crate::tiles::{Tile, Wind, ALL_TILES};
use crate::wait::{waiting_tiles, WaitSet};

/// Circumstances of the win.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinFlags {
    /// Drawn from the wall rather than claimed from a discard.
    pub self_drawn: bool,
    /// The winning tile is the last copy not yet visible.
    pub fourth_tile: bool,
    /// Replacement tile after a kong (self-drawn) or a robbed kong (discard).
    pub about_kong: bool,
    /// Last tile of the wall.
    pub wall_last: bool,
    /// Won on the first draw, before any waiting hand existed.
    pub initial: bool,
}

/// Everything needed to score one win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreParameters {
    /// The hand before the winning tile.
    pub hand: Hand,
    pub win_tile: Tile,
    pub flower_count: u8,
    pub flags: WinFlags,
    pub prevalent_wind: Wind,
    pub seat_wind: Wind,
    pub rule: ScoringRule,
}

impl ScoreParameters {
    /// A discard win with no flowers, East round, East seat, official rules.
    pub fn new(hand: Hand, win_tile: Tile) -> Self {
        Self {
            hand,
            win_tile,
            flower_count: 0,
            flags: WinFlags::default(),
            prevalent_wind: Wind::East,
            seat_wind: Wind::East,
            rule: ScoringRule::default(),
        }
    }
}

/// The best reading of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FanScore {
    /// Points including flowers.
    pub total: u32,
    pub fans: FanTable,
}

/// Rejects hands whose shape or tile counts cannot occur at a table.
pub fn validate_input(hand: &Hand, win_tile: Tile) -> ScoreResult<()> {
    let fixed = hand.fixed.len();
    let standing = hand.standing.len();
    if fixed > 4 {
        return Err(ScoreError::MalformedHand {
            message: format!("{} fixed melds, at most 4 allowed", fixed),
        });
    }
    if standing > 13 {
        return Err(ScoreError::MalformedHand {
            message: format!("{} standing tiles, at most 13 allowed", standing),
        });
    }
    if 3 * fixed + standing != 13 {
        return Err(ScoreError::MalformedHand {
            message: format!("{} fixed melds and {} standing tiles do not make 13", fixed, standing),
        });
    }
    for meld in &hand.fixed {
        meld.check()?;
    }

    let mut tiles = hand.all_tiles();
    tiles.push(win_tile);
    let counts = count_tiles(&tiles);
    if let Some((tile, &count)) = ALL_TILES.iter().zip(&counts).find(|(_, &c)| c > 4) {
        return Err(ScoreError::OverusedTile { tile: *tile, count });
    }
    Ok(())
}

/// Drops win flags that the hand itself contradicts.
fn normalize_flags(params: &ScoreParameters) -> WinFlags {
    let mut flags = params.flags;
    let hand = &params.hand;
    if flags.about_kong {
        if flags.self_drawn && !hand.fixed.iter().any(Meld::is_kong) {
            debug!("replacement-tile win without a kong, flag dropped");
            flags.about_kong = false;
        } else if !flags.self_drawn
            && (hand.standing.contains(&params.win_tile)
                || hand.fixed.iter().any(|m| m.contains(params.win_tile)))
        {
            debug!("robbed {:?} is already held, flag dropped", params.win_tile);
            flags.about_kong = false;
        }
    }
    flags
}

/// Scores a winning hand: every special form and every division is read, and
/// the highest total wins.
pub fn calculate_fan(params: &ScoreParameters) -> ScoreResult<FanScore> {
    // --- 1. Validation ---
    validate_input(&params.hand, params.win_tile)?;

    let fixed = params.hand.fixed.as_slice();
    let standing = params.hand.standing_tally();
    let tally = standing.with(params.win_tile);
    let scorer = Scorer {
        params,
        flags: normalize_flags(params),
        standing,
        waits: waiting_tiles(&standing, fixed.len(), &params.rule),
    };

    // --- 2. Special forms ---
    let mut best: Option<FanTable> = None;
    if fixed.len() <= 1 {
        if let Some(hand) = match_knitted_straight(&tally, fixed)? {
            best = Some(scorer.score_knitted(&hand));
        }
    }
    if best.is_none() && fixed.is_empty() {
        best = thirteen_orphans_fans(&tally)
            .or_else(|| honors_and_knitted_fans(&tally))
            .or_else(|| seven_pairs_fans(&tally, &params.rule))
            .map(|fans| scorer.score_special(fans, &tally));
    }

    // --- 3. Basic form, also tried against plain seven pairs ---
    if best.map_or(true, |fans| fans.has(Fan::SevenPairs)) {
        let divisions = divide_win_hand(tally, fixed)?;
        for division in &divisions {
            let fans = scorer.score_division(division);
            if best.map_or(true, |b| fans.total() > b.total()) {
                debug!("division {:?} scores {}", division.melds, fans.total());
                best = Some(fans);
            }
        }
    }

    // --- 4. Flowers ---
    let Some(mut fans) = best else {
        return Err(ScoreError::NotWinningHand);
    };
    fans[Fan::FlowerTiles] = params.flower_count;
    Ok(FanScore { total: fans.total(), fans })
}

/// Per-call context shared by every reading of the hand.
struct Scorer<'a> {
    params: &'a ScoreParameters,
    flags: WinFlags,
    /// Standing tiles before the winning tile.
    standing: Tally,
    /// Kinds that would have completed `standing`.
    waits: WaitSet,
}

impl Scorer<'_> {
    fn fixed(&self) -> &[Meld] {
        &self.params.hand.fixed
    }

    fn score_division(&self, division: &Division) -> FanTable {
        let params = self.params;
        let groups = division.groups();
        let pair = division.pair();
        let mut fans = FanTable::new();

        evaluate_groups(groups, pair, &mut fans);
        calculate_kongs(&self.pung_groups(division), &mut fans, &params.rule);

        adjust_by_self_drawn(self.fixed(), self.flags.self_drawn, &mut fans);
        if self.fixed().is_empty() && is_nine_gates(&self.standing) {
            fans.add(Fan::NineGates);
        }
        adjust_by_win_flags(&self.flags, &mut fans);
        adjust_by_pair(pair, &mut fans);
        adjust_by_pack_traits(&division.melds, &mut fans);
        adjust_by_all_chows(groups, pair, &mut fans);

        let tiles = division.tiles();
        adjust_by_suits(&tiles, &mut fans);
        adjust_by_rank_range(&tiles, &mut fans);
        adjust_by_tiles_traits(&tiles, &mut fans);
        adjust_by_tiles_hog(&tiles, &mut fans);

        if !self.flags.initial {
            adjust_by_waiting_form(division.concealed(), &self.waits, params.win_tile, &mut fans);
        }
        wind_pung_fans(groups, params.prevalent_wind, params.seat_wind, &mut fans);
        adjust_fan_table(&mut fans, params.prevalent_wind, params.seat_wind);
        fans
    }

    /// Pungs and kongs of a division with their concealment. On a discard win
    /// the pung holding the winning tile is exposed, unless that tile can sit
    /// in a concealed chow instead.
    fn pung_groups(&self, division: &Division) -> Vec<PungGroup> {
        let win_tile = self.params.win_tile;
        let win_in_chow = division
            .concealed()
            .iter()
            .any(|m| m.is_chow() && m.contains(win_tile));
        let claimed = !self.flags.self_drawn && !win_in_chow;

        let fixed = division.fixed().iter().filter(|m| m.is_pung_like()).map(|m| PungGroup {
            tile: m.tile,
            kong: m.is_kong(),
            concealed: m.is_concealed(),
        });
        let formed = division
            .groups()
            .iter()
            .skip(division.fixed_count)
            .filter(|m| m.is_pung_like())
            .map(|m| PungGroup {
                tile: m.tile,
                kong: false,
                concealed: !(claimed && m.tile == win_tile),
            });
        fixed.chain(formed).collect()
    }

    fn score_knitted(&self, hand: &KnittedStraightHand) -> FanTable {
        let params = self.params;
        let mut fans = FanTable::with(Fan::KnittedStraight);

        let meld = hand.meld;
        if meld.is_chow() {
            if hand.pair.is_numbered() {
                fans.add(Fan::AllChows);
            }
        } else {
            let pung = PungGroup {
                tile: meld.tile,
                kong: meld.is_kong(),
                concealed: meld.is_concealed(),
            };
            calculate_kongs(&[pung], &mut fans, &params.rule);
            single_pung_fans(&[meld.tile], &mut fans);
        }

        adjust_by_self_drawn(self.fixed(), self.flags.self_drawn, &mut fans);
        adjust_by_win_flags(&self.flags, &mut fans);

        let tiles = hand.tiles();
        adjust_by_suits(&tiles, &mut fans);
        adjust_by_tiles_traits(&tiles, &mut fans);
        adjust_by_tiles_hog(&tiles, &mut fans);

        if !self.flags.initial {
            // the fourth meld counts only when it was formed from standing tiles
            let melds = [meld, Meld::pair(hand.pair)];
            let concealed = if self.fixed().is_empty() { &melds[..] } else { &melds[1..] };
            adjust_by_waiting_form(concealed, &self.waits, params.win_tile, &mut fans);
        }
        wind_pung_fans(&[meld], params.prevalent_wind, params.seat_wind, &mut fans);
        adjust_fan_table(&mut fans, params.prevalent_wind, params.seat_wind);
        fans
    }

    /// Seven pairs, thirteen orphans and honors-and-knitted hands. Always
    /// concealed, so only the whole-hand passes that can still apply run.
    fn score_special(&self, mut fans: FanTable, tally: &Tally) -> FanTable {
        let params = self.params;
        adjust_by_self_drawn(&[], self.flags.self_drawn, &mut fans);
        adjust_by_win_flags(&self.flags, &mut fans);

        let tiles = tally.tiles();
        adjust_by_suits(&tiles, &mut fans);
        if fans.has(Fan::SevenPairs) || fans.has(Fan::SevenShiftedPairs) {
            adjust_by_rank_range(&tiles, &mut fans);
            adjust_by_tiles_traits(&tiles, &mut fans);
            adjust_by_tiles_hog(&tiles, &mut fans);
        }
        adjust_fan_table(&mut fans, params.prevalent_wind, params.seat_wind);
        fans
    }
}
