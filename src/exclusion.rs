// src/exclusion.rs
//! Patterns implied by a larger pattern are not scored on top of it.
//!
//! The rules run top to bottom in one pass. A rule fires when its trigger is
//! still set at the moment it is reached, so an earlier rule can disarm a
//! later one.

use crate::fan::{Fan, FanTable};
use crate::tiles::Wind;
use Fan::*;

#[derive(Debug, Clone, Copy)]
enum Effect {
    Clear(Fan),
    /// Saturating decrement, skipped when any of `unless` is set.
    Reduce { fan: Fan, by: u8, unless: &'static [Fan] },
    /// A set `from` is replaced by a single `to`.
    Convert { from: Fan, to: Fan },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    Always,
    /// Prevalent and seat wind differ.
    DistinctWinds,
}

#[derive(Debug)]
struct Rule {
    trigger: Fan,
    guard: Guard,
    effects: &'static [Effect],
}

use Effect::{Clear, Convert, Reduce};

const CONCEALED_TO_SELF_DRAWN: Effect = Convert { from: FullyConcealedHand, to: SelfDrawn };

const fn rule(trigger: Fan, effects: &'static [Effect]) -> Rule {
    Rule { trigger, guard: Guard::Always, effects }
}

const WIND_PUNG_OWNERS: &[Fan] = &[BigThreeWinds, LittleFourWinds, AllHonors, AllTerminalsAndHonors];

static RULES: &[Rule] = &[
    rule(BigFourWinds, &[
        Clear(BigThreeWinds), Clear(AllPungs), Clear(PrevalentWind), Clear(SeatWind),
        Clear(PungOfTerminalsOrHonors),
    ]),
    rule(BigThreeDragons, &[Clear(DragonPung), Clear(TwoDragonsPungs)]),
    rule(AllGreen, &[Clear(HalfFlush), Clear(OneVoidedSuit)]),
    rule(NineGates, &[
        Clear(FullFlush), Clear(ConcealedHand), Clear(OneVoidedSuit), Clear(NoHonors),
        Reduce { fan: PungOfTerminalsOrHonors, by: 1, unless: &[] },
        CONCEALED_TO_SELF_DRAWN,
    ]),
    rule(FourKongs, &[Clear(SingleWait)]),
    rule(SevenShiftedPairs, &[
        Clear(SevenPairs), Clear(FullFlush), Clear(ConcealedHand), Clear(OneVoidedSuit),
        Clear(NoHonors), Clear(SingleWait), CONCEALED_TO_SELF_DRAWN,
    ]),
    rule(ThirteenOrphans, &[
        Clear(AllTypes), Clear(ConcealedHand), Clear(SingleWait), CONCEALED_TO_SELF_DRAWN,
    ]),
    rule(AllTerminals, &[
        Clear(AllTerminalsAndHonors), Clear(AllPungs), Clear(OutsideHand),
        Clear(PungOfTerminalsOrHonors), Clear(NoHonors),
    ]),
    rule(LittleFourWinds, &[Clear(BigThreeWinds), Clear(PungOfTerminalsOrHonors)]),
    rule(LittleThreeDragons, &[Clear(TwoDragonsPungs), Clear(DragonPung)]),
    rule(AllHonors, &[
        Clear(AllTerminalsAndHonors), Clear(AllPungs), Clear(OutsideHand),
        Clear(PungOfTerminalsOrHonors),
    ]),
    rule(FourConcealedPungs, &[Clear(AllPungs), Clear(ConcealedHand), CONCEALED_TO_SELF_DRAWN]),
    rule(PureTerminalChows, &[
        Clear(SevenPairs), Clear(FullFlush), Clear(AllChows), Clear(PureDoubleChow),
        Clear(TwoTerminalChows), Clear(OneVoidedSuit), Clear(NoHonors),
    ]),
    rule(QuadrupleChow, &[Clear(PureShiftedPungs), Clear(TileHog), Clear(PureDoubleChow)]),
    rule(FourPureShiftedPungs, &[Clear(PureTripleChow), Clear(PureShiftedPungs), Clear(AllPungs)]),
    rule(FourPureShiftedChows, &[
        Clear(PureShiftedChows), Clear(ShortStraight), Clear(TwoTerminalChows),
        Clear(PureDoubleChow),
    ]),
    rule(AllTerminalsAndHonors, &[
        Clear(AllPungs), Clear(OutsideHand), Clear(PungOfTerminalsOrHonors),
    ]),
    rule(SevenPairs, &[Clear(ConcealedHand), Clear(SingleWait), CONCEALED_TO_SELF_DRAWN]),
    rule(GreaterHonorsAndKnittedTiles, &[
        Clear(LesserHonorsAndKnittedTiles), Clear(AllTypes), Clear(ConcealedHand),
        Clear(SingleWait), CONCEALED_TO_SELF_DRAWN,
    ]),
    rule(AllEvenPungs, &[Clear(AllPungs), Clear(AllSimples), Clear(NoHonors)]),
    rule(FullFlush, &[Clear(OneVoidedSuit), Clear(NoHonors)]),
    rule(PureTripleChow, &[Clear(PureShiftedPungs), Clear(PureDoubleChow)]),
    rule(PureShiftedPungs, &[Clear(PureTripleChow)]),
    rule(UpperTiles, &[Clear(NoHonors)]),
    rule(MiddleTiles, &[Clear(AllSimples), Clear(NoHonors)]),
    rule(LowerTiles, &[Clear(NoHonors)]),
    rule(ThreeSuitedTerminalChows, &[
        Clear(AllChows), Clear(NoHonors), Clear(MixedDoubleChow), Clear(TwoTerminalChows),
    ]),
    rule(AllFive, &[Clear(AllSimples), Clear(NoHonors)]),
    rule(LesserHonorsAndKnittedTiles, &[
        Clear(AllTypes), Clear(ConcealedHand), Clear(SingleWait), CONCEALED_TO_SELF_DRAWN,
    ]),
    rule(UpperFour, &[Clear(NoHonors)]),
    rule(LowerFour, &[Clear(NoHonors)]),
    rule(BigThreeWinds, &[Reduce {
        fan: PungOfTerminalsOrHonors,
        by: 3,
        unless: &[AllHonors, AllTerminalsAndHonors],
    }]),
    rule(ReversibleTiles, &[Clear(OneVoidedSuit)]),
    rule(LastTileDraw, &[Clear(SelfDrawn)]),
    rule(OutWithReplacementTile, &[Clear(SelfDrawn)]),
    rule(RobbingTheKong, &[Clear(LastTile)]),
    rule(TwoConcealedKongs, &[Clear(ConcealedKong)]),
    rule(HalfFlush, &[Clear(OneVoidedSuit)]),
    rule(MeldedHand, &[Clear(SingleWait)]),
    rule(TwoDragonsPungs, &[Clear(DragonPung)]),
    rule(FullyConcealedHand, &[Clear(SelfDrawn)]),
    rule(TwoMeldedKongs, &[Clear(MeldedKong)]),
    rule(AllChows, &[Clear(NoHonors)]),
    rule(PrevalentWind, &[Reduce { fan: PungOfTerminalsOrHonors, by: 1, unless: WIND_PUNG_OWNERS }]),
    Rule {
        trigger: SeatWind,
        guard: Guard::DistinctWinds,
        effects: &[Reduce { fan: PungOfTerminalsOrHonors, by: 1, unless: WIND_PUNG_OWNERS }],
    },
];

fn apply(effect: &Effect, fans: &mut FanTable) {
    match *effect {
        Clear(fan) => fans.clear(fan),
        Reduce { fan, by, unless } => {
            if !unless.iter().any(|&f| fans.has(f)) {
                fans.reduce(fan, by);
            }
        }
        Convert { from, to } => {
            if fans.has(from) {
                fans.clear(from);
                fans[to] = 1;
            }
        }
    }
}

/// Runs the exclusion rules over `fans`, then falls back to Chicken Hand when
/// nothing is left.
pub fn adjust_fan_table(fans: &mut FanTable, prevalent: Wind, seat: Wind) {
    for rule in RULES {
        if !fans.has(rule.trigger) {
            continue;
        }
        if rule.guard == Guard::DistinctWinds && prevalent == seat {
            continue;
        }
        for effect in rule.effects {
            apply(effect, fans);
        }
    }

    if fans.is_empty() {
        fans.add(ChickenHand);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(fans: &[Fan]) -> FanTable {
        let mut t = FanTable::new();
        for &f in fans {
            t.add(f);
        }
        t
    }

    fn adjusted(fans: &[Fan]) -> FanTable {
        let mut t = table(fans);
        adjust_fan_table(&mut t, Wind::East, Wind::South);
        t
    }

    #[test]
    fn every_rule_clears_something_else() {
        for rule in RULES {
            assert!(!rule.effects.is_empty(), "{:?}", rule.trigger);
            for effect in rule.effects {
                if let Clear(fan) = effect {
                    assert_ne!(*fan, rule.trigger);
                }
            }
        }
    }

    #[test]
    fn all_terminals_absorbs_its_parts() {
        let t = adjusted(&[
            AllTerminals, AllTerminalsAndHonors, AllPungs, OutsideHand,
            PungOfTerminalsOrHonors, PungOfTerminalsOrHonors, NoHonors, DoublePung,
        ]);
        assert_eq!(t, table(&[AllTerminals, DoublePung]));
    }

    #[test]
    fn big_three_dragons_clears_dragon_pungs() {
        let t = adjusted(&[BigThreeDragons, DragonPung, DragonPung, DragonPung, TwoDragonsPungs]);
        assert_eq!(t, table(&[BigThreeDragons]));
    }

    #[test]
    fn special_forms_turn_fully_concealed_into_self_drawn() {
        let t = adjusted(&[SevenShiftedPairs, SevenPairs, FullFlush, FullyConcealedHand]);
        assert_eq!(t, table(&[SevenShiftedPairs, SelfDrawn]));

        let t = adjusted(&[ThirteenOrphans, ConcealedHand]);
        assert_eq!(t, table(&[ThirteenOrphans]));
    }

    #[test]
    fn pure_triple_chow_and_pure_shifted_pungs_are_exclusive() {
        let t = adjusted(&[PureTripleChow, PureShiftedPungs, PureDoubleChow]);
        assert_eq!(t, table(&[PureTripleChow]));
    }

    #[test]
    fn wind_pungs_give_back_the_terminal_pung() {
        // one pung of the prevalent wind
        let t = adjusted(&[PrevalentWind, PungOfTerminalsOrHonors]);
        assert_eq!(t, table(&[PrevalentWind]));

        // the same wind is both prevalent and seat: only one pung to give back
        let mut t = table(&[PrevalentWind, SeatWind, PungOfTerminalsOrHonors, PungOfTerminalsOrHonors]);
        adjust_fan_table(&mut t, Wind::East, Wind::East);
        assert_eq!(t, table(&[PrevalentWind, SeatWind, PungOfTerminalsOrHonors]));

        // distinct winds
        let t = adjusted(&[PrevalentWind, SeatWind, PungOfTerminalsOrHonors, PungOfTerminalsOrHonors]);
        assert_eq!(t, table(&[PrevalentWind, SeatWind]));
    }

    #[test]
    fn big_three_winds_owns_its_pungs() {
        let t = adjusted(&[BigThreeWinds, PungOfTerminalsOrHonors, PungOfTerminalsOrHonors,
                           PungOfTerminalsOrHonors, PungOfTerminalsOrHonors, PrevalentWind]);
        assert_eq!(t, table(&[BigThreeWinds, PungOfTerminalsOrHonors, PrevalentWind]));

        // inside all honors the terminal pungs are already gone
        let t = adjusted(&[AllHonors, BigThreeWinds, PungOfTerminalsOrHonors, PungOfTerminalsOrHonors]);
        assert_eq!(t, table(&[AllHonors, BigThreeWinds]));
    }

    #[test]
    fn decrements_saturate() {
        let t = adjusted(&[NineGates]);
        assert_eq!(t, table(&[NineGates]));
    }

    #[test]
    fn empty_table_is_a_chicken_hand() {
        let t = adjusted(&[]);
        assert_eq!(t, table(&[ChickenHand]));
        assert_eq!(t.total(), 1);

        // exclusions can empty a table too
        let t = adjusted(&[NoHonors, FullFlush]);
        assert_eq!(t, table(&[FullFlush]));
    }
}
