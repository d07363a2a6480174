// src/fan.rs
use std::fmt;
use std::ops::{Index, IndexMut};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Number of scoring patterns, flower tiles included.
pub const FAN_KINDS: usize = 82;

/// Every scoring pattern of Chinese Official mahjong, ordered by point value.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Fan {
    // 88
    BigFourWinds = 0,
    BigThreeDragons,
    AllGreen,
    NineGates,
    FourKongs,
    SevenShiftedPairs,
    ThirteenOrphans,
    // 64
    AllTerminals,
    LittleFourWinds,
    LittleThreeDragons,
    AllHonors,
    FourConcealedPungs,
    PureTerminalChows,
    // 48
    QuadrupleChow,
    FourPureShiftedPungs,
    // 32
    FourPureShiftedChows,
    ThreeKongs,
    AllTerminalsAndHonors,
    // 24
    SevenPairs,
    GreaterHonorsAndKnittedTiles,
    AllEvenPungs,
    FullFlush,
    PureTripleChow,
    PureShiftedPungs,
    UpperTiles,
    MiddleTiles,
    LowerTiles,
    // 16
    PureStraight,
    ThreeSuitedTerminalChows,
    PureShiftedChows,
    AllFive,
    TriplePung,
    ThreeConcealedPungs,
    // 12
    LesserHonorsAndKnittedTiles,
    KnittedStraight,
    UpperFour,
    LowerFour,
    BigThreeWinds,
    // 8
    MixedStraight,
    ReversibleTiles,
    MixedTripleChow,
    MixedShiftedPungs,
    ChickenHand,
    LastTileDraw,
    LastTileClaim,
    OutWithReplacementTile,
    RobbingTheKong,
    // 6
    AllPungs,
    HalfFlush,
    MixedShiftedChows,
    AllTypes,
    MeldedHand,
    TwoConcealedKongs,
    TwoDragonsPungs,
    // 5
    ConcealedKongAndMeldedKong,
    // 4
    OutsideHand,
    FullyConcealedHand,
    TwoMeldedKongs,
    LastTile,
    // 2
    DragonPung,
    PrevalentWind,
    SeatWind,
    ConcealedHand,
    AllChows,
    TileHog,
    DoublePung,
    TwoConcealedPungs,
    ConcealedKong,
    AllSimples,
    // 1
    PureDoubleChow,
    MixedDoubleChow,
    ShortStraight,
    TwoTerminalChows,
    PungOfTerminalsOrHonors,
    MeldedKong,
    OneVoidedSuit,
    NoHonors,
    EdgeWait,
    ClosedWait,
    SingleWait,
    SelfDrawn,
    FlowerTiles,
}

use Fan::*;

impl Fan {
    pub const ALL: [Fan; FAN_KINDS] = [
        BigFourWinds, BigThreeDragons, AllGreen, NineGates, FourKongs, SevenShiftedPairs,
        ThirteenOrphans, AllTerminals, LittleFourWinds, LittleThreeDragons, AllHonors,
        FourConcealedPungs, PureTerminalChows, QuadrupleChow, FourPureShiftedPungs,
        FourPureShiftedChows, ThreeKongs, AllTerminalsAndHonors, SevenPairs,
        GreaterHonorsAndKnittedTiles, AllEvenPungs, FullFlush, PureTripleChow,
        PureShiftedPungs, UpperTiles, MiddleTiles, LowerTiles, PureStraight,
        ThreeSuitedTerminalChows, PureShiftedChows, AllFive, TriplePung,
        ThreeConcealedPungs, LesserHonorsAndKnittedTiles, KnittedStraight, UpperFour,
        LowerFour, BigThreeWinds, MixedStraight, ReversibleTiles, MixedTripleChow,
        MixedShiftedPungs, ChickenHand, LastTileDraw, LastTileClaim,
        OutWithReplacementTile, RobbingTheKong, AllPungs, HalfFlush, MixedShiftedChows,
        AllTypes, MeldedHand, TwoConcealedKongs, TwoDragonsPungs,
        ConcealedKongAndMeldedKong, OutsideHand, FullyConcealedHand, TwoMeldedKongs,
        LastTile, DragonPung, PrevalentWind, SeatWind, ConcealedHand, AllChows, TileHog,
        DoublePung, TwoConcealedPungs, ConcealedKong, AllSimples, PureDoubleChow,
        MixedDoubleChow, ShortStraight, TwoTerminalChows, PungOfTerminalsOrHonors,
        MeldedKong, OneVoidedSuit, NoHonors, EdgeWait, ClosedWait, SingleWait, SelfDrawn,
        FlowerTiles,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Points scored per occurrence.
    pub fn points(self) -> u16 {
        match self {
            BigFourWinds | BigThreeDragons | AllGreen | NineGates | FourKongs
            | SevenShiftedPairs | ThirteenOrphans => 88,
            AllTerminals | LittleFourWinds | LittleThreeDragons | AllHonors
            | FourConcealedPungs | PureTerminalChows => 64,
            QuadrupleChow | FourPureShiftedPungs => 48,
            FourPureShiftedChows | ThreeKongs | AllTerminalsAndHonors => 32,
            SevenPairs | GreaterHonorsAndKnittedTiles | AllEvenPungs | FullFlush
            | PureTripleChow | PureShiftedPungs | UpperTiles | MiddleTiles | LowerTiles => 24,
            PureStraight | ThreeSuitedTerminalChows | PureShiftedChows | AllFive | TriplePung
            | ThreeConcealedPungs => 16,
            LesserHonorsAndKnittedTiles | KnittedStraight | UpperFour | LowerFour
            | BigThreeWinds => 12,
            MixedStraight | ReversibleTiles | MixedTripleChow | MixedShiftedPungs
            | LastTileDraw | LastTileClaim | OutWithReplacementTile | RobbingTheKong => 8,
            AllPungs | HalfFlush | MixedShiftedChows | AllTypes | MeldedHand
            | TwoConcealedKongs | TwoDragonsPungs => 6,
            ConcealedKongAndMeldedKong => 5,
            OutsideHand | FullyConcealedHand | TwoMeldedKongs | LastTile => 4,
            DragonPung | PrevalentWind | SeatWind | ConcealedHand | AllChows | TileHog
            | DoublePung | TwoConcealedPungs | ConcealedKong | AllSimples => 2,
            // A hand with no other pattern is floored at a single point.
            ChickenHand => 1,
            PureDoubleChow | MixedDoubleChow | ShortStraight | TwoTerminalChows
            | PungOfTerminalsOrHonors | MeldedKong | OneVoidedSuit | NoHonors | EdgeWait
            | ClosedWait | SingleWait | SelfDrawn | FlowerTiles => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BigFourWinds => "Big Four Winds",
            BigThreeDragons => "Big Three Dragons",
            AllGreen => "All Green",
            NineGates => "Nine Gates",
            FourKongs => "Four Kongs",
            SevenShiftedPairs => "Seven Shifted Pairs",
            ThirteenOrphans => "Thirteen Orphans",
            AllTerminals => "All Terminals",
            LittleFourWinds => "Little Four Winds",
            LittleThreeDragons => "Little Three Dragons",
            AllHonors => "All Honors",
            FourConcealedPungs => "Four Concealed Pungs",
            PureTerminalChows => "Pure Terminal Chows",
            QuadrupleChow => "Quadruple Chow",
            FourPureShiftedPungs => "Four Pure Shifted Pungs",
            FourPureShiftedChows => "Four Pure Shifted Chows",
            ThreeKongs => "Three Kongs",
            AllTerminalsAndHonors => "All Terminals and Honors",
            SevenPairs => "Seven Pairs",
            GreaterHonorsAndKnittedTiles => "Greater Honors and Knitted Tiles",
            AllEvenPungs => "All Even Pungs",
            FullFlush => "Full Flush",
            PureTripleChow => "Pure Triple Chow",
            PureShiftedPungs => "Pure Shifted Pungs",
            UpperTiles => "Upper Tiles",
            MiddleTiles => "Middle Tiles",
            LowerTiles => "Lower Tiles",
            PureStraight => "Pure Straight",
            ThreeSuitedTerminalChows => "Three-Suited Terminal Chows",
            PureShiftedChows => "Pure Shifted Chows",
            AllFive => "All Five",
            TriplePung => "Triple Pung",
            ThreeConcealedPungs => "Three Concealed Pungs",
            LesserHonorsAndKnittedTiles => "Lesser Honors and Knitted Tiles",
            KnittedStraight => "Knitted Straight",
            UpperFour => "Upper Four",
            LowerFour => "Lower Four",
            BigThreeWinds => "Big Three Winds",
            MixedStraight => "Mixed Straight",
            ReversibleTiles => "Reversible Tiles",
            MixedTripleChow => "Mixed Triple Chow",
            MixedShiftedPungs => "Mixed Shifted Pungs",
            ChickenHand => "Chicken Hand",
            LastTileDraw => "Last Tile Draw",
            LastTileClaim => "Last Tile Claim",
            OutWithReplacementTile => "Out with Replacement Tile",
            RobbingTheKong => "Robbing the Kong",
            AllPungs => "All Pungs",
            HalfFlush => "Half Flush",
            MixedShiftedChows => "Mixed Shifted Chows",
            AllTypes => "All Types",
            MeldedHand => "Melded Hand",
            TwoConcealedKongs => "Two Concealed Kongs",
            TwoDragonsPungs => "Two Dragons Pungs",
            ConcealedKongAndMeldedKong => "Concealed Kong and Melded Kong",
            OutsideHand => "Outside Hand",
            FullyConcealedHand => "Fully Concealed Hand",
            TwoMeldedKongs => "Two Melded Kongs",
            LastTile => "Last Tile",
            DragonPung => "Dragon Pung",
            PrevalentWind => "Prevalent Wind",
            SeatWind => "Seat Wind",
            ConcealedHand => "Concealed Hand",
            AllChows => "All Chows",
            TileHog => "Tile Hog",
            DoublePung => "Double Pung",
            TwoConcealedPungs => "Two Concealed Pungs",
            ConcealedKong => "Concealed Kong",
            AllSimples => "All Simples",
            PureDoubleChow => "Pure Double Chow",
            MixedDoubleChow => "Mixed Double Chow",
            ShortStraight => "Short Straight",
            TwoTerminalChows => "Two Terminal Chows",
            PungOfTerminalsOrHonors => "Pung of Terminals or Honors",
            MeldedKong => "Melded Kong",
            OneVoidedSuit => "One Voided Suit",
            NoHonors => "No Honors",
            EdgeWait => "Edge Wait",
            ClosedWait => "Closed Wait",
            SingleWait => "Single Wait",
            SelfDrawn => "Self-Drawn",
            FlowerTiles => "Flower Tiles",
        }
    }

    pub fn chinese_name(self) -> &'static str {
        match self {
            BigFourWinds => "大四喜",
            BigThreeDragons => "大三元",
            AllGreen => "绿一色",
            NineGates => "九莲宝灯",
            FourKongs => "四杠",
            SevenShiftedPairs => "连七对",
            ThirteenOrphans => "十三幺",
            AllTerminals => "清幺九",
            LittleFourWinds => "小四喜",
            LittleThreeDragons => "小三元",
            AllHonors => "字一色",
            FourConcealedPungs => "四暗刻",
            PureTerminalChows => "一色双龙会",
            QuadrupleChow => "一色四同顺",
            FourPureShiftedPungs => "一色四节高",
            FourPureShiftedChows => "一色四步高",
            ThreeKongs => "三杠",
            AllTerminalsAndHonors => "混幺九",
            SevenPairs => "七对",
            GreaterHonorsAndKnittedTiles => "七星不靠",
            AllEvenPungs => "全双刻",
            FullFlush => "清一色",
            PureTripleChow => "一色三同顺",
            PureShiftedPungs => "一色三节高",
            UpperTiles => "全大",
            MiddleTiles => "全中",
            LowerTiles => "全小",
            PureStraight => "清龙",
            ThreeSuitedTerminalChows => "三色双龙会",
            PureShiftedChows => "一色三步高",
            AllFive => "全带五",
            TriplePung => "三同刻",
            ThreeConcealedPungs => "三暗刻",
            LesserHonorsAndKnittedTiles => "全不靠",
            KnittedStraight => "组合龙",
            UpperFour => "大于五",
            LowerFour => "小于五",
            BigThreeWinds => "三风刻",
            MixedStraight => "花龙",
            ReversibleTiles => "推不倒",
            MixedTripleChow => "三色三同顺",
            MixedShiftedPungs => "三色三节高",
            ChickenHand => "无番和",
            LastTileDraw => "妙手回春",
            LastTileClaim => "海底捞月",
            OutWithReplacementTile => "杠上开花",
            RobbingTheKong => "抢杠和",
            AllPungs => "碰碰和",
            HalfFlush => "混一色",
            MixedShiftedChows => "三色三步高",
            AllTypes => "五门齐",
            MeldedHand => "全求人",
            TwoConcealedKongs => "双暗杠",
            TwoDragonsPungs => "双箭刻",
            ConcealedKongAndMeldedKong => "明暗杠",
            OutsideHand => "全带幺",
            FullyConcealedHand => "不求人",
            TwoMeldedKongs => "双明杠",
            LastTile => "和绝张",
            DragonPung => "箭刻",
            PrevalentWind => "圈风刻",
            SeatWind => "门风刻",
            ConcealedHand => "门前清",
            AllChows => "平和",
            TileHog => "四归一",
            DoublePung => "双同刻",
            TwoConcealedPungs => "双暗刻",
            ConcealedKong => "暗杠",
            AllSimples => "断幺",
            PureDoubleChow => "一般高",
            MixedDoubleChow => "喜相逢",
            ShortStraight => "连六",
            TwoTerminalChows => "老少副",
            PungOfTerminalsOrHonors => "幺九刻",
            MeldedKong => "明杠",
            OneVoidedSuit => "缺一门",
            NoHonors => "无字",
            EdgeWait => "边张",
            ClosedWait => "嵌张",
            SingleWait => "单钓将",
            SelfDrawn => "自摸",
            FlowerTiles => "花牌",
        }
    }
}

impl fmt::Display for Fan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Occurrence count of every pattern in one scored hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FanTable([u8; FAN_KINDS]);

impl Default for FanTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FanTable {
    pub fn new() -> Self {
        FanTable([0; FAN_KINDS])
    }

    /// Table holding a single occurrence of `fan`.
    pub fn with(fan: Fan) -> Self {
        let mut table = Self::new();
        table[fan] = 1;
        table
    }

    pub fn get(&self, fan: Fan) -> u8 {
        self.0[fan.index()]
    }

    pub fn has(&self, fan: Fan) -> bool {
        self.get(fan) > 0
    }

    pub fn add(&mut self, fan: Fan) {
        self.0[fan.index()] = self.0[fan.index()].saturating_add(1);
    }

    pub fn clear(&mut self, fan: Fan) {
        self.0[fan.index()] = 0;
    }

    /// Lowers a count, stopping at zero.
    pub fn reduce(&mut self, fan: Fan, by: u8) {
        self.0[fan.index()] = self.0[fan.index()].saturating_sub(by);
    }

    /// Sum of points over every pattern.
    pub fn total(&self) -> u32 {
        self.iter().map(|(fan, n)| fan.points() as u32 * n as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Patterns with a non-zero count, highest value first.
    pub fn iter(&self) -> impl Iterator<Item = (Fan, u8)> + '_ {
        Fan::ALL.into_iter().filter_map(move |fan| {
            let n = self.get(fan);
            (n > 0).then_some((fan, n))
        })
    }

    pub fn counts(&self) -> &[u8; FAN_KINDS] {
        &self.0
    }
}

impl Index<Fan> for FanTable {
    type Output = u8;
    fn index(&self, fan: Fan) -> &u8 {
        &self.0[fan.index()]
    }
}

impl IndexMut<Fan> for FanTable {
    fn index_mut(&mut self, fan: Fan) -> &mut u8 {
        &mut self.0[fan.index()]
    }
}

/// Serialized as `{ "Pattern Name": count }` over non-zero entries.
impl Serialize for FanTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (fan, n) in self.iter() {
            map.serialize_entry(fan.name(), &n)?;
        }
        map.end()
    }
}
