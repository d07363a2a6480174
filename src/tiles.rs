// src/tiles.rs
use serde::{Deserialize, Serialize};

/// Number of distinct tile kinds.
pub const TILE_KINDS: usize = 34;

/// The 34 tile kinds in canonical order: characters, bamboo, dots, then the
/// four winds and the three dragons.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tile {
    Man1 = 0, Man2, Man3, Man4, Man5, Man6, Man7, Man8, Man9,
    Sou1, Sou2, Sou3, Sou4, Sou5, Sou6, Sou7, Sou8, Sou9,
    Pin1, Pin2, Pin3, Pin4, Pin5, Pin6, Pin7, Pin8, Pin9,
    East, South, West, North,
    Red, Green, White,
}

use Tile::*;

pub const ALL_TILES: [Tile; TILE_KINDS] = [
    Man1, Man2, Man3, Man4, Man5, Man6, Man7, Man8, Man9,
    Sou1, Sou2, Sou3, Sou4, Sou5, Sou6, Sou7, Sou8, Sou9,
    Pin1, Pin2, Pin3, Pin4, Pin5, Pin6, Pin7, Pin8, Pin9,
    East, South, West, North,
    Red, Green, White,
];

/// One of each terminal and honor.
pub const THIRTEEN_ORPHANS: [Tile; 13] = [
    Man1, Man9, Sou1, Sou9, Pin1, Pin9,
    East, South, West, North, Red, Green, White,
];

/// The six ways to knit 147, 258 and 369 across the three suits.
pub const KNITTED_STRAIGHTS: [[Tile; 9]; 6] = [
    [Man1, Man4, Man7, Sou2, Sou5, Sou8, Pin3, Pin6, Pin9],
    [Man1, Man4, Man7, Sou3, Sou6, Sou9, Pin2, Pin5, Pin8],
    [Man2, Man5, Man8, Sou1, Sou4, Sou7, Pin3, Pin6, Pin9],
    [Man2, Man5, Man8, Sou3, Sou6, Sou9, Pin1, Pin4, Pin7],
    [Man3, Man6, Man9, Sou1, Sou4, Sou7, Pin2, Pin5, Pin8],
    [Man3, Man6, Man9, Sou2, Sou5, Sou8, Pin1, Pin4, Pin7],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Characters,
    Bamboo,
    Dots,
    Honors,
}

impl TryFrom<u8> for Tile {
    type Error = ();
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        ALL_TILES.get(v as usize).copied().ok_or(())
    }
}

impl Tile {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn suit(self) -> Suit {
        match self as u8 / 9 {
            0 => Suit::Characters,
            1 => Suit::Bamboo,
            2 => Suit::Dots,
            _ => Suit::Honors,
        }
    }

    /// 1–9 for numbered tiles; 1–7 for honors (East, South, West, North, Red, Green, White).
    pub fn rank(self) -> u8 {
        if self.is_honor() {
            self as u8 - East as u8 + 1
        } else {
            self as u8 % 9 + 1
        }
    }

    pub fn from_suit_rank(suit: Suit, rank: u8) -> Option<Tile> {
        let base = match suit {
            Suit::Characters => Man1,
            Suit::Bamboo => Sou1,
            Suit::Dots => Pin1,
            Suit::Honors => East,
        };
        let limit = if suit == Suit::Honors { 7 } else { 9 };
        if rank == 0 || rank > limit {
            return None;
        }
        Tile::try_from(base as u8 + rank - 1).ok()
    }

    /// The tile `delta` ranks away in the same numbered suit.
    pub fn offset(self, delta: i8) -> Option<Tile> {
        if self.is_honor() {
            return None;
        }
        let rank = self.rank() as i8 + delta;
        if !(1..=9).contains(&rank) {
            return None;
        }
        Tile::from_suit_rank(self.suit(), rank as u8)
    }

    pub fn is_numbered(self) -> bool {
        (self as u8) < East as u8
    }

    pub fn is_honor(self) -> bool {
        !self.is_numbered()
    }

    pub fn is_wind(self) -> bool {
        matches!(self, East | South | West | North)
    }

    pub fn is_dragon(self) -> bool {
        matches!(self, Red | Green | White)
    }

    pub fn is_terminal(self) -> bool {
        self.is_numbered() && matches!(self.rank(), 1 | 9)
    }

    pub fn is_terminal_or_honor(self) -> bool {
        self.is_honor() || self.is_terminal()
    }

    /// Bamboo 2, 3, 4, 6, 8 and the green dragon.
    pub fn is_green(self) -> bool {
        matches!(self, Sou2 | Sou3 | Sou4 | Sou6 | Sou8 | Green)
    }

    /// Tiles whose faces read the same upside down.
    pub fn is_reversible(self) -> bool {
        matches!(
            self,
            Pin1 | Pin2 | Pin3 | Pin4 | Pin5 | Pin8 | Pin9
                | Sou2 | Sou4 | Sou5 | Sou6 | Sou8 | Sou9
                | White
        )
    }

    /// Returns the common Unicode Mahjong tile symbol
    pub fn to_unicode(self) -> char {
        match self {
            Man1 => '🀇', Man2 => '🀈', Man3 => '🀉', Man4 => '🀊', Man5 => '🀋',
            Man6 => '🀌', Man7 => '🀍', Man8 => '🀎', Man9 => '🀏',
            Sou1 => '🀐', Sou2 => '🀑', Sou3 => '🀒', Sou4 => '🀓', Sou5 => '🀔',
            Sou6 => '🀕', Sou7 => '🀖', Sou8 => '🀗', Sou9 => '🀘',
            Pin1 => '🀙', Pin2 => '🀚', Pin3 => '🀛', Pin4 => '🀜', Pin5 => '🀝',
            Pin6 => '🀞', Pin7 => '🀟', Pin8 => '🀠', Pin9 => '🀡',
            East => '🀀', South => '🀁', West => '🀂', North => '🀃',
            Red => '🀄', Green => '🀅', White => '🀆',
        }
    }
}

/// Prevalent or seat wind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wind {
    #[default]
    East,
    South,
    West,
    North,
}

impl Wind {
    pub fn tile(self) -> Tile {
        match self {
            Wind::East => East,
            Wind::South => South,
            Wind::West => West,
            Wind::North => North,
        }
    }
}

impl TryFrom<u8> for Wind {
    type Error = ();
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Ok(match v {
            0 => Wind::East,
            1 => Wind::South,
            2 => Wind::West,
            3 => Wind::North,
            _ => return Err(()),
        })
    }
}
