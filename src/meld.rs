// src/meld.rs
use serde::{Deserialize, Serialize};

use crate::errors::{ScoreError, ScoreResult};
use crate::tiles::Tile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MeldKind {
    Chow,
    Pung,
    Kong,
    Pair,
}

/// Seat that supplied a claimed tile, relative to the claimer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Supplier {
    Previous = 1,
    Opposite = 2,
    Next = 3,
}

impl TryFrom<u8> for Supplier {
    type Error = ();
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Ok(match v {
            1 => Supplier::Previous,
            2 => Supplier::Opposite,
            3 => Supplier::Next,
            _ => return Err(()),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Exposure {
    Concealed,
    /// `promoted` marks a kong made by adding a tile to an exposed pung.
    Claimed { from: Supplier, promoted: bool },
}

/// A chow, pung, kong or pair.
///
/// Ordering is by kind, then tile, then exposure; sorted meld lists are the
/// canonical form used when deduplicating divisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Meld {
    pub kind: MeldKind,
    /// Middle tile of a chow; the repeated tile otherwise.
    pub tile: Tile,
    pub exposure: Exposure,
}

impl Meld {
    /// Validated constructor.
    pub fn new(kind: MeldKind, tile: Tile, exposure: Exposure) -> ScoreResult<Self> {
        let meld = Meld { kind, tile, exposure };
        meld.check()?;
        Ok(meld)
    }

    pub fn chow(middle: Tile) -> Self {
        Meld { kind: MeldKind::Chow, tile: middle, exposure: Exposure::Concealed }
    }

    pub fn pung(tile: Tile) -> Self {
        Meld { kind: MeldKind::Pung, tile, exposure: Exposure::Concealed }
    }

    pub fn kong(tile: Tile) -> Self {
        Meld { kind: MeldKind::Kong, tile, exposure: Exposure::Concealed }
    }

    pub fn pair(tile: Tile) -> Self {
        Meld { kind: MeldKind::Pair, tile, exposure: Exposure::Concealed }
    }

    pub fn claimed(self, from: Supplier) -> Self {
        Meld { exposure: Exposure::Claimed { from, promoted: false }, ..self }
    }

    /// A kong promoted from an exposed pung.
    pub fn promoted(self, from: Supplier) -> Self {
        Meld { exposure: Exposure::Claimed { from, promoted: true }, ..self }
    }

    pub fn is_concealed(&self) -> bool {
        self.exposure == Exposure::Concealed
    }

    pub fn is_chow(&self) -> bool {
        self.kind == MeldKind::Chow
    }

    /// Pungs and kongs.
    pub fn is_pung_like(&self) -> bool {
        matches!(self.kind, MeldKind::Pung | MeldKind::Kong)
    }

    pub fn is_kong(&self) -> bool {
        self.kind == MeldKind::Kong
    }

    /// Whether `tile` is one of this meld's tiles.
    pub fn contains(&self, tile: Tile) -> bool {
        match self.kind {
            MeldKind::Chow => self.tiles().contains(&tile),
            _ => self.tile == tile,
        }
    }

    /// Physical tiles, four for a kong.
    pub fn tiles(&self) -> Vec<Tile> {
        match self.kind {
            MeldKind::Chow => [-1, 0, 1]
                .into_iter()
                .filter_map(|d| self.tile.offset(d))
                .collect(),
            MeldKind::Pung => vec![self.tile; 3],
            MeldKind::Kong => vec![self.tile; 4],
            MeldKind::Pair => vec![self.tile; 2],
        }
    }

    /// Rejects melds that cannot exist as a fixed meld of a hand.
    pub(crate) fn check(&self) -> ScoreResult<()> {
        let invalid = |why: &str| {
            Err(ScoreError::MalformedHand {
                message: format!("{:?} of {:?}: {}", self.kind, self.tile, why),
            })
        };
        match self.kind {
            MeldKind::Pair => return invalid("a pair cannot be a fixed meld"),
            MeldKind::Chow if !(self.tile.is_numbered() && (2..=8).contains(&self.tile.rank())) => {
                return invalid("chow middle tile must be a numbered 2-8")
            }
            _ => {}
        }
        if let Exposure::Claimed { promoted: true, .. } = self.exposure {
            if self.kind != MeldKind::Kong {
                return invalid("only a kong can be promoted");
            }
        }
        if self.is_concealed() && self.kind != MeldKind::Kong {
            return invalid("only a kong can be fixed while concealed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::Tile::*;

    #[test]
    fn chow_tiles_surround_middle() {
        assert_eq!(Meld::chow(Pin5).tiles(), vec![Pin4, Pin5, Pin6]);
        assert!(Meld::chow(Pin5).contains(Pin6));
        assert!(!Meld::chow(Pin5).contains(Pin7));
        assert_eq!(Meld::kong(East).tiles().len(), 4);
    }

    #[test]
    fn validated_constructor() {
        let claimed = Exposure::Claimed { from: Supplier::Previous, promoted: false };
        assert!(Meld::new(MeldKind::Chow, Sou2, claimed).is_ok());
        assert!(Meld::new(MeldKind::Chow, Sou1, claimed).is_err());
        assert!(Meld::new(MeldKind::Chow, East, claimed).is_err());
        assert!(Meld::new(MeldKind::Pair, Sou1, claimed).is_err());
        assert!(Meld::new(MeldKind::Pung, Sou1, Exposure::Concealed).is_err());
        assert!(Meld::new(MeldKind::Kong, Sou1, Exposure::Concealed).is_ok());
        let promoted = Exposure::Claimed { from: Supplier::Next, promoted: true };
        assert!(Meld::new(MeldKind::Pung, Red, promoted).is_err());
        assert!(Meld::new(MeldKind::Kong, Red, promoted).is_ok());
    }

    #[test]
    fn canonical_order_sorts_chows_before_pungs() {
        let mut melds = vec![Meld::pung(Man1), Meld::chow(Sou5), Meld::chow(Man3)];
        melds.sort();
        assert_eq!(melds, vec![Meld::chow(Man3), Meld::chow(Sou5), Meld::pung(Man1)]);
    }
}
