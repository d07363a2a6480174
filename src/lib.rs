// src/lib.rs
//! Chinese Official (Guobiao) mahjong hand scoring.
//!
//! [`calculate_fan`] reads a winning hand every way it can be read (special
//! forms and every division into melds and a pair), scores each reading and
//! keeps the best one.

#[macro_use]
mod log;

pub mod adjust;
pub mod errors;
pub mod exclusion;
pub mod fan;
pub mod fan_calculation;
pub mod group_fans;
pub mod hand;
pub mod hand_parser;
pub mod meld;
pub mod rule;
pub mod special_forms;
pub mod tiles;
pub mod wait;

pub use errors::{ScoreError, ScoreResult};
pub use fan::{Fan, FanTable, FAN_KINDS};
pub use fan_calculation::{calculate_fan, validate_input, FanScore, ScoreParameters, WinFlags};
pub use hand::{Hand, Tally};
pub use hand_parser::{divide_win_hand, Division, MAX_DIVISIONS};
pub use meld::{Exposure, Meld, MeldKind, Supplier};
pub use rule::ScoringRule;
pub use tiles::{Suit, Tile, Wind, TILE_KINDS};

#[cfg(feature = "python")]
mod py {
    use numpy::PyArray1;
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::{Exposure, Fan, Hand, Meld, MeldKind, ScoreParameters, ScoringRule, Supplier, Tile, WinFlags, Wind};

    fn tile(id: u8) -> PyResult<Tile> {
        Tile::try_from(id).map_err(|_| PyValueError::new_err(format!("Invalid tile id {}", id)))
    }

    fn wind(id: u8) -> PyResult<Wind> {
        Wind::try_from(id).map_err(|_| PyValueError::new_err(format!("Invalid wind id {}", id)))
    }

    /// `(kind, tile, supplier)`: kind 0 chow (by middle tile), 1 pung, 2 kong,
    /// 3 kong promoted from a pung; supplier 0 for a concealed kong, otherwise
    /// 1 previous, 2 opposite, 3 next.
    fn fixed_meld((kind, tile_id, supplier): (u8, u8, u8)) -> PyResult<Meld> {
        let kind_of = match kind {
            0 => MeldKind::Chow,
            1 => MeldKind::Pung,
            2 | 3 => MeldKind::Kong,
            _ => return Err(PyValueError::new_err(format!("Invalid meld kind {}", kind))),
        };
        let exposure = match supplier {
            0 => Exposure::Concealed,
            s => Exposure::Claimed {
                from: Supplier::try_from(s)
                    .map_err(|_| PyValueError::new_err(format!("Invalid supplier {}", s)))?,
                promoted: kind == 3,
            },
        };
        Meld::new(kind_of, tile(tile_id)?, exposure).map_err(PyErr::from)
    }

    /// Scores a winning hand. Returns the total and the per-pattern counts
    /// indexed by fan id (see `fan_names`).
    #[pyfunction]
    #[pyo3(signature = (
        standing, win_tile, fixed = Vec::new(), flower_count = 0,
        self_drawn = false, fourth_tile = false, about_kong = false, wall_last = false,
        initial = false, prevalent_wind = 0, seat_wind = 0, rule = None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn calculate_fan<'py>(
        py: Python<'py>,
        standing: Vec<u8>,
        win_tile: u8,
        fixed: Vec<(u8, u8, u8)>,
        flower_count: u8,
        self_drawn: bool,
        fourth_tile: bool,
        about_kong: bool,
        wall_last: bool,
        initial: bool,
        prevalent_wind: u8,
        seat_wind: u8,
        rule: Option<ScoringRule>,
    ) -> PyResult<(u32, Bound<'py, PyArray1<u8>>)> {
        let hand = Hand::new(
            fixed.into_iter().map(fixed_meld).collect::<PyResult<_>>()?,
            standing.into_iter().map(tile).collect::<PyResult<_>>()?,
        );
        let params = ScoreParameters {
            hand,
            win_tile: tile(win_tile)?,
            flower_count,
            flags: WinFlags { self_drawn, fourth_tile, about_kong, wall_last, initial },
            prevalent_wind: wind(prevalent_wind)?,
            seat_wind: wind(seat_wind)?,
            rule: rule.unwrap_or_default(),
        };

        let score = py.allow_threads(|| crate::calculate_fan(&params))?;
        let counts = PyArray1::from_vec_bound(py, score.fans.counts().to_vec());
        Ok((score.total, counts))
    }

    /// English pattern names in fan-id order.
    #[pyfunction]
    fn fan_names() -> Vec<&'static str> {
        Fan::ALL.iter().map(|f| f.name()).collect()
    }

    #[pymodule]
    fn guobiao_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<ScoringRule>()?;
        m.add_function(wrap_pyfunction!(calculate_fan, m)?)?;
        m.add_function(wrap_pyfunction!(fan_names, m)?)?;
        Ok(())
    }
}
