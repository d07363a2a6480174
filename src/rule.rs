// src/rule.rs
#[cfg(feature = "python")]
use pyo3::{pyclass, pymethods};
use serde::{Deserialize, Serialize};

/// Rule-variant switches that change how a hand is scored.
#[cfg_attr(feature = "python", pyclass(module = "guobiao_engine", get_all, set_all))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringRule {
    /// One concealed kong plus one melded kong scores the combined 5-point
    /// pattern. When `false` the two score separately as Concealed Kong and
    /// Melded Kong (the older 1998 reading).
    pub concealed_kong_and_melded_kong: bool,

    /// Four identical tiles may stand for two of the seven pairs.
    pub seven_pairs_four_of_a_kind: bool,
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self::official()
    }
}

impl ScoringRule {
    pub fn official() -> Self {
        Self {
            concealed_kong_and_melded_kong: true,
            seven_pairs_four_of_a_kind: true,
        }
    }

    pub fn legacy() -> Self {
        Self {
            concealed_kong_and_melded_kong: false,
            seven_pairs_four_of_a_kind: true,
        }
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl ScoringRule {
    #[new]
    #[pyo3(signature = (concealed_kong_and_melded_kong=true, seven_pairs_four_of_a_kind=true))]
    fn py_new(concealed_kong_and_melded_kong: bool, seven_pairs_four_of_a_kind: bool) -> Self {
        Self {
            concealed_kong_and_melded_kong,
            seven_pairs_four_of_a_kind,
        }
    }

    #[staticmethod]
    #[pyo3(name = "official")]
    fn py_official() -> Self {
        Self::official()
    }

    #[staticmethod]
    #[pyo3(name = "legacy")]
    fn py_legacy() -> Self {
        Self::legacy()
    }
}
