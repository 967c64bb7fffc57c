//! Letter grade scale

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grades on the ten-point scale
///
/// Variants are ordered from best to worst, with `NotGraded` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    /// Outstanding (10 points)
    S,
    /// Excellent (9 points)
    A,
    /// Very good (8 points)
    B,
    /// Good (7 points)
    C,
    /// Average (6 points)
    D,
    /// Pass (5 points)
    E,
    /// Fail (0 points)
    F,
    /// No grade recorded yet; excluded from GPA
    NotGraded,
}

impl Grade {
    /// Every grade in scale order
    pub const ALL: [Self; 8] = [
        Self::S,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::NotGraded,
    ];

    /// Grade points for this grade, `None` for `NotGraded`
    #[must_use]
    pub const fn points(self) -> Option<f64> {
        match self {
            Self::S => Some(10.0),
            Self::A => Some(9.0),
            Self::B => Some(8.0),
            Self::C => Some(7.0),
            Self::D => Some(6.0),
            Self::E => Some(5.0),
            Self::F => Some(0.0),
            Self::NotGraded => None,
        }
    }

    /// Whether a grade has been recorded
    #[must_use]
    pub const fn is_graded(self) -> bool {
        !matches!(self, Self::NotGraded)
    }

    /// Canonical upper-case name (e.g., "A", "`NOT_GRADED`")
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::NotGraded => "NOT_GRADED",
        }
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "S" => Ok(Self::S),
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            "F" => Ok(Self::F),
            "NOT_GRADED" | "NG" => Ok(Self::NotGraded),
            _ => Err(format!("Unknown grade: {s} (expected S, A, B, C, D, E, F)")),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
