//! Score bands used to accept or reject candidate moves.

use chess_core::Color;

/// Convert a side-to-move score to White's point of view.
#[inline]
pub fn white_pov(score: i32, stm: Color) -> i32 {
    score * stm.sign()
}

/// Acceptance band for candidate scores, in centipawns.
///
/// Relative bands accept a candidate within `range` of the best score.
/// Absolute bands accept a candidate whose White-POV score lies within
/// `range` of `bias`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBand {
    pub range: i32,
    pub bias: i32,
    pub absolute: bool,
}

impl ScoreBand {
    pub fn relative(range: i32) -> Self {
        Self {
            range,
            bias: 0,
            absolute: false,
        }
    }

    pub fn absolute(range: i32, bias: i32) -> Self {
        Self {
            range,
            bias,
            absolute: true,
        }
    }

    /// Does `score` pass, given the best candidate scored `best`?
    /// Both scores are from the point of view of `stm`.
    pub fn admits(&self, best: i32, score: i32, stm: Color) -> bool {
        if self.absolute {
            deviation(score, stm, self.bias) <= i64::from(self.range)
        } else {
            i64::from(best) - i64::from(score) <= i64::from(self.range)
        }
    }

    /// The band one ply deeper: `range` scaled by `factor` percent.
    pub fn decayed(self, factor: i32) -> Self {
        let range = i64::from(self.range) * i64::from(factor) / 100;
        Self {
            range: range.clamp(0, i64::from(i32::MAX)) as i32,
            ..self
        }
    }
}

/// Distance between a score (White POV) and `bias`.
pub fn deviation(score: i32, stm: Color, bias: i32) -> i64 {
    (i64::from(white_pov(score, stm)) - i64::from(bias)).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_band_measures_from_best() {
        let band = ScoreBand::relative(10);
        assert!(band.admits(30, 30, Color::White));
        assert!(band.admits(30, 20, Color::Black));
        assert!(!band.admits(30, 19, Color::White));
    }

    #[test]
    fn absolute_band_uses_white_point_of_view() {
        let band = ScoreBand::absolute(20, 10);
        // +25 for Black is -25 for White.
        assert!(!band.admits(25, 25, Color::Black));
        assert!(band.admits(25, 25, Color::White));
        assert!(band.admits(0, -5, Color::Black));
    }

    #[test]
    fn decay_scales_range() {
        assert_eq!(ScoreBand::relative(40).decayed(50).range, 20);
        assert_eq!(ScoreBand::relative(40).decayed(100).range, 40);
        assert_eq!(ScoreBand::relative(40).decayed(0).range, 0);
        assert_eq!(ScoreBand::relative(i32::MAX).decayed(1000).range, i32::MAX);
    }
}
