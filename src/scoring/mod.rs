//! Score arithmetic shared by every analyzer.
//!
//! All sub-scores live on a 0..=100 integer scale. Raw point totals are
//! computed as `f64`, clamped, and rounded half-up so that re-running an
//! analyzer on the same document yields identical integers.

use crate::core::Priority;

/// Round half-up (`2.5 -> 3`) and clamp into 0..=100.
pub fn to_score(raw: f64) -> u32 {
    if !raw.is_finite() {
        return 0;
    }
    round_half_up(raw.clamp(0.0, 100.0))
}

pub fn round_half_up(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else {
        (value + 0.5).floor() as u32
    }
}

/// Unweighted mean of integer scores, rounded half-up. Empty input is 0.
pub fn mean_score(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let total: u32 = scores.iter().sum();
    to_score(f64::from(total) / scores.len() as f64)
}

/// Weighted mean of `(score, weight)` pairs, normalized by the weight sum.
pub fn weighted_score(parts: &[(u32, f64)]) -> u32 {
    let weight_sum: f64 = parts.iter().map(|(_, w)| w).sum();
    if weight_sum <= 0.0 {
        return 0;
    }
    let total: f64 = parts.iter().map(|(s, w)| f64::from(*s) * w).sum();
    to_score(total / weight_sum)
}

/// Points earned proportionally to `count / target`, capped at `points`.
pub fn proportional(count: f64, target: f64, points: f64) -> f64 {
    if target <= 0.0 {
        return points;
    }
    (count / target).clamp(0.0, 1.0) * points
}

/// Full points at `target` occurrences or more, otherwise `each` per
/// occurrence.
pub fn tiered(count: usize, target: usize, full: f64, each: f64) -> f64 {
    if count >= target {
        full
    } else {
        count as f64 * each
    }
}

/// Priority for a score-level gap: the further below `good`, the more urgent.
pub fn priority_for_gap(score: u32, good: u32) -> Priority {
    match good.saturating_sub(score) {
        gap if gap >= 40 => Priority::High,
        gap if gap >= 20 => Priority::Medium,
        _ => Priority::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-4.0), 0);
    }

    #[test]
    fn test_to_score_clamps() {
        assert_eq!(to_score(180.0), 100);
        assert_eq!(to_score(-3.0), 0);
        assert_eq!(to_score(f64::NAN), 0);
    }

    #[test]
    fn test_mean_score_rounds_half_up() {
        assert_eq!(mean_score(&[50, 51]), 51);
        assert_eq!(mean_score(&[]), 0);
    }

    #[test]
    fn test_weighted_score_normalizes_weights() {
        assert_eq!(weighted_score(&[(100, 0.4), (0, 0.6)]), 40);
        assert_eq!(weighted_score(&[(80, 2.0), (40, 2.0)]), 60);
        assert_eq!(weighted_score(&[(80, 0.0)]), 0);
    }

    #[test]
    fn test_priority_for_gap() {
        assert_eq!(priority_for_gap(20, 70), Priority::High);
        assert_eq!(priority_for_gap(45, 70), Priority::Medium);
        assert_eq!(priority_for_gap(65, 70), Priority::Low);
        assert_eq!(priority_for_gap(90, 70), Priority::Low);
    }

    #[test]
    fn test_tiered_caps_at_full_points() {
        assert_eq!(tiered(2, 3, 40.0, 13.0), 26.0);
        assert_eq!(tiered(7, 3, 40.0, 13.0), 40.0);
    }
}
