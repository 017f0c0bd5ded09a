//! Recommendation ranking and cross-analyzer deduplication.

use crate::core::Recommendation;
use std::collections::HashSet;

/// Stable sort by priority: critical first, ties keep their relative order.
pub fn rank_recommendations(recommendations: &mut [Recommendation]) {
    recommendations.sort_by_key(|r| r.priority.rank());
}

/// The first `prefix_len` characters of `action`, used as the dedup key.
pub fn action_key(recommendation: &Recommendation, prefix_len: usize) -> String {
    recommendation.action.chars().take(prefix_len).collect()
}

/// Drop recommendations whose action prefix was already seen; first wins.
///
/// Two different fixes that happen to share an opening phrase collapse into
/// one. A structural key (category + issue) would avoid that, but the prefix
/// key is kept for compatibility with existing reports.
pub fn dedupe_by_action_prefix(
    recommendations: impl IntoIterator<Item = Recommendation>,
    prefix_len: usize,
) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    recommendations
        .into_iter()
        .filter(|rec| seen.insert(action_key(rec, prefix_len)))
        .collect()
}

/// Dedup, rank and truncate a concatenated recommendation list.
pub fn top_recommendations(
    recommendations: impl IntoIterator<Item = Recommendation>,
    prefix_len: usize,
    limit: usize,
) -> Vec<Recommendation> {
    let mut unique = dedupe_by_action_prefix(recommendations, prefix_len);
    rank_recommendations(&mut unique);
    unique.truncate(limit);
    unique
}

/// The first `limit` entries of an already ranked list.
pub fn leading(recommendations: &[Recommendation], limit: usize) -> Vec<Recommendation> {
    recommendations.iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Priority;
    use pretty_assertions::assert_eq;

    fn rec(priority: Priority, action: &str) -> Recommendation {
        Recommendation::new("Test", priority, "issue", action)
    }

    #[test]
    fn test_rank_is_stable() {
        let mut recs = vec![
            rec(Priority::Low, "a"),
            rec(Priority::High, "b"),
            rec(Priority::Low, "c"),
            rec(Priority::Critical, "d"),
            rec(Priority::High, "e"),
        ];
        rank_recommendations(&mut recs);
        let order: Vec<_> = recs.iter().map(|r| r.action.as_str()).collect();
        assert_eq!(order, vec!["d", "b", "e", "a", "c"]);
    }

    #[test]
    fn test_dedupe_compares_prefix_only() {
        let shared = "x".repeat(50);
        let recs = vec![
            rec(Priority::Low, &format!("{shared} first")),
            rec(Priority::Critical, &format!("{shared} second")),
            rec(Priority::Medium, "different"),
        ];
        let unique = dedupe_by_action_prefix(recs, 50);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].priority, Priority::Low);
    }

    #[test]
    fn test_prefix_counts_characters_not_bytes() {
        let a = rec(Priority::Low, &"é".repeat(60));
        assert_eq!(action_key(&a, 50).chars().count(), 50);
    }

    #[test]
    fn test_top_recommendations_truncates_after_ranking() {
        let recs: Vec<_> = (0..12)
            .map(|i| rec(if i == 11 { Priority::Critical } else { Priority::Low }, &format!("fix {i}")))
            .collect();
        let top = top_recommendations(recs, 50, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].action, "fix 11");
    }
}
