//! Goal progress aggregation.

use pacer_core::Milestone;

/// Goal-level progress derived from milestone completion:
/// `round(100 * completed / total)`, or 0 for an empty milestone set.
pub fn aggregate_progress(milestones: &[Milestone]) -> u8 {
    if milestones.is_empty() {
        return 0;
    }
    let completed = milestones.iter().filter(|m| m.is_completed()).count();
    (100.0 * completed as f64 / milestones.len() as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pacer_core::{Difficulty, Milestone, MilestoneId};

    fn ms(title: &str, completed: bool) -> Milestone {
        let mut m = Milestone::new(
            MilestoneId::temp(title),
            title,
            Utc::now() + Duration::days(1),
            Difficulty::Small,
        )
        .unwrap();
        if completed {
            m.complete(Utc::now());
        }
        m
    }

    #[test]
    fn test_empty_set_is_zero() {
        assert_eq!(aggregate_progress(&[]), 0);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 1 of 3 -> 33, 2 of 3 -> 67
        let one = vec![ms("a", true), ms("b", false), ms("c", false)];
        assert_eq!(aggregate_progress(&one), 33);

        let two = vec![ms("a", true), ms("b", true), ms("c", false)];
        assert_eq!(aggregate_progress(&two), 67);
    }

    #[test]
    fn test_bounds() {
        let none = vec![ms("a", false), ms("b", false)];
        assert_eq!(aggregate_progress(&none), 0);

        let all = vec![ms("a", true), ms("b", true)];
        assert_eq!(aggregate_progress(&all), 100);
    }
}
