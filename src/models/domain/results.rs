use serde::{Deserialize, Serialize};

/// Aggregate outcome of one completed session. Also the shape handed to the
/// summary provider.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResultBreakdown {
    pub topic: String,
    pub score_percent: u8,
    pub total: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
}

impl ResultBreakdown {
    /// Pure and idempotent: the same counts always produce the same
    /// breakdown. `total` must be at least 1 (the empty-quiz guard upstream
    /// guarantees it).
    pub fn new(topic: &str, correct_count: usize, total: usize) -> Self {
        ResultBreakdown {
            topic: topic.to_string(),
            score_percent: round_half_up_percent(correct_count, total),
            total,
            correct_count,
            incorrect_count: total - correct_count,
        }
    }
}

/// `100 * score / total` rounded half-up, in integer arithmetic:
/// `(200*score + total) / (2*total)`. 2 of 3 is 66.67 and rounds to 67;
/// 1 of 8 is 12.5 and rounds to 13.
pub fn round_half_up_percent(score: usize, total: usize) -> u8 {
    debug_assert!(total > 0, "percent of an empty quiz is undefined");
    ((200 * score + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_exact_when_total_divides_evenly() {
        assert_eq!(round_half_up_percent(0, 4), 0);
        assert_eq!(round_half_up_percent(1, 4), 25);
        assert_eq!(round_half_up_percent(2, 4), 50);
        assert_eq!(round_half_up_percent(4, 4), 100);
    }

    #[test]
    fn percent_rounds_half_up() {
        // 2/3 = 66.67 -> 67, the canonical case
        assert_eq!(round_half_up_percent(2, 3), 67);
        // 1/3 = 33.33 -> 33
        assert_eq!(round_half_up_percent(1, 3), 33);
        // 1/8 = 12.5 -> 13, exactly half
        assert_eq!(round_half_up_percent(1, 8), 13);
        // 7/8 = 87.5 -> 88
        assert_eq!(round_half_up_percent(7, 8), 88);
        // 1/40 = 2.5 -> 3
        assert_eq!(round_half_up_percent(1, 40), 3);
    }

    #[test]
    fn percent_bounds_hold_for_all_small_quizzes() {
        for total in 1..=20 {
            for score in 0..=total {
                let percent = round_half_up_percent(score, total);
                assert!(percent <= 100, "{}/{} gave {}", score, total, percent);
            }
        }
    }

    #[test]
    fn breakdown_counts_are_consistent() {
        let breakdown = ResultBreakdown::new("Rust ownership", 2, 3);

        assert_eq!(breakdown.topic, "Rust ownership");
        assert_eq!(breakdown.score_percent, 67);
        assert_eq!(breakdown.total, 3);
        assert_eq!(breakdown.correct_count, 2);
        assert_eq!(breakdown.incorrect_count, 1);
    }

    #[test]
    fn breakdown_is_idempotent() {
        let a = ResultBreakdown::new("History", 5, 10);
        let b = ResultBreakdown::new("History", 5, 10);
        assert_eq!(a, b);
    }
}
