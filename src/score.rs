/// Running score for a session. Correct guesses add a point, skips take one away;
/// the score is allowed to go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    value: i32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        self.value += 1;
    }

    pub fn decrement(&mut self) {
        self.value -= 1;
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_score_is_zero() {
        assert_eq!(ScoreTracker::new().value(), 0);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut score = ScoreTracker::new();
        score.increment();
        score.increment();
        score.decrement();
        assert_eq!(score.value(), 1);
    }

    #[test]
    fn test_score_goes_negative() {
        let mut score = ScoreTracker::new();
        for _ in 0..5 {
            score.decrement();
        }
        assert_eq!(score.value(), -5);
    }

    #[test]
    fn test_reset() {
        let mut score = ScoreTracker::new();
        score.increment();
        score.reset();
        assert_eq!(score, ScoreTracker::default());
    }
}
