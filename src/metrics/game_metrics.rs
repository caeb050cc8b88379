use std::time::Instant;

/// Rolling statistics for one process-lifetime play session
///
/// Nothing here persists across runs; the totals are reported once at exit.
pub struct SessionMetrics {
    started: Instant,
    pub high_score: u32,
    pub rounds_played: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            high_score: 0,
            rounds_played: 0,
        }
    }

    pub fn on_round_over(&mut self, final_score: u32) {
        self.rounds_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    /// Session length as mm:ss, for the exit log line
    pub fn format_elapsed(&self) -> String {
        let total_secs = self.started.elapsed().as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = SessionMetrics::new();

        metrics.on_round_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.rounds_played, 1);

        metrics.on_round_over(5);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.rounds_played, 2);

        metrics.on_round_over(15);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.rounds_played, 3);
    }

    #[test]
    fn test_elapsed_formatting() {
        let metrics = SessionMetrics::new();
        assert_eq!(metrics.format_elapsed(), "00:00");
    }
}
