use crate::config::{MIN_TICK_INTERVAL_MS, POINTS_PER_SPEED_UP, TICK_INTERVAL_STEP_MS};

/// Returns the tick interval after a food-eat event brought the score to
/// `new_score`.
///
/// Every positive multiple of [`POINTS_PER_SPEED_UP`] shaves
/// [`TICK_INTERVAL_STEP_MS`] off the interval, never going below
/// [`MIN_TICK_INTERVAL_MS`].
#[must_use]
pub fn next_interval(current_ms: u64, new_score: u32) -> u64 {
    if new_score == 0 || new_score % POINTS_PER_SPEED_UP != 0 {
        return current_ms;
    }

    current_ms
        .saturating_sub(TICK_INTERVAL_STEP_MS)
        .max(MIN_TICK_INTERVAL_MS)
        .min(current_ms)
}

#[cfg(test)]
mod tests {
    use crate::config::{INITIAL_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, POINTS_PER_FOOD};

    use super::next_interval;

    #[test]
    fn speeds_up_at_fifty_points() {
        assert_eq!(next_interval(150, 40), 150);
        assert_eq!(next_interval(150, 50), 140);
        assert_eq!(next_interval(140, 60), 140);
        assert_eq!(next_interval(140, 100), 130);
    }

    #[test]
    fn zero_score_never_speeds_up() {
        assert_eq!(next_interval(150, 0), 150);
    }

    #[test]
    fn interval_is_floored() {
        assert_eq!(next_interval(55, 50), MIN_TICK_INTERVAL_MS);
        assert_eq!(next_interval(MIN_TICK_INTERVAL_MS, 550), MIN_TICK_INTERVAL_MS);
    }

    #[test]
    fn reaching_five_hundred_hits_the_floor() {
        let mut interval = INITIAL_TICK_INTERVAL_MS;
        let mut score = 0;

        while score < 500 {
            score += POINTS_PER_FOOD;
            interval = next_interval(interval, score);
        }
        assert_eq!(interval, MIN_TICK_INTERVAL_MS);

        score += POINTS_PER_FOOD * 5;
        assert_eq!(next_interval(interval, score), MIN_TICK_INTERVAL_MS);
    }
}
