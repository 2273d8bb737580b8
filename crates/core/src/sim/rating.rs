//! Star rating awarded on level completion.

pub const MAX_STARS: u8 = 3;

/// Unclamped rating: one base star, up to two for speed, one for finishing unhurt.
/// A fast, unhurt clear scores 4 here; storage and display go through [`clamp_stars`].
pub fn raw_star_rating(
    elapsed_whole_secs: u32,
    time_limit_secs: Option<u32>,
    health: u32,
    max_health: u32,
) -> u8 {
    let mut stars = 1;
    if let Some(limit) = time_limit_secs
        && limit > 0
    {
        let ratio = f64::from(elapsed_whole_secs) / f64::from(limit);
        if ratio < 0.5 {
            stars += 1;
        }
        if ratio < 0.25 {
            stars += 1;
        }
    }
    if health == max_health {
        stars += 1;
    }
    stars
}

pub fn clamp_stars(raw: i64) -> u8 {
    raw.clamp(0, i64::from(MAX_STARS)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_unhurt_clear_over_counts_before_clamp() {
        let raw = raw_star_rating(10, Some(100), 5, 5);
        assert_eq!(raw, 4);
        assert_eq!(clamp_stars(i64::from(raw)), 3);
    }

    #[test]
    fn untimed_level_scores_on_health_only() {
        assert_eq!(raw_star_rating(999, None, 5, 5), 2);
        assert_eq!(raw_star_rating(0, None, 4, 5), 1);
    }

    #[test]
    fn ratio_thresholds_are_strict() {
        assert_eq!(raw_star_rating(50, Some(100), 1, 5), 1);
        assert_eq!(raw_star_rating(49, Some(100), 1, 5), 2);
        assert_eq!(raw_star_rating(25, Some(100), 1, 5), 2);
        assert_eq!(raw_star_rating(24, Some(100), 1, 5), 3);
    }

    #[test]
    fn clamp_handles_negative_values() {
        assert_eq!(clamp_stars(-2), 0);
        assert_eq!(clamp_stars(2), 2);
    }
}
