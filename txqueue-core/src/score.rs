//! Sort-key construction for the priority index.
//!
//! The queue is consumed in **ascending** score order: the processor pops
//! the lowest score first. A submission's score packs its priority into the
//! high-order digits and its submission time into the low-order digits, so
//! priority always dominates and time breaks ties within a priority.

/// Largest representable priority. Priorities live in `0..=MAX_PRIORITY`;
/// larger means more urgent (and therefore a *lower* score).
pub const MAX_PRIORITY: u8 = u8::MAX;

/// Map `(priority, submission time)` to a single totally-ordered sort key.
///
/// Let `d` be the decimal digit count of `now_seconds` (computed at call
/// time — it grows over calendar time and must never be cached). Then
///
/// ```text
/// score = (MAX_PRIORITY - priority) * 10^d + now_seconds
/// ```
///
/// Because `now_seconds < 10^d`, a strictly higher priority yields a
/// strictly lower score no matter the timestamps, and within equal priority
/// an earlier submission yields a lower score.
///
/// Known fragility, documented rather than patched: two scores minted on
/// opposite sides of a timestamp digit-count rollover (10 → 11 digits, year
/// 2286) use different multipliers and cross-priority comparisons between
/// them are no longer guaranteed. Within one digit era the ordering is
/// exact for the full `u8` priority range.
pub fn score(priority: u8, now_seconds: u64) -> u64 {
    let multiplier = 10u64.pow(decimal_digits(now_seconds));
    u64::from(MAX_PRIORITY - priority) * multiplier + now_seconds
}

fn decimal_digits(n: u64) -> u32 {
    n.checked_ilog10().unwrap_or(0) + 1
}

#[cfg(test)]
mod test {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn higher_priority_always_pops_first() {
        // Lowest-score-first convention: for any p1 > p2 the p1 score must
        // be strictly lower, even when the p1 submission is much later.
        for (p1, p2) in [(1u8, 0u8), (10, 5), (255, 254), (200, 0)] {
            assert!(score(p1, NOW + 1_000_000) < score(p2, NOW));
        }
    }

    #[test]
    fn earlier_submission_wins_within_equal_priority() {
        assert!(score(5, NOW) < score(5, NOW + 1));
        assert!(score(0, NOW) < score(0, NOW + 3600));
        assert!(score(255, NOW) < score(255, NOW + 1));
    }

    #[test]
    fn score_packs_timestamp_into_low_digits() {
        // 10-digit timestamp => multiplier 10^10.
        assert_eq!(score(5, NOW), 250 * 10u64.pow(10) + NOW);
        // Top priority occupies the zero block: the timestamp alone.
        assert_eq!(score(255, NOW), NOW);
    }

    #[test]
    fn digit_count_is_computed_per_call() {
        // A 9-digit clock uses a 10^9 multiplier, a 10-digit clock 10^10.
        assert_eq!(score(254, 999_999_999), 10u64.pow(9) + 999_999_999);
        assert_eq!(score(254, 1_000_000_000), 10u64.pow(10) + 1_000_000_000);
    }

    #[test]
    fn full_priority_range_fits_u64() {
        // Priority 0 at an 11-digit timestamp is the largest score we mint.
        assert_eq!(
            score(0, 99_999_999_999),
            255 * 10u64.pow(11) + 99_999_999_999
        );
    }
}
