//! Time jitter engine.
//!
//! Perturbs an anchor's nominal time by a bounded random number of minutes
//! so the randomized reminder slots avoid robotic regularity. Pure
//! functions only; the random draw is injected so tests can supply
//! deterministic offsets.

use rand::Rng;

use crate::anchors::AnchorSpec;

/// A normalized wall-clock time derived from an anchor plus an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterResult {
    pub hour: u32,
    pub minute: u32,
}

/// Apply a signed minute offset to an anchor and normalize the result.
///
/// The minute carries or borrows across the hour boundary, and the final
/// hour is clamped to `[0, 23]` rather than wrapped past midnight. The
/// clamp means an anchor near midnight lands on hour 0 or 23 more often
/// than a true wraparound would; that skew is a known, deliberate
/// simplification of this engine, kept so a jittered reminder never
/// crosses into the previous or next day.
///
/// `offset_minutes` must stay within one hour (`-59..=59`), which the
/// clamped uniform draw in [`jitter`] guarantees for any configured
/// maximum.
pub fn jitter_with_offset(anchor: AnchorSpec, offset_minutes: i32) -> JitterResult {
    debug_assert!(offset_minutes.abs() < 60);

    let raw_minute = anchor.minute as i32 + offset_minutes;
    let (minute, hour) = if raw_minute >= 60 {
        (raw_minute - 60, anchor.hour as i32 + 1)
    } else if raw_minute < 0 {
        (raw_minute + 60, anchor.hour as i32 - 1)
    } else {
        (raw_minute, anchor.hour as i32)
    };

    JitterResult {
        hour: hour.clamp(0, 23) as u32,
        minute: minute as u32,
    }
}

/// Draw a uniform offset in `[-max_offset_minutes, +max_offset_minutes]`
/// and apply it to the anchor.
///
/// `max_offset_minutes` is clamped into `[0, 59]` before the draw, so the
/// single carry/borrow in [`jitter_with_offset`] always suffices and the
/// result is a valid wall-clock time for any configured maximum.
pub fn jitter<R: Rng + ?Sized>(
    anchor: AnchorSpec,
    max_offset_minutes: i32,
    rng: &mut R,
) -> JitterResult {
    let max = max_offset_minutes.clamp(0, 59);
    let offset = rng.gen_range(-max..=max);
    jitter_with_offset(anchor, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::RANDOM_ANCHORS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn anchor(hour: u32, minute: u32) -> AnchorSpec {
        AnchorSpec {
            name: "test",
            hour,
            minute,
        }
    }

    #[test]
    fn offset_within_hour_keeps_hour() {
        let r = jitter_with_offset(anchor(11, 30), 15);
        assert_eq!(r, JitterResult { hour: 11, minute: 45 });
    }

    #[test]
    fn minute_overflow_carries_into_next_hour() {
        let r = jitter_with_offset(anchor(15, 50), 25);
        assert_eq!(r, JitterResult { hour: 16, minute: 15 });
    }

    #[test]
    fn minute_underflow_borrows_from_previous_hour() {
        let r = jitter_with_offset(anchor(15, 10), -25);
        assert_eq!(r, JitterResult { hour: 14, minute: 45 });
    }

    #[test]
    fn overflow_past_midnight_clamps_to_hour_23() {
        // 23:50 + 15m = minute 5 of hour 24, pinned to 23 instead of
        // wrapping to hour 0.
        let r = jitter_with_offset(anchor(23, 50), 15);
        assert_eq!(r, JitterResult { hour: 23, minute: 5 });
    }

    #[test]
    fn underflow_before_midnight_clamps_to_hour_0() {
        // 00:10 - 25m = minute 45 of hour -1, pinned to 0.
        let r = jitter_with_offset(anchor(0, 10), -25);
        assert_eq!(r, JitterResult { hour: 0, minute: 45 });
    }

    #[test]
    fn every_offset_yields_valid_wall_clock_time() {
        for a in RANDOM_ANCHORS {
            for offset in -30..=30 {
                let r = jitter_with_offset(a, offset);
                assert!(r.hour <= 23, "{} offset {offset}: hour {}", a.name, r.hour);
                assert!(r.minute <= 59, "{} offset {offset}: minute {}", a.name, r.minute);
            }
        }
    }

    #[test]
    fn random_draw_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = anchor(11, 30);
        for _ in 0..1_000 {
            let r = jitter(base, 30, &mut rng);
            // ±30 around 11:30 can only land in [11:00, 12:00].
            assert!(r.hour == 11 || r.hour == 12);
            assert!(r.minute <= 59);
        }
    }

    #[test]
    fn oversized_max_offset_never_breaks_wall_clock() {
        // A configured maximum beyond one hour is pinned to 59 minutes,
        // so the draw can never outrun the single carry/borrow.
        let mut rng = StdRng::seed_from_u64(3);
        let base = anchor(15, 30);
        for _ in 0..1_000 {
            let r = jitter(base, 90, &mut rng);
            assert!(r.hour <= 23);
            assert!(r.minute <= 59);
            // ±59 around 15:30 stays inside [14:31, 16:29].
            let total = r.hour * 60 + r.minute;
            assert!((14 * 60 + 31..=16 * 60 + 29).contains(&total));
        }
    }

    #[test]
    fn negative_max_offset_collapses_to_the_anchor() {
        let mut rng = StdRng::seed_from_u64(4);
        let r = jitter(anchor(11, 30), -5, &mut rng);
        assert_eq!(r, JitterResult { hour: 11, minute: 30 });
    }

    #[test]
    fn identical_offsets_reproduce_identical_results() {
        let a = anchor(19, 30);
        assert_eq!(jitter_with_offset(a, -12), jitter_with_offset(a, -12));
    }
}
