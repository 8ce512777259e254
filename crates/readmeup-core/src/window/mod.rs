//! Schedule window evaluation.
//!
//! Decides whether an update run should proceed at a given instant and
//! computes the next eligible run time. A [`RunWindow`] carries the
//! configured timezone, the allowed hours-of-day and an optional grace
//! tolerance; the evaluator itself is a pure function of the window, the
//! current instant and the last-run record. It performs no I/O and never
//! errors -- an empty hour set degrades to "no eligible time".
//!
//! All comparisons happen in civil time in the configured timezone, so
//! daylight-saving transitions follow the timezone database rather than a
//! fixed UTC offset. An hour erased by a spring-forward transition is
//! skipped; an ambiguous fall-back hour resolves to its earlier instant.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Provides the current instant. Injectable so evaluations are
/// deterministic under test.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock [`Clock`] used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A [`Clock`] pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Result of evaluating a window at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub should_run: bool,
    pub next_run: Option<DateTime<Utc>>,
}

/// The configured run window: timezone, allowed hours-of-day and an
/// optional grace tolerance in minutes.
///
/// Hours are kept sorted ascending and de-duplicated; together they
/// partition each civil day into fixed candidate instants (`hour:00:00`
/// in the configured timezone). The evaluator never proposes an instant
/// outside that set.
#[derive(Debug, Clone)]
pub struct RunWindow {
    tz: Tz,
    hours: Vec<u32>,
    grace_minutes: u32,
}

impl RunWindow {
    /// Build a window from a timezone and allowed hours. Out-of-range
    /// values are discarded here; rejecting them loudly is the settings
    /// loader's job.
    pub fn new(tz: Tz, hours: impl IntoIterator<Item = u32>) -> Self {
        let mut hours: Vec<u32> = hours.into_iter().filter(|h| *h < 24).collect();
        hours.sort_unstable();
        hours.dedup();
        Self {
            tz,
            hours,
            grace_minutes: 0,
        }
    }

    pub fn with_grace(mut self, minutes: u32) -> Self {
        self.grace_minutes = minutes;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn hours(&self) -> &[u32] {
        &self.hours
    }

    /// Whether a run should proceed at `now`.
    ///
    /// Fails closed when the hour set is empty or `now`'s civil hour is
    /// not allowed. A last run in the same civil hour on the same civil
    /// day suppresses a second run for that slot. `force` bypasses every
    /// check (manual execution).
    pub fn should_run(
        &self,
        now: DateTime<Utc>,
        last_run: Option<DateTime<Utc>>,
        force: bool,
    ) -> bool {
        if force {
            return true;
        }
        let local = now.with_timezone(&self.tz);
        if !self.hours.contains(&local.hour()) {
            return false;
        }
        if let Some(last) = last_run {
            let last = last.with_timezone(&self.tz);
            if last.hour() == local.hour() && last.date_naive() == local.date_naive() {
                return false;
            }
        }
        true
    }

    /// The earliest candidate instant strictly after `now`, or the first
    /// configured hour of the following civil day once today's slots have
    /// all passed. `None` only when the hour set is empty.
    ///
    /// With a non-zero grace tolerance, a slot that started within the
    /// last `grace_minutes` is credited as the *current* slot and the one
    /// after it is returned instead. The shift is the real gap to the
    /// following configured hour, wrapping to tomorrow's first hour.
    pub fn next_eligible(&self, now: DateTime<Utc>) -> Option<DateTime<Tz>> {
        if self.hours.is_empty() {
            return None;
        }
        let local = now.with_timezone(&self.tz);
        let today = local.date_naive();

        if self.grace_minutes > 0 {
            let grace = Duration::minutes(i64::from(self.grace_minutes));
            for (i, &hour) in self.hours.iter().enumerate() {
                let candidate = match at_hour(&self.tz, today, hour) {
                    Some(c) => c,
                    None => continue,
                };
                if candidate <= local && local - candidate <= grace {
                    return self.following_slot(i, today);
                }
            }
        }

        for &hour in &self.hours {
            if let Some(candidate) = at_hour(&self.tz, today, hour) {
                if candidate > local {
                    return Some(candidate);
                }
            }
        }
        self.first_slot_on(today.succ_opt()?)
    }

    /// Convenience bundle of [`should_run`](Self::should_run) and
    /// [`next_eligible`](Self::next_eligible).
    pub fn evaluate(
        &self,
        now: DateTime<Utc>,
        last_run: Option<DateTime<Utc>>,
        force: bool,
    ) -> Evaluation {
        Evaluation {
            should_run: self.should_run(now, last_run, force),
            next_run: self
                .next_eligible(now)
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// The slot after slot index `i` on `day`, wrapping to the first
    /// configured hour of the next day.
    fn following_slot(&self, i: usize, day: NaiveDate) -> Option<DateTime<Tz>> {
        match self.hours.get(i + 1) {
            Some(&hour) => at_hour(&self.tz, day, hour),
            None => self.first_slot_on(day.succ_opt()?),
        }
    }

    fn first_slot_on(&self, day: NaiveDate) -> Option<DateTime<Tz>> {
        for &hour in &self.hours {
            if let Some(candidate) = at_hour(&self.tz, day, hour) {
                return Some(candidate);
            }
        }
        // Every configured hour fell into a transition gap; try the day after.
        self.first_slot_on(day.succ_opt()?)
    }
}

/// `hour:00:00` civil time on `day`, or `None` when the transition gap
/// erased that hour. Ambiguous (fold) hours resolve to the earlier instant.
fn at_hour(tz: &Tz, day: NaiveDate, hour: u32) -> Option<DateTime<Tz>> {
    match tz.with_ymd_and_hms(day.year(), day.month(), day.day(), hour, 0, 0) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Offset;
    use chrono_tz::America::{New_York, Sao_Paulo};
    use chrono_tz::Tz;
    use proptest::prelude::*;

    fn sao_paulo(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Sao_Paulo
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn window(hours: &[u32]) -> RunWindow {
        RunWindow::new(Sao_Paulo, hours.iter().copied())
    }

    #[test]
    fn runs_when_hour_allowed_and_no_last_run() {
        let w = window(&[8, 12, 16, 20]);
        let now = sao_paulo(2026, 3, 2, 12, 10);
        assert!(w.should_run(now, None, false));
    }

    #[test]
    fn refuses_outside_allowed_hours() {
        let w = window(&[8, 12, 16, 20]);
        let now = sao_paulo(2026, 3, 2, 13, 0);
        assert!(!w.should_run(now, None, false));
    }

    #[test]
    fn same_slot_same_day_runs_once() {
        let w = window(&[8, 12, 16, 20]);
        let first = sao_paulo(2026, 3, 2, 12, 1);
        let second = sao_paulo(2026, 3, 2, 12, 40);
        assert!(!w.should_run(second, Some(first), false));
        // Same hour the next day is a fresh slot.
        let next_day = sao_paulo(2026, 3, 3, 12, 5);
        assert!(w.should_run(next_day, Some(first), false));
    }

    #[test]
    fn should_run_is_idempotent() {
        let w = window(&[8, 12]);
        let now = sao_paulo(2026, 3, 2, 8, 30);
        let last = Some(sao_paulo(2026, 3, 2, 8, 0));
        let first = w.should_run(now, last, false);
        for _ in 0..10 {
            assert_eq!(w.should_run(now, last, false), first);
        }
    }

    #[test]
    fn empty_hours_fails_closed_but_force_overrides() {
        let w = window(&[]);
        let now = sao_paulo(2026, 3, 2, 12, 0);
        assert!(!w.should_run(now, None, false));
        assert!(w.should_run(now, None, true));
        assert!(w.next_eligible(now).is_none());
    }

    #[test]
    fn force_ignores_last_run_and_hour() {
        let w = window(&[8]);
        let now = sao_paulo(2026, 3, 2, 17, 0);
        let last = Some(now);
        assert!(w.should_run(now, last, true));
    }

    #[test]
    fn next_slot_later_same_day() {
        let w = window(&[8, 12, 16, 20]);
        let now = sao_paulo(2026, 3, 2, 10, 0);
        let next = w.next_eligible(now).unwrap();
        assert_eq!(next, Sao_Paulo.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap());
    }

    #[test]
    fn wraps_to_first_hour_tomorrow() {
        let w = window(&[0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22]);
        let now = sao_paulo(2026, 3, 2, 23, 30);
        let next = w.next_eligible(now).unwrap();
        assert_eq!(next, Sao_Paulo.with_ymd_and_hms(2026, 3, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn exact_slot_instant_is_not_its_own_next() {
        let w = window(&[8, 12]);
        let now = sao_paulo(2026, 3, 2, 8, 0);
        let next = w.next_eligible(now).unwrap();
        assert_eq!(next, Sao_Paulo.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap());
    }

    #[test]
    fn grace_credits_late_slot_and_schedules_the_following_one() {
        let w = window(&[8, 12, 16, 20]).with_grace(15);
        let now = sao_paulo(2026, 3, 2, 8, 5);
        // Within tolerance the 08:00 slot counts as current.
        assert!(w.should_run(now, None, false));
        let next = w.next_eligible(now).unwrap();
        assert_eq!(next, Sao_Paulo.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap());

        // After a run recorded at 08:05 the slot must not re-trigger.
        let later = sao_paulo(2026, 3, 2, 8, 20);
        assert!(!w.should_run(later, Some(now), false));
    }

    #[test]
    fn grace_uses_real_gap_for_irregular_hours() {
        // 9 follows 8; the shift is one hour, not a fixed spacing.
        let w = window(&[8, 9, 17]).with_grace(30);
        let now = sao_paulo(2026, 3, 2, 8, 10);
        let next = w.next_eligible(now).unwrap();
        assert_eq!(next, Sao_Paulo.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
    }

    #[test]
    fn grace_on_last_slot_wraps_to_tomorrow() {
        let w = window(&[8, 20]).with_grace(15);
        let now = sao_paulo(2026, 3, 2, 20, 10);
        let next = w.next_eligible(now).unwrap();
        assert_eq!(next, Sao_Paulo.with_ymd_and_hms(2026, 3, 3, 8, 0, 0).unwrap());
    }

    #[test]
    fn expired_grace_slot_is_simply_skipped() {
        let w = window(&[8, 12]).with_grace(15);
        let now = sao_paulo(2026, 3, 2, 8, 20);
        let next = w.next_eligible(now).unwrap();
        assert_eq!(next, Sao_Paulo.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap());
    }

    // 2024-03-10 02:00 never happens in New York: clocks jump 02:00 -> 03:00.
    #[test]
    fn spring_forward_gap_skips_erased_hour() {
        let w = RunWindow::new(New_York, [2, 12]);
        let now = New_York
            .with_ymd_and_hms(2024, 3, 10, 1, 30, 0)
            .unwrap()
            .with_timezone(&Utc);
        let next = w.next_eligible(now).unwrap();
        assert_eq!(next.hour(), 12);
        assert_eq!(next.date_naive(), chrono::NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    // 2024-11-03 01:00 happens twice in New York; the earlier instant wins.
    #[test]
    fn fall_back_fold_resolves_to_earlier_instant() {
        let w = RunWindow::new(New_York, [1]);
        let now = New_York
            .with_ymd_and_hms(2024, 11, 3, 0, 30, 0)
            .unwrap()
            .with_timezone(&Utc);
        let next = w.next_eligible(now).unwrap();
        assert_eq!(next.hour(), 1);
        // Earlier of the two 01:00s is still on EDT (UTC-4).
        assert_eq!(next.offset().fix().local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn candidate_civil_hour_matches_configuration_across_dst() {
        let w = RunWindow::new(New_York, [8]);
        // Evaluate the day before and the day after the spring transition.
        for day in [9, 11] {
            let now = New_York
                .with_ymd_and_hms(2024, 3, day, 6, 0, 0)
                .unwrap()
                .with_timezone(&Utc);
            let next = w.next_eligible(now).unwrap();
            assert_eq!(next.hour(), 8);
        }
    }

    #[test]
    fn hours_are_sorted_and_deduplicated() {
        let w = window(&[20, 8, 12, 8, 30]);
        assert_eq!(w.hours(), &[8, 12, 20]);
    }

    #[test]
    fn evaluate_bundles_decision_and_next_run() {
        let w = window(&[8, 12]);
        let now = sao_paulo(2026, 3, 2, 8, 30);
        let eval = w.evaluate(now, None, false);
        assert!(eval.should_run);
        assert_eq!(
            eval.next_run.unwrap(),
            Sao_Paulo
                .with_ymd_and_hms(2026, 3, 2, 12, 0, 0)
                .unwrap()
                .with_timezone(&Utc)
        );
    }

    proptest! {
        // Non-empty hour sets always yield a strictly future instant.
        #[test]
        fn next_eligible_is_strictly_future(
            hours in proptest::collection::btree_set(0u32..24, 1..8),
            secs in 1_700_000_000i64..1_900_000_000i64,
            tz_pick in 0usize..3,
        ) {
            let tz: Tz = [chrono_tz::UTC, Sao_Paulo, New_York][tz_pick];
            let w = RunWindow::new(tz, hours);
            let now = DateTime::from_timestamp(secs, 0).unwrap();
            let next = w.next_eligible(now).unwrap();
            prop_assert!(next.with_timezone(&Utc) > now);
            prop_assert!(w.hours().contains(&next.hour()));
            prop_assert_eq!(next.minute(), 0);
            prop_assert_eq!(next.second(), 0);
        }
    }
}
