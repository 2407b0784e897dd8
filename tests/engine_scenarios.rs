use std::time::Duration;

use chrono::FixedOffset;
use countdown_timer::{
    engine::{
        format_end_time,
        sim::{ManualClock, ManualScheduler},
    },
    state::END_TIME_NONE,
    CountdownEngine,
};

// 2021-06-15T13:57:00Z
const T0: i64 = 1_623_765_420_000;

struct Harness {
    engine: CountdownEngine<ManualClock, ManualScheduler>,
    clock: ManualClock,
    scheduler: ManualScheduler,
}

impl Harness {
    fn new(offset: FixedOffset) -> Self {
        let clock = ManualClock::with_offset(T0, offset);
        let scheduler = ManualScheduler::new(clock.clone());
        let engine = CountdownEngine::new(clock.clone(), scheduler.clone());
        Self { engine, clock, scheduler }
    }

    fn utc() -> Self {
        Self::new(FixedOffset::east_opt(0).unwrap())
    }

    /// Move the clock forward one second at a time, firing due ticks
    fn advance_secs(&mut self, secs: u64) {
        for _ in 0..secs {
            self.clock.advance(Duration::from_secs(1));
            for session in self.scheduler.due() {
                self.engine.tick(session);
            }
        }
    }
}

#[test]
fn three_second_countdown_end_to_end() {
    let mut h = Harness::utc();
    h.engine.start(3);

    let display = h.engine.display();
    assert_eq!(display.time_left, "00:03");
    assert_eq!(display.end_time, "1:57");

    h.advance_secs(1);
    assert_eq!(h.engine.display().time_left, "00:02");
    assert_eq!(h.engine.display().end_time, "1:57");

    h.advance_secs(1);
    assert_eq!(h.engine.display().time_left, "00:01");

    h.advance_secs(1);
    assert_eq!(h.engine.display().time_left, "00:00");
    assert_eq!(h.engine.display().end_time, END_TIME_NONE);
    assert!(h.engine.is_running());

    h.advance_secs(1);
    assert!(!h.engine.is_running());
    assert_eq!(h.scheduler.live_count(), 0);
    assert_eq!(h.engine.display().time_left, "00:00");
    assert_eq!(h.engine.display().end_time, END_TIME_NONE);

    // engine can be restarted after expiry
    h.engine.start(600);
    assert_eq!(h.engine.display().time_left, "10:00");
    assert_eq!(h.engine.display().end_time, "2:07");
}

#[test]
fn display_after_start_matches_formatters() {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    for seconds in [3u64, 600, 1800] {
        let mut h = Harness::new(offset);
        h.engine.start(seconds);

        let display = h.engine.display();
        assert_eq!(display.time_left, countdown_timer::engine::format_time_left(seconds));
        let end = T0 + seconds as i64 * 1000;
        assert_eq!(Some(display.end_time), format_end_time(end, &offset));
    }
}

#[test]
fn end_time_is_rendered_in_the_clock_zone() {
    // 13:57Z is 8:57 at UTC-5 and 23:57 at UTC+10
    let mut west = Harness::new(FixedOffset::west_opt(5 * 3600).unwrap());
    west.engine.start(180);
    assert_eq!(west.engine.display().end_time, "9:00");

    let mut east = Harness::new(FixedOffset::east_opt(10 * 3600).unwrap());
    east.engine.start(180);
    assert_eq!(east.engine.display().end_time, "12:00");
}

#[test]
fn late_ticks_recompute_from_the_end_timestamp() {
    let mut h = Harness::utc();
    h.engine.start(600);
    let session = h.engine.session().unwrap().id;

    // host stalls for a while and then delivers a single firing
    h.clock.advance(Duration::from_millis(61_400));
    h.engine.tick(session);
    assert_eq!(h.engine.display().time_left, "08:59");
}

#[test]
fn independent_engines_do_not_interfere() {
    let mut a = Harness::utc();
    let mut b = Harness::utc();

    a.engine.start(3);
    b.engine.start(1800);
    a.advance_secs(4);

    assert!(!a.engine.is_running());
    assert!(b.engine.is_running());
    assert_eq!(b.engine.display().end_time, "2:27");

    b.advance_secs(4);
    assert_eq!(b.engine.display().time_left, "29:56");
}

#[test]
fn restarting_mid_countdown_discards_the_old_end_time() {
    let mut h = Harness::utc();
    h.engine.start(1800);
    h.advance_secs(5);

    h.engine.start(3);
    assert_eq!(h.scheduler.live_count(), 1);
    assert_eq!(h.engine.display().time_left, "00:03");
    assert_eq!(h.engine.display().selected_seconds, 3);

    h.advance_secs(10);
    assert!(!h.engine.is_running());
    assert_eq!(h.engine.display().time_left, "00:00");
}

#[test]
fn hour_long_durations_wrap_minutes() {
    let mut h = Harness::utc();
    h.engine.start(3600);
    assert_eq!(h.engine.display().time_left, "00:00");

    h.advance_secs(1);
    assert_eq!(h.engine.display().time_left, "59:59");
}
