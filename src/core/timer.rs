//! Session/timer state machine.
//!
//! Tracks whether a session is idle, running or paused and accumulates
//! elapsed time from clock samples. Pausing freezes the elapsed value;
//! resuming re-derives a virtual start instant (`now - elapsed`) so the
//! counter continues where it stopped. The completion signal is raised
//! exactly once, the first tick where elapsed reaches the target.
//!
//! Transitions whose preconditions fail are silent no-ops returning `None`.
//! Persistence, alert scheduling and snapshot publication are the caller's
//! concern: the machine only reports what happened through its return values
//! and registered observers.

use crate::core::clock::Clock;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    Running { virtual_start: DateTime<Local> },
    Paused { frozen_secs: i64 },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running { .. } => "running",
            Phase::Paused { .. } => "paused",
        }
    }
}

/// Snapshot of the counter produced by [`SessionTimer::tick`] and
/// [`SessionTimer::peek`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub elapsed_secs: i64,
    pub remaining_secs: i64,
    pub progress: f64,
    /// True exactly once, on the tick where elapsed first reaches the target.
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    Started { at: DateTime<Local> },
    Paused { elapsed_secs: i64 },
    Resumed { virtual_start: DateTime<Local> },
    Stopped { at: DateTime<Local>, elapsed_secs: i64 },
    Ticked(TickReport),
    Completed,
}

/// State-change subscription. Observers register with [`SessionTimer::observe`]
/// and own their registration id; unregistering is the observer's teardown
/// duty, there are no weak back-references.
pub trait TimerObserver {
    fn on_event(&mut self, event: &TimerEvent);
}

pub type ObserverId = usize;

pub struct SessionTimer<C: Clock> {
    clock: C,
    enabled: bool,
    target_secs: i64,
    phase: Phase,
    alert_fired: bool,
    observers: Vec<(ObserverId, Box<dyn TimerObserver>)>,
    next_observer: ObserverId,
}

impl<C: Clock> SessionTimer<C> {
    pub fn new(clock: C, enabled: bool, target_secs: i64) -> Self {
        Self::restore(clock, enabled, target_secs, Phase::Idle, false)
    }

    /// Rebuild a machine from persisted state (one-shot CLI invocations).
    pub fn restore(
        clock: C,
        enabled: bool,
        target_secs: i64,
        phase: Phase,
        alert_fired: bool,
    ) -> Self {
        Self {
            clock,
            enabled,
            target_secs,
            phase,
            alert_fired,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn target_secs(&self) -> i64 {
        self.target_secs
    }

    pub fn alert_fired(&self) -> bool {
        self.alert_fired
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn observe(&mut self, observer: Box<dyn TimerObserver>) -> ObserverId {
        let id = self.next_observer;
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn unobserve(&mut self, id: ObserverId) {
        self.observers.retain(|(oid, _)| *oid != id);
    }

    fn emit(&mut self, event: &TimerEvent) {
        for (_, obs) in self.observers.iter_mut() {
            obs.on_event(event);
        }
    }

    pub fn elapsed_secs(&self) -> i64 {
        match self.phase {
            Phase::Idle => 0,
            Phase::Running { virtual_start } => {
                (self.clock.now() - virtual_start).num_seconds().max(0)
            }
            Phase::Paused { frozen_secs } => frozen_secs,
        }
    }

    pub fn remaining_secs(&self) -> i64 {
        if !self.enabled {
            return 0;
        }
        (self.target_secs - self.elapsed_secs()).max(0)
    }

    pub fn progress(&self) -> f64 {
        if !self.enabled || self.target_secs <= 0 {
            return 0.0;
        }
        (self.elapsed_secs() as f64 / self.target_secs as f64).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.enabled && self.elapsed_secs() >= self.target_secs
    }

    /// Idle → Running. Requires the timer enabled with a target of at least
    /// one second. Returns the start instant, or `None` on a no-op.
    pub fn start(&mut self) -> Option<DateTime<Local>> {
        if !self.is_idle() || !self.enabled || self.target_secs < 1 {
            return None;
        }
        let at = self.clock.now();
        self.phase = Phase::Running { virtual_start: at };
        self.alert_fired = false;
        self.emit(&TimerEvent::Started { at });
        Some(at)
    }

    /// Running → Paused. Freezes elapsed at `now - virtual_start` and returns
    /// the frozen value. The open session is retained.
    pub fn pause(&mut self) -> Option<i64> {
        let Phase::Running { .. } = self.phase else {
            return None;
        };
        let frozen = self.elapsed_secs();
        self.phase = Phase::Paused { frozen_secs: frozen };
        self.emit(&TimerEvent::Paused { elapsed_secs: frozen });
        Some(frozen)
    }

    /// Paused → Running. Re-derives the virtual start so the counter resumes
    /// from the frozen value. Returns the new virtual start instant.
    pub fn resume(&mut self) -> Option<DateTime<Local>> {
        let Phase::Paused { frozen_secs } = self.phase else {
            return None;
        };
        if !self.enabled {
            return None;
        }
        let virtual_start = self.clock.now() - chrono::Duration::seconds(frozen_secs);
        self.phase = Phase::Running { virtual_start };
        self.emit(&TimerEvent::Resumed { virtual_start });
        Some(virtual_start)
    }

    /// Running/Paused → Idle. Returns the stop instant and the final elapsed
    /// value; a second stop in a row is a no-op returning `None`.
    pub fn stop(&mut self) -> Option<(DateTime<Local>, i64)> {
        if self.is_idle() {
            return None;
        }
        let at = self.clock.now();
        let elapsed = self.elapsed_secs();
        self.phase = Phase::Idle;
        self.alert_fired = false;
        self.emit(&TimerEvent::Stopped { at, elapsed_secs: elapsed });
        Some((at, elapsed))
    }

    /// One tick while running: recompute elapsed and raise the completion
    /// signal the first time elapsed reaches the target. `None` unless
    /// running.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.is_running() {
            return None;
        }
        let completed_now = self.is_complete() && !self.alert_fired;
        if completed_now {
            self.alert_fired = true;
        }
        let report = TickReport {
            elapsed_secs: self.elapsed_secs(),
            remaining_secs: self.remaining_secs(),
            progress: self.progress(),
            completed: completed_now,
        };
        self.emit(&TimerEvent::Ticked(report));
        if completed_now {
            self.emit(&TimerEvent::Completed);
        }
        Some(report)
    }

    /// Read-only view of the counter without advancing completion state.
    pub fn peek(&self) -> TickReport {
        TickReport {
            elapsed_secs: self.elapsed_secs(),
            remaining_secs: self.remaining_secs(),
            progress: self.progress(),
            completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone)]
    struct ManualClock(Rc<Cell<DateTime<Local>>>);

    impl ManualClock {
        fn at_origin() -> Self {
            let t0 = Local.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
            ManualClock(Rc::new(Cell::new(t0)))
        }

        fn advance(&self, secs: i64) {
            self.0.set(self.0.get() + chrono::Duration::seconds(secs));
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Local> {
            self.0.get()
        }
    }

    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl TimerObserver for Recorder {
        fn on_event(&mut self, event: &TimerEvent) {
            let name = match event {
                TimerEvent::Started { .. } => "started",
                TimerEvent::Paused { .. } => "paused",
                TimerEvent::Resumed { .. } => "resumed",
                TimerEvent::Stopped { .. } => "stopped",
                TimerEvent::Ticked(_) => "ticked",
                TimerEvent::Completed => "completed",
            };
            self.0.borrow_mut().push(name.to_string());
        }
    }

    #[test]
    fn start_requires_enabled_timer_and_positive_target() {
        let clock = ManualClock::at_origin();
        let mut disabled = SessionTimer::new(clock.clone(), false, 3600);
        assert!(disabled.start().is_none());
        assert!(disabled.is_idle());

        let mut zero_target = SessionTimer::new(clock.clone(), true, 0);
        assert!(zero_target.start().is_none());
        assert!(zero_target.is_idle());

        let mut ok = SessionTimer::new(clock, true, 60);
        assert!(ok.start().is_some());
        assert!(ok.is_running());
    }

    #[test]
    fn tick_reports_progress_halfway() {
        let clock = ManualClock::at_origin();
        let mut timer = SessionTimer::new(clock.clone(), true, 60);
        timer.start().unwrap();

        clock.advance(30);
        let report = timer.tick().unwrap();
        assert_eq!(report.elapsed_secs, 30);
        assert_eq!(report.remaining_secs, 30);
        assert!((report.progress - 0.5).abs() < f64::EPSILON);
        assert!(!report.completed);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let clock = ManualClock::at_origin();
        let mut timer = SessionTimer::new(clock.clone(), true, 60);
        timer.start().unwrap();

        clock.advance(61);
        let first = timer.tick().unwrap();
        assert!(first.completed);
        assert!((first.progress - 1.0).abs() < f64::EPSILON);
        assert_eq!(first.remaining_secs, 0);

        clock.advance(1);
        let second = timer.tick().unwrap();
        assert!(!second.completed, "completion signal must be one-shot");
        assert!(timer.is_complete());
    }

    #[test]
    fn pause_freezes_elapsed_and_resume_rederives_virtual_start() {
        let clock = ManualClock::at_origin();
        let mut timer = SessionTimer::new(clock.clone(), true, 3600);
        timer.start().unwrap();

        clock.advance(20);
        assert_eq!(timer.pause(), Some(20));

        // Wall clock keeps moving while paused; the counter does not.
        clock.advance(30);
        assert_eq!(timer.elapsed_secs(), 20);

        timer.resume().unwrap();
        clock.advance(20);
        let report = timer.tick().unwrap();
        assert_eq!(report.elapsed_secs, 40, "20 frozen + 20 after resume, not 70");
    }

    #[test]
    fn pause_resume_noops_outside_their_phase() {
        let clock = ManualClock::at_origin();
        let mut timer = SessionTimer::new(clock.clone(), true, 60);
        assert!(timer.pause().is_none());
        assert!(timer.resume().is_none());

        timer.start().unwrap();
        assert!(timer.resume().is_none(), "resume while running is a no-op");
    }

    #[test]
    fn stop_is_idempotent() {
        let clock = ManualClock::at_origin();
        let mut timer = SessionTimer::new(clock.clone(), true, 60);
        timer.start().unwrap();
        clock.advance(5);

        let (_, elapsed) = timer.stop().unwrap();
        assert_eq!(elapsed, 5);
        assert!(timer.is_idle());
        assert!(timer.stop().is_none(), "second stop must be a no-op");
    }

    #[test]
    fn elapsed_excludes_paused_intervals_across_cycles() {
        let clock = ManualClock::at_origin();
        let mut timer = SessionTimer::new(clock.clone(), true, 3600);
        timer.start().unwrap();

        clock.advance(10);
        timer.pause().unwrap();
        clock.advance(100);
        timer.resume().unwrap();
        clock.advance(10);
        timer.pause().unwrap();
        clock.advance(100);
        timer.resume().unwrap();
        clock.advance(10);

        let (_, elapsed) = timer.stop().unwrap();
        assert_eq!(elapsed, 30, "sum of running intervals only");
    }

    #[test]
    fn observers_receive_events_until_unregistered() {
        let clock = ManualClock::at_origin();
        let mut timer = SessionTimer::new(clock.clone(), true, 60);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let id = timer.observe(Box::new(Recorder(Rc::clone(&seen))));

        timer.start().unwrap();
        clock.advance(61);
        timer.tick().unwrap();
        timer.stop().unwrap();

        assert_eq!(
            *seen.borrow(),
            vec!["started", "ticked", "completed", "stopped"]
        );

        timer.unobserve(id);
        timer.start().unwrap();
        assert_eq!(seen.borrow().len(), 4, "no events after unregistration");
    }
}
