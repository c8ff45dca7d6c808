//! Tick-driven animation scheduler
//!
//! The scheduler owns every animated value and every running task. Nothing
//! runs on its own: the UI loop calls [`Scheduler::advance`] once per frame
//! with the elapsed time, and renderers read values back out.

use super::{lerp, Animation, SpringConfig, Step};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

/// Handle to an animated value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueId(u64);

/// Handle to a running animation task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// Scheduler shared between the UI loop and the components it drives
pub type SchedulerHandle = Rc<RefCell<dyn Scheduler>>;

/// Host animation runtime
pub trait Scheduler {
    /// Allocate a new value
    fn create_value(&mut self, initial: f64) -> ValueId;

    /// Current value, `None` once released
    fn value(&self, id: ValueId) -> Option<f64>;

    /// Start an animation on a value. Any task already driving the value is
    /// dropped and the new one starts from the current value.
    fn start(&mut self, id: ValueId, animation: Animation) -> Option<TaskId>;

    /// Stop a task, leaving its value where it is
    fn stop(&mut self, task: TaskId) -> bool;

    /// Cancel every task on a value and free it
    fn release(&mut self, id: ValueId);

    /// Number of live tasks
    fn pending(&self) -> usize;

    /// Step every task by `dt`, returning the number still pending
    fn advance(&mut self, dt: Duration) -> usize;
}

/// Velocity and displacement below which a spring counts as settled
const REST_THRESHOLD: f64 = 0.001;
/// Fixed integration step for springs, in seconds
const SPRING_STEP: f64 = 0.001;
/// Fastest the animation clock may run relative to real time
const MAX_TIME_SCALE: f64 = 100.0;

#[derive(Debug)]
struct Task {
    value: ValueId,
    driver: Driver,
}

#[derive(Debug)]
enum Driver {
    Sequence(SequenceState),
    Spring(SpringState),
}

#[derive(Debug)]
struct SequenceState {
    steps: Vec<Step>,
    repeat: bool,
    index: usize,
    elapsed: Duration,
    from: Option<f64>,
}

#[derive(Debug)]
struct SpringState {
    to: f64,
    stiffness: f64,
    damping: f64,
    velocity: f64,
}

impl Driver {
    fn new(animation: Animation) -> Self {
        match animation {
            Animation::Sequence { steps, repeat } => Driver::Sequence(SequenceState {
                steps,
                repeat,
                index: 0,
                elapsed: Duration::ZERO,
                from: None,
            }),
            Animation::Spring { to, config } => Driver::Spring(SpringState::new(to, config)),
        }
    }

    /// Advance by `dt`, returning true when the task is finished
    fn step(&mut self, value: &mut f64, dt: Duration) -> bool {
        match self {
            Driver::Sequence(seq) => seq.step(value, dt),
            Driver::Spring(spring) => spring.step(value, dt),
        }
    }
}

impl SequenceState {
    fn step(&mut self, value: &mut f64, dt: Duration) -> bool {
        if self.steps.is_empty() {
            return true;
        }
        // A loop with no duration would never consume time
        if self.repeat && self.steps.iter().all(|s| s.duration().is_zero()) {
            return true;
        }

        let mut budget = dt;
        loop {
            let step = self.steps[self.index];
            let from = *self.from.get_or_insert(*value);
            let remaining = step.duration().saturating_sub(self.elapsed);

            if budget < remaining {
                self.elapsed += budget;
                if let Step::Tween { to, duration, easing } = step {
                    let t = self.elapsed.as_secs_f64() / duration.as_secs_f64();
                    *value = lerp(from, to, easing.apply(t));
                }
                return false;
            }

            budget -= remaining;
            if let Step::Tween { to, .. } = step {
                *value = to;
            }
            self.index += 1;
            self.elapsed = Duration::ZERO;
            self.from = None;

            if self.index == self.steps.len() {
                if self.repeat {
                    self.index = 0;
                } else {
                    return true;
                }
            }
        }
    }
}

impl SpringState {
    fn new(to: f64, config: SpringConfig) -> Self {
        Self {
            to,
            stiffness: config.stiffness(),
            damping: config.damping(),
            velocity: 0.0,
        }
    }

    fn settled(&self, value: f64) -> bool {
        self.velocity.abs() < REST_THRESHOLD && (value - self.to).abs() < REST_THRESHOLD
    }

    fn step(&mut self, value: &mut f64, dt: Duration) -> bool {
        let mut remaining = dt.as_secs_f64();
        loop {
            if self.settled(*value) {
                *value = self.to;
                self.velocity = 0.0;
                return true;
            }
            if remaining <= f64::EPSILON {
                return false;
            }
            let h = remaining.min(SPRING_STEP);
            let accel = -self.stiffness * (*value - self.to) - self.damping * self.velocity;
            self.velocity += accel * h;
            *value += self.velocity * h;
            remaining -= h;
        }
    }
}

/// Default scheduler, advanced by the UI loop once per frame
#[derive(Debug)]
pub struct FrameScheduler {
    values: BTreeMap<ValueId, f64>,
    tasks: BTreeMap<TaskId, Task>,
    next_value: u64,
    next_task: u64,
    time_scale: f64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl FrameScheduler {
    /// Create a scheduler whose clock runs `time_scale` times real time.
    ///
    /// The scale is clamped to `0..=MAX_TIME_SCALE`; NaN and infinities
    /// fall back to real time.
    pub fn new(time_scale: f64) -> Self {
        let time_scale = if time_scale.is_finite() {
            time_scale.clamp(0.0, MAX_TIME_SCALE)
        } else {
            1.0
        };
        Self {
            values: BTreeMap::new(),
            tasks: BTreeMap::new(),
            next_value: 0,
            next_task: 0,
            time_scale,
        }
    }

    /// Wrap in a shared handle
    pub fn shared(self) -> Rc<RefCell<FrameScheduler>> {
        Rc::new(RefCell::new(self))
    }

    /// Number of tasks currently driving `id`
    #[cfg(test)]
    pub fn tasks_for(&self, id: ValueId) -> usize {
        self.tasks.values().filter(|t| t.value == id).count()
    }

    /// Number of live values
    #[cfg(test)]
    pub fn live_values(&self) -> usize {
        self.values.len()
    }
}

impl Scheduler for FrameScheduler {
    fn create_value(&mut self, initial: f64) -> ValueId {
        let id = ValueId(self.next_value);
        self.next_value += 1;
        self.values.insert(id, initial);
        id
    }

    fn value(&self, id: ValueId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    fn start(&mut self, id: ValueId, animation: Animation) -> Option<TaskId> {
        if !self.values.contains_key(&id) {
            return None;
        }
        self.tasks.retain(|_, t| t.value != id);

        let task = TaskId(self.next_task);
        self.next_task += 1;
        self.tasks.insert(
            task,
            Task {
                value: id,
                driver: Driver::new(animation),
            },
        );
        Some(task)
    }

    fn stop(&mut self, task: TaskId) -> bool {
        self.tasks.remove(&task).is_some()
    }

    fn release(&mut self, id: ValueId) {
        self.tasks.retain(|_, t| t.value != id);
        self.values.remove(&id);
    }

    fn pending(&self) -> usize {
        self.tasks.len()
    }

    fn advance(&mut self, dt: Duration) -> usize {
        let dt = dt.mul_f64(self.time_scale);
        let values = &mut self.values;
        self.tasks.retain(|_, task| match values.get_mut(&task.value) {
            Some(value) => !task.driver.step(value, dt),
            None => false,
        });
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_timing_reaches_target() {
        let mut s = FrameScheduler::default();
        let v = s.create_value(0.0);
        s.start(v, Animation::timing(1.0, ms(250)).easing(Easing::Linear));

        s.advance(ms(125));
        assert!((s.value(v).unwrap() - 0.5).abs() < 1e-9);

        assert_eq!(s.advance(ms(125)), 0);
        assert_eq!(s.value(v), Some(1.0));
    }

    #[test]
    fn test_delay_holds_value() {
        let mut s = FrameScheduler::default();
        let v = s.create_value(0.0);
        s.start(v, Animation::timing(1.0, ms(100)).delay(ms(60)));

        s.advance(ms(60));
        assert_eq!(s.value(v), Some(0.0));
        s.advance(ms(100));
        assert_eq!(s.value(v), Some(1.0));
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_retarget_replaces_task() {
        let mut s = FrameScheduler::default();
        let v = s.create_value(0.0);
        s.start(v, Animation::timing(1.0, ms(200)));
        s.advance(ms(100));
        let midway = s.value(v).unwrap();

        s.start(v, Animation::timing(0.0, ms(200)));
        assert_eq!(s.tasks_for(v), 1);
        // Picks up from where the previous tween left off
        assert_eq!(s.value(v), Some(midway));

        s.advance(ms(200));
        assert_eq!(s.value(v), Some(0.0));
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut s = FrameScheduler::default();
        let v = s.create_value(1.0);
        s.start(v, Animation::spring(1.15, SpringConfig::new(120.0, 8.0)));

        for _ in 0..200 {
            s.advance(ms(16));
        }
        assert_eq!(s.pending(), 0);
        assert_eq!(s.value(v), Some(1.15));
    }

    #[test]
    fn test_spring_already_at_rest_finishes() {
        let mut s = FrameScheduler::default();
        let v = s.create_value(0.0);
        s.start(v, Animation::spring(0.0, SpringConfig::new(68.0, 12.0)));
        assert_eq!(s.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_loop_never_finishes() {
        let mut s = FrameScheduler::default();
        let v = s.create_value(1.0);
        s.start(
            v,
            Animation::looping(vec![Step::tween(1.3, 1000), Step::tween(1.0, 1000)]),
        );

        s.advance(ms(1000));
        assert_eq!(s.value(v), Some(1.3));
        s.advance(ms(1000));
        assert_eq!(s.value(v), Some(1.0));
        assert_eq!(s.advance(ms(10_000)), 1);
    }

    #[test]
    fn test_loop_with_pause() {
        let mut s = FrameScheduler::default();
        let v = s.create_value(1.0);
        s.start(
            v,
            Animation::looping(vec![
                Step::tween(1.2, 600),
                Step::tween(1.0, 600),
                Step::pause(800),
            ]),
        );

        s.advance(ms(1200));
        assert_eq!(s.value(v), Some(1.0));
        s.advance(ms(400));
        assert_eq!(s.value(v), Some(1.0));
        // Next beat starts after the pause
        s.advance(ms(700));
        assert!(s.value(v).unwrap() > 1.0);
    }

    #[test]
    fn test_time_scale_is_sanitized() {
        for scale in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 1e300] {
            let mut s = FrameScheduler::new(scale);
            let v = s.create_value(0.0);
            s.start(
                v,
                Animation::looping(vec![Step::tween(1.0, 1000), Step::tween(0.0, 1000)]),
            );
            assert_eq!(s.advance(ms(16)), 1);
            assert!(s.value(v).unwrap().is_finite());
        }
        assert_eq!(FrameScheduler::new(1e300).time_scale, MAX_TIME_SCALE);
        assert_eq!(FrameScheduler::new(-2.0).time_scale, 0.0);
    }

    #[test]
    fn test_zero_length_loop_is_dropped() {
        let mut s = FrameScheduler::default();
        let v = s.create_value(0.0);
        s.start(v, Animation::looping(vec![Step::pause(0)]));
        assert_eq!(s.advance(ms(16)), 0);
    }

    #[test]
    fn test_release_cancels_tasks() {
        let mut s = FrameScheduler::default();
        let v = s.create_value(0.0);
        s.start(v, Animation::looping(vec![Step::tween(1.0, 500), Step::tween(0.0, 500)]));
        s.release(v);

        assert_eq!(s.pending(), 0);
        assert_eq!(s.value(v), None);
        assert!(s.start(v, Animation::timing(1.0, ms(10))).is_none());
    }

    #[test]
    fn test_stop_leaves_value() {
        let mut s = FrameScheduler::default();
        let v = s.create_value(0.0);
        let task = s.start(v, Animation::timing(1.0, ms(100))).unwrap();
        s.advance(ms(50));
        assert!(s.stop(task));
        let held = s.value(v);
        s.advance(ms(100));
        assert_eq!(s.value(v), held);
        assert!(!s.stop(task));
    }

    #[test]
    fn test_time_scale() {
        let mut s = FrameScheduler::new(2.0);
        let v = s.create_value(0.0);
        s.start(v, Animation::timing(1.0, ms(200)));
        s.advance(ms(100));
        assert_eq!(s.value(v), Some(1.0));
    }
}
