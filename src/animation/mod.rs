//! Animation primitives
//!
//! Animated values are plain `f64` scalars owned by a [`Scheduler`]. An
//! [`Animation`] describes how one value moves towards a target:
//! - timed tweens with an optional delay and easing curve
//! - springs parameterised by tension and friction
//! - perpetual loops built from tween and pause steps

pub mod scheduler;

pub use scheduler::{FrameScheduler, Scheduler, SchedulerHandle, TaskId, ValueId};

use std::time::Duration;

/// Easing curve applied to a tween's normalized progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in 0..=1 onto the curve
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// One leg of a tween sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Tween {
        to: f64,
        duration: Duration,
        easing: Easing,
    },
    Pause(Duration),
}

impl Step {
    pub fn tween(to: f64, millis: u64) -> Self {
        Step::Tween {
            to,
            duration: Duration::from_millis(millis),
            easing: Easing::EaseInOut,
        }
    }

    pub fn pause(millis: u64) -> Self {
        Step::Pause(Duration::from_millis(millis))
    }

    pub fn duration(&self) -> Duration {
        match self {
            Step::Tween { duration, .. } => *duration,
            Step::Pause(duration) => *duration,
        }
    }
}

/// Spring physics parameters, in the tension/friction convention
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub tension: f64,
    pub friction: f64,
}

impl SpringConfig {
    pub const fn new(tension: f64, friction: f64) -> Self {
        Self { tension, friction }
    }

    /// Stiffness derived from origami tension
    pub fn stiffness(&self) -> f64 {
        (self.tension - 30.0) * 3.62 + 194.0
    }

    /// Damping derived from origami friction
    pub fn damping(&self) -> f64 {
        (self.friction - 8.0) * 3.0 + 25.0
    }
}

/// A description of how a value should move
#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    /// Run `steps` once, or forever when `repeat` is set
    Sequence { steps: Vec<Step>, repeat: bool },
    Spring { to: f64, config: SpringConfig },
}

impl Animation {
    /// Single eased tween from the current value to `to`
    pub fn timing(to: f64, duration: Duration) -> Self {
        Animation::Sequence {
            steps: vec![Step::Tween {
                to,
                duration,
                easing: Easing::EaseInOut,
            }],
            repeat: false,
        }
    }

    pub fn spring(to: f64, config: SpringConfig) -> Self {
        Animation::Spring { to, config }
    }

    /// Perpetual loop over `steps`
    pub fn looping(steps: Vec<Step>) -> Self {
        Animation::Sequence {
            steps,
            repeat: true,
        }
    }

    /// Prefix a pause before the animation starts. Springs are wrapped
    /// unchanged since they have no step list.
    pub fn delay(self, delay: Duration) -> Self {
        match self {
            Animation::Sequence { mut steps, repeat } if !delay.is_zero() => {
                steps.insert(0, Step::Pause(delay));
                Animation::Sequence { steps, repeat }
            }
            other => other,
        }
    }

    /// Replace the easing of every tween step
    pub fn easing(self, easing: Easing) -> Self {
        match self {
            Animation::Sequence { steps, repeat } => Animation::Sequence {
                steps: steps
                    .into_iter()
                    .map(|step| match step {
                        Step::Tween { to, duration, .. } => Step::Tween { to, duration, easing },
                        pause => pause,
                    })
                    .collect(),
                repeat,
            },
            spring => spring,
        }
    }
}

/// Linear interpolation between `a` and `b`
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
        }
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_delay_prefixes_pause() {
        let anim = Animation::timing(1.0, Duration::from_millis(250)).delay(Duration::from_millis(40));
        match anim {
            Animation::Sequence { steps, repeat } => {
                assert!(!repeat);
                assert_eq!(steps[0], Step::pause(40));
                assert_eq!(steps.len(), 2);
            }
            _ => panic!("expected sequence"),
        }
    }

    #[test]
    fn test_zero_delay_is_noop() {
        let anim = Animation::timing(1.0, Duration::from_millis(250));
        assert_eq!(anim.clone().delay(Duration::ZERO), anim);
    }

    #[test]
    fn test_origami_conversion() {
        let cfg = SpringConfig::new(40.0, 7.0);
        assert!((cfg.stiffness() - 230.2).abs() < 1e-9);
        assert!((cfg.damping() - 22.0).abs() < 1e-9);
    }
}
