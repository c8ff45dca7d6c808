//! Core data types for heartline
//!
//! This module defines the shared data structures used throughout the application.

use chrono::{DateTime, Datelike, Local};

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Blend towards `other` by `t` in 0..=1
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(ch(self.0, other.0), ch(self.1, other.1), ch(self.2, other.2))
    }
}

/// Two-stop gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub start: Rgb,
    pub end: Rgb,
}

impl Gradient {
    pub const fn new(start: Rgb, end: Rgb) -> Self {
        Self { start, end }
    }

    /// Color at position `t` along the gradient
    pub fn at(&self, t: f64) -> Rgb {
        self.start.mix(self.end, t)
    }
}

/// Reference into an icon family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconRef {
    pub family: &'static str,
    pub name: &'static str,
}

/// Static configuration for one navigation destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabDescriptor {
    /// Route name this tab is matched against
    pub name: &'static str,
    pub icon: IconRef,
    pub label: &'static str,
    pub gradient: Gradient,
    pub notification: bool,
    pub notification_count: Option<u32>,
    /// Badge beats with the heartbeat loop instead of the generic pulse
    pub heartbeat: bool,
}

/// Top-level screens reachable through the href router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Splash,
    /// One of the tab shell's routes, by route name
    Tabs(String),
    Settings,
    NotFound { path: String },
}

/// A profile card on the discover deck
#[derive(Debug, Clone)]
pub struct ProfileCard {
    pub name: &'static str,
    pub age: u8,
    pub distance_km: u16,
    pub bio: &'static str,
    pub interests: &'static [&'static str],
}

/// Someone who liked the user
#[derive(Debug, Clone)]
pub struct Like {
    pub name: &'static str,
    pub age: u8,
    pub super_like: bool,
}

/// A conversation preview
#[derive(Debug, Clone)]
pub struct ChatPreview {
    pub name: &'static str,
    pub last_message: &'static str,
    pub sent_at: DateTime<Local>,
    pub unread: u32,
    pub online: bool,
}

impl ChatPreview {
    /// Format the timestamp relative to `now`
    pub fn formatted_time(&self, now: DateTime<Local>) -> String {
        format_relative(self.sent_at, now)
    }
}

/// Compact relative time: "now", "5m", "3h", weekday, or day.month
pub fn format_relative(at: DateTime<Local>, now: DateTime<Local>) -> String {
    let elapsed = now.signed_duration_since(at);

    if elapsed.num_minutes() < 1 {
        "now".into()
    } else if elapsed.num_hours() < 1 {
        format!("{}m", elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        format!("{}h", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        at.weekday().to_string()
    } else {
        format!("{}.{}", at.day(), at.month())
    }
}
