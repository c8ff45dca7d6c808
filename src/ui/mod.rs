//! User Interface layer
//!
//! This module contains all UI-related code:
//! - Theme definitions and colors
//! - Reusable widgets
//! - The animated tab bar renderer
//! - Screen renderers

pub mod render;
pub mod tab_bar;
pub mod theme;
pub mod widgets;

pub use render::render;
pub use theme::Theme;
