//! Tab bar rendering
//!
//! Draws a [`TabBarFrame`] into a four-row strip:
//! row 0 holds the indicator, rows 1-2 the icon (lifted icons sit on row 1),
//! row 3 the label.

use crate::icons;
use crate::tab_bar::{SlotFrame, TabBarFrame};
use crate::types::Rgb;
use crate::ui::theme::{color, rgb_of, Theme};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Rows the bar occupies
pub const BAR_HEIGHT: u16 = 4;

/// Lift (in layout units) at which the icon moves up a row
const LIFT_ROW_THRESHOLD: f64 = -5.0;

/// Scale above which icons render bold
const BOLD_SCALE: f64 = 1.07;

/// Fallback for themes without RGB colors
const DIM_FALLBACK: Rgb = Rgb(128, 128, 128);

pub fn render_tab_bar(frame: &mut Frame, bar: &TabBarFrame, theme: &Theme, area: Rect) {
    frame.render_widget(Block::default().style(theme.bar()), area);

    let Some(layout) = bar.layout else {
        return;
    };
    if area.height < BAR_HEIGHT || layout.tab_count == 0 || layout.bar_width <= 0.0 {
        return;
    }

    // Layout units to cells
    let unit = area.width as f64 / layout.bar_width;
    let dim = rgb_of(theme.fg_dim).unwrap_or(DIM_FALLBACK);

    for (pos, slot) in bar.slots.iter().enumerate() {
        let Some(slot) = slot else {
            continue;
        };
        let x = area.x + (layout.slot_x(pos) * unit).round() as u16;
        let next = area.x + (layout.slot_x(pos + 1) * unit).round() as u16;
        let slot_area = Rect::new(x, area.y, next.saturating_sub(x), area.height);
        render_slot(frame, slot, dim, theme, slot_area.intersection(area));
    }

    if let Some(indicator) = bar.indicator {
        let active = bar.slots.iter().flatten().find(|s| s.focused);
        let fg = active
            .map(|s| color(s.descriptor.gradient.start))
            .unwrap_or(theme.accent);

        let width = (indicator.width * indicator.scale * unit).round().max(1.0);
        let grow = width - indicator.width * unit;
        let x = (indicator.x * unit - grow / 2.0).round().max(0.0) as u16;

        let rect = Rect::new(area.x + x, area.y, width as u16, 1).intersection(area);
        let bar_line = Paragraph::new("▀".repeat(rect.width as usize))
            .style(Style::default().fg(fg).bg(theme.bar_bg));
        frame.render_widget(bar_line, rect);
    }
}

fn render_slot(frame: &mut Frame, slot: &SlotFrame, dim: Rgb, theme: &Theme, area: Rect) {
    if area.width == 0 || area.height < BAR_HEIGHT {
        return;
    }
    let progress = slot.progress.clamp(0.0, 1.0);
    let tint = dim.mix(slot.descriptor.gradient.start, progress);

    let mut icon_style = Style::default().fg(color(tint)).bg(theme.bar_bg);
    if slot.scale > BOLD_SCALE {
        icon_style = icon_style.add_modifier(Modifier::BOLD);
    }

    let mut icon_spans = vec![Span::styled(icons::glyph(slot.descriptor.icon), icon_style)];
    if let Some(badge) = &slot.badge {
        icon_spans.push(Span::raw(" "));
        icon_spans.push(badge_span(&badge.text, badge.scale, theme));
    }

    let icon_row = if slot.lift <= LIFT_ROW_THRESHOLD { 1 } else { 2 };
    let icon_rect = Rect::new(area.x, area.y + icon_row, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(icon_spans)).alignment(Alignment::Center),
        icon_rect,
    );

    let label_rect = Rect::new(area.x, area.y + 3, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(label_spans(slot, dim, theme))).alignment(Alignment::Center),
        label_rect,
    );
}

/// Label colored along the tab gradient, faded towards dim when inactive
fn label_spans(slot: &SlotFrame, dim: Rgb, theme: &Theme) -> Vec<Span<'static>> {
    let progress = slot.progress.clamp(0.0, 1.0);
    let chars: Vec<char> = slot.descriptor.label.chars().collect();
    let last = chars.len().saturating_sub(1).max(1) as f64;

    let mut base = Style::default().bg(theme.bar_bg);
    if slot.focused {
        base = base.add_modifier(Modifier::BOLD);
    }

    chars
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let rgb = dim.mix(slot.descriptor.gradient.at(i as f64 / last), progress);
            Span::styled(c.to_string(), base.fg(color(rgb)))
        })
        .collect()
}

/// Badge text; padding widens at the top of the pulse
pub fn badge_span(text: &str, scale: f64, theme: &Theme) -> Span<'static> {
    if text.is_empty() {
        return Span::styled("●", Style::default().fg(theme.badge_bg).bg(theme.bar_bg));
    }
    let content = if scale >= 1.1 {
        format!(" {} ", text)
    } else {
        text.to_string()
    };
    Span::styled(content, theme.badge())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::FrameScheduler;
    use crate::content::TABS;
    use crate::router::{Navigator, Router};
    use crate::tab_bar::{TabBarController, TabBarOptions};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(width: u16, routes: &[&str]) -> String {
        let scheduler = FrameScheduler::default().shared();
        let router = Router::new(routes);
        let controller = TabBarController::mount(
            scheduler,
            TABS,
            TabBarOptions {
                bar_width: width as f64,
                ..TabBarOptions::default()
            },
            router.state(),
        );
        let theme = Theme::blush();

        let mut terminal = Terminal::new(TestBackend::new(width, BAR_HEIGHT)).unwrap();
        terminal
            .draw(|f| render_tab_bar(f, &controller.frame(), &theme, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_renders_labels_and_badges() {
        let text = rendered(80, &["discover", "likes", "chats", "profile"]);
        for label in ["Discover", "Likes", "Chats", "Profile"] {
            assert!(text.contains(label), "missing {label}");
        }
        assert!(text.contains("99+"));
        assert!(text.contains('7'));
    }

    #[test]
    fn test_unknown_route_renders_nothing() {
        let text = rendered(60, &["discover", "wallet", "profile"]);
        assert!(text.contains("Discover"));
        assert!(text.contains("Profile"));
        assert!(!text.contains("wallet"));
    }

    #[test]
    fn test_slots_scale_with_area() {
        // Measured at 40 units, drawn into 80 cells: each slot spans 20 cells
        let scheduler = FrameScheduler::default().shared();
        let router = Router::new(&["discover", "likes", "chats", "profile"]);
        let controller = TabBarController::mount(
            scheduler,
            TABS,
            TabBarOptions {
                bar_width: 40.0,
                ..TabBarOptions::default()
            },
            router.state(),
        );
        let theme = Theme::blush();

        let mut terminal = Terminal::new(TestBackend::new(80, BAR_HEIGHT)).unwrap();
        terminal
            .draw(|f| render_tab_bar(f, &controller.frame(), &theme, f.area()))
            .unwrap();

        let cells = terminal.backend().buffer().content();
        let label_row: String = cells[3 * 80 + 60..4 * 80].iter().map(|c| c.symbol()).collect();
        assert!(label_row.contains("Profile"), "{label_row:?}");
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let scheduler = FrameScheduler::default().shared();
        let router = Router::new(&["discover"]);
        let controller =
            TabBarController::mount(scheduler, TABS, TabBarOptions::default(), router.state());
        let mut terminal = Terminal::new(TestBackend::new(3, 2)).unwrap();
        terminal
            .draw(|f| render_tab_bar(f, &controller.frame(), &Theme::transparent(), f.area()))
            .unwrap();
    }

    #[test]
    fn test_dot_badge() {
        let theme = Theme::blush();
        assert_eq!(badge_span("", 1.3, &theme).content, "●");
        assert_eq!(badge_span("7", 1.2, &theme).content, " 7 ");
        assert_eq!(badge_span("7", 1.0, &theme).content, "7");
    }
}
