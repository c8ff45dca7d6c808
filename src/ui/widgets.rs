//! Reusable UI widgets
//!
//! Contains common UI components used across multiple screens:
//! - Confirmation dialog
//! - Gradient text
//! - Status bar and flash messages

use crate::types::Gradient;
use crate::ui::theme::{color, Theme};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Centered yes/cancel dialog. Keys are handled by the caller.
pub fn render_confirm_popup(
    frame: &mut Frame,
    title: &str,
    message: &str,
    theme: &Theme,
    area: Rect,
) {
    let popup_area = centered_rect(area.width.saturating_sub(4).min(48), 7, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.text());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::raw(""),
        Line::raw(message.to_string()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[y]", key),
            Span::styled(" Yes    ", theme.text()),
            Span::styled("[n]", key),
            Span::styled(" Cancel", theme.text()),
        ]),
    ];
    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(body, inner);
}

/// Spans coloring each character of `text` along `gradient`
pub fn gradient_spans(text: &str, gradient: Gradient, base: Style) -> Vec<Span<'static>> {
    let chars: Vec<char> = text.chars().collect();
    let last = chars.len().saturating_sub(1).max(1) as f64;

    chars
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Span::styled(
                c.to_string(),
                base.fg(color(gradient.at(i as f64 / last))),
            )
        })
        .collect()
}

/// Render a flash message (bottom of area)
pub fn render_flash_message(
    frame: &mut Frame,
    message: &str,
    theme: &Theme,
    area: Rect,
) {
    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let flash = Paragraph::new(Line::from(vec![
        Span::styled("✓ ", theme.success()),
        Span::styled(message.to_string(), theme.success()),
    ]));

    frame.render_widget(Clear, flash_area);
    frame.render_widget(flash, flash_area);
}

/// Key hints such as `[q] Quit`, with the bracketed keys picked out
pub fn hint_spans(hints: &str, theme: &Theme) -> Vec<Span<'static>> {
    let key = Style::default().fg(theme.accent_dim);
    let mut spans = Vec::new();
    let mut rest = hints;

    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|c| open + c) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), theme.text_dim()));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), theme.text_dim()));
    }
    spans
}

/// Key hints on the last row of `area`
pub fn render_status_bar(frame: &mut Frame, hints: &str, theme: &Theme, area: Rect) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: area.height.min(1),
    };
    frame.render_widget(Clear, status_area);
    frame.render_widget(
        Paragraph::new(Line::from(hint_spans(hints, theme))).style(theme.block_style()),
        status_area,
    );
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;
    use ratatui::style::Color;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(40, 20, area);

        assert_eq!(popup.x, 30);
        assert_eq!(popup.y, 15);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 20);
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(5, 5, 10, 4);
        let popup = centered_rect(40, 20, area);
        assert_eq!(popup, area);
    }

    #[test]
    fn test_hint_spans_split_keys() {
        let theme = Theme::blush();
        let spans = hint_spans("[←/→] Tabs  [q] Quit", &theme);
        let text: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["[←/→]", " Tabs  ", "[q]", " Quit"]);
        assert_eq!(spans[0].style.fg, Some(theme.accent_dim));
        assert_eq!(spans[1].style, theme.text_dim());
    }

    #[test]
    fn test_hint_spans_unclosed_bracket() {
        let theme = Theme::blush();
        let spans = hint_spans("press [q", &theme);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "press [q");
    }

    #[test]
    fn test_gradient_spans() {
        let g = Gradient::new(Rgb(0, 0, 0), Rgb(200, 0, 0));
        let spans = gradient_spans("abc", g, Style::default());
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].style.fg, Some(Color::Rgb(0, 0, 0)));
        assert_eq!(spans[1].style.fg, Some(Color::Rgb(100, 0, 0)));
        assert_eq!(spans[2].style.fg, Some(Color::Rgb(200, 0, 0)));
        assert!(gradient_spans("", g, Style::default()).is_empty());
    }
}
