//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Splash screen
//! - Tab shell: header, active tab content, animated tab bar
//! - Settings and not-found screens
//! - Popups, flash messages and the status bar

use crate::animation::Scheduler;
use crate::app::{App, PopupState};
use crate::content;
use crate::icons;
use crate::types::{ProfileCard, Screen};
use crate::ui::tab_bar::{render_tab_bar, BAR_HEIGHT};
use crate::ui::{theme::Theme, widgets};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(app.theme.block_style()), area);

    match &app.screen {
        Screen::Splash => render_splash(frame, app, area),
        Screen::Tabs(_) => render_tabs(frame, app, area),
        Screen::Settings => render_settings(frame, app, area),
        Screen::NotFound { path } => render_not_found(frame, app, path, area),
    }

    render_popups(frame, app, area);
}

/// Splash: beating heart over the app name
fn render_splash(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let scale = app
        .splash_pulse
        .and_then(|id| app.scheduler.borrow().value(id))
        .unwrap_or(1.0);

    let heart_style = if scale > 1.1 {
        theme.title().add_modifier(Modifier::BOLD)
    } else {
        theme.title()
    };
    let heart = if scale > 1.1 { "❤  ❤  ❤" } else { "♥  ♥  ♥" };

    let lines = vec![
        Line::styled(heart, heart_style),
        Line::raw(""),
        Line::from(widgets::gradient_spans(
            "h e a r t l i n e",
            theme.brand,
            theme.text().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::styled("Meet people worth meeting.", theme.text_dim()),
        Line::raw(""),
        Line::styled("press any key", theme.text_dim()),
    ];

    let rect = widgets::centered_rect(area.width, lines.len() as u16, area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

/// Tab shell: header, content, tab bar, status bar
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Length(2),          // Header
        Constraint::Min(3),             // Content
        Constraint::Length(BAR_HEIGHT), // Tab bar
        Constraint::Length(1),          // Status bar
    ])
    .split(area);

    let tab = app.active_tab();
    let title = content::TABS
        .iter()
        .find(|t| t.name == tab)
        .map(|t| t.label)
        .unwrap_or("heartline");
    render_header(frame, app, title, layout[0]);

    match tab {
        "discover" => render_discover(frame, app, layout[1]),
        "likes" => render_likes(frame, app, layout[1]),
        "chats" => render_chats(frame, app, layout[1]),
        "profile" => render_profile(frame, app, layout[1]),
        _ => {}
    }

    if let Some(bar) = app.tab_bar.as_ref().filter(|bar| bar.is_mounted()) {
        render_tab_bar(frame, &bar.frame(), &app.theme, layout[2]);
    }

    let hints = match tab {
        "profile" => "[←/→] Tabs  [s] Settings  [q] Quit",
        _ => "[←/→] Tabs  [j/k] Browse  [Enter] Select  [q] Quit",
    };
    widgets::render_status_bar(frame, hints, &app.theme, layout[3]);
}

/// Header with app name and screen title
fn render_header(frame: &mut Frame, app: &App, title: &str, area: Rect) {
    let theme = &app.theme;

    let mut spans = widgets::gradient_spans(
        "heartline",
        theme.brand,
        theme.text().add_modifier(Modifier::BOLD),
    );
    spans.push(Span::styled(format!("  ·  {}", title), theme.text_dim()));

    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Paragraph::new(Line::from(spans));
    frame.render_widget(header, inner.inner(Margin::new(1, 0)));
}

/// Discover tab: the current card of the deck
fn render_discover(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let cursor = app.cursor("discover");

    let Some(card) = content::CARDS.get(cursor) else {
        let empty = Paragraph::new("You're all caught up")
            .style(theme.text_dim())
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    };

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} / {} ", cursor + 1, content::CARDS.len()))
        .title_style(theme.text_dim())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let card_area = widgets::centered_rect(area.width.min(48), area.height, area);
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let mut lines = profile_lines(card, theme, true);
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(icons::resolve("ionicons", "close"), theme.error()),
        Span::styled(" [j] next     ", theme.text_dim()),
        Span::styled(icons::resolve("ionicons", "heart"), theme.title()),
        Span::styled(" [Enter] like", theme.text_dim()),
    ]));

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, inner);
}

fn profile_lines<'a>(card: &'a ProfileCard, theme: &Theme, show_distance: bool) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled(card.name, theme.title()),
            Span::styled(format!(", {}", card.age), theme.text()),
        ]),
    ];
    if show_distance {
        lines.push(Line::styled(
            format!("{} {} km away", icons::resolve("ionicons", "location"), card.distance_km),
            theme.text_dim(),
        ));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(card.bio, theme.text()));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        card.interests
            .iter()
            .map(|i| format!("#{}", i))
            .collect::<Vec<_>>()
            .join("  "),
        theme.text_dim(),
    ));
    lines
}

/// Likes tab: people who liked you
fn render_likes(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let cursor = app.cursor("likes");

    let items: Vec<ListItem> = content::LIKES
        .iter()
        .enumerate()
        .map(|(i, like)| {
            let marker = if like.super_like {
                Span::styled(format!("{} ", icons::resolve("ionicons", "star")), theme.warning())
            } else {
                Span::styled(format!("{} ", icons::resolve("ionicons", "heart")), theme.title())
            };
            let style = if i == cursor { theme.selected() } else { theme.text() };
            ListItem::new(Line::from(vec![
                marker,
                Span::styled(format!("{}, {}", like.name, like.age), style),
            ]))
        })
        .collect();

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" Liked you ({}) ", content::LIKES.len()))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());
    frame.render_widget(List::new(items).block(block), area);
}

/// Chats tab: conversation previews
fn render_chats(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let cursor = app.cursor("chats");
    let now = chrono::Local::now();

    let items: Vec<ListItem> = content::chats(now)
        .iter()
        .enumerate()
        .map(|(i, chat)| {
            let presence = if chat.online {
                Span::styled("● ", theme.success())
            } else {
                Span::styled("○ ", theme.text_dim())
            };
            let style = if i == cursor { theme.selected() } else { theme.text() };

            let mut first = vec![
                presence,
                Span::styled(chat.name, style.add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", chat.formatted_time(now)), theme.text_dim()),
            ];
            if chat.unread > 0 {
                first.push(Span::raw("  "));
                first.push(Span::styled(format!(" {} ", chat.unread), theme.badge()));
            }

            ListItem::new(vec![
                Line::from(first),
                Line::styled(format!("  {}", chat.last_message), theme.text_dim()),
            ])
        })
        .collect();

    let block = Block::default()
        .style(theme.block_style())
        .title(" Messages ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());
    frame.render_widget(List::new(items).block(block), area);
}

/// Profile tab: the user's own card
fn render_profile(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = Block::default()
        .style(theme.block_style())
        .title(" Your profile ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = profile_lines(&content::ME, theme, false);
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(icons::resolve("material-community", "cog"), theme.title()),
        Span::styled(" [s] Settings", theme.text_dim()),
    ]));
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        inner,
    );
}

/// Settings: in-memory toggles and log out
fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let layout = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, app, "Settings", layout[0]);

    let mut items: Vec<ListItem> = app
        .settings
        .toggles
        .iter()
        .enumerate()
        .map(|(i, toggle)| {
            let style = if i == app.settings.selected { theme.selected() } else { theme.text() };
            let switch = if toggle.on { "[ on]" } else { "[off]" };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{} ", switch), theme.toggle(toggle.on)),
                    Span::styled(toggle.label, style),
                ]),
                Line::styled(format!("      {}", toggle.description), theme.text_dim()),
            ])
        })
        .collect();

    let logout_style = if app.settings.logout_selected() {
        theme.selected()
    } else {
        theme.error()
    };
    items.push(ListItem::new(Line::raw("")));
    items.push(ListItem::new(Line::styled("      Log out", logout_style)));

    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    frame.render_widget(List::new(items).block(block), layout[1]);

    widgets::render_status_bar(
        frame,
        "[j/k] Navigate  [Enter] Toggle  [L] Log out  [Esc] Back  [q] Quit",
        theme,
        layout[2],
    );
}

/// Not-found screen
fn render_not_found(frame: &mut Frame, app: &App, path: &str, area: Rect) {
    let theme = &app.theme;
    let lines = vec![
        Line::styled("Oops!", theme.title()),
        Line::raw(""),
        Line::styled("This screen doesn't exist.", theme.text()),
        Line::styled(path.to_string(), theme.text_dim()),
        Line::raw(""),
        Line::styled("[Enter] Go to home screen", theme.warning()),
    ];
    let rect = widgets::centered_rect(area.width, lines.len() as u16, area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

/// Render popups and flash messages if active
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    match &app.popup {
        PopupState::None => {}
        PopupState::ConfirmLogout => {
            widgets::render_confirm_popup(
                frame,
                "Log out",
                "Are you sure you want to log out?",
                theme,
                area,
            );
        }
    }

    if let Some((msg, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, theme, area);
    }
}
