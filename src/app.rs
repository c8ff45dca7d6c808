//! Application state and event handling
//!
//! This is the core of heartline, managing:
//! - Screen transitions (splash, tab shell, settings, not-found)
//! - The tab bar's mount/unmount lifecycle
//! - Event handling (keyboard input, resize, frame ticks)

use crate::animation::{Animation, FrameScheduler, Scheduler, Step, ValueId};
use crate::config::Config;
use crate::content::{self, TABS};
use crate::router::{resolve_href, Navigator, Router, HOME_TAB};
use crate::tab_bar::{PressOutcome, TabBarController, TabBarOptions};
use crate::types::Screen;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

/// How long a flash message stays up
const FLASH_DURATION: Duration = Duration::from_secs(2);

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub config: Config,
    pub theme: Theme,
    pub reduce_motion: bool,

    // Animation + navigation
    pub scheduler: Rc<RefCell<FrameScheduler>>,
    pub router: Router,
    pub tab_bar: Option<TabBarController>,
    pub bar_width: u16,

    // Splash state
    pub splash_elapsed: Duration,
    pub splash_pulse: Option<ValueId>,

    // Per-tab list cursors, by route name
    pub cursors: HashMap<String, usize>,

    // Settings screen state
    pub settings: SettingsState,

    // Popup state
    pub popup: PopupState,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, Duration)>, // (message, time left)

    /// Set by the router listener when a focused tab is pressed again
    reselected: Rc<RefCell<Option<String>>>,
}

/// Popup overlay state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupState {
    None,
    ConfirmLogout,
}

/// A settings switch. Held in memory only.
#[derive(Debug, Clone)]
pub struct Toggle {
    pub label: &'static str,
    pub description: &'static str,
    pub on: bool,
}

/// Settings screen state
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub toggles: Vec<Toggle>,
    pub selected: usize,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            toggles: vec![
                Toggle {
                    label: "Show my distance",
                    description: "Others see roughly how far away you are",
                    on: true,
                },
                Toggle {
                    label: "Discoverable",
                    description: "Appear in other people's discover deck",
                    on: true,
                },
                Toggle {
                    label: "Message previews",
                    description: "Show message text in notifications",
                    on: false,
                },
                Toggle {
                    label: "Match sounds",
                    description: "Play a sound when you match",
                    on: true,
                },
            ],
            selected: 0,
        }
    }
}

impl SettingsState {
    /// Toggles plus the trailing "Log out" row
    pub fn item_count(&self) -> usize {
        self.toggles.len() + 1
    }

    pub fn logout_selected(&self) -> bool {
        self.selected == self.toggles.len()
    }
}

impl App {
    /// Create a new App instance starting at `start_path`
    pub fn new(config: Config, reduce_motion: bool, start_path: &str, bar_width: u16) -> Self {
        let theme = Theme::from_name(config.theme);
        let scheduler = FrameScheduler::new(config.animation.time_scale).shared();

        let mut router = Router::new(&content::tab_routes());
        let reselected = Rc::new(RefCell::new(None));
        let flag = Rc::clone(&reselected);
        // Pressing the focused tab scrolls it back to the top instead of navigating
        router.add_listener(move |event| {
            if event.focused {
                event.prevent_default();
                *flag.borrow_mut() = Some(event.target.clone());
            }
        });

        let mut app = Self {
            should_quit: false,
            screen: Screen::Splash,
            reduce_motion: reduce_motion || config.animation.reduce_motion,
            config,
            theme,

            scheduler,
            router,
            tab_bar: None,
            bar_width,

            splash_elapsed: Duration::ZERO,
            splash_pulse: None,

            cursors: HashMap::new(),
            settings: SettingsState::default(),
            popup: PopupState::None,
            flash_message: None,
            reselected,
        };
        app.go(start_path);
        app
    }

    /// Navigate to a file-router path
    pub fn go(&mut self, path: &str) {
        let screen = resolve_href(path, &content::tab_routes());
        debug!(path, ?screen, "go");
        self.enter(screen);
    }

    fn enter(&mut self, screen: Screen) {
        if self.screen == Screen::Splash && screen != Screen::Splash {
            self.stop_splash();
        }

        match &screen {
            Screen::Tabs(name) => {
                self.router.navigate(name);
                self.mount_tab_bar();
            }
            _ => self.unmount_tab_bar(),
        }

        if let Screen::NotFound { path } = &screen {
            info!(path = %path, "unmatched route");
        }
        if screen == Screen::Splash {
            self.start_splash();
        }
        self.screen = screen;
    }

    fn mount_tab_bar(&mut self) {
        if let Some(bar) = &mut self.tab_bar {
            bar.sync(self.router.state());
            return;
        }
        let options = TabBarOptions {
            bar_width: self.bar_width as f64,
            indicator_width: self.config.animation.indicator_width as f64,
            loops: !self.reduce_motion,
        };
        self.tab_bar = Some(TabBarController::mount(
            self.scheduler.clone(),
            TABS,
            options,
            self.router.state(),
        ));
    }

    fn unmount_tab_bar(&mut self) {
        if let Some(mut bar) = self.tab_bar.take() {
            bar.unmount();
        }
    }

    fn start_splash(&mut self) {
        self.splash_elapsed = Duration::ZERO;
        if self.splash_pulse.is_some() || self.reduce_motion {
            return;
        }
        let mut s = self.scheduler.borrow_mut();
        let pulse = s.create_value(1.0);
        s.start(
            pulse,
            Animation::looping(vec![Step::tween(1.2, 600), Step::tween(1.0, 600), Step::pause(800)]),
        );
        self.splash_pulse = Some(pulse);
    }

    fn stop_splash(&mut self) {
        if let Some(pulse) = self.splash_pulse.take() {
            self.scheduler.borrow_mut().release(pulse);
        }
    }

    /// Advance animations and timers by one frame
    pub fn tick(&mut self, dt: Duration) {
        self.scheduler.borrow_mut().advance(dt);

        let expired = match &mut self.flash_message {
            Some((_, left)) => {
                *left = left.saturating_sub(dt);
                left.is_zero()
            }
            None => false,
        };
        if expired {
            self.flash_message = None;
        }

        if self.screen == Screen::Splash {
            self.splash_elapsed += dt;
            if self.splash_elapsed >= self.config.splash.duration() {
                self.finish_splash();
            }
        }
    }

    fn finish_splash(&mut self) {
        self.go("/onboarding");
    }

    /// Terminal resized
    pub fn resize(&mut self, width: u16) {
        if width == self.bar_width {
            return;
        }
        self.bar_width = width;
        if let Some(bar) = &mut self.tab_bar {
            bar.relayout(width as f64);
        }
    }

    /// Route name of the active tab
    pub fn active_tab(&self) -> &str {
        self.router
            .state()
            .active_route()
            .map(|r| r.name.as_str())
            .unwrap_or(HOME_TAB)
    }

    pub fn cursor(&self, tab: &str) -> usize {
        self.cursors.get(tab).copied().unwrap_or(0)
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup != PopupState::None {
            self.handle_popup_key(key);
            return Ok(());
        }

        if key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return Ok(());
        }

        match self.screen.clone() {
            Screen::Splash => self.finish_splash(),
            Screen::Tabs(_) => self.handle_tabs_key(key)?,
            Screen::Settings => self.handle_settings_key(key),
            Screen::NotFound { .. } => self.handle_not_found_key(key),
        }
        Ok(())
    }

    /// Press the tab at `position` through the tab bar
    pub fn press_tab(&mut self, position: usize) -> PressOutcome {
        let Some(bar) = &mut self.tab_bar else {
            return PressOutcome::Ignored;
        };
        let outcome = bar.press(position, &mut self.router);

        let reselected = self.reselected.borrow_mut().take();
        if let Some(route) = reselected {
            self.cursors.insert(route, 0);
        }
        if let PressOutcome::Navigated { route } = &outcome {
            self.screen = Screen::Tabs(route.clone());
        }
        outcome
    }

    /// Handle keys in the tab shell
    fn handle_tabs_key(&mut self, key: KeyEvent) -> Result<()> {
        let index = self.router.state().index;
        let count = self.router.state().routes.len();
        let tab = self.active_tab().to_string();

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                if index > 0 {
                    self.press_tab(index - 1);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if index + 1 < count {
                    self.press_tab(index + 1);
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let position = c as usize - '1' as usize;
                self.press_tab(position);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.list_len(&tab);
                let cursor = self.cursors.entry(tab).or_insert(0);
                if *cursor < len.saturating_sub(1) {
                    *cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let cursor = self.cursors.entry(tab).or_insert(0);
                *cursor = cursor.saturating_sub(1);
            }
            KeyCode::Enter => self.activate_item(&tab),
            KeyCode::Char('s') if tab == "profile" => self.go("/settings"),
            _ => {}
        }
        Ok(())
    }

    fn list_len(&self, tab: &str) -> usize {
        match tab {
            "discover" => content::CARDS.len(),
            "likes" => content::LIKES.len(),
            "chats" => content::chats(chrono::Local::now()).len(),
            "profile" => 1,
            _ => 0,
        }
    }

    fn activate_item(&mut self, tab: &str) {
        let cursor = self.cursor(tab);
        match tab {
            "discover" => {
                if let Some(card) = content::CARDS.get(cursor) {
                    self.show_flash(&format!("You liked {}", card.name));
                }
            }
            "likes" => {
                if let Some(like) = content::LIKES.get(cursor) {
                    self.show_flash(&format!("It's a match with {}!", like.name));
                }
            }
            "chats" => {
                if let Some(chat) = content::chats(chrono::Local::now()).get(cursor) {
                    self.show_flash(&format!("Chat with {} is read-only here", chat.name));
                }
            }
            "profile" => self.go("/settings"),
            _ => {}
        }
    }

    /// Handle keys on the settings screen
    fn handle_settings_key(&mut self, key: KeyEvent) {
        let count = self.settings.item_count();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.settings.selected < count - 1 {
                    self.settings.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.settings.selected = self.settings.selected.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.settings.logout_selected() {
                    self.popup = PopupState::ConfirmLogout;
                } else if let Some(toggle) = self.settings.toggles.get_mut(self.settings.selected) {
                    toggle.on = !toggle.on;
                    debug!(setting = toggle.label, on = toggle.on, "toggle");
                }
            }
            KeyCode::Char('L') => self.popup = PopupState::ConfirmLogout,
            KeyCode::Esc | KeyCode::Backspace => self.go("/(tabs)/profile"),
            _ => {}
        }
    }

    /// Handle keys on the not-found screen
    fn handle_not_found_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.go("/(tabs)");
        }
    }

    /// Handle keys in the confirmation popup
    fn handle_popup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.popup = PopupState::None;
                self.log_out();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.popup = PopupState::None;
            }
            _ => {}
        }
    }

    fn log_out(&mut self) {
        info!("logged out");
        self.router.navigate(HOME_TAB);
        self.cursors.clear();
        self.settings.selected = 0;
        self.go("/");
    }

    /// Show a flash message
    fn show_flash(&mut self, message: &str) {
        self.flash_message = Some((message.into(), FLASH_DURATION));
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.unmount_tab_bar();
        self.stop_splash();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_at(path: &str) -> App {
        App::new(Config::default(), false, path, 80)
    }

    #[test]
    fn test_splash_times_out_into_tabs() {
        let mut app = app_at("/");
        assert_eq!(app.screen, Screen::Splash);
        assert!(app.splash_pulse.is_some());

        app.tick(Duration::from_millis(1000));
        assert_eq!(app.screen, Screen::Splash);
        app.tick(Duration::from_millis(900));

        assert_eq!(app.screen, Screen::Tabs("discover".into()));
        assert!(app.splash_pulse.is_none());
        assert!(app.tab_bar.is_some());
    }

    #[test]
    fn test_any_key_skips_splash() {
        let mut app = app_at("/");
        app.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.screen, Screen::Tabs("discover".into()));
    }

    #[test]
    fn test_arrow_keys_press_tabs() {
        let mut app = app_at("/(tabs)/discover");
        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(app.active_tab(), "likes");
        app.handle_key(key(KeyCode::Char('4'))).unwrap();
        assert_eq!(app.active_tab(), "profile");
        assert_eq!(app.screen, Screen::Tabs("profile".into()));
        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(app.active_tab(), "profile");
        app.handle_key(key(KeyCode::Char('9'))).unwrap();
        assert_eq!(app.active_tab(), "profile");
    }

    #[test]
    fn test_reselect_is_vetoed_and_scrolls_to_top() {
        let mut app = app_at("/(tabs)/likes");
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(app.cursor("likes"), 2);

        let outcome = app.press_tab(1);
        assert_eq!(outcome, PressOutcome::Vetoed { route: "likes".into() });
        assert_eq!(app.cursor("likes"), 0);
        assert_eq!(app.active_tab(), "likes");
    }

    #[test]
    fn test_settings_unmounts_tab_bar() {
        let mut app = app_at("/(tabs)/profile");
        app.tick(Duration::from_millis(16));
        assert!(app.scheduler.borrow().pending() > 0);

        app.handle_key(key(KeyCode::Char('s'))).unwrap();
        assert_eq!(app.screen, Screen::Settings);
        assert!(app.tab_bar.is_none());
        assert_eq!(app.scheduler.borrow().pending(), 0);

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.screen, Screen::Tabs("profile".into()));
        assert_eq!(app.tab_bar.as_ref().unwrap().active(), Some(3));
    }

    #[test]
    fn test_settings_toggles_are_in_memory() {
        let mut app = app_at("/settings");
        let before = app.settings.toggles[0].on;
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.settings.toggles[0].on, !before);
        assert_eq!(app.config, Config::default());
    }

    #[test]
    fn test_logout_confirmation() {
        let mut app = app_at("/settings");
        app.handle_key(key(KeyCode::Char('L'))).unwrap();
        assert_eq!(app.popup, PopupState::ConfirmLogout);

        // q does not quit while the dialog is open
        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.popup, PopupState::None);
        assert_eq!(app.screen, Screen::Settings);

        for _ in 0..app.settings.item_count() {
            app.handle_key(key(KeyCode::Down)).unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.popup, PopupState::ConfirmLogout);
        app.handle_key(key(KeyCode::Char('y'))).unwrap();
        assert_eq!(app.screen, Screen::Splash);
        assert_eq!(app.router.state().index, 0);
    }

    #[test]
    fn test_not_found_goes_home() {
        let mut app = app_at("/matches/42");
        assert_eq!(app.screen, Screen::NotFound { path: "/matches/42".into() });
        assert!(app.tab_bar.is_none());

        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.screen, Screen::Tabs("discover".into()));
    }

    #[test]
    fn test_resize_relayouts_tab_bar() {
        let mut app = app_at("/(tabs)/chats");
        app.resize(120);
        assert_eq!(app.tab_bar.as_ref().unwrap().layout().bar_width, 120.0);
    }

    #[test]
    fn test_reduce_motion_skips_loops() {
        let mut app = App::new(Config::default(), true, "/(tabs)/discover", 80);
        for _ in 0..200 {
            app.tick(Duration::from_millis(16));
        }
        assert_eq!(app.scheduler.borrow().pending(), 0);
        assert!(app.tab_bar.is_some());
    }

    #[test]
    fn test_flash_expires() {
        let mut app = app_at("/(tabs)/discover");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(app.flash_message.is_some());
        app.tick(FLASH_DURATION);
        assert!(app.flash_message.is_none());
    }

    #[test]
    fn test_quit() {
        let mut app = app_at("/(tabs)/discover");
        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }
}
