//! Navigation state and routing
//!
//! Two layers:
//! - [`Router`] owns the tab shell's navigation state and runs the
//!   cancelable tab-press protocol
//! - [`resolve_href`] maps file-router style paths onto top-level screens

use crate::types::Screen;
use tracing::debug;

/// One route of the tab navigator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub key: String,
    pub name: String,
}

impl RouteEntry {
    pub fn new(name: &str) -> Self {
        Self {
            key: format!("{}-route", name),
            name: name.to_string(),
        }
    }
}

/// Which route is active, and the full route list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub index: usize,
    pub routes: Vec<RouteEntry>,
}

impl NavigationState {
    pub fn active_route(&self) -> Option<&RouteEntry> {
        self.routes.get(self.index)
    }
}

/// Cancelable "tab press" intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPressEvent {
    /// Route name the press targets
    pub target: String,
    /// Target is already the active route
    pub focused: bool,
    default_prevented: bool,
}

impl TabPressEvent {
    pub fn new(target: impl Into<String>, focused: bool) -> Self {
        Self {
            target: target.into(),
            focused,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What the tab bar needs from its router
pub trait Navigator {
    fn state(&self) -> &NavigationState;

    /// Run listeners over the event and hand it back
    fn emit(&mut self, event: TabPressEvent) -> TabPressEvent;

    fn navigate(&mut self, route_name: &str);
}

type Listener = Box<dyn FnMut(&mut TabPressEvent)>;

/// Tab navigator
pub struct Router {
    state: NavigationState,
    listeners: Vec<Listener>,
}

impl Router {
    pub fn new(route_names: &[&str]) -> Self {
        Self {
            state: NavigationState {
                index: 0,
                routes: route_names.iter().map(|n| RouteEntry::new(n)).collect(),
            },
            listeners: Vec::new(),
        }
    }

    /// Register a tab-press listener; listeners run in registration order
    pub fn add_listener(&mut self, listener: impl FnMut(&mut TabPressEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn index_of(&self, route_name: &str) -> Option<usize> {
        self.state.routes.iter().position(|r| r.name == route_name)
    }
}

impl Navigator for Router {
    fn state(&self) -> &NavigationState {
        &self.state
    }

    fn emit(&mut self, mut event: TabPressEvent) -> TabPressEvent {
        for listener in &mut self.listeners {
            listener(&mut event);
        }
        event
    }

    fn navigate(&mut self, route_name: &str) {
        match self.index_of(route_name) {
            Some(index) => {
                if index != self.state.index {
                    debug!(route = route_name, index, "navigate");
                }
                self.state.index = index;
            }
            None => debug!(route = route_name, "navigate to unknown route ignored"),
        }
    }
}

/// Route name of the tab that `/` and `/onboarding` land on
pub const HOME_TAB: &str = "discover";

/// Resolve a file-router path to a screen. `/onboarding` redirects into
/// the tab shell.
pub fn resolve_href(path: &str, tab_routes: &[&str]) -> Screen {
    let trimmed = path.trim_end_matches('/');
    match trimmed {
        "" => Screen::Splash,
        "/onboarding" | "/(tabs)" => Screen::Tabs(HOME_TAB.to_string()),
        "/settings" => Screen::Settings,
        _ => {
            let tab = trimmed
                .strip_prefix("/(tabs)/")
                .or_else(|| trimmed.strip_prefix('/'));
            match tab {
                Some(name) if tab_routes.contains(&name) => Screen::Tabs(name.to_string()),
                _ => Screen::NotFound {
                    path: path.to_string(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const ROUTES: &[&str] = &["discover", "likes", "chats", "profile"];

    #[test]
    fn test_navigate_by_name() {
        let mut router = Router::new(ROUTES);
        router.navigate("chats");
        assert_eq!(router.state().index, 2);
        assert_eq!(router.state().active_route().unwrap().name, "chats");
    }

    #[test]
    fn test_navigate_unknown_is_ignored() {
        let mut router = Router::new(ROUTES);
        router.navigate("likes");
        router.navigate("nowhere");
        assert_eq!(router.state().index, 1);
    }

    #[test]
    fn test_emit_runs_listeners_in_order() {
        let mut router = Router::new(ROUTES);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        router.add_listener(move |e| first.borrow_mut().push(format!("a:{}", e.target)));
        let second = Rc::clone(&seen);
        router.add_listener(move |e| {
            second.borrow_mut().push(format!("b:{}", e.default_prevented()));
            e.prevent_default();
        });

        let event = router.emit(TabPressEvent::new("likes", false));
        assert!(event.default_prevented());
        assert_eq!(*seen.borrow(), vec!["a:likes", "b:false"]);
    }

    #[test]
    fn test_emit_without_listeners() {
        let mut router = Router::new(ROUTES);
        assert!(!router.emit(TabPressEvent::new("likes", false)).default_prevented());
    }

    #[test]
    fn test_resolve_href() {
        assert_eq!(resolve_href("/", ROUTES), Screen::Splash);
        assert_eq!(resolve_href("/onboarding", ROUTES), Screen::Tabs("discover".into()));
        assert_eq!(resolve_href("/(tabs)/chats", ROUTES), Screen::Tabs("chats".into()));
        assert_eq!(resolve_href("/likes", ROUTES), Screen::Tabs("likes".into()));
        assert_eq!(resolve_href("/settings", ROUTES), Screen::Settings);
        assert_eq!(
            resolve_href("/(tabs)/wallet", ROUTES),
            Screen::NotFound { path: "/(tabs)/wallet".into() }
        );
        assert_eq!(
            resolve_href("nope", ROUTES),
            Screen::NotFound { path: "nope".into() }
        );
    }
}
