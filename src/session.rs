/// Tab registry and per-tab navigation history
///
/// `SessionState` is the single source of truth for the UI. Every mutation
/// goes through a method here (or `apply` with a `SessionCommand`), and the
/// registry is never left empty.
use crate::tab_data::{Tab, TabId};

/// Direction of a native history step in a tab's frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavStep {
    Back,
    Forward,
}

/// Commands the UI layer sends to the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    CreateTab { url: Option<String>, title: Option<String> },
    CloseTab(TabId),
    SwitchTab(TabId),
    /// Load a URL into a specific tab
    Navigate { id: TabId, url: String },
    /// Load a resolved search target: into the active tab when it is the home
    /// placeholder, otherwise into a new tab
    Open(String),
    Back(TabId),
    Forward(TabId),
    SetTitle { id: TabId, title: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    tabs: Vec<Tab>,
    active_id: TabId,
}

impl SessionState {
    /// Startup state: a single home tab
    pub fn new() -> Self {
        let tab = Tab::home();
        SessionState {
            active_id: tab.id.clone(),
            tabs: vec![tab],
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn active_tab(&self) -> &Tab {
        // active_id always refers to a tab in the registry
        self.tab(&self.active_id).unwrap_or(&self.tabs[0])
    }

    pub fn tab(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    fn tab_mut(&mut self, id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Append a new tab and make it active.
    pub fn create_tab(&mut self, url: Option<String>, title: Option<String>) -> TabId {
        let tab = match url {
            Some(url) => Tab::with_url(url, title),
            None => {
                let mut tab = Tab::home();
                if let Some(title) = title {
                    tab.title = title;
                }
                tab
            }
        };
        let id = tab.id.clone();
        log::debug!("Created tab {} ({})", id, tab.title);

        self.tabs.push(tab);
        self.active_id = id.clone();
        id
    }

    /// Remove a tab. The active pointer moves to the nearest neighbour, and a
    /// fresh home tab is created when the last tab closes.
    pub fn close_tab(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        self.tabs.remove(index);
        log::debug!("Closed tab {}", id);

        if self.tabs.is_empty() {
            let tab = Tab::home();
            self.active_id = tab.id.clone();
            self.tabs.push(tab);
        } else if self.active_id == id {
            let next = index.min(self.tabs.len() - 1);
            self.active_id = self.tabs[next].id.clone();
        }

        true
    }

    pub fn switch_tab(&mut self, id: &str) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        self.active_id = id.to_string();
        true
    }

    /// Load `url` in tab `id`, appending it to the history.
    ///
    /// Entries ahead of the cursor are kept: the history is append-only.
    pub fn load(&mut self, id: &str, url: String) -> bool {
        let Some(tab) = self.tab_mut(id) else {
            return false;
        };

        tab.title = crate::title::title_from_url(&url);
        tab.history.push(url.clone());
        tab.history_index = tab.history.len() as isize - 1;
        tab.url = Some(url);
        true
    }

    /// Route a resolved search target to the right tab and return its id.
    pub fn open(&mut self, url: String) -> TabId {
        if self.active_tab().is_home() {
            let id = self.active_id.clone();
            self.load(&id, url);
            id
        } else {
            self.create_tab(Some(url), None)
        }
    }

    /// Move the cursor of tab `id` one step. Returns the step the frame should
    /// take natively, or `None` when there is nowhere to go.
    pub fn step(&mut self, id: &str, step: NavStep) -> Option<NavStep> {
        let tab = self.tab_mut(id)?;

        match step {
            NavStep::Back if tab.can_go_back() => tab.history_index -= 1,
            NavStep::Forward if tab.can_go_forward() => tab.history_index += 1,
            _ => return None,
        }
        Some(step)
    }

    pub fn set_title(&mut self, id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        match self.tab_mut(id) {
            Some(tab) => {
                tab.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Apply a command. Returns the native step to perform for Back/Forward.
    pub fn apply(&mut self, command: SessionCommand) -> Option<NavStep> {
        match command {
            SessionCommand::CreateTab { url, title } => {
                self.create_tab(url, title);
            }
            SessionCommand::CloseTab(id) => {
                self.close_tab(&id);
            }
            SessionCommand::SwitchTab(id) => {
                self.switch_tab(&id);
            }
            SessionCommand::Navigate { id, url } => {
                self.load(&id, url);
            }
            SessionCommand::Open(url) => {
                self.open(url);
            }
            SessionCommand::Back(id) => return self.step(&id, NavStep::Back),
            SessionCommand::Forward(id) => return self.step(&id, NavStep::Forward),
            SessionCommand::SetTitle { id, title } => {
                self.set_title(&id, &title);
            }
        }
        None
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(state: &SessionState) {
        assert!(state.len() >= 1);
        assert!(state.tab(state.active_id()).is_some());
        for tab in state.tabs() {
            assert!(tab.history_index >= -1);
            assert!(tab.history_index <= tab.history.len() as isize - 1);
            if tab.is_home() {
                assert!(tab.history.is_empty());
            }
        }
    }

    #[test]
    fn test_new_session_has_one_home_tab() {
        let state = SessionState::new();

        assert_eq!(state.len(), 1);
        assert!(state.active_tab().is_home());
        assert_invariants(&state);
    }

    #[test]
    fn test_create_tab_becomes_active() {
        let mut state = SessionState::new();
        let id = state.create_tab(Some("https://example.com/".to_string()), None);

        assert_eq!(state.len(), 2);
        assert_eq!(state.active_id(), id);
        assert_eq!(state.active_tab().title, "example.com");
        assert_invariants(&state);
    }

    #[test]
    fn test_create_home_tab_with_title() {
        let mut state = SessionState::new();
        state.create_tab(None, Some("Start".to_string()));

        assert!(state.active_tab().is_home());
        assert_eq!(state.active_tab().title, "Start");
    }

    #[test]
    fn test_close_last_tab_creates_home_tab() {
        let mut state = SessionState::new();
        let original = state.active_id().to_string();

        assert!(state.close_tab(&original));

        assert_eq!(state.len(), 1);
        assert!(state.active_tab().is_home());
        assert_ne!(state.active_id(), original);
        assert_invariants(&state);
    }

    #[test]
    fn test_close_active_activates_neighbour() {
        let mut state = SessionState::new();
        let first = state.active_id().to_string();
        let second = state.create_tab(None, None);
        let third = state.create_tab(None, None);

        state.switch_tab(&second);
        state.close_tab(&second);
        // index 1 now holds the third tab
        assert_eq!(state.active_id(), third);

        state.close_tab(&third);
        // closed the tail, fall back to len - 1
        assert_eq!(state.active_id(), first);
        assert_invariants(&state);
    }

    #[test]
    fn test_close_inactive_keeps_active() {
        let mut state = SessionState::new();
        let first = state.active_id().to_string();
        let second = state.create_tab(None, None);

        state.close_tab(&first);

        assert_eq!(state.active_id(), second);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_close_unknown_is_noop() {
        let mut state = SessionState::new();
        assert!(!state.close_tab("missing"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_switch_tab() {
        let mut state = SessionState::new();
        let first = state.active_id().to_string();
        state.create_tab(None, None);

        assert!(state.switch_tab(&first));
        assert_eq!(state.active_id(), first);
        assert!(!state.switch_tab("missing"));
        assert_eq!(state.active_id(), first);
    }

    #[test]
    fn test_open_reuses_home_tab() {
        let mut state = SessionState::new();
        let home = state.active_id().to_string();

        let id = state.open("https://example.com/".to_string());

        assert_eq!(id, home);
        assert_eq!(state.len(), 1);
        assert_eq!(state.active_tab().url.as_deref(), Some("https://example.com/"));
        assert_eq!(state.active_tab().title, "example.com");
    }

    #[test]
    fn test_open_from_loaded_tab_creates_new_tab() {
        let mut state = SessionState::new();
        state.open("https://example.com/".to_string());

        let id = state.open("https://rust-lang.org/".to_string());

        assert_eq!(state.len(), 2);
        assert_eq!(state.active_id(), id);
        assert_eq!(state.active_tab().history.len(), 1);
    }

    #[test]
    fn test_back_and_forward_move_cursor() {
        let mut state = SessionState::new();
        let id = state.active_id().to_string();
        state.load(&id, "https://a.com/".to_string());
        state.load(&id, "https://b.com/".to_string());

        assert_eq!(state.step(&id, NavStep::Back), Some(NavStep::Back));
        assert_eq!(state.active_tab().current_url(), Some("https://a.com/"));
        // url tracks the last load, the frame moves natively
        assert_eq!(state.active_tab().url.as_deref(), Some("https://b.com/"));

        assert_eq!(state.step(&id, NavStep::Back), None);
        assert_eq!(state.step(&id, NavStep::Forward), Some(NavStep::Forward));
        assert_eq!(state.step(&id, NavStep::Forward), None);
        assert_eq!(state.active_tab().history_index, 1);
    }

    #[test]
    fn test_load_mid_history_appends() {
        let mut state = SessionState::new();
        let id = state.active_id().to_string();
        state.load(&id, "https://a.com/".to_string());
        state.load(&id, "https://b.com/".to_string());
        state.step(&id, NavStep::Back);

        state.load(&id, "https://c.com/".to_string());

        let tab = state.active_tab();
        assert_eq!(tab.history.len(), 3);
        assert_eq!(tab.history_index, 2);
        assert_eq!(tab.current_url(), Some("https://c.com/"));
    }

    #[test]
    fn test_history_index_stays_in_bounds() {
        let mut state = SessionState::new();
        let id = state.active_id().to_string();

        let script = [
            "back", "forward", "load", "back", "back", "load", "load", "forward", "back", "back",
            "back", "forward", "forward", "forward", "load", "back",
        ];
        for (n, op) in script.iter().enumerate() {
            match *op {
                "load" => {
                    state.load(&id, format!("https://site{}.com/", n));
                }
                "back" => {
                    state.step(&id, NavStep::Back);
                }
                _ => {
                    state.step(&id, NavStep::Forward);
                }
            }
            assert_invariants(&state);
        }
    }

    #[test]
    fn test_home_tab_cannot_step() {
        let mut state = SessionState::new();
        let id = state.active_id().to_string();

        assert_eq!(state.step(&id, NavStep::Back), None);
        assert_eq!(state.step(&id, NavStep::Forward), None);
        assert_eq!(state.active_tab().history_index, -1);
    }

    #[test]
    fn test_set_title_ignores_blank() {
        let mut state = SessionState::new();
        let id = state.active_id().to_string();

        assert!(!state.set_title(&id, "   "));
        assert!(state.set_title(&id, " Example Domain "));
        assert_eq!(state.active_tab().title, "Example Domain");
    }

    #[test]
    fn test_apply_commands() {
        let mut state = SessionState::new();
        let home = state.active_id().to_string();

        state.apply(SessionCommand::Navigate { id: home.clone(), url: "https://a.com/".to_string() });
        state.apply(SessionCommand::Navigate { id: home.clone(), url: "https://b.com/".to_string() });
        assert_eq!(state.apply(SessionCommand::Back(home.clone())), Some(NavStep::Back));
        assert_eq!(state.apply(SessionCommand::Forward(home.clone())), Some(NavStep::Forward));

        state.apply(SessionCommand::CreateTab { url: None, title: None });
        assert_ne!(state.active_id(), home);

        state.apply(SessionCommand::SwitchTab(home.clone()));
        assert_eq!(state.active_id(), home);

        state.apply(SessionCommand::CloseTab(home.clone()));
        assert_eq!(state.len(), 1);
        assert!(state.active_tab().is_home());
        assert_invariants(&state);
    }

    #[test]
    fn test_closing_everything_repeatedly_never_empties() {
        let mut state = SessionState::new();
        for _ in 0..3 {
            state.create_tab(Some("https://example.com/".to_string()), None);
        }
        for _ in 0..10 {
            let id = state.active_id().to_string();
            state.close_tab(&id);
            assert_invariants(&state);
        }
        assert_eq!(state.len(), 1);
        assert!(state.active_tab().is_home());
    }
}
