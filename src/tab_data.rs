/// Data structures for Veil tabs
use crate::title::{HOME_TITLE, title_from_url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TabId = String;

/// A single tab: either the home placeholder or a loaded page with history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    /// Last URL loaded into the frame; `None` for the home placeholder
    pub url: Option<String>,
    pub history: Vec<String>,
    /// Cursor into `history`, -1 when empty
    pub history_index: isize,
}

impl Tab {
    pub fn home() -> Tab {
        Tab {
            id: Uuid::new_v4().to_string(),
            title: HOME_TITLE.to_string(),
            url: None,
            history: Vec::new(),
            history_index: -1,
        }
    }

    pub fn with_url(url: String, title: Option<String>) -> Tab {
        let mut tab = Tab::home();
        tab.title = title.unwrap_or_else(|| title_from_url(&url));
        tab.history.push(url.clone());
        tab.history_index = 0;
        tab.url = Some(url);
        tab
    }

    pub fn is_home(&self) -> bool {
        self.url.is_none()
    }

    /// URL at the history cursor, which may differ from `url` after back/forward
    pub fn current_url(&self) -> Option<&str> {
        usize::try_from(self.history_index)
            .ok()
            .and_then(|i| self.history.get(i))
            .map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.history_index + 1 < self.history.len() as isize
    }

    /// Id of the frame element that renders this tab
    pub fn frame_id(&self) -> String {
        format!("frame-{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_tab() {
        let tab = Tab::home();

        assert!(tab.is_home());
        assert_eq!(tab.title, "New Tab");
        assert!(tab.history.is_empty());
        assert_eq!(tab.history_index, -1);
        assert_eq!(tab.current_url(), None);
        assert!(!tab.can_go_back());
        assert!(!tab.can_go_forward());
    }

    #[test]
    fn test_tab_with_url() {
        let tab = Tab::with_url("https://www.google.com/".to_string(), None);

        assert!(!tab.is_home());
        assert_eq!(tab.title, "google.com");
        assert_eq!(tab.history, vec!["https://www.google.com/".to_string()]);
        assert_eq!(tab.history_index, 0);
        assert_eq!(tab.current_url(), Some("https://www.google.com/"));
    }

    #[test]
    fn test_explicit_title_wins() {
        let tab = Tab::with_url("https://example.com/".to_string(), Some("Example".to_string()));
        assert_eq!(tab.title, "Example");
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Tab::home().id, Tab::home().id);
    }

    #[test]
    fn test_frame_id() {
        let tab = Tab::home();
        assert_eq!(tab.frame_id(), format!("frame-{}", tab.id));
    }

    #[test]
    fn test_serialization() {
        let tab = Tab::with_url("https://example.com/".to_string(), None);

        let json = serde_json::to_string(&tab).unwrap();
        assert!(json.contains("\"historyIndex\":0"));

        let deserialized: Tab = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, tab);
    }
}
