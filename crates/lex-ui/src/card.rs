//! Card composition with optional tabs.
//!
//! Children are a closed set of tagged slots, so a card knows which of them
//! are tabs without inspecting component names.

/// A slot of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardChild<T> {
    Header(T),
    Title(T),
    SubTitle(T),
    Label(T),
    Body(T),
    Actions(T),
    Footer(T),
    TabItem { id: String, title: String, content: T },
}

impl<T> CardChild<T> {
    pub fn tab(id: impl Into<String>, title: impl Into<String>, content: T) -> Self {
        Self::TabItem {
            id: id.into(),
            title: title.into(),
            content,
        }
    }

    pub fn is_tab(&self) -> bool {
        matches!(self, Self::TabItem { .. })
    }

    pub fn content(&self) -> &T {
        match self {
            Self::Header(c)
            | Self::Title(c)
            | Self::SubTitle(c)
            | Self::Label(c)
            | Self::Body(c)
            | Self::Actions(c)
            | Self::Footer(c)
            | Self::TabItem { content: c, .. } => c,
        }
    }
}

/// Header entry of a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub active: bool,
}

/// A card and its selected tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLayout<T> {
    children: Vec<CardChild<T>>,
    active_tab: Option<String>,
}

impl<T> CardLayout<T> {
    /// No tab is selected initially.
    pub fn new(children: Vec<CardChild<T>>) -> Self {
        Self {
            children,
            active_tab: None,
        }
    }

    pub fn has_tabs(&self) -> bool {
        self.children.iter().any(CardChild::is_tab)
    }

    pub fn tabs(&self) -> Vec<Tab<'_>> {
        self.children
            .iter()
            .filter_map(|child| match child {
                CardChild::TabItem { id, title, .. } => Some(Tab {
                    id,
                    title,
                    active: self.active_tab.as_deref() == Some(id.as_str()),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    /// Select a tab. Returns `false` for ids that are not tabs of this card.
    pub fn select(&mut self, id: &str) -> bool {
        let known = self
            .children
            .iter()
            .any(|child| matches!(child, CardChild::TabItem { id: tab, .. } if tab == id));
        if known {
            self.active_tab = Some(id.to_string());
        }
        known
    }

    /// Children to render: all of them for a card without tabs, otherwise
    /// only the selected tab item.
    pub fn visible(&self) -> Vec<&CardChild<T>> {
        if !self.has_tabs() {
            return self.children.iter().collect();
        }
        self.children
            .iter()
            .filter(|child| match child {
                CardChild::TabItem { id, .. } => self.active_tab.as_deref() == Some(id.as_str()),
                _ => false,
            })
            .collect()
    }
}
