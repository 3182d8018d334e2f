//! Single-open accordion state.

/// Initial expansion of an accordion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InitialItem {
    /// Expand the first item.
    #[default]
    First,
    /// Expand the given item.
    Item(String),
    /// Start with everything collapsed.
    Collapsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionState {
    items: Vec<String>,
    active: Option<String>,
}

impl AccordionState {
    pub fn new<I, S>(items: I, initial: InitialItem) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let active = match initial {
            InitialItem::First => items.first().cloned(),
            InitialItem::Item(id) => Some(id),
            InitialItem::Collapsed => None,
        };
        Self { items, active }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    /// Open `id`, or collapse it when it is already open.
    pub fn toggle(&mut self, id: &str) {
        if self.is_open(id) {
            self.active = None;
        } else {
            self.active = Some(id.to_string());
        }
    }
}
