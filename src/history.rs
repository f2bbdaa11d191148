//! Back/forward navigation history.

/// Direction of a history change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    Forward,
    Back,
    Replace,
}

/// A change of the current history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryChange {
    pub from: Option<String>,
    pub to: String,
    pub direction: NavigationDirection,
}

/// Linear history stack with a cursor, browser style: pushing after going
/// back discards the forward entries.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    current: usize,
}

impl History {
    /// History holding a single entry.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            current: 0,
        }
    }

    pub fn current_url(&self) -> &str {
        &self.entries[self.current]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push a new entry, dropping anything ahead of the cursor.
    pub fn push(&mut self, url: String) -> HistoryChange {
        let from = Some(self.current_url().to_string());

        self.entries.truncate(self.current + 1);
        self.entries.push(url.clone());
        self.current += 1;

        HistoryChange {
            from,
            to: url,
            direction: NavigationDirection::Forward,
        }
    }

    /// Overwrite the current entry.
    pub fn replace(&mut self, url: String) -> HistoryChange {
        let from = Some(self.current_url().to_string());
        self.entries[self.current] = url.clone();

        HistoryChange {
            from,
            to: url,
            direction: NavigationDirection::Replace,
        }
    }

    pub fn back(&mut self) -> Option<HistoryChange> {
        if !self.can_go_back() {
            return None;
        }
        let from = Some(self.current_url().to_string());
        self.current -= 1;

        Some(HistoryChange {
            from,
            to: self.current_url().to_string(),
            direction: NavigationDirection::Back,
        })
    }

    pub fn forward(&mut self) -> Option<HistoryChange> {
        if !self.can_go_forward() {
            return None;
        }
        let from = Some(self.current_url().to_string());
        self.current += 1;

        Some(HistoryChange {
            from,
            to: self.current_url().to_string(),
            direction: NavigationDirection::Forward,
        })
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new("/")
    }
}
