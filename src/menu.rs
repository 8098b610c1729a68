//! Selection menu state machine
//!
//! `MenuState` is a pure reducer over a fixed list of items: every key is
//! applied with `handle_key`, which performs at most one transition and never
//! touches the terminal or the filesystem. Rendering goes through
//! `MenuViewModel`, a plain projection of the current state.

use serde::Deserialize;

/// Keys the menu understands, independent of the terminal library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Enter,
    Escape,
    Backspace,
    /// Ctrl+C
    Interrupt,
    Char(char),
}

/// One selectable row
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub is_group: bool,
}

impl MenuItem {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_group: false,
        }
    }

    pub fn group(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_group: true,
        }
    }
}

/// How a menu ended. Indices always point into the original item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Selected(usize),
    Viewed(usize),
    Cancelled,
}

impl MenuOutcome {
    pub fn index(&self) -> Option<usize> {
        match self {
            MenuOutcome::Selected(index) | MenuOutcome::Viewed(index) => Some(*index),
            MenuOutcome::Cancelled => None,
        }
    }
}

/// The menu's current mode. Search owns its query and filtered indices so a
/// browse cursor can never be confused with a position in the filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuMode {
    Browse {
        cursor: usize,
    },
    Search {
        query: String,
        filtered: Vec<usize>,
        cursor: usize,
    },
    Terminated(MenuOutcome),
}

#[derive(Debug, Clone)]
pub struct MenuState {
    title: String,
    items: Vec<MenuItem>,
    mode: MenuMode,
    viewable: bool,
}

/// Indices of the labels containing `query`, case-insensitively, in their
/// original order. An empty query matches everything.
pub fn filter_indices<'a, I>(labels: I, query: &str) -> Vec<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let query_lower = query.to_lowercase();
    labels
        .into_iter()
        .enumerate()
        .filter(|(_, label)| query_lower.is_empty() || label.to_lowercase().contains(&query_lower))
        .map(|(index, _)| index)
        .collect()
}

impl MenuState {
    /// Create a menu in Browse mode with the cursor on the first item
    pub fn new(title: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            title: title.into(),
            items,
            mode: MenuMode::Browse { cursor: 0 },
            viewable: true,
        }
    }

    /// Open the menu directly in Search mode with `query` already typed
    pub fn with_search(mut self, query: &str) -> Self {
        if !query.is_empty() {
            let filtered = self.filter(query);
            self.mode = MenuMode::Search {
                query: query.to_string(),
                filtered,
                cursor: 0,
            };
        }
        self
    }

    /// Disable the view action
    pub fn without_view(mut self) -> Self {
        self.viewable = false;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn mode(&self) -> &MenuMode {
        &self.mode
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.mode, MenuMode::Search { .. })
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.mode, MenuMode::Terminated(_))
    }

    pub fn outcome(&self) -> Option<MenuOutcome> {
        match self.mode {
            MenuMode::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Current search query, empty outside Search mode
    pub fn query(&self) -> &str {
        match &self.mode {
            MenuMode::Search { query, .. } => query,
            _ => "",
        }
    }

    /// Cursor position within the visible list
    pub fn cursor(&self) -> usize {
        match &self.mode {
            MenuMode::Browse { cursor } | MenuMode::Search { cursor, .. } => *cursor,
            MenuMode::Terminated(_) => 0,
        }
    }

    /// Original indices of the items currently on screen
    pub fn visible_indices(&self) -> Vec<usize> {
        match &self.mode {
            MenuMode::Search { filtered, .. } => filtered.clone(),
            _ => (0..self.items.len()).collect(),
        }
    }

    pub fn visible_len(&self) -> usize {
        match &self.mode {
            MenuMode::Search { filtered, .. } => filtered.len(),
            _ => self.items.len(),
        }
    }

    /// Original index of the item under the cursor, if any
    pub fn current_index(&self) -> Option<usize> {
        match &self.mode {
            MenuMode::Browse { cursor } => (*cursor < self.items.len()).then_some(*cursor),
            MenuMode::Search {
                filtered, cursor, ..
            } => filtered.get(*cursor).copied(),
            MenuMode::Terminated(_) => None,
        }
    }

    /// Apply one key and return whether the state changed
    pub fn handle_key(&mut self, key: MenuKey) -> bool {
        let changed = match self.mode {
            MenuMode::Browse { .. } => self.handle_browse_key(key),
            MenuMode::Search { .. } => self.handle_search_key(key),
            MenuMode::Terminated(_) => false,
        };

        if changed {
            log::debug!("menu '{}': {:?} -> {:?}", self.title, key, self.mode);
        }
        changed
    }

    fn handle_browse_key(&mut self, key: MenuKey) -> bool {
        let MenuMode::Browse { cursor } = self.mode else {
            return false;
        };
        let last = self.items.len().saturating_sub(1);

        let next = match key {
            MenuKey::Up | MenuKey::Char('k') => MenuMode::Browse {
                cursor: cursor.saturating_sub(1),
            },
            MenuKey::Down | MenuKey::Char('j') => MenuMode::Browse {
                cursor: (cursor + 1).min(last),
            },
            MenuKey::Char('/') => MenuMode::Search {
                query: String::new(),
                filtered: self.filter(""),
                cursor: 0,
            },
            MenuKey::Char('v') => match self.items.get(cursor) {
                Some(item) if self.viewable && !item.is_group => {
                    MenuMode::Terminated(MenuOutcome::Viewed(cursor))
                }
                _ => return false,
            },
            MenuKey::Enter | MenuKey::Char(' ') => {
                if cursor >= self.items.len() {
                    return false;
                }
                MenuMode::Terminated(MenuOutcome::Selected(cursor))
            }
            MenuKey::Char('q') | MenuKey::Interrupt => MenuMode::Terminated(MenuOutcome::Cancelled),
            _ => return false,
        };

        if next == self.mode {
            return false;
        }
        self.mode = next;
        true
    }

    fn handle_search_key(&mut self, key: MenuKey) -> bool {
        let MenuMode::Search {
            query,
            filtered,
            cursor,
        } = &mut self.mode
        else {
            return false;
        };

        match key {
            MenuKey::Up | MenuKey::Char('k') => {
                if *cursor == 0 {
                    return false;
                }
                *cursor -= 1;
                true
            }
            MenuKey::Down | MenuKey::Char('j') => {
                if *cursor + 1 >= filtered.len() {
                    return false;
                }
                *cursor += 1;
                true
            }
            MenuKey::Char(c) if !c.is_control() => {
                query.push(c);
                *filtered = filter_indices(self.items.iter().map(|i| i.label.as_str()), query);
                *cursor = 0;
                true
            }
            MenuKey::Backspace => {
                if query.pop().is_none() {
                    return false;
                }
                *filtered = filter_indices(self.items.iter().map(|i| i.label.as_str()), query);
                *cursor = 0;
                true
            }
            MenuKey::Enter => match filtered.get(*cursor).copied() {
                Some(index) => {
                    self.mode = MenuMode::Terminated(MenuOutcome::Selected(index));
                    true
                }
                None => false,
            },
            MenuKey::Escape | MenuKey::Interrupt => {
                self.mode = MenuMode::Browse { cursor: 0 };
                true
            }
            MenuKey::Char(_) => false,
        }
    }

    fn filter(&self, query: &str) -> Vec<usize> {
        filter_indices(self.items.iter().map(|i| i.label.as_str()), query)
    }

    /// Build the renderable projection of the current state
    pub fn view_model(&self) -> MenuViewModel {
        let (indices, cursor, query) = match &self.mode {
            MenuMode::Browse { cursor } => ((0..self.items.len()).collect(), Some(*cursor), None),
            MenuMode::Search {
                query,
                filtered,
                cursor,
            } => (filtered.clone(), Some(*cursor), Some(query.clone())),
            MenuMode::Terminated(outcome) => {
                ((0..self.items.len()).collect::<Vec<_>>(), outcome.index(), None)
            }
        };

        let rows = indices
            .iter()
            .enumerate()
            .map(|(position, &index)| {
                let item = &self.items[index];
                MenuRow {
                    index,
                    label: item.label.clone(),
                    is_group: item.is_group,
                    is_cursor: match self.mode {
                        MenuMode::Terminated(_) => cursor == Some(index),
                        _ => cursor == Some(position),
                    },
                }
            })
            .collect();

        let help = if query.is_some() {
            "Press Esc to exit search, Enter to select.".to_string()
        } else if self.viewable {
            "Press / to search, v to view, Enter to select, q to quit.".to_string()
        } else {
            "Press / to search, Enter to select, q to quit.".to_string()
        };

        MenuViewModel {
            title: self.title.clone(),
            query,
            rows,
            help,
        }
    }
}

/// A row as it should be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    /// Position in the original item list
    pub index: usize,
    pub label: String,
    pub is_group: bool,
    pub is_cursor: bool,
}

/// Everything needed to draw one frame of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuViewModel {
    pub title: String,
    /// Present only in Search mode
    pub query: Option<String>,
    pub rows: Vec<MenuRow>,
    pub help: String,
}

pub const NO_MATCHES: &str = "No matches found";

impl MenuViewModel {
    pub fn is_search(&self) -> bool {
        self.query.is_some()
    }

    /// Plain-text rendering used for logs and snapshots
    pub fn to_text(&self) -> String {
        let mut text = match &self.query {
            Some(query) => format!("Search: {}\n\n", query),
            None => format!("{}:\n\n", self.title),
        };

        if self.rows.is_empty() && self.is_search() {
            text.push_str(NO_MATCHES);
            text.push('\n');
        }
        for row in &self.rows {
            let marker = if row.is_cursor { ">" } else { " " };
            text.push_str(&format!("{} {}\n", marker, row.label));
        }

        text.push('\n');
        text.push_str(&self.help);
        text.push('\n');
        text
    }
}
