use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::command::parse_key_script;
use crate::error::Result;
use crate::menu::{MenuItem, MenuState};
use crate::theme::Theme;
use crate::ui;

fn default_viewable() -> bool {
    true
}

/// A menu description plus the keys to replay before rendering
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuSnapshot {
    pub title: String,
    pub items: Vec<MenuItem>,
    #[serde(default = "default_viewable")]
    pub viewable: bool,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub keys: Vec<String>,
}

impl MenuSnapshot {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    /// Build the menu and replay the key script into it
    pub fn replay(&self) -> Result<MenuState> {
        let mut menu =
            MenuState::new(self.title.clone(), self.items.clone()).with_search(&self.search);
        if !self.viewable {
            menu = menu.without_view();
        }

        for key in parse_key_script(&self.keys)? {
            menu.handle_key(key);
        }
        Ok(menu)
    }
}

/// Render a snapshot file to text, writing it to `output_path` or stdout
pub fn generate_snapshot(
    config_path: &Path,
    output_path: Option<&Path>,
    width: u16,
    height: u16,
) -> Result<()> {
    let snapshot = MenuSnapshot::load_from_file(config_path)?;
    let rendered = render_snapshot(&snapshot, width, height)?;

    match output_path {
        Some(path) => {
            fs::write(path, rendered)?;
            eprintln!("Snapshot saved to: {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

pub fn render_snapshot(snapshot: &MenuSnapshot, width: u16, height: u16) -> Result<String> {
    let menu = snapshot.replay()?;
    let view = menu.view_model();
    let theme = Theme::default();

    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|frame| ui::draw_menu(frame, &view, &theme))?;

    Ok(buffer_to_string(terminal.backend().buffer()))
}

pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();

    for y in 0..buffer.area().height {
        for x in 0..buffer.area().width {
            let sym = buffer[(x, y)].symbol();

            // Use a space for empty cells to make output more readable
            if sym.is_empty() {
                result.push(' ');
            } else {
                result.push_str(sym);
            }
        }
        result.push('\n');
    }

    result
}
