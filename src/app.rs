use ratatui::{backend::Backend, Terminal};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::aws;
use crate::config::{Config, LaunchMode};
use crate::discovery::{list_profiles, profile_exists, resolve_profile, Profile, ProfileTarget};
use crate::env_file;
use crate::error::Result;
use crate::kube;
use crate::menu::{MenuItem, MenuKey, MenuOutcome, MenuState};
use crate::terminal::{CrosstermKeys, KeySource, TerminalSession};
use crate::ui;

pub const PROFILE_MENU_TITLE: &str = "Select Profile";
pub const NAMESPACE_MENU_TITLE: &str = "Select Namespace";

/// What browsing ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A profile file was chosen and should be loaded
    Load(PathBuf),
    /// The listing for this directory was empty
    NoProfiles(PathBuf),
    Cancelled,
}

/// Drives discovery, the menu loop and the viewer for one invocation
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Browse `dir`, descending into groups, until a profile is chosen or the
    /// user quits.
    ///
    /// Every listing gets a fresh `MenuState`. Viewing a profile shows it and
    /// then presents the same directory again.
    pub fn browse<B, K>(
        &self,
        terminal: &mut Terminal<B>,
        keys: &mut K,
        dir: &Path,
        private: bool,
    ) -> Result<Dispatch>
    where
        B: Backend,
        K: KeySource,
    {
        let mut current = dir.to_path_buf();
        let mut initial_search = self.config.initial_search.clone();

        loop {
            let profiles = list_profiles(&current, private);
            if profiles.is_empty() {
                log::info!("📂 browse: no profiles in {:?}", current);
                return Ok(Dispatch::NoProfiles(current));
            }

            let mut menu = profile_menu(&profiles);
            if let Some(query) = initial_search.take() {
                menu = menu.with_search(&query);
            }

            match self.pick(terminal, keys, menu)? {
                MenuOutcome::Selected(index) => {
                    let selected = &profiles[index];
                    if selected.is_dir {
                        log::info!("📂 browse: descending into {:?}", selected.path);
                        current = selected.path.clone();
                    } else {
                        return Ok(Dispatch::Load(selected.path.clone()));
                    }
                }
                MenuOutcome::Viewed(index) => {
                    self.view_file(terminal, keys, &profiles[index])?;
                }
                MenuOutcome::Cancelled => return Ok(Dispatch::Cancelled),
            }
        }
    }

    /// Run one menu to completion, redrawing after every key.
    ///
    /// Closed input counts as cancelling.
    pub fn pick<B, K>(
        &self,
        terminal: &mut Terminal<B>,
        keys: &mut K,
        mut menu: MenuState,
    ) -> Result<MenuOutcome>
    where
        B: Backend,
        K: KeySource,
    {
        let theme = &self.config.theme;

        loop {
            let view = menu.view_model();
            terminal.draw(|frame| ui::draw_menu(frame, &view, theme))?;

            if let Some(outcome) = menu.outcome() {
                return Ok(outcome);
            }

            match keys.next_key()? {
                Some(key) => {
                    menu.handle_key(key);
                }
                None => return Ok(MenuOutcome::Cancelled),
            }
        }
    }

    /// Show a profile's contents until Enter, Escape or `q`
    pub fn view_file<B, K>(
        &self,
        terminal: &mut Terminal<B>,
        keys: &mut K,
        profile: &Profile,
    ) -> Result<()>
    where
        B: Backend,
        K: KeySource,
    {
        let content = fs::read_to_string(&profile.path)
            .unwrap_or_else(|e| format!("Error reading file: {}", e));
        let theme = &self.config.theme;
        let last_line = viewer_last_line(&content);
        let mut scroll: u16 = 0;

        loop {
            terminal
                .draw(|frame| ui::draw_viewer(frame, &profile.name, &content, scroll, theme))?;

            match keys.next_key()? {
                Some(MenuKey::Enter)
                | Some(MenuKey::Escape)
                | Some(MenuKey::Interrupt)
                | Some(MenuKey::Char('q'))
                | None => return Ok(()),
                Some(MenuKey::Up) | Some(MenuKey::Char('k')) => scroll = scroll.saturating_sub(1),
                Some(MenuKey::Down) | Some(MenuKey::Char('j')) => {
                    scroll = scroll.saturating_add(1).min(last_line)
                }
                Some(_) => {}
            }
        }
    }
}

/// Furthest the viewer may scroll: the last line stays on screen
fn viewer_last_line(content: &str) -> u16 {
    let lines = content.lines().count().saturating_sub(1);
    u16::try_from(lines).unwrap_or(u16::MAX)
}

/// Menu items for a listing; groups keep their trailing separator
pub fn profile_menu(profiles: &[Profile]) -> MenuState {
    let items = profiles
        .iter()
        .map(|profile| MenuItem {
            label: profile.name.clone(),
            is_group: profile.is_dir,
        })
        .collect();
    MenuState::new(PROFILE_MENU_TITLE, items)
}

/// Carry out the invocation described by `config`
pub fn run(config: Config) -> Result<()> {
    let app = App::new(config);

    match app.config().mode.clone() {
        LaunchMode::Menu { dir, private } => run_menu(&app, &dir, private),
        LaunchMode::Direct { token, private } => run_direct(&app, &token, private),
        LaunchMode::Namespace(Some(namespace)) => {
            report_namespace(kube::set_namespace(&namespace));
            Ok(())
        }
        LaunchMode::Namespace(None) => run_namespace_menu(&app),
        LaunchMode::AwsProfile(profile) => {
            let mut stdout = io::stdout().lock();
            for line in aws::profile_commands(&profile) {
                writeln!(stdout, "{}", line)?;
            }
            Ok(())
        }
        LaunchMode::ListAws => {
            println!("{}", aws::list_profiles_command());
            Ok(())
        }
    }
}

fn run_menu(app: &App, dir: &Path, private: bool) -> Result<()> {
    // Check before touching the terminal so an empty listing prints cleanly
    if list_profiles(dir, private).is_empty() {
        eprintln!("No profiles found");
        return Ok(());
    }

    let dispatch = {
        let mut session = TerminalSession::start()?;
        app.browse(session.terminal_mut(), &mut CrosstermKeys, dir, private)?
    };

    match dispatch {
        Dispatch::Load(path) => load_profile(&path),
        Dispatch::NoProfiles(_) => {
            eprintln!("No profiles found");
            Ok(())
        }
        Dispatch::Cancelled => Ok(()),
    }
}

fn run_direct(app: &App, token: &str, private: bool) -> Result<()> {
    let root = &app.config().profiles_root;

    if !private && !profile_exists(root, token) {
        log::debug!("run_direct: '{}' not found under {:?}", token, root);
        return Ok(());
    }

    match resolve_profile(root, token, private) {
        Some(ProfileTarget::Group(dir)) => run_menu(app, &dir, private),
        Some(ProfileTarget::File(path)) => load_profile(&path),
        None => {
            log::debug!("run_direct: '{}' did not resolve under {:?}", token, root);
            Ok(())
        }
    }
}

fn load_profile(path: &Path) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    if let Err(e) = env_file::load_profile_file(path, &mut stdout, &mut stderr) {
        writeln!(stderr, "Error reading file: {}", e)?;
    }
    Ok(())
}

fn run_namespace_menu(app: &App) -> Result<()> {
    let namespaces = match kube::list_namespaces() {
        Ok(namespaces) => namespaces,
        Err(e) => {
            eprintln!("Error getting namespaces: {}", e);
            return Ok(());
        }
    };
    if namespaces.is_empty() {
        eprintln!("No namespaces found");
        return Ok(());
    }

    let items = namespaces.iter().map(MenuItem::leaf).collect();
    let mut menu = MenuState::new(NAMESPACE_MENU_TITLE, items).without_view();
    if let Some(query) = &app.config().initial_search {
        menu = menu.with_search(query);
    }

    let outcome = {
        let mut session = TerminalSession::start()?;
        app.pick(session.terminal_mut(), &mut CrosstermKeys, menu)?
    };

    if let MenuOutcome::Selected(index) = outcome {
        report_namespace(kube::set_namespace(&namespaces[index]));
    }
    Ok(())
}

fn report_namespace(result: Result<String>) {
    match result {
        Ok(message) => eprintln!("{}", message),
        Err(e) => eprintln!("Error setting namespace: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::buffer_to_string;
    use crate::terminal::ScriptedKeys;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn test_terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(60, 12)).unwrap()
    }

    #[test]
    fn test_pick_closed_input_cancels() {
        let app = App::new(Config::for_root("/nowhere"));
        let mut terminal = test_terminal();
        let mut keys = ScriptedKeys::new([MenuKey::Down]);
        let menu = MenuState::new("Pick", vec![MenuItem::leaf("a"), MenuItem::leaf("b")]);

        let outcome = app.pick(&mut terminal, &mut keys, menu).unwrap();
        assert_eq!(outcome, MenuOutcome::Cancelled);
    }

    #[test]
    fn test_viewer_waits_for_enter() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dev");
        fs::write(&path, "export A=1\n").unwrap();
        let profile = Profile::new_file("dev".to_string(), path, false);

        let app = App::new(Config::for_root(temp.path()));
        let mut terminal = test_terminal();
        let mut keys = ScriptedKeys::new([
            MenuKey::Down,
            MenuKey::Char('x'),
            MenuKey::Enter,
            MenuKey::Up,
        ]);

        app.view_file(&mut terminal, &mut keys, &profile).unwrap();
        assert_eq!(keys.remaining(), 1);
    }

    #[test]
    fn test_viewer_scroll_is_clamped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("long");
        let content: String = (1..=30).map(|i| format!("export LINE{}=x\n", i)).collect();
        fs::write(&path, content).unwrap();
        let profile = Profile::new_file("long".to_string(), path, false);

        let app = App::new(Config::for_root(temp.path()));
        let mut terminal = test_terminal();
        let mut keys = ScriptedKeys::new(
            std::iter::repeat(MenuKey::Down)
                .take(40)
                .chain([MenuKey::Char('k'), MenuKey::Enter]),
        );

        app.view_file(&mut terminal, &mut keys, &profile).unwrap();
        assert_eq!(keys.remaining(), 0);

        // Scrolled to the end and back one line: LINE29 heads the frame
        let screen = buffer_to_string(terminal.backend().buffer());
        assert!(screen.contains("LINE29="));
        assert!(screen.contains("LINE30="));
        assert!(!screen.contains("LINE28="));
    }

    #[test]
    fn test_profile_menu_marks_groups() {
        let profiles = vec![
            Profile::new_file("a".to_string(), PathBuf::from("/p/a"), false),
            Profile::new_group("g", PathBuf::from("/p/g"), false),
        ];
        let menu = profile_menu(&profiles);
        assert_eq!(menu.title(), PROFILE_MENU_TITLE);
        assert_eq!(menu.items(), &[MenuItem::leaf("a"), MenuItem::group("g/")]);
    }
}
