use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::theme::{get_theme, Theme};

/// Environment variable overriding the profiles directory
pub const PROFILES_DIR_ENV: &str = "DEXTER_PROFILES_DIR";

/// Directory name under `$HOME` used when nothing else is configured
pub const DEFAULT_PROFILES_DIR: &str = ".dexter_profiles";

/// What the invocation should do, decided once from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchMode {
    /// Open the interactive menu on `dir`
    Menu { dir: PathBuf, private: bool },
    /// Load a profile or open a group given by number or name
    Direct { token: String, private: bool },
    /// Switch kubectl namespace, picking one interactively without an argument
    Namespace(Option<String>),
    AwsProfile(String),
    ListAws,
}

/// Immutable run configuration, built once and passed to the orchestrator
#[derive(Debug, Clone)]
pub struct Config {
    pub profiles_root: PathBuf,
    pub mode: LaunchMode,
    pub initial_search: Option<String>,
    pub theme: Theme,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let profiles_root = cli.root.clone().unwrap_or_else(default_profiles_root);
        let mode = launch_mode(cli, &profiles_root);

        Self {
            profiles_root,
            mode,
            initial_search: cli.search.clone().filter(|term| !term.is_empty()),
            theme: get_theme(),
        }
    }

    /// Configuration that opens the public menu on `root`
    pub fn for_root<P: Into<PathBuf>>(root: P) -> Self {
        let profiles_root = root.into();
        Self {
            mode: LaunchMode::Menu {
                dir: profiles_root.clone(),
                private: false,
            },
            profiles_root,
            initial_search: None,
            theme: Theme::default(),
        }
    }
}

/// Flag precedence: private, group, namespace, aws, list-aws, positional
fn launch_mode(cli: &Cli, root: &Path) -> LaunchMode {
    if cli.private {
        return match &cli.profile {
            Some(token) => LaunchMode::Direct {
                token: token.clone(),
                private: true,
            },
            None => LaunchMode::Menu {
                dir: root.to_path_buf(),
                private: true,
            },
        };
    }

    // Groups passed with -g are browsed in the private partition
    if let Some(group) = &cli.group {
        return LaunchMode::Menu {
            dir: root.join(group),
            private: true,
        };
    }

    if cli.namespace {
        return LaunchMode::Namespace(cli.profile.clone());
    }

    if let Some(profile) = &cli.aws {
        return LaunchMode::AwsProfile(profile.clone());
    }

    if cli.list_aws {
        return LaunchMode::ListAws;
    }

    match &cli.profile {
        Some(token) => LaunchMode::Direct {
            token: token.clone(),
            private: false,
        },
        None => LaunchMode::Menu {
            dir: root.to_path_buf(),
            private: false,
        },
    }
}

pub fn default_profiles_root() -> PathBuf {
    if let Some(dir) = std::env::var_os(PROFILES_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }

    dirs::home_dir()
        .map(|home| home.join(DEFAULT_PROFILES_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILES_DIR))
}
