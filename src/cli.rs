use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dexter")]
#[command(about = "AWS profile and Kubernetes namespace manager")]
#[command(long_about = "Interactive tool for managing AWS profiles and Kubernetes namespaces")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Profile number or name to load without opening the menu
    pub profile: Option<String>,

    /// Show private profiles (optional: provide profile name as argument)
    #[arg(short, long)]
    pub private: bool,

    /// Navigate to profile group
    #[arg(short, long, value_name = "GROUP")]
    pub group: Option<String>,

    /// Set Kubernetes namespace (optional: provide namespace as argument)
    #[arg(short, long)]
    pub namespace: bool,

    /// Set AWS profile directly
    #[arg(short, long, value_name = "PROFILE")]
    pub aws: Option<String>,

    /// List and select AWS profile
    #[arg(long)]
    pub list_aws: bool,

    /// Open the menu in search mode with this term already typed
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Profiles directory (defaults to $DEXTER_PROFILES_DIR or ~/.dexter_profiles)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Output shell wrapper function (bash, zsh, fish)
    Init {
        #[arg(default_value = "bash")]
        shell: String,
    },
    /// Render a menu from a JSON description and key script
    Snapshot {
        /// Path to the JSON snapshot file
        #[arg(short, long)]
        config: PathBuf,
        /// Output file for the rendered text (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Terminal width for rendering
        #[arg(long, default_value = "80")]
        width: u16,
        /// Terminal height for rendering
        #[arg(long, default_value = "24")]
        height: u16,
    },
}
