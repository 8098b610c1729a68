use std::path::Path;
use std::str::FromStr;

/// Shells the `init` subcommand can write a wrapper for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl FromStr for Shell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            "fish" => Ok(Shell::Fish),
            other => Err(format!("Unsupported shell: {}", other)),
        }
    }
}

/// The `dexctx` wrapper that evaluates this binary's stdout in the calling shell
pub fn wrapper_script(shell: Shell, binary: &Path) -> String {
    match shell {
        Shell::Bash | Shell::Zsh => format!(
            r#"# Add this to your ~/.bashrc or ~/.zshrc:
# eval "$(dexter init)" >> ~/.bashrc
dexctx() {{
    eval "$({} "$@")"
}}
"#,
            binary.display()
        ),
        Shell::Fish => format!(
            r#"# Add this to your ~/.config/fish/config.fish:
# eval (dexter init fish) >> ~/.config/fish/config.fish
function dexctx
    eval ({} $argv)
end
"#,
            binary.display()
        ),
    }
}
