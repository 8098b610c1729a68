use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Name of the marker file that moves a directory into the private partition
pub const PRIVATE_MARKER: &str = ".private";

/// Editor backup files end with this suffix and are never profiles
pub const BACKUP_SUFFIX: &str = "~";

/// Prefix a trimmed line needs to count as an exported variable
pub const EXPORT_PREFIX: &str = "export ";

/// Represents a single entry of a profile listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_private: bool,
}

impl Profile {
    /// Create a profile entry for a loadable env file
    pub fn new_file(name: String, path: PathBuf, is_private: bool) -> Self {
        Self {
            name,
            path,
            is_dir: false,
            is_private,
        }
    }

    /// Create a group entry; the display name gets a trailing separator
    pub fn new_group(name: &str, path: PathBuf, is_private: bool) -> Self {
        Self {
            name: format!("{}/", name),
            path,
            is_dir: true,
            is_private,
        }
    }
}

/// What a direct command-line argument points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileTarget {
    Group(PathBuf),
    File(PathBuf),
}

/// List the profiles and groups directly inside `root` that belong to the
/// requested partition.
///
/// Files come first and directories after them, each in directory-scan order,
/// so numeric indices of concrete profiles do not shift when groups are added.
/// A missing or unreadable directory yields an empty listing.
pub fn list_profiles<P: AsRef<Path>>(root: P, want_private: bool) -> Vec<Profile> {
    let start_time = Instant::now();
    let root = root.as_ref();

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("📂 list_profiles: cannot read {:?}: {}", root, e);
            return Vec::new();
        }
    };

    // All files in one directory share that directory's privacy
    let root_is_private = has_private_marker(root);

    let mut files = Vec::new();
    let mut groups = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        let is_dir = match entry.file_type() {
            Ok(file_type) if file_type.is_symlink() => path.is_dir(),
            Ok(file_type) => file_type.is_dir(),
            Err(_) => continue,
        };

        if is_dir {
            let dir_is_private = has_private_marker(&path);
            if dir_is_private == want_private {
                groups.push(Profile::new_group(&name, path, dir_is_private));
            }
        } else if root_is_private == want_private
            && !name.ends_with(BACKUP_SUFFIX)
            && has_export_line(&path)
        {
            files.push(Profile::new_file(name, path, root_is_private));
        }
    }

    log::debug!(
        "📂 list_profiles: {:?} (private={}) -> {} files, {} groups in {:?}",
        root,
        want_private,
        files.len(),
        groups.len(),
        start_time.elapsed()
    );

    files.extend(groups);
    files
}

/// Check whether a directory carries the privacy marker
pub fn has_private_marker(dir: &Path) -> bool {
    dir.join(PRIVATE_MARKER).exists()
}

/// Check whether a file has at least one `export KEY=VALUE` line
pub fn has_export_line(path: &Path) -> bool {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    BufReader::new(file)
        .lines()
        .map_while(|line| line.ok())
        .any(|line| line.trim().starts_with(EXPORT_PREFIX))
}

/// Validate a direct argument against the public listing of `root`.
///
/// Accepts a 1-based index within the listing, the exact name of an entry,
/// or any path under `root` that exists on disk.
pub fn profile_exists<P: AsRef<Path>>(root: P, token: &str) -> bool {
    let root = root.as_ref();
    let profiles = list_profiles(root, false);

    if let Ok(number) = token.parse::<usize>() {
        return number > 0 && number <= profiles.len();
    }

    if profiles.iter().any(|profile| profile.name == token) {
        return true;
    }

    root.join(token).exists()
}

/// Resolve a direct argument to a group or a profile file.
///
/// Numbers index the listing of the requested partition (1-based); anything
/// else is joined onto `root`. Returns `None` when nothing matches.
pub fn resolve_profile<P: AsRef<Path>>(
    root: P,
    token: &str,
    private: bool,
) -> Option<ProfileTarget> {
    let root = root.as_ref();

    if let Ok(number) = token.parse::<usize>() {
        let profiles = list_profiles(root, private);
        if number == 0 || number > profiles.len() {
            return None;
        }
        let selected = profiles.into_iter().nth(number - 1)?;
        return Some(if selected.is_dir {
            ProfileTarget::Group(selected.path)
        } else {
            ProfileTarget::File(selected.path)
        });
    }

    let path = root.join(token);
    let metadata = fs::metadata(&path).ok()?;
    Some(if metadata.is_dir() {
        ProfileTarget::Group(path)
    } else {
        ProfileTarget::File(path)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_has_export_line_accepts_indented_exports() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "dev", "# comment\n   export AWS_PROFILE=dev\n");
        write(temp.path(), "plain", "AWS_PROFILE=dev\nexported=1\n");

        assert!(has_export_line(&temp.path().join("dev")));
        assert!(!has_export_line(&temp.path().join("plain")));
        assert!(!has_export_line(&temp.path().join("missing")));
    }

    #[test]
    fn test_marker_file_is_not_listed() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), PRIVATE_MARKER, "");
        write(temp.path(), "secret", "export TOKEN=1\n");

        let private = list_profiles(temp.path(), true);
        assert_eq!(private.len(), 1);
        assert_eq!(private[0].name, "secret");
        assert!(private[0].is_private);
        assert!(list_profiles(temp.path(), false).is_empty());
    }

    #[test]
    fn test_group_name_has_trailing_separator() {
        let group = Profile::new_group("prod", PathBuf::from("/p/prod"), false);
        assert_eq!(group.name, "prod/");
        assert!(group.is_dir);
    }

    #[test]
    fn test_resolve_profile_rejects_zero_and_overflow() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "alpha", "export A=1\n");

        assert_eq!(resolve_profile(temp.path(), "0", false), None);
        assert_eq!(resolve_profile(temp.path(), "2", false), None);
        assert_eq!(
            resolve_profile(temp.path(), "1", false),
            Some(ProfileTarget::File(temp.path().join("alpha")))
        );
    }
}
