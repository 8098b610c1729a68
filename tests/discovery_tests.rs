use dexter::discovery::{
    list_profiles, profile_exists, resolve_profile, ProfileTarget, BACKUP_SUFFIX, EXPORT_PREFIX,
    PRIVATE_MARKER,
};
use proptest::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Test utilities
fn write_profile(dir: &Path, name: &str) {
    fs::write(dir.join(name), "# profile\nexport AWS_PROFILE=test\n").unwrap();
}

fn write_plain(dir: &Path, name: &str) {
    fs::write(dir.join(name), "AWS_PROFILE=test\n").unwrap();
}

fn mark_private(dir: &Path) {
    fs::write(dir.join(PRIVATE_MARKER), "").unwrap();
}

fn names(root: &Path, private: bool) -> Vec<String> {
    list_profiles(root, private)
        .into_iter()
        .map(|profile| profile.name)
        .collect()
}

/// alpha (export), beta (no export), gamma~ (backup), group/ (no marker)
fn scenario_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_profile(temp.path(), "alpha");
    write_plain(temp.path(), "beta");
    write_profile(temp.path(), "gamma~");
    fs::create_dir(temp.path().join("group")).unwrap();
    write_profile(&temp.path().join("group"), "inner");
    temp
}

#[test]
fn test_scenario_mixed_directory() {
    let temp = scenario_tree();

    assert_eq!(names(temp.path(), false), vec!["alpha", "group/"]);
    assert!(list_profiles(temp.path(), true).is_empty());
}

#[test]
fn test_empty_directory_lists_nothing() {
    let temp = TempDir::new().unwrap();
    assert!(list_profiles(temp.path(), false).is_empty());
    assert!(list_profiles(temp.path(), true).is_empty());
}

#[test]
fn test_missing_directory_lists_nothing() {
    let temp = TempDir::new().unwrap();
    assert!(list_profiles(temp.path().join("absent"), false).is_empty());
}

#[test]
fn test_private_groups_are_partitioned() {
    let temp = TempDir::new().unwrap();
    write_profile(temp.path(), "public");
    fs::create_dir(temp.path().join("secret")).unwrap();
    mark_private(&temp.path().join("secret"));
    fs::create_dir(temp.path().join("open")).unwrap();

    assert_eq!(names(temp.path(), false), vec!["public", "open/"]);

    let private = list_profiles(temp.path(), true);
    assert_eq!(private.len(), 1);
    assert_eq!(private[0].name, "secret/");
    assert!(private[0].is_dir);
    assert!(private[0].is_private);
}

#[test]
fn test_files_follow_root_privacy_not_their_own() {
    let temp = TempDir::new().unwrap();
    mark_private(temp.path());
    write_profile(temp.path(), "token");
    fs::create_dir(temp.path().join("nested")).unwrap();

    // Files inherit the root's privacy; the unmarked subdirectory is public
    assert_eq!(names(temp.path(), true), vec!["token"]);
    assert_eq!(names(temp.path(), false), vec!["nested/"]);
}

#[test]
fn test_files_always_precede_groups() {
    let temp = TempDir::new().unwrap();
    for i in 0..4 {
        fs::create_dir(temp.path().join(format!("dir{}", i))).unwrap();
        write_profile(temp.path(), &format!("file{}", i));
    }

    let profiles = list_profiles(temp.path(), false);
    assert_eq!(profiles.len(), 8);
    let first_dir = profiles.iter().position(|p| p.is_dir).unwrap();
    assert_eq!(first_dir, 4);
    assert!(profiles[first_dir..].iter().all(|p| p.is_dir));
}

#[test]
fn test_files_keep_scan_order() {
    let temp = TempDir::new().unwrap();
    for name in ["zeta", "alpha", "mid"] {
        write_profile(temp.path(), name);
    }

    let scan_order: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();

    assert_eq!(names(temp.path(), false), scan_order);
}

#[test]
fn test_profile_exists() {
    let temp = scenario_tree();
    let root = temp.path();

    assert!(profile_exists(root, "1"));
    assert!(profile_exists(root, "2"));
    assert!(!profile_exists(root, "3"));
    assert!(!profile_exists(root, "0"));
    assert!(profile_exists(root, "group/"));
    assert!(profile_exists(root, "alpha"));
    // Not a profile, but present on disk
    assert!(profile_exists(root, "beta"));
    assert!(profile_exists(root, "group/inner"));
    assert!(!profile_exists(root, "nope"));
}

#[test]
fn test_resolve_profile_targets() {
    let temp = scenario_tree();
    let root = temp.path();

    assert_eq!(
        resolve_profile(root, "1", false),
        Some(ProfileTarget::File(root.join("alpha")))
    );
    assert_eq!(
        resolve_profile(root, "2", false),
        Some(ProfileTarget::Group(root.join("group")))
    );
    assert_eq!(
        resolve_profile(root, "group", false),
        Some(ProfileTarget::Group(root.join("group")))
    );
    assert_eq!(
        resolve_profile(root, "group/inner", false),
        Some(ProfileTarget::File(root.join("group/inner")))
    );
    assert_eq!(resolve_profile(root, "1", true), None);
    assert_eq!(resolve_profile(root, "missing", false), None);
}

#[derive(Debug, Clone)]
enum Entry {
    Profile,
    Plain,
    Backup,
    Group { private: bool },
}

fn entry_strategy() -> impl Strategy<Value = Entry> {
    prop_oneof![
        Just(Entry::Profile),
        Just(Entry::Plain),
        Just(Entry::Backup),
        any::<bool>().prop_map(|private| Entry::Group { private }),
    ]
}

fn build_tree(entries: &[Entry], root_private: bool) -> TempDir {
    let temp = TempDir::new().unwrap();
    if root_private {
        mark_private(temp.path());
    }
    for (i, entry) in entries.iter().enumerate() {
        match entry {
            Entry::Profile => write_profile(temp.path(), &format!("p{}", i)),
            Entry::Plain => write_plain(temp.path(), &format!("n{}", i)),
            Entry::Backup => write_profile(temp.path(), &format!("b{}{}", i, BACKUP_SUFFIX)),
            Entry::Group { private } => {
                let dir = temp.path().join(format!("g{}", i));
                fs::create_dir(&dir).unwrap();
                if *private {
                    mark_private(&dir);
                }
            }
        }
    }
    temp
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_listing_invariants(
        entries in prop::collection::vec(entry_strategy(), 0..10),
        root_private in any::<bool>(),
        want_private in any::<bool>(),
    ) {
        let temp = build_tree(&entries, root_private);
        let profiles = list_profiles(temp.path(), want_private);

        for profile in &profiles {
            prop_assert_eq!(profile.is_private, want_private);
            if !profile.is_dir {
                prop_assert!(!profile.name.ends_with(BACKUP_SUFFIX));
                let content = fs::read_to_string(&profile.path).unwrap();
                prop_assert!(content.lines().any(|l| l.trim().starts_with(EXPORT_PREFIX)));
            }
        }

        if let Some(first_dir) = profiles.iter().position(|p| p.is_dir) {
            prop_assert!(profiles[first_dir..].iter().all(|p| p.is_dir));
        }

        // Unchanged tree, identical listing
        prop_assert_eq!(list_profiles(temp.path(), want_private), profiles);
    }
}
