use std::path::{Path, PathBuf};

use xshell::Shell;

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).ancestors().nth(1).map(Path::to_path_buf).unwrap()
}

fn rust_files(sh: &Shell) -> Vec<PathBuf> {
    let root = project_root();
    ["crates", "xtask"]
        .iter()
        .flat_map(|dir| sh.read_dir(root.join(dir)).into_iter().flatten())
        .flat_map(|dir| walk(sh, dir))
        .filter(|it| it.extension().is_some_and(|ext| ext == "rs"))
        .collect()
}

fn walk(sh: &Shell, path: PathBuf) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path];
    }
    sh.read_dir(&path).unwrap_or_default().into_iter().flat_map(|it| walk(sh, it)).collect()
}

#[test]
fn versions_match() {
    let sh = Shell::new().unwrap();
    let manifest = sh.read_file(project_root().join("Cargo.toml")).unwrap();

    let package_version = manifest
        .lines()
        .find_map(|it| it.strip_prefix("version = \""))
        .and_then(|it| it.split('"').next())
        .unwrap();
    let pinned = manifest
        .lines()
        .find(|it| it.starts_with("cmdkit = "))
        .and_then(|it| it.split("version = \"=").nth(1))
        .and_then(|it| it.split('"').next())
        .unwrap();
    assert_eq!(package_version, pinned, "workspace version and `cmdkit` pin diverged");
}

#[test]
fn no_trailing_whitespace() {
    let sh = Shell::new().unwrap();
    let mut bad = Vec::new();
    for path in rust_files(&sh) {
        let text = sh.read_file(&path).unwrap();
        for (i, line) in text.lines().enumerate() {
            if line.ends_with([' ', '\t']) {
                bad.push(format!("{}:{}", path.display(), i + 1));
            }
        }
    }
    assert!(bad.is_empty(), "trailing whitespace:\n{}", bad.join("\n"));
}

#[test]
fn no_debug_leftovers() {
    let sh = Shell::new().unwrap();
    let needles = [concat!("db", "g!("), concat!("to", "do!(")];
    let mut bad = Vec::new();
    for path in rust_files(&sh) {
        let text = sh.read_file(&path).unwrap();
        if needles.iter().any(|it| text.contains(it)) {
            bad.push(path.display().to_string());
        }
    }
    assert!(bad.is_empty(), "leftover debugging macros in:\n{}", bad.join("\n"));
}
