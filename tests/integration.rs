use std::path::Path;
use std::process::Command;

fn objcdoc_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_objcdoc"));
    cmd.current_dir(dir);
    cmd
}

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new("tests/fixtures").join(name)
}

#[test]
fn list_indexes_declared_methods() {
    let out = objcdoc_cmd(&fixture("basic")).arg("list").output().unwrap();
    assert!(
        out.status.success(),
        "list failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("+[MyClass alloc]"));
    assert!(stdout.contains("-[MyClass setName:]"));
    assert!(stdout.contains("-[AppDelegate application:didFinishLaunching:]"));
    assert!(stdout.contains("3 objects indexed"));
}

#[test]
fn list_json_names_locations() {
    let out = objcdoc_cmd(&fixture("basic"))
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let names: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"+[MyClass alloc]"));

    let alloc = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["name"] == "+[MyClass alloc]")
        .unwrap();
    assert_eq!(alloc["kind"], "method");
    assert_eq!(alloc["location"], "guide.md");
}

#[test]
fn check_reports_unresolved_references() {
    let out = objcdoc_cmd(&fixture("basic")).arg("check").output().unwrap();

    // The fixture has one cross-reference and resolution always fails.
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("UNRESOLVED"));
    assert!(stdout.contains("+[MyClass alloc]"));
    assert!(stdout.contains("plain text"));
}

#[test]
fn check_flags_malformed_declarations_first() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("broken.md"),
        ".. objc:method:: [BadClass missingBracket\n\nsee :objc:method:`-[Foo run]`\n",
    )
    .unwrap();

    let out = objcdoc_cmd(dir.path()).arg("check").output().unwrap();

    // Malformed (2) outranks unresolved (1).
    assert_eq!(out.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("MALFORMED"));
    assert!(stdout.contains("broken.md:1"));
}

#[test]
fn clean_tree_checks_green() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("ok.md"),
        ".. objc:method:: - (void)run\n",
    )
    .unwrap();

    let out = objcdoc_cmd(dir.path()).arg("check").output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("All 1 declarations well-formed"));
}

#[test]
fn list_skips_malformed_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("mixed.md"),
        ".. objc:method:: + [MyClass alloc]\n.. objc:method:: (void\n",
    )
    .unwrap();

    let out = objcdoc_cmd(dir.path()).arg("list").output().unwrap();
    assert_eq!(out.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stdout.contains("+[MyClass alloc]"));
    assert!(stderr.contains("malformed"));
}

#[test]
fn config_filters_scanned_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("docs/archive")).unwrap();
    std::fs::write(
        dir.path().join(".objcdoc.toml"),
        "include = [\"docs/\"]\nexclude = [\"docs/archive/\"]\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("docs/current.md"),
        ".. objc:method:: - [Foo run]\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("docs/archive/old.md"),
        ".. objc:method:: - [Foo retired]\n",
    )
    .unwrap();

    let out = objcdoc_cmd(dir.path()).arg("list").output().unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("-[Foo run]"));
    assert!(!stdout.contains("-[Foo retired]"));
    assert!(stdout.contains("1 objects indexed"));
}

#[test]
fn rebuilt_index_keeps_last_writer() {
    // Two documents declare the same method; registration overwrites, so the
    // listing holds exactly one entry for the key.
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("a.md"),
        ".. objc:method:: + [MyClass alloc]\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("b.md"),
        ".. objc:method:: + [MyClass alloc]\n",
    )
    .unwrap();

    let out = objcdoc_cmd(dir.path()).arg("list").output().unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("1 objects indexed"));
    // Files are visited in name order, so b.md wrote last.
    assert!(stdout.contains("(b.md)"));
}

#[test]
fn show_prints_canonical_forms() {
    let dir = tempfile::tempdir().unwrap();
    let out = objcdoc_cmd(dir.path())
        .args(["show", "- (void)[MyClass setName:(NSString *)aName]"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("setName:"));
    assert!(stdout.contains("-[MyClass setName:]"));
    assert!(stdout.contains("(void)"));
}

#[test]
fn show_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let out = objcdoc_cmd(dir.path())
        .args(["show", "[BadClass missingBracket"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(3));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("[BadClass missingBracket"));
}
