use std::path::Path;
use std::process::{Command, Output};

fn run_in(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_skilldb"))
        .args(args)
        .current_dir(root)
        .output()
        .unwrap()
}

fn write_input(root: &Path, json: &str) {
    std::fs::create_dir_all(root.join("data")).unwrap();
    std::fs::write(root.join("data").join("skills.json"), json).unwrap();
}

#[test]
fn test_no_arguments_prints_status_line() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path(), r#"[{"id":"s1","name":"Sort"},{"id":"s2","name":"Search"}]"#);

    let out = run_in(dir.path(), &[]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.trim_end(), "skills: 2 -> data/skills.db");
    assert!(dir.path().join("data").join("skills.db").is_file());
}

#[test]
fn test_duplicate_id_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path(), r#"[{"id":"s1","name":"Sort"},{"id":"s1","name":"Search"}]"#);

    let out = run_in(dir.path(), &[]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Duplicate skill id: s1"));
}

#[test]
fn test_missing_input_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();

    let out = run_in(dir.path(), &[]);
    assert!(!out.status.success());
    assert!(!dir.path().join("data").join("skills.db").exists());
}

#[test]
fn test_config_file_selects_variant_and_output() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path(), r#"[{"id":"s1","name":"Sort"}]"#);
    std::fs::write(
        dir.path().join("skilldb.toml"),
        "output = \"build/en.db\"\nvariant = \"monolingual\"\n",
    )
    .unwrap();

    let out = run_in(dir.path(), &[]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap().trim_end(),
        "skills: 1 -> build/en.db"
    );

    let store = skilldb::SkillStore::open(&dir.path().join("build").join("en.db")).unwrap();
    assert_eq!(store.variant(), skilldb::SchemaVariant::Monolingual);
}

#[test]
fn test_stats_flag() {
    let dir = tempfile::tempdir().unwrap();
    write_input(
        dir.path(),
        r#"[{"id":"s1","name":"Sort","category":"algo","platforms":["web"]}]"#,
    );

    let out = run_in(dir.path(), &["--stats"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("skills: 1 -> data/skills.db"));
    assert!(stdout.contains("Categories"));
    assert!(stdout.contains("schema: bilingual"));
}
