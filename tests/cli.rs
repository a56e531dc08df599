use assert_cmd::Command;
use git2::{Repository, Signature, Time};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// 作成者の時刻とオフセットを指定してmainブランチにコミットする
fn commit(repo: &Repository, dir: &Path, author: &str, seconds: i64, offset_minutes: i32) {
    let name = format!("{}-{}.txt", author, seconds);
    fs::write(dir.join(&name), author).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(&name)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let time = Time::new(seconds, offset_minutes);
    let sig = Signature::new(author, "dev@example.com", &time).unwrap();
    let parent = repo
        .refname_to_id("refs/heads/main")
        .ok()
        .map(|oid| repo.find_commit(oid).unwrap());
    let parents: Vec<_> = parent.iter().collect();

    repo.commit(
        Some("refs/heads/main"),
        &sig,
        &sig,
        &format!("add {}", name),
        &tree,
        &parents,
    )
    .unwrap();
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    // 2024-03-15T02:30:00+05:00 = 2024-03-14T21:30:00Z（木曜日）
    commit(&repo, dir.path(), "Alice", 1_710_451_800, 5 * 60);
    commit(&repo, dir.path(), "Björk", 1_710_455_400, 0);
    commit(&repo, dir.path(), "Alice", 1_710_459_000, -4 * 60);
    dir
}

#[test]
fn writes_tables_and_chart() {
    let repo = fixture();
    let out = TempDir::new().unwrap();

    Command::cargo_bin("commit-stats")
        .unwrap()
        .args(["--repo"])
        .arg(repo.path())
        .args(["--output-dir"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Commits: 3"))
        .stdout(predicate::str::contains("Alice (2)"))
        .stdout(predicate::str::contains("Thursday"));

    let commits = fs::read_to_string(out.path().join("commits.csv")).unwrap();
    assert!(commits.starts_with('\u{feff}'));
    assert_eq!(commits.lines().count(), 4);
    assert!(commits.contains("Björk"));
    assert!(commits.contains("2024-03-15T02:30:00+05:00"));

    let authors = fs::read_to_string(out.path().join("top_authors.csv")).unwrap();
    assert_eq!(authors, "\u{feff}author,commits\nAlice,2\nBjörk,1\n");

    assert!(out.path().join("commit_stats.png").exists());
}

#[test]
fn json_summary_buckets_in_utc() {
    let repo = fixture();
    let out = TempDir::new().unwrap();

    let output = Command::cargo_bin("commit-stats")
        .unwrap()
        .arg("--repo")
        .arg(repo.path())
        .arg("--output-dir")
        .arg(out.path())
        .args(["--format", "json", "--no-chart", "--no-bom"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_commits"], 3);
    assert_eq!(json["hour_histogram"][0]["hour"], 21);
    assert_eq!(json["weekday_histogram"][0]["weekday"], 3);

    let authors = fs::read_to_string(out.path().join("top_authors.csv")).unwrap();
    assert!(authors.starts_with("author,commits"));
    assert!(!out.path().join("commit_stats.png").exists());
}

#[test]
fn fails_on_missing_branch() {
    let repo = fixture();
    let out = TempDir::new().unwrap();

    Command::cargo_bin("commit-stats")
        .unwrap()
        .arg("--repo")
        .arg(repo.path())
        .args(["--branch", "release"])
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Branch not found: release"));

    assert!(!out.path().join("commits.csv").exists());
}

#[test]
fn fails_on_invalid_repository() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("commit-stats")
        .unwrap()
        .arg("--repo")
        .arg(dir.path())
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a git repository"));
}
