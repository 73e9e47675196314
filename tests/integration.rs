use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn wbs_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("wbs");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let content_dir = root.join("content");
    fs::create_dir_all(&content_dir).unwrap();

    fs::write(
        content_dir.join("projects.json"),
        r#"[
  {
    "id": "p1",
    "title": "Digital Workbench Portfolio",
    "description": "Modern React portfolio",
    "longDescription": "A statically generated site with client-side search.",
    "techStack": ["React", "TypeScript"],
    "tags": ["Portfolio"],
    "category": "Web Development",
    "date": "2025-01-15",
    "featured": true
  }
]"#,
    )
    .unwrap();
    fs::write(
        content_dir.join("articles.json"),
        r#"[
  {
    "slug": "a1",
    "title": "Core Web Vitals in Practice",
    "excerpt": "Measuring LCP, CLS and INP on a static site",
    "content": "Largest Contentful Paint is the render time of the largest image or text block. We cut it by preloading hero images and inlining critical CSS.",
    "tags": ["Performance", "CSS"],
    "category": "Performance",
    "date": "2024-11-02"
  }
]"#,
    )
    .unwrap();
    fs::write(
        content_dir.join("case-studies.json"),
        r#"[
  {
    "slug": "c1",
    "title": "Edge Caching for a Headless Store",
    "summary": "Edge caching cut TTFB by 60%",
    "body": "We moved rendering to the edge and cached product pages.",
    "technologies": ["Rust", "Cloudflare Workers"],
    "tags": ["Performance", "Caching"],
    "category": "Performance",
    "date": "2023-06-20"
  }
]"#,
    )
    .unwrap();

    let config_content = r#"[[sources]]
name = "projects"
kind = "project"
path = "../content/projects.json"

[[sources]]
name = "articles"
kind = "article"
path = "../content/articles.json"

[[sources]]
name = "case-studies"
kind = "case-study"
path = "../content/case-studies.json"

[history]
path = "../data/history.json"
limit = 3
"#;

    let config_path = config_dir.join("wbs.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_wbs(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = wbs_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run wbs binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn json_ids(stdout: &str) -> Vec<String> {
    let value: serde_json::Value = serde_json::from_str(stdout).unwrap();
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_sources_lists_item_counts() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_wbs(&config_path, &["sources"]);
    assert!(success, "sources failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("projects"));
    assert!(stdout.contains("case-study"));
    assert_eq!(stdout.matches("OK").count(), 3);
}

#[test]
fn test_search_ranks_and_strips_markers_when_piped() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_wbs(&config_path, &["search", "portfolio"]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("1. [27.60] project / Digital Workbench Portfolio"));
    assert!(!stdout.contains("<mark>"));
    assert!(stdout.contains("id: p1"));
}

#[test]
fn test_search_json_carries_score_and_highlights() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_wbs(&config_path, &["search", "react", "--json"]);
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let first = &value[0];
    assert_eq!(first["id"], "p1");
    assert_eq!(first["type"], "project");
    assert!((first["score"].as_f64().unwrap() - 13.2).abs() < 1e-9);
    assert_eq!(
        first["highlights"]["description"],
        "Modern <mark>React</mark> portfolio"
    );
}

#[test]
fn test_search_no_results() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_wbs(&config_path, &["search", "zzz_no_match"]);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_empty_query_with_filters() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_wbs(
        &config_path,
        &["search", "", "--tag", "Performance", "--json"],
    );
    assert!(success);
    // Equal zero scores fall back to newest first
    assert_eq!(json_ids(&stdout), vec!["a1", "c1"]);

    let (stdout, _, success) = run_wbs(
        &config_path,
        &["search", "", "--type", "case-study", "--tech", "Rust", "--json"],
    );
    assert!(success);
    assert_eq!(json_ids(&stdout), vec!["c1"]);

    let (stdout, _, success) = run_wbs(
        &config_path,
        &["search", "", "--since", "2024-01-01", "--not-featured", "--json"],
    );
    assert!(success);
    assert_eq!(json_ids(&stdout), vec!["a1"]);
}

#[test]
fn test_search_limit() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_wbs(&config_path, &["search", "", "--limit", "1", "--json"]);
    assert!(success);
    assert_eq!(json_ids(&stdout), vec!["p1"]);
}

#[test]
fn test_search_regex_characters_are_literal() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_wbs(&config_path, &["search", "(.*"]);
    assert!(success, "search failed: stderr={}", stderr);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_invalid_date_fails() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_wbs(&config_path, &["search", "", "--since", "yesterday"]);
    assert!(!success);
    assert!(stderr.contains("--since"));
}

#[test]
fn test_suggest() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_wbs(&config_path, &["suggest", "port"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["Digital Workbench Portfolio", "Portfolio"]);

    let (stdout, _, success) = run_wbs(&config_path, &["suggest", "port", "--limit", "1"]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn test_facets_json() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_wbs(&config_path, &["facets", "--json"]);
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        value["types"],
        serde_json::json!(["article", "case-study", "project"])
    );
    assert_eq!(
        value["tags"],
        serde_json::json!(["CSS", "Caching", "Performance", "Portfolio"])
    );
    assert_eq!(value["dateBounds"]["start"], "2023-06-20");
}

#[test]
fn test_get_item() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_wbs(&config_path, &["get", "c1"]);
    assert!(success);
    assert!(stdout.contains("Edge Caching for a Headless Store"));
    assert!(stdout.contains("We moved rendering to the edge"));
}

#[test]
fn test_get_missing_item_fails() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_wbs(&config_path, &["get", "nope"]);
    assert!(!success);
    assert!(stderr.contains("Item not found"));
}

#[test]
fn test_stats() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_wbs(&config_path, &["stats"]);
    assert!(success);
    assert!(stdout.contains("Items:        3"));
    assert!(stdout.contains("Featured:     1"));
    assert!(stdout.contains("2023-06-20 .. 2025-01-15"));
}

#[test]
fn test_recent_queries_are_recorded_and_capped() {
    let (_tmp, config_path) = setup_test_env();

    for q in ["rust", "react", "css", "edge", "rust"] {
        let (_, _, success) = run_wbs(&config_path, &["search", q]);
        assert!(success);
    }
    // Blank queries are not recorded
    run_wbs(&config_path, &["search", ""]);

    let (stdout, _, success) = run_wbs(&config_path, &["recent"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["1. rust", "2. edge", "3. css"]);

    let (_, _, success) = run_wbs(&config_path, &["recent", "--clear"]);
    assert!(success);
    let (stdout, _, _) = run_wbs(&config_path, &["recent"]);
    assert!(stdout.contains("No recent queries."));
}

#[test]
fn test_corrupt_history_does_not_break_search() {
    let (tmp, config_path) = setup_test_env();
    let data_dir = tmp.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("history.json"), "{broken").unwrap();

    let (stdout, stderr, success) = run_wbs(&config_path, &["search", "react"]);
    assert!(success, "search failed: stderr={}", stderr);
    assert!(stdout.contains("id: p1"));
}

#[test]
fn test_recent_clear_repairs_corrupt_history() {
    let (tmp, config_path) = setup_test_env();
    let data_dir = tmp.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("history.json"), "{broken").unwrap();

    let (stdout, stderr, success) = run_wbs(&config_path, &["recent", "--clear"]);
    assert!(success, "clear failed: stderr={}", stderr);
    assert!(stdout.contains("Recent queries cleared."));

    run_wbs(&config_path, &["search", "rust"]);
    let (stdout, _, success) = run_wbs(&config_path, &["recent"]);
    assert!(success);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["1. rust"]);
}

#[test]
fn test_duplicate_ids_across_sources_fail() {
    let (tmp, config_path) = setup_test_env();
    fs::write(
        tmp.path().join("content").join("articles.json"),
        r#"[{"slug":"p1","title":"Clash","excerpt":"E","category":"C","date":"2024-01-01"}]"#,
    )
    .unwrap();

    let (_, stderr, success) = run_wbs(&config_path, &["search", "clash"]);
    assert!(!success);
    assert!(stderr.contains("articles"));
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, success) = run_wbs(&tmp.path().join("nope.toml"), &["stats"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}

#[test]
fn test_completions_without_config() {
    let tmp = TempDir::new().unwrap();
    let (stdout, _, success) = run_wbs(&tmp.path().join("nope.toml"), &["completions", "bash"]);
    assert!(success);
    assert!(stdout.contains("wbs"));
}
