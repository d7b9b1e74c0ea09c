//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("gleaner")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_file_input() {
    cmd()
        .arg(get_fixture_path("blog_post.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Every value in Rust has a single owner."));
}

#[test]
fn test_cli_stdin_input() {
    let html = "<html><body><nav>menu</nav><article>  Hello   world.\n\n\nBye. </article></body></html>";
    cmd()
        .arg("-")
        .write_stdin(html)
        .assert()
        .success()
        .stdout("Hello world.\nBye.\n");
}

#[test]
fn test_cli_noise_is_removed() {
    cmd()
        .arg(get_fixture_path("blog_post.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("tracking-snippet").not())
        .stdout(predicate::str::contains("Copyright").not())
        .stdout(predicate::str::contains("Sponsored").not());
}

#[test]
fn test_cli_json_format() {
    let output = cmd()
        .args(["-f", "json", &get_fixture_path("main_only.html")])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["content"].as_str().unwrap().contains("Getting Started"));
    assert!(json.get("url").is_some());
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("output.txt");

    cmd()
        .args(["-o", output.to_str().unwrap()])
        .arg(get_fixture_path("blog_post.html"))
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("Rust Ownership Explained"));
}

#[test]
fn test_cli_invalid_file() {
    cmd().arg("nonexistent.html").assert().failure();
}

#[test]
fn test_cli_no_body_fails() {
    cmd()
        .arg(get_fixture_path("no_body.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find main content"));
}

#[test]
fn test_cli_empty_article_succeeds() {
    cmd()
        .arg(get_fixture_path("empty_article.html"))
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_cli_malformed_html() {
    cmd()
        .arg(get_fixture_path("malformed_html.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Broken article markup"));
}

#[test]
fn test_cli_unicode_content() {
    cmd()
        .arg(get_fixture_path("unicode_heavy.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("International"));
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", &get_fixture_path("blog_post.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Gleaner"))
        .stderr(predicate::str::contains("<article>"))
        .stderr(predicate::str::contains("Words:"));
}

#[test]
fn test_cli_verbose_raw_text_word_count() {
    cmd()
        .args(["-v", "--text", "one two\n\nthree"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Words:"))
        .stderr(predicate::str::contains("3"))
        .stdout("one two\nthree\n");
}

#[test]
fn test_cli_custom_noise() {
    cmd()
        .args(["--noise", "h1", &get_fixture_path("blog_post.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust Ownership Explained").not())
        .stdout(predicate::str::contains("Sponsored"));
}

#[test]
fn test_cli_raw_text() {
    cmd()
        .args(["--text", "  pasted\t\ttext\n\n\nhere  "])
        .assert()
        .success()
        .stdout("pasted text\nhere\n");
}

#[test]
fn test_cli_raw_text_blank_fails() {
    cmd().args(["--text", "   "]).assert().failure();
}

#[test]
fn test_cli_invalid_url_scheme_treated_as_file() {
    cmd().arg("ftp://example.com/page.html").assert().failure();
}

#[test]
fn test_bash_completions_use_cli_flag_names() {
    let script = std::fs::read_to_string(concat!(env!("OUT_DIR"), "/completions/gleaner.bash")).unwrap();

    assert!(script.contains("--user-agent"));
    assert!(script.contains("--max-bytes"));
    assert!(!script.contains("--user_agent"));
    assert!(!script.contains("--max_bytes"));
}

#[test]
fn test_cli_accepts_fetch_flags() {
    cmd()
        .args(["--user-agent", "AuditTests/2.0", "--max-bytes", "2048", "--timeout", "5"])
        .arg(get_fixture_path("main_only.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Getting Started"));
}
