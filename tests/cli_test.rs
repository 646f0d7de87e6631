//! CLI integration tests for the resource-mapping binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const BLOG: &str = "tests/fixtures/blog.json";

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("resource-mapping"))
}

// Helper to create a temp mapping file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Run `resolve` with extra args and parse the class metadata from stdout.
fn resolve_json(args: &[&str]) -> Value {
    let output = cmd().arg("resolve").args(args).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

mod resolve_command {
    use super::*;

    #[test]
    fn basic_resolve() {
        let dir = TempDir::new().unwrap();
        let mapping = write_temp_file(
            &dir,
            "mapping.json",
            r#"{
                "classes": {
                    "Article": {
                        "attributes": { "title": { "types": [{ "builtin": "string" }], "public": true } }
                    }
                }
            }"#,
        );

        cmd()
            .args(["resolve", mapping.to_str().unwrap(), "--class", "Article"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""name":"Article""#))
            .stdout(predicate::str::contains(r#""readable":true,"writable":true"#));
    }

    #[test]
    fn resolve_without_groups() {
        let article = resolve_json(&[BLOG, "--class", "Article"]);
        let attributes = &article["attributes"];

        assert_eq!(article["identifier"], "id");
        assert_eq!(attributes["id"]["readable"], true);
        assert_eq!(attributes["title"]["writable"], true);
        assert_eq!(attributes["author"]["link_class"], "Person");
        assert_eq!(attributes["author"]["normalization_link"], true);
        assert_eq!(attributes["tags"]["link_class"], "Tag");
        assert_eq!(attributes["tag"]["writable"], true);
    }

    #[test]
    fn resolve_with_normalization_groups() {
        let article = resolve_json(&[BLOG, "--class", "Article", "--normalization-groups", "list"]);
        let author = &article["attributes"]["author"];

        assert_eq!(author["readable"], true);
        assert_eq!(author["writable"], true);
        // Person exposes nothing in "list": embedded.
        assert_eq!(author["normalization_link"], true);
    }

    #[test]
    fn resolve_with_comma_separated_groups() {
        let article = resolve_json(&[
            BLOG,
            "--class",
            "Article",
            "--normalization-groups",
            "list,detail",
        ]);
        assert_eq!(article["attributes"]["author"]["normalization_link"], false);
    }

    #[test]
    fn resolve_with_both_directions_scoped() {
        let article = resolve_json(&[
            BLOG,
            "--class",
            "Article",
            "--normalization-groups",
            "list",
            "--denormalization-groups",
            "write",
        ]);
        let attributes = article["attributes"].as_object().unwrap();

        assert!(attributes.get("tag").is_none());
        assert_eq!(attributes["title"]["writable"], true);
        assert_eq!(attributes["author"]["writable"], false);
    }

    #[test]
    fn resolve_includes_annotations() {
        let article = resolve_json(&[BLOG, "--class", "Article"]);
        assert_eq!(article["iri"], "http://schema.org/BlogPosting");
        assert_eq!(article["description"], "A blog article");
        assert_eq!(article["attributes"]["title"]["required"], true);
        assert_eq!(article["attributes"]["title"]["iri"], "http://schema.org/headline");
    }

    #[test]
    fn resolve_with_pretty() {
        cmd()
            .args(["resolve", BLOG, "--class", "Tag", "--pretty"])
            .assert()
            .success()
            // Pretty output has newlines and indentation
            .stdout(predicate::str::contains("{\n"));
    }

    #[test]
    fn resolve_with_output_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("output.json");

        cmd()
            .args([
                "resolve",
                BLOG,
                "--class",
                "Person",
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains(r#""name":"Person""#));
    }

    #[test]
    fn resolve_logs_to_stderr() {
        cmd()
            .env("RUST_LOG", "debug")
            .args(["resolve", BLOG, "--class", "Article"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("{"))
            .stderr(predicate::str::contains("loader applied"));
    }
}

mod validate_command {
    use super::*;

    #[test]
    fn validate_valid_mapping() {
        cmd()
            .args(["validate", BLOG])
            .assert()
            .success()
            .stdout(predicate::str::contains("Valid"));
    }

    #[test]
    fn validate_invalid_mapping() {
        let dir = TempDir::new().unwrap();
        let mapping = write_temp_file(
            &dir,
            "mapping.json",
            r#"{"classes": {"Article": {"attributes": {"title": {"types": [{"builtin": "text"}]}}}}}"#,
        );

        cmd()
            .args(["validate", mapping.to_str().unwrap()])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Validation failed"))
            .stderr(predicate::str::contains(
                "/classes/Article/attributes/title/types/0/builtin",
            ));
    }

    #[test]
    fn validate_json_output_valid() {
        cmd()
            .args(["validate", BLOG, "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""valid":true"#));
    }

    #[test]
    fn validate_json_output_invalid() {
        let dir = TempDir::new().unwrap();
        let mapping = write_temp_file(&dir, "mapping.json", r#"{"entities": {}}"#);

        cmd()
            .args(["validate", mapping.to_str().unwrap(), "--json"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(r#""valid":false"#))
            .stdout(predicate::str::contains(r#""errors":"#));
    }

    #[test]
    fn validate_json_output_file_error() {
        cmd()
            .args(["validate", "/nonexistent/mapping.json", "--json"])
            .assert()
            .code(3)
            .stdout(predicate::str::contains(r#""valid":false"#))
            .stdout(predicate::str::contains(r#""error":"#));
    }
}

mod lint_command {
    use super::*;

    #[test]
    fn lint_valid_fixture() {
        cmd()
            .args(["lint", BLOG])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 files checked, all passed"));
    }

    #[test]
    fn lint_warnings_pass_unless_strict() {
        let dir = TempDir::new().unwrap();
        let mapping = write_temp_file(&dir, "mapping.json", r#"{"resources": {"Ghost": "ghosts"}}"#);

        cmd()
            .args(["lint", mapping.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("warning[W001]"));

        cmd()
            .args(["lint", mapping.to_str().unwrap(), "--strict"])
            .assert()
            .code(1);
    }

    #[test]
    fn lint_directory_with_errors() {
        let dir = TempDir::new().unwrap();
        write_temp_file(&dir, "good.json", r#"{"classes": {}}"#);
        write_temp_file(&dir, "bad.json", "{ not json");

        cmd()
            .args(["lint", dir.path().to_str().unwrap()])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("error[E001]"))
            .stdout(predicate::str::contains("1 passed, 1 failed"));
    }

    #[test]
    fn lint_quiet_hides_passing_files() {
        let dir = TempDir::new().unwrap();
        write_temp_file(&dir, "good.json", r#"{"classes": {}}"#);

        cmd()
            .args(["lint", dir.path().to_str().unwrap(), "--quiet"])
            .assert()
            .success()
            .stdout(predicate::str::contains("good.json").not())
            .stdout(predicate::str::contains("Linting").not());
    }

    #[test]
    fn lint_json_format() {
        let output = cmd()
            .args(["lint", BLOG, "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let result: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(result["files_checked"], 1);
        assert_eq!(result["results"][0]["status"], "ok");
    }

    #[test]
    fn lint_path_not_found() {
        cmd()
            .args(["lint", "/nonexistent/mappings"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("path not found"));
    }
}

mod error_handling {
    use super::*;

    #[test]
    fn file_not_found() {
        cmd()
            .args(["resolve", "/nonexistent/mapping.json", "--class", "Article"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn invalid_json_mapping() {
        let dir = TempDir::new().unwrap();
        let mapping = write_temp_file(&dir, "bad.json", r#"{ not valid json"#);

        cmd()
            .args(["resolve", mapping.to_str().unwrap(), "--class", "Article"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }

    #[test]
    fn invalid_mapping_document() {
        let dir = TempDir::new().unwrap();
        let mapping = write_temp_file(
            &dir,
            "mapping.json",
            r#"{"classes": {"Article": {"methods": [{"name": "setTitle", "required_parameters": -1}]}}}"#,
        );

        cmd()
            .args(["resolve", mapping.to_str().unwrap(), "--class", "Article"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid mapping document"));
    }

    #[test]
    fn unknown_class() {
        cmd()
            .args(["resolve", BLOG, "--class", "Invoice"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unknown class \"Invoice\""));
    }
}

mod required_args {
    use super::*;

    #[test]
    fn missing_class_flag() {
        cmd()
            .args(["resolve", BLOG])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--class"));
    }

    #[test]
    fn missing_mapping_path() {
        cmd()
            .args(["resolve", "--class", "Article"])
            .assert()
            .failure();
    }

    #[test]
    fn missing_mapping_for_validate() {
        cmd()
            .args(["validate", "--json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("MAPPING"));
    }
}

mod help_and_version {
    use super::*;

    #[test]
    fn help_flag() {
        cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Resolve attribute visibility"));
    }

    #[test]
    fn version_flag() {
        cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("resource-mapping"));
    }

    #[test]
    fn resolve_help() {
        cmd()
            .args(["resolve", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--class"))
            .stdout(predicate::str::contains("--normalization-groups"))
            .stdout(predicate::str::contains("--denormalization-groups"));
    }
}

/// Remote mapping loading against a local mock server
#[cfg(feature = "remote")]
mod remote {
    use super::*;

    #[test]
    fn resolve_from_url() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/blog.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(fs::read_to_string(BLOG).unwrap())
            .create();

        let url = format!("{}/blog.json", server.url());
        cmd()
            .args(["resolve", &url, "--class", "Article"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""link_class":"Person""#));
        mock.assert();
    }

    #[test]
    fn resolve_url_404() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/missing.json").with_status(404).create();

        let url = format!("{}/missing.json", server.url());
        cmd()
            .args(["resolve", &url, "--class", "Article"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("failed to fetch").or(predicate::str::contains("404")));
    }

    #[test]
    fn validate_from_url() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/mapping.json")
            .with_status(200)
            .with_body(r#"{"resources": {"Person": 1}}"#)
            .create();

        let url = format!("{}/mapping.json", server.url());
        cmd()
            .args(["validate", &url, "--json"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("/resources/Person"));
    }
}
