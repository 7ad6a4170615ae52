//! Exit code and output checks for the son-access and son-profile binaries.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICE_UUID: &str = "65b416a6-46c0-4596-a9e9-0a9b04ed34ea";

fn son_access(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("son-access").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("HOME", home)
        .env_remove("SON_WORKSPACE")
        .env_remove("SON_ACCESS_LOG");
    cmd
}

fn son_profile() -> Command {
    let mut cmd = Command::cargo_bin("son-profile").unwrap();
    cmd.env_remove("SON_PROFILE_LOG");
    cmd
}

fn workspace(temp_dir: &TempDir) -> std::path::PathBuf {
    let root = temp_dir.path().join("ws");
    std::fs::create_dir_all(root.join("platforms")).unwrap();
    std::fs::write(root.join("workspace.yml"), "name: test\nlog_level: info\n").unwrap();
    root
}

fn add_default_platform(home: &Path, root: &Path, url: &str) {
    son_access(home)
        .arg("-w")
        .arg(root)
        .args(["config", "--platform", "sp1", "--new", "--url", url, "--default"])
        .assert()
        .success();
}

#[test]
fn help_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    son_access(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("son-access"));
}

#[test]
fn unknown_command_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    son_access(temp_dir.path())
        .arg("deploy")
        .assert()
        .code(1);
}

#[test]
fn invalid_resource_type_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    son_access(temp_dir.path())
        .args(["list", "images"])
        .assert()
        .code(1);
}

#[test]
fn pull_needs_exactly_one_selector() {
    let temp_dir = TempDir::new().unwrap();
    son_access(temp_dir.path())
        .args(["pull", "packages"])
        .assert()
        .code(1);

    son_access(temp_dir.path())
        .args([
            "pull", "packages", "--uuid", "abc", "--id", "sonata.eu", "demo", "0.1",
        ])
        .assert()
        .code(1);
}

#[test]
fn invalid_workspace_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    son_access(temp_dir.path())
        .arg("-w")
        .arg(temp_dir.path().join("missing"))
        .args(["list", "services"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid workspace"));
}

#[test]
fn config_adds_lists_and_rejects_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);

    son_access(temp_dir.path())
        .arg("-w")
        .arg(&root)
        .args([
            "config",
            "--platform",
            "sp1",
            "--new",
            "--url",
            "http://sp.int3.sonata-nfv.eu:32001",
            "--default",
        ])
        .assert()
        .success();

    son_access(temp_dir.path())
        .arg("-w")
        .arg(&root)
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[sp1]: http://sp.int3.sonata-nfv.eu:32001 (default)",
        ));

    son_access(temp_dir.path())
        .arg("-w")
        .arg(&root)
        .args(["config", "--platform", "sp1", "--new", "--url", "http://a:1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_without_changes_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);

    son_access(temp_dir.path())
        .arg("-w")
        .arg(&root)
        .args(["config", "--platform", "sp1", "--new"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--url"));

    son_access(temp_dir.path())
        .arg("-w")
        .arg(&root)
        .args(["config", "--platform", "sp9", "--url", "http://a:1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("doesn't exist"));
}

#[test]
fn remote_command_without_token_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    add_default_platform(temp_dir.path(), &root, "http://127.0.0.1:9");

    son_access(temp_dir.path())
        .arg("-w")
        .arg(&root)
        .args(["list", "packages"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not authenticated"))
        .stderr(predicate::str::contains("son-access auth -u USERNAME"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn auth_stores_token_from_platform() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/login"))
        .and(body_string("username=tester&password=1234"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"eyJ.tok\""))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    add_default_platform(temp_dir.path(), &root, &server.uri());

    son_access(temp_dir.path())
        .arg("-w")
        .arg(&root)
        .args(["auth", "-u", "tester", "-p", "1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Authentication is successful."));

    assert_eq!(
        std::fs::read_to_string(root.join("platforms").join("sp1-token.txt")).unwrap(),
        "\"eyJ.tok\""
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn auth_rejected_by_platform_exits_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    add_default_platform(temp_dir.path(), &root, &server.uri());

    son_access(temp_dir.path())
        .arg("-w")
        .arg(&root)
        .args(["auth", "-u", "tester", "-p", "wrong"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Authentication is successful.").not());

    assert!(!root.join("platforms").join("sp1-token.txt").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_services_prints_catalogue() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/services"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "uuid": SERVICE_UUID, "nsd": { "name": "sonata-demo" } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let root = workspace(&temp_dir);
    add_default_platform(temp_dir.path(), &root, &server.uri());
    std::fs::write(root.join("platforms").join("sp1-token.txt"), "\"abc\"").unwrap();

    son_access(temp_dir.path())
        .arg("-w")
        .arg(&root)
        .args(["list", "services"])
        .assert()
        .success()
        .stdout(predicate::str::contains(SERVICE_UUID))
        .stdout(predicate::str::contains("sonata-demo"));
}

#[test]
fn profile_help_exits_zero() {
    son_profile().arg("--help").assert().success();
}

#[test]
fn profile_missing_ped_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    son_profile()
        .arg("-c")
        .arg(temp_dir.path().join("missing.yml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("PED"));
}

#[cfg(unix)]
fn son_profile_temp_dirs(tmp: &Path) -> usize {
    std::fs::read_dir(tmp)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("son-profile-"))
        .count()
}

#[cfg(unix)]
#[test]
fn profile_invalid_ped_creates_no_work_dir() {
    let temp_dir = TempDir::new().unwrap();
    let tmp = temp_dir.path().join("tmp");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(
        temp_dir.path().join("ped.yml"),
        "service_package: missing.son\nservice_experiments: []\nfunction_experiments: []\n",
    )
    .unwrap();

    son_profile()
        .env("TMPDIR", &tmp)
        .arg("-c")
        .arg(temp_dir.path().join("ped.yml"))
        .assert()
        .code(1);

    assert_eq!(son_profile_temp_dirs(&tmp), 0);
}

#[cfg(unix)]
#[test]
fn profile_defaults_to_temporary_work_dir() {
    let temp_dir = TempDir::new().unwrap();
    let tmp = temp_dir.path().join("tmp");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(temp_dir.path().join("demo.son"), b"PK").unwrap();
    std::fs::write(
        temp_dir.path().join("ped.yml"),
        "service_package: demo.son\nservice_experiments: []\nfunction_experiments: []\n",
    )
    .unwrap();

    son_profile()
        .env("TMPDIR", &tmp)
        .arg("-c")
        .arg(temp_dir.path().join("ped.yml"))
        .assert()
        .success();

    assert_eq!(son_profile_temp_dirs(&tmp), 1);
}

#[test]
fn profile_reports_experiments() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("demo.son"), b"PK").unwrap();
    std::fs::write(
        temp_dir.path().join("ped.yml"),
        "service_package: demo.son\n\
         service_experiments:\n  - name: service_throughput\n    repetitions: 2\n\
         function_experiments: []\n",
    )
    .unwrap();
    let work_dir = temp_dir.path().join("work");

    son_profile()
        .arg("-c")
        .arg(temp_dir.path().join("ped.yml"))
        .arg("--work-dir")
        .arg(&work_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("[service] service_throughput"));

    assert!(work_dir.join("output_services").is_dir());
}
