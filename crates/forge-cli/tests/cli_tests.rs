use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with plain output, no latencies and its own database
fn forge_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("forge").expect("Failed to find forge binary");
    cmd.arg("--no-color")
        .arg("--instant")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

fn create_demo(temp_dir: &TempDir) {
    forge_cmd(temp_dir)
        .args(["project", "create", "Demo", "-d", "A todo app"])
        .assert()
        .success();
}

#[test]
fn test_cli_list_empty_projects() {
    let temp_dir = create_cli_test_environment();

    forge_cmd(&temp_dir)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found."));

    // No command lists projects too
    forge_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Projects"));
}

#[test]
fn test_cli_create_project() {
    let temp_dir = create_cli_test_environment();

    forge_cmd(&temp_dir)
        .args(["project", "create", "Demo", "--description", "A todo app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project 'Demo' with ID:"))
        .stdout(predicate::str::contains("- Status: planning"))
        .stdout(predicate::str::contains("A todo app"));

    forge_cmd(&temp_dir)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Demo"))
        .stdout(predicate::str::contains("- **Description**: A todo app"));
}

#[test]
fn test_cli_rejects_slash_in_project_name() {
    let temp_dir = create_cli_test_environment();

    forge_cmd(&temp_dir)
        .args(["project", "create", "a/b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not contain '/'"));
}

#[test]
fn test_cli_plan_generate_and_approve() {
    let temp_dir = create_cli_test_environment();
    create_demo(&temp_dir);

    forge_cmd(&temp_dir)
        .args(["plan", "generate", "Demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Project Plan: Demo"))
        .stdout(predicate::str::contains("> A todo app"))
        .stdout(predicate::str::contains("5. **Documentation**"));

    forge_cmd(&temp_dir)
        .args(["plan", "approve", "Demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Approved plan for 'Demo'"))
        .stdout(predicate::str::contains(
            "## Demo is completed (5/5 steps completed)",
        ))
        .stdout(predicate::str::contains("5. Documentation (✓ Completed)"));

    forge_cmd(&temp_dir)
        .args(["plan", "continue", "Demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All steps are already completed."));
}

#[test]
fn test_cli_approve_plan_without_plan_fails() {
    let temp_dir = create_cli_test_environment();
    create_demo(&temp_dir);

    forge_cmd(&temp_dir)
        .args(["plan", "approve", "Demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no plan to approve"));
}

#[test]
fn test_cli_step_approve_and_fail() {
    let temp_dir = create_cli_test_environment();
    create_demo(&temp_dir);
    forge_cmd(&temp_dir)
        .args(["plan", "generate", "Demo"])
        .assert()
        .success();

    forge_cmd(&temp_dir)
        .args(["step", "approve", "Demo", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1/5 steps completed)"))
        .stdout(predicate::str::contains("2. Core functionality (➤ In Progress)"));

    forge_cmd(&temp_dir)
        .args(["step", "fail", "Demo", "2", "-m", "compile error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2. Core functionality (✗ Error)"));

    forge_cmd(&temp_dir)
        .args(["step", "fail", "Demo", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only in-progress steps can fail"));

    forge_cmd(&temp_dir)
        .args(["step", "approve", "Demo", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step '9' not found"));
}

#[test]
fn test_cli_file_commands() {
    let temp_dir = create_cli_test_environment();
    create_demo(&temp_dir);

    forge_cmd(&temp_dir)
        .args(["file", "tree", "Demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Demo/**"))
        .stdout(predicate::str::contains("    - index.js"));

    forge_cmd(&temp_dir)
        .args(["file", "create", "Demo", "/Demo/src/app.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created file /Demo/src/app.js"));

    forge_cmd(&temp_dir)
        .args(["file", "create", "Demo", "/Demo/lib", "--folder"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created folder /Demo/lib"));

    forge_cmd(&temp_dir)
        .args(["file", "write", "Demo", "/Demo/src/app.js", "let x = 1;"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote /Demo/src/app.js"));

    forge_cmd(&temp_dir)
        .args(["file", "cat", "Demo", "/Demo/src/app.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("let x = 1;"));

    forge_cmd(&temp_dir)
        .args(["file", "rm", "Demo", "/Demo/README.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted /Demo/README.md"));

    forge_cmd(&temp_dir)
        .args(["file", "cat", "Demo", "/Demo/README.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    forge_cmd(&temp_dir)
        .args(["file", "create", "Demo", "/Demo/missing/x.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Folder '/Demo/missing' not found"));
}

#[test]
fn test_cli_github_commands() {
    let temp_dir = create_cli_test_environment();
    create_demo(&temp_dir);

    forge_cmd(&temp_dir)
        .args(["github", "push", "Demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not connected to GitHub"));

    forge_cmd(&temp_dir)
        .args([
            "github",
            "connect",
            "Demo",
            "https://github.com/octo/demo",
            "octo",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Connected 'Demo' to https://github.com/octo/demo",
        ));

    forge_cmd(&temp_dir)
        .args(["github", "push", "Demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pushed to https://github.com/octo/demo"));

    forge_cmd(&temp_dir)
        .args(["project", "show", "Demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- GitHub: https://github.com/octo/demo (octo)"));
}

#[test]
fn test_cli_model_commands() {
    let temp_dir = create_cli_test_environment();
    create_demo(&temp_dir);

    forge_cmd(&temp_dir)
        .args(["model", "search", "phi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Models matching 'phi'"))
        .stdout(predicate::str::contains("## Phi-2"))
        .stdout(predicate::str::contains("Mistral").not());

    forge_cmd(&temp_dir)
        .args(["model", "download", "phi-2", "--project", "Demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Downloaded Phi-2 and attached it to project"));

    forge_cmd(&temp_dir)
        .args(["project", "show", "Demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Model: Phi-2 (huggingface/phi-2)"));

    forge_cmd(&temp_dir)
        .args(["model", "remove", "Demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed model Phi-2."));

    forge_cmd(&temp_dir)
        .args(["model", "remove", "Demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project has no model attached."));
}

#[test]
fn test_cli_hub_failure_is_not_fatal() {
    let temp_dir = create_cli_test_environment();

    forge_cmd(&temp_dir)
        .args(["--hub-url", "http://127.0.0.1:9", "model", "search", "llama"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Model search failed"));
}

#[test]
fn test_cli_exec() {
    let temp_dir = create_cli_test_environment();
    create_demo(&temp_dir);

    forge_cmd(&temp_dir)
        .args(["exec", "Demo", "echo", "hello", "world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$ echo hello world\nhello world"));

    forge_cmd(&temp_dir)
        .args(["exec", "Demo", "make", "-j4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Command not recognized: make -j4"));
}

#[test]
fn test_cli_delete_project() {
    let temp_dir = create_cli_test_environment();
    create_demo(&temp_dir);

    forge_cmd(&temp_dir)
        .args(["project", "delete", "Demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted project 'Demo'"));

    forge_cmd(&temp_dir)
        .args(["project", "show", "Demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project 'Demo' not found"));
}

#[test]
fn test_cli_export_project() {
    let temp_dir = create_cli_test_environment();
    create_demo(&temp_dir);

    forge_cmd(&temp_dir)
        .args(["project", "export", "Demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Exported Demo"))
        .stdout(predicate::str::contains("- **Demo/**"))
        .stdout(predicate::str::contains("README.md"));

    forge_cmd(&temp_dir)
        .args(["project", "export", "Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project 'Missing' not found"));
}
