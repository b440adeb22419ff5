//! End-to-end CLI tests
//!
//! Each test runs the binary inside its own temporary project directory.
//! The real-compile test skips itself when no `cc` is installed.

use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;

fn claw(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("claw").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn write_descriptor(dir: &Path, text: &str) {
    fs::write(dir.join("build.claw"), text).unwrap();
}

fn have_cc() -> bool {
    StdCommand::new("cc")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

#[test]
fn list_prints_environment_and_targets() {
    let dir = tempfile::tempdir().unwrap();
    write_descriptor(
        dir.path(),
        "#set link.dir = ./libs\n\
         #build alpha\n#root alpha.c\n#link m\n}\n\
         #build beta\n#root beta.c\n}\n",
    );

    claw(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("link.dir: ./libs"))
        .stdout(predicate::str::contains("targets:\n  alpha\n  beta\n"));
}

#[test]
fn list_verbose_shows_roots_and_links() {
    let dir = tempfile::tempdir().unwrap();
    write_descriptor(dir.path(), "#build alpha\n#root alpha.c\n#link m\n}\n");

    claw(dir.path())
        .args(["--verbose", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("root: alpha.c"))
        .stdout(predicate::str::contains("links: m"));
}

#[test]
fn list_with_empty_environment() {
    let dir = tempfile::tempdir().unwrap();
    write_descriptor(dir.path(), "#build t\n#root t.c\n}\n");

    claw(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("env:\n  (none)"));
}

#[test]
fn descriptor_is_found_from_a_subdirectory() {
    let dir = tempfile::tempdir().unwrap();
    write_descriptor(dir.path(), "#build t\n#root t.c\n}\n");
    let nested = dir.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();

    claw(&nested)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("  t\n"));
}

#[test]
fn bad_directive_reports_the_offending_line() {
    let dir = tempfile::tempdir().unwrap();
    write_descriptor(dir.path(), "#build t\n#root t.c\n}\n#bogus foo\n");

    claw(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad line: \"#bogus foo\""));
}

#[test]
fn unknown_build_target_fails_without_compiling() {
    let dir = tempfile::tempdir().unwrap();
    write_descriptor(dir.path(), "#build alpha\n#root alpha.c\n}\n");

    claw(dir.path())
        .args(["build", "nosuch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown build target: nosuch"))
        .stderr(predicate::str::contains("alpha"));

    // nothing was prepared on disk for any target
    assert!(!dir.path().join("build").exists());
}

#[test]
fn missing_descriptor_is_a_fatal_error() {
    let dir = tempfile::tempdir().unwrap();

    claw(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("build.claw"));
}

#[test]
fn clean_dry_run_reports_without_deleting() {
    let dir = tempfile::tempdir().unwrap();
    write_descriptor(dir.path(), "#build t\n#root t.c\n}\n");
    let out = dir.path().join("build").join("t");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("t"), b"binary").unwrap();

    claw(dir.path())
        .args(["clean", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry run] would remove: build/"));

    assert!(out.join("t").exists());
}

#[test]
fn clean_removes_one_target_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_descriptor(
        dir.path(),
        "#build alpha\n#root a.c\n}\n#build beta\n#root b.c\n}\n",
    );
    fs::create_dir_all(dir.path().join("build").join("alpha")).unwrap();
    fs::create_dir_all(dir.path().join("build").join("beta")).unwrap();

    claw(dir.path())
        .args(["clean", "alpha", "--yes"])
        .assert()
        .success();

    assert!(!dir.path().join("build").join("alpha").exists());
    assert!(dir.path().join("build").join("beta").exists());
}

#[test]
fn clean_rejects_unknown_target() {
    let dir = tempfile::tempdir().unwrap();
    write_descriptor(dir.path(), "#build alpha\n#root a.c\n}\n");

    claw(dir.path())
        .args(["clean", "nosuch", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown build target: nosuch"));
}

#[test]
fn build_compiles_a_real_target() {
    if !have_cc() {
        eprintln!("cc not installed, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    write_descriptor(dir.path(), "#build hello\n#root main.c\n}\n");
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(
        dir.path().join("src").join("main.c"),
        "int main(void)\n{\n\treturn 0;\n}\n",
    )
    .unwrap();

    claw(dir.path())
        .args(["build", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("make [debug] build"))
        .stdout(predicate::str::contains("build [hello]"));

    assert!(dir.path().join("build").join("hello").join("hello").exists());
}

#[test]
fn default_invocation_builds_all_targets_in_order() {
    if !have_cc() {
        eprintln!("cc not installed, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    write_descriptor(
        dir.path(),
        "#build one\n#root one.c\n}\n#build two\n#root two.c\n}\n",
    );
    fs::create_dir(dir.path().join("src")).unwrap();
    for name in ["one", "two"] {
        fs::write(
            dir.path().join("src").join(format!("{name}.c")),
            "int main(void)\n{\n\treturn 0;\n}\n",
        )
        .unwrap();
    }

    claw(dir.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("build [one]")
                .and(predicate::str::contains("build [two]")),
        );

    assert!(dir.path().join("build").join("one").join("one").exists());
    assert!(dir.path().join("build").join("two").join("two").exists());
}

#[test]
fn failed_compile_aborts_the_run() {
    if !have_cc() {
        eprintln!("cc not installed, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    write_descriptor(
        dir.path(),
        "#build broken\n#root broken.c\n}\n#build fine\n#root fine.c\n}\n",
    );
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(
        dir.path().join("src").join("broken.c"),
        "int main(void)\n{\n\treturn banana;\n}\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("src").join("fine.c"),
        "int main(void)\n{\n\treturn 0;\n}\n",
    )
    .unwrap();

    // fail fast: the second target is never attempted
    claw(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("build \"broken\" target"));

    assert!(!dir.path().join("build").join("fine").join("fine").exists());
}
