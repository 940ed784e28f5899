use assert_cmd::Command;

#[test]
fn help_exits_cleanly() {
    Command::cargo_bin("clipcast")
        .unwrap()
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn subcommand_help_exits_cleanly() {
    for subcommand in ["projects", "jobs", "templates", "workflows", "schedule"] {
        Command::cargo_bin("clipcast")
            .unwrap()
            .args([subcommand, "--help"])
            .assert()
            .success();
    }
}
