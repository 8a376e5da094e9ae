use assert_cmd::Command;
use tempfile::TempDir;

/// Script-mode `finbro` command rooted in an isolated home directory.
pub fn finbro(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("finbro").expect("finbro binary builds");
    cmd.env("FINBRO_HOME", home.path())
        .env("FINBRO_CLI_SCRIPT", "1")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}
