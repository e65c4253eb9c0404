use std::path::Path;
use std::process::{Command, Output, Stdio};

const OPTIONS_BIN: &str = env!("CARGO_BIN_EXE_signpost-options");
const DEMO_BIN: &str = env!("CARGO_BIN_EXE_signpost-demo");

fn run(bin: &str, args: &[&str]) -> Output {
    let workdir = tempfile::tempdir().unwrap();
    Command::new(bin)
        .args(args)
        .current_dir(workdir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

fn program(bin: &str) -> String {
    Path::new(bin)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn options_usage() -> String {
    format!(
        "Usage: {} [OPTION]...\n\
         \x20 -h, --help         Show this listing\n\
         \x20 -n, --name=<VALUE> Greet someone\n\
         \x20 -v, --verbose      Say more\n",
        program(OPTIONS_BIN)
    )
}

// =============================================================================
// Default not-found behaviour
// =============================================================================

#[test]
fn test_no_arguments_prints_usage_and_exits_zero() {
    let output = run(OPTIONS_BIN, &[]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), options_usage());
}

#[test]
fn test_unknown_option_prints_usage_and_exits_zero() {
    let output = run(OPTIONS_BIN, &["--bogus", "positional"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), options_usage());
}

#[test]
fn test_help_route_prints_usage() {
    let output = run(OPTIONS_BIN, &["-h"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), options_usage());
}

// =============================================================================
// Matched routes
// =============================================================================

#[test]
fn test_matched_routes_run_in_registration_order() {
    let output = run(OPTIONS_BIN, &["-v", "--name", "Ann"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Hello Ann\nVerbose\n");
}

#[test]
fn test_demo_greets_and_always_runs() {
    let output = run(DEMO_BIN, &["--hello-world=Alice"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Hello Alice\n"), "{out}");
    assert!(out.contains("Always executed (view: name=value)."), "{out}");
}

#[test]
fn test_demo_help_lists_option_routes_only() {
    let output = run(DEMO_BIN, &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        format!(
            "Usage: {} [OPTION]...\n\
             \x20 -h, --help                This Help text\n\
             \x20     --hello-world=<VALUE> Hello world example\n",
            program(DEMO_BIN)
        )
    );
}
