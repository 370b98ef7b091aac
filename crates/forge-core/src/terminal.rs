//! Simulated terminal.
//!
//! Commands are dispatched on a fixed prefix against canned output; nothing
//! is executed.

/// Output of the simulated terminal for `command`.
pub fn run(command: &str) -> String {
    if command.starts_with("ls") {
        "index.js\npackage.json\nREADME.md\nsrc/".to_string()
    } else if let Some(rest) = command.strip_prefix("echo") {
        rest.strip_prefix(' ').unwrap_or(rest).to_string()
    } else if command.starts_with("pwd") {
        "/project/root".to_string()
    } else if command.starts_with("npm") {
        "Simulating npm command...\nDone.".to_string()
    } else {
        format!("Command not recognized: {command}")
    }
}
