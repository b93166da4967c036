//! User-configured commands
//!
//! Commands launch external tools from the editor. The project stores them
//! so that a team can share the same set of commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::key_value::{to_object, KeyValueEntry, KeyValueMap};

fn default_true() -> bool {
    true
}

/// A command that can be executed from the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    /// Arguments passed to the executable
    #[serde(default)]
    pub arguments: String,

    /// Whether the command is offered in menus
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Program to run
    #[serde(default)]
    pub executable: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Save the current map before running
    #[serde(default = "default_true")]
    pub save_before_execute: bool,

    /// Keyboard shortcut in portable text form (e.g. "Ctrl+R")
    #[serde(default)]
    pub shortcut: String,

    /// Show the process output in the console
    #[serde(default = "default_true")]
    pub show_output: bool,

    /// Directory the command runs in
    #[serde(default)]
    pub working_directory: String,
}

impl Default for Command {
    fn default() -> Self {
        Self {
            arguments: String::new(),
            enabled: true,
            executable: String::new(),
            name: String::new(),
            save_before_execute: true,
            shortcut: String::new(),
            show_output: true,
            working_directory: String::new(),
        }
    }
}

impl Command {
    /// Create an enabled command with default options
    pub fn new(name: impl Into<String>, executable: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            executable: executable.into(),
            ..Self::default()
        }
    }

    /// Set the arguments
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }
}

impl KeyValueEntry for Command {
    fn to_key_value_map(&self) -> KeyValueMap {
        to_object(self)
    }

    fn from_key_value_map(map: &KeyValueMap) -> serde_json::Result<Self> {
        let mut command: Command = serde_json::from_value(Value::Object(map.clone()))?;

        // Older files store the whole command line in a single field
        if !map.contains_key("executable") {
            if let Some(line) = map.get("command").and_then(Value::as_str) {
                let (executable, arguments) = split_command_line(line);
                command.executable = executable;
                command.arguments = arguments;
            }
        }

        Ok(command)
    }
}

/// Split a command line into the executable and the remaining arguments.
///
/// A double-quoted first token may contain spaces.
fn split_command_line(line: &str) -> (String, String) {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix('"') {
        if let Some(end) = rest.find('"') {
            let executable = &rest[..end];
            let arguments = rest[end + 1..].trim_start();
            return (executable.to_string(), arguments.to_string());
        }
    }

    match line.find(char::is_whitespace) {
        Some(pos) => (
            line[..pos].to_string(),
            line[pos..].trim_start().to_string(),
        ),
        None => (line.to_string(), String::new()),
    }
}
