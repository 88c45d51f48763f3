//! Console command registration
//!
//! The program cache exposes named actions (currently only the shader
//! reload) to an external console. The console owns dispatch; the cache only
//! declares its commands through `CommandRegistrar` and runs them through
//! `RenderProgManager::execute_command`.

use bitflags::bitflags;
use rustc_hash::FxHashMap;

bitflags! {
    /// Command categories, used by consoles for filtering and completion
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CommandFlags: u32 {
        const SYSTEM   = 1 << 0;
        const RENDERER = 1 << 1;
        const SOUND    = 1 << 2;
        const GAME     = 1 << 3;
        const TOOL     = 1 << 4;
        const CHEAT    = 1 << 5;
    }
}

/// External command console collaborator
pub trait CommandRegistrar {
    /// Declare a command
    ///
    /// # Arguments
    ///
    /// * `name` - Console name (matched case-insensitively)
    /// * `flags` - Command categories
    /// * `description` - One-line help text
    fn add_command(&mut self, name: &str, flags: CommandFlags, description: &str);
}

/// A registered command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub flags: CommandFlags,
    pub description: String,
}

/// Simple in-memory registrar
///
/// Keeps the declared commands so a console (or a test) can list and look
/// them up. Registering a name twice replaces the first entry.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: Vec<CommandInfo>,
    by_name: FxHashMap<String, usize>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command by name, ignoring ASCII case
    pub fn get(&self, name: &str) -> Option<&CommandInfo> {
        self.by_name.get(&name.to_ascii_lowercase()).map(|&i| &self.commands[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Commands in registration order
    pub fn iter(&self) -> impl Iterator<Item = &CommandInfo> {
        self.commands.iter()
    }

    /// Commands carrying any of `flags`
    pub fn with_flags(&self, flags: CommandFlags) -> impl Iterator<Item = &CommandInfo> {
        self.commands.iter().filter(move |info| info.flags.intersects(flags))
    }
}

impl CommandRegistrar for CommandTable {
    fn add_command(&mut self, name: &str, flags: CommandFlags, description: &str) {
        let info = CommandInfo {
            name: name.to_string(),
            flags,
            description: description.to_string(),
        };
        match self.by_name.get(&name.to_ascii_lowercase()) {
            Some(&i) => self.commands[i] = info,
            None => {
                self.by_name.insert(name.to_ascii_lowercase(), self.commands.len());
                self.commands.push(info);
            }
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
