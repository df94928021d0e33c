//! Command console
//!
//! A [`TextBuffer`] whose last line is a prompt. Submitted lines are resolved
//! against a registry of commands by case-insensitive exact name first, then
//! by unique prefix.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;

use tessera_gui::{Error, Event, Key, NamedKey, Result};

use crate::text_input::{char_len, TextBuffer, TextCursor, TextWriter};

pub const DEFAULT_PROMPT: &str = "> ";

/// Runs a command: receives the resolved command name and the argument text
pub type CommandFn = Box<dyn FnMut(&str, &str) -> String + Send>;

/// Produces completion candidates for the argument text of a command
pub type CompleteFn = Box<dyn Fn(&str, &str) -> Vec<String> + Send>;

/// Commands implemented by the console itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// List commands, or describe one
    Help,
    /// Search console output
    Find,
}

pub enum Handler {
    Builtin(Builtin),
    Custom(CommandFn),
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Builtin(builtin) => write!(f, "Builtin({builtin:?})"),
            Handler::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

pub struct Command {
    pub name: String,
    pub description: String,
    pub handler: Handler,
    pub completer: Option<CompleteFn>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("handler", &self.handler)
            .field("completer", &self.completer.is_some())
            .finish()
    }
}

impl Command {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        run: impl FnMut(&str, &str) -> String + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            handler: Handler::Custom(Box::new(run)),
            completer: None,
        }
    }

    pub fn builtin(name: &str, description: &str, builtin: Builtin) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            handler: Handler::Builtin(builtin),
            completer: None,
        }
    }

    pub fn with_completer(
        mut self,
        complete: impl Fn(&str, &str) -> Vec<String> + Send + 'static,
    ) -> Self {
        self.completer = Some(Box::new(complete));
        self
    }
}

/// Why an abbreviation did not resolve to exactly one command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("ambiguous: {}", .candidates.join(", "))]
    Ambiguous {
        abbrev: String,
        candidates: Vec<String>,
    },
}

/// Commands keyed by lowercase name
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding only `help` and `find`
    pub fn with_builtins() -> Self {
        let commands = [
            Command::builtin("help", "list commands or describe one", Builtin::Help),
            Command::builtin("find", "search console output", Builtin::Find),
        ]
        .into_iter()
        .map(|command| (command.name.to_lowercase(), command))
        .collect();
        Self { commands }
    }

    pub fn register(&mut self, command: Command) -> Result<()> {
        let key = command.name.to_lowercase();
        if self.commands.contains_key(&key) {
            return Err(Error::DuplicateCommand(command.name));
        }
        self.commands.insert(key, command);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.values().map(|c| c.name.as_str())
    }

    /// Names starting with `prefix`, ignoring case
    pub fn matching(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        self.commands
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, c)| c.name.clone())
            .collect()
    }

    /// Resolve an abbreviation to a registry key.
    ///
    /// An exact match wins even when it is also a prefix of other names.
    pub fn resolve(&self, abbrev: &str) -> std::result::Result<String, ResolveError> {
        let key = abbrev.to_lowercase();
        if self.commands.contains_key(&key) {
            return Ok(key);
        }
        let mut candidates = self
            .commands
            .range(key.clone()..)
            .take_while(|(name, _)| name.starts_with(&key));
        match (candidates.next(), candidates.next()) {
            (Some((name, _)), None) => Ok(name.clone()),
            (None, _) => Err(ResolveError::Unknown(abbrev.to_string())),
            (Some(_), Some(_)) => Err(ResolveError::Ambiguous {
                abbrev: abbrev.to_string(),
                candidates: self.matching(abbrev),
            }),
        }
    }
}

/// File access used for history persistence
pub trait FileService {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// [`FileService`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileService;

impl FileService for StdFileService {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// What a single event did to the console
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleResponse {
    pub handled: bool,
    /// Line submitted with Enter, without the prompt
    pub submitted: Option<String>,
    /// The submitted line ran a command
    pub executed: bool,
}

/// Interactive console with history, completion and a command registry
#[derive(Debug)]
pub struct CommandLine {
    pub buffer: TextBuffer,
    pub prompt: String,
    history: Vec<String>,
    history_index: usize,
    current_command: String,
    last_search: String,
    commands: CommandRegistry,
}

impl Default for CommandLine {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLine {
    /// Console with the `help` and `find` built-ins registered
    pub fn new() -> Self {
        let mut buffer = TextBuffer::new();
        buffer.multiline = false;
        buffer.force_active = true;
        buffer.set_text(DEFAULT_PROMPT, false);

        let commands = CommandRegistry::with_builtins();

        let mut console = Self {
            buffer,
            prompt: DEFAULT_PROMPT.to_string(),
            history: Vec::new(),
            history_index: 0,
            current_command: String::new(),
            last_search: String::new(),
            commands,
        };
        console.set_line_text("");
        console
    }

    pub fn register(&mut self, command: Command) -> Result<()> {
        self.commands.register(command)
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Handle for printing from another thread
    pub fn writer(&self) -> ConsoleWriter {
        ConsoleWriter {
            writer: self.buffer.writer(),
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_index(&self) -> usize {
        self.history_index
    }

    pub fn last_search(&self) -> &str {
        &self.last_search
    }

    fn prompt_len(&self) -> usize {
        char_len(&self.prompt)
    }

    /// Editable text after the prompt
    pub fn get_line_text(&self) -> String {
        let state = self.buffer.lock();
        let line = state.lines.last().map(String::as_str).unwrap_or_default();
        line.strip_prefix(self.prompt.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| line.chars().skip(self.prompt_len()).collect())
    }

    /// Replace the prompt line's text and put the cursor at its end
    pub fn set_line_text(&mut self, text: &str) {
        let line = format!("{}{}", self.prompt, text);
        let mut state = self.buffer.lock();
        let row = state.last_row();
        state.cursor = TextCursor::new(char_len(&line), row);
        state.lines[row] = line;
    }

    /// Print above the prompt line
    pub fn push_cmd_output(&mut self, text: &str) {
        self.buffer.push_text(text, 1);
        self.buffer.scroll_for_input();
    }

    /// Record a submitted line unless it repeats the previous entry
    pub fn push_history(&mut self, line: &str) {
        if self.history.last().map(String::as_str) != Some(line) {
            self.history.push(line.to_string());
        }
        self.history_index = self.history.len();
    }

    /// Echo, record and run a line. Returns true if a command ran.
    pub fn push_command(&mut self, line: &str) -> bool {
        let echo = format!("{}{}", self.prompt, line);
        self.push_cmd_output(&echo);
        if line.trim().is_empty() {
            return false;
        }
        self.push_history(line);
        self.do_command(line)
    }

    /// Resolve and run a line. Failures print an error line instead.
    pub fn do_command(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        let (abbrev, args) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, args)| (name, args.trim()));

        match self.commands.resolve(abbrev) {
            Ok(key) => {
                log::debug!("console: running '{key}' with args '{args}'");
                let output = self.run(&key, args);
                if !output.is_empty() {
                    self.push_cmd_output(&output);
                }
                true
            }
            Err(err) => {
                log::debug!("console: {err}");
                self.push_cmd_output(&err.to_string());
                false
            }
        }
    }

    fn run(&mut self, key: &str, args: &str) -> String {
        let Some(command) = self.commands.commands.get_mut(key) else {
            return String::new();
        };
        let builtin = match &mut command.handler {
            Handler::Custom(run) => return run(&command.name, args),
            Handler::Builtin(builtin) => *builtin,
        };
        match builtin {
            Builtin::Help => self.cmd_help(args),
            Builtin::Find => self.cmd_find(args),
        }
    }

    fn cmd_help(&self, args: &str) -> String {
        let describe = |c: &Command| format!("{}: {}", c.name, c.description);
        if args.is_empty() {
            return self
                .commands
                .commands
                .values()
                .map(describe)
                .collect::<Vec<_>>()
                .join("\n");
        }
        match self.commands.resolve(args) {
            Ok(key) => self.commands.get(&key).map(describe).unwrap_or_default(),
            Err(err) => err.to_string(),
        }
    }

    fn cmd_find(&mut self, args: &str) -> String {
        if !args.is_empty() {
            self.last_search = args.to_string();
        }
        if self.last_search.is_empty() {
            return "usage: find <text>".to_string();
        }
        let needle = self.last_search.to_lowercase();
        let found: Vec<String> = {
            let state = self.buffer.lock();
            let output = &state.lines[..state.last_row()];
            output
                .iter()
                .filter(|line| !line.starts_with(self.prompt.as_str()))
                .filter(|line| line.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        };
        if found.is_empty() {
            format!("no matches for '{}'", self.last_search)
        } else {
            found.join("\n")
        }
    }

    /// Completion candidates for a partially typed line.
    ///
    /// While the command name is being typed, candidates are matching command
    /// names. After it, the command's completer (if any) proposes arguments.
    pub fn complete_command(&self, line: &str) -> Vec<String> {
        let Some((abbrev, args)) = line.split_once(char::is_whitespace) else {
            return self.commands.matching(line);
        };
        let Ok(key) = self.commands.resolve(abbrev) else {
            return Vec::new();
        };
        let Some(command) = self.commands.get(&key) else {
            return Vec::new();
        };
        let args = args.trim_start();
        match (&command.handler, &command.completer) {
            (_, Some(complete)) => complete(&command.name, args),
            (Handler::Builtin(Builtin::Help), None) => self.commands.matching(args),
            _ => Vec::new(),
        }
    }

    fn tab_complete(&mut self) {
        let line = self.get_line_text();
        let candidates = self.complete_command(&line);
        let (head, typed) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (format!("{name} "), rest.trim_start()),
            None => (String::new(), line.as_str()),
        };
        match candidates.as_slice() {
            [] => {}
            [only] if head.is_empty() => self.set_line_text(&format!("{only} ")),
            [only] => self.set_line_text(&format!("{head}{only}")),
            many => {
                let prefix = common_prefix(many);
                self.push_cmd_output(&many.join("  "));
                if char_len(&prefix) > char_len(typed) {
                    self.set_line_text(&format!("{head}{prefix}"));
                }
            }
        }
    }

    fn history_step(&mut self, up: bool) {
        if up {
            if self.history_index == 0 {
                return;
            }
            if self.history_index == self.history.len() {
                self.current_command = self.get_line_text();
            }
            self.history_index -= 1;
        } else {
            if self.history_index >= self.history.len() {
                return;
            }
            self.history_index += 1;
        }
        let text = self
            .history
            .get(self.history_index)
            .cloned()
            .unwrap_or_else(|| self.current_command.clone());
        self.set_line_text(&text);
    }

    /// Keep the cursor on the prompt line, after the prompt
    fn clamp_to_prompt(&mut self) {
        let prompt_len = self.prompt_len();
        let mut state = self.buffer.lock();
        let row = state.last_row();
        let len = state.line_len(row);
        if state.cursor.row != row {
            state.cursor = TextCursor::new(len, row);
        }
        state.cursor.col = state.cursor.col.clamp(prompt_len.min(len), len);
    }

    fn at_prompt_start(&self) -> bool {
        self.buffer.cursor().col <= self.prompt_len()
    }

    pub fn handle_event(&mut self, event: &Event) -> ConsoleResponse {
        let mut response = ConsoleResponse::default();
        let Some(key) = event.key_down() else {
            let text = self.buffer.handle_event(event);
            if text.handled {
                self.clamp_to_prompt();
            }
            response.handled = text.handled;
            return response;
        };

        let editable = self.buffer.widget.active
            && !self.buffer.locked
            && (self.buffer.force_active || self.buffer.widget.hovered);
        if !editable {
            return response;
        }

        self.clamp_to_prompt();
        response.handled = true;
        match key {
            Key::Named(NamedKey::Enter) => {
                let line = self.get_line_text();
                self.set_line_text("");
                response.executed = self.push_command(&line);
                response.submitted = Some(line);
            }
            Key::Named(NamedKey::ArrowUp) => self.history_step(true),
            Key::Named(NamedKey::ArrowDown) => self.history_step(false),
            Key::Named(NamedKey::Tab) => self.tab_complete(),
            Key::Named(NamedKey::Home) => {
                let col = self.prompt_len();
                let row = self.buffer.lock().last_row();
                self.buffer.set_cursor(TextCursor::new(col, row));
            }
            Key::Named(NamedKey::Backspace | NamedKey::ArrowLeft) if self.at_prompt_start() => {}
            _ => {
                response.handled = self.buffer.handle_event(event).handled;
                self.clamp_to_prompt();
            }
        }
        self.buffer.scroll_for_input();
        response
    }

    /// Replace history with the lines of a newline-delimited file.
    ///
    /// A missing file leaves an empty history. Blank lines are skipped.
    pub fn load_history(&mut self, fs: &dyn FileService, path: &Path) -> Result<usize> {
        let contents = match fs.read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no history at {}", path.display());
                String::new()
            }
            Err(source) => {
                return Err(Error::Io {
                    op: "read",
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        self.history = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        self.history_index = self.history.len();
        log::info!(
            "loaded {} history entries from {}",
            self.history.len(),
            path.display()
        );
        Ok(self.history.len())
    }

    pub fn save_history(&self, fs: &dyn FileService, path: &Path) -> Result<()> {
        let mut contents = self.history.join("\n");
        contents.push('\n');
        fs.write(path, &contents).map_err(|source| Error::Io {
            op: "write",
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "saved {} history entries to {}",
            self.history.len(),
            path.display()
        );
        Ok(())
    }
}

/// Cloneable handle printing above a console's prompt from any thread
#[derive(Debug, Clone)]
pub struct ConsoleWriter {
    writer: TextWriter,
}

impl ConsoleWriter {
    pub fn print(&self, text: &str) {
        self.writer.push_text(text, 1);
    }
}

fn common_prefix(words: &[String]) -> String {
    let Some(first) = words.first() else {
        return String::new();
    };
    let mut len = first.len();
    for word in &words[1..] {
        len = first
            .char_indices()
            .zip(word.chars())
            .take_while(|((_, a), b)| a.eq_ignore_ascii_case(b))
            .last()
            .map_or(0, |((i, a), _)| i + a.len_utf8())
            .min(len);
    }
    first[..len].to_string()
}
