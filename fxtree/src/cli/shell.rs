//! Interactive menu loop over a single `ComponentTree`.
//!
//! The shell owns its tree and reads one answer per line. Every tree or
//! codec error becomes a message and the loop continues; only I/O failures
//! on the shell's own input or output end the session with an error.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::cli::error::{CliError, CliResult};
use crate::codec::{export_markup, load_tree, read_markup_file, save_outline, write_outline, CodecError};
use crate::config::Settings;
use crate::domain::{Component, ComponentKind, ComponentTree, TreeError};
use crate::util::path::{expand_path, PathExt};

pub const GREETING: &str = "Welcome to counterfeit SceneBuilder.";
pub const FAREWELL: &str = "Make like a tree and leave!";

const MENU: &str = "Menu:
\tL) Load from file
\tP) Print tree
\tC) Move cursor to a child node
\tR) Move cursor to root
\tA) Add child
\tU) Cursor up (to parent)
\tE) Edit text of cursor
\tD) Delete child
\tS) Save to file
\tX) Export to FXML
\tQ) Quit";

const ASK_FILENAME: &str = "Please enter filename:";
const ASK_CHILD: &str = "Please enter number of child (starting with 1):";
const ASK_KIND: &str = "Select component type (H - HBox, V - VBox, T - TextArea, B - Button, L - Label):";
const ASK_TEXT: &str = "Please enter text:";
const ASK_INDEX: &str = "Please enter an index:";
const ASK_NEW_TEXT: &str = "Please enter new text:";
const INVALID: &str = "Invalid";

/// Outcome of one menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<R, W> {
    tree: ComponentTree,
    settings: Settings,
    /// Raw document from the last `.fxml` load; printed instead of the tree.
    loaded_markup: Option<String>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(settings: Settings, input: R, output: W) -> Self {
        Self {
            tree: ComponentTree::new(),
            settings,
            loaded_markup: None,
            input,
            output,
        }
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Loads `path` the same way the `L` command does.
    pub fn preload(&mut self, path: &Path) -> CliResult<()> {
        self.load(path)
    }

    /// Runs the menu loop until `Q` or end of input.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> CliResult<()> {
        self.say(GREETING)?;
        loop {
            if self.settings.shell.show_menu {
                self.say(MENU)?;
            }
            let prompt = format!("{} ", self.settings.shell.prompt);
            self.output
                .write_all(prompt.as_bytes())
                .and_then(|_| self.output.flush())
                .map_err(|e| CliError::io("write prompt", e))?;

            let Some(choice) = self.read_answer()? else {
                debug!("end of input");
                break;
            };
            if self.dispatch(&choice)? == Flow::Quit {
                break;
            }
        }
        self.say(FAREWELL)
    }

    /// Executes one menu letter (case-insensitive).
    #[instrument(level = "debug", skip(self))]
    pub fn dispatch(&mut self, choice: &str) -> CliResult<Flow> {
        match choice.trim().to_ascii_uppercase().as_str() {
            "L" => self.load_command(),
            "P" => self.print_command(),
            "C" => self.child_command(),
            "R" => {
                self.tree.cursor_to_root();
                self.say("Cursor is at root.")?;
                Ok(Flow::Continue)
            }
            "A" => self.add_command(),
            "U" => {
                if self.tree.cursor_to_parent() {
                    let message = format!("Cursor moved to {}", self.tree.cursor_node());
                    self.say(&message)?;
                } else {
                    self.say("Cursor already at root")?;
                }
                Ok(Flow::Continue)
            }
            "E" => self.edit_command(),
            "D" => self.delete_command(),
            "S" => self.save_command(),
            "X" => self.export_command(),
            "Q" => Ok(Flow::Quit),
            _ => {
                self.say("Please enter a valid choice.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn load_command(&mut self) -> CliResult<Flow> {
        let Some(answer) = self.ask(ASK_FILENAME)? else {
            return Ok(Flow::Quit);
        };
        let path = expand_path(&answer);
        self.load(&path)?;
        Ok(Flow::Continue)
    }

    fn load(&mut self, path: &Path) -> CliResult<()> {
        let loaded = if path.is_markup_file() {
            read_markup_file(path).map(|markup| self.loaded_markup = Some(markup))
        } else {
            load_tree(path).map(|tree| {
                self.tree = tree;
                self.loaded_markup = None;
            })
        };
        match loaded {
            Ok(()) => self.say(&format!("{} loaded", path.display())),
            Err(CodecError::NotFound(missing)) => {
                self.say(&format!("{} not found", missing.display()))
            }
            Err(e) => self.report(&e),
        }
    }

    fn print_command(&mut self) -> CliResult<Flow> {
        let printed = match &self.loaded_markup {
            Some(markup) => self.output.write_all(markup.as_bytes()),
            None => write_outline(&self.tree, &mut self.output),
        };
        printed.map_err(|e| CliError::io("print tree", e))?;
        Ok(Flow::Continue)
    }

    fn child_command(&mut self) -> CliResult<Flow> {
        let Some(index) = self.ask_child_number(ASK_CHILD)? else {
            return Ok(Flow::Quit);
        };
        let count = self.tree.cursor_node().child_count().unwrap_or(0);
        match index {
            Some(n) if n <= count => match self.tree.cursor_to_child(n - 1) {
                Ok(_) => {
                    let message = format!("Cursor moved to {}", self.tree.cursor_node());
                    self.say(&message)?;
                }
                Err(e) => self.report(&e)?,
            },
            _ => self.say(INVALID)?,
        }
        Ok(Flow::Continue)
    }

    fn add_command(&mut self) -> CliResult<Flow> {
        let Some(letter) = self.ask(ASK_KIND)? else {
            return Ok(Flow::Quit);
        };
        let Some(kind) = ComponentKind::from_shortcut(letter.trim()) else {
            self.say("Invalid component type")?;
            return Ok(Flow::Continue);
        };
        let text = if kind.is_control() {
            match self.ask(ASK_TEXT)? {
                Some(text) => text,
                None => return Ok(Flow::Quit),
            }
        } else {
            String::new()
        };
        let Some(index) = self.ask_child_number(ASK_INDEX)? else {
            return Ok(Flow::Quit);
        };
        let Some(n) = index else {
            self.say(INVALID)?;
            return Ok(Flow::Continue);
        };

        let added = self
            .tree
            .add_child(n - 1, Component::new(kind, text))
            .and_then(|_| self.tree.cursor_to_child(n - 1));
        match added {
            Ok(_) => self.say("Added")?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn edit_command(&mut self) -> CliResult<Flow> {
        let Some(text) = self.ask(ASK_NEW_TEXT)? else {
            return Ok(Flow::Quit);
        };
        match self.tree.set_text_at_cursor(text) {
            Ok(()) => self.say("Text edited.")?,
            Err(TreeError::InvalidOperation(reason)) => {
                debug!(%reason, "edit rejected");
                self.say("Cannot edit text")?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn delete_command(&mut self) -> CliResult<Flow> {
        let Some(index) = self.ask_child_number(ASK_CHILD)? else {
            return Ok(Flow::Quit);
        };
        let Some(n) = index else {
            self.say(INVALID)?;
            return Ok(Flow::Continue);
        };
        match self.tree.delete_child(n - 1) {
            Ok(removed) => self.say(&format!("{removed} removed"))?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn save_command(&mut self) -> CliResult<Flow> {
        let Some(answer) = self.ask(ASK_FILENAME)? else {
            return Ok(Flow::Quit);
        };
        let path = expand_path(&answer);
        match save_outline(&self.tree, &path) {
            Ok(()) => self.say(&format!("{} saved to computer", path.display()))?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn export_command(&mut self) -> CliResult<Flow> {
        let Some(answer) = self.ask(ASK_FILENAME)? else {
            return Ok(Flow::Quit);
        };
        let path = expand_path(&answer);
        let options = self.settings.markup_options();
        match export_markup(&self.tree, &options, &path) {
            Ok(()) => self.say(&format!("{} saved to computer", path.display()))?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    /// Prints `question` and returns the next line, `None` at end of input.
    fn ask(&mut self, question: &str) -> CliResult<Option<String>> {
        self.say(question)?;
        self.read_answer()
    }

    /// Asks for a 1-based number. The inner `None` means the answer was not
    /// a positive integer; the outer `None` means end of input.
    fn ask_child_number(&mut self, question: &str) -> CliResult<Option<Option<usize>>> {
        Ok(self.ask(question)?.map(|answer| {
            answer
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n >= 1)
        }))
    }

    fn read_answer(&mut self) -> CliResult<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| CliError::io("read input", e))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, message: &str) -> CliResult<()> {
        writeln!(self.output, "{message}").map_err(|e| CliError::io("write output", e))
    }

    fn report(&mut self, error: &dyn std::error::Error) -> CliResult<()> {
        warn!("{error}");
        self.say(&format!("Error: {error}"))
    }
}
