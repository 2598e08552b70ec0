//! The interactive console driver behind the `bstree` binary.
//!
//! It loads an initial set of keys from a file, then reads single letter
//! commands and operates on a [`Tree`]. The [`Session`] is generic over
//! its input and output so it can be driven from in-memory buffers.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt::{self, Display};
use std::fs;
use std::io::{self, BufRead, Write};
use std::num::ParseFloatError;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Parser, ValueEnum};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{Tree, TreeError};

/// Exit code for an input file that can't be read (sysexits `EX_NOINPUT`).
pub const EX_NOINPUT: i32 = 66;
/// Exit code for a console that can't be read or written (sysexits `EX_IOERR`).
pub const EX_IOERR: i32 = 74;

const MENU: &str = "Commands:
(i) - Insert Item
(d) - Delete Item
(p) - Print Tree
(r) - Retrieve Item
(l) - Count Leaf Nodes
(s) - Find Single Parents
(c) - Find Cousins
(q) - Quit program
";

/// Interactive binary search tree
#[derive(Parser, Debug)]
#[command(name = "bstree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// File holding the initial keys, separated by whitespace
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Type of the keys. Asked for interactively when omitted
    #[arg(short, long, value_enum, env = "BSTREE_KIND")]
    pub kind: Option<KeyKind>,

    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,
}

/// The key types a session can be run with.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Signed integers.
    Int,
    /// Floating point numbers.
    Float,
    /// Arbitrary words.
    Text,
}

impl KeyKind {
    /// Maps the answer to the interactive type prompt (`i`, `d` or `s`).
    fn from_answer(answer: &str) -> Option<Self> {
        match answer.to_ascii_lowercase().as_str() {
            "i" => Some(KeyKind::Int),
            "d" => Some(KeyKind::Float),
            "s" => Some(KeyKind::Text),
            _ => None,
        }
    }
}

/// Driver errors. These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    /// The initial key file couldn't be read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// The file that was asked for.
        path: PathBuf,
        /// Why reading failed.
        #[source]
        source: io::Error,
    },

    /// Reading a command or writing a response failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Result type for driver operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Read { .. } => EX_NOINPUT,
            CliError::Io(_) => EX_IOERR,
        }
    }
}

/// A floating point key. `f64` is only partially ordered, so keys are
/// compared with [`f64::total_cmp`] which gives every value (NaNs and
/// signed zeroes included) a place in a total order.
#[derive(Debug, Clone, Copy)]
pub struct Real(pub f64);

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Real {}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl FromStr for Real {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Real)
    }
}

impl Display for Real {
    // `{:?}` keeps the trailing `.0` on whole numbers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Insert,
    Delete,
    Print,
    Retrieve,
    Leaves,
    SingleParents,
    Cousins,
    Quit,
}

impl Command {
    fn parse(word: &str) -> Option<Self> {
        let command = match word.to_ascii_lowercase().as_str() {
            "i" => Command::Insert,
            "d" => Command::Delete,
            "p" => Command::Print,
            "r" => Command::Retrieve,
            "l" => Command::Leaves,
            "s" => Command::SingleParents,
            "c" => Command::Cousins,
            "q" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

impl Cli {
    /// Loads the key file, settles on a key type and runs a session on the
    /// process's stdin and stdout until the user quits.
    pub fn run(self) -> CliResult<()> {
        let initial = match &self.file {
            Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?,
            None => {
                warn!("no input file given, starting with an empty tree");
                String::new()
            }
        };

        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut session = Session::new(stdin.lock(), stdout.lock());

        let kind = match self.kind {
            Some(kind) => kind,
            None => match session.ask_kind()? {
                Some(kind) => kind,
                None => return Ok(()),
            },
        };
        info!(?kind, "starting session");

        match kind {
            KeyKind::Int => session.run::<i64>(&initial),
            KeyKind::Float => session.run::<Real>(&initial),
            KeyKind::Text => session.run::<String>(&initial),
        }
    }
}

/// One interactive conversation: whitespace separated words are read from
/// `input` and everything meant for the user goes to `output`.
pub struct Session<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R, W> Session<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Creates a session reading from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    /// Gives back the output, e.g. to inspect what a test session printed.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prompts for the key type until a valid answer is given. Returns
    /// `None` if the input ends first.
    pub fn ask_kind(&mut self) -> CliResult<Option<KeyKind>> {
        loop {
            self.prompt("Enter list type (i - int, d - double, s - string): ")?;
            let Some(answer) = self.next_word()? else {
                return Ok(None);
            };
            if let Some(kind) = KeyKind::from_answer(&answer) {
                return Ok(Some(kind));
            }
            writeln!(self.output, "Invalid type, please try again.")?;
        }
    }

    /// Loads `initial` into a fresh tree of `K`s and serves commands until
    /// `q` or the end of the input.
    pub fn run<K>(&mut self, initial: &str) -> CliResult<()>
    where
        K: Ord + FromStr + Display,
    {
        let mut tree: Tree<K> = Tree::new();
        self.load(&mut tree, initial)?;
        writeln!(self.output, "{MENU}")?;

        loop {
            self.prompt("Enter a command: ")?;
            let Some(word) = self.next_word()? else {
                debug!("input closed");
                return Ok(());
            };
            match Command::parse(&word) {
                Some(command) => {
                    if self.execute(&mut tree, command)?.is_break() {
                        return Ok(());
                    }
                }
                None => writeln!(self.output, "Invalid command! Please try again.")?,
            }
        }
    }

    fn load<K>(&mut self, tree: &mut Tree<K>, initial: &str) -> CliResult<()>
    where
        K: Ord + FromStr,
    {
        for token in initial.split_whitespace() {
            match token.parse::<K>() {
                Ok(key) => {
                    if tree.insert(key).is_err() {
                        writeln!(self.output, "The item already exists in the tree.")?;
                    }
                }
                Err(_) => {
                    warn!(token, "skipping unparsable key");
                    writeln!(self.output, "Something wrong with the input format: {token}")?;
                }
            }
        }
        info!(keys = tree.len(), "loaded initial keys");
        Ok(())
    }

    /// Runs one command. Breaks once the user asks to quit.
    fn execute<K>(&mut self, tree: &mut Tree<K>, command: Command) -> CliResult<ControlFlow<()>>
    where
        K: Ord + FromStr + Display,
    {
        debug!(?command, "executing");
        match command {
            Command::Insert => {
                self.print_tree(tree)?;
                if let Some(key) = self.read_key::<K>("Enter a number to insert: ")? {
                    if let Err(TreeError::DuplicateKey) = tree.insert(key) {
                        writeln!(self.output, "The item already exists in the tree.")?;
                    }
                    self.print_tree(tree)?;
                }
            }
            Command::Delete => {
                self.print_tree(tree)?;
                if let Some(key) = self.read_key::<K>("Enter a number to delete: ")? {
                    match tree.delete(&key) {
                        Ok(_) => {}
                        Err(TreeError::EmptyTree) => {
                            writeln!(self.output, "You cannot delete from an empty tree")?
                        }
                        Err(_) => writeln!(self.output, "The item is not present in the tree")?,
                    }
                    self.print_tree(tree)?;
                }
            }
            Command::Print => self.print_tree(tree)?,
            Command::Retrieve => {
                self.print_tree(tree)?;
                if let Some(key) = self.read_key::<K>("Enter a number to search: ")? {
                    if tree.retrieve(&key) {
                        writeln!(self.output, "Item is present in the tree")?;
                    } else {
                        writeln!(self.output, "Item is not present in the tree")?;
                    }
                }
            }
            Command::Leaves => writeln!(
                self.output,
                "The number of leaf nodes are {}",
                tree.count_leaf_nodes()
            )?,
            Command::SingleParents => {
                write!(self.output, "Single Parents: ")?;
                self.write_keys(tree.single_parent_keys())?;
            }
            Command::Cousins => {
                self.print_tree(tree)?;
                if let Some(key) = self.read_key::<K>("Enter a number: ")? {
                    match tree.find_cousins(&key) {
                        Ok(cousins) => {
                            write!(self.output, "{key} cousins: ")?;
                            self.write_keys(cousins)?;
                        }
                        Err(TreeError::EmptyTree) => writeln!(self.output, "The tree is empty")?,
                        Err(_) => writeln!(self.output, "The item is not present in the tree")?,
                    }
                }
            }
            Command::Quit => {
                debug!("quit requested");
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn print_tree<K: Display>(&mut self, tree: &Tree<K>) -> CliResult<()> {
        write!(self.output, "In-order: ")?;
        self.write_keys(tree.iter())
    }

    /// Writes each key followed by a space, then ends the line.
    fn write_keys<'a, K, I>(&mut self, keys: I) -> CliResult<()>
    where
        K: Display + 'a,
        I: IntoIterator<Item = &'a K>,
    {
        for key in keys {
            write!(self.output, "{key} ")?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Prompts for and parses one key. An unparsable answer is reported,
    /// the rest of its line is dropped, and `None` is returned; so is the
    /// end of the input.
    fn read_key<K: FromStr>(&mut self, prompt: &str) -> CliResult<Option<K>> {
        self.prompt(prompt)?;
        let Some(word) = self.next_word()? else {
            return Ok(None);
        };
        match word.parse() {
            Ok(key) => Ok(Some(key)),
            Err(_) => {
                debug!(%word, "rejected operand");
                self.pending.clear();
                writeln!(self.output, "Invalid input. Please try again.")?;
                Ok(None)
            }
        }
    }

    fn prompt(&mut self, prompt: &str) -> CliResult<()> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        Ok(())
    }

    /// The next whitespace separated word, reading more lines as needed.
    fn next_word(&mut self) -> CliResult<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }
}
