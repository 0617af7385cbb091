//! Interactive command loop over any line-oriented input.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_infra::{ProductRepository, ServiceError};

use crate::messages::{PRODUCT_NOT_PRESENT, describe_error};
use crate::render::{describe_product, render_table};
use crate::session::AdminSession;
use crate::types::{SearchOutcome, StatusMessage};

const HELP: &str = "\
Commands:
  list                 show all products
  search <term>        select the first product whose name contains <term>
  select <row>         select a product by row number
  add-stock [amount]   add to the selected product's quantity
  delete               delete the selected product
  add                  add a new product
  help                 show this help
  quit                 leave the shell";

/// A line typed at the shell prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Search(String),
    Select(usize),
    AddStock(Option<String>),
    Delete,
    Add,
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("unknown command {0:?}; type `help` for the list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for ShellCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word.to_lowercase().as_str() {
            "list" | "ls" => Ok(ShellCommand::List),
            "search" | "find" => Ok(ShellCommand::Search(rest.to_string())),
            "select" => rest
                .parse()
                .map(ShellCommand::Select)
                .map_err(|_| ParseCommandError::Usage("select <row>")),
            "add-stock" => Ok(ShellCommand::AddStock(
                (!rest.is_empty()).then(|| rest.to_string()),
            )),
            "delete" => Ok(ShellCommand::Delete),
            "add" => Ok(ShellCommand::Add),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            _ => Err(ParseCommandError::Unknown(word.to_string())),
        }
    }
}

/// Prompt-driven front end for an [`AdminSession`].
#[derive(Debug)]
pub struct Shell<I, O> {
    input: I,
    output: O,
}

impl<I, O> Shell<I, O>
where
    I: BufRead,
    O: Write,
{
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Read and execute commands until `quit` or end of input.
    pub fn run<R>(&mut self, session: &mut AdminSession<R>) -> io::Result<()>
    where
        R: ProductRepository,
    {
        writeln!(self.output, "Product Management System (type `help` for commands)")?;
        write!(self.output, "{}", render_table(session.products(), session.selected()))?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<ShellCommand>() {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.execute(session, command)?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
        Ok(())
    }

    fn execute<R>(&mut self, session: &mut AdminSession<R>, command: ShellCommand) -> io::Result<()>
    where
        R: ProductRepository,
    {
        match command {
            ShellCommand::List => {
                write!(self.output, "{}", render_table(session.products(), session.selected()))
            }
            ShellCommand::Search(term) => match session.search(&term) {
                SearchOutcome::Found { index, product } => {
                    writeln!(self.output, "Selected {}", describe_product(index, &product))
                }
                SearchOutcome::NotFound { .. } => {
                    writeln!(self.output, "{PRODUCT_NOT_PRESENT}")?;
                    if self.confirm("Do you want to add it?")? {
                        self.add_product(session)?;
                    }
                    Ok(())
                }
            },
            ShellCommand::Select(index) => {
                let line = match session.select(index) {
                    Ok(product) => format!("Selected {}", describe_product(index, product)),
                    Err(err) => format!("Error: {}", describe_error(&err)),
                };
                writeln!(self.output, "{line}")
            }
            ShellCommand::AddStock(amount) => {
                if session.selected().is_none() {
                    return self.report(Err(DomainError::NoSelection.into()));
                }
                // An empty answer is an invalid amount; only end of input cancels.
                let amount = match amount {
                    Some(amount) => Some(amount),
                    None => self.ask("Enter the quantity to add:")?,
                };
                match amount {
                    Some(amount) => self.report(session.add_stock(&amount)),
                    None => Ok(()),
                }
            }
            ShellCommand::Delete => {
                if session.selected().is_none() {
                    return self.report(Err(DomainError::NoSelection.into()));
                }
                if self.confirm("Are you sure you want to delete this product?")? {
                    self.report(session.delete_stock())?;
                }
                Ok(())
            }
            ShellCommand::Add => self.add_product(session),
            ShellCommand::Help => writeln!(self.output, "{HELP}"),
            ShellCommand::Quit => Ok(()),
        }
    }

    /// Walk through the name/price/quantity prompts. An empty answer cancels.
    fn add_product<R>(&mut self, session: &mut AdminSession<R>) -> io::Result<()>
    where
        R: ProductRepository,
    {
        let Some(name) = self.prompt("Enter the product name:")? else {
            return Ok(());
        };
        let Some(price) = self.prompt("Enter the price per unit (Rs):")? else {
            return Ok(());
        };
        let Some(quantity) = self.prompt("Enter the initial quantity:")? else {
            return Ok(());
        };
        self.report(session.add_product(&name, &price, &quantity))
    }

    fn report(&mut self, result: Result<StatusMessage, ServiceError>) -> io::Result<()> {
        match result {
            Ok(status) => writeln!(self.output, "{status}"),
            Err(err) => {
                tracing::debug!(error = %err, kind = ?err.kind(), "operation failed");
                writeln!(self.output, "Error: {}", describe_error(&err))
            }
        }
    }

    /// Ask `question` and return the trimmed answer; `None` at end of input.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question} ")?;
        self.output.flush()?;
        Ok(self.read_line()?.map(|answer| answer.trim().to_string()))
    }

    /// Like [`Self::ask`], but an empty answer is also `None`.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        Ok(self.ask(question)?.filter(|answer| !answer.is_empty()))
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.prompt(&format!("{question} [y/N]"))?;
        Ok(matches!(
            answer.as_deref().map(str::to_lowercase).as_deref(),
            Some("y" | "yes")
        ))
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}
