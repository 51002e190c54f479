//! Text commands typed or scanned at the terminal kiosk

use std::str::FromStr;

use thiserror::Error;

use super::controller::Command;

/// What a line of input asks the kiosk to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Type a command, or 'help' for the list.")]
    Empty,
    #[error("'{0}' needs a barcode.")]
    MissingBarcode(&'static str),
    #[error("'remove' needs a row number from the table (1, 2, ...).")]
    InvalidRow,
    #[error("Unknown command '{0}'. Type 'help' for the list.")]
    Unknown(String),
}

pub const HELP: &str = "\
patron <barcode>   find the patron
item <barcode>     add an item
remove <row>       remove a row from the table
clear              start over
checkout           check out all listed items
close              close the checkout summary
quit               leave the kiosk";

impl FromStr for Input {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let barcode = |name: &'static str| {
            if rest.is_empty() {
                Err(ParseError::MissingBarcode(name))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Err(ParseError::Empty),
            "help" | "?" => return Ok(Input::Help),
            "quit" | "exit" => return Ok(Input::Quit),
            "patron" | "p" => Command::FindPatron(barcode("patron")?),
            "item" | "i" => Command::AddItem(barcode("item")?),
            "remove" | "rm" => {
                // Rows are shown 1-based
                let row: usize = rest.parse().map_err(|_| ParseError::InvalidRow)?;
                let index = row.checked_sub(1).ok_or(ParseError::InvalidRow)?;
                Command::RemoveItem(index)
            }
            "clear" => Command::Clear,
            "checkout" | "co" => Command::Checkout,
            "close" => Command::CloseSummary,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(Input::Command(command))
    }
}
