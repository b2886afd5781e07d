//! Command line parsing.
//!
//! ## Usage
//! ```bash
//! # Single price
//! sticker-quote price holographic-vinyl cut-contour 10x10 250
//!
//! # Full matrix for a configuration
//! sticker-quote price white-vinyl round 5x5
//!
//! # Quantity ladder
//! sticker-quote quantities
//!
//! # Dump the active pricing tables
//! sticker-quote tables
//! ```

use sticker_core::PricingQuery;

pub const USAGE: &str = "\
Usage:
  sticker-quote price <material> <shape> <size> [quantity]
  sticker-quote quantities
  sticker-quote tables

Environment:
  STICKER_PRICING_TABLES  JSON pricing tables (default: standard price list)
  STICKER_LOG             log filter (default: info)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Price(PricingQuery),
    Quantities,
    Tables,
    Help,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing command")]
    MissingCommand,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected} arguments, got {got}")]
    WrongArity {
        command: String,
        expected: String,
        got: usize,
    },
}

impl Command {
    /// Parses arguments, excluding the program name.
    ///
    /// Material, shape, size and quantity are passed through as raw
    /// strings; validating them is the quote boundary's job.
    pub fn parse<I, S>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        let (command, rest) = args.split_first().ok_or(UsageError::MissingCommand)?;

        match command.as_str() {
            "price" => match rest {
                [material, shape, size] => Ok(Command::Price(PricingQuery::new(material, shape, size, None))),
                [material, shape, size, quantity] => Ok(Command::Price(PricingQuery::new(
                    material,
                    shape,
                    size,
                    Some(quantity.as_str()),
                ))),
                _ => Err(UsageError::WrongArity {
                    command: "price".to_string(),
                    expected: "3 or 4".to_string(),
                    got: rest.len(),
                }),
            },
            "quantities" | "tables" if !rest.is_empty() => Err(UsageError::WrongArity {
                command: command.clone(),
                expected: "0".to_string(),
                got: rest.len(),
            }),
            "quantities" => Ok(Command::Quantities),
            "tables" => Ok(Command::Tables),
            "help" | "--help" | "-h" => Ok(Command::Help),
            other => Err(UsageError::UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        let cmd = Command::parse(["price", "white-vinyl", "round", "5x5", "100"]).unwrap();
        assert_eq!(
            cmd,
            Command::Price(PricingQuery::new("white-vinyl", "round", "5x5", Some("100")))
        );

        let cmd = Command::parse(["price", "white-vinyl", "round", "5x5"]).unwrap();
        assert_eq!(cmd, Command::Price(PricingQuery::new("white-vinyl", "round", "5x5", None)));
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(Command::parse(["quantities"]).unwrap(), Command::Quantities);
        assert_eq!(Command::parse(["tables"]).unwrap(), Command::Tables);
        assert_eq!(Command::parse(["--help"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_errors() {
        let empty: [&str; 0] = [];
        assert_eq!(Command::parse(empty), Err(UsageError::MissingCommand));
        assert_eq!(
            Command::parse(["refund"]),
            Err(UsageError::UnknownCommand("refund".to_string()))
        );
        assert!(matches!(
            Command::parse(["price", "white-vinyl"]),
            Err(UsageError::WrongArity { got: 1, .. })
        ));
        assert!(matches!(
            Command::parse(["quantities", "5"]),
            Err(UsageError::WrongArity { got: 1, .. })
        ));
    }
}
