//! Commands understood by the interactive ordering shell.

use std::str::FromStr;

use crate::application::dto::ContactDetails;
use crate::domain::entities::FoodItemId;
use crate::domain::errors::ValidationError;

pub const HELP: &str = "\
menu                         show the menu (current search applies)
search [TEXT]                filter by title; no text clears the filter
sort                         sort by price, toggling direction
info ID                      show one item
rate ID STARS                rate an item 1-5
add ID                       add one unit to the cart
remove ID                    remove one unit, dropping the line at zero
inc ID | dec ID              change quantity (never below one)
drop ID                      remove the whole line
cart                         show the cart
clear                        empty the cart
checkout [PHONE | ADDRESS | NOTE]
                             place the order; blanks use your profile
help                         show this help
quit                         leave the shell
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Menu,
    Search(String),
    Sort,
    Info(FoodItemId),
    Rate(FoodItemId, u8),
    Add(FoodItemId),
    Remove(FoodItemId),
    Increase(FoodItemId),
    Decrease(FoodItemId),
    Drop(FoodItemId),
    Cart,
    Clear,
    Checkout(ContactDetails),
    Help,
    Quit,
}

fn item_id(arg: &str) -> Result<FoodItemId, ValidationError> {
    if arg.trim().is_empty() {
        return Err(ValidationError::required("item id"));
    }
    arg.parse()
        .map_err(|_| ValidationError::invalid("item id", format!("'{arg}' is not a number")))
}

/// Parses `PHONE | ADDRESS | NOTE`; missing parts are left blank.
fn contact(arg: &str) -> ContactDetails {
    let mut parts = arg.splitn(3, '|').map(str::trim);
    let phone = parts.next().unwrap_or_default();
    let address = parts.next().unwrap_or_default();
    let note = parts.next().unwrap_or_default();
    ContactDetails::new(phone, address).with_note(note)
}

impl FromStr for ShellCommand {
    type Err = ValidationError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word.to_ascii_lowercase().as_str() {
            "menu" | "ls" => Ok(Self::Menu),
            "search" | "find" => Ok(Self::Search(rest.to_string())),
            "sort" => Ok(Self::Sort),
            "info" => item_id(rest).map(Self::Info),
            "rate" => {
                let (id, stars) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(ValidationError::required("rating"))?;
                let stars = stars.trim().parse().map_err(|_| {
                    ValidationError::invalid("rating", format!("'{}' is not a number", stars.trim()))
                })?;
                Ok(Self::Rate(item_id(id)?, stars))
            }
            "add" => item_id(rest).map(Self::Add),
            "remove" | "rm" => item_id(rest).map(Self::Remove),
            "inc" => item_id(rest).map(Self::Increase),
            "dec" => item_id(rest).map(Self::Decrease),
            "drop" => item_id(rest).map(Self::Drop),
            "cart" => Ok(Self::Cart),
            "clear" => Ok(Self::Clear),
            "checkout" | "pay" => Ok(Self::Checkout(contact(rest))),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(ValidationError::invalid(
                "command",
                format!("unknown command '{other}', try 'help'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("menu", ShellCommand::Menu ; "menu")]
    #[test_case("  ADD 3 ", ShellCommand::Add(FoodItemId(3)) ; "case and padding")]
    #[test_case("rm 4", ShellCommand::Remove(FoodItemId(4)) ; "alias")]
    #[test_case("rate 2 5", ShellCommand::Rate(FoodItemId(2), 5) ; "rate")]
    #[test_case("search pho bo", ShellCommand::Search("pho bo".to_string()) ; "search keeps spaces")]
    #[test_case("search", ShellCommand::Search(String::new()) ; "search clears")]
    #[test_case("q", ShellCommand::Quit ; "quit")]
    fn test_parse(line: &str, expected: ShellCommand) {
        assert_eq!(line.parse::<ShellCommand>().unwrap(), expected);
    }

    #[test]
    fn test_checkout_contact_parts() {
        let command: ShellCommand = "checkout 0901234567 | 1 Market St | ring twice".parse().unwrap();

        assert_eq!(
            command,
            ShellCommand::Checkout(
                ContactDetails::new("0901234567", "1 Market St").with_note("ring twice")
            )
        );
    }

    #[test]
    fn test_checkout_without_contact() {
        let command: ShellCommand = "checkout".parse().unwrap();
        assert_eq!(command, ShellCommand::Checkout(ContactDetails::default()));
    }

    #[test_case("add" ; "missing id")]
    #[test_case("add pho" ; "not a number")]
    #[test_case("rate 2" ; "missing stars")]
    #[test_case("dance" ; "unknown")]
    fn test_parse_rejects(line: &str) {
        assert!(line.parse::<ShellCommand>().is_err());
    }
}
