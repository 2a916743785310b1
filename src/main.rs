//! Menu Cart
//!
//! Line-based terminal front-end: lists the menu, keeps a cart and sends the order link.
//!
//! Use `-m` to pick the menu file, `-c` for a store configuration and `--at-hour` to pin the
//! clock.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use menu_cart::prelude::*;

/// Restaurant menu cart
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Menu file
    #[arg(short, long, default_value = "fixtures/menu.yml")]
    menu: PathBuf,

    /// Store configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretend the local hour is this value
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    at_hour: Option<u32>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Menu,
    Add(&'a str),
    Remove(&'a str),
    Cart,
    Close,
    Address(&'a str),
    Checkout,
    Status,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Option<Command<'_>> {
    let line = line.trim();

    if line.is_empty() {
        return None;
    }

    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb {
        "menu" => Command::Menu,
        "add" if !rest.is_empty() => Command::Add(rest),
        "remove" if !rest.is_empty() => Command::Remove(rest),
        "cart" => Command::Cart,
        "close" => Command::Close,
        "address" => Command::Address(rest),
        "checkout" => Command::Checkout,
        "status" => Command::Status,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line),
    };

    Some(command)
}

const HELP: &str = "\
commands:
  menu               list the menu
  add <n|name>       add one unit of a menu item
  remove <name>      remove one unit from the cart
  cart               show the cart
  close              hide the cart
  address <text>     set the delivery address
  checkout           send the order
  status             show whether the restaurant is open
  quit               leave";

type TerminalController =
    CartController<TerminalPresenter<io::Stdout>, Box<dyn Clock>, TerminalChannel<io::Stdout>>;

struct Session {
    controller: TerminalController,
    menu: Menu,
    address: String,
}

impl Session {
    fn write_menu(&self, out: &mut impl Write) -> io::Result<()> {
        let currency = self.controller.cart().currency().iso_alpha_code;

        for (idx, entry) in self.menu.iter().enumerate() {
            writeln!(out, "{:>2}. {} - {} {currency}", idx + 1, entry.name, entry.price)?;

            if let Some(description) = &entry.description {
                writeln!(out, "    {description}")?;
            }
        }

        Ok(())
    }

    fn lookup(&self, key: &str) -> Option<&MenuEntry> {
        key.parse::<usize>()
            .ok()
            .and_then(|position| self.menu.get_position(position))
            .or_else(|| self.menu.get(key))
    }

    /// Returns `false` once the user asks to leave.
    fn handle(&mut self, command: Command<'_>, out: &mut impl Write) -> io::Result<bool> {
        match command {
            Command::Menu => self.write_menu(out)?,
            Command::Add(key) => match self.lookup(key).map(MenuEntry::intent) {
                Some(intent) => {
                    if let Err(err) = self.controller.add_from_catalog(&intent) {
                        writeln!(out, "could not add {key}: {err}")?;
                    }
                }
                None => writeln!(out, "no menu item {key}")?,
            },
            Command::Remove(name) => self.controller.remove_item(name),
            Command::Cart => self.controller.open_cart(),
            Command::Close => self.controller.close_cart(),
            Command::Address(value) => {
                value.clone_into(&mut self.address);
                self.controller.address_changed(value);
            }
            Command::Checkout => match self.controller.submit_order(&self.address) {
                Ok(submitted) => writeln!(out, "{}", submitted.message)?,
                Err(
                    err @ (CheckoutError::EmptyCart
                    | CheckoutError::RestaurantClosed
                    | CheckoutError::MissingAddress),
                ) => debug!(%err, "checkout refused"),
                Err(err) => writeln!(out, "order not sent: {err}")?,
            },
            Command::Status => {
                self.controller.refresh_open_status();
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
            Command::Unknown(line) => writeln!(out, "unknown command: {line} (try help)")?,
        }

        Ok(true)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_err| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StoreConfig::default(),
    };

    let menu =
        Menu::load(&args.menu).with_context(|| format!("loading menu {}", args.menu.display()))?;

    let clock: Box<dyn Clock> = match args.at_hour {
        Some(hour) => Box::new(FixedClock(hour)),
        None => Box::new(SystemClock),
    };

    let mut session = Session {
        controller: CartController::new(
            config,
            TerminalPresenter::new(io::stdout()),
            clock,
            TerminalChannel::new(io::stdout()),
        ),
        menu,
        address: String::new(),
    };

    let mut out = io::stdout();

    session.write_menu(&mut out)?;
    session.controller.refresh_open_status();
    writeln!(out, "type help for commands")?;

    for line in io::stdin().lock().lines() {
        let line = line?;

        let Some(command) = parse_command(&line) else {
            continue;
        };

        if !session.handle(command, &mut out)? {
            break;
        }

        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(parse_command("add 2"), Some(Command::Add("2")));
        assert_eq!(
            parse_command("  add   Batata Frita "),
            Some(Command::Add("Batata Frita"))
        );
        assert_eq!(
            parse_command("address Rua 1, Maputo"),
            Some(Command::Address("Rua 1, Maputo"))
        );
        assert_eq!(parse_command("address"), Some(Command::Address("")));
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!(parse_command("checkout"), Some(Command::Checkout));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn add_without_item_is_unknown() {
        assert_eq!(parse_command("add"), Some(Command::Unknown("add")));
        assert_eq!(parse_command("dance"), Some(Command::Unknown("dance")));
    }
}
