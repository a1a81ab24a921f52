//! Rolodex — address book CLI.
//!
//! # Usage
//!
//! ```text
//! rolodex [--book <path>] list [--json]
//! rolodex new [--field KIND=VALUE]...
//! rolodex show <id> [--json]
//! rolodex rm <id>
//! rolodex field add <id> <kind> <value>
//! rolodex field set <id> <index> <value>
//! rolodex field rm <id> <index>
//! rolodex search <text> | --field KIND=VALUE ...
//! rolodex kinds
//! rolodex clear
//! rolodex dump [--out <file>]
//! rolodex load <file>
//! ```

mod commands;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    book::{DumpArgs, LoadArgs},
    contact::{ListArgs, NewArgs, RmArgs, ShowArgs},
    field::FieldCommand,
    search::SearchArgs,
    Session,
};
use rolodex_core::FieldKind;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "rolodex",
    version,
    about = "Keep contacts with validated names, phones, emails, birthdays and notes",
    long_about = None,
)]
struct Cli {
    /// Address book file. Defaults to ~/.rolodex/book.json.
    #[arg(long, global = true, value_name = "PATH")]
    book: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every contact.
    List(ListArgs),

    /// Create a contact, optionally with initial fields.
    New(NewArgs),

    /// Show one contact's fields with their positions.
    Show(ShowArgs),

    /// Delete a contact.
    Rm(RmArgs),

    /// Add, edit or remove fields of a contact.
    Field {
        #[command(subcommand)]
        command: FieldCommand,
    },

    /// Free-text or per-field search.
    Search(SearchArgs),

    /// List the field kinds in registration order.
    Kinds,

    /// Remove every contact and reset ids.
    Clear,

    /// Print or write the book as a JSON document.
    Dump(DumpArgs),

    /// Replace the book with the contents of a JSON document.
    Load(LoadArgs),
}

// ---------------------------------------------------------------------------
// Shared argument types — parsed from CLI strings, convert to core types
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `FieldKind` case-insensitively.
#[derive(Debug, Clone, Copy)]
pub struct FieldKindArg(pub FieldKind);

impl FromStr for FieldKindArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .map(Self)
            .ok_or_else(|| {
                let names: Vec<&str> = FieldKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown field kind '{s}'; expected: {}", names.join(", "))
            })
    }
}

impl fmt::Display for FieldKindArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<FieldKindArg> for FieldKind {
    fn from(k: FieldKindArg) -> Self {
        k.0
    }
}

/// `KIND=VALUE` pair, e.g. `Phone=0991234567`.
#[derive(Debug, Clone)]
pub struct KindValueArg {
    pub kind: FieldKind,
    pub value: String,
}

impl FromStr for KindValueArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected KIND=VALUE, got '{s}'"))?;
        Ok(Self {
            kind: kind.parse::<FieldKindArg>()?.into(),
            value: value.to_owned(),
        })
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Kinds => {
            commands::book::kinds();
            Ok(())
        }
        // Both replace the stored book without reading it.
        Commands::Clear => commands::book::clear(&commands::resolve_book_path(cli.book)?),
        Commands::Load(args) => args.run(&commands::resolve_book_path(cli.book)?),
        command => {
            let mut session = Session::open(commands::resolve_book_path(cli.book)?)?;
            dispatch(command, &mut session)
        }
    }
}

fn dispatch(command: Commands, session: &mut Session) -> Result<()> {
    match command {
        Commands::List(args) => args.run(session),
        Commands::New(args) => args.run(session),
        Commands::Show(args) => args.run(session),
        Commands::Rm(args) => args.run(session),
        Commands::Field { command } => commands::field::run(command, session),
        Commands::Search(args) => args.run(session),
        Commands::Dump(args) => args.run(session),
        Commands::Kinds | Commands::Clear | Commands::Load(_) => {
            unreachable!("handled before the book is opened")
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_arg_is_case_insensitive() {
        let arg: FieldKindArg = "phone".parse().expect("parse");
        assert_eq!(FieldKind::from(arg), FieldKind::Phone);
        assert!("fax".parse::<FieldKindArg>().is_err());
    }

    #[test]
    fn kind_value_splits_on_first_equals() {
        let arg: KindValueArg = "Note=a=b".parse().expect("parse");
        assert_eq!(arg.kind, FieldKind::Note);
        assert_eq!(arg.value, "a=b");

        let empty: KindValueArg = "Email=".parse().expect("parse");
        assert_eq!(empty.value, "");
        assert!("Email".parse::<KindValueArg>().is_err());
    }

    #[test]
    fn cli_parses_global_book_flag() {
        let cli = Cli::try_parse_from(["rolodex", "list", "--book", "/tmp/b.json"])
            .expect("parse");
        assert_eq!(cli.book, Some(PathBuf::from("/tmp/b.json")));
    }
}
