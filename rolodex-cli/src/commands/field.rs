//! `rolodex field add|set|rm` — edit one contact's fields.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use rolodex_core::{BookError, Field};

use super::{parse_id, Session};
use crate::FieldKindArg;

/// Edit the fields of a contact.
#[derive(Subcommand, Debug)]
pub enum FieldCommand {
    /// Append a field.
    Add(AddArgs),

    /// Re-validate and overwrite the value at a position (kind is kept).
    Set(SetArgs),

    /// Remove the field at a position; later fields shift down.
    Rm(RmArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Contact id.
    pub id: String,
    /// Field kind: Name | Phone | Email | Birthday | Note.
    pub kind: FieldKindArg,
    pub value: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Contact id.
    pub id: String,
    /// Field position as shown by `rolodex show`.
    pub index: String,
    pub value: String,
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Contact id.
    pub id: String,
    /// Field position as shown by `rolodex show`.
    pub index: String,
}

pub fn run(cmd: FieldCommand, session: &mut Session) -> Result<()> {
    match cmd {
        FieldCommand::Add(args) => add(args, session),
        FieldCommand::Set(args) => set(args, session),
        FieldCommand::Rm(args) => rm(args, session),
    }
}

fn add(args: AddArgs, session: &mut Session) -> Result<()> {
    let id = parse_id(&args.id)?;
    let field = Field::new(args.kind.into(), &args.value)
        .with_context(|| format!("invalid {} '{}'", args.kind, args.value))?;
    let index = session.book.get_mut(id)?.add(field);
    session.save()?;
    println!("{} Added field [{index}] to contact {id}", "✓".green());
    Ok(())
}

fn set(args: SetArgs, session: &mut Session) -> Result<()> {
    let id = parse_id(&args.id)?;
    let contact = session.book.get_mut(id)?;
    contact
        .update(args.index.as_str(), &args.value)
        .map_err(|err| {
            let context = match &err {
                BookError::Validation(invalid) => format!(
                    "invalid {} value for field [{}] of contact {id}",
                    invalid.kind(),
                    args.index.trim()
                ),
                _ => format!("cannot update field '{}' of contact {id}", args.index),
            };
            anyhow::Error::new(err).context(context)
        })?;
    session.save()?;
    println!("{} Updated field [{}] of contact {id}", "✓".green(), args.index.trim());
    Ok(())
}

fn rm(args: RmArgs, session: &mut Session) -> Result<()> {
    let id = parse_id(&args.id)?;
    let removed = session
        .book
        .get_mut(id)?
        .delete(args.index.as_str())
        .with_context(|| format!("cannot remove field '{}' of contact {id}", args.index))?;
    session.save()?;
    println!("{} Removed {removed} from contact {id}", "✓".green());
    Ok(())
}
