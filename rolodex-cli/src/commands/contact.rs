//! `rolodex list`, `rolodex new`, `rolodex show <id>`, `rolodex rm <id>`

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use rolodex_core::{Contact, ContactId, Field, FieldKind};

use super::{parse_id, print_contacts, Session};
use crate::KindValueArg;

/// Arguments for `rolodex list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn run(self, session: &Session) -> Result<()> {
        print_contacts(session.book.iter(), self.json)
    }
}

/// Arguments for `rolodex new`.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Initial field, repeatable (e.g. --field Name=Alice --field Phone=0991234567).
    #[arg(long = "field", short = 'f', value_name = "KIND=VALUE")]
    pub fields: Vec<KindValueArg>,
}

impl NewArgs {
    pub fn run(self, session: &mut Session) -> Result<()> {
        let mut contact = Contact::new();
        for arg in &self.fields {
            let field = Field::new(arg.kind, &arg.value)
                .with_context(|| format!("invalid {} '{}'", arg.kind, arg.value))?;
            contact.add(field);
        }

        let id = session.book.add(contact);
        session.save()?;
        println!("{} Created contact {}", "✓".green(), id);
        Ok(())
    }
}

/// Arguments for `rolodex show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Contact id.
    pub id: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct FieldJson<'a> {
    index: usize,
    kind: FieldKind,
    value: &'a str,
}

#[derive(Serialize)]
struct ContactJson<'a> {
    id: ContactId,
    name: String,
    fields: Vec<FieldJson<'a>>,
}

impl ShowArgs {
    pub fn run(self, session: &Session) -> Result<()> {
        let id = parse_id(&self.id)?;
        let contact = session.book.get(id)?;

        if self.json {
            let view = ContactJson {
                id,
                name: contact.display_name(),
                fields: contact
                    .iter()
                    .map(|(index, field)| FieldJson {
                        index,
                        kind: field.kind(),
                        value: field.value(),
                    })
                    .collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&view).context("failed to serialize contact")?
            );
            return Ok(());
        }

        println!("{} {}", format!("#{id}").bold(), contact);
        if contact.is_empty() {
            println!("  (no fields)");
        }
        for (index, field) in contact.iter() {
            match field.phone_number() {
                Some(phone) => println!(
                    "  [{index}] {field}  {}",
                    format!(
                        "(country {}, operator {})",
                        phone.country_code, phone.operator_code
                    )
                    .dimmed()
                ),
                None => println!("  [{index}] {field}"),
            }
        }
        Ok(())
    }
}

/// Arguments for `rolodex rm`.
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Contact id.
    pub id: String,
}

impl RmArgs {
    pub fn run(self, session: &mut Session) -> Result<()> {
        let removed = session
            .book
            .delete(self.id.as_str())
            .with_context(|| format!("cannot delete contact '{}'", self.id))?;
        session.save()?;
        println!("{} Deleted contact {} ({})", "✓".green(), self.id.trim(), removed);
        Ok(())
    }
}
