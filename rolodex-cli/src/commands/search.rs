//! `rolodex search <text>` and `rolodex search --field KIND=VALUE ...`

use anyhow::Result;
use clap::Args;

use rolodex_core::SearchCriteria;

use super::{print_contacts, Session};
use crate::KindValueArg;

/// Arguments for `rolodex search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Substring looked up in every field of every contact.
    #[arg(conflicts_with = "fields")]
    pub text: Option<String>,

    /// Per-kind substring; all must match. Empty values are ignored.
    #[arg(long = "field", short = 'f', value_name = "KIND=VALUE")]
    pub fields: Vec<KindValueArg>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    pub fn run(self, session: &Session) -> Result<()> {
        let hits = match self.text.as_deref().filter(|text| !text.is_empty()) {
            Some(text) => session.book.str_search(text),
            None => session.book.multi_search(&criteria(&self.fields)),
        };
        print_contacts(hits, self.json)
    }
}

/// Builds the structured query, dropping blank values. A repeated kind keeps
/// its last value.
fn criteria(fields: &[KindValueArg]) -> SearchCriteria {
    fields
        .iter()
        .filter(|arg| !arg.value.is_empty())
        .map(|arg| (arg.kind, arg.value.clone()))
        .collect()
}
