//! Terminal output.
//!
//! Status lines go to stdout, except warnings and errors which go to stderr.
//! Resource listings print one JSON document per line so they can be piped
//! into `jq`, unless `--pretty` is given.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use storefront_core::ApiUrl;
use storefront_core::models::Profile;

/// How JSON results are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsonStyle {
    /// One compact document per line.
    Lines,
    /// Indented, for reading.
    Pretty,
}

impl From<bool> for JsonStyle {
    fn from(pretty: bool) -> Self {
        if pretty { JsonStyle::Pretty } else { JsonStyle::Lines }
    }
}

impl JsonStyle {
    fn render<T: Serialize>(self, value: &T) -> Result<String> {
        Ok(match self {
            JsonStyle::Lines => serde_json::to_string(value)?,
            JsonStyle::Pretty => serde_json::to_string_pretty(value)?,
        })
    }
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a failed command with its chain of causes.
pub fn error(err: &anyhow::Error) {
    eprintln!("{} {}", "✗".red(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".dimmed(), cause);
    }
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print the account a session belongs to.
pub fn profile(profile: &Profile, api: &ApiUrl) {
    field("ID", &profile.id);
    field("Name", &profile.name);
    field("Email", &profile.email);
    if profile.is_admin {
        field("Role", "admin");
    }
    field("API", &api.to_string());
}

/// Print a single JSON value.
pub fn value<T: Serialize>(value: &T, style: JsonStyle) -> Result<()> {
    println!("{}", style.render(value)?);
    Ok(())
}

/// Print every item of a listing.
pub fn items<T: Serialize>(items: &[T], style: JsonStyle) -> Result<()> {
    for item in items {
        value(item, style)?;
    }
    Ok(())
}
