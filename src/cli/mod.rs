//! CLI surface for inkpost.
//!
//! Thin command tree over the draft workflow: the same editor/coordinator
//! machinery the library exposes, driven to completion per invocation.

use std::ffi::OsString;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::Result;

mod commands;
mod render;

#[derive(Parser, Debug)]
#[command(
    name = "ink",
    version,
    about = "Blog post draft editor",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Server base URL (default: from config / INKPOST_SERVER).
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Session token (default: INKPOST_TOKEN).
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Viewer username (default: INKPOST_USER).
    #[arg(long, global = true, value_name = "NAME")]
    pub user: Option<String>,

    /// Machine-readable JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Debug output (repeat for more).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new post.
    #[command(alias = "new")]
    Create(CreateArgs),

    /// Edit an existing post.
    Edit(EditArgs),

    /// Show a post.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub body: String,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Post id.
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub body: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Post id.
    pub id: String,
}

pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::parse_from(args)
}

pub fn run(cli: Cli) -> Result<()> {
    commands::run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_global_flags() {
        let cli = parse_from([
            "ink", "--server", "http://x", "--token", "t", "--user", "u", "create", "--title",
            "Hi", "--body", "World",
        ]);
        assert_eq!(cli.server.as_deref(), Some("http://x"));
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.title, "Hi");
                assert_eq!(args.body, "World");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_edit_with_optional_fields() {
        let cli = parse_from(["ink", "edit", "abc", "--title", "New"]);
        match cli.command {
            Commands::Edit(args) => {
                assert_eq!(args.id, "abc");
                assert_eq!(args.title.as_deref(), Some("New"));
                assert!(args.body.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
