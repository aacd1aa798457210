//! Command-line arguments.
//!
//! Values are passed through as raw text so the core validates them exactly
//! as it would validate path and query parameters of an HTTP request.

use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// itemapi - validate a request against the item API and print the response
#[derive(Parser, Debug)]
#[command(name = "itemapi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Reject parameters and body fields the endpoint does not declare
    #[arg(long, global = true, env = "ITEMAPI_STRICT", value_parser = BoolishValueParser::new())]
    pub strict: bool,

    /// Maximum accepted body size in bytes
    #[arg(long, global = true, env = "ITEMAPI_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,

    /// Extra raw query string, e.g. "skip=1&limit=2"
    #[arg(long, global = true)]
    pub query: Option<String>,

    /// Pretty-print the JSON response
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// GET / - greeting, optionally by name
    Root {
        #[arg(long)]
        name: Option<String>,
    },

    /// GET /models/{model_name}
    Model { model_name: String },

    /// GET /items/{item_id}?q=
    Item {
        item_id: String,

        #[arg(long)]
        q: Option<String>,
    },

    /// POST /items - body from --body, --body-file, or stdin
    CreateItem {
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,

        #[arg(long)]
        body_file: Option<PathBuf>,
    },

    /// GET /items/ - page through the fixture list
    Items {
        #[arg(long)]
        skip: Option<String>,

        #[arg(long)]
        limit: Option<String>,
    },

    /// GET /sum?a=&b=
    Sum {
        #[arg(long)]
        a: Option<String>,

        #[arg(long)]
        b: Option<String>,
    },
}
