use clap::{Parser, Subcommand};

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "tplscan")]
#[command(about = "Scan template roots into nested template trees", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan all units and print their template trees
    Scan,
    /// Scan a single unit (the app or one plugin) and print its tree
    Tree {
        /// Unit name ("app" or a configured plugin name)
        unit: String,
    },
    /// Resolve a dotted or slashed template reference within a unit
    Resolve {
        /// Unit name ("app" or a configured plugin name)
        unit: String,
        /// Reference such as `admin.users.index`
        reference: String,
    },
    /// Print configuration values
    PrintConfig,
}
