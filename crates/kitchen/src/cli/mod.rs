//! Command-line interface for kitchen.
//!
//! This module provides the CLI structure for the `kitchen` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, CategoryArg, ConfigCommand, EditCommand, FavoriteCommand, ListCommand,
    OutputFormat, RecipeDetails, ShowCommand, StatusCommand, ViewMode,
};

/// kitchen - The family recipe box
///
/// Browse, search, add and edit family recipes. Without a valid API key
/// the catalog runs on built-in example recipes.
#[derive(Debug, Parser)]
#[command(name = "kitchen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse recipes
    List(ListCommand),

    /// Show one recipe, print-friendly
    Show(ShowCommand),

    /// Add a new recipe
    Add(AddCommand),

    /// Edit an existing recipe
    Edit(EditCommand),

    /// Star or unstar a recipe
    Favorite(FavoriteCommand),

    /// List family members and their colors
    Roster,

    /// Show which store is in use
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "kitchen");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["kitchen", "roster"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["kitchen", "-v", "roster"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["kitchen", "-vv", "roster"]).verbosity(), Verbosity::Trace);
        assert_eq!(parse(&["kitchen", "-q", "roster"]).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = parse(&["kitchen", "list"]);
        let Command::List(cmd) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(cmd.view, ViewMode::Grid);
        assert_eq!(cmd.format, OutputFormat::Plain);
        assert!(cmd.category.is_none());
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = parse(&[
            "kitchen",
            "list",
            "--category",
            "soups-salads",
            "-s",
            "pasta",
            "--view",
            "list",
        ]);
        let Command::List(cmd) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(cmd.category, Some(CategoryArg::SoupsSalads));
        assert_eq!(cmd.search.as_deref(), Some("pasta"));
        assert_eq!(cmd.view, ViewMode::List);
    }

    #[test]
    fn test_list_category_conflicts_with_favorites() {
        let result = Cli::try_parse_from(["kitchen", "list", "--favorites", "--category", "breads"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_add() {
        let cli = parse(&[
            "kitchen", "add", "-t", "Test Pie", "-i", "1 crust", "-i", "3 apples", "-s",
            "Bake.", "-a", "Wade", "--cook-time", "1h",
        ]);
        let Command::Add(cmd) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(cmd.ingredients.len(), 2);
        assert_eq!(cmd.category, CategoryArg::MainDishes);
        assert_eq!(cmd.details.cook_time.as_deref(), Some("1h"));
    }

    #[test]
    fn test_parse_add_requires_ingredients() {
        let result = Cli::try_parse_from(["kitchen", "add", "-t", "Test Pie", "-s", "Bake."]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_add_default_contributor() {
        let cli = parse(&["kitchen", "add", "-t", "Pie", "-i", "crust", "-s", "Bake."]);
        let Command::Add(cmd) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(cmd.added_by, "Nan");
    }

    #[test]
    fn test_parse_edit() {
        let cli = parse(&["kitchen", "edit", "demo-1", "--category", "desserts"]);
        let Command::Edit(cmd) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(cmd.id, "demo-1");
        assert_eq!(cmd.category, Some(CategoryArg::Desserts));
        assert!(cmd.ingredients.is_empty());
    }

    #[test]
    fn test_parse_show_and_favorite() {
        assert!(matches!(
            parse(&["kitchen", "show", "demo-0", "-f", "json"]).command,
            Command::Show(ShowCommand {
                format: OutputFormat::Json,
                ..
            })
        ));
        assert!(matches!(
            parse(&["kitchen", "favorite", "demo-0"]).command,
            Command::Favorite(_)
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["kitchen", "-c", "/custom/config.toml", "status"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Status(_)));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["kitchen", "config", "validate", "-f", "other.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
