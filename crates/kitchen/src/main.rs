//! `kitchen` - CLI for the family recipe box
//!
//! This binary is the presentation layer: it parses commands, calls the
//! recipe service and prints the results.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use kitchen::avatar;
use kitchen::cli::{
    AddCommand, Cli, Command, ConfigCommand, EditCommand, ListCommand, OutputFormat, ShowCommand,
    ViewMode,
};
use kitchen::render::{self, RecipeJson};
use kitchen::{init_logging, Config, Favorites, Recipe, RecipeService, Storage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Roster => {
            handle_roster();
            Ok(())
        }
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        Command::List(list_cmd) => handle_list(&config, &list_cmd).await,
        Command::Show(show_cmd) => handle_show(&config, &show_cmd).await,
        Command::Add(add_cmd) => handle_add(&config, &add_cmd).await,
        Command::Edit(edit_cmd) => handle_edit(&config, &edit_cmd).await,
        Command::Favorite(favorite_cmd) => handle_favorite(&config, &favorite_cmd.id).await,
    }
}

fn open_favorites(config: &Config) -> anyhow::Result<Favorites> {
    let storage = Storage::open(config.database_path())
        .context("failed to open the favorites database")?;
    Ok(Favorites::load(storage)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let service = RecipeService::from_config(config);
    let favorites = open_favorites(config)?;

    let mut recipes = service.list_all().await?;
    favorites.mark(&mut recipes);
    let recipes = cmd.filter().apply(recipes);

    if cmd.format == OutputFormat::Json {
        let views: Vec<RecipeJson<'_>> = recipes.iter().map(RecipeJson::from).collect();
        return print_json(&views);
    }

    if recipes.is_empty() {
        println!("No recipes found. Try adjusting your search or add a new family classic.");
        return Ok(());
    }

    match (cmd.format, cmd.view) {
        (OutputFormat::Table, _) => print!("{}", render::list(&recipes)),
        (_, ViewMode::List) => {
            for recipe in &recipes {
                println!("{}", render::line(recipe));
            }
        }
        (_, ViewMode::Grid) => {
            let cards: Vec<String> = recipes.iter().map(render::card).collect();
            print!("{}", cards.join("\n"));
        }
    }
    Ok(())
}

async fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let service = RecipeService::from_config(config);
    let favorites = open_favorites(config)?;

    let mut recipe = service.get(&cmd.id).await?;
    recipe.is_favorite = favorites.contains(&cmd.id);

    match cmd.format {
        OutputFormat::Json => print_json(&RecipeJson::from(&recipe)),
        OutputFormat::Plain | OutputFormat::Table => {
            print!("{}", render::detail(&recipe));
            Ok(())
        }
    }
}

fn print_saved(recipe: &Recipe, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&RecipeJson::from(recipe));
    }
    println!(
        "Saved {} as {}",
        recipe.title,
        recipe.id.as_deref().unwrap_or("(unsaved)")
    );
    Ok(())
}

async fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let service = RecipeService::from_config(config);
    let saved = service.add(cmd.to_draft()).await?;
    print_saved(&saved, cmd.json)
}

async fn handle_edit(config: &Config, cmd: &EditCommand) -> anyhow::Result<()> {
    let service = RecipeService::from_config(config);
    let mut recipe = service.get(&cmd.id).await?;
    cmd.apply(&mut recipe);

    let saved = service.update(recipe).await?;
    print_saved(&saved, cmd.json)
}

async fn handle_favorite(config: &Config, id: &str) -> anyhow::Result<()> {
    let service = RecipeService::from_config(config);
    let recipe = service.get(id).await?;

    let mut favorites = open_favorites(config)?;
    if favorites.toggle(id)? {
        println!("Added {} to favorites", recipe.title);
    } else {
        println!("Removed {} from favorites", recipe.title);
    }
    Ok(())
}

fn handle_roster() {
    for (name, color) in avatar::roster() {
        println!("{}  {name:<10} {color}", render::initial(name));
    }
    println!(
        "{}  {:<10} {}",
        render::initial(avatar::GUEST),
        avatar::GUEST,
        avatar::avatar_color(avatar::GUEST)
    );
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let service = RecipeService::from_config(config);
    let favorites = open_favorites(config)?;

    if json {
        let status = serde_json::json!({
            "mode": service.mode().to_string(),
            "project_id": config.remote.project_id,
            "collection": config.remote.collection,
            "database_path": config.database_path(),
            "favorites": favorites.len(),
        });
        return print_json(&status);
    }

    println!("kitchen status");
    println!("--------------");
    println!("Mode:          {}", service.mode());
    println!(
        "Remote store:  {}/{}",
        config.remote.project_id, config.remote.collection
    );
    println!("Database:      {}", config.database_path().display());
    println!("Favorites:     {}", favorites.len());
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let shown = config.redacted();
            if json {
                return print_json(&shown);
            }
            println!("Current Configuration");
            println!("=====================");
            println!();
            println!("[Remote]");
            println!(
                "  API key:            {}",
                shown.remote.api_key.as_deref().unwrap_or("(not set)")
            );
            println!("  Project:            {}", shown.remote.project_id);
            println!("  Collection:         {}", shown.remote.collection);
            println!("  Base URL:           {}", shown.remote.base_url);
            println!();
            println!("[Demo]");
            println!("  Read latency (ms):  {}", shown.demo.read_latency_ms);
            println!("  Write latency (ms): {}", shown.demo.write_latency_ms);
            println!();
            println!("[Storage]");
            println!("  Database path:      {}", shown.database_path().display());
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
