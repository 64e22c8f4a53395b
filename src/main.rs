use clap::{Parser, Subcommand};
use log::error;
use recipe_finder::{FinderConfig, ProviderKind, Recipe, RecipeError, RecipeFinder};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "recipe-finder")]
#[command(version)]
#[command(about = "Search recipes from Edamam, TheMealDB or the built-in samples", long_about = None)]
struct Cli {
    /// Provider to use (edamam, mealdb, static); defaults to the configured one
    #[arg(short, long, global = true)]
    provider: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search recipes by keyword
    Search {
        /// Search term
        query: Vec<String>,
    },
    /// Show the details of one recipe
    Show {
        /// Recipe id as printed by `search`
        id: String,
    },
    /// Check that the provider is reachable
    Health,
}

fn build_finder(cli: &Cli) -> Result<RecipeFinder, RecipeError> {
    let config = FinderConfig::load()?;
    let mut builder = RecipeFinder::builder().config(config);
    if let Some(name) = &cli.provider {
        builder = builder.provider(name.parse::<ProviderKind>()?);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

fn print_list(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes found");
        return;
    }
    println!(
        "Found {} recipe{}",
        recipes.len(),
        if recipes.len() == 1 { "" } else { "s" }
    );
    for recipe in recipes {
        let tags = recipe.tags();
        if tags.is_empty() {
            println!("  {}  {}", recipe.id, recipe.title);
        } else {
            println!("  {}  {} ({})", recipe.id, recipe.title, tags);
        }
    }
}

async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let finder = build_finder(cli)?;

    match &cli.command {
        Commands::Search { query } => {
            let query = query.join(" ");
            if query.trim().is_empty() {
                println!("Type a search term to find recipes");
                return Ok(());
            }
            let recipes = finder.search_recipes(&query).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&recipes)?);
            } else {
                print_list(&recipes);
            }
        }
        Commands::Show { id } => {
            let recipe = finder.get_recipe(id).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&recipe)?);
            } else {
                print!("{}", recipe.to_text());
            }
        }
        Commands::Health => {
            if finder.check_health().await {
                println!("{} is reachable", finder.provider_name());
            } else {
                return Err(format!("{} is not reachable", finder.provider_name()).into());
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            match e.downcast_ref::<RecipeError>() {
                Some(err) => eprintln!("{}", err.user_message()),
                None => eprintln!("Error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}
