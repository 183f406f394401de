use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use estate_scout::api::types::DEFAULT_BASE_URL;
use estate_scout::api::{ApiConfig, HttpPropertyApi, PropertyApi};
use estate_scout::filter::{FilterWarning, PropertyFilter};
use estate_scout::format::{format_area, format_price, format_price_per_sq_ft, property_type_display};
use estate_scout::models::{NearbyPlace, Property};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "estate-scout")]
#[command(about = "Search and browse city property listings", long_about = None)]
struct Cli {
    /// Backend origin serving /api/properties
    #[arg(long, env = "ESTATE_SCOUT_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "ESTATE_SCOUT_TIMEOUT_SECS", default_value_t = 30, global = true)]
    timeout_secs: u64,

    /// Cookie header value for the logged-in session
    #[arg(long, env = "ESTATE_SCOUT_SESSION_COOKIE", hide_env_values = true, global = true)]
    session_cookie: Option<String>,

    /// Also write the raw JSON result to this file
    #[arg(long, global = true)]
    save: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search listings
    Search(FilterArgs),
    /// List featured listings
    Featured {
        /// How many listings to request (backend default is 6)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one listing with its nearby places
    Show { id: String },
    /// List places near a listing
    Nearby { id: String },
    /// Print the search-page query string for a filter
    Encode(FilterArgs),
    /// Print the filter a search-page query string describes
    Decode { query: String },
}

#[derive(Args)]
struct FilterArgs {
    /// Search-page query string, e.g. "location=Powai&minPrice=5000000"
    #[arg(long)]
    query: Option<String>,
    #[arg(long)]
    location: Vec<String>,
    #[arg(long)]
    property_type: Vec<String>,
    #[arg(long)]
    bedrooms: Vec<String>,
    #[arg(long)]
    builder: Vec<String>,
    #[arg(long)]
    status: Vec<String>,
    #[arg(long)]
    min_price: Option<i64>,
    #[arg(long)]
    max_price: Option<i64>,
    #[arg(long)]
    min_area: Option<i64>,
    #[arg(long)]
    max_area: Option<i64>,
    #[arg(long)]
    floor: Option<i64>,
    #[arg(long)]
    possession_date: Option<String>,
    #[arg(long)]
    keywords: Option<String>,
    #[arg(long)]
    pincode: Option<String>,
}

impl FilterArgs {
    /// Flags are applied on top of `--query`
    fn into_filter(self) -> (PropertyFilter, Vec<FilterWarning>) {
        let (mut filter, warnings) = self
            .query
            .as_deref()
            .map(PropertyFilter::from_query_string)
            .unwrap_or_default();

        filter.location.extend(self.location);
        filter.property_type.extend(self.property_type);
        filter.bedrooms.extend(self.bedrooms);
        filter.builder.extend(self.builder);
        filter.property_status.extend(self.status);
        filter.min_price = self.min_price.or(filter.min_price);
        filter.max_price = self.max_price.or(filter.max_price);
        filter.min_area = self.min_area.or(filter.min_area);
        filter.max_area = self.max_area.or(filter.max_area);
        filter.floor = self.floor.or(filter.floor);
        filter.possession_date = self.possession_date.or(filter.possession_date);
        filter.keywords = self.keywords.or(filter.keywords);
        filter.pincode = self.pincode.or(filter.pincode);
        (filter, warnings)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = ApiConfig {
        base_url: cli.api_url,
        timeout: Duration::from_secs(cli.timeout_secs),
        session_cookie: cli.session_cookie,
        ..ApiConfig::default()
    };
    let save = cli.save;

    match cli.command {
        Commands::Encode(args) => {
            let (filter, warnings) = args.into_filter();
            print_warnings(&warnings);
            println!("{}", filter.to_query_string());
            Ok(())
        }
        Commands::Decode { query } => {
            let (filter, warnings) = PropertyFilter::from_query_string(&query);
            print_warnings(&warnings);
            println!("{}", serde_json::to_string_pretty(&filter)?);
            Ok(())
        }
        command => {
            let api = HttpPropertyApi::with_config(config).context("Failed to create API client")?;
            info!("🏠 Estate Scout - using backend {}", api.backend_name());
            run(&api, command, save.as_deref()).await
        }
    }
}

async fn run(api: &impl PropertyApi, command: Commands, save: Option<&Path>) -> Result<()> {
    match command {
        Commands::Search(args) => {
            let (filter, warnings) = args.into_filter();
            print_warnings(&warnings);
            if filter.is_empty() {
                info!("No filter given, listing everything");
            }
            let properties = api.search_properties(&filter).await?;
            info!("✅ Found {} properties", properties.len());
            print_properties(&properties);
            save_json(save, &properties).await
        }
        Commands::Featured { limit } => {
            let properties = api.get_featured_properties(limit).await?;
            print_properties(&properties);
            save_json(save, &properties).await
        }
        Commands::Show { id } => {
            let (property, nearby) =
                tokio::try_join!(api.get_property_by_id(&id), api.get_nearby_places(&id))?;
            print_property(1, &property);
            print_nearby(&nearby);
            save_json(save, &serde_json::json!({ "property": property, "nearby": nearby })).await
        }
        Commands::Nearby { id } => {
            let nearby = api.get_nearby_places(&id).await?;
            print_nearby(&nearby);
            save_json(save, &nearby).await
        }
        Commands::Encode(_) | Commands::Decode { .. } => Ok(()),
    }
}

fn print_warnings(warnings: &[FilterWarning]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}

fn print_properties(properties: &[Property]) {
    for (i, property) in properties.iter().enumerate() {
        print_property(i + 1, property);
    }
}

fn print_property(position: usize, property: &Property) {
    println!("{}. {} ({})", position, property.title, format_price(property.price));

    let mut details = Vec::new();
    if let Some(bedrooms) = &property.bedrooms {
        details.push(property_type_display(bedrooms).to_string());
    }
    details.push(format_area(property.area));
    if property.price_per_sq_ft > 0.0 {
        details.push(format_price_per_sq_ft(property.price_per_sq_ft));
    }
    println!("   {}", details.join(" · "));

    if let Some(location) = &property.location {
        println!("   Location: {}", location);
    }
    if let Some(status) = &property.property_status {
        println!("   Status: {}", status);
    }
    println!("   ID: {}", property.id);
    println!();
}

fn print_nearby(places: &[NearbyPlace]) {
    if places.is_empty() {
        println!("No nearby places listed");
        return;
    }
    println!("Nearby:");
    for place in places {
        println!("   {} ({}) - {:.1} km", place.name, place.kind, place.distance);
    }
}

async fn save_json<T: Serialize + ?Sized>(path: Option<&Path>, value: &T) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("💾 Saved results to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands};
    use estate_scout::filter::FilterWarning;

    fn search_args(args: &[&str]) -> super::FilterArgs {
        let argv = ["estate-scout", "search"].into_iter().chain(args.iter().copied());
        match Cli::parse_from(argv).command {
            Commands::Search(args) => args,
            _ => unreachable!("parsed a search command"),
        }
    }

    #[test]
    fn query_warnings_are_returned() {
        let (filter, warnings) =
            search_args(&["--query", "location=Powai&minPrice=lots", "--max-price", "9000000"])
                .into_filter();

        assert_eq!(filter.location, ["Powai"]);
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.max_price, Some(9_000_000));
        assert_eq!(
            warnings,
            [FilterWarning {
                field: "minPrice",
                value: "lots".into(),
            }],
        );
    }

    #[test]
    fn flags_override_query_scalars_and_extend_lists() {
        let (filter, warnings) = search_args(&[
            "--query",
            "location=Powai&pincode=400076",
            "--location",
            "Vikhroli",
            "--pincode",
            "400083",
        ])
        .into_filter();

        assert!(warnings.is_empty());
        assert_eq!(filter.location, ["Powai", "Vikhroli"]);
        assert_eq!(filter.pincode.as_deref(), Some("400083"));
    }
}
