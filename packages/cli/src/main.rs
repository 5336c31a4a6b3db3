#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the crime data explorer API.
//!
//! Each subcommand runs one request batch for the page described by the
//! filter flags and prints the normalized results as JSON. `intro` and
//! `trend` additionally run the presentation logic and print its text.

mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use crime_explorer_api::{ApiConfig, ExplorerApi, Filters, HttpGet};
use crime_explorer_lookup::{states, usa};
use crime_explorer_models::{NATIONAL_KEY, PlaceType, Record};
use crime_explorer_view::intro::{IntroContext, Participation, select_intro};
use crime_explorer_view::series::{active_year, summary_series};
use crime_explorer_view::trend::{TrendDetails, TrendInput};

/// Swatch colors for trend table rows, in row order.
const TREND_COLORS: &[&str] = &["#ff5e50", "#702c27", "#95aabc"];

#[derive(Parser)]
#[command(name = "crime_explorer", about = "Crime data explorer API client")]
struct Cli {
    /// TOML file with `base_url` / `proxy_path`
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// API base URL (overrides config file and `CRIME_EXPLORER_API_URL`)
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Place slug, agency ORI, or "united-states"
    #[arg(long, default_value = NATIONAL_KEY)]
    place: String,
    /// One of state, agency, region, national
    #[arg(long, default_value = "national")]
    place_type: String,
    /// State abbreviation for state pages (derived from the slug if omitted)
    #[arg(long)]
    place_id: Option<String>,
    /// Crime or page category (e.g. "violent-crime", "officers-assaulted")
    #[arg(long, default_value = "violent-crime")]
    crime: String,
    /// Sub-page name
    #[arg(long)]
    page: Option<String>,
    /// First year of the window
    #[arg(long, default_value_t = 2004)]
    since: i32,
    /// Last year of the window
    #[arg(long, default_value_t = 2016)]
    until: i32,
}

impl FilterArgs {
    fn into_filters(self) -> Filters {
        let place_type = PlaceType::parse_or_national(&self.place_type);
        let place_id = self.place_id.unwrap_or_else(|| {
            states::slug_to_abbr(&self.place)
                .unwrap_or_default()
                .to_string()
        });
        Filters {
            place: self.place,
            place_type,
            place_id,
            page_type: self.crime,
            page: self.page,
            since: self.since,
            until: self.until,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// NIBRS offender, victim and offense breakdowns
    Nibrs(FilterArgs),
    /// NIBRS counts per facet and dimension
    NibrsCounts(FilterArgs),
    /// Police employment for the place and the nation
    PoliceEmployment(FilterArgs),
    /// Offense estimates with arson for the place and its comparisons
    Summary(FilterArgs),
    /// UCR participation for the place and the nation
    Participation(FilterArgs),
    /// Region lookup table
    Regions,
    /// State lookup table
    States,
    /// Officers killed and assaulted breakdowns
    Leoka(FilterArgs),
    /// Print the intro headline for a page
    Intro(FilterArgs),
    /// Print the trend sentence and table for a year
    Trend {
        #[command(flatten)]
        filters: FilterArgs,
        /// Year to describe (defaults to the last year of the window)
        #[arg(long)]
        year: Option<i32>,
    },
}

fn load_config(cli: &Cli) -> Result<ApiConfig, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => ApiConfig::from_file(path)?,
        None => ApiConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    log::info!("Using API at {}{}", config.base_url, config.proxy_path);
    let api = ExplorerApi::from_config(config)?;

    match cli.command {
        Commands::Nibrs(args) => {
            let results = api.nibrs(&args.into_filters()).await;
            output::print_slots(&results)?;
        }
        Commands::NibrsCounts(args) => {
            let results = api.nibrs_counts(&args.into_filters()).await;
            output::print_slots(&results)?;
        }
        Commands::PoliceEmployment(args) => {
            let results = api.police_employment(&args.into_filters()).await;
            output::print_slots(&results)?;
        }
        Commands::Summary(args) => {
            let results = api.summary(&args.into_filters()).await;
            output::print_slots(&results)?;
        }
        Commands::Participation(args) => {
            let results = api.participation(&args.into_filters()).await;
            output::print_slots(&results)?;
        }
        Commands::Regions => output::print_slots(&api.regions().await)?,
        Commands::States => output::print_slots(&api.states().await)?,
        Commands::Leoka(args) => {
            let results = api.leoka(&args.into_filters()).await;
            output::print_slots(&results)?;
        }
        Commands::Intro(args) => intro(&api, &args.into_filters()).await?,
        Commands::Trend { filters, year } => {
            let filters = filters.into_filters();
            let year = year.unwrap_or(filters.until);
            trend(&api, &filters, year).await;
        }
    }

    Ok(())
}

fn lookup_rows<E>(results: Vec<Result<crime_explorer_models::LookupResults, E>>) -> Vec<Record> {
    results
        .into_iter()
        .flatten()
        .flat_map(|r| r.results)
        .collect()
}

fn region_code(row: &Record) -> Option<&serde_json::Value> {
    row.get("region_code")
}

async fn intro<T: HttpGet>(
    api: &ExplorerApi<T>,
    filters: &Filters,
) -> Result<(), Box<dyn std::error::Error>> {
    let agency = if filters.place_type == PlaceType::Agency {
        api.fetch_agency(&filters.place).await?
    } else {
        None
    };
    let participation = Participation::from_results(api.participation(filters).await);

    let (region, region_states) = if filters.place_type == PlaceType::Region {
        let (regions, all_states) = futures::join!(api.regions(), api.states());
        let region = lookup_rows(regions).into_iter().find(|row| {
            row.get("region_name")
                .and_then(serde_json::Value::as_str)
                .is_some_and(|name| name.eq_ignore_ascii_case(&filters.place))
        });
        let members: Vec<Record> = lookup_rows(all_states)
            .into_iter()
            .filter(|row| {
                region
                    .as_ref()
                    .and_then(region_code)
                    .is_some_and(|code| region_code(row) == Some(code))
            })
            .collect();
        (region, Some(members))
    } else {
        (None, None)
    };

    let place_name = usa::display_name(&filters.place);
    let ctx = IntroContext {
        agency: agency.as_ref(),
        filters,
        participation: &participation,
        place_name: &place_name,
        region: region.as_ref(),
        states: region_states.as_deref(),
    };

    match select_intro(&ctx) {
        Some(view) => {
            println!("{view}");
            output::print_json(&view)?;
        }
        None => log::info!("Participation is still loading"),
    }
    Ok(())
}

async fn trend<T: HttpGet>(api: &ExplorerApi<T>, filters: &Filters, year: i32) {
    let crime = filters.page_type.as_str();
    let mut slots = Vec::new();
    for slot in api.summary(filters).await {
        match slot {
            Ok(slot) => slots.push(slot),
            Err(e) => output::print_error(&e),
        }
    }

    let (mut keys, series) = summary_series(crime, &slots);
    if keys.is_empty() {
        keys.push(NATIONAL_KEY.to_string());
    }

    let active = active_year(&series, year);
    let details = TrendDetails::build(&TrendInput {
        active: &active,
        colors: TREND_COLORS,
        crime,
        keys: &keys,
        since: filters.since,
        until: filters.until,
    });

    println!("{}", details.sentence);
    println!();
    output::print_trend_table(&details.rows);
}
