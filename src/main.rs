use clap::Parser;
use hotel_geo::config::load_config;
use hotel_geo::location::{is_valid_italian_location, HotelLocator, PartialLocation};
use tracing_subscriber::EnvFilter;

/// hotelgeo: resolve a typed hotel name to address and coordinates
///
/// Reads the geocoder settings from the environment (HOTELGEO_API_KEY is
/// required; a .env file is honoured).
///
/// Examples:
///   hotelgeo "Villa Toscana Resort"
///   hotelgeo "Pensione XYZ Assisi" --country Italy
///   hotelgeo "Casa Blu" --city Camogli --region Liguria
#[derive(Parser)]
#[command(name = "hotelgeo", version, about, long_about = None)]
struct Cli {
    /// Hotel name as the guest or operator typed it.
    #[arg(index = 1)]
    name: String,

    /// Country appended to the search queries. Defaults to HOTELGEO_COUNTRY.
    #[arg(long)]
    country: Option<String>,

    /// Known city. Retried as a hint and wins over the geocoded value.
    #[arg(long)]
    city: Option<String>,

    /// Known region. Retried as a hint and wins over the geocoded value.
    #[arg(long)]
    region: Option<String>,
}

fn main() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hotel_geo=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_config().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    if let Some(country) = &cli.country {
        config.default_country = country.clone();
    }

    let locator = HotelLocator::from_config(&config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let resolved = if cli.city.is_some() || cli.region.is_some() {
        let partial = PartialLocation {
            city: cli.city.clone(),
            region: cli.region.clone(),
            ..Default::default()
        };
        locator.enrich(&cli.name, &partial)
    } else {
        locator.resolve_default(&cli.name)
    };

    let Some(location) = resolved else {
        eprintln!("No geodata found for '{}'. Enter the address manually.", cli.name);
        std::process::exit(1);
    };

    eprintln!("  {}", location.display_line());
    if location.is_locality_only() {
        eprintln!("  \u{26A0}\u{FE0F}  City only: street address and postal code still needed");
    }
    if !is_valid_italian_location(&location.latitude, &location.longitude) {
        eprintln!("  \u{26A0}\u{FE0F}  Coordinates fall outside Italy; re-check before saving");
    }

    match serde_json::to_string_pretty(&location) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
