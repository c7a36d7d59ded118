use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use carhive_catalog::{InquiryOutcome, InquiryRequest};
use carhive_core::{format_mileage, load_app_config, FilterCriteria, KNOWN_BRANDS};
use carhive_store::{CatalogStore, Favorites};

#[derive(Debug, Parser)]
#[command(name = "carhive")]
#[command(about = "Browse the rental vehicle catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog vehicles, optionally filtered.
    List {
        /// Manufacturer, matched exactly (case-insensitive).
        #[arg(long, default_value = "")]
        brand: String,
        /// Maximum rental price.
        #[arg(long = "max-price", default_value = "")]
        price: String,
        /// Minimum mileage.
        #[arg(long, default_value = "")]
        mileage_from: String,
        /// Maximum mileage.
        #[arg(long, default_value = "")]
        mileage_to: String,
        /// Number of extra pages to pull after the first.
        #[arg(long, default_value_t = 0)]
        more: u32,
    },
    /// Show one vehicle in detail.
    Show { id: String },
    /// Submit a booking inquiry for a vehicle.
    Inquire {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: Option<String>,
    },
    /// Manage the favorites set.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Print the brands the catalog is known to carry.
    Brands,
}

#[derive(Debug, Subcommand)]
enum FavoritesAction {
    Add { id: String },
    Remove { id: String },
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_app_config().context("loading configuration")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List {
            brand,
            price,
            mileage_from,
            mileage_to,
            more,
        } => {
            let store = CatalogStore::from_config(&config).context("building catalog store")?;
            let filters = FilterCriteria {
                brand,
                price,
                mileage_from,
                mileage_to,
            };
            if let Err(e) = store.load_cars(filters, 1).await {
                tracing::warn!(error = %e, "catalog unavailable, showing what we have");
            }
            for _ in 0..more {
                if !store.state().has_more {
                    break;
                }
                if let Err(e) = store.load_more_cars().await {
                    tracing::warn!(error = %e, "stopped paging early");
                    break;
                }
            }

            let favorites = Favorites::load(&config.state_dir);
            let state = store.state();
            if state.filtered_cars.is_empty() {
                println!("No vehicles match. Try adjusting the filters.");
                return Ok(());
            }
            for vehicle in &state.filtered_cars {
                let marker = if favorites.contains(&vehicle.id) { "*" } else { " " };
                println!(
                    "{marker} {:<6} {} {} ({}) - {} - {} km",
                    vehicle.id,
                    vehicle.make,
                    vehicle.model,
                    vehicle.year,
                    vehicle.rental_price,
                    format_mileage(vehicle.mileage),
                );
            }
            if state.has_more {
                println!("...more available (rerun with --more {})", more + 1);
            }
        }
        Commands::Show { id } => {
            let store = CatalogStore::from_config(&config).context("building catalog store")?;
            match store.get_vehicle(&id).await {
                Some(vehicle) => {
                    println!("{} {} ({})", vehicle.make, vehicle.model, vehicle.year);
                    println!("  type:         {}", vehicle.body_type);
                    println!("  price:        {}", vehicle.rental_price);
                    println!("  mileage:      {} km", format_mileage(vehicle.mileage));
                    println!("  company:      {}", vehicle.rental_company);
                    println!("  address:      {}", vehicle.address);
                    println!("  image:        {}", vehicle.img);
                    if !vehicle.description.is_empty() {
                        println!("  {}", vehicle.description);
                    }
                    if !vehicle.rental_conditions.is_empty() {
                        println!("  conditions:");
                        for condition in &vehicle.rental_conditions {
                            println!("    - {condition}");
                        }
                    }
                }
                None => println!("Vehicle {id} not found."),
            }
        }
        Commands::Inquire {
            id,
            name,
            email,
            phone,
            message,
        } => {
            let store = CatalogStore::from_config(&config).context("building catalog store")?;
            let request = InquiryRequest {
                car_id: id,
                name,
                email,
                phone,
                message,
            };
            let outcome = store
                .submit_inquiry(&request)
                .await
                .context("submitting inquiry")?;
            match outcome {
                InquiryOutcome::Accepted | InquiryOutcome::EndpointMissing => {
                    println!("Inquiry sent. The rental company will be in touch.");
                }
            }
        }
        Commands::Favorites { action } => {
            let mut favorites = Favorites::load(&config.state_dir);
            match action {
                FavoritesAction::Add { id } => {
                    if favorites.add(&id).context("saving favorites")? {
                        println!("Added {id} to favorites.");
                    } else {
                        println!("{id} is already a favorite.");
                    }
                }
                FavoritesAction::Remove { id } => {
                    if favorites.remove(&id).context("saving favorites")? {
                        println!("Removed {id} from favorites.");
                    } else {
                        println!("{id} was not a favorite.");
                    }
                }
                FavoritesAction::List => {
                    if favorites.ids().is_empty() {
                        println!("No favorites yet.");
                    } else {
                        for id in favorites.ids() {
                            println!("{id}");
                        }
                    }
                }
            }
        }
        Commands::Brands => {
            for brand in KNOWN_BRANDS {
                println!("{brand}");
            }
        }
    }

    Ok(())
}
