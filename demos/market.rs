//! Market Example
//!
//! Walks the marketplace core end to end against a real data directory:
//! bootstrap accounts, two logins, publishing, editing, moderation and
//! deletion, with the catalogue printed along the way.
//!
//! Use `-d` to choose the data directory (defaults to `target/market-demo`)

use std::{fs::create_dir_all, path::PathBuf};

use anyhow::{Context, Result};

use clap::Parser;
use jiff::Timestamp;
use rust_decimal::Decimal;
use smallvec::smallvec;
use tabled::{
    builder::Builder,
    settings::{Color, Style, object::Rows},
};
use tracing_subscriber::EnvFilter;

use bazaar::{
    config::StoragePaths,
    listings::ListingService,
    products::{Product, status},
    store::{
        products::ProductRepository,
        users::{Bootstrap, UserRepository},
    },
};

/// Market Example
#[derive(Debug, Parser)]
struct Args {
    /// Directory holding the two store files
    #[arg(short, long, default_value = "target/market-demo")]
    data_dir: PathBuf,
}

/// Market Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    create_dir_all(&args.data_dir)?;

    let paths = StoragePaths::in_dir(&args.data_dir);
    let mut products = ProductRepository::open(paths.products)?;
    let users = UserRepository::open(paths.users, Bootstrap::default())?;

    let admin = users
        .validate_credentials("admin", "admin123")
        .context("admin login rejected")?
        .id();

    let seller = users
        .validate_credentials("user1", "user123")
        .context("seller login rejected")?
        .id();

    let mut market = ListingService::new(&mut products, &users);

    let id = market.publish(
        Product {
            title: "Road bike".to_string(),
            category_id: 2,
            description: "Aluminium frame, new tyres".to_string(),
            price: Decimal::new(24999, 2),
            location: "Leeds".to_string(),
            tags: smallvec!["bike".to_string(), "outdoors".to_string()],
            published_at: Some(Timestamp::now()),
            status: status::ON_SALE.to_string(),
            ..Product::default()
        },
        seller,
    )?;

    println!("user1 published listing {id}");

    let mut revised = market.product(id).cloned().context("listing missing")?;
    revised.price = Decimal::new(19999, 2);

    market.edit(id, revised, seller)?;
    println!("user1 lowered the price");

    if let Err(refused) = market.ban(id, seller) {
        println!("user1 tried to ban their own listing: {refused}");
    }

    market.ban(id, admin)?;
    println!("admin banned listing {id}");

    print_catalogue(&market);

    market.unban(id, admin)?;
    market.delete(id, admin)?;
    println!("admin removed listing {id}");

    Ok(())
}

/// Renders every listing as a console table.
#[expect(clippy::print_stdout, reason = "Example code")]
fn print_catalogue(market: &ListingService<'_>) {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Title", "Price", "Seller", "Status"]);

    let mut listings: Vec<_> = market.products().collect();
    listings.sort_by_key(|product| product.id);

    for product in listings {
        builder.push_record([
            product.id.to_string(),
            product.title.clone(),
            product.price.to_string(),
            product.seller_id.to_string(),
            product.status.clone(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    println!("{table}");
}
