use std::{sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    checkout::{credit_card_months, credit_card_years_from_now, current_month},
    ListingCommand, ListingController, ListingEvent, ListingEventLoop, ListingState, RouteParams,
    StorefrontClient,
};
use shared::domain::ProductId;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "storefront", about = "Browse the storefront catalog")]
struct Args {
    /// Overrides the configured API base url.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    page_size: Option<u32>,
    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of a category (defaults to the first category).
    Browse {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Search products whose name contains the keyword.
    Search {
        keyword: String,
        #[arg(long)]
        page: Option<u32>,
    },
    Product {
        id: i64,
    },
    Categories,
    Countries,
    States {
        country_code: String,
    },
    Orders {
        email: String,
    },
    CardMonths {
        #[arg(long)]
        start: Option<u32>,
    },
    CardYears,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url.clone() {
        settings.api_base_url = api_url;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }

    match args.command {
        Command::CardMonths { start } => {
            let months: Vec<u32> = credit_card_months(start.unwrap_or_else(current_month)).collect();
            return print_list(args.json, &months, |m| format!("{m:02}"));
        }
        Command::CardYears => {
            let years: Vec<i32> = credit_card_years_from_now().collect();
            return print_list(args.json, &years, |y| y.to_string());
        }
        _ => {}
    }

    let client = build_client(&settings)?;
    info!(api = client.base_url(), "using storefront api");

    match args.command {
        Command::Browse { id, name, page } => {
            let mut params = RouteParams::new();
            if let Some(id) = id {
                params = params.with("id", id);
            }
            if let Some(name) = name {
                params = params.with("name", name);
            }
            run_listing(client, &settings, params, page, args.json).await
        }
        Command::Search { keyword, page } => {
            run_listing(client, &settings, RouteParams::search(keyword), page, args.json).await
        }
        Command::Product { id } => {
            let product = client
                .get_product(ProductId(id))
                .await
                .with_context(|| format!("failed to load product {id}"))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&product)?);
            } else {
                println!("#{} {} ({})", product.id, product.name, product.sku);
                println!("  price: {:.2}", product.unit_price);
                println!("  in stock: {}", product.units_in_stock);
                if !product.description.is_empty() {
                    println!("  {}", product.description);
                }
            }
            Ok(())
        }
        Command::Categories => {
            let categories = client
                .get_product_categories()
                .await
                .context("failed to load product categories")?;
            print_list(args.json, &categories, |c| format!("{:>4}  {}", c.id.0, c.category_name))
        }
        Command::Countries => {
            let countries = client.get_countries().await.context("failed to load countries")?;
            print_list(args.json, &countries, |c| format!("{}  {}", c.code, c.name))
        }
        Command::States { country_code } => {
            let states = client
                .get_states(&country_code)
                .await
                .with_context(|| format!("failed to load states for {country_code}"))?;
            print_list(args.json, &states, |s| s.name.clone())
        }
        Command::Orders { email } => {
            let orders = client
                .get_order_history(&email)
                .await
                .with_context(|| format!("failed to load order history for {email}"))?;
            print_list(args.json, &orders, |o| {
                format!(
                    "{}  {}  qty {}  total {:.2}",
                    o.date_created.format("%Y-%m-%d %H:%M"),
                    o.order_tracking_number,
                    o.total_quantity,
                    o.total_price
                )
            })
        }
        Command::CardMonths { .. } | Command::CardYears => Ok(()),
    }
}

fn build_client(settings: &Settings) -> Result<StorefrontClient> {
    StorefrontClient::with_timeout(
        &settings.api_base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )
    .context("failed to build storefront client")
}

async fn run_listing(
    client: StorefrontClient,
    settings: &Settings,
    params: RouteParams,
    page: Option<u32>,
    json: bool,
) -> Result<()> {
    let controller = ListingController::with_page_size(settings.page_size)?;
    let mut commands = vec![ListingCommand::Navigate(params)];
    if let Some(page) = page {
        commands.push(ListingCommand::ChangePage(page));
    }

    let mut event_loop = ListingEventLoop::new(Arc::new(client), controller);
    let mut events = event_loop.subscribe();
    event_loop.run(tokio_stream::iter(commands)).await;

    while let Ok(event) = events.try_recv() {
        if let ListingEvent::Failed(failure) = event {
            bail!("listing failed: {failure}");
        }
    }

    let state = event_loop.controller().state();
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
    } else {
        print_listing(state);
    }
    Ok(())
}

fn print_listing(state: &ListingState) {
    if state.search_mode {
        println!("Search results for \"{}\"", state.last_keyword_seen);
    } else {
        println!(
            "Category: {} (id {})",
            state.current_category_name, state.current_category_id
        );
    }
    println!(
        "Page {} of {} ({} products, {} per page)",
        state.page_number,
        state.total_pages().max(1),
        state.total_elements,
        state.page_size
    );
    for product in &state.items {
        println!(
            "  {:>5}  {:<40}  {:>8.2}",
            product.id.0, product.name, product.unit_price
        );
    }
}

fn print_list<T: serde::Serialize>(
    json: bool,
    items: &[T],
    line: impl Fn(&T) -> String,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        for item in items {
            println!("{}", line(item));
        }
    }
    Ok(())
}
