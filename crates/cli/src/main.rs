mod interactive;
mod render;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dashboard::{ListController, MemoryHistory, breadcrumbs};
use std::path::PathBuf;
use std::time::Instant;
use store::{Dataset, build_tree, parse_products_file, reorder};
use views::{ActivityView, ClientsView, OrdersView, ProductsView, PromotionsView, ViewDefinition};

/// Pages that have a list view
const ROUTES: [&str; 5] = [
    OrdersView::ROUTE,
    ProductsView::ROUTE,
    PromotionsView::ROUTE,
    ActivityView::ROUTE,
    ClientsView::ROUTE,
];

/// Run `$body` with `$view` bound to the view type serving `$route`.
macro_rules! dispatch {
    ($route:expr, $view:ident => $body:expr) => {
        match $route {
            r if r == OrdersView::ROUTE => {
                type $view = OrdersView;
                $body
            }
            r if r == ProductsView::ROUTE => {
                type $view = ProductsView;
                $body
            }
            r if r == PromotionsView::ROUTE => {
                type $view = PromotionsView;
                $body
            }
            r if r == ActivityView::ROUTE => {
                type $view = ActivityView;
                $body
            }
            r if r == ClientsView::ROUTE => {
                type $view = ClientsView;
                $body
            }
            other => Err(anyhow!(
                "No list page at '/{}' (expected one of: {})",
                other,
                ROUTES.join(", ")
            )),
        }
    };
}

/// Storefront Admin - filtered list views for the back office
#[derive(Parser)]
#[command(name = "storefront-admin")]
#[command(about = "Browse, filter and export storefront back-office lists", long_about = None)]
struct Cli {
    /// Load the product catalog from a CSV file instead of mock data
    #[arg(long)]
    products: Option<PathBuf>,

    /// Seed for mock data generation
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Number of mock orders to generate
    #[arg(long, default_value = "50")]
    orders: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of a list, e.g. "/orders?status=pending&page=2"
    List {
        /// Route with optional query string
        url: String,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export every filtered row of a list as CSV
    Export {
        /// Route with optional query string
        url: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the product catalog from a CSV file
    Import {
        /// CSV with columns name, sku, price, stock, category
        file: PathBuf,
    },

    /// Show the category tree
    Categories {
        /// Move this category before printing
        #[arg(long = "move")]
        move_id: Option<String>,

        /// New index among its siblings
        #[arg(long, default_value = "0")]
        to: usize,
    },

    /// Resolve the breadcrumb trail of a route
    Breadcrumbs {
        path: String,
    },

    /// Order counts per status and delivered revenue
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse a list interactively from stdin
    Interactive {
        /// Route with optional query string
        #[arg(default_value = "/orders")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let now = Utc::now();

    let start = Instant::now();
    let mut dataset = load_dataset(&cli, now)?;
    tracing::info!("Dataset loaded in {:?}", start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::List { url, json } => {
            dispatch!(route_of(&url), V => handle_list::<V>(&dataset, &url, json, now))?
        }
        Commands::Export { url, output } => {
            dispatch!(route_of(&url), V => handle_export::<V>(&dataset, &url, output, now))?
        }
        Commands::Import { file } => handle_import(&mut dataset, file, now)?,
        Commands::Categories { move_id, to } => handle_categories(&dataset, move_id, to)?,
        Commands::Breadcrumbs { path } => {
            render::print_breadcrumbs(&breadcrumbs(&path));
        }
        Commands::Summary { json } => handle_summary(&dataset, json)?,
        Commands::Interactive { url } => {
            dispatch!(route_of(&url), V => interactive::run::<V>(&mut dataset, &url, now).await)?
        }
    }

    Ok(())
}

/// Mock data, with the catalog optionally replaced from `--products`.
fn load_dataset(cli: &Cli, now: DateTime<Utc>) -> Result<Dataset> {
    let mut dataset =
        Dataset::mock(cli.seed, cli.orders, now).context("Failed to generate mock data")?;

    if let Some(path) = &cli.products {
        let products = parse_products_file(path, now)
            .map_err(|e| anyhow!(e.messages().join("\n")))
            .with_context(|| format!("Failed to load products from {}", path.display()))?;
        dataset
            .replace_products(products)
            .context("Failed to replace product catalog")?;
    }
    Ok(dataset)
}

/// First path segment of a URL, e.g. `orders` for `/orders/ORD-1?page=2`.
fn route_of(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.trim_matches('/').split('/').next().unwrap_or_default()
}

/// Handle the 'list' command
fn handle_list<V: ViewDefinition>(
    dataset: &Dataset,
    url: &str,
    json: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    let history = MemoryHistory::from_url(url);
    let path = history.path().to_string();
    let controller: ListController<V, _> = ListController::mount(dataset, history, now);
    let page = controller.current_page();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&page).context("Failed to serialize page")?
        );
        return Ok(());
    }

    render::print_breadcrumbs(&breadcrumbs(&path));
    render::print_page(&page, &controller.history().href());
    Ok(())
}

/// Handle the 'export' command
fn handle_export<V: ViewDefinition>(
    dataset: &Dataset,
    url: &str,
    output: Option<PathBuf>,
    now: DateTime<Utc>,
) -> Result<()> {
    let mut controller: ListController<V, _> =
        ListController::mount(dataset, MemoryHistory::from_url(url), now);
    let csv = controller.export_csv()?;

    match output {
        Some(path) => {
            std::fs::write(&path, csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            render::print_notices(&controller.take_notices());
            println!("{} Wrote {}", "✓".green(), path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}

/// Handle the 'import' command
fn handle_import(dataset: &mut Dataset, file: PathBuf, now: DateTime<Utc>) -> Result<()> {
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let mut controller: ListController<ProductsView, _> =
        ListController::mount(dataset, MemoryHistory::new("/products", ""), now);

    match controller.import_products(dataset, &text) {
        Ok(_) => {
            render::print_notices(&controller.take_notices());
            render::print_page(&controller.current_page(), &controller.history().href());
            Ok(())
        }
        Err(messages) => {
            render::print_notices(&controller.take_notices());
            for message in &messages {
                eprintln!("  {} {}", "•".red(), message);
            }
            bail!("Import of {} rejected ({} problems)", file.display(), messages.len())
        }
    }
}

/// Handle the 'categories' command
fn handle_categories(dataset: &Dataset, move_id: Option<String>, to: usize) -> Result<()> {
    let mut categories = dataset.categories.list();

    if let Some(id) = move_id {
        let changed = reorder(&mut categories, &id, to)
            .with_context(|| format!("Failed to move category {}", id))?;
        println!(
            "{} Moved {} to index {} ({} positions renumbered)",
            "✓".green(),
            id,
            to,
            changed.len()
        );
    }

    println!("{}", "Categories:".bold().blue());
    render::print_tree(&build_tree(&categories), 0);
    Ok(())
}

/// Handle the 'summary' command
fn handle_summary(dataset: &Dataset, json: bool) -> Result<()> {
    let summary = dataset.order_summary();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        );
    } else {
        render::print_summary(&summary);
    }
    Ok(())
}
