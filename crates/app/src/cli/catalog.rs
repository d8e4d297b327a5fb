use clap::{Args, Subcommand};
use confeitaria::{
    catalog::{CatalogFilter, DEFAULT_PRICE_RANKING_LIMIT, DEFAULT_RECENT_LIMIT, OrderBy},
    products::{ProductId, ProductPage},
};
use rust_decimal::Decimal;

use super::{App, output};

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// List available products
    List(ListArgs),

    /// Show one product
    Get {
        /// Product id
        id: ProductId,
    },

    /// Search products by name
    Search {
        /// Name or part of it
        name: String,
    },

    /// Products priced within a range
    PriceRange {
        /// Lowest price
        min: Decimal,

        /// Highest price
        max: Decimal,
    },

    /// Cheapest products
    Cheapest {
        /// Number of products to show
        #[arg(long, default_value_t = DEFAULT_PRICE_RANKING_LIMIT)]
        limit: u32,
    },

    /// Most expensive products
    Expensive {
        /// Number of products to show
        #[arg(long, default_value_t = DEFAULT_PRICE_RANKING_LIMIT)]
        limit: u32,
    },

    /// Most recently added products
    Recent {
        /// Number of products to show
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: u32,
    },

    /// Catalog statistics
    Stats,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Free-text search
    #[arg(long)]
    search: Option<String>,

    /// Sort order (nome, preco_asc, preco_desc, recentes)
    #[arg(long)]
    order_by: Option<OrderBy>,

    /// Lowest price
    #[arg(long)]
    min_price: Option<Decimal>,

    /// Highest price
    #[arg(long)]
    max_price: Option<Decimal>,
}

pub(crate) async fn run(command: CatalogCommand, storefront: &App) -> Result<(), String> {
    let catalog = storefront.catalog();

    let page = match command.command {
        CatalogSubcommand::List(args) => catalog
            .list(&CatalogFilter {
                search: args.search,
                order_by: args.order_by,
                min_price: args.min_price,
                max_price: args.max_price,
            })
            .await
            .map_err(|error| format!("failed to list products: {error}"))?,
        CatalogSubcommand::Get { id } => {
            let product = catalog
                .get(id)
                .await
                .map_err(|error| format!("failed to fetch product {id}: {error}"))?;

            println!("{}", output::product_table(std::slice::from_ref(&product)));

            if let Some(description) = &product.description {
                println!("{description}");
            }

            return Ok(());
        }
        CatalogSubcommand::Search { name } => catalog
            .search_by_name(&name)
            .await
            .map_err(|error| format!("failed to search products: {error}"))?,
        CatalogSubcommand::PriceRange { min, max } => catalog
            .by_price_range(min, max)
            .await
            .map_err(|error| format!("failed to list products by price: {error}"))?,
        CatalogSubcommand::Cheapest { limit } => catalog
            .cheapest(limit)
            .await
            .map_err(|error| format!("failed to list cheapest products: {error}"))?,
        CatalogSubcommand::Expensive { limit } => catalog
            .expensive(limit)
            .await
            .map_err(|error| format!("failed to list most expensive products: {error}"))?,
        CatalogSubcommand::Recent { limit } => catalog
            .recent(limit)
            .await
            .map_err(|error| format!("failed to list recent products: {error}"))?,
        CatalogSubcommand::Stats => {
            let stats = catalog
                .stats()
                .await
                .map_err(|error| format!("failed to fetch catalog stats: {error}"))?;

            let rendered = serde_json::to_string_pretty(&stats)
                .map_err(|error| format!("failed to render catalog stats: {error}"))?;

            println!("{rendered}");

            return Ok(());
        }
    };

    print_page(&page);

    Ok(())
}

fn print_page(page: &ProductPage) {
    println!("{}", output::product_table(&page.products));
    println!("{} product(s) | {}", page.total, page.availability);
}
