use clap::{ArgAction, Args, Subcommand};
use confeitaria::{
    catalog::AdminFilter,
    products::{AdminProduct, ProductDraft, ProductId, ProductPatch},
};
use rust_decimal::Decimal;

use super::{App, describe, output};

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Dashboard statistics
    Dashboard,

    /// List every product, available or not
    List {
        /// Only available (true) or unavailable (false) products
        #[arg(long)]
        available: Option<bool>,

        /// Free-text search
        #[arg(long)]
        search: Option<String>,
    },

    /// Detailed statistics report
    Stats,

    /// Create a product
    Create(CreateArgs),

    /// Update some fields of a product
    Update(UpdateArgs),

    /// Delete a product
    Delete {
        /// Product id
        id: ProductId,
    },

    /// Flip a product's availability
    Toggle {
        /// Product id
        id: ProductId,
    },

    /// Set a product's availability
    Availability {
        /// Product id
        id: ProductId,

        /// New availability
        #[arg(action = ArgAction::Set)]
        available: bool,
    },

    /// Set the availability of several products
    BatchAvailability {
        /// New availability
        #[arg(long, action = ArgAction::Set)]
        available: bool,

        /// Product ids
        #[arg(required = true)]
        ids: Vec<ProductId>,
    },
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Price in reais
    #[arg(long)]
    price: Decimal,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Image URL
    #[arg(long)]
    image: Option<String>,

    /// Create the product as unavailable
    #[arg(long)]
    unavailable: bool,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Product id
    id: ProductId,

    /// New name
    #[arg(long)]
    name: Option<String>,

    /// New price in reais
    #[arg(long)]
    price: Option<Decimal>,

    /// New description
    #[arg(long)]
    description: Option<String>,

    /// New image URL
    #[arg(long)]
    image: Option<String>,

    /// New availability
    #[arg(long)]
    available: Option<bool>,
}

pub(crate) async fn run(command: AdminCommand, storefront: &mut App) -> Result<(), String> {
    storefront.restore_session().await;

    match command.command {
        AdminSubcommand::Dashboard => {
            let stats = storefront
                .dashboard()
                .await
                .map_err(|error| describe("load dashboard", &error))?;

            println!("{}", output::stats_table(&stats));
        }
        AdminSubcommand::List { available, search } => {
            let page = storefront
                .admin_products(&AdminFilter { available, search })
                .await
                .map_err(|error| describe("list products", &error))?;

            println!("{}", output::admin_product_table(&page.products));
            println!("{} product(s)", page.total);
        }
        AdminSubcommand::Stats => {
            let stats = storefront
                .detailed_stats()
                .await
                .map_err(|error| describe("load statistics", &error))?;

            println!("{}", output::stats_table(&stats));
        }
        AdminSubcommand::Create(args) => {
            let draft = ProductDraft {
                name: args.name,
                price: args.price,
                description: args.description,
                image: args.image,
                available: Some(!args.unavailable),
            };

            let created = storefront
                .create_product(&draft)
                .await
                .map_err(|error| describe("create product", &error))?;

            print_product("created", &created);
        }
        AdminSubcommand::Update(args) => {
            let patch = ProductPatch {
                name: args.name,
                price: args.price,
                description: args.description,
                image: args.image,
                available: args.available,
            };

            if patch.is_empty() {
                return Err("nothing to update: pass at least one field".to_string());
            }

            let updated = storefront
                .update_product(args.id, &patch)
                .await
                .map_err(|error| describe("update product", &error))?;

            print_product("updated", &updated);
        }
        AdminSubcommand::Delete { id } => {
            storefront
                .delete_product(id)
                .await
                .map_err(|error| describe("delete product", &error))?;

            println!("deleted product {id}");
        }
        AdminSubcommand::Toggle { id } => {
            let product = storefront
                .toggle_availability(id)
                .await
                .map_err(|error| describe("toggle availability", &error))?;

            print_product("updated", &product);
        }
        AdminSubcommand::Availability { id, available } => {
            let product = storefront
                .set_availability(id, available)
                .await
                .map_err(|error| describe("set availability", &error))?;

            print_product("updated", &product);
        }
        AdminSubcommand::BatchAvailability { available, ids } => {
            storefront
                .batch_update_availability(&ids, available)
                .await
                .map_err(|error| describe("update availability", &error))?;

            println!("updated {} product(s)", ids.len());
        }
    }

    Ok(())
}

fn print_product(action: &str, product: &AdminProduct) {
    println!("{action}:");
    println!(
        "{}",
        output::admin_product_table(std::slice::from_ref(product))
    );
}
