use clap::{Args, Subcommand};
use confeitaria::products::ProductId;

use super::{App, describe, output};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a product to the cart
    Add {
        /// Product id
        id: ProductId,

        /// Units to add
        #[arg(long, short, default_value_t = 1)]
        quantity: u32,
    },

    /// Set the quantity of a cart line; zero or less removes it
    Update {
        /// Product id
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },

    /// Empty the cart
    Clear,

    /// Show the cart
    Show,

    /// Print the order message and the WhatsApp link
    Checkout,
}

pub(crate) async fn run(command: CartCommand, storefront: &mut App) -> Result<(), String> {
    match command.command {
        CartSubcommand::Add { id, quantity } => {
            let product = storefront
                .add_to_cart(id, quantity)
                .await
                .map_err(|error| describe("add product to cart", &error))?;

            println!("added {quantity} x {}", product.name);
        }
        CartSubcommand::Update { id, quantity } => {
            storefront.cart_mut().update_quantity(id, quantity);
        }
        CartSubcommand::Remove { id } => storefront.cart_mut().remove_item(id),
        CartSubcommand::Clear => storefront.cart_mut().clear(),
        CartSubcommand::Show => {}
        CartSubcommand::Checkout => {
            let link = storefront
                .checkout_link()
                .map_err(|error| describe("check out", &error))?;

            println!("{}", storefront.cart().checkout_message());
            println!();
            println!("{link}");

            return Ok(());
        }
    }

    print_cart(storefront);

    Ok(())
}

fn print_cart(storefront: &App) {
    let cart = storefront.cart();

    if cart.is_empty() {
        println!("cart is empty");
    } else {
        println!("{}", output::cart_table(cart.cart()));
    }
}
