use clap::{Parser, Subcommand};
use confeitaria::gateway::ApiError;
use confeitaria_app::{
    config::AppConfig,
    context::{HttpStorefront, StorefrontError},
    observability,
};

mod admin;
mod cart;
mod catalog;
mod output;
mod session;

#[derive(Debug, Parser)]
#[command(
    name = "confeitaria",
    about = "Confeitaria Doce Sabor storefront",
    long_about = None
)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the public catalog
    Catalog(catalog::CatalogCommand),

    /// Manage the local cart
    Cart(cart::CartCommand),

    /// Log in and store the session
    Login(session::LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show the logged in user
    Whoami,

    /// Manage products (admins only)
    Admin(admin::AdminCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let mut storefront = App::from_config(&self.config)
            .map_err(|error| format!("invalid configuration: {error}"))?;

        match self.command {
            Commands::Catalog(command) => catalog::run(command, &storefront).await,
            Commands::Cart(command) => cart::run(command, &mut storefront).await,
            Commands::Login(args) => session::login(args, &mut storefront).await,
            Commands::Logout => {
                session::logout(&mut storefront);
                Ok(())
            }
            Commands::Whoami => session::whoami(&mut storefront).await,
            Commands::Admin(command) => admin::run(command, &mut storefront).await,
        }
    }
}

/// Message for a failed storefront operation.
fn describe(action: &str, error: &StorefrontError) -> String {
    match error {
        StorefrontError::Validation(errors) => {
            format!("failed to {action}: invalid product form\n{}", output::field_errors(errors))
        }
        StorefrontError::Api(ApiError::Unauthorized) => {
            format!("failed to {action}: session expired, run `confeitaria login` again")
        }
        _ => format!("failed to {action}: {error}"),
    }
}

type App = HttpStorefront;
