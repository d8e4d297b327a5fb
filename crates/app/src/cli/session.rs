use clap::Args;
use confeitaria::users::Credentials;

use super::{App, output};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Username or email
    #[arg(long, short)]
    username: String,

    /// Password
    #[arg(long, short, env = "CONFEITARIA_PASSWORD", hide_env_values = true)]
    password: String,

    /// Location to continue at after logging in
    #[arg(long)]
    from: Option<String>,
}

pub(crate) async fn login(args: LoginArgs, storefront: &mut App) -> Result<(), String> {
    let credentials = Credentials::new(args.username, args.password);

    let next = storefront
        .login(&credentials, args.from.as_deref())
        .await
        .map_err(|error| format!("failed to log in: {error}"))?;

    if let Some(user) = storefront.session().user() {
        println!("logged in as {}", output::user_summary(user));
    }

    println!("continue at: {next}");

    Ok(())
}

pub(crate) fn logout(storefront: &mut App) {
    storefront.logout();

    println!("logged out");
}

pub(crate) async fn whoami(storefront: &mut App) -> Result<(), String> {
    storefront.restore_session().await;

    match storefront.session().user() {
        Some(user) => println!("{}", output::user_summary(user)),
        None => println!("not logged in"),
    }

    Ok(())
}
