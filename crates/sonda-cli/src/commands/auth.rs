//! Login, register, and logout commands.

use anyhow::{Context, Result, bail};
use dialoguer::Password;

use sonda_core::{ApiClient, Error, Session, SessionStore};

pub async fn cmd_login(
    client: &ApiClient,
    store: &SessionStore,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = read_password(password, username)?;

    match client.login(username, &password).await {
        Ok(response) => {
            let username = response.user.username.clone();
            store.login(Session::new(response.token, response.user))?;
            println!("Logged in as {}", username);
            Ok(())
        }
        // Rejected credentials are a user-visible message, not a stack trace.
        Err(Error::Auth { message, .. }) => bail!("{}", message),
        Err(e) => Err(e.into()),
    }
}

pub async fn cmd_register(
    client: &ApiClient,
    username: &str,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = read_password(password, username)?;

    match client.register(username, email, &password).await {
        Ok(()) => {
            println!("Account created. You can now run `sonda login {}`.", username);
            Ok(())
        }
        Err(Error::Auth { message, .. }) => bail!("{}", message),
        Err(e) => Err(e.into()),
    }
}

pub fn cmd_logout(store: &SessionStore) -> Result<()> {
    if store.get().is_none() {
        println!("No active session.");
        return Ok(());
    }
    store.logout()?;
    println!("Session cleared.");
    Ok(())
}

fn read_password(password: Option<String>, username: &str) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => Password::new()
            .with_prompt(format!("Password for {}", username))
            .interact()
            .context("failed to read password"),
    }
}
