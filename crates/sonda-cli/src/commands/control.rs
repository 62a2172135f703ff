//! LED and button listing and switching.

use anyhow::{Context, Result, anyhow};

use sonda_core::{ApiClient, SessionStore};
use sonda_types::Source;

use crate::cli::SwitchAction;
use crate::format::{self, FormatOptions};

pub async fn cmd_leds(client: &ApiClient, opts: FormatOptions) -> Result<()> {
    let leds = client.list_leds().await?;
    println!("{}", format::leds_table(&leds, opts));
    Ok(())
}

pub async fn cmd_switch_led(
    client: &ApiClient,
    store: &SessionStore,
    id: i64,
    action: SwitchAction,
    opts: FormatOptions,
) -> Result<()> {
    let actor = require_user(store)?;

    let on = match action {
        SwitchAction::On => true,
        SwitchAction::Off => false,
        SwitchAction::Toggle => {
            let leds = client.list_leds().await?;
            let led = leds
                .iter()
                .find(|l| l.id == id)
                .with_context(|| format!("no LED with id {}", id))?;
            !led.on
        }
    };

    let updated = client.set_led(id, on, &actor, Source::Web).await?;
    println!("{} is now {}", updated.name, opts.on_off(updated.on));

    // Refresh after the mutation; the server state is authoritative.
    let leds = client.list_leds().await?;
    println!("{}", format::leds_table(&leds, opts));
    Ok(())
}

pub async fn cmd_buttons(client: &ApiClient, opts: FormatOptions) -> Result<()> {
    let buttons = client.list_buttons().await?;
    println!("{}", format::buttons_table(&buttons, opts));
    Ok(())
}

pub async fn cmd_switch_button(
    client: &ApiClient,
    store: &SessionStore,
    id: i64,
    action: SwitchAction,
    opts: FormatOptions,
) -> Result<()> {
    let actor = require_user(store)?;

    let on = match action {
        SwitchAction::On => true,
        SwitchAction::Off => false,
        SwitchAction::Toggle => {
            let buttons = client.list_buttons().await?;
            let button = buttons
                .iter()
                .find(|b| b.id == id)
                .with_context(|| format!("no button with id {}", id))?;
            !button.on
        }
    };

    let updated = client.set_button(id, on, &actor, Source::Web).await?;
    println!("Pulsador {} is now {}", updated.id, opts.on_off(updated.on));

    let buttons = client.list_buttons().await?;
    println!("{}", format::buttons_table(&buttons, opts));
    Ok(())
}

fn require_user(store: &SessionStore) -> Result<String> {
    store
        .get()
        .map(|session| session.user.username)
        .ok_or_else(|| anyhow!("not logged in; run `sonda login <username>` first"))
}
