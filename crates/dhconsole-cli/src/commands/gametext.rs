use super::Console;
use anyhow::{Context, Result};
use dhconsole_application::TextLookup;
use dhconsole_core::model::GameEntity;

pub async fn lookup(console: &Console, kind: &str, id: u32) -> Result<()> {
    let kind: GameEntity = kind
        .parse()
        .with_context(|| format!("Unknown entity kind '{kind}'"))?;

    console
        .game_data
        .load(&console.service, kind, console.language)
        .await?;

    match console.game_data.get(id, console.language).await {
        TextLookup::Found(name) => println!("{name}"),
        TextLookup::NotLoaded | TextLookup::Missing => {
            anyhow::bail!("No {kind} with id {id} in {}", console.language.locale())
        }
    }
    Ok(())
}
