use super::Console;
use anyhow::Result;
use dhconsole_core::model::GameEntity;

pub async fn list(console: &Console) -> Result<()> {
    let items = console.service.get_inventory().await?;
    for (id, count) in &items {
        println!("{:>8}  {}", count, console.label(GameEntity::Item, *id).await);
    }
    println!("{} item kinds", items.len());
    Ok(())
}

pub async fn give(console: &Console, item: u32, count: u32) -> Result<()> {
    let output = console.service.give_item(item, count).await?;
    println!("{}", output.trim_end());
    Ok(())
}
