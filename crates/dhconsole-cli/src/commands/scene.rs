use super::Console;
use anyhow::{Result, anyhow};
use dhconsole_core::model::PropKey;

pub async fn list(console: &Console) -> Result<()> {
    let props = console.service.get_props_near_me().await?;
    for prop in &props {
        let states: Vec<String> = prop
            .valid_states
            .iter()
            .map(|(label, id)| format!("{label}:{id}"))
            .collect();
        println!(
            "{:<14} {:>7.1}m  {:<16} {:>7}  {}:{}  ({})",
            prop.key().to_string(),
            prop.distance_meters(),
            prop.prop_type,
            prop.prop_id,
            prop.state,
            prop.state_id,
            states.join(", ")
        );
    }
    Ok(())
}

pub async fn change_state(console: &Console, group: u32, entity: u32, state: u32) -> Result<()> {
    let key = PropKey {
        group_id: group,
        entity_id: entity,
    };
    let props = console.service.get_props_near_me().await?;
    let prop = props
        .iter()
        .find(|prop| prop.key() == key)
        .ok_or_else(|| anyhow!("Prop {key} is not near the player"))?;

    let output = console.service.change_prop_state(prop, state).await?;
    println!("{}", output.trim_end());
    Ok(())
}
