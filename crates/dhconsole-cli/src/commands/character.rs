use super::Console;
use anyhow::Result;
use dhconsole_core::model::{GameEntity, Relic, RelicSlot};
use std::collections::BTreeMap;

pub async fn show(console: &Console, id: u32) -> Result<()> {
    let character = console.service.get_character(id).await?;
    if character.is_empty() {
        println!("No data for character {id}");
        return Ok(());
    }

    println!("{}", console.label(GameEntity::Avatar, id).await);
    if let Some(level) = character.level {
        println!("  Level:  {level}");
    }
    if let Some(rank) = character.rank {
        println!("  Eidolon: {rank}");
    }
    if !character.talent.is_empty() {
        let talent: Vec<String> = character
            .talent
            .iter()
            .map(|(skill, level)| format!("{skill}:{level}"))
            .collect();
        println!("  Talent: {}", talent.join(" "));
    }
    if let Some(equip_id) = character.equip_id {
        println!(
            "  Light cone: {} lv{} s{}",
            console.label(GameEntity::Item, equip_id).await,
            character.equip_level.unwrap_or_default(),
            character.equip_rank.unwrap_or_default()
        );
    }
    print_relics(&character.relics);
    Ok(())
}

pub async fn recommend(console: &Console, id: u32, apply: bool) -> Result<()> {
    let relics = console.service.get_relic_recommend(id).await?;
    if relics.is_empty() {
        println!("No recommendation for character {id}");
        return Ok(());
    }
    print_relics(&relics);

    if apply {
        console.service.set_character_relics(id, &relics).await?;
        println!("Equipped {} relics", relics.len());
    }
    Ok(())
}

fn print_relics(relics: &BTreeMap<RelicSlot, Relic>) {
    for (slot, relic) in relics {
        let subs: Vec<String> = relic
            .sub_affixes
            .iter()
            .zip(&relic.sub_affix_levels)
            .map(|(name, level)| format!("{name}+{level}"))
            .collect();
        println!(
            "  [{slot}] {} lv{} {} | {}",
            relic.relic_id,
            relic.level,
            relic.main_affix,
            subs.join(", ")
        );
    }
}
