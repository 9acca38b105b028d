use super::Console;
use anyhow::Result;
use dhconsole_core::model::GameEntity;

pub async fn list(console: &Console) -> Result<()> {
    let missions = console.service.get_current_missions().await?;
    if missions.is_empty() {
        println!("No running missions");
        return Ok(());
    }

    for (main_id, sub_ids) in &missions {
        println!("{}", console.label(GameEntity::MainMission, *main_id).await);
        for sub_id in sub_ids {
            println!("  {}", console.label(GameEntity::SubMission, *sub_id).await);
        }
    }
    Ok(())
}

pub async fn finish(console: &Console, id: u32, main: bool) -> Result<()> {
    let output = if main {
        console.service.finish_main_mission(id).await?
    } else {
        console.service.finish_sub_mission(id).await?
    };
    println!("{}", output.trim_end());
    Ok(())
}
