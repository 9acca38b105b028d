use super::Console;
use anyhow::Result;

pub async fn server_info(console: &Console) -> Result<()> {
    let info = console.service.server_information().await?;

    println!("Server time:   {}", info.server_time);
    println!(
        "Memory:        {:.1} / {:.1} MB (console {:.1} MB)",
        info.used_memory, info.max_memory, info.program_used_memory
    );
    println!("Online players: {}", info.online_players.len());
    for player in &info.online_players {
        println!("  {:>10}  {}", player.uid, player.name);
    }
    Ok(())
}

pub async fn player_info(console: &Console) -> Result<()> {
    let uid = console.service.executor().target_uid();
    let profile = console.service.player_information(uid).await?;
    let basic = console.service.get_player_info().await?;

    println!("{} ({})", profile.name, profile.uid);
    if !profile.signature.is_empty() {
        println!("  \"{}\"", profile.signature);
    }
    println!("  Level:  {}", basic.level);
    println!("  Gender: {}", basic.gender);
    println!("  Floor:  {}", profile.cur_floor_id);
    Ok(())
}

pub async fn exec(console: &Console, command: &str) -> Result<()> {
    let output = console.service.execute(command).await?;
    println!("{}", output.trim_end());
    Ok(())
}
