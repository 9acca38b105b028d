use anyhow::Result;
use clap::{Parser, Subcommand};
use dhconsole_application::CommandAuditLayer;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "dhconsole")]
#[command(about = "DHConsole - admin console for MUIP-enabled game servers", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to ~/.config/dhconsole/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Player uid commands act on
    #[arg(long, global = true)]
    uid: Option<u32>,

    /// Locale for game text (en, ja, zh_CN, ...)
    #[arg(long, global = true)]
    language: Option<String>,

    /// Print the commands sent to the server once the run is over
    #[arg(long, global = true)]
    history: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the admin key in secret.json
    SetKey { key: String },
    /// Show server status and online players
    ServerInfo,
    /// Show the target player's profile
    PlayerInfo,
    /// Send a raw command and print the response
    Exec {
        #[arg(required = true, trailing_var_arg = true)]
        words: Vec<String>,
    },
    /// Show a character's level, light cone and relics
    Character { id: u32 },
    /// Show the recommended relic build for a character
    Recommend {
        id: u32,
        /// Equip the recommended relics
        #[arg(long)]
        apply: bool,
    },
    /// List the target player's items
    Inventory,
    /// Give an item to the target player
    Give {
        item: u32,
        #[arg(default_value_t = 1)]
        count: u32,
    },
    /// List running missions
    Missions,
    /// Finish a sub mission, or a main mission with --main
    FinishMission {
        id: u32,
        #[arg(long)]
        main: bool,
    },
    /// List props near the player, nearest first
    Props,
    /// Change the state of a nearby prop
    PropState {
        group: u32,
        entity: u32,
        state: u32,
    },
    /// Look up a display name (kind: avatar, item, mainmission, submission)
    Gametext { kind: String, id: u32 },
}

fn init_tracing() -> tokio::sync::mpsc::UnboundedReceiver<dhconsole_application::CommandAuditEvent> {
    let (audit_layer, receiver) = CommandAuditLayer::channel();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())),
        )
        // Audit events bypass RUST_LOG
        .with(audit_layer)
        .init();
    receiver
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut audit_events = init_tracing();

    let options = commands::ConsoleOptions {
        config_path: cli.config,
        uid: cli.uid,
        language: cli.language,
    };

    let outcome = run(cli.command, options).await;

    if cli.history {
        while let Ok(event) = audit_events.try_recv() {
            let uid = event
                .target_uid
                .map(|uid| uid.to_string())
                .unwrap_or_else(|| "-".to_string());
            eprintln!("[{}] uid={} {}: {}", event.level, uid, event.message, event.command);
        }
    }

    outcome
}

async fn run(command: Commands, options: commands::ConsoleOptions) -> Result<()> {
    let connect = || commands::Console::connect(&options);

    match command {
        Commands::SetKey { key } => commands::key::set_key(&key)?,
        Commands::ServerInfo => commands::server::server_info(&connect()?).await?,
        Commands::PlayerInfo => commands::server::player_info(&connect()?).await?,
        Commands::Exec { words } => commands::server::exec(&connect()?, &words.join(" ")).await?,
        Commands::Character { id } => commands::character::show(&connect()?, id).await?,
        Commands::Recommend { id, apply } => {
            commands::character::recommend(&connect()?, id, apply).await?
        }
        Commands::Inventory => commands::inventory::list(&connect()?).await?,
        Commands::Give { item, count } => {
            commands::inventory::give(&connect()?, item, count).await?
        }
        Commands::Missions => commands::mission::list(&connect()?).await?,
        Commands::FinishMission { id, main } => {
            commands::mission::finish(&connect()?, id, main).await?
        }
        Commands::Props => commands::scene::list(&connect()?).await?,
        Commands::PropState {
            group,
            entity,
            state,
        } => commands::scene::change_state(&connect()?, group, entity, state).await?,
        Commands::Gametext { kind, id } => {
            commands::gametext::lookup(&connect()?, &kind, id).await?
        }
    }

    Ok(())
}
