pub mod character;
pub mod gametext;
pub mod inventory;
pub mod key;
pub mod mission;
pub mod scene;
pub mod server;

use anyhow::Result;
use dhconsole_application::{CommandService, GameData, GameService, TextLookup};
use dhconsole_core::model::{GameEntity, Language};
use dhconsole_infrastructure::{ConfigStorage, SecretStorage};
use dhconsole_interaction::{HttpMuipTransport, http_session_manager};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Overrides given on the command line.
pub struct ConsoleOptions {
    pub config_path: Option<PathBuf>,
    pub uid: Option<u32>,
    pub language: Option<String>,
}

/// Everything a subcommand needs to talk to the server.
pub struct Console {
    pub service: GameService<CommandService<HttpMuipTransport>>,
    pub game_data: GameData,
    pub language: Language,
}

impl Console {
    pub fn connect(options: &ConsoleOptions) -> Result<Self> {
        let storage = match &options.config_path {
            Some(path) => ConfigStorage::new(path.clone()),
            None => ConfigStorage::default_location()?,
        };
        let mut config = storage.load_effective()?;
        if let Some(uid) = options.uid {
            config.target_uid = uid;
        }
        if let Some(language) = &options.language {
            config.language = language.clone();
        }
        let language = Language::from_locale(&config.language)?;

        let admin_key = SecretStorage::new()?.resolve_admin_key()?;
        if admin_key.is_none() {
            warn!("No admin key configured; run `dhconsole set-key <key>`");
        }

        let sessions = Arc::new(http_session_manager(&config.muip, admin_key)?);
        let commands = Arc::new(CommandService::new(sessions, config.target_uid));
        debug!(target_uid = config.target_uid, base_url = %config.muip.base_url(config.muip.use_ssl), "Console ready");

        Ok(Self {
            service: GameService::new(commands),
            game_data: GameData::new(),
            language,
        })
    }

    /// Display name for `id`, loading the `kind` table on first use.
    ///
    /// Lookup failures only cost the name; the id is still printed.
    pub async fn display_name(&self, kind: GameEntity, id: u32) -> Option<String> {
        if let Err(err) = self.game_data.load(&self.service, kind, self.language).await {
            debug!(%kind, error = %err, "Game text unavailable");
            return None;
        }
        match self.game_data.get(id, self.language).await {
            TextLookup::Found(name) => Some(name),
            TextLookup::NotLoaded | TextLookup::Missing => None,
        }
    }

    /// `id (name)` or just `id`.
    pub async fn label(&self, kind: GameEntity, id: u32) -> String {
        match self.display_name(kind, id).await {
            Some(name) => format!("{id} ({name})"),
            None => id.to_string(),
        }
    }
}
