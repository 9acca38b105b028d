//! In-memory cache of game display names.
//!
//! Tables are fetched in bulk per (kind, language) and kept for the lifetime of
//! the process. Nothing is evicted; a reload of the same pair is a no-op.

use crate::game_service::GameService;
use dhconsole_core::model::{GameEntity, Language};
use dhconsole_core::{CommandExecutor, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

static UNBREAK_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?unbreak>").expect("unbreak tag pattern"));

/// Outcome of a display name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextLookup {
    Found(String),
    /// No table has been loaded for the language yet.
    NotLoaded,
    /// The language is loaded but the id is not in any of its tables.
    Missing,
}

impl TextLookup {
    pub fn found(self) -> Option<String> {
        match self {
            Self::Found(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Tables {
    texts: HashMap<Language, HashMap<GameEntity, BTreeMap<u32, String>>>,
    kinds: HashMap<u32, GameEntity>,
    loaded: HashSet<(GameEntity, Language)>,
    /// Relic type → relic ids of that type.
    relic_types: BTreeMap<u32, Vec<u32>>,
    relic_types_loaded: bool,
}

pub struct GameData {
    tables: RwLock<Tables>,
    // Serializes fetches so concurrent loads of one pair fetch once
    load_lock: Mutex<()>,
}

impl GameData {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            load_lock: Mutex::new(()),
        }
    }

    /// Fetches and stores the `kind` table for `language` unless already loaded.
    pub async fn load<E: CommandExecutor>(
        &self,
        service: &GameService<E>,
        kind: GameEntity,
        language: Language,
    ) -> Result<()> {
        if self.is_loaded(kind, language).await {
            return Ok(());
        }

        let _guard = self.load_lock.lock().await;
        if self.is_loaded(kind, language).await {
            return Ok(());
        }

        let table = service.load_game_text(kind, language).await?;
        let count = table.len();
        self.store(kind, language, table).await;
        info!(%kind, language = language.locale(), count, "Game text loaded");
        Ok(())
    }

    /// Loads every entity kind for `language`.
    pub async fn load_all<E: CommandExecutor>(
        &self,
        service: &GameService<E>,
        language: Language,
    ) -> Result<()> {
        for kind in [
            GameEntity::Avatar,
            GameEntity::Item,
            GameEntity::MainMission,
            GameEntity::SubMission,
        ] {
            self.load(service, kind, language).await?;
        }
        Ok(())
    }

    /// Adds a fetched table and marks the pair loaded.
    pub async fn store(&self, kind: GameEntity, language: Language, table: BTreeMap<u32, String>) {
        let mut tables = self.tables.write().await;
        for (id, text) in table {
            let text = UNBREAK_TAG.replace_all(&text, "").into_owned();
            tables
                .texts
                .entry(language)
                .or_default()
                .entry(kind)
                .or_default()
                .insert(id, text);
            tables.kinds.insert(id, kind);
        }
        tables.texts.entry(language).or_default().entry(kind).or_default();
        tables.loaded.insert((kind, language));
    }

    pub async fn is_loaded(&self, kind: GameEntity, language: Language) -> bool {
        self.tables.read().await.loaded.contains(&(kind, language))
    }

    /// Display name of `id` in `language`, whatever its kind.
    ///
    /// `NotLoaded` when the language has no table yet, or when `id` belongs to a
    /// kind whose table was loaded for another language only.
    pub async fn get(&self, id: u32, language: Language) -> TextLookup {
        let tables = self.tables.read().await;
        let Some(by_kind) = tables.texts.get(&language) else {
            return TextLookup::NotLoaded;
        };
        let Some(kind) = tables.kinds.get(&id) else {
            return TextLookup::Missing;
        };
        if !tables.loaded.contains(&(*kind, language)) {
            return TextLookup::NotLoaded;
        }
        by_kind
            .get(kind)
            .and_then(|table| table.get(&id))
            .map_or(TextLookup::Missing, |text| TextLookup::Found(text.clone()))
    }

    /// Kind of a previously stored id.
    pub async fn kind_of(&self, id: u32) -> Option<GameEntity> {
        self.tables.read().await.kinds.get(&id).copied()
    }

    /// The whole `kind` table for `language`; empty when not loaded.
    pub async fn all(&self, kind: GameEntity, language: Language) -> BTreeMap<u32, String> {
        self.tables
            .read()
            .await
            .texts
            .get(&language)
            .and_then(|by_kind| by_kind.get(&kind))
            .cloned()
            .unwrap_or_default()
    }

    /// Fetches the relic type index once.
    pub async fn load_relic_types<E: CommandExecutor>(&self, service: &GameService<E>) -> Result<()> {
        let _guard = self.load_lock.lock().await;
        if self.tables.read().await.relic_types_loaded {
            return Ok(());
        }

        let relic_types = service.load_relic_types().await?;
        let mut tables = self.tables.write().await;
        for (relic_id, relic_type) in relic_types {
            tables.relic_types.entry(relic_type).or_default().push(relic_id);
        }
        tables.relic_types_loaded = true;
        Ok(())
    }

    /// Relic ids of `relic_type`, ascending.
    pub async fn relics_of_type(&self, relic_type: u32) -> Vec<u32> {
        self.tables
            .read()
            .await
            .relic_types
            .get(&relic_type)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for GameData {
    fn default() -> Self {
        Self::new()
    }
}
