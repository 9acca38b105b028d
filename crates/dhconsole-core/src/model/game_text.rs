use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Kind of entity whose display names come from `gametext`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameEntity {
    Avatar,
    Item,
    MainMission,
    SubMission,
}

impl GameEntity {
    /// Argument of the `gametext` verb for this kind.
    pub fn command_name(self) -> &'static str {
        match self {
            Self::Avatar => "avatar",
            Self::Item => "item",
            Self::MainMission => "mainmission",
            Self::SubMission => "submission",
        }
    }
}

/// Languages the server can render game text in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Language {
    ChineseSimplified,
    ChineseTraditional,
    English,
    Japanese,
    Korean,
    Spanish,
    French,
    Indonesian,
    Portuguese,
    Russian,
    Thai,
    Vietnamese,
}

impl Language {
    /// Maps a UI locale code (`en`, `zh_CN`, ...) to a language.
    pub fn from_locale(locale: &str) -> Result<Self> {
        let language = match locale {
            "zh_CN" => Self::ChineseSimplified,
            "zh_HK" => Self::ChineseTraditional,
            "en" => Self::English,
            "ja" => Self::Japanese,
            "ko" => Self::Korean,
            "es" => Self::Spanish,
            "fr" => Self::French,
            "id" => Self::Indonesian,
            "pt" => Self::Portuguese,
            "ru" => Self::Russian,
            "th" => Self::Thai,
            "vi" => Self::Vietnamese,
            other => {
                return Err(ConsoleError::invalid_argument(format!(
                    "Invalid language code: {other}"
                )));
            }
        };
        Ok(language)
    }

    pub fn locale(self) -> &'static str {
        match self {
            Self::ChineseSimplified => "zh_CN",
            Self::ChineseTraditional => "zh_HK",
            Self::English => "en",
            Self::Japanese => "ja",
            Self::Korean => "ko",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::Indonesian => "id",
            Self::Portuguese => "pt",
            Self::Russian => "ru",
            Self::Thai => "th",
            Self::Vietnamese => "vi",
        }
    }

    /// Code the server expects after `#` in a `gametext` command.
    pub fn server_code(self) -> &'static str {
        match self {
            Self::ChineseSimplified => "CHS",
            Self::ChineseTraditional => "CHT",
            Self::English => "EN",
            Self::Japanese => "JP",
            Self::Korean => "KR",
            Self::Spanish => "ES",
            Self::French => "FR",
            Self::Indonesian => "ID",
            Self::Portuguese => "PT",
            Self::Russian => "RU",
            Self::Thai => "TH",
            Self::Vietnamese => "VI",
        }
    }
}
