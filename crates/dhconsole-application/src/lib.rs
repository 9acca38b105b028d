//! Application layer: the command codec, the game facade, the display name
//! cache and the command audit hook.

pub mod audit;
pub mod command_service;
pub mod game_data;
pub mod game_service;

pub use audit::{AUDIT_TARGET, CommandAuditEvent, CommandAuditLayer};
pub use command_service::CommandService;
pub use game_data::{GameData, TextLookup};
pub use game_service::{GameService, GiveAllKind, MaxAllKind, UnlockAllKind};
