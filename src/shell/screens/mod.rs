//! Screen implementations for the hub state machine.

mod archery;
mod auth;
mod home;
mod lobby;
mod naval;
mod pong;
mod thunder;

pub use archery::ArcheryScreen;
pub use auth::AuthScreen;
pub use home::HomeScreen;
pub use lobby::{HOUSE_OPPONENT, LobbyScreen};
pub use naval::NavalScreen;
pub use pong::PongScreen;
pub use thunder::ThunderScreen;
