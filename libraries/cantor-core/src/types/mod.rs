//! Domain types for Cantor

mod ids;
mod setlist;
mod song;
mod user;

pub use ids::{SetlistId, SongId, UserId};
pub use setlist::Setlist;
pub use song::{Song, UpdateSong};
pub use user::User;
