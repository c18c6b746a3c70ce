pub mod player;

pub use player::{CommandPlayer, Player, PrintPlayer};
