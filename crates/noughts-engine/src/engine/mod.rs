//! Turn-ordered play on top of the plain [`Board`](crate::Board).
//!
//! [`Game`] tracks whose move it is and the moves played so far, and refuses
//! moves once the game has ended. The decision engine itself only ever sees
//! boards; `Game` is for callers that drive whole games, such as self-play
//! or an interactive session.

pub use self::game::*;

mod game;
