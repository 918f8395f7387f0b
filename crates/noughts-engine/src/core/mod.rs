pub use self::{board::*, line::*, mark::*};

pub(crate) mod board;
pub(crate) mod line;
pub(crate) mod mark;
