pub use self::{board::*, marker::*, position::*};

pub(crate) mod board;
pub(crate) mod marker;
pub(crate) mod position;
