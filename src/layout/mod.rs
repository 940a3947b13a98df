mod flex;
mod rect;

pub use flex::{layout, measure, LayoutResult};
pub use rect::Rect;
