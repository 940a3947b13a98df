pub mod buffer;
pub mod element;
pub mod event;
pub mod field;
pub mod focus;
pub mod hit;
pub mod layout;
pub mod render;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod text;
pub mod types;

pub use buffer::Buffer;
pub use element::Element;
pub use event::{Event, Key, Modifiers, MouseButton};
pub use field::{ControlSize, Field, FieldEvent, InputKind, Variant};
pub use focus::{collect_focusable, FocusState};
pub use hit::{hit_test, hit_test_focusable};
pub use layout::{LayoutResult, Rect};
pub use table::{Accessor, Column, SortDirection, SortState, Table, TableEvent, TableRow};
pub use terminal::Terminal;
pub use types::*;
