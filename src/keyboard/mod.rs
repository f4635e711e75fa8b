pub mod char_map;
pub mod display;
pub mod finger;
pub mod key;
pub mod layout;
pub mod model;
pub mod rows;

pub use char_map::CharMap;
pub use key::PhysicalKey;
pub use layout::{LayoutResolver, Modifiers};
pub use model::KeyboardModel;
pub use rows::{RowLayout, row_layout};
