//! Custom widgets for the snippet browser

mod help_bar;
mod item_list;
mod text_area;

pub use help_bar::{BROWSE_HINTS, EDIT_HINTS, HelpBar, KeyHint, hint_line};
pub use item_list::{ITEM_HEIGHT, ItemList, ItemListState, ListNavigator};
pub use text_area::{TextArea, TextAreaState};
