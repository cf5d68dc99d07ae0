//! UI Components
//!
//! The item form controller and the presentational views it composes.

mod created_items_title;
mod input_field;
mod item_card;
mod new_item_form;
mod text_area;

pub use created_items_title::CreatedItemsTitle;
pub use input_field::InputField;
pub use item_card::ItemCard;
pub use new_item_form::NewItemForm;
pub use text_area::TextArea;
