pub mod card_editor;
pub mod card_grid;
pub mod context_menu;
pub mod delete_confirm;
