//! UI Components
//!
//! Reusable Leptos components.

mod budget_page;
mod calendar_page;
mod checklist;
mod checklist_item;
mod context_menu;
mod dialog;
mod header;
mod pager_dots;
mod shopping_board;
mod shopping_page;
mod shopping_pager;

pub use budget_page::BudgetPage;
pub use calendar_page::CalendarPage;
pub use checklist::Checklist;
pub use checklist_item::{ChecklistItem, ItemRef};
pub use context_menu::ContextMenu;
pub use dialog::TitleDialog;
pub use header::Header;
pub use pager_dots::PagerDots;
pub use shopping_board::ShoppingBoard;
pub use shopping_page::ShoppingPage;
pub use shopping_pager::ShoppingPager;
