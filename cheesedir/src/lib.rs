//! cheesedir library - interactive cheese directory
//!
//! Console prompting, the numbered menu, and the controller that applies menu
//! choices to the record store and its mirror.

pub mod app;
pub mod console;
pub mod entry;
pub mod menu;

pub use app::App;
pub use console::Console;
pub use menu::MenuOption;
