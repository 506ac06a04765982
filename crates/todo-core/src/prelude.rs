pub use crate::app::App;
pub use todo_types::prelude::*;

// vim: ts=4
