pub use todo_core::prelude::*;

// vim: ts=4
