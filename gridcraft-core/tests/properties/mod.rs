//! Property test modules

mod drag_drop_tests;
mod ordered_map_tests;
mod resolver_tests;
mod tree_tests;
