/// Rendering: shell panels, chart helpers and one module per page.
///
/// Widgets read and mutate [`crate::state::AppState`]; everything numeric comes
/// from [`crate::data::aggregate`].

pub mod pages;
pub mod panels;
pub mod plot;
