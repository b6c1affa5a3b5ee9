mod ui;
mod viewport;

pub use ui::{ThemeChoice, UIState};
pub use viewport::ViewportState;
