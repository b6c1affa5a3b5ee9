pub mod menu_bar;
pub mod name_prompt;
pub mod report;
pub mod status;
pub mod viewport;
