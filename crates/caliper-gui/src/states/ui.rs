use std::path::PathBuf;

/// Oldest log lines are dropped past this count.
const MAX_LOG_MESSAGES: usize = 200;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// DICOM file currently displayed.
    pub file_path: Option<PathBuf>,

    /// Last message shown in the status bar.
    pub status: String,

    /// Log messages.
    pub log_messages: Vec<String>,

    /// Text of the last generated report.
    pub report_text: Option<String>,
    pub show_report: bool,

    /// Name typed into the prompt for the pending measurement.
    pub name_input: String,

    pub theme: ThemeChoice,

    /// Background operation in flight (None = idle).
    pub busy: Option<&'static str>,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            let excess = self.log_messages.len() - MAX_LOG_MESSAGES;
            self.log_messages.drain(..excess);
        }
    }

    /// Show `msg` in the status bar and keep it in the log.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        self.add_log(msg.clone());
        self.status = msg;
    }

    /// File name of the open image, for the status bar.
    pub fn file_name(&self) -> Option<String> {
        self.file_path
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeChoice {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 3] = [ThemeChoice::Light, ThemeChoice::Dark, ThemeChoice::System];

    pub fn label(self) -> &'static str {
        match self {
            ThemeChoice::Light => "Light",
            ThemeChoice::Dark => "Dark",
            ThemeChoice::System => "System",
        }
    }

    pub fn preference(self) -> egui::ThemePreference {
        match self {
            ThemeChoice::Light => egui::ThemePreference::Light,
            ThemeChoice::Dark => egui::ThemePreference::Dark,
            ThemeChoice::System => egui::ThemePreference::System,
        }
    }
}
