use crate::host::{display_uri, AppDescriptor};

use super::mnemonic::key_for_index;

/// What a grid cell shows before any image loading is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    /// Try the icon at `uri`; show `fallback` as text if it cannot be loaded.
    Icon { uri: String, fallback: String },
    Label(String),
}
impl CellContent {
    pub fn for_descriptor(app: &AppDescriptor) -> Self {
        match app.icon_path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => CellContent::Icon {
                uri: display_uri(path),
                fallback: app.display_name.clone(),
            },
            None => CellContent::Label(app.display_name.clone()),
        }
    }

    /// Content to show once loading the icon failed.
    pub fn degrade(self) -> Self {
        match self {
            CellContent::Icon { fallback, .. } => CellContent::Label(fallback),
            label => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSpec {
    pub index: usize,
    pub content: CellContent,
    pub running: bool,
    pub tooltip: String,
}
impl CellSpec {
    pub fn new(index: usize, app: &AppDescriptor) -> Self {
        let tooltip = match key_for_index(index) {
            Some(key) => format!("{} ({})", app.display_name, key.to_ascii_uppercase()),
            None => app.display_name.clone(),
        };
        Self {
            index,
            content: CellContent::for_descriptor(app),
            running: app.is_running,
            tooltip,
        }
    }

    pub fn css_classes(&self) -> Vec<&'static str> {
        if self.running {
            vec!["nav-item", "running"]
        } else {
            vec!["nav-item"]
        }
    }
}
