pub mod cell;
pub mod controller;
pub mod layout;
pub mod mnemonic;

use crate::host::AppDescriptor;
use layout::WindowSize;

pub use controller::GridController;

/// User input after it has been mapped onto the grid. Clicks and key presses
/// both end up here so there is a single activation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    ItemActivated(usize),
    EscapePressed,
}

/// The window side of the launcher.
pub trait GridSurface {
    /// Replaces all cells with one cell per descriptor, in order.
    fn render(&self, apps: &[AppDescriptor]);
    fn resize(&self, size: WindowSize);
    fn hide(&self);
    /// Forces the pointer hover state to be recomputed after a refresh.
    fn refresh_pointer(&self) {}
}

/// The currently shown application list and the refresh bookkeeping that
/// guards it.
#[derive(Debug, Default)]
pub struct AppState {
    apps: Vec<AppDescriptor>,
    latest_refresh: u64,
}
impl AppState {
    /// Registers a new refresh and returns its generation.
    pub fn begin_refresh(&mut self) -> u64 {
        self.latest_refresh += 1;
        self.latest_refresh
    }

    /// Replaces the list if no newer refresh started after `generation`.
    /// Returns whether the list was replaced.
    pub fn commit(&mut self, generation: u64, apps: Vec<AppDescriptor>) -> bool {
        if generation != self.latest_refresh {
            return false;
        }
        self.apps = apps;
        true
    }

    pub fn apps(&self) -> &[AppDescriptor] {
        &self.apps
    }
    pub fn get(&self, index: usize) -> Option<&AppDescriptor> {
        self.apps.get(index)
    }
    pub fn len(&self) -> usize {
        self.apps.len()
    }
}
