use std::time::Duration;

use gio::glib::{self, WeakRef};
use gtk4::{prelude::*, ApplicationWindow, Grid};
use tracing::debug;

use super::tile::tile;
use crate::grid::cell::CellSpec;
use crate::grid::layout::{position_of, WindowSize};
use crate::grid::{GridEvent, GridSurface};
use crate::host::AppDescriptor;

/// Delay before pointer input is accepted again after a refresh.
const POINTER_RESET: Duration = Duration::from_millis(10);

/// [`GridSurface`] backed by a GTK window and grid.
pub struct GtkGridSurface {
    window: WeakRef<ApplicationWindow>,
    grid: WeakRef<Grid>,
    sender: async_channel::Sender<GridEvent>,
    daemonize: bool,
}

impl GtkGridSurface {
    pub fn new(
        window: &ApplicationWindow,
        grid: &Grid,
        sender: async_channel::Sender<GridEvent>,
        daemonize: bool,
    ) -> Self {
        Self {
            window: window.downgrade(),
            grid: grid.downgrade(),
            sender,
            daemonize,
        }
    }
}

impl GridSurface for GtkGridSurface {
    fn render(&self, apps: &[AppDescriptor]) {
        let Some(grid) = self.grid.upgrade() else {
            return;
        };
        while let Some(child) = grid.first_child() {
            grid.remove(&child);
        }
        for (index, app) in apps.iter().enumerate() {
            let spec = CellSpec::new(index, app);
            let (column, row) = position_of(index);
            grid.attach(&tile(&spec, self.sender.clone()), column, row, 1, 1);
        }
    }

    fn resize(&self, size: WindowSize) {
        if let Some(window) = self.window.upgrade() {
            window.set_size_request(size.width, size.height);
            window.set_default_size(size.width, size.height);
        }
    }

    fn hide(&self) {
        let Some(window) = self.window.upgrade() else {
            return;
        };
        if self.daemonize {
            window.set_visible(false);
        } else {
            window.close();
        }
    }

    fn refresh_pointer(&self) {
        let Some(grid) = self.grid.upgrade() else {
            return;
        };
        grid.set_can_target(false);
        let grid = grid.downgrade();
        glib::timeout_add_local_once(POINTER_RESET, move || {
            if let Some(grid) = grid.upgrade() {
                grid.set_can_target(true);
                debug!("Pointer input re-enabled");
            }
        });
    }
}
