use std::cell::RefCell;

use tracing::{debug, error, info};

use crate::host::Host;

use super::layout::WindowSize;
use super::mnemonic::route_key;
use super::{AppState, GridEvent, GridSurface};

/// Owns the application list and ties the host to the window.
///
/// All methods run on the UI thread. Host calls are awaited without holding a
/// borrow on the state, so a refresh and an activation can interleave; the
/// refresh generation in [`AppState`] makes sure an older refresh never
/// overwrites a newer one.
pub struct GridController<H, S> {
    host: H,
    surface: S,
    state: RefCell<AppState>,
}

impl<H: Host, S: GridSurface> GridController<H, S> {
    pub fn new(host: H, surface: S) -> Self {
        Self {
            host,
            surface,
            state: RefCell::new(AppState::default()),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    pub fn route_key(&self, key: &str) -> Option<GridEvent> {
        route_key(key, self.len())
    }

    /// Fetches the list, then renders and resizes. Returns `false` when the
    /// fetch failed or a newer refresh superseded this one; the current grid is
    /// left untouched in both cases.
    pub async fn refresh(&self) -> bool {
        let generation = self.state.borrow_mut().begin_refresh();
        let apps = match self.host.get_app_list().await {
            Ok(apps) => apps,
            Err(e) => {
                e.log(true);
                return false;
            }
        };

        let count = apps.len();
        if !self.state.borrow_mut().commit(generation, apps) {
            debug!(generation, "Dropping stale application list");
            return false;
        }

        {
            let state = self.state.borrow();
            self.surface.render(state.apps());
        }
        self.surface.resize(WindowSize::for_count(count));
        debug!(generation, count, "Application grid refreshed");
        true
    }

    pub async fn refresh_on_focus(&self) {
        self.refresh().await;
        self.surface.refresh_pointer();
    }

    /// Launches or focuses the application at `index` and hides the window on
    /// success. Returns whether the host reported success.
    pub async fn activate(&self, index: usize) -> bool {
        let Some(app) = self.state.borrow().get(index).cloned() else {
            error!(index, "No application at grid position");
            return false;
        };

        match self
            .host
            .launch_or_focus_app(app.process_name.clone(), app.launch_path.clone())
            .await
        {
            Ok(message) => {
                info!(app = %app.display_name, "{}", message);
                self.surface.hide();
                true
            }
            Err(e) => {
                e.log(true);
                false
            }
        }
    }

    pub async fn handle_event(&self, event: GridEvent) {
        match event {
            GridEvent::ItemActivated(index) => {
                self.activate(index).await;
            }
            GridEvent::EscapePressed => self.surface.hide(),
        }
    }
}
