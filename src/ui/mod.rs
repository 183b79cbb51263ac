use std::rc::Rc;

use gio::glib;
use gtk4::{Application, ApplicationWindow};

use crate::grid::{GridController, GridEvent};
use crate::host::LocalHost;
use crate::utils::config::LauncherConfig;

pub mod grid_view;
pub mod tile;
pub mod window;

use grid_view::GtkGridSurface;

pub type Controller = GridController<LocalHost, GtkGridSurface>;

/// Builds the window, wires input to a [`Controller`] and starts the loop
/// that handles grid events on the main context.
pub fn build(
    application: &Application,
    config: &LauncherConfig,
    host: LocalHost,
) -> (ApplicationWindow, Rc<Controller>) {
    let (window, grid) = window::window(application, config);
    let (sender, receiver) = async_channel::unbounded::<GridEvent>();

    let surface = GtkGridSurface::new(
        &window,
        &grid,
        sender.clone(),
        config.behavior.daemonize,
    );
    let controller = Rc::new(GridController::new(host, surface));
    window::connect_events(&window, &controller, sender);

    glib::MainContext::default().spawn_local({
        let controller = Rc::clone(&controller);
        async move {
            while let Ok(event) = receiver.recv().await {
                controller.handle_event(event).await;
            }
        }
    });

    (window, controller)
}
