use std::rc::Rc;

use gio::glib;
use gtk4::{
    glib::Propagation, prelude::*, Application, ApplicationWindow, EventControllerKey, Grid,
    PropagationPhase,
};
use gtk4_layer_shell::{KeyboardMode, Layer, LayerShell};
use tracing::debug;

use super::Controller;
use crate::grid::layout::{WindowSize, GAP_X, GAP_Y, INDICATOR_SPACE, PADDING};
use crate::grid::GridEvent;
use crate::utils::config::LauncherConfig;

/// Creates the popup window and the grid that holds the cells.
pub fn window(application: &Application, config: &LauncherConfig) -> (ApplicationWindow, Grid) {
    let initial = WindowSize::for_count(0);
    let window = ApplicationWindow::builder()
        .application(application)
        .title("quicknav")
        .default_width(initial.width)
        .default_height(initial.height)
        .resizable(false)
        .decorated(false)
        .opacity(config.appearance.opacity)
        .build();
    window.add_css_class("quicknav");
    window.set_hide_on_close(config.behavior.daemonize);

    if gtk4_layer_shell::is_supported() {
        window.init_layer_shell();
        window.set_namespace("quicknav");
        window.set_layer(Layer::Overlay);
        window.set_keyboard_mode(KeyboardMode::Exclusive);
    } else {
        debug!("Layer shell unavailable, using a regular toplevel");
    }

    let grid = Grid::builder()
        .column_spacing(GAP_X as i32)
        .row_spacing(GAP_Y as i32)
        .column_homogeneous(true)
        .margin_top(PADDING as i32)
        .margin_start(PADDING as i32)
        .margin_end(PADDING as i32)
        .margin_bottom((PADDING + INDICATOR_SPACE) as i32)
        .build();
    window.set_child(Some(&grid));

    (window, grid)
}

/// Routes key presses through the controller and refreshes whenever the
/// window gains focus.
pub fn connect_events(
    window: &ApplicationWindow,
    controller: &Rc<Controller>,
    sender: async_channel::Sender<GridEvent>,
) {
    let key_controller = EventControllerKey::new();
    key_controller.set_propagation_phase(PropagationPhase::Capture);
    key_controller.connect_key_pressed({
        let controller = Rc::clone(controller);
        move |_, keyval, _, _| {
            let event = keyval
                .name()
                .and_then(|name| controller.route_key(name.as_str()));
            match event {
                Some(event) => {
                    let _ = sender.try_send(event);
                    Propagation::Stop
                }
                None => Propagation::Proceed,
            }
        }
    });
    window.add_controller(key_controller);

    window.connect_is_active_notify({
        let controller = Rc::clone(controller);
        move |window| {
            if !window.is_active() {
                return;
            }
            let controller = Rc::clone(&controller);
            glib::MainContext::default().spawn_local(async move {
                controller.refresh_on_focus().await;
            });
        }
    });
}
