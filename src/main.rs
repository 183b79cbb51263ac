use gio::prelude::*;
use gtk4::prelude::{GtkWindowExt, WidgetExt};
use gtk4::{glib, Application, ApplicationWindow};
use once_cell::sync::OnceCell;
use std::process;
use std::sync::RwLock;
use tracing::{info, warn};

mod actions;
mod application;
mod daemon;
mod grid;
mod host;
mod loader;
mod ui;
mod utils;

use application::lock::{Instance, LockFile};
use daemon::{DaemonCommand, LauncherDaemon};
use host::{Host, LocalHost};
use loader::Loader;
use utils::config::LauncherConfig;
use utils::logging;

const APPLICATION_ID: &str = "io.github.quicknav";
const LOCK_FILE: &str = "quicknav.lock";

static CONFIG: OnceCell<RwLock<LauncherConfig>> = OnceCell::new();

#[tokio::main]
async fn main() {
    let _log_guard = logging::init();

    let flags = Loader::load_flags().unwrap_or_else(|e| {
        e.log(true);
        process::exit(2);
    });
    let config = match flags.to_config() {
        Ok((config, non_breaking)) => {
            non_breaking.iter().for_each(|e| e.log(false));
            config
        }
        Err(e) => {
            e.log(true);
            LauncherConfig::default()
        }
    };

    let host = LocalHost::new(config.files.apps.clone(), config.files.icons.clone());

    if flags.list {
        let apps = host.get_app_list().await.unwrap_or_else(|e| {
            e.log(true);
            process::exit(1);
        });
        match serde_json::to_string_pretty(&apps) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                warn!(error = %e, "Failed to serialize application list");
                process::exit(1);
            }
        }
        return;
    }

    let lock = match LockFile::single_instance(LockFile::get_path(LOCK_FILE), flags.take_over) {
        Ok(Instance::Acquired(lock)) => lock,
        Ok(Instance::Running(pid)) => {
            info!(pid, "Already running, toggling its window");
            if let Err(e) =
                LauncherDaemon::send(LauncherDaemon::socket_path(), DaemonCommand::REINVOKED)
            {
                e.log(false);
            }
            return;
        }
        Err(e) => {
            e.log(true);
            process::exit(1);
        }
    };

    let daemonize = config.behavior.daemonize;
    let _ = CONFIG.set(RwLock::new(config.clone()));

    let (command_tx, command_rx) = async_channel::unbounded::<DaemonCommand>();
    if daemonize {
        match LauncherDaemon::bind(LauncherDaemon::socket_path()) {
            Ok(daemon) => {
                tokio::spawn(daemon.run(command_tx));
            }
            Err(e) => e.log(true),
        }
    }

    let application = Application::builder()
        .application_id(APPLICATION_ID)
        .flags(gio::ApplicationFlags::NON_UNIQUE)
        .build();

    application.connect_activate(move |app| {
        if let Err(e) = Loader::load_css() {
            e.log(false);
        }

        let (window, controller) = ui::build(app, &config, host.clone());

        glib::MainContext::default().spawn_local({
            let controller = controller.clone();
            async move {
                controller.refresh().await;
            }
        });
        glib::MainContext::default().spawn_local(handle_commands(
            app.downgrade(),
            window.downgrade(),
            command_rx.clone(),
        ));

        // A resident instance starts hidden and waits for a show request.
        if !daemonize {
            window.present();
        }
    });

    // Flags were parsed by clap already.
    application.run_with_args::<&str>(&[]);
    drop(lock);
}

async fn handle_commands(
    app: glib::WeakRef<Application>,
    window: glib::WeakRef<ApplicationWindow>,
    receiver: async_channel::Receiver<DaemonCommand>,
) {
    while let Ok(command) = receiver.recv().await {
        let Some(window) = window.upgrade() else {
            break;
        };
        match command.next_visibility(window.is_visible()) {
            Some(true) => window.present(),
            Some(false) => window.set_visible(false),
            None => {
                if let Some(app) = app.upgrade() {
                    app.quit();
                }
                break;
            }
        }
    }
}
