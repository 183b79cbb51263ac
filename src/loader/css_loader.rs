use gtk4::gdk::Display;
use gtk4::CssProvider;

use super::Loader;
use crate::launcher_error;
use crate::utils::config::ConfigGuard;
use crate::utils::errors::{LauncherError, LauncherErrorType};

const BASE_CSS: &str = "
window.quicknav {
    background-color: alpha(@window_bg_color, 0.92);
    border-radius: 14px;
}
.nav-item {
    min-width: 80px;
    min-height: 80px;
    padding: 0;
    border-radius: 12px;
    background: none;
    box-shadow: none;
}
.nav-item:hover,
.nav-item:focus {
    background-color: alpha(@accent_bg_color, 0.25);
}
.nav-item image {
    -gtk-icon-size: 64px;
}
.nav-item .fallback-label {
    font-weight: bold;
}
.nav-item .indicator {
    min-width: 6px;
    min-height: 6px;
    border-radius: 3px;
    background-color: transparent;
}
.nav-item.running .indicator {
    background-color: @accent_bg_color;
}
";

impl Loader {
    /// Installs the built-in stylesheet (unless disabled) and the user
    /// stylesheet on the default display. A missing user stylesheet is not an
    /// error.
    pub fn load_css() -> Result<(), LauncherError> {
        let config = ConfigGuard::read()?;
        let display = Display::default().ok_or_else(|| {
            launcher_error!(LauncherErrorType::DisplayError, "No display available")
        })?;

        if config.appearance.use_base_css {
            let provider = CssProvider::new();
            provider.load_from_string(BASE_CSS);
            gtk4::style_context_add_provider_for_display(
                &display,
                &provider,
                gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
        }

        let user_css = &config.files.css;
        if user_css.is_file() {
            let provider = CssProvider::new();
            provider.load_from_path(user_css);
            gtk4::style_context_add_provider_for_display(
                &display,
                &provider,
                gtk4::STYLE_PROVIDER_PRIORITY_USER,
            );
            tracing::debug!(path = %user_css.display(), "Added user style provider");
        }
        Ok(())
    }
}
