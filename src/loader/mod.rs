pub mod app_loader;
pub mod css_loader;
pub mod flag_loader;
pub mod icon_loader;

pub struct Loader;
