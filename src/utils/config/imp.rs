use crate::utils::config::{
    defaults::{FileDefaults, OtherDefaults},
    ConfigAppearance, ConfigFiles,
};

impl Default for ConfigFiles {
    fn default() -> Self {
        Self {
            apps: FileDefaults::apps(),
            icons: FileDefaults::icons(),
            css: FileDefaults::css(),
        }
    }
}

impl Default for ConfigAppearance {
    fn default() -> Self {
        Self {
            opacity: OtherDefaults::one(),
            use_base_css: OtherDefaults::bool_true(),
        }
    }
}
