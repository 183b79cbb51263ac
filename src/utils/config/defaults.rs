use std::path::PathBuf;

pub struct FileDefaults;
impl FileDefaults {
    pub fn apps() -> PathBuf {
        PathBuf::from("~/.config/quicknav/apps.txt")
    }
    pub fn icons() -> PathBuf {
        PathBuf::from("~/.config/quicknav/icons/")
    }
    pub fn css() -> PathBuf {
        PathBuf::from("~/.config/quicknav/main.css")
    }
}

pub struct OtherDefaults;
impl OtherDefaults {
    pub fn bool_true() -> bool {
        true
    }
    pub fn one() -> f64 {
        1.0
    }
}
