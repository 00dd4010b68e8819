use std::path::PathBuf;

const APP_DIR_NAME: &str = "RickMortyExplorer";

pub fn get_app_dir() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR_NAME)
}

pub fn get_settings_file() -> PathBuf {
    get_app_dir().join("settings.json")
}

pub fn init_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_app_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_live_in_app_dir() {
        let file = get_settings_file();
        assert_eq!(file.parent(), Some(get_app_dir().as_path()));
        assert!(get_app_dir().ends_with(APP_DIR_NAME));
    }
}
