use crate::constants::LOG4RS_CONF_FILE_VAR;

pub fn env_var(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| panic!("Missing environment variable {key}"))
}

pub fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// sets up log4rs if a config file is pointed at; scripts are fine without one
pub fn init_logging() {
    if let Ok(conf) = std::env::var(LOG4RS_CONF_FILE_VAR) {
        if let Err(e) = log4rs::init_file(&conf, Default::default()) {
            eprintln!("Unable to initialize logging from {conf}: {e}");
        }
    }
}
