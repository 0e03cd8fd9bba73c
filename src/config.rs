use crate::constants::{
    DEFAULT_STORE_HOST, SERVICE_ACCOUNT_FILE_VAR, STORE_AUTH_TOKEN_VAR, STORE_HOST_VAR,
    STORE_PROJECT_ID_VAR,
};
use crate::utils::{env_var, env_var_or};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

pub static CONFIG: Lazy<Config> = Lazy::new(|| Config::new_from_env());

/// the relevant slice of a service-account credential file
#[derive(Deserialize)]
struct ServiceAccountKey {
    project_id: String,
}

pub struct Config {
    pub credential_file: PathBuf,
    pub project_id: String,
    pub store_host: String,
    pub auth_token: String,
}

impl Config {
    /// explodes if the credential file is missing or unreadable
    fn new_from_env() -> Self {
        let credential_file = PathBuf::from(env_var(SERVICE_ACCOUNT_FILE_VAR));
        let project_id = match std::env::var(STORE_PROJECT_ID_VAR) {
            Ok(p) => p,
            Err(_) => project_id_from_key_file(&credential_file),
        };
        Self {
            credential_file,
            project_id,
            store_host: env_var_or(STORE_HOST_VAR, DEFAULT_STORE_HOST),
            // "owner" is what the emulator accepts; real deployments set a minted token
            auth_token: env_var_or(STORE_AUTH_TOKEN_VAR, "owner"),
        }
    }
}

fn project_id_from_key_file(path: &PathBuf) -> String {
    let f = File::open(path)
        .unwrap_or_else(|e| panic!("Unable to open credential file {}: {e}", path.display()));
    let key: ServiceAccountKey = serde_json::from_reader(BufReader::new(f))
        .unwrap_or_else(|e| panic!("Malformed credential file {}: {e}", path.display()));
    key.project_id
}
