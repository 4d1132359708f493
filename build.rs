use std::env;
use std::fs;
use std::path::Path;

// Variables que el cliente lee con option_env! (ver src/config.rs)
const KNOWN_KEYS: &[&str] = &[
    "SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "REDIRECT_DELAY_MS",
    "UI_LANGUAGE",
];

fn main() {
    let env_file = Path::new(".env");

    if let Ok(contents) = fs::read_to_string(env_file) {
        println!("cargo:rerun-if-changed=.env");

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if !KNOWN_KEYS.contains(&key) {
                println!("cargo:warning=Ignoring unknown .env key {}", key);
                continue;
            }
            // El entorno del proceso tiene prioridad sobre .env
            if env::var(key).is_err() {
                println!("cargo:rustc-env={}={}", key, value);
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Copy .env.example to .env and set SUPABASE_URL / SUPABASE_ANON_KEY.");
    }

    for key in KNOWN_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}
