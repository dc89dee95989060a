#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn unique_name(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    format!("dbconnect-{tag}-{}-{}", std::process::id(), nanos)
}

/// Write `contents` to a fresh file under the system temp dir.
pub fn write_temp_ini(tag: &str, contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("{}.ini", unique_name(tag)));
    fs::write(&path, contents).expect("failed to write temp ini");
    path
}

pub const FULL_CREDS: &str = "\
[database_creds]
host = h
database = d
user = u
password = p
port = 5432
";
