#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

use tresorerie::AppContext;
use treso_config::Config;
use treso_core::FixedClock;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date")
}

/// Context pinned to 2024-06-03 with default preferences.
pub fn context() -> AppContext {
    AppContext::new(Config::default(), Arc::new(FixedClock::new(today()))).expect("context")
}

/// Writes `contents` into a fresh temporary directory and returns the file path.
pub fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Confirmed invoice payment today plus an expected payroll run three days later.
pub const MOVEMENTS_JSON: &str = r#"[
  {"type":"encaissement","categorie":"Paiement facture","description":"FAC-2024-031","montant":1000000,"date":"2024-06-03","status":"confirmed","source":"facture"},
  {"type":"decaissement","categorie":"Salaires","montant":400000,"date":"2024-06-06","status":"expected","isManual":true}
]"#;

pub const BOOKINGS_JSON: &str = r#"[
  {"container_number":"MSKU1000001","booking_number":"BK100","client_name":"Bolloré","vessel":"Maersk Dakar","eta":"2024-06-10"},
  {"container_number":"MSKU1000002","booking_number":"BK200","client_name":"SDV"},
  {"container_number":"MSKU1000003","booking_number":"BK100","client_name":"Bolloré","vessel":"Maersk Dakar"}
]"#;

pub const CREDIT_NOTES_JSON: &str = r#"[
  {"number":"AV-001","invoice_number":"FAC-10","client_name":"SDV","amount":100000,"status":"applied","date":"2024-05-20"},
  {"number":"AV-002","invoice_number":"FAC-11","client_name":"SDV","amount":50000,"status":"pending","date":"2024-05-22"},
  {"number":"AV-003","invoice_number":"FAC-12","client_name":"SDV","amount":30000,"status":"cancelled","date":"2024-05-23"}
]"#;
