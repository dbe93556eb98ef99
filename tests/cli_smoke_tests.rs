mod common;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

use common::{write_fixture, BOOKINGS_JSON, CREDIT_NOTES_JSON, MOVEMENTS_JSON};

const BIN_NAME: &str = "tresorerie_cli";

fn forecast_command() -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("NO_COLOR", "1").args(["--today", "2024-06-03", "--plain"]);
    cmd
}

#[test]
fn cli_prints_the_three_balances() {
    let path = write_fixture("flux.json", MOVEMENTS_JSON);
    forecast_command()
        .args(["--horizon", "7"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("Solde actuel          1 000 000 FCFA"))
        .stdout(contains("Solde prévisionnel    600 000 FCFA"))
        .stdout(contains("Solde minimum         600 000 FCFA"))
        .stdout(contains("Par catégorie").and(contains("Salaires")));
}

#[test]
fn cli_json_output_exposes_the_projection() {
    let path = write_fixture("flux.json", MOVEMENTS_JSON);
    forecast_command()
        .args(["--horizon", "7", "--json"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("\"projected_balance\": 600000"))
        .stdout(contains("\"minimum_balance\": 600000"));
}

#[test]
fn cli_reports_bookings_and_credit_notes() {
    let movements = write_fixture("flux.json", MOVEMENTS_JSON);
    let bookings = write_fixture("bookings.json", BOOKINGS_JSON);
    let notes = write_fixture("avoirs.json", CREDIT_NOTES_JSON);
    forecast_command()
        .arg("--bookings")
        .arg(&bookings)
        .arg("--credit-notes")
        .arg(&notes)
        .arg(&movements)
        .assert()
        .success()
        .stdout(contains("BK100").and(contains("BK200")))
        .stdout(contains("Total hors annulés    150 000 FCFA"))
        .stdout(contains("Imputés               100 000 FCFA"));
}

#[test]
fn cli_version_prints_build_metadata() {
    Command::cargo_bin(BIN_NAME)
        .expect("binary exists")
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("Trésorerie").and(contains("Build hash")));
}

#[test]
fn cli_rejects_zero_bucket() {
    let path = write_fixture("flux.json", MOVEMENTS_JSON);
    forecast_command()
        .args(["--bucket", "0"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn cli_rejects_horizon_past_ten_years() {
    let path = write_fixture("flux.json", MOVEMENTS_JSON);
    forecast_command()
        .args(["--horizon", "4000000000"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("must not exceed 3650 days"));
}

#[test]
fn cli_header_ends_on_the_last_projected_day() {
    let path = write_fixture("flux.json", MOVEMENTS_JSON);
    forecast_command()
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("Trésorerie du 03/06/2024 au 02/07/2024"));
}

#[test]
fn cli_fails_on_missing_file() {
    forecast_command()
        .arg("/nonexistent/flux.json")
        .assert()
        .failure()
        .stderr(contains("I/O error"));
}
