use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;

use gmsfeed_fixture_export::error::Error;
use gmsfeed_fixture_export::export::{self, CSV_HEADER};
use gmsfeed_fixture_export::model::fixture::Fixture;

fn fixture(
    ymd: (i32, u32, u32),
    hm: (u32, u32),
    home: &str,
    away: &str,
    score: Option<(u32, u32)>,
    competition: &str,
    venue: &str,
) -> Fixture {
    Fixture {
        kickoff: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2)
            .unwrap()
            .and_hms_opt(hm.0, hm.1, 0)
            .unwrap(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        score,
        competition: competition.to_string(),
        venue: venue.to_string(),
    }
}

fn sample_fixtures() -> Vec<Fixture> {
    vec![
        fixture(
            (2024, 5, 1),
            (15, 0),
            "Town FC",
            "City FC",
            Some((2, 1)),
            "League Cup",
            "Main Ground",
        ),
        fixture(
            (2024, 5, 9),
            (19, 45),
            "Town FC",
            "Rovers FC",
            None,
            "League Championship",
            "Main Ground",
        ),
    ]
}

#[test]
fn header_plus_one_row_per_fixture() {
    let csv = export::to_csv(&sample_fixtures());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADER);
}

#[test]
fn renders_completed_fixture_row() {
    let csv = export::to_csv(&sample_fixtures());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[1],
        "2024-05-01,15:00,Town FC,City FC,2,1,League Cup,Main Ground"
    );
}

#[test]
fn unplayed_fixture_leaves_score_columns_empty() {
    let csv = export::to_csv(&sample_fixtures());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[2],
        "2024-05-09,19:45,Town FC,Rovers FC,,,League Championship,Main Ground"
    );
}

#[test]
fn quotes_fields_that_would_break_the_row() {
    let fixtures = vec![fixture(
        (2024, 5, 1),
        (15, 0),
        "Town \"The Terriers\" FC",
        "City FC",
        None,
        "League Cup",
        "Main Ground, North Stand",
    )];
    let csv = export::to_csv(&fixtures);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[1],
        "2024-05-01,15:00,\"Town \"\"The Terriers\"\" FC\",City FC,,,League Cup,\"Main Ground, North Stand\""
    );
}

#[test]
fn identical_input_produces_identical_bytes() {
    let fixtures = sample_fixtures();
    assert_eq!(export::to_csv(&fixtures), export::to_csv(&fixtures));

    let dir = tempdir().expect("tempdir");
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    export::export_to_csv(&fixtures, &first).expect("first export failed");
    export::export_to_csv(&fixtures, &second).expect("second export failed");
    assert_eq!(
        fs::read(&first).expect("read first"),
        fs::read(&second).expect("read second")
    );
}

#[test]
fn export_creates_missing_directories_and_fully_replaces() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("data").join("latest_fixtures.csv");

    export::export_to_csv(&sample_fixtures(), &path).expect("export failed");
    let written = fs::read_to_string(&path).expect("read failed");
    assert_eq!(written.lines().count(), 3);

    // A second run replaces the file outright, never appends.
    export::export_to_csv(&sample_fixtures()[..1], &path).expect("re-export failed");
    let replaced = fs::read_to_string(&path).expect("read failed");
    assert_eq!(replaced.lines().count(), 2);

    // No temporary debris left beside the output.
    let entries = fs::read_dir(path.parent().unwrap()).expect("read_dir").count();
    assert_eq!(entries, 1);
}

#[test]
fn failed_export_leaves_previous_file_untouched() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("latest_fixtures.csv");
    export::export_to_csv(&sample_fixtures(), &path).expect("export failed");
    let before = fs::read(&path).expect("read failed");

    // The existing csv is a file, so using it as a parent directory must fail.
    let bad_path = path.join("nested.csv");
    let err = export::export_to_csv(&sample_fixtures(), &bad_path).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "error was: {err}");

    assert_eq!(fs::read(&path).expect("read failed"), before);
}
