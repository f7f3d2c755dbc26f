use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Error;
use crate::model::fixture::Fixture;

/// Column order is fixed; downstream consumers key off this header.
pub const CSV_HEADER: &str = "date,time,home_team,away_team,home_score,away_score,competition,venue";

/// Render fixtures as CSV: the fixed header plus one row per fixture.
/// Identical input always yields byte-identical output.
pub fn to_csv(fixtures: &[Fixture]) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');

    for fixture in fixtures {
        let (home_score, away_score) = match fixture.score {
            Some((home, away)) => (home.to_string(), away.to_string()),
            None => (String::new(), String::new()),
        };

        let row = [
            fixture.kickoff.format("%Y-%m-%d").to_string(),
            fixture.kickoff.format("%H:%M").to_string(),
            fixture.home_team.clone(),
            fixture.away_team.clone(),
            home_score,
            away_score,
            fixture.competition.clone(),
            fixture.venue.clone(),
        ]
        .into_iter()
        .map(|field| escape_field(&field))
        .collect::<Vec<String>>()
        .join(",");

        out.push_str(&row);
        out.push('\n');
    }

    out
}

/// Write the fixtures to `path` as CSV, fully replacing any previous file.
/// The bytes land in a temporary sibling first and are renamed into place,
/// so a failed run never leaves a partial file and never disturbs the
/// previous output.
pub fn export_to_csv(fixtures: &[Fixture], path: &Path) -> Result<(), Error> {
    let csv = to_csv(fixtures);
    write_replace(path, csv.as_bytes())?;
    info!(count = fixtures.len(), path = %path.display(), "Wrote fixture csv");
    Ok(())
}

/// Quote a field only when it would otherwise break the row.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_replace(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let file_name = path.file_name().ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path has no file name",
        ))
    })?;
    let tmp = parent.join(format!(
        ".{}.tmp.{}",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
