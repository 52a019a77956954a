//! Output file naming and writing

use std::io::Write;
use std::path::Path;

use crate::error::RenderError;
use crate::parser::parse_mission_date;

/// Characters that are not allowed in file names on common platforms
const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Make one file name component safe: whitespace runs become `_`,
/// forbidden and control characters are dropped.
fn sanitize(component: &str) -> String {
    let cleaned: String = component
        .chars()
        .filter(|c| !FORBIDDEN.contains(c) && (!c.is_control() || c.is_whitespace()))
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Compact `YYYYMMDD` form of a mission date, or its digits if it doesn't parse
fn compact_date(date: &str) -> String {
    match parse_mission_date(date) {
        Some(parsed) => parsed.format("%Y%m%d").to_string(),
        None => date.chars().filter(|c| c.is_ascii_digit()).collect(),
    }
}

/// File name for a report: `<prefix>_<pilot>_<mission type>_<date>.pdf`
///
/// Empty components are skipped.
pub fn output_file_name(prefix: &str, pilot: &str, mission_type: &str, date: &str) -> String {
    let parts: Vec<String> = [
        sanitize(prefix),
        sanitize(pilot),
        sanitize(mission_type),
        compact_date(date),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect();

    if parts.is_empty() {
        return "report.pdf".to_string();
    }
    format!("{}.pdf", parts.join("_"))
}

/// Write the PDF next to its destination and move it into place, so a
/// failed run never leaves a truncated file behind.
pub fn write_report(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.persist(path).map_err(|e| RenderError::Io(e.error))?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_basic() {
        assert_eq!(
            output_file_name("Rapport_Mission", "Jane Doe", "Air-to-Ground", "2024-03-15"),
            "Rapport_Mission_Jane_Doe_Air-to-Ground_20240315.pdf"
        );
    }

    #[test]
    fn test_file_name_strips_forbidden_characters() {
        assert_eq!(
            output_file_name("Rapport_Mission", "J/a:ne  \"D\"oe", "CAS*?", "15/03/2024"),
            "Rapport_Mission_Jane_Doe_CAS_20240315.pdf"
        );
    }

    #[test]
    fn test_file_name_unparsed_date_keeps_digits() {
        assert_eq!(
            output_file_name("R", "P", "T", "March 2024"),
            "R_P_T_2024.pdf"
        );
    }

    #[test]
    fn test_file_name_skips_empty_parts() {
        assert_eq!(output_file_name("R", "", "T", ""), "R_T.pdf");
        assert_eq!(output_file_name("", "", "", ""), "report.pdf");
    }

    #[test]
    fn test_write_report_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        std::fs::write(&path, b"old").unwrap();

        write_report(&path, b"%PDF-1.7 new").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 new");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_write_report_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.pdf");
        assert!(matches!(
            write_report(&path, b"%PDF"),
            Err(RenderError::Io(_))
        ));
    }
}
