//! Local JSON export of the form being built

use crate::state::FormSchema;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Write the form as pretty JSON to `dir/form-<unix millis>.json`
pub fn export_form(dir: &Path, form: &FormSchema, now: DateTime<Utc>) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("form-{}.json", now.timestamp_millis()));
    let content = serde_json::to_string_pretty(form)?;
    fs::write(&path, content)?;
    tracing::info!("Exported form to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_round_trips_form() {
        let dir = tempfile::tempdir().unwrap();
        let form = FormSchema::seeded();
        let now = Utc.timestamp_millis_opt(7).unwrap();

        let path = export_form(dir.path(), &form, now).unwrap();

        assert_eq!(path.file_name().unwrap(), "form-7.json");
        let parsed: FormSchema = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed, form);
    }
}
