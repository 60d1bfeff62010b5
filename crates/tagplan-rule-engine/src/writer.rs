//! Plan file output
//!
//! Plans are written as `ResourceARN,TagKey,TagValue` CSV. The header is
//! always written, even for an empty plan.

use crate::constants::PLAN_HEADER;
use crate::Result;
use std::io::Write;
use std::path::Path;
use tagplan_core::PlanRow;

/// Write `rows` to any writer.
pub fn write_plan_to<W: Write>(writer: W, rows: &[PlanRow]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(PLAN_HEADER)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the plan to it.
pub fn write_plan(path: &Path, rows: &[PlanRow]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_plan_to(file, rows)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Wrote plan file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagplan_core::TagAssignment;
    use tempfile::TempDir;

    #[test]
    fn test_empty_plan_has_header() {
        let mut buf = Vec::new();
        write_plan_to(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "ResourceARN,TagKey,TagValue\n");
    }

    #[test]
    fn test_rows_are_written_in_order() {
        let rows = vec![
            PlanRow::new("arn:aws:s3:::b", &TagAssignment::new("Backup", "Daily")),
            PlanRow::new("arn:aws:s3:::b", &TagAssignment::new("Owner", "Team, Infra")),
        ];

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plan.csv");
        write_plan(&path, &rows).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "ResourceARN,TagKey,TagValue\n\
             arn:aws:s3:::b,Backup,Daily\n\
             arn:aws:s3:::b,Owner,\"Team, Infra\"\n"
        );
    }
}
