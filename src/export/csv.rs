use crate::error::Result;
use crate::stats::UsageTables;
use std::fs::File;
use std::io;
use std::path::Path;

pub const CSV_HEADER: [&str; 3] = ["period", "model", "usage_count"];

/// Write every table to one CSV file: day rows, then month, then total
pub fn write_csv<P: AsRef<Path>>(tables: &UsageTables, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv_to(tables, io::BufWriter::new(file))?;

    tracing::debug!(path = %path.as_ref().display(), rows = tables.row_count(), "Wrote CSV");
    Ok(())
}

pub fn write_csv_to<W: io::Write>(tables: &UsageTables, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for record in tables.records() {
        let count = record.count.to_string();
        wtr.write_record([record.granularity.as_str(), record.model.as_str(), count.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::UsageRow;

    #[test]
    fn test_csv_layout() {
        let tables = UsageTables {
            day: vec![UsageRow::new("koboldcpp/a", 3)],
            month: vec![UsageRow::new("Friendly, Name", 10), UsageRow::new("b", 2)],
            total: vec![],
        };

        let mut out = Vec::new();
        write_csv_to(&tables, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "period,model,usage_count\n\
             day,koboldcpp/a,3\n\
             month,\"Friendly, Name\",10\n\
             month,b,2\n"
        );
    }

    #[test]
    fn test_empty_tables_write_header_only() {
        let mut out = Vec::new();
        write_csv_to(&UsageTables::default(), &mut out).unwrap();
        assert_eq!(out, b"period,model,usage_count\n");
    }
}
