use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time bucket a usage count belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
    Total,
}

impl Granularity {
    /// Output order for the CSV rows and spreadsheet sheets
    pub const ALL: [Granularity; 3] = [Granularity::Day, Granularity::Month, Granularity::Total];

    /// Key used by the stats API and in the CSV `period` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Total => "total",
        }
    }

    /// Worksheet name
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Granularity::Day => "Day",
            Granularity::Month => "Month",
            Granularity::Total => "Total",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Granularity::Day),
            "month" => Ok(Granularity::Month),
            "total" => Ok(Granularity::Total),
            other => Err(format!("unknown granularity: {}", other)),
        }
    }
}

/// One flattened `(granularity, model, count)` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub granularity: Granularity,
    pub model: String,
    pub count: u64,
}

/// One row of a per-granularity table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRow {
    pub model: String,
    pub count: u64,
    /// Name was rewritten by a whitelist entry
    pub whitelisted: bool,
}

impl UsageRow {
    pub fn new(model: impl Into<String>, count: u64) -> Self {
        Self {
            model: model.into(),
            count,
            whitelisted: false,
        }
    }
}

/// Day, month and total tables built from one response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageTables {
    pub day: Vec<UsageRow>,
    pub month: Vec<UsageRow>,
    pub total: Vec<UsageRow>,
}

impl UsageTables {
    pub fn get(&self, granularity: Granularity) -> &[UsageRow] {
        match granularity {
            Granularity::Day => &self.day,
            Granularity::Month => &self.month,
            Granularity::Total => &self.total,
        }
    }

    pub fn get_mut(&mut self, granularity: Granularity) -> &mut Vec<UsageRow> {
        match granularity {
            Granularity::Day => &mut self.day,
            Granularity::Month => &mut self.month,
            Granularity::Total => &mut self.total,
        }
    }

    /// Tables in output order
    pub fn iter(&self) -> impl Iterator<Item = (Granularity, &[UsageRow])> + '_ {
        Granularity::ALL.into_iter().map(move |g| (g, self.get(g)))
    }

    /// All rows as flat records, day first
    pub fn records(&self) -> Vec<UsageRecord> {
        self.iter()
            .flat_map(|(granularity, rows)| {
                rows.iter().map(move |row| UsageRecord {
                    granularity,
                    model: row.model.clone(),
                    count: row.count,
                })
            })
            .collect()
    }

    /// Copy holding at most `n` leading rows of each table
    pub fn top(&self, n: usize) -> UsageTables {
        let head = |rows: &[UsageRow]| -> Vec<UsageRow> {
            rows.iter().take(n).cloned().collect()
        };
        UsageTables {
            day: head(&self.day),
            month: head(&self.month),
            total: head(&self.total),
        }
    }

    pub fn row_count(&self) -> usize {
        self.day.len() + self.month.len() + self.total.len()
    }

    /// Sort every table by count descending, then model ascending
    pub fn sort(&mut self) {
        for granularity in Granularity::ALL {
            sort_rows(self.get_mut(granularity));
        }
    }
}

pub(crate) fn sort_rows(rows: &mut [UsageRow]) {
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.model.cmp(&b.model)));
}

/// Raw response body plus when it was obtained
#[derive(Debug, Clone)]
pub struct RawSnapshot {
    pub body: Vec<u8>,
    pub fetched_at: DateTime<Utc>,
    /// URL or file the body came from
    pub origin: String,
}

impl RawSnapshot {
    pub fn new(body: Vec<u8>, origin: impl Into<String>) -> Self {
        Self {
            body,
            fetched_at: Utc::now(),
            origin: origin.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_parse() {
        assert_eq!("day".parse::<Granularity>(), Ok(Granularity::Day));
        assert_eq!("total".parse::<Granularity>(), Ok(Granularity::Total));
        assert!("week".parse::<Granularity>().is_err());
        assert!("Day".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_sort_rows_breaks_ties_by_name() {
        let mut rows = vec![
            UsageRow::new("b", 5),
            UsageRow::new("c", 10),
            UsageRow::new("a", 5),
        ];
        sort_rows(&mut rows);

        let names: Vec<_> = rows.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_records_follow_output_order() {
        let tables = UsageTables {
            day: vec![UsageRow::new("d", 1)],
            month: vec![UsageRow::new("m", 2)],
            total: vec![UsageRow::new("t", 3)],
        };

        let records = tables.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].granularity, Granularity::Day);
        assert_eq!(records[1].model, "m");
        assert_eq!(records[2].count, 3);
    }

    #[test]
    fn test_top_truncates_each_table() {
        let tables = UsageTables {
            day: vec![UsageRow::new("a", 3), UsageRow::new("b", 2), UsageRow::new("c", 1)],
            month: vec![UsageRow::new("m", 2)],
            total: vec![],
        };

        let top = tables.top(2);
        assert_eq!(top.day, vec![UsageRow::new("a", 3), UsageRow::new("b", 2)]);
        assert_eq!(top.month, tables.month);
        assert!(top.total.is_empty());
    }
}
