use super::types::{Granularity, UsageRow, UsageTables};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Parse a stats response body into day/month/total tables.
///
/// The body must be `{granularity: {model: count}}`. Unknown granularity keys are
/// skipped, a missing one yields an empty table. Rows come back sorted.
pub fn build_tables(body: &[u8]) -> Result<UsageTables> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::MalformedResponse(format!("invalid JSON: {}", e)))?;
    build_tables_from_value(&value)
}

pub fn build_tables_from_value(value: &Value) -> Result<UsageTables> {
    let periods = value
        .as_object()
        .ok_or_else(|| Error::MalformedResponse("top level is not an object".into()))?;

    let mut tables = UsageTables::default();

    for (key, models) in periods {
        let granularity = match key.parse::<Granularity>() {
            Ok(g) => g,
            Err(_) => {
                tracing::warn!(key = %key, "Skipping unknown granularity in stats response");
                continue;
            }
        };

        let models = models.as_object().ok_or_else(|| {
            Error::MalformedResponse(format!("\"{}\" is not an object", granularity))
        })?;

        let rows = tables.get_mut(granularity);
        rows.reserve(models.len());
        rows.extend(parse_models(granularity, models)?);
    }

    tables.sort();

    tracing::debug!(
        day = tables.day.len(),
        month = tables.month.len(),
        total = tables.total.len(),
        "Built usage tables"
    );

    Ok(tables)
}

fn parse_models(granularity: Granularity, models: &Map<String, Value>) -> Result<Vec<UsageRow>> {
    models
        .iter()
        .map(|(model, count)| {
            let count = count.as_u64().ok_or_else(|| {
                Error::MalformedResponse(format!(
                    "count for \"{}\" in \"{}\" is not a non-negative integer: {}",
                    model, granularity, count
                ))
            })?;
            Ok(UsageRow::new(model.clone(), count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "day": {"koboldcpp/Fimbulvetr-11B-v2": 120, "aphrodite/Mistral-7B": 45},
        "month": {
            "koboldcpp/Fimbulvetr-11B-v2": 3100,
            "aphrodite/Mistral-7B": 4200,
            "koboldcpp/Tiefighter-13B": 7
        },
        "total": {"koboldcpp/Fimbulvetr-11B-v2": 99000}
    }"#;

    #[test]
    fn test_build_tables_from_fixture() {
        let tables = build_tables(FIXTURE.as_bytes()).unwrap();

        assert_eq!(
            tables.day,
            vec![
                UsageRow::new("koboldcpp/Fimbulvetr-11B-v2", 120),
                UsageRow::new("aphrodite/Mistral-7B", 45),
            ]
        );
        assert_eq!(
            tables.month,
            vec![
                UsageRow::new("aphrodite/Mistral-7B", 4200),
                UsageRow::new("koboldcpp/Fimbulvetr-11B-v2", 3100),
                UsageRow::new("koboldcpp/Tiefighter-13B", 7),
            ]
        );
        assert_eq!(
            tables.total,
            vec![UsageRow::new("koboldcpp/Fimbulvetr-11B-v2", 99000)]
        );
        assert_eq!(tables.row_count(), 6);
    }

    #[test]
    fn test_missing_and_unknown_granularities() {
        let tables = build_tables(br#"{"day": {"a": 1}, "week": {"b": 2}}"#).unwrap();
        assert_eq!(tables.day, vec![UsageRow::new("a", 1)]);
        assert!(tables.month.is_empty());
        assert!(tables.total.is_empty());
    }

    #[test]
    fn test_zero_counts_are_kept() {
        let tables = build_tables(br#"{"total": {"idle-model": 0}}"#).unwrap();
        assert_eq!(tables.total, vec![UsageRow::new("idle-model", 0)]);
    }

    #[test]
    fn test_rejects_malformed_bodies() {
        let cases: [&[u8]; 5] = [
            b"not json",
            b"[1, 2, 3]",
            br#"{"day": [1]}"#,
            br#"{"day": {"a": -3}}"#,
            br#"{"day": {"a": "12"}}"#,
        ];

        for body in cases {
            match build_tables(body) {
                Err(Error::MalformedResponse(_)) => {}
                other => panic!("expected MalformedResponse, got {:?}", other),
            }
        }
    }
}
