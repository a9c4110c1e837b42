use super::types::{sort_rows, Granularity, UsageRow, UsageTables};
use super::whitelist::{short_name, Whitelist};
use crate::config::NormalizeConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Official quantization tags such as `-Q4_K_M` or `.Q8_0`
static OFFICIAL_QUANT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[.,-][a-zA-Z0-9]+?-?Q(-[Ii]nt)?[2-9]{1,2}([_.-][0-9a-zA-Z]+)*$")
        .expect("quantization pattern is valid")
});

/// Builder suffixes: imatrix, bits per weight, exl2 and friends
static EXTRA_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([._-](?:iMat|iMatrix|i\d+|b\d+|c\d+|ch\d+|bpw|h\d+|exl\d+).*)$")
        .expect("suffix pattern is valid")
});

/// Short name with quantization suffixes removed
pub fn strip_quantization(model: &str) -> String {
    let short = short_name(model);
    let without_quant = OFFICIAL_QUANT.replace_all(short, "");
    EXTRA_SUFFIX.replace_all(&without_quant, "").into_owned()
}

/// Rewrites model names in usage tables
pub struct Normalizer<'a> {
    whitelist: Option<&'a Whitelist>,
    options: NormalizeConfig,
}

impl<'a> Normalizer<'a> {
    pub fn new(whitelist: Option<&'a Whitelist>, options: NormalizeConfig) -> Self {
        Self { whitelist, options }
    }

    /// Name a row should carry and whether a whitelist entry produced it
    pub fn resolve(&self, model: &str) -> (String, bool) {
        if let Some(whitelist) = self.whitelist {
            if let Some(target) = whitelist.lookup(model) {
                return (target.to_string(), true);
            }
            if self.options.suffix_match {
                if let Some(target) = whitelist.lookup_suffix(model) {
                    return (target.to_string(), true);
                }
            }
        }

        if self.options.strip_quantization {
            let cleaned = strip_quantization(model);
            if !cleaned.is_empty() {
                return (cleaned, false);
            }
        }

        (model.to_string(), false)
    }

    /// Normalize every table in place, returning how many rows were renamed
    pub fn apply(&self, tables: &mut UsageTables) -> usize {
        if self.whitelist.is_none() && !self.options.strip_quantization {
            return 0;
        }

        let mut renamed = 0;
        for granularity in Granularity::ALL {
            let rows = tables.get_mut(granularity);
            renamed += self.apply_rows(rows);

            if self.options.merge_duplicates {
                let before = rows.len();
                merge_duplicates(rows);
                if rows.len() != before {
                    tracing::debug!(
                        granularity = %granularity,
                        merged = before - rows.len(),
                        "Merged rows with identical names"
                    );
                }
            }
            sort_rows(rows);
        }

        tracing::info!(renamed, "Normalized model names");
        renamed
    }

    fn apply_rows(&self, rows: &mut [UsageRow]) -> usize {
        let mut renamed = 0;
        for row in rows.iter_mut() {
            let (name, whitelisted) = self.resolve(&row.model);
            if name != row.model {
                row.model = name;
                renamed += 1;
            }
            row.whitelisted |= whitelisted;
        }
        renamed
    }
}

/// Sum the counts of rows sharing a name; order of first appearance is kept
pub fn merge_duplicates(rows: &mut Vec<UsageRow>) {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(rows.len());
    let mut merged: Vec<UsageRow> = Vec::with_capacity(rows.len());

    for row in rows.drain(..) {
        match index.get(&row.model) {
            Some(&i) => {
                merged[i].count += row.count;
                merged[i].whitelisted |= row.whitelisted;
            }
            None => {
                index.insert(row.model.clone(), merged.len());
                merged.push(row);
            }
        }
    }

    *rows = merged;
}
