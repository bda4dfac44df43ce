//! Tab-separated word tables backing both scorers.
//!
//! One entry per line: a lowercase word followed by numeric columns. Blank
//! lines and lines starting with `#` are ignored.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("lexicon line {line}: {reason}")]
pub struct LexiconError {
    pub line: usize,
    pub reason: String,
}

/// Parse a table whose rows carry exactly `columns` numbers after the word.
pub fn parse_table(source: &str, columns: usize) -> Result<HashMap<String, Vec<f64>>, LexiconError> {
    let mut table = HashMap::new();

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split('\t');
        let word = fields.next().unwrap_or_default().trim().to_lowercase();
        if word.is_empty() {
            return Err(LexiconError {
                line: index + 1,
                reason: "missing word".to_string(),
            });
        }

        let values = fields
            .map(|field| {
                field.trim().parse::<f64>().map_err(|e| LexiconError {
                    line: index + 1,
                    reason: format!("bad number {:?}: {}", field, e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() != columns {
            return Err(LexiconError {
                line: index + 1,
                reason: format!("expected {} values, found {}", columns, values.len()),
            });
        }

        table.insert(word, values);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let source = "# header\n\ngood\t0.7\t1.0\nVery\t0.2\t1.3\n";
        let table = parse_table(source, 2).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["good"], vec![0.7, 1.0]);
        assert_eq!(table["very"], vec![0.2, 1.3]);
    }

    #[test]
    fn test_parse_rejects_wrong_column_count() {
        let err = parse_table("good\t0.7\n", 2).unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        let err = parse_table("ok\t1.0\nbad\tx\n", 1).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("bad number"));
    }
}
