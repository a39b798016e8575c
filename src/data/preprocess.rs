use super::model::{LabeledText, Table};
use crate::error::IngestError;
use crate::logging::LogContext;

/// Drop the placeholder columns and rename the two remaining columns
/// positionally to `target` and `text`.
///
/// The input table is only read; on error nothing has been transformed.
pub fn preprocess(
    table: &Table,
    placeholders: &[String],
    log: &LogContext,
) -> Result<Vec<LabeledText>, IngestError> {
    let result = clean(table, placeholders);

    match &result {
        Ok(_) => log::debug!(
            target: log.name(),
            "Data preprocessing completed: kept {} as target, text",
            kept_columns(table, placeholders).join(", ")
        ),
        Err(e @ IngestError::Schema { .. }) => {
            log::error!(target: log.name(), "Missing column in the dataset: {e}")
        }
        Err(e) => log::error!(target: log.name(), "Unexpected error during preprocessing: {e}"),
    }
    result
}

fn kept_columns<'a>(table: &'a Table, placeholders: &[String]) -> Vec<&'a str> {
    table
        .columns
        .iter()
        .filter(|c| !placeholders.contains(c))
        .map(String::as_str)
        .collect()
}

fn clean(table: &Table, placeholders: &[String]) -> Result<Vec<LabeledText>, IngestError> {
    let missing: Vec<String> = placeholders
        .iter()
        .filter(|p| table.column_index(p).is_none())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::Schema { missing });
    }

    let kept: Vec<usize> = (0..table.columns.len())
        .filter(|&i| !placeholders.contains(&table.columns[i]))
        .collect();
    let &[target_idx, text_idx] = kept.as_slice() else {
        return Err(IngestError::ColumnCount {
            expected: 2,
            found: kept.len(),
        });
    };

    Ok(table
        .rows
        .iter()
        .map(|row| LabeledText {
            target: row[target_idx].clone(),
            text: row[text_idx].clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn placeholders() -> Vec<String> {
        vec!["Unnamed: 2".into(), "Unnamed: 3".into(), "Unnamed: 4".into()]
    }

    fn raw(rows: &[(&str, &str)]) -> Table {
        Table::new(
            ["v1", "v2", "Unnamed: 2", "Unnamed: 3", "Unnamed: 4"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows.iter()
                .map(|(t, x)| vec![t.to_string(), x.to_string(), String::new(), String::new(), String::new()])
                .collect(),
        )
    }

    #[test]
    fn test_keeps_two_columns_in_order() {
        let table = raw(&[("ham", "one"), ("spam", "two"), ("ham", "three")]);
        let log = LogContext::new("data_ingestion");
        let cleaned = preprocess(&table, &placeholders(), &log).unwrap();

        assert_eq!(cleaned.len(), 3);
        assert_eq!(
            cleaned[1],
            LabeledText {
                target: "spam".into(),
                text: "two".into()
            }
        );
        assert_eq!(cleaned[2].text, "three");
    }

    #[test]
    fn test_placeholders_anywhere_in_header() {
        let table = Table::new(
            ["Unnamed: 2", "label", "Unnamed: 3", "message", "Unnamed: 4"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec![vec!["".into(), "ham".into(), "".into(), "hello".into(), "".into()]],
        );
        let log = LogContext::new("data_ingestion");
        let cleaned = preprocess(&table, &placeholders(), &log).unwrap();
        assert_eq!(cleaned[0].target, "ham");
        assert_eq!(cleaned[0].text, "hello");
    }

    #[test]
    fn test_missing_placeholder_is_schema_error() {
        let mut table = raw(&[("ham", "one")]);
        table.columns[3] = "notes".into();
        let before = table.clone();

        let log = LogContext::new("data_ingestion");
        let err = preprocess(&table, &placeholders(), &log).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Schema);
        match err {
            IngestError::Schema { missing } => assert_eq!(missing, vec!["Unnamed: 3"]),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(table, before);
    }

    #[test]
    fn test_wrong_remaining_column_count() {
        let table = Table::new(
            ["v1", "v2", "v3", "Unnamed: 2", "Unnamed: 3", "Unnamed: 4"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            Vec::new(),
        );
        let log = LogContext::new("data_ingestion");
        let err = preprocess(&table, &placeholders(), &log).unwrap_err();
        assert!(matches!(
            err,
            IngestError::ColumnCount {
                expected: 2,
                found: 3
            }
        ));
    }
}
