//! Delimited text tables.
//!
//! The first record names the fields. Every later record with the same
//! number of fields becomes a [`Row`]. Records with a different field count
//! are dropped and only counted, which keeps half-edited exports usable.

use std::sync::Arc;

use tracing::debug;

use crate::loader::fetch::DataFetcher;
use crate::models::types::Result;

/// One parsed record, addressable by header name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// 1-based line of the record in the source text
    pub line: usize,
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Row {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == field)
            .map(|i| self.values[i].as_str())
    }

    /// Field name and value pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
    /// Lines dropped because their field count did not match the header
    pub skipped_lines: Vec<usize>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse delimited text into a [`Table`].
///
/// Accepts `\r\n` and `\n` line endings, ignores blank lines, and trims
/// every header and value. Quotes carry no special meaning.
pub fn parse_table(text: &str, delimiter: u8) -> Table {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let mut table = Table::default();

    let headers: Arc<[String]> = match records.next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        Some(Err(e)) => {
            debug!("unreadable header record: {e}");
            return table;
        }
        None => return table,
    };
    table.headers = headers.to_vec();

    for result in records {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line() as usize);
                debug!(line, "skipping unreadable record: {e}");
                table.skipped_lines.push(line);
                continue;
            }
        };

        let line = record.position().map_or(0, |p| p.line() as usize);

        if record.len() != headers.len() {
            debug!(
                line,
                expected = headers.len(),
                found = record.len(),
                "skipping record with mismatched field count"
            );
            table.skipped_lines.push(line);
            continue;
        }

        table.rows.push(Row {
            line,
            headers: headers.clone(),
            values: record.iter().map(str::to_string).collect(),
        });
    }

    table
}

/// Fetch a source and parse it as a delimited table
pub async fn load_table<F>(fetcher: &F, source: &str, delimiter: u8) -> Result<Table>
where
    F: DataFetcher + ?Sized,
{
    let bytes = fetcher.fetch(source).await?;
    let text = String::from_utf8_lossy(&bytes);
    let table = parse_table(&text, delimiter);

    debug!(
        source,
        rows = table.len(),
        skipped = table.skipped_lines.len(),
        "parsed table"
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_table() {
        let text = "idbase;nombre_barco ;Dia\r\n1; Bentago Express ;Lunes\r\n2;Volcan;Martes\r\n";
        let table = parse_table(text, b';');

        assert_eq!(table.headers, vec!["idbase", "nombre_barco", "Dia"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("nombre_barco"), Some("Bentago Express"));
        assert_eq!(table.rows[1].get("Dia"), Some("Martes"));
        assert_eq!(table.rows[1].get("missing"), None);
        assert!(table.skipped_lines.is_empty());
    }

    #[test]
    fn test_mismatched_rows_are_skipped() {
        let text = "a;b;c\n1;2;3\n1;2\n1;2;3;4\n4;5;6\n";
        let table = parse_table(text, b';');

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("a"), Some("1"));
        assert_eq!(table.rows[1].get("c"), Some("6"));
        assert_eq!(table.skipped_lines, vec![3, 4]);
    }

    #[test]
    fn test_row_lines_and_iteration() {
        let text = "a;b\n1;2\n";
        let table = parse_table(text, b';');

        assert_eq!(table.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.line, 2);
        assert_eq!(row.iter().collect::<Vec<_>>(), vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let table = parse_table("a;b\r\n\r\n1;2\r\n\r\n", b';');
        assert_eq!(table.len(), 1);
        assert!(table.skipped_lines.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let table = parse_table("", b';');
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_quotes_are_plain_text() {
        let table = parse_table("name;id\n\"Puerto\";7\n", b';');
        assert_eq!(table.rows[0].get("name"), Some("\"Puerto\""));
    }
}
