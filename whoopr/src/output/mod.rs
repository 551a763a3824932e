//! Rendering of command results.
//!
//! Each command renders one document (json or table) and writes it in a single call,
//! to stdout or to the `-o` file.

use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use serde::Serialize;

mod table;

pub use table::{TableRow, render_table};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Pretty,
    Table,
    Quiet,
}

/// One page of a list, as printed in json modes
#[derive(Serialize)]
struct PageView<'a, T> {
    records: &'a [T],
    next_token: Option<&'a str>,
}

#[derive(Clone, Debug)]
pub struct Output {
    format: OutputFormat,
    path: Option<PathBuf>,
}

impl Output {
    pub fn new(format: OutputFormat, path: Option<PathBuf>) -> Self {
        Self { format, path }
    }

    /// Prints any value as json. Table mode falls back to json.
    pub fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let document = self.render_json(value)?;
        self.write(document)
    }

    /// Prints a single record: one table row, or a json object.
    pub fn emit_one<T: TableRow + Serialize>(&self, item: &T) -> Result<()> {
        if self.format == OutputFormat::Table {
            return self.write(Some(render_table(std::slice::from_ref(item))));
        }
        self.emit_json(item)
    }

    /// Prints records: a table, or a json array.
    pub fn emit_records<T: TableRow + Serialize>(&self, items: &[T]) -> Result<()> {
        if self.format == OutputFormat::Table {
            return self.write(Some(render_table(items)));
        }
        self.emit_json(items)
    }

    /// Prints one page of a list with the cursor for the following page.
    ///
    /// Tables get a `next: --next-token ...` line below the rows; json output keeps the
    /// server's `{records, next_token}` shape.
    pub fn emit_page<T: TableRow + Serialize>(
        &self,
        records: &[T],
        next_token: Option<&str>,
    ) -> Result<()> {
        if self.format == OutputFormat::Table {
            let mut document = render_table(records);
            if let Some(token) = next_token {
                document.push_str("\nnext: --next-token ");
                document.push_str(token);
            }
            return self.write(Some(document));
        }
        self.emit_json(&PageView {
            records,
            next_token,
        })
    }

    fn render_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<Option<String>> {
        let document = match self.format {
            OutputFormat::Quiet => return Ok(None),
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
            OutputFormat::Json | OutputFormat::Table => serde_json::to_string(value)?,
        };
        Ok(Some(document))
    }

    // quiet mode renders nothing, and leaves an existing output file untouched
    fn write(&self, document: Option<String>) -> Result<()> {
        let Some(mut document) = document.filter(|_| self.format != OutputFormat::Quiet) else {
            return Ok(());
        };
        if !document.ends_with('\n') {
            document.push('\n');
        }

        if let Some(path) = &self.path {
            fs::write(path, document).with_context(|| format!("write {}", path.display()))?;
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use whoop::prelude::UserProfile;

    use super::*;

    fn profile(user_id: i64) -> UserProfile {
        UserProfile {
            user_id,
            email: format!("user{user_id}@test.com"),
            first_name: "test_first".into(),
            last_name: "test_last".into(),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("whoopr_{name}_{}.out", std::process::id()))
    }

    #[test]
    fn test_table_page_to_file_keeps_rows_and_token() {
        let path = temp_path("table_page");
        let output = Output::new(OutputFormat::Table, Some(path.clone()));
        output
            .emit_page(&[profile(1), profile(2)], Some("abc"))
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 5, "{written}");
        assert!(lines[0].starts_with("user id"));
        assert!(lines[2].contains("user1@test.com"));
        assert!(lines[3].contains("user2@test.com"));
        assert_eq!(lines[4], "next: --next-token abc");
    }

    #[test]
    fn test_json_page_to_file() {
        let path = temp_path("json_page");
        let output = Output::new(OutputFormat::Json, Some(path.clone()));
        output.emit_page(&[profile(1)], None).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["records"][0]["user_id"], 1);
        assert!(value["next_token"].is_null());
    }

    #[test]
    fn test_quiet_writes_nothing() {
        let path = temp_path("quiet");
        let _ = fs::remove_file(&path);
        let output = Output::new(OutputFormat::Quiet, Some(path.clone()));
        output.emit_page(&[profile(1)], Some("abc")).unwrap();
        output.emit_one(&profile(1)).unwrap();
        assert!(!path.exists());
    }
}
