/// Rendering of compiled queries and emulated result sets for the CLI

use comfy_table::{Cell, Table as ComfyTable, presets::UTF8_FULL};

use crate::config::OutputFormat;
use crate::types::{CompiledQuery, QueryError, Row, Scalar};

pub fn render_compiled(compiled: &CompiledQuery, format: OutputFormat) -> Result<String, QueryError> {
    match format {
        OutputFormat::Text => Ok(format!(
            "{}\n-- placed values: {}\n",
            compiled.sql,
            serde_json::to_string(&compiled.placed_values)?
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(compiled)? + "\n"),
        OutputFormat::Table => {
            let mut table = ComfyTable::new();
            table.load_preset(UTF8_FULL);
            table.set_header(["#", "value", "type"].map(Cell::new));
            for (position, value) in compiled.placed_values.iter().enumerate() {
                table.add_row([
                    Cell::new(position + 1),
                    Cell::new(value),
                    Cell::new(value.type_name()),
                ]);
            }
            Ok(format!("{}\n{table}\n", compiled.sql))
        }
    }
}

pub fn render_rows(rows: &[Row], format: OutputFormat) -> Result<String, QueryError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)? + "\n"),
        OutputFormat::Text => {
            let mut out = String::new();
            for row in rows {
                out.push_str(&serde_json::to_string(row)?);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                return Ok("(0 rows)\n".to_string());
            }

            // Header is the union of keys, in first-seen order
            let mut columns: Vec<&String> = Vec::new();
            for row in rows {
                for key in row.keys() {
                    if !columns.contains(&key) {
                        columns.push(key);
                    }
                }
            }

            let mut table = ComfyTable::new();
            table.load_preset(UTF8_FULL);
            table.set_header(columns.iter().map(|c| Cell::new(c)));
            for row in rows {
                let cells = columns
                    .iter()
                    .map(|column| match row.get(column.as_str()) {
                        Some(value) => Scalar::from_json(value)
                            .map_or_else(|_| value.to_string(), |scalar| scalar.to_string()),
                        None => String::new(),
                    })
                    .map(Cell::new);
                table.add_row(cells);
            }

            Ok(format!("{table}\n({} rows)\n", rows.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::row_from;

    fn compiled() -> CompiledQuery {
        CompiledQuery {
            sql: "DELETE FROM t\nWHERE `a` = ?".to_string(),
            placed_values: vec![Scalar::from("x")],
        }
    }

    #[test]
    fn test_render_compiled_text() {
        assert_eq!(
            render_compiled(&compiled(), OutputFormat::Text).unwrap(),
            "DELETE FROM t\nWHERE `a` = ?\n-- placed values: [\"x\"]\n"
        );
    }

    #[test]
    fn test_render_compiled_json() {
        let out = render_compiled(&compiled(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["placedValues"][0], "x");
    }

    #[test]
    fn test_render_rows_table() {
        let rows = vec![
            row_from([("id", Scalar::Int(1)), ("name", Scalar::from("Alice"))]),
            row_from([("id", Scalar::Int(2)), ("note", Scalar::Null)]),
        ];
        let out = render_rows(&rows, OutputFormat::Table).unwrap();
        assert!(out.contains("Alice"));
        assert!(out.contains("note"));
        assert!(out.contains("NULL"));
        assert!(out.ends_with("(2 rows)\n"));
        assert_eq!(render_rows(&[], OutputFormat::Table).unwrap(), "(0 rows)\n");
    }

    #[test]
    fn test_render_rows_text_is_json_lines() {
        let rows = vec![row_from([("id", 1)]), row_from([("id", 2)])];
        assert_eq!(
            render_rows(&rows, OutputFormat::Text).unwrap(),
            "{\"id\":1}\n{\"id\":2}\n"
        );
    }
}
