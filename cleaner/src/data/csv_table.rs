// Reads CSV files into `Table`s and writes them back out.
use anyhow::{anyhow, Result};
use csv::{ReaderBuilder, WriterBuilder};
use shared::models::{Cell, Table};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// Reads a delimited table. The first record is the header; every field is
/// kept as `Cell::Text`, including empty ones, so placeholder handling is
/// left to the cleaning steps.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true) // Ragged rows are reported below with their line number
        .from_reader(reader);

    // Header names become column names, in file order
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    // Line numbers are 1-based and the header sits on line 1
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", idx + 2, e))?;
        if record.len() != headers.len() {
            return Err(anyhow!(
                "CSV record at line {} has {} fields, expected {}",
                idx + 2,
                record.len(),
                headers.len()
            ));
        }
        rows.push(record.iter().map(Cell::from).collect());
    }

    // Transpose rows into named columns
    Table::from_rows(headers, rows)
}

pub fn load_table_from_csv(file_path: impl AsRef<Path>, delimiter: u8) -> Result<Table> {
    let file_path = file_path.as_ref();
    let file = File::open(file_path)
        .map_err(|e| anyhow!("Failed to open CSV file '{}': {}", file_path.display(), e))?;
    let table = read_table(BufReader::new(file), delimiter)?;
    info!(path = %file_path.display(), rows = table.row_count(), "Loaded CSV table");
    Ok(table)
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Null => String::new(),
        Cell::Text(text) => text.clone(),
        Cell::Number(value) => value.to_string(),
    }
}

/// Writes the header and all rows. `Null` becomes an empty field and numbers
/// use the shortest representation that reads back to the same value.
pub fn write_table<W: Write>(writer: W, table: &Table, delimiter: u8) -> Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(delimiter).from_writer(writer);

    // Header first, then one record per row
    wtr.write_record(table.column_names())?;
    for row in table.rows() {
        wtr.write_record(row.into_iter().map(render_cell))?;
    }
    // Write errors only surface on flush
    wtr.flush()?;
    Ok(())
}

pub fn save_table_to_csv(file_path: impl AsRef<Path>, table: &Table, delimiter: u8) -> Result<()> {
    let file_path = file_path.as_ref();
    let file = File::create(file_path)
        .map_err(|e| anyhow!("Failed to create CSV file '{}': {}", file_path.display(), e))?;
    write_table(BufWriter::new(file), table, delimiter)?;
    info!(path = %file_path.display(), rows = table.row_count(), "Saved CSV table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Column;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_table_brazilian_quotes() {
        let csv_content = "\
Ativo;Data;Fechamento;Volume
WINFUT;30/12/2024;123.983;600.822.115,84
PETR4;02/01/2023;23,75;";
        let table = read_table(csv_content.as_bytes(), b';').unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["Ativo", "Data", "Fechamento", "Volume"]);
        assert_eq!(
            table.column("Volume").unwrap().cells,
            vec![Cell::Text("600.822.115,84".to_string()), Cell::Text(String::new())]
        );
    }

    #[test]
    fn test_read_table_header_only() {
        let table = read_table("a,b".as_bytes(), b',').unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn test_read_table_ragged_record() {
        let result = read_table("a,b\n1,2\n3".as_bytes(), b',');
        assert!(result.unwrap_err().to_string().contains("line 3 has 1 fields"));
    }

    #[test]
    fn test_write_table_renders_cells() {
        let table = Table::new(vec![
            Column::new("name", vec![Cell::Text("PETR4".to_string()), Cell::Text("a;b".to_string())]),
            Column::new("close", vec![Cell::Number(1234.56), Cell::Null]),
            Column::new("trades", vec![Cell::Number(7.0), Cell::Number(-3.0)]),
        ])
        .unwrap();

        let mut out = Vec::new();
        write_table(&mut out, &table, b';').unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "name;close;trades\nPETR4;1234.56;7\n\"a;b\";;-3\n");
    }

    #[test]
    fn test_file_round_trip() {
        let input = create_test_csv("symbol,close\nVALE3,\"1,50\"");
        let table = load_table_from_csv(input.path(), b',').unwrap();
        assert_eq!(table.column("close").unwrap().cells, vec![Cell::Text("1,50".to_string())]);

        let output = NamedTempFile::new().unwrap();
        save_table_to_csv(output.path(), &table, b',').unwrap();
        let reloaded = load_table_from_csv(output.path(), b',').unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_missing_file() {
        let result = load_table_from_csv("/nonexistent/table.csv", b',');
        assert!(result.unwrap_err().to_string().contains("Failed to open CSV file"));
    }
}
