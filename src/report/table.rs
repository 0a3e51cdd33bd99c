//! Side-by-side OLS/WLS comparison table.

use super::ReportError;
use crate::diagnostics::{DiagnosticResult, HeteroscedasticityTest};
use crate::estimation::FittedModel;
use crate::utils::{read_csv_with_bom, write_csv_with_bom};
use std::fmt;
use std::path::Path;

/// Column names, label column first.
pub const TABLE_HEADER: [&str; 3] = [
    "Métrica",
    "Modelo OLS (Original)",
    "Modelo WLS (Corrigido)",
];

const SEPARATOR: &str = "---";

const HEADING: &str = "--- Tabela Comparativa: OLS vs. WLS (Heterocedasticidade Corrigida) ---";
const NOTE: &str = "Nota: p-valores altos (>0.05) nos testes do modelo WLS indicam que a \
                    heterocedasticidade foi corrigida com sucesso.";

/// One labelled row with the OLS and WLS values, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub label: String,
    pub ols: String,
    pub wls: String,
}

impl TableRow {
    fn new(label: &str, ols: String, wls: String) -> Self {
        Self {
            label: label.to_string(),
            ols,
            wls,
        }
    }

    fn separator() -> Self {
        Self::new(SEPARATOR, SEPARATOR.to_string(), SEPARATOR.to_string())
    }

    fn cells(&self) -> [&str; 3] {
        [self.label.as_str(), self.ols.as_str(), self.wls.as_str()]
    }
}

/// The ten-row comparison of the original and corrected models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTable {
    rows: Vec<TableRow>,
}

impl ComparisonTable {
    /// Assemble the table from both fits and their diagnostics.
    ///
    /// Numbers are rendered with four decimals.
    pub fn build(
        ols: &FittedModel,
        wls: &FittedModel,
        ols_tests: &DiagnosticResult,
        wls_tests: &DiagnosticResult,
    ) -> Self {
        let mut rows = vec![
            TableRow::new(
                "R² Ajustado",
                fmt4(ols.adj_r_squared()),
                fmt4(wls.adj_r_squared()),
            ),
            TableRow::new(
                "Coef. Intercepto",
                fmt4(ols.intercept().value),
                fmt4(wls.intercept().value),
            ),
            TableRow::new(
                "Std Err (Intercepto)",
                fmt4(ols.intercept().std_error),
                fmt4(wls.intercept().std_error),
            ),
            TableRow::new("Coef. X", fmt4(ols.slope().value), fmt4(wls.slope().value)),
            TableRow::new(
                "Std Err (X)",
                fmt4(ols.slope().std_error),
                fmt4(wls.slope().std_error),
            ),
        ];

        rows.push(TableRow::separator());

        for test in HeteroscedasticityTest::ALL {
            rows.push(TableRow::new(
                test_label(test),
                fmt4(ols_tests.p_value(test)),
                fmt4(wls_tests.p_value(test)),
            ));
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Row with the given label, if any.
    pub fn row(&self, label: &str) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Write the table as CSV with a UTF-8 BOM, replacing any existing file.
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), ReportError> {
        write_csv_with_bom(path, &TABLE_HEADER, self.rows.iter().map(TableRow::cells))?;
        Ok(())
    }

    /// Parse a table previously written by [`save_csv`](Self::save_csv).
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let (header, records) = read_csv_with_bom(path)?;
        if header != TABLE_HEADER {
            return Err(ReportError::Malformed(format!(
                "unexpected header {header:?}"
            )));
        }

        let rows = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| match <[String; 3]>::try_from(record) {
                Ok([label, ols, wls]) => Ok(TableRow { label, ols, wls }),
                Err(record) => Err(ReportError::Malformed(format!(
                    "row {i} has {} fields, expected 3",
                    record.len()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rows })
    }
}

/// Right-aligned columns separated by one space, without a row index.
impl fmt::Display for ComparisonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths = TABLE_HEADER.map(|h| h.chars().count());
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(f, TABLE_HEADER, widths)?;
        for row in &self.rows {
            writeln!(f)?;
            write_row(f, row.cells(), widths)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: [&str; 3], widths: [usize; 3]) -> fmt::Result {
    for (j, (cell, width)) in cells.into_iter().zip(widths).enumerate() {
        if j > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{cell:>width$}")?;
    }
    Ok(())
}

/// Print the table with its heading and note, then save it to `path`.
pub fn format_and_save_results<P: AsRef<Path>>(
    ols: &FittedModel,
    wls: &FittedModel,
    ols_tests: &DiagnosticResult,
    wls_tests: &DiagnosticResult,
    path: P,
) -> Result<ComparisonTable, ReportError> {
    let table = ComparisonTable::build(ols, wls, ols_tests, wls_tests);

    println!("{HEADING}");
    println!("{NOTE}");
    println!("{table}");

    table.save_csv(&path)?;
    println!("\nResultados comparativos salvos em: {}", path.as_ref().display());

    Ok(table)
}

fn test_label(test: HeteroscedasticityTest) -> &'static str {
    match test {
        HeteroscedasticityTest::BreuschPagan => "Teste Breusch-Pagan (p-valor)",
        HeteroscedasticityTest::White => "Teste de White (p-valor)",
        HeteroscedasticityTest::Park => "Teste de Park (p-valor)",
        HeteroscedasticityTest::Glejser => "Teste de Glejser (p-valor)",
    }
}

fn fmt4(value: f64) -> String {
    format!("{value:.4}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ComparisonTable {
        ComparisonTable {
            rows: vec![
                TableRow::new("R² Ajustado", fmt4(0.81234), fmt4(0.9)),
                TableRow::separator(),
                TableRow::new(test_label(HeteroscedasticityTest::Park), fmt4(0.0), fmt4(1.0)),
            ],
        }
    }

    #[test]
    fn test_fmt4() {
        assert_eq!(fmt4(0.81236), "0.8124");
        assert_eq!(fmt4(2.5), "2.5000");
    }

    #[test]
    fn test_display_right_aligned() {
        let text = sample_table().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("Modelo WLS (Corrigido)"));
        assert!(lines[1].trim_start().starts_with("R² Ajustado"));
        assert!(lines[1].ends_with(" 0.9000"));

        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_row_lookup() {
        let table = sample_table();
        assert_eq!(table.row("R² Ajustado").map(|r| r.ols.as_str()), Some("0.8123"));
        assert!(table.row("missing").is_none());
    }
}
