use rust_xlsxwriter::{Format, Workbook};

use crate::error::{Error, Result};
use crate::models::record::{FieldValue, Record};
use crate::utils::validation::invalid_field;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Longest text Excel accepts in one cell.
pub const XLSX_MAX_CELL_CHARS: usize = 32_767;

fn clamp_cell(text: String) -> String {
    if text.chars().count() <= XLSX_MAX_CELL_CHARS {
        return text;
    }
    text.chars().take(XLSX_MAX_CELL_CHARS).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "excel" | "xlsx" => Some(ExportFormat::Excel),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_CONTENT_TYPE,
            ExportFormat::Excel => XLSX_CONTENT_TYPE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

pub struct ExportService;

impl ExportService {
    /// Default column set of the entity.
    pub fn export_default<E: Record>(records: &[E], format: ExportFormat) -> Result<ExportFile> {
        let schema = E::schema();
        let fields: Vec<&str> = schema.export_columns.iter().map(|c| c.field).collect();
        let headers: Vec<&str> = schema.export_columns.iter().map(|c| c.header).collect();
        Self::export(records, &fields, &headers, format, schema.export_basename)
    }

    /// Projects `records` onto `fields` in order, labelled by `headers`.
    pub fn export<E: Record>(
        records: &[E],
        fields: &[&str],
        headers: &[&str],
        format: ExportFormat,
        basename: &str,
    ) -> Result<ExportFile> {
        if fields.len() != headers.len() {
            return Err(invalid_field(
                "headers",
                "length_mismatch",
                format!(
                    "{} export fields but {} headers",
                    fields.len(),
                    headers.len()
                ),
            ));
        }

        let rows: Vec<Vec<FieldValue>> = records
            .iter()
            .map(|record| fields.iter().map(|f| record.value(f)).collect())
            .collect();

        let bytes = match format {
            ExportFormat::Csv => Self::write_csv(headers, &rows)?,
            ExportFormat::Excel => Self::write_xlsx(E::schema().label, headers, &rows)?,
        };
        tracing::debug!(
            kind = E::schema().kind,
            rows = rows.len(),
            format = format.extension(),
            "export rendered"
        );

        Ok(ExportFile {
            bytes,
            content_type: format.content_type(),
            filename: format!("{}.{}", basename, format.extension()),
        })
    }

    fn write_csv(headers: &[&str], rows: &[Vec<FieldValue>]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(headers)?;
        for row in rows {
            writer.write_record(row.iter().map(FieldValue::to_export_string))?;
        }
        writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }

    fn write_xlsx(sheet: &str, headers: &[&str], rows: &[Vec<FieldValue>]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet)?;

        let header_format = Format::new().set_bold();
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (idx, row) in rows.iter().enumerate() {
            let r = idx as u32 + 1;
            for (col, value) in row.iter().enumerate() {
                let c = col as u16;
                match value {
                    FieldValue::Null => {}
                    FieldValue::Int(n) => {
                        worksheet.write_number(r, c, *n as f64)?;
                    }
                    FieldValue::Bool(b) => {
                        worksheet.write_boolean(r, c, *b)?;
                    }
                    other => {
                        worksheet.write_string(r, c, clamp_cell(other.to_export_string()))?;
                    }
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job_position::{JobPosition, JobStatus};
    use crate::models::record::RecordMeta;
    use uuid::Uuid;

    fn position(title: &str, description: &str) -> JobPosition {
        JobPosition {
            meta: RecordMeta::new(Uuid::new_v4()),
            title: title.into(),
            department: "Eng".into(),
            description: description.into(),
            status: JobStatus::Open,
            vacancies: 2,
            is_active: true,
        }
    }

    #[test]
    fn csv_follows_declared_columns() {
        let file = ExportService::export_default(
            &[position("Backend", "Rust, mostly")],
            ExportFormat::Csv,
        )
        .unwrap();
        let text = String::from_utf8(file.bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Title,Status,Is Active,Vacancies,Department,Description")
        );
        assert_eq!(lines.next(), Some("Backend,open,true,2,Eng,\"Rust, mostly\""));
        assert_eq!(file.filename, "job_positions.csv");
        assert_eq!(file.content_type, CSV_CONTENT_TYPE);
    }

    #[test]
    fn custom_projection_keeps_caller_order() {
        let file = ExportService::export(
            &[position("QA", "")],
            &["vacancies", "title"],
            &["Openings", "Role"],
            ExportFormat::Csv,
            "custom",
        )
        .unwrap();
        let text = String::from_utf8(file.bytes).unwrap();
        assert_eq!(text, "Openings,Role\n2,QA\n");
    }

    #[test]
    fn mismatched_headers_are_rejected() {
        let result = ExportService::export(
            &[position("QA", "")],
            &["title", "status"],
            &["Title"],
            ExportFormat::Csv,
            "x",
        );
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn excel_is_a_zip_container() {
        let file =
            ExportService::export_default(&[position("QA", "")], ExportFormat::Excel).unwrap();
        assert_eq!(file.filename, "job_positions.xlsx");
        assert_eq!(&file.bytes[..2], b"PK");
    }

    #[test]
    fn excel_clamps_oversized_text() {
        let long = "x".repeat(40_000);
        let file =
            ExportService::export_default(&[position("QA", &long)], ExportFormat::Excel).unwrap();
        assert_eq!(&file.bytes[..2], b"PK");

        assert_eq!(clamp_cell(long).chars().count(), XLSX_MAX_CELL_CHARS);
        assert_eq!(clamp_cell("short".into()), "short");
    }
}
