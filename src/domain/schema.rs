// ==========================================
// МТР transfer schema
// ==========================================
// Declarative description of the target table: one SchemaField per
// column sourced from the ODS document. Declaration order defines the
// insertion column order; target names are unique.
// Source column names are the literal headers of the warehouse export.
// ==========================================

/// How a raw cell is coerced into its target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, char-truncated to max_length
    Text,
    /// f64, decimal comma normalized to a period before parsing
    Decimal,
    /// NaiveDate in the fixed DATE_FORMAT
    Date,
    /// Column reserved in the target table with no ODS source
    ConstantNull,
}

/// One target column and its mapping rule.
#[derive(Debug, Clone, Copy)]
pub struct SchemaField {
    /// Header name in the source document (exact match)
    pub source_column: &'static str,
    /// Column name in the target table
    pub target_name: &'static str,
    pub kind: FieldKind,
    /// Char limit for Text fields; None = unlimited
    pub max_length: Option<usize>,
    /// Normalize `,` to `.` before numeric parsing
    pub decimal_comma_fixup: bool,
}

/// Fixed date format of `Дата ЛЗК` cells.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Provenance columns appended after the schema fields, in insert order:
/// source file name, load timestamp, execution principal.
pub const PROVENANCE_COLUMNS: [&'static str; 3] =
    ["имя_файла", "дата_загрузки", "кто_загрузил"];

const MTR_SCHEMA: [SchemaField; 10] = [
    SchemaField {
        source_column: "Код МТР",
        target_name: "код_МТР",
        kind: FieldKind::Text,
        max_length: Some(7),
        decimal_comma_fixup: false,
    },
    SchemaField {
        source_column: "Склад/МОЛ",
        target_name: "склад_мол",
        kind: FieldKind::Text,
        max_length: Some(50),
        decimal_comma_fixup: false,
    },
    SchemaField {
        source_column: "№ ЛЗК",
        target_name: "номер_документа",
        kind: FieldKind::Text,
        max_length: Some(50),
        decimal_comma_fixup: false,
    },
    SchemaField {
        source_column: "Дата ЛЗК",
        target_name: "Дата",
        kind: FieldKind::Date,
        max_length: None,
        decimal_comma_fixup: false,
    },
    SchemaField {
        source_column: "№ заказа до переноса",
        target_name: "старый_заказ",
        kind: FieldKind::Text,
        max_length: Some(13),
        decimal_comma_fixup: false,
    },
    SchemaField {
        source_column: "Количество МТР",
        target_name: "количество",
        kind: FieldKind::Decimal,
        max_length: None,
        decimal_comma_fixup: true,
    },
    SchemaField {
        source_column: "Стоимость без ТЗР",
        target_name: "стоимость",
        kind: FieldKind::Decimal,
        max_length: None,
        decimal_comma_fixup: true,
    },
    SchemaField {
        source_column: "Номер реестра",
        target_name: "реестр",
        kind: FieldKind::Text,
        max_length: Some(50),
        decimal_comma_fixup: false,
    },
    SchemaField {
        source_column: "№ заказа после переноса",
        target_name: "новый_заказ",
        kind: FieldKind::Text,
        max_length: Some(13),
        decimal_comma_fixup: false,
    },
    SchemaField {
        // Reserved column, never populated from the document
        source_column: "",
        target_name: "паспорт",
        kind: FieldKind::ConstantNull,
        max_length: None,
        decimal_comma_fixup: false,
    },
];

/// The fixed МТР transfer schema.
pub fn mtr_schema() -> &'static [SchemaField] {
    &MTR_SCHEMA
}

/// All target columns in insert order: schema fields followed by the
/// provenance columns.
pub fn insert_columns(schema: &[SchemaField]) -> Vec<&'static str> {
    schema
        .iter()
        .map(|f| f.target_name)
        .chain(PROVENANCE_COLUMNS)
        .collect()
}
