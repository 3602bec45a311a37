//! Printable PDF report.
//!
//! The writer emits a minimal PDF 1.4 document using the two standard Type1
//! fonts, so no font data is embedded. Text outside printable ASCII is
//! replaced with `?`.

use std::fmt::Write as _;

use crate::{
    core::derivation::{progress, total},
    currency::{format_currency, CurrencyDisplay, LocaleConfig},
    ledger::{Expense, LedgerState},
};

pub const REPORT_TITLE: &str = "Budget Planner Report";

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const ROW_HEIGHT: f32 = 18.0;
const FIRST_TABLE_TOP: f32 = 730.0;
const NEXT_TABLE_TOP: f32 = PAGE_HEIGHT - MARGIN;
const FONT_SIZE: f32 = 10.0;
const NAME_MAX_CHARS: usize = 34;

const COLUMNS: [(&str, f32); 5] = [
    ("Name", 190.0),
    ("Amount", 100.0),
    ("Category", 95.0),
    ("Date", 80.0),
    ("Recurring", 50.0),
];

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_REGULAR_ID: usize = 3;
const FONT_BOLD_ID: usize = 4;
const FIRST_PAGE_ID: usize = 5;

/// Renders the ledger as a paginated A4 report.
pub fn render(state: &LedgerState, locale: &LocaleConfig) -> Vec<u8> {
    let money = |amount: f64| format_currency(amount, &state.currency, locale, CurrencyDisplay::Code);
    let spent = total(&state.records);
    let pages = paginate(&state.records);
    let page_count = pages.len();

    let mut writer = PdfWriter::new();
    writer.object(CATALOG_ID, &format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>"));
    let kids = (0..page_count)
        .map(|index| format!("{} 0 R", page_id(index)))
        .collect::<Vec<_>>()
        .join(" ");
    writer.object(
        PAGES_ID,
        &format!("<< /Type /Pages /Kids [{kids}] /Count {page_count} >>"),
    );
    writer.object(
        FONT_REGULAR_ID,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );
    writer.object(
        FONT_BOLD_ID,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
    );

    for (index, rows) in pages.iter().enumerate() {
        let mut content = Content::default();
        let table_top = if index == 0 {
            content.text(MARGIN, 800.0, true, 18.0, REPORT_TITLE);
            content.text(
                MARGIN,
                776.0,
                false,
                11.0,
                &format!("Currency: {}    Mode: {}", state.currency, state.mode),
            );
            content.text(
                MARGIN,
                760.0,
                false,
                11.0,
                &format!(
                    "Goal: {}    Total Spent: {}    Progress: {}%",
                    money(state.goal),
                    money(spent),
                    progress(spent, state.goal)
                ),
            );
            FIRST_TABLE_TOP
        } else {
            NEXT_TABLE_TOP
        };

        let header: Vec<String> = COLUMNS.iter().map(|(label, _)| label.to_string()).collect();
        content.row(table_top, &header, true);
        for (offset, record) in rows.iter().enumerate() {
            let top = table_top - ROW_HEIGHT * (offset as f32 + 1.0);
            content.row(top, &cells(record, &money), false);
        }
        content.text(
            PAGE_WIDTH - MARGIN - 60.0,
            MARGIN / 2.0,
            false,
            8.0,
            &format!("Page {} of {}", index + 1, page_count),
        );

        let id = page_id(index);
        writer.object(
            id,
            &format!(
                "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 {FONT_REGULAR_ID} 0 R /F2 {FONT_BOLD_ID} 0 R >> >> \
                 /Contents {} 0 R >>",
                id + 1
            ),
        );
        writer.stream(id + 1, &content.0);
    }

    writer.finish()
}

fn page_id(index: usize) -> usize {
    FIRST_PAGE_ID + index * 2
}

fn rows_fitting(table_top: f32) -> usize {
    // One row is taken by the column header.
    (((table_top - MARGIN) / ROW_HEIGHT).floor() as usize).saturating_sub(1)
}

/// Splits records into per-page chunks. An empty ledger still yields one page.
fn paginate(records: &[Expense]) -> Vec<&[Expense]> {
    let first = rows_fitting(FIRST_TABLE_TOP);
    let next = rows_fitting(NEXT_TABLE_TOP);
    let split = first.min(records.len());
    let (head, rest) = records.split_at(split);
    let mut pages = vec![head];
    pages.extend(rest.chunks(next));
    pages
}

fn cells(record: &Expense, money: &impl Fn(f64) -> String) -> Vec<String> {
    let mut name = record.name.clone();
    if name.chars().count() > NAME_MAX_CHARS {
        name = name.chars().take(NAME_MAX_CHARS - 3).collect::<String>() + "...";
    }
    vec![
        name,
        money(record.amount),
        record.category.to_string(),
        record.date.format("%Y-%m-%d").to_string(),
        if record.recurring { "Yes" } else { "No" }.to_string(),
    ]
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            _ => out.push('?'),
        }
    }
    out
}

#[derive(Default)]
struct Content(String);

impl Content {
    fn text(&mut self, x: f32, y: f32, bold: bool, size: f32, text: &str) {
        let font = if bold { "F2" } else { "F1" };
        let _ = writeln!(
            self.0,
            "BT /{font} {size} Tf {x:.2} {y:.2} Td ({}) Tj ET",
            escape(text)
        );
    }

    fn row(&mut self, top: f32, cells: &[String], bold: bool) {
        let bottom = top - ROW_HEIGHT;
        let mut x = MARGIN;
        for ((_, width), cell) in COLUMNS.iter().zip(cells) {
            let _ = writeln!(
                self.0,
                "0.5 w {x:.2} {bottom:.2} {width:.2} {ROW_HEIGHT:.2} re S"
            );
            self.text(x + 4.0, bottom + 5.0, bold, FONT_SIZE, cell);
            x += width;
        }
    }
}

struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfWriter {
    fn new() -> Self {
        Self {
            buf: b"%PDF-1.4\n".to_vec(),
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &str) {
        self.offsets.push((id, self.buf.len()));
        self.buf
            .extend_from_slice(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
    }

    fn stream(&mut self, id: usize, data: &str) {
        self.object(
            id,
            &format!("<< /Length {} >>\nstream\n{data}endstream", data.len()),
        );
    }

    fn finish(mut self) -> Vec<u8> {
        self.offsets.sort_unstable();
        let size = self.offsets.len() + 1;
        let xref_at = self.buf.len();
        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            let _ = write!(xref, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {size} /Root {CATALOG_ID} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        );
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text_of(bytes: &[u8]) -> String {
        String::from_utf8(bytes.to_vec()).expect("report is ascii")
    }

    #[test]
    fn demo_report_has_summary_lines_and_rows() {
        let pdf = text_of(&render(&LedgerState::demo(), &LocaleConfig::default()));
        assert!(pdf.starts_with("%PDF-1.4"));
        assert!(pdf.trim_end().ends_with("%%EOF"));
        assert!(pdf.contains(REPORT_TITLE));
        assert!(pdf.contains("(Currency: USD    Mode: Trip)"));
        assert!(pdf.contains("Total Spent: USD 930.00"));
        assert!(pdf.contains("Progress: 78%"));
        assert!(pdf.contains("(Hotel \\(4 nights\\))"));
        assert!(pdf.contains("/Count 1"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = render(&LedgerState::demo(), &LocaleConfig::default());
        let pdf = text_of(&bytes);
        let xref = pdf.rfind("xref\n").unwrap();
        for (index, line) in pdf[xref..].lines().skip(3).take(6).enumerate() {
            let offset: usize = line[..10].parse().unwrap();
            assert!(pdf[offset..].starts_with(&format!("{} 0 obj", index + 1)));
        }
    }

    #[test]
    fn long_ledgers_span_pages() {
        let mut state = LedgerState::default();
        let template = LedgerState::demo().records[0].clone();
        for id in 0..100 {
            let mut record = template.clone();
            record.id = id;
            record.date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            state.records.push(record);
        }
        let pdf = text_of(&render(&state, &LocaleConfig::default()));
        assert!(pdf.contains("/Count 3"));
        assert!(pdf.contains("(Page 3 of 3)"));
    }

    #[test]
    fn non_ascii_is_replaced() {
        assert_eq!(escape("Café (x)"), "Caf? \\(x\\)");
    }
}
