use crate::ledger::Expense;

const HEADER: [&str; 5] = ["Name", "Amount", "Category", "Date", "Recurring"];

/// Renders records as CSV: every field quoted, rows joined by `\n`.
pub fn render(records: &[Expense]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(row(HEADER.iter().map(|field| field.to_string())));
    for record in records {
        lines.push(row([
            record.name.clone(),
            record.amount.to_string(),
            record.category.to_string(),
            record.date.format("%Y-%m-%d").to_string(),
            record.recurring.to_string(),
        ]));
    }
    lines.join("\n")
}

fn row(fields: impl IntoIterator<Item = String>) -> String {
    fields
        .into_iter()
        .map(|field| quote(&field))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerState;

    #[test]
    fn header_only_for_empty_ledger() {
        assert_eq!(render(&[]), r#""Name","Amount","Category","Date","Recurring""#);
    }

    #[test]
    fn quotes_are_doubled() {
        let mut records = LedgerState::demo().records;
        records.truncate(1);
        records[0].name = r#"The "big" flight"#.into();
        let csv = render(&records);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            r#""The ""big"" flight","420","Transport","2025-10-11","false""#
        );
    }
}
