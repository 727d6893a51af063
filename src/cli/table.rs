use crate::api::{date, CustomerDto, ProductDto, SaleDto, StoreDto};

/// A DTO that can be printed as one line of a text table
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl TableRow for CustomerDto {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "ADDRESS"];

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.address.clone()]
    }
}

impl TableRow for StoreDto {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "ADDRESS"];

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.address.clone()]
    }
}

impl TableRow for ProductDto {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "PRICE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            format!("{:.2}", self.price),
        ]
    }
}

impl TableRow for SaleDto {
    const HEADERS: &'static [&'static str] =
        &["ID", "DATE", "PRODUCT", "CUSTOMER", "STORE", "QTY"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            date::format(&self.date),
            self.product_name.clone(),
            self.customer_name.clone(),
            self.store_name.clone(),
            self.quantity.to_string(),
        ]
    }
}

/// Render rows as left-aligned columns under a header and a rule
pub fn render<T: TableRow>(rows: &[T]) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();

    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(cells.len() + 2);
    out.push(line(T::HEADERS.to_vec()));
    out.push("-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in &cells {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn columns_widen_to_fit() {
        let rows = vec![
            ProductDto {
                id: 1,
                name: "Widget".to_string(),
                price: Decimal::new(5, 0),
            },
            ProductDto {
                id: 12,
                name: "Gadget deluxe".to_string(),
                price: Decimal::new(1999, 2),
            },
        ];
        let table = render(&rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "ID  NAME           PRICE");
        assert_eq!(lines[1], "-".repeat(24));
        assert_eq!(lines[2], "1   Widget         5.00");
        assert_eq!(lines[3], "12  Gadget deluxe  19.99");
    }

    #[test]
    fn empty_tables_still_have_headers() {
        let table = render::<CustomerDto>(&[]);
        assert_eq!(table.lines().next(), Some("ID  NAME  ADDRESS"));
    }
}
