//! Plain-text table rendering.

use stockroom_products::Product;

const HEADERS: [&str; 4] = ["#", "Product Name", "Price per Unit (Rs)", "Quantity"];

/// Render the product table, marking `selected` with `>`.
pub fn render_table(products: &[Product], selected: Option<usize>) -> String {
    let rows: Vec<[String; 4]> = products
        .iter()
        .enumerate()
        .map(|(index, p)| {
            [
                index.to_string(),
                p.name().to_string(),
                format_price(p.unit_price()),
                p.quantity().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, ' ', &HEADERS.map(String::from), &widths);
    for (index, row) in rows.iter().enumerate() {
        let marker = if selected == Some(index) { '>' } else { ' ' };
        push_line(&mut out, marker, row, &widths);
    }
    if products.is_empty() {
        out.push_str("  (no products)\n");
    }
    out
}

/// One-line description of a product.
pub fn describe_product(index: usize, product: &Product) -> String {
    format!(
        "#{index} {} | Rs {} | qty {}",
        product.name(),
        format_price(product.unit_price()),
        product.quantity()
    )
}

pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

fn push_line(out: &mut String, marker: char, cells: &[String; 4], widths: &[usize; 4]) {
    out.push(marker);
    out.push(' ');
    let [index, name, price, quantity] = cells;
    out.push_str(&format!(
        "{index:>w0$}  {name:<w1$}  {price:>w2$}  {quantity:>w3$}",
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    ));
    out.push('\n');
}
