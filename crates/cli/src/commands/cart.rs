//! Cart editing and inspection commands.
//!
//! # Usage
//!
//! ```bash
//! nest-cli add "Falcons Tee" 15 --size L --quantity 2
//! nest-cli set 0 4
//! nest-cli adjust 0 -1
//! nest-cli remove 0
//! nest-cli show --json
//! ```

use falcons_nest_core::{ItemName, Money, Quantity, Size};
use falcons_nest_storefront::{CartSession, CartSummary, KeyValueStore};

use super::{CommandError, report_save};

/// Add a product to the cart.
pub async fn add<S: KeyValueStore>(
    session: &mut CartSession<S>,
    name: &str,
    price: &str,
    size: &str,
    image: &str,
    quantity: u32,
) -> Result<(), CommandError> {
    let name = ItemName::parse(name)?;
    let price: Money = price.parse()?;
    let quantity = Quantity::new(quantity)?;

    let status = session
        .add_item_with_quantity(name, price, image, Size::new(size), quantity)
        .await;
    report_save(&status);
    tracing::info!(items = session.total_item_count(), "Added to cart");
    Ok(())
}

/// Set a line's quantity from raw input.
pub async fn set<S: KeyValueStore>(
    session: &mut CartSession<S>,
    index: usize,
    raw: &str,
) -> Result<(), CommandError> {
    let status = session.set_quantity_from_input(index, raw).await?;
    report_save(&status);
    Ok(())
}

/// Step a line's quantity.
pub async fn adjust<S: KeyValueStore>(
    session: &mut CartSession<S>,
    index: usize,
    delta: i64,
) -> Result<(), CommandError> {
    let status = session.adjust_quantity(index, delta).await?;
    report_save(&status);
    Ok(())
}

/// Remove a line.
pub async fn remove<S: KeyValueStore>(
    session: &mut CartSession<S>,
    index: usize,
) -> Result<(), CommandError> {
    let status = session.remove_item(index).await?;
    report_save(&status);
    Ok(())
}

/// Empty the cart.
pub async fn clear<S: KeyValueStore>(session: &mut CartSession<S>) {
    let status = session.clear().await;
    report_save(&status);
}

/// Print the cart and its totals.
#[allow(clippy::print_stdout)]
pub fn show<S: KeyValueStore>(session: &CartSession<S>, json: bool) -> Result<(), CommandError> {
    let summary = session.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render_summary(&summary));
    }
    Ok(())
}

/// Print the badge count.
#[allow(clippy::print_stdout)]
pub fn count<S: KeyValueStore>(session: &CartSession<S>) {
    println!("{}", session.total_item_count());
}

/// Plain-text cart table.
pub fn render_summary(summary: &CartSummary) -> String {
    if summary.is_empty {
        return "Your cart is empty.".to_string();
    }

    let mut lines: Vec<String> = summary
        .rows
        .iter()
        .map(|row| {
            let size = row
                .size_label
                .as_deref()
                .map(|label| format!(" (Size: {label})"))
                .unwrap_or_default();
            format!(
                "[{}] {}{} - {} x {} = {}",
                row.index, row.name, size, row.unit_price, row.quantity, row.line_total
            )
        })
        .collect();

    lines.push(String::new());
    lines.push(format!("Subtotal: {}", summary.subtotal));
    lines.push(format!("Tax (3%): {}", summary.tax));
    lines.push(format!("Total:    {}", summary.total));
    lines.push(format!("Items:    {}", summary.item_count));
    lines.join("\n")
}
