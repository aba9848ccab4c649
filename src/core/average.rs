use crate::core::order::Order;

/// Mean of `items_value()` across `orders`, summed in input order.
/// An empty slice reports `0.0` rather than an error. The result is always finite.
pub fn average_order_value(orders: &[Order]) -> f64 {
    if orders.is_empty() {
        return 0.0;
    }
    let count = orders.len() as f64;
    let total: f64 = orders.iter().map(Order::items_value).sum();
    if total.is_finite() {
        return total / count;
    }
    scaled_average(orders, count)
}

// Finite prices whose sum overflows. Prices are pre-divided by a power of two at
// least as large as the item count, so the partial sums stay in range and the
// scaling itself is exact.
fn scaled_average(orders: &[Order], count: f64) -> f64 {
    let items: usize = orders.iter().map(|order| order.items().len()).sum();
    let shift = usize::BITS - items.leading_zeros();
    let scale = 2f64.powi(shift as i32);
    let scaled: f64 = orders
        .iter()
        .flat_map(Order::items)
        .map(|item| item.price() / scale)
        .sum();
    let mean = scaled / count * scale;
    if mean.is_finite() {
        return mean;
    }
    tracing::warn!(
        orders = orders.len(),
        "average order value exceeds the f64 range; saturating"
    );
    f64::MAX.copysign(mean)
}
