//! Plain-text rendering of entities and use case results.

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::application::dto::{OrderDetails, OrderReceipt, SignInResponse, SignUpResponse};
use crate::domain::cart::Cart;
use crate::domain::entities::{FoodItem, ItemStatus, Order, Profile};
use crate::domain::money;
use crate::domain::sales::SalesReport;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Output settings taken from the `[ui]` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    pub currency_symbol: String,
    pub sales_preview: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            sales_preview: 3,
        }
    }
}

impl ViewSettings {
    fn money(&self, amount: Decimal) -> String {
        money::format(&self.currency_symbol, amount)
    }
}

fn rating_label(item: &FoodItem) -> String {
    match (item.rating, item.rating_count) {
        (_, 0) | (None, _) => "unrated".to_string(),
        (Some(rating), count) => format!("{rating:.1}/5 ({count})"),
    }
}

#[must_use]
pub fn menu_item(item: &FoodItem, settings: &ViewSettings) -> String {
    let mut line = format!(
        "{:>4}  {:<28} {:>10}  {}",
        item.id.as_i64(),
        item.title,
        settings.money(item.price),
        rating_label(item)
    );
    if item.status == ItemStatus::OutOfOrder {
        line.push_str("  [OUT OF ORDER]");
    }
    line
}

#[must_use]
pub fn menu(items: &[FoodItem], settings: &ViewSettings) -> String {
    if items.is_empty() {
        return "No items found.\n".to_string();
    }
    items.iter().fold(String::new(), |mut out, item| {
        let _ = writeln!(out, "{}", menu_item(item, settings));
        out
    })
}

/// Item with its description and image reference.
#[must_use]
pub fn item_details(item: &FoodItem, settings: &ViewSettings) -> String {
    let mut out = format!("{}\n", menu_item(item, settings));
    if let Some(description) = item.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "      {description}");
    }
    if let Some(image) = &item.image_url {
        let _ = writeln!(out, "      image: {image}");
    }
    out
}

#[must_use]
pub fn cart(cart: &Cart, settings: &ViewSettings) -> String {
    if cart.is_empty() {
        return "Cart is empty.\n".to_string();
    }
    let mut out = String::new();
    for line in cart.lines() {
        let _ = writeln!(
            out,
            "{:>4}  {:<28} {:>3} x {:>9} = {:>10}",
            line.item_id.as_i64(),
            line.title,
            line.quantity,
            settings.money(line.price),
            settings.money(line.subtotal())
        );
    }
    let _ = writeln!(
        out,
        "Total ({} items): {}",
        cart.item_count(),
        settings.money(cart.total())
    );
    out
}

#[must_use]
pub fn receipt(receipt: &OrderReceipt, settings: &ViewSettings) -> String {
    let order = &receipt.order;
    let mut out = format!(
        "Order #{} placed, total {}.\n",
        order.id,
        settings.money(receipt.total())
    );
    let _ = writeln!(
        out,
        "Delivering to {} ({}).",
        order.address.as_deref().unwrap_or_default(),
        order.phone_number.as_deref().unwrap_or_default()
    );
    out
}

fn order_summary(order: &Order, settings: &ViewSettings) -> String {
    let units: u32 = order.items.iter().map(|l| l.quantity).sum();
    format!(
        "#{:<6} {}  {:>3} items  {:>10}",
        order.id.0,
        order.created_at.format(TIMESTAMP_FORMAT),
        units,
        settings.money(order.total)
    )
}

#[must_use]
pub fn history(orders: &[Order], settings: &ViewSettings) -> String {
    if orders.is_empty() {
        return "No orders yet.\n".to_string();
    }
    orders.iter().fold(String::new(), |mut out, order| {
        let _ = writeln!(out, "{}", order_summary(order, settings));
        out
    })
}

#[must_use]
pub fn order_details(details: &OrderDetails, settings: &ViewSettings) -> String {
    let order = &details.order;
    let mut out = format!("{}\n", order_summary(order, settings));
    if let Some(name) = &details.customer_name {
        let _ = writeln!(out, "Customer: {name}");
    }
    if let Some(phone) = &order.phone_number {
        let _ = writeln!(out, "Phone:    {phone}");
    }
    if let Some(address) = &order.address {
        let _ = writeln!(out, "Address:  {address}");
    }
    if let Some(note) = order.note() {
        let _ = writeln!(out, "Note:     {note}");
    }
    for detail in &details.lines {
        let line = &detail.line;
        let _ = write!(
            out,
            "  {:>3} x {:<28} {:>10}",
            line.quantity,
            line.title,
            settings.money(line.subtotal())
        );
        match &detail.image_url {
            Some(url) => {
                let _ = writeln!(out, "  {url}");
            }
            None => out.push('\n'),
        }
    }
    out
}

#[must_use]
pub fn profile(profile: &Profile) -> String {
    let mut out = format!("{} ({})\n", profile.display_name(), profile.role);
    if let Some(username) = &profile.username {
        let _ = writeln!(out, "Username: {username}");
    }
    if let Some(email) = &profile.email {
        let _ = writeln!(out, "E-mail:   {email}");
    }
    let _ = writeln!(
        out,
        "Phone:    {}",
        profile.phone_number.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "Address:  {}", profile.address.as_deref().unwrap_or("-"));
    out
}

#[must_use]
pub fn customers(profiles: &[Profile]) -> String {
    if profiles.is_empty() {
        return "No customers.\n".to_string();
    }
    profiles.iter().fold(String::new(), |mut out, p| {
        let _ = writeln!(
            out,
            "{}  {:<24} {:<7} {:<14} {}",
            p.id,
            p.display_name(),
            p.role.as_str(),
            p.phone_number.as_deref().unwrap_or("-"),
            p.address.as_deref().unwrap_or("-")
        );
        out
    })
}

#[must_use]
pub fn sales_report(report: &SalesReport, settings: &ViewSettings) -> String {
    let mut out = format!("Sales for {}\n", report.date);
    let _ = writeln!(out, "  Day:   {:>12}", settings.money(report.daily_total));
    let _ = writeln!(out, "  Week:  {:>12}", settings.money(report.weekly_total));
    let _ = writeln!(out, "  Month: {:>12}", settings.money(report.monthly_total));

    if report.orders_on_day.is_empty() {
        out.push_str("No orders on this day.\n");
        return out;
    }
    let preview = report.preview(settings.sales_preview);
    let _ = writeln!(out, "Orders ({} total):", report.orders_on_day.len());
    for order in preview {
        let _ = writeln!(out, "  {}", order_summary(order, settings));
    }
    if report.orders_on_day.len() > preview.len() {
        let rest: Vec<String> = report.order_ids()[preview.len()..]
            .iter()
            .map(|id| format!("#{id}"))
            .collect();
        let _ = writeln!(out, "  more: {}", rest.join(", "));
    }
    out
}

#[must_use]
pub fn signed_in(response: &SignInResponse) -> String {
    let who = response
        .user
        .email
        .clone()
        .unwrap_or_else(|| response.user.id.to_string());
    let mut out = format!("Signed in as {who} ({}), {}.\n", response.role, response.destination);
    if !response.session_persisted {
        out.push_str("Session not saved; it ends with this command.\n");
    }
    out
}

#[must_use]
pub fn signed_up(response: &SignUpResponse) -> String {
    if response.signed_in {
        format!("Account {} created and signed in.\n", response.user.id)
    } else {
        format!(
            "Account {} created. Confirm the e-mail address, then log in.\n",
            response.user.id
        )
    }
}
