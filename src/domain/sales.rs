//! Sales totals for the admin dashboard.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::domain::entities::{Order, OrderId};
use crate::domain::money;

/// Calendar week, Sunday through Saturday, containing `date`.
#[must_use]
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = i64::from(date.weekday().num_days_from_sunday());
    let start = date - Duration::days(offset);
    (start, start + Duration::days(6))
}

/// Totals for one selected day and its enclosing week and month.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesReport {
    pub date: NaiveDate,
    pub daily_total: Decimal,
    pub weekly_total: Decimal,
    pub monthly_total: Decimal,
    /// Orders placed on `date`, in input order.
    pub orders_on_day: Vec<Order>,
}

impl SalesReport {
    /// Aggregates `orders` around `date`. Creation times are compared as UTC dates.
    #[must_use]
    pub fn for_date(orders: &[Order], date: NaiveDate) -> Self {
        let (week_start, week_end) = week_bounds(date);

        let mut daily_total = Decimal::ZERO;
        let mut weekly_total = Decimal::ZERO;
        let mut monthly_total = Decimal::ZERO;
        let mut orders_on_day = Vec::new();

        for order in orders {
            let day = order.created_at.date_naive();
            if day == date {
                daily_total += order.total;
                orders_on_day.push(order.clone());
            }
            if day >= week_start && day <= week_end {
                weekly_total += order.total;
            }
            if day.year() == date.year() && day.month() == date.month() {
                monthly_total += order.total;
            }
        }

        Self {
            date,
            daily_total: money::round(daily_total),
            weekly_total: money::round(weekly_total),
            monthly_total: money::round(monthly_total),
            orders_on_day,
        }
    }

    /// First `n` orders of the day.
    #[must_use]
    pub fn preview(&self, n: usize) -> &[Order] {
        &self.orders_on_day[..n.min(self.orders_on_day.len())]
    }

    #[must_use]
    pub fn order_ids(&self) -> Vec<OrderId> {
        self.orders_on_day.iter().map(|o| o.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use test_case::test_case;

    fn order(id: i64, y: i32, m: u32, d: u32, total: i64) -> Order {
        Order {
            id: OrderId(id),
            created_at: Utc.with_ymd_and_hms(y, m, d, 12, 30, 0).unwrap(),
            items: Vec::new(),
            total: Decimal::new(total, 2),
            phone_number: Some("0900000000".to_string()),
            address: Some("1 Main St".to_string()),
            note: None,
            user_id: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_case(date(2024, 3, 13), date(2024, 3, 10), date(2024, 3, 16) ; "midweek")]
    #[test_case(date(2024, 3, 10), date(2024, 3, 10), date(2024, 3, 16) ; "sunday starts week")]
    #[test_case(date(2024, 3, 16), date(2024, 3, 10), date(2024, 3, 16) ; "saturday ends week")]
    #[test_case(date(2024, 3, 1), date(2024, 2, 25), date(2024, 3, 2) ; "crosses month")]
    fn test_week_bounds(day: NaiveDate, start: NaiveDate, end: NaiveDate) {
        assert_eq!(week_bounds(day), (start, end));
    }

    #[test]
    fn test_report_totals() {
        let orders = vec![
            order(1, 2024, 3, 13, 1050),
            order(2, 2024, 3, 13, 2000),
            order(3, 2024, 3, 10, 500),
            order(4, 2024, 3, 2, 700),
            order(5, 2024, 2, 28, 900),
            order(6, 2023, 3, 13, 10000),
        ];

        let report = SalesReport::for_date(&orders, date(2024, 3, 13));

        assert_eq!(report.daily_total, Decimal::new(3050, 2));
        assert_eq!(report.weekly_total, Decimal::new(3550, 2));
        assert_eq!(report.monthly_total, Decimal::new(4250, 2));
        assert_eq!(report.order_ids(), vec![OrderId(1), OrderId(2)]);
    }

    #[test]
    fn test_empty_day() {
        let report = SalesReport::for_date(&[], date(2024, 1, 1));

        assert_eq!(report.daily_total, Decimal::ZERO);
        assert_eq!(report.weekly_total, Decimal::ZERO);
        assert_eq!(report.monthly_total, Decimal::ZERO);
        assert!(report.preview(3).is_empty());
    }

    #[test]
    fn test_preview_limits_orders() {
        let orders: Vec<Order> = (1..=5).map(|id| order(id, 2024, 5, 5, 100)).collect();
        let report = SalesReport::for_date(&orders, date(2024, 5, 5));

        let preview: Vec<i64> = report.preview(3).iter().map(|o| o.id.0).collect();
        assert_eq!(preview, vec![1, 2, 3]);
        assert_eq!(report.preview(10).len(), 5);
    }
}
