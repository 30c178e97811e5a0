//! Interactive ordering session.
//!
//! Holds the menu and the cart for its lifetime. A failed action is reported
//! and the session continues with its state unchanged.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::application::AppError;
use crate::domain::cart::Cart;
use crate::domain::catalog::MenuView;
use crate::domain::entities::{FoodItem, ProfileId};
use crate::presentation::alerts;
use crate::presentation::app::{App, find_item, unknown_item};
use crate::presentation::commands::{HELP, ShellCommand};
use crate::presentation::views;

const PROMPT: &str = "> ";

pub struct Shell<'a> {
    app: &'a App,
    user: ProfileId,
    menu: MenuView,
    cart: Cart,
}

impl<'a> Shell<'a> {
    #[must_use]
    pub fn new(app: &'a App, user: ProfileId, items: Vec<FoodItem>) -> Self {
        Self {
            app,
            user,
            menu: MenuView::new(items),
            cart: Cart::new(),
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// # Errors
    /// Returns error only if reading input or writing output fails.
    pub async fn run<R, W>(&mut self, input: &mut R, out: &mut W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        info!(user_id = %self.user, items = self.menu.all().len(), "Shell started");
        write!(out, "{}", views::menu(self.menu.visible(), &self.app.settings))?;
        writeln!(out, "Type 'help' for commands.")?;

        let mut lines = input.lines();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<ShellCommand>() {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => command,
                Err(e) => {
                    alerts::alert(&e);
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(output) => write!(out, "{output}")?,
                Err(e) => alerts::alert(&e),
            }
        }

        if !self.cart.is_empty() {
            debug!(lines = self.cart.lines().len(), "Shell closed with a non-empty cart");
        }
        Ok(())
    }

    /// Applies one command and returns the text to show.
    ///
    /// # Errors
    /// Returns the use case or cart failure; local state is left unchanged.
    pub async fn execute(&mut self, command: ShellCommand) -> Result<String, AppError> {
        let app = self.app;
        let settings = &app.settings;
        let output = match command {
            ShellCommand::Menu => views::menu(self.menu.visible(), settings),
            ShellCommand::Search(query) => {
                self.menu.set_query(query);
                views::menu(self.menu.visible(), settings)
            }
            ShellCommand::Sort => {
                let direction = self.menu.sort_by_price();
                format!(
                    "Sorted by price, {direction}.\n{}",
                    views::menu(self.menu.visible(), settings)
                )
            }
            ShellCommand::Info(id) => {
                let item = self.menu.find(id).ok_or_else(|| unknown_item(id))?;
                views::item_details(item, settings)
            }
            ShellCommand::Rate(id, stars) => {
                let item = app.menu.rate_item(id, stars).await?;
                let text = format!("Thanks for rating {}.\n", item.title);
                self.menu.patch(item);
                text
            }
            ShellCommand::Add(id) => {
                let item = find_item(self.menu.all(), id)?;
                let quantity = self.cart.add(item)?;
                format!("Added {} ({quantity} in cart).\n", item.title)
            }
            ShellCommand::Remove(id) => match self.cart.decrement(id)? {
                0 => format!("Removed item {id} from the cart.\n"),
                left => format!("{left} left of item {id}.\n"),
            },
            ShellCommand::Increase(id) => {
                let quantity = self.cart.increase_quantity(id)?;
                format!("Item {id}: {quantity}.\n")
            }
            ShellCommand::Decrease(id) => {
                let quantity = self.cart.decrease_quantity(id)?;
                format!("Item {id}: {quantity}.\n")
            }
            ShellCommand::Drop(id) => {
                let line = self.cart.remove(id)?;
                format!("Removed {} from the cart.\n", line.title)
            }
            ShellCommand::Cart => views::cart(&self.cart, settings),
            ShellCommand::Clear => {
                self.cart.clear();
                "Cart cleared.\n".to_string()
            }
            ShellCommand::Checkout(contact) => {
                let contact = if contact.validate().is_ok() {
                    contact
                } else {
                    contact.or(&app.checkout.contact_defaults(self.user).await?)
                };
                let receipt = app
                    .checkout
                    .place_order(self.user, &self.cart, contact)
                    .await?;
                self.cart.clear();
                views::receipt(&receipt, settings)
            }
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => String::new(),
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{USER_ID, user_id};
    use crate::domain::entities::FoodItemId;
    use crate::domain::errors::{CartError, ValidationError};
    use crate::domain::ports::decode_all;
    use crate::domain::ports::mocks::{InMemoryRowStore, MockAuthPort, MockSessionStorage};
    use crate::domain::query::Tables;
    use crate::presentation::views::ViewSettings;
    use serde_json::json;
    use std::sync::Arc;

    async fn fixture() -> (App, Arc<InMemoryRowStore>, Vec<FoodItem>) {
        let rows = vec![
            json!({ "id": 1, "title": "Pho bo", "price": 4.5, "status": "available" }),
            json!({ "id": 2, "title": "Banh mi", "price": 3.25, "status": "available" }),
            json!({ "id": 3, "title": "Pho ga", "price": 5.0, "status": "OUT OF ORDER" }),
        ];
        let store = Arc::new(
            InMemoryRowStore::new()
                .with_rows("food_items", rows.clone())
                .await
                .with_rows(
                    "profiles",
                    vec![json!({ "id": USER_ID, "phoneNumber": "0901234567", "address": "1 Market St" })],
                )
                .await,
        );
        let app = App::new(
            Arc::new(MockAuthPort::new()),
            store.clone(),
            Arc::new(MockSessionStorage::new()),
            Tables::default(),
            ViewSettings::default(),
        );
        let items = decode_all("food_items", rows).unwrap();
        (app, store, items)
    }

    #[tokio::test]
    async fn test_session_builds_cart_and_checks_out() {
        let (app, store, items) = fixture().await;
        let mut shell = Shell::new(&app, user_id(), items);
        let mut input = "add 1\nadd 1\nadd 2\ncart\ncheckout | | leave at door\nquit\n".as_bytes();
        let mut out = Vec::new();

        shell.run(&mut input, &mut out).await.unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Total (3 items): $12.25"));
        assert!(output.contains("total $12.25"));
        assert!(shell.cart().is_empty());

        let orders = store.rows("order_history2").await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0]["note"], "leave at door");
        assert_eq!(orders[0]["address"], "1 Market St");
    }

    #[tokio::test]
    async fn test_out_of_order_item_is_not_added() {
        let (app, _, items) = fixture().await;
        let mut shell = Shell::new(&app, user_id(), items);

        let result = shell.execute(ShellCommand::Add(FoodItemId(3))).await;

        assert!(matches!(result, Err(AppError::Cart(CartError::OutOfOrder { .. }))));
        assert!(shell.cart().is_empty());
    }

    #[tokio::test]
    async fn test_failed_checkout_keeps_cart() {
        let (app, store, items) = fixture().await;
        let mut shell = Shell::new(&app, user_id(), items);
        shell.execute(ShellCommand::Add(FoodItemId(1))).await.unwrap();
        store.set_should_fail(true);

        let result = shell
            .execute(ShellCommand::Checkout(Default::default()))
            .await;

        assert!(result.is_err_and(|e| e.is_network_error()));
        assert_eq!(shell.cart().item_count(), 1);
    }

    #[tokio::test]
    async fn test_errors_do_not_end_session() {
        let (app, _, items) = fixture().await;
        let mut shell = Shell::new(&app, user_id(), items);
        let mut input = "add 99\ndance\nadd 2\n".as_bytes();
        let mut out = Vec::new();

        shell.run(&mut input, &mut out).await.unwrap();

        assert_eq!(shell.cart().item_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_item_is_validation_error() {
        let (app, _, items) = fixture().await;
        let mut shell = Shell::new(&app, user_id(), items);

        let result = shell.execute(ShellCommand::Info(FoodItemId(42))).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::Invalid { field: "item id", .. }))
        ));
    }

    #[tokio::test]
    async fn test_rating_patches_menu() {
        let (app, _, items) = fixture().await;
        let mut shell = Shell::new(&app, user_id(), items);

        shell.execute(ShellCommand::Rate(FoodItemId(2), 4)).await.unwrap();

        let item = shell.menu.find(FoodItemId(2)).unwrap();
        assert_eq!(item.rating_count, 1);
        assert_eq!(item.rating, Some(4.0));
    }

    #[tokio::test]
    async fn test_sort_toggles_direction() {
        let (app, _, items) = fixture().await;
        let mut shell = Shell::new(&app, user_id(), items);

        let first = shell.execute(ShellCommand::Sort).await.unwrap();
        let second = shell.execute(ShellCommand::Sort).await.unwrap();

        assert!(first.starts_with("Sorted by price, ascending."));
        assert!(second.starts_with("Sorted by price, descending."));
    }
}
