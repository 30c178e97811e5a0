//! Command dispatcher.

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::application::AppError;
use crate::application::dto::{
    ContactDetails, ItemChanges, NewItemRequest, ProfileChanges, SignInRequest, SignUpRequest,
};
use crate::application::use_cases::{
    AccountUseCase, CheckoutUseCase, CustomerAdminUseCase, InventoryUseCase, MenuUseCase,
    OrderHistoryUseCase, ResolveSessionUseCase, SalesUseCase, SignInUseCase, SignUpUseCase,
};
use crate::domain::cart::Cart;
use crate::domain::catalog::{HistoryView, MenuView};
use crate::domain::entities::{FoodItem, FoodItemId, ProfileId};
use crate::domain::errors::ValidationError;
use crate::domain::ports::{AuthPort, RowStorePort, SessionStoragePort};
use crate::domain::query::Tables;
use crate::infrastructure::config::args::{
    AccountCommand, AdminCommand, Command, ItemsCommand, OrderArgs, ProfileArgs, SignupArgs,
    UsersCommand,
};
use crate::presentation::shell::Shell;
use crate::presentation::views::{self, ViewSettings};

/// Wires the use cases together and runs one command.
pub struct App {
    sign_in: SignInUseCase,
    sign_up: SignUpUseCase,
    resolve_session: ResolveSessionUseCase,
    pub(super) menu: MenuUseCase,
    pub(super) checkout: CheckoutUseCase,
    history: OrderHistoryUseCase,
    account: AccountUseCase,
    inventory: InventoryUseCase,
    customers: CustomerAdminUseCase,
    sales: SalesUseCase,
    pub(super) settings: ViewSettings,
}

pub(super) fn unknown_item(id: FoodItemId) -> ValidationError {
    ValidationError::invalid("item id", format!("no menu item with id {id}"))
}

impl App {
    #[must_use]
    pub fn new(
        auth_port: Arc<dyn AuthPort>,
        store: Arc<dyn RowStorePort>,
        storage_port: Arc<dyn SessionStoragePort>,
        tables: Tables,
        settings: ViewSettings,
    ) -> Self {
        Self {
            sign_in: SignInUseCase::new(
                auth_port.clone(),
                store.clone(),
                storage_port.clone(),
                tables.clone(),
            ),
            sign_up: SignUpUseCase::new(
                auth_port.clone(),
                store.clone(),
                storage_port.clone(),
                tables.clone(),
            ),
            resolve_session: ResolveSessionUseCase::new(auth_port, storage_port),
            menu: MenuUseCase::new(store.clone(), tables.clone()),
            checkout: CheckoutUseCase::new(store.clone(), tables.clone()),
            history: OrderHistoryUseCase::new(store.clone(), tables.clone()),
            account: AccountUseCase::new(store.clone(), tables.clone()),
            inventory: InventoryUseCase::new(store.clone(), tables.clone()),
            customers: CustomerAdminUseCase::new(store.clone(), tables.clone()),
            sales: SalesUseCase::new(store, tables),
            settings,
        }
    }

    /// Runs `command`, reading prompts from `input` and writing results to `out`.
    ///
    /// # Errors
    /// Returns the first failure; nothing is retried.
    pub async fn run<R, W>(&self, command: Command, input: &mut R, out: &mut W) -> color_eyre::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        match command {
            Command::Login {
                email,
                password,
                no_persist,
            } => {
                let password = match password {
                    Some(password) => password,
                    None => read_secret(input).await?,
                };
                let mut request = SignInRequest::new(email, password);
                if no_persist {
                    request = request.without_persistence();
                }
                let response = self.sign_in.execute(request).await?;
                write!(out, "{}", views::signed_in(&response))?;
            }
            Command::Logout => {
                self.sign_in.sign_out().await?;
                writeln!(out, "Signed out.")?;
            }
            Command::Signup(args) => self.signup(args, input, out).await?,
            Command::Whoami => {
                let session = self.resolve_session.require().await?;
                let who = session
                    .user
                    .email
                    .clone()
                    .unwrap_or_else(|| session.user_id().to_string());
                writeln!(out, "Signed in as {who}.")?;
                match self.account.load(session.user_id()).await {
                    Ok(profile) => write!(out, "{}", views::profile(&profile))?,
                    Err(e) if e.is_not_found() => writeln!(out, "No profile yet.")?,
                    Err(e) => return Err(e.into()),
                }
            }
            Command::Menu { search, sort } => {
                let mut view = MenuView::new(self.menu.load_menu().await?);
                if let Some(query) = search {
                    view.set_query(query);
                }
                if let Some(direction) = sort {
                    view.sort_by_price_in(direction.into());
                }
                write!(out, "{}", views::menu(view.visible(), &self.settings))?;
            }
            Command::Rate { item, stars } => {
                self.current_user().await?;
                let item = self.menu.rate_item(item, stars).await?;
                writeln!(out, "Thanks for rating {}.", item.title)?;
                write!(out, "{}", views::item_details(&item, &self.settings))?;
            }
            Command::Order(args) => self.order(args, out).await?,
            Command::Shell => {
                let user = self.current_user().await?;
                let items = self.menu.load_menu().await?;
                Shell::new(self, user, items).run(input, out).await?;
            }
            Command::History { sort } => {
                let user = self.current_user().await?;
                let mut view = HistoryView::new(self.history.history(user).await?);
                if let Some(direction) = sort {
                    view.sort_by_date_in(direction.into());
                }
                write!(out, "{}", views::history(view.orders(), &self.settings))?;
            }
            Command::OrderDetails { id } => {
                let user = self.current_user().await?;
                let order = self.history.order(user, id).await?;
                let details = self.history.details(order).await;
                write!(out, "{}", views::order_details(&details, &self.settings))?;
            }
            Command::Account { command } => self.account_command(command, out).await?,
            Command::Admin { command } => self.admin_command(command, out).await?,
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<ProfileId, AppError> {
        Ok(self.resolve_session.require().await?.user_id())
    }

    async fn current_admin(&self) -> Result<ProfileId, AppError> {
        let user = self.current_user().await?;
        self.account.require_admin(user).await?;
        Ok(user)
    }

    async fn signup<R, W>(&self, args: SignupArgs, input: &mut R, out: &mut W) -> color_eyre::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let password = match args.password {
            Some(password) => password,
            None => read_secret(input).await?,
        };
        let mut request = SignUpRequest::new(args.email, password).with_contact(
            args.full_name,
            args.phone,
            args.address,
        );
        if let Some(username) = args.username {
            request = request.with_username(username);
        }
        let response = self.sign_up.execute(request).await?;
        write!(out, "{}", views::signed_up(&response))?;
        Ok(())
    }

    async fn order<W: Write>(&self, args: OrderArgs, out: &mut W) -> color_eyre::Result<()> {
        let user = self.current_user().await?;
        let menu = self.menu.load_menu().await?;

        let mut cart = Cart::new();
        for selection in &args.items {
            let item = find_item(&menu, selection.id)?;
            cart.add_many(item, selection.quantity).map_err(AppError::from)?;
        }

        let mut contact = ContactDetails::new(
            args.phone.unwrap_or_default(),
            args.address.unwrap_or_default(),
        )
        .with_note(args.note.unwrap_or_default());
        if contact.validate().is_err() {
            contact = contact.or(&self.checkout.contact_defaults(user).await?);
        }

        let receipt = self.checkout.place_order(user, &cart, contact).await?;
        write!(out, "{}", views::receipt(&receipt, &self.settings))?;
        Ok(())
    }

    async fn account_command<W: Write>(&self, command: AccountCommand, out: &mut W) -> color_eyre::Result<()> {
        let user = self.current_user().await?;
        match command {
            AccountCommand::Show => {
                let profile = self.account.load(user).await?;
                write!(out, "{}", views::profile(&profile))?;
            }
            AccountCommand::Update(args) => {
                let profile = self.account.update(user, profile_changes(args)).await?;
                writeln!(out, "Profile updated.")?;
                write!(out, "{}", views::profile(&profile))?;
            }
        }
        Ok(())
    }

    async fn admin_command<W: Write>(&self, command: AdminCommand, out: &mut W) -> color_eyre::Result<()> {
        let admin = self.current_admin().await?;
        info!(admin_id = %admin, "Running admin command");

        match command {
            AdminCommand::Items { command } => self.items_command(command, out).await?,
            AdminCommand::Users { command } => self.users_command(command, out).await?,
            AdminCommand::Sales { date } => {
                let date = date.unwrap_or_else(|| Utc::now().date_naive());
                let report = self.sales.report(date).await?;
                write!(out, "{}", views::sales_report(&report, &self.settings))?;
            }
            AdminCommand::Sale { id } => {
                let details = self.sales.order_details(id).await?;
                write!(out, "{}", views::order_details(&details, &self.settings))?;
            }
        }
        Ok(())
    }

    async fn items_command<W: Write>(&self, command: ItemsCommand, out: &mut W) -> color_eyre::Result<()> {
        match command {
            ItemsCommand::List => {
                let items = self.inventory.list().await?;
                write!(out, "{}", views::menu(&items, &self.settings))?;
            }
            ItemsCommand::Add {
                title,
                price,
                description,
                image_url,
            } => {
                let mut request = NewItemRequest::new(title, price);
                if let Some(description) = description {
                    request = request.with_description(description);
                }
                if let Some(image_url) = image_url {
                    request = request.with_image_url(image_url);
                }
                let item = self.inventory.add_item(request).await?;
                writeln!(out, "Added item {}.", item.id)?;
                write!(out, "{}", views::item_details(&item, &self.settings))?;
            }
            ItemsCommand::Update {
                id,
                title,
                price,
                description,
                image_url,
            } => {
                let changes = ItemChanges {
                    title,
                    price,
                    description,
                    image_url,
                };
                let item = self.inventory.update_item(id, changes).await?;
                writeln!(out, "Updated item {}.", item.id)?;
                write!(out, "{}", views::item_details(&item, &self.settings))?;
            }
            ItemsCommand::OutOfOrder { id } => {
                let item = self.inventory.mark_out_of_order(id).await?;
                writeln!(out, "{} is now out of order.", item.title)?;
            }
            ItemsCommand::Available { id } => {
                let item = self.inventory.mark_available(id).await?;
                writeln!(out, "{} is available again.", item.title)?;
            }
        }
        Ok(())
    }

    async fn users_command<W: Write>(&self, command: UsersCommand, out: &mut W) -> color_eyre::Result<()> {
        match command {
            UsersCommand::List => {
                let profiles = self.customers.list_customers().await?;
                write!(out, "{}", views::customers(&profiles))?;
            }
            UsersCommand::Edit { id, profile } => {
                let profile = self.customers.edit(id, profile_changes(profile)).await?;
                writeln!(out, "Updated {}.", profile.display_name())?;
            }
            UsersCommand::Ban { id } => {
                let profile = self.customers.ban(id).await?;
                writeln!(out, "Banned {}.", profile.display_name())?;
            }
            UsersCommand::Unban { id } => {
                let profile = self.customers.unban(id).await?;
                writeln!(out, "Unbanned {}.", profile.display_name())?;
            }
        }
        Ok(())
    }
}

pub(super) fn find_item(menu: &[FoodItem], id: FoodItemId) -> Result<&FoodItem, ValidationError> {
    menu.iter().find(|item| item.id == id).ok_or_else(|| unknown_item(id))
}

fn profile_changes(args: ProfileArgs) -> ProfileChanges {
    let changes = ProfileChanges::new(args.full_name, args.phone, args.address);
    match args.username {
        Some(username) => changes.with_username(username),
        None => changes,
    }
}

/// First line of `input` without its line ending.
async fn read_secret<R: AsyncBufRead + Unpin>(input: &mut R) -> std::io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line).await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
