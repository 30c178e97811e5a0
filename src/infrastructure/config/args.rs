use super::app_config::LogLevel;
use crate::domain::cart::MAX_LINE_QUANTITY;
use crate::domain::catalog::SortDirection;
use crate::domain::entities::{FoodItemId, OrderId, ProfileId};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Parser)]
#[command(
    name = "foodorder",
    version,
    about = "Order food, track orders and run the shop from the terminal",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Backend project URL.
    #[arg(long, env = "FOOD_BACKEND_URL", value_name = "URL", global = true)]
    pub backend_url: Option<String>,

    /// Backend anonymous key.
    #[arg(long, env = "FOOD_ANON_KEY", value_name = "KEY", hide_env_values = true, global = true)]
    pub anon_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with e-mail and password.
    Login {
        #[arg(long)]
        email: String,
        /// Read from `FOOD_PASSWORD`, or the first stdin line when absent.
        #[arg(long, env = "FOOD_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Do not keep the session after this command.
        #[arg(long)]
        no_persist: bool,
    },
    /// Sign out and forget the stored session.
    Logout,
    /// Create an account and its profile.
    Signup(SignupArgs),
    /// Show the signed-in account.
    Whoami,
    /// List the menu.
    Menu {
        /// Case-insensitive title filter.
        #[arg(long)]
        search: Option<String>,
        /// Sort by price.
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// Rate a menu item from 1 to 5 stars.
    Rate { item: FoodItemId, stars: u8 },
    /// Place an order in one go.
    Order(OrderArgs),
    /// Interactive ordering session with a cart.
    Shell,
    /// List past orders.
    History {
        /// Sort by date.
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// Show one past order with its items.
    OrderDetails { id: OrderId },
    /// View or edit the signed-in profile.
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },
    /// Shop administration.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "FOOD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub username: Option<String>,
}

#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Item to add, as `ID` or `IDxQTY`. Repeatable.
    #[arg(long = "item", value_name = "ID[xQTY]", required = true)]
    pub items: Vec<ItemSelection>,
    /// Defaults to the phone number on the profile.
    #[arg(long)]
    pub phone: Option<String>,
    /// Defaults to the address on the profile.
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    Show,
    Update(ProfileArgs),
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub username: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Manage menu items.
    Items {
        #[command(subcommand)]
        command: ItemsCommand,
    },
    /// Manage customer accounts.
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Daily, weekly and monthly sales.
    Sales {
        /// Report date, defaults to today (UTC).
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
    /// Show one order with the customer's name.
    Sale { id: OrderId },
}

#[derive(Debug, Subcommand)]
pub enum ItemsCommand {
    List,
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    Update {
        id: FoodItemId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Take an item off the menu.
    OutOfOrder { id: FoodItemId },
    /// Put an item back on the menu.
    Available { id: FoodItemId },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List,
    Edit {
        id: ProfileId,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    Ban { id: ProfileId },
    Unban { id: ProfileId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortDirection {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => Self::Ascending,
            SortArg::Desc => Self::Descending,
        }
    }
}

/// `ID` or `IDxQTY` as given to `order --item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSelection {
    pub id: FoodItemId,
    pub quantity: u32,
}

impl FromStr for ItemSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match s.split_once(['x', 'X']) {
            Some((id, qty)) => {
                let quantity: u32 = qty
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid quantity in '{s}'"))?;
                (id, quantity)
            }
            None => (s, 1),
        };
        if quantity == 0 {
            return Err(format!("quantity must be at least 1 in '{s}'"));
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(format!("quantity must be at most {MAX_LINE_QUANTITY} in '{s}'"));
        }
        let id = id.parse().map_err(|_| format!("invalid item id in '{s}'"))?;
        Ok(Self { id, quantity })
    }
}
