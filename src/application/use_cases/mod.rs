//! Use case implementations.

mod account_use_case;
mod checkout_use_case;
mod customer_admin_use_case;
mod inventory_use_case;
mod menu_use_case;
mod order_history_use_case;
mod resolve_session_use_case;
mod sales_use_case;
mod sign_in_use_case;
mod sign_up_use_case;

pub use account_use_case::AccountUseCase;
pub use checkout_use_case::CheckoutUseCase;
pub use customer_admin_use_case::CustomerAdminUseCase;
pub use inventory_use_case::InventoryUseCase;
pub use menu_use_case::MenuUseCase;
pub use order_history_use_case::OrderHistoryUseCase;
pub use resolve_session_use_case::ResolveSessionUseCase;
pub use sales_use_case::SalesUseCase;
pub use sign_in_use_case::SignInUseCase;
pub use sign_up_use_case::SignUpUseCase;

#[cfg(test)]
pub(crate) use sign_in_use_case::test_support;
