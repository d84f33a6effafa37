//! Page Components

mod checkout;
mod home;
mod order;

pub use checkout::{CheckoutCancelPage, CheckoutSuccessPage};
pub use home::HomePage;
pub use order::OrderPage;
