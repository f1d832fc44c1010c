//! Concrete payment method forms.

pub mod blik;
pub mod mbway;
