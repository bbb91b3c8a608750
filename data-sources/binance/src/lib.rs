pub mod error;
pub mod protocol;
pub mod spot;

pub const API_HOST: &str = "https://api.binance.com";
