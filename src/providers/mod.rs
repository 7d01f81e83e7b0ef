pub mod alphavantage;
pub mod newsapi;
pub mod openweather;
pub mod util;

pub use alphavantage::AlphaVantageProvider;
pub use newsapi::NewsApiProvider;
pub use openweather::OpenWeatherProvider;
