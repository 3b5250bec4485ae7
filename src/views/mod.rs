pub mod forecast_view;

pub use forecast_view::{icon_url, DailyDisplay, ForecastView, HourlyDisplay};
