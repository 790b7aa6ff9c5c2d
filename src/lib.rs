#![warn(clippy::all, rust_2018_idioms)]

mod colors;
mod error;
mod grouping;
mod option_index;
mod option_value;
mod plot_data;
mod resolver;
mod scan_data;
mod ui;

pub use error::ScanError;
pub use ui::ScanviewApp;
