//! glucodash library exports for testing

use clap::ValueEnum;

pub mod backend;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

use crate::core::nav::Route;

/// `--screen` CLI values, mapped onto core routes.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ScreenArg {
    #[default]
    Chat,
    Trends,
    MealSim,
    Settings,
}

impl ScreenArg {
    pub fn route(&self) -> Route {
        match self {
            ScreenArg::Chat => Route::Chat,
            ScreenArg::Trends => Route::Trends,
            ScreenArg::MealSim => Route::MealSim,
            ScreenArg::Settings => Route::Settings,
        }
    }
}
