// src/cli.rs
use crate::grid::{DEFAULT_MIN_CARD_WIDTH, GridLayout};
use crate::widgets::preview_card::CARD_HEIGHT;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "podgrid", version, about = "Browse podcast preview cards in the terminal")]
pub struct Cli {
    /// JSON file with an array of podcast records (defaults to the bundled sample)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: LevelFilter,

    /// Narrowest a card may get before the grid drops a column
    #[arg(long, default_value_t = DEFAULT_MIN_CARD_WIDTH)]
    pub min_card_width: u16,

    #[arg(long, default_value_t = CARD_HEIGHT)]
    pub card_height: u16,
}

impl Cli {
    pub fn grid_layout(&self) -> GridLayout {
        GridLayout::new(self.min_card_width, self.card_height)
    }
}
