mod app;
mod clock;
mod config;
mod controller;
mod events;
mod input;
mod menu;
mod model;
mod render;
mod sim;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
