//! sheetapi - spreadsheet HTTP service

use anyhow::Result;
use clap::Parser;
use sheetapi_core::Store;
use sheetapi_server::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    config.init_logging()?;

    sheetapi_server::serve(&config, Store::new()).await
}
