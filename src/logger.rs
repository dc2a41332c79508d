use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Info by default; `RUST_LOG` overrides the level when set.
pub fn init() -> Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    Ok(())
}
