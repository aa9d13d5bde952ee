use log::LevelFilter;
use env_logger::Builder;
use std::io::Write;
use chrono::Local;

/// Shared logger setup for both binaries. Info by default, `RUST_LOG`
/// overrides.
pub fn init() {
    Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}
