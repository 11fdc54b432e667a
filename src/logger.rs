use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Initializes the logging system.
///
/// Uses `log4rs.yaml` when one is present in the working directory, otherwise
/// builds a stderr console logger at the given level. Call once at startup.
pub fn init(level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    if std::path::Path::new("log4rs.yaml").exists() {
        log4rs::init_file("log4rs.yaml", Default::default())?;
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;

    log4rs::init_config(config)?;
    Ok(())
}
