use log::{info, LevelFilter};
use log4rs::{
    append::{
        console::ConsoleAppender,
        rolling_file::{
            policy::compound::{
                roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy,
            },
            RollingFileAppender,
        },
    },
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    init_config, Config,
};
use std::path::Path;

/// The pattern to use when logging
const LOGGING_PATTERN: &str = "[{d} {h({l})} {M}] {m}{n}";
/// Max logging file size before rolling over to the next log file. (5mb)
const LOGGING_MAX_SIZE: u64 = 1024 * 1024 * 5;
/// The max number of logging files to keep before deleting
const LOGGING_MAX_FILES: u32 = 8;
/// Module logging is enabled at the configured level for
const LOGGING_MODULE: &str = "quiz_ranking";

/// Initializes log4rs so that everything logged by this server at or above
/// `logging_level` goes to stdout and to `<logging_path>/log.log`. Other
/// crates are only logged at warn and above. [LevelFilter::Off] leaves the
/// logger uninitialized
pub fn setup(logging_level: LevelFilter, logging_path: &Path) {
    if logging_level == LevelFilter::Off {
        return;
    }

    let pattern = PatternEncoder::new(LOGGING_PATTERN);
    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(pattern.clone()))
        .build();
    let file_appender = rolling_file_appender(logging_path, pattern);

    const APPENDERS: [&str; 2] = ["stdout", "file"];

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .logger(
            Logger::builder()
                .appenders(APPENDERS)
                .additive(false)
                .build(LOGGING_MODULE, logging_level),
        )
        .build(
            Root::builder()
                .appenders(APPENDERS)
                .build(LevelFilter::Warn),
        )
        .expect("Failed to create logging config");

    init_config(config).expect("Unable to initialize logger");

    // Panics are logged so they end up in the log file
    log_panics::init();
}

/// Appender writing to `log.log` inside `logging_path`, rolled over into
/// `log-{n}.log` once it reaches [LOGGING_MAX_SIZE]
fn rolling_file_appender(logging_path: &Path, pattern: PatternEncoder) -> RollingFileAppender {
    let roll_pattern = logging_path.join("log-{}.log");
    let roller = FixedWindowRoller::builder()
        .build(&roll_pattern.to_string_lossy(), LOGGING_MAX_FILES)
        .expect("Unable to create fixed window log roller");

    let policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(LOGGING_MAX_SIZE)),
        Box::new(roller),
    );

    RollingFileAppender::builder()
        .encoder(Box::new(pattern))
        .build(logging_path.join("log.log"), Box::new(policy))
        .expect("Unable to create logging file appender")
}

/// Logs the list of urls the ranking board can be reached on
pub fn log_connection_urls(port: u16) {
    let mut output = String::new();
    if let Ok(local_address) = local_ip_address::local_ip() {
        output.push_str("LAN: http://");
        output.push_str(&local_address.to_string());
        output.push(':');
        output.push_str(&port.to_string());
        output.push_str(", ");
    }

    output.push_str("LOCAL: http://127.0.0.1:");
    output.push_str(&port.to_string());

    info!("Connection URLS ({output})");
}
