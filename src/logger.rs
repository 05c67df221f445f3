use env_logger::{Builder, Env};

pub struct Logger;

impl Logger {
    pub fn init(verbosity: u8) {
        let log_filter = match verbosity {
            0 => "linkdown=info",
            1 => "linkdown=debug,info",
            _ => "linkdown=trace,info",
        };

        // `RUST_LOG` takes precedence over the verbosity.
        Builder::from_env(Env::default().default_filter_or(log_filter))
            .format_target(false)
            .init();
    }
}
