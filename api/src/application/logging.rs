use tracing_subscriber::EnvFilter;

use crate::args::LogArgs;

pub fn init_logger(args: &LogArgs) {
    let filter = EnvFilter::try_new(&args.log_filter).unwrap_or_else(|e| {
        eprintln!("Invalid log filter {:?}: {}, using \"info\"", args.log_filter, e);
        EnvFilter::new("info")
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}
