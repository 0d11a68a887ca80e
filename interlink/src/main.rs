use interlink::commands::command_argument_builder;
use interlink::handlers::{handle_classify, handle_generate, handle_init, handle_presets};
use interlink_core::print_banner;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    init_logging(chosen_command.get_count("verbose"));

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let result = match chosen_command.subcommand() {
        None => return,
        Some(("init", primary_command)) => handle_init(primary_command),
        Some(("generate", primary_command)) => handle_generate(primary_command).await,
        Some(("classify", primary_command)) => handle_classify(primary_command),
        Some(("presets", _)) => handle_presets(),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("✗ {:?}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so reports on stdout stay clean. `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
