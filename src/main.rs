use clap::Parser;

use tinyapp::cli::{Cli, Commands, ConfigCommands, generate_config};
use tinyapp::config::{get_config, init_config};
use tinyapp::runtime::run_server;
use tinyapp::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    }) = &cli.command
    {
        let path = generate_config(output_path.as_deref(), *force)?;
        println!("Sample configuration written to {}", path);
        return Ok(());
    }

    init_config(&cli.config);
    let config = get_config();

    // guard 需要活到进程结束，否则缓冲中的日志会丢失
    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    tracing::info!("TinyApp v{} starting", env!("CARGO_PKG_VERSION"));

    run_server(config).await
}
