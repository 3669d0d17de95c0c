use clap::Parser;
use clap::Subcommand;
use cmd::command::gen;
use cmd::command::gen::Gen;
use cmd::command::plan;
use cmd::command::plan::Plan;
use cmd::config::Config;
use cmd::error::Error;
use cmd::error::Result;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Subcommand, Clone)]
enum Commands {
    /// Generate the rental store tables
    Gen(Gen),
    /// Print the weekly volume plan
    Plan(Plan),
}

#[derive(Parser)]
#[command(propagate_version = true)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    if args.command.is_none() {
        return Err(Error::BadRequest("no command specified".to_string()));
    }

    let cfg: Config = match &args.command {
        Some(cmd) => match cmd {
            Commands::Gen(gen) => {
                let config = config::Config::builder()
                    .add_source(config::File::from(gen.config.clone()))
                    .build()?;

                config.try_deserialize()?
            }
            Commands::Plan(plan) => {
                let config = config::Config::builder()
                    .add_source(config::File::from(plan.config.clone()))
                    .build()?;

                config.try_deserialize()?
            }
        },
        _ => unreachable!(),
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cfg.log.level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(Error::SetGlobalDefaultError)?;

    let version = env!("CARGO_PKG_VERSION");
    let hash = option_env!("BUILD_HASH").unwrap_or("dev-build");

    info!("Rentals v{version}-{hash}");

    match &args.command {
        Some(cmd) => match cmd {
            Commands::Gen(args) => {
                gen::start(args, cfg.try_into()?)?;
            }
            Commands::Plan(args) => {
                plan::start(args, cfg.try_into()?)?;
            }
        },
        _ => unreachable!(),
    };

    Ok(())
}
