use anyhow::Result;
use checkmap::cli::{Cli, Commands};
use checkmap::commands;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            auto_evaluate,
        } => {
            let config = commands::analyze::AnalyzeConfig {
                path,
                format: commands::resolve_format(format.map(Into::into)),
                output,
                auto_evaluate,
            };
            commands::analyze::handle_analyze(config)
        }
        Commands::Evaluate {
            template,
            format,
            output,
        } => {
            let config = commands::evaluate::EvaluateConfig {
                template_path: template,
                format: commands::resolve_format(format.map(Into::into)),
                output,
            };
            commands::evaluate::handle_evaluate(config)
        }
        Commands::Init { force } => commands::init::init_config(force),
    }
}
