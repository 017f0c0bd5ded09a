use aeoscope::cli::{parse_args, Cli, Commands, PageArgs};
use aeoscope::commands::{handle_analyze, init_config, AnalyzeConfig, Tool};
use aeoscope::config::{load_config, AuditConfig};
use aeoscope::observability::{init_tracing, install_panic_hook};
use anyhow::Result;

fn main() -> Result<()> {
    install_panic_hook();
    let cli = parse_args();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Init { force } => {
            let dir = std::env::current_dir()?;
            let path = init_config(&dir, *force)?;
            println!("Created {}", path.display());
            Ok(())
        }
        Commands::Technical { page } => run_tool(&cli, page, |_| Ok(Tool::Technical)),
        Commands::Content { page } => run_tool(&cli, page, |_| Ok(Tool::Content)),
        Commands::Visibility { page } => run_tool(&cli, page, |_| Ok(Tool::Visibility)),
        Commands::QueryMatch { page, queries } => run_tool(&cli, page, |config| {
            Ok(Tool::query_match(queries, config)?)
        }),
        Commands::Audit { page, queries } => {
            run_tool(&cli, page, |config| Ok(Tool::audit(queries, config)))
        }
    }
}

// The tool is selected before the page is read so bad queries fail fast.
fn run_tool<F>(cli: &Cli, page: &PageArgs, select: F) -> Result<()>
where
    F: FnOnce(&AuditConfig) -> Result<Tool>,
{
    let config = load_audit_config(cli)?;
    let tool = select(&config)?;
    handle_analyze(tool, analyze_config(cli, page), &config)
}

fn load_audit_config(cli: &Cli) -> Result<AuditConfig> {
    let mut config = load_config(cli.config.as_deref())?;
    if cli.no_parallel {
        config.aggregation.parallel = false;
    }
    Ok(config)
}

fn analyze_config(cli: &Cli, page: &PageArgs) -> AnalyzeConfig {
    AnalyzeConfig {
        input: page.input.clone(),
        url: page.url.clone(),
        format: cli.format.into(),
        output: cli.output.clone(),
    }
}
