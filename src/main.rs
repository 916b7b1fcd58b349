use clap::Parser;
use lightkeeper::cli::dashboard::Session;
use lightkeeper::cli::{
    handle_completions, handle_config_init, pages, ping, run, setup, trends, Cli, Commands,
    ConfigCommands, GlobalArgs, PagesCommands,
};
use lightkeeper::client::LightkeeperApi;
use lightkeeper::dashboard::Dashboard;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Config(ConfigCommands::Init(args)) => {
            handle_config_init(&args, cli.global.api_url.as_deref())
        }
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(String::new())
        }
        command => run_service_command(command, &cli.global).await,
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Commands that talk to the Lightkeeper service.
async fn run_service_command(
    command: Commands,
    global: &GlobalArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let config = setup::load_config_with_overrides(global)?;
    setup::init_tracing(&config.logging)?;
    setup::apply_color(&config);

    let client = setup::connect(&config)?;
    let base_url = client.base_url().to_string();
    let api: Arc<dyn LightkeeperApi> = Arc::new(client);

    match command {
        Commands::Pages(cmd) => match cmd {
            PagesCommands::List(args) => pages::handle_pages_list(&args, api).await,
            PagesCommands::Show(args) => pages::handle_pages_show(&args, api).await,
            PagesCommands::Add(args) => pages::handle_pages_add(&args, api).await,
            PagesCommands::Edit(args) => pages::handle_pages_edit(&args, api).await,
            PagesCommands::Toggle(args) => pages::handle_pages_toggle(&args, api).await,
            PagesCommands::Remove(args) => {
                let mut input = std::io::stdin().lock();
                pages::handle_pages_remove(&args, api, &mut input).await
            }
        },
        Commands::Run(args) => run::handle_run(&args, api).await,
        Commands::Trends(args) => trends::handle_trends(&args, api.as_ref(), &config.display).await,
        Commands::Ping => ping::handle_ping(api.as_ref(), &base_url).await,
        Commands::Dashboard => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            Session::new(Dashboard::new(api), input, &mut stdout, config.display.clone())
                .run()
                .await?;
            Ok(String::new())
        }
        Commands::Config(_) | Commands::Completions(_) => Ok(String::new()),
    }
}
