mod analytics;
mod config;
mod graphql;
mod http;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, anyhow};
use card::{LanguageState, SlugResolver, render, vcard};
use clap::{Args, Parser, Subcommand};
use entity::Directory;
use platform_obs::{ObsConfig, init_tracing};
use tracing::info;

use crate::{
    config::AppConfig,
    graphql::GraphqlData,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "solware-id", version, about = "Digital business card server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP + GraphQL server.
    Serve(ServeCommand),
    /// Print the rendered card page for a slug.
    Render(ProfileArgs),
    /// Print the vCard for a slug.
    Vcard(ProfileArgs),
    /// List the slugs in the directory.
    List,
    /// Print the GraphQL schema snapshot.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[derive(Args, Debug)]
struct ProfileArgs {
    #[arg(long)]
    slug: String,
    #[arg(long, value_name = "CODE", help = "es or en; anything else renders in es")]
    lang: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::from_env())?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    let directory = app_config.directory()?;
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config, directory).await,
        Command::Render(args) => render_profile(&args, &app_config, &directory),
        Command::Vcard(args) => print_vcard(&args, &directory),
        Command::List => {
            for slug in directory.slugs() {
                println!("{slug}");
            }
            Ok(())
        }
        Command::SchemaPrint { output } => schema_print(output, &app_config, directory),
    }
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>, directory: Directory) -> Result<()> {
    let analytics = analytics::build_sink(config.analytics_endpoint.as_deref());
    let state = AppState::new(config, directory, analytics);
    http::serve(cmd.into(), state).await
}

fn render_profile(args: &ProfileArgs, config: &AppConfig, directory: &Directory) -> Result<()> {
    let language = LanguageState::from_query(args.lang.as_deref()).current();
    let employee = SlugResolver::new(directory).resolve(Some(&args.slug));
    let view = render(employee, language, &config.theme(), &config.build_options());
    if !view.is_found() {
        info!(slug = %args.slug, "slug not in directory; printing not-found view");
    }
    println!("{}", view.to_html());
    Ok(())
}

fn print_vcard(args: &ProfileArgs, directory: &Directory) -> Result<()> {
    let employee = SlugResolver::new(directory)
        .resolve(Some(&args.slug))
        .ok_or_else(|| anyhow!("no employee with slug `{}`", args.slug))?;
    let language = LanguageState::from_query(args.lang.as_deref()).current();
    print!("{}", vcard::generate(employee, language));
    Ok(())
}

fn schema_print(path: Option<PathBuf>, config: &AppConfig, directory: Directory) -> Result<()> {
    let schema = graphql::build_schema(GraphqlData {
        directory: Arc::new(directory),
        theme: Arc::new(config.theme()),
        build_options: config.build_options(),
    });
    let target = path.unwrap_or_else(|| PathBuf::from("schema.graphql"));
    std::fs::write(&target, schema.sdl())
        .with_context(|| format!("failed to write {}", target.display()))?;
    info!(path = %target.display(), "schema snapshot written");
    Ok(())
}
