mod cli;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use storefront::category::Category;
use storefront::config::Config;
use storefront::detail;
use storefront::page;
use storefront::ui::Command;
use storefront::Storefront;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("storefront=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(url) = &cli.base_url {
        cfg.base_url = url.clone();
        cfg.validate().context("--base-url")?;
    }
    let app = match &cli.dir {
        Some(dir) => Storefront::from_dir(cfg, dir),
        None => Storefront::over_http(cfg)?,
    };

    match cli.command {
        Commands::Load => {
            let store = app.load().await;
            println!("{}", store.report());
        }
        Commands::Show { category, id } => {
            let store = app.load().await;
            let entry = store.lookup(category, &id)?;
            let view = detail::present(category, entry);
            println!("{}", view.title);
            println!("{}", "=".repeat(view.title.chars().count()));
            for spec in &view.specs {
                println!("{:<12} {}", spec.label, spec.value);
            }
            println!();
            println!("{}", view.description);
            println!();
            for img in view.carousel.images() {
                println!("image: {}", img.src);
            }
        }
        Commands::Render { out, open } => {
            let (html, failure) = match app.open().await {
                Ok(mut session) => {
                    if let Some(target) = open {
                        let (category, id) = parse_open(&target)?;
                        let effect = session.dispatch(Command::ShowDetail { category, id });
                        tracing::info!(?effect, "opened modal");
                    }
                    (session.render(), None)
                }
                Err(e) => (page::render_error(&e), Some(e)),
            };
            match out {
                Some(path) => {
                    tokio::fs::write(&path, html).await.with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{html}"),
            }
            // The error page is still written so the failure is visible in place.
            if let Some(e) = failure {
                return Err(anyhow::Error::from(e).context("page initialization failed"));
            }
        }
    }
    Ok(())
}

fn parse_open(target: &str) -> Result<(Category, String)> {
    let (cat, id) = target.split_once('/').ok_or_else(|| anyhow!("expected <category>/<id>, got `{target}`"))?;
    Ok((cat.parse()?, id.to_string()))
}
