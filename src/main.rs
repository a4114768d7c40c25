use anyhow::{Context, Result};
use clap::Parser;
use multiarch::{
    auth::{load_pull_secret, Credentials, DefaultKeychain},
    cli::{Cli, Commands},
    config::Config,
    ImagePlatform, OciRegistryClient, PlatformResolver, UnknownPlatformPolicy,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let filter = if let Ok(filter) = EnvFilter::try_from_default_env() {
        filter
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve {
            image,
            authfile,
            vocabulary,
            skip_unknown,
            json,
            require_host,
        } => {
            let config = Config::load()?;
            let vocabulary = vocabulary.unwrap_or(config.vocabulary);
            let policy = if skip_unknown {
                UnknownPlatformPolicy::Skip
            } else {
                config.unknown_platforms
            };

            let credentials = match authfile.or_else(|| config.auth_file.clone()) {
                Some(path) => Credentials::PullSecret(load_pull_secret(&path)?),
                None => DefaultKeychain::new().credentials(),
            };

            let client =
                OciRegistryClient::new(config.insecure_registries.clone(), config.timeout());
            let resolver = PlatformResolver::new(client)
                .with_vocabulary(vocabulary)
                .with_policy(policy);

            let cancel = CancellationToken::new();
            let interrupt = {
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        warn!("Interrupted, cancelling");
                        cancel.cancel();
                    }
                })
            };
            let result = resolver
                .resolve_platforms_with_cancel(&image, &credentials, &cancel)
                .await;
            interrupt.abort();

            let platforms =
                result.with_context(|| format!("Failed to resolve platforms for {}", image))?;

            if platforms.is_index() {
                info!("{} is a multi-platform index", image);
            } else {
                info!("{} is a single-platform image", image);
            }

            // Print only the platforms to stdout
            if json {
                println!("{}", serde_json::to_string_pretty(&platforms)?);
            } else {
                for platform in &platforms {
                    println!("{}", platform);
                }
            }

            if require_host {
                let host =
                    ImagePlatform::host(vocabulary).context("Failed to determine host platform")?;
                if !platforms.supports(&host) {
                    anyhow::bail!("{} does not support host platform {}", image, host);
                }
                info!("{} supports host platform {}", image, host);
            }
        }
        Commands::Arch { names, vocabulary } => {
            let vocabulary = match vocabulary {
                Some(vocabulary) => vocabulary,
                None => Config::load()?.vocabulary,
            };
            for name in names {
                let arch = vocabulary.resolve_architecture(&name)?;
                println!("{} {}", arch.build_slug(), arch.package_slug());
            }
        }
        Commands::Version => {
            println!("multiarch {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
