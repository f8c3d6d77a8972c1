use countrypaths::Config;
use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("countrypaths=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::default();
    let count = countrypaths::run(&config)
        .wrap_err_with(|| format!("extracting paths from {}", config.input.display()))?;

    println!(
        "Extraction complete! {count} countries written to {}",
        config.output.display()
    );
    Ok(())
}
