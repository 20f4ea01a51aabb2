use std::fs;

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use log::{error, info};
use tokio_util::sync::CancellationToken;

use fu_reviews_scrapping::collect::{collect_product, collect_reviews};
use fu_reviews_scrapping::config::{load_config, AppConfig};
use fu_reviews_scrapping::pagination::StopReason;
use fu_reviews_scrapping::session::chromedriver::ChromeDriverProcess;
use fu_reviews_scrapping::session::webdriver::WebDriverSession;
use fu_reviews_scrapping::session::{BrowserSession, SessionError};
use fu_reviews_scrapping::storage::{run_file_name, JsonFileSink, PRODUCT_SUFFIX, REVIEWS_SUFFIX};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load configuration settings
    let config = load_config().context("Failed to load configuration")?;

    for dir in [&config.output.product_dir, &config.output.reviews_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    // Ctrl-C stops the run at the next checkpoint instead of killing it
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupt received, stopping after the current step");
                cancel.cancel();
            }
        });
    }

    let chromedriver = ChromeDriverProcess::spawn(
        &config.driver.path,
        config.driver.port,
        config.driver.startup_grace(),
    )
    .await
    .context("Failed to start chromedriver")?;

    let session = match WebDriverSession::connect(&chromedriver.server_url(), &config.driver).await {
        Ok(session) => session,
        Err(e) => {
            if let Err(stop_error) = chromedriver.stop().await {
                error!("Failed to stop chromedriver: {}", stop_error);
            }
            return Err(e).context("Failed to open a browser session");
        }
    };

    let result = run(&session, &config, &cancel).await;

    if let Err(e) = session.close().await {
        error!("Failed to close the browser session: {}", e);
    }
    if let Err(e) = chromedriver.stop().await {
        error!("Failed to stop chromedriver: {}", e);
    }

    result
}

async fn run(session: &WebDriverSession, config: &AppConfig, cancel: &CancellationToken) -> Result<()> {
    let started = Local::now();

    let mut product_sink =
        JsonFileSink::in_dir(&config.output.product_dir, &run_file_name(&started, PRODUCT_SUFFIX));
    let product = match collect_product(
        session,
        &config.target.product_url,
        &config.scrape,
        &mut product_sink,
        cancel,
    )
    .await
    {
        Ok(product) => product,
        Err(e) if matches!(e.downcast_ref::<SessionError>(), Some(SessionError::Cancelled)) => {
            println!("{} product was not collected", "Interrupted:".yellow());
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!(
        "{} {} -> {}",
        "Product saved:".green(),
        product.get("product_name").unwrap_or("<unnamed>"),
        product_sink.path().display()
    );

    if !config.scrape.collect_reviews {
        return Ok(());
    }

    let mut reviews_sink =
        JsonFileSink::in_dir(&config.output.reviews_dir, &run_file_name(&started, REVIEWS_SUFFIX));
    let report = collect_reviews(session, &config.scrape, &mut reviews_sink, cancel).await;

    let summary = format!(
        "{} reviews from {} pages -> {}",
        report.records.len(),
        report.pages,
        reviews_sink.path().display()
    );
    match report.stop {
        StopReason::NoMorePages => println!("{} {}", "Reviews saved:".green(), summary),
        StopReason::UserCancelled => println!("{} {}", "Interrupted:".yellow(), summary),
        StopReason::UnexpectedStop(reason) => {
            println!("{} {} ({})", "Stopped unexpectedly:".red(), summary, reason)
        }
    }

    Ok(())
}
