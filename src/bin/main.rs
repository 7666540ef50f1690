use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use verify_frontend::{Config, PageOutcome};

#[derive(Parser)]
#[command(name = "verify-frontend")]
#[command(about = "Headless signup and dashboard smoke test")]
#[command(version)]
struct Cli {
    /// YAML config file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Application root URL (overrides config)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Screenshot directory (overrides config)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the resolved config without running
    #[arg(long)]
    check: bool,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> verify_frontend::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let mut config = match cli.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    if let Some(dir) = cli.out_dir {
        config.screenshot_dir = dir;
    }
    if cli.headed {
        config.browser.headless = false;
    }
    config.validate()?;

    if cli.check {
        println!("Config valid");
        println!("  Base URL: {}", config.base_url);
        println!("  Dashboard: {}", config.dashboard_pattern);
        println!("  Screenshots: {}", config.screenshot_dir.display());
        println!(
            "  Browser: {} {}x{}",
            if config.browser.headless { "headless" } else { "headed" },
            config.browser.viewport.width,
            config.browser.viewport.height
        );
        println!("  Pages: {}", config.pages.len());
        for page in &config.pages {
            println!("    - {} ({}): {}", page.name, page.path, page.markers.join(", "));
        }
        return Ok(());
    }

    let runner = verify_frontend::Runner::new(config).await?;
    let report = runner.verify().await?;

    println!();
    println!("Account: {}", report.email);
    if report.used_login_fallback {
        println!("  Logged in via fallback");
    }
    for page in &report.pages {
        match page.outcome {
            PageOutcome::Ok => println!("✓ {}", page.name),
            PageOutcome::Failed { kind, .. } => println!("✗ {} ({})", page.name, kind),
        }
        for shot in &page.screenshots {
            println!("    {}", shot.display());
        }
    }
    println!("  Duration: {}ms", report.duration_ms);

    Ok(())
}
