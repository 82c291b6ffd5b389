use clap::Parser;
use iss_flyover::utils::logger;
use iss_flyover::{failure_line, render_report, CliConfig, FlyoverError, FlyoverPipeline};

fn report_failure(e: &FlyoverError) -> ! {
    tracing::error!(
        "❌ Flyover lookup failed: {} (Category: {:?}, Stage: {:?})",
        e,
        e.category(),
        e.stage()
    );
    tracing::error!("❌ {}", e.user_friendly_message());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    println!("{}", failure_line(e));
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, cli.log_format.unwrap_or_default());
            report_failure(&e);
        }
    };

    logger::init_cli_logger(cli.verbose, settings.log_format);
    tracing::debug!("Resolved settings: {:?}", settings);

    let pipeline = match FlyoverPipeline::from_config(&settings) {
        Ok(pipeline) => pipeline,
        Err(e) => report_failure(&e),
    };

    let report = match pipeline.run_with_report().await {
        Ok(report) => report,
        Err(e) => report_failure(&e),
    };

    if cli.verbose {
        tracing::info!(
            "📍 {} is at ({}, {})",
            report.ip,
            report.coordinates.latitude,
            report.coordinates.longitude
        );
    }

    match render_report(&report, cli.json) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => report_failure(&e),
    }
}
