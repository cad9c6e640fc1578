use clap::Parser;
use zurich_etl::core::sources::{schedule_sources, station_source};
use zurich_etl::utils::logger;
use zurich_etl::{run_all, CliConfig, EtlError, FailurePolicy, Settings};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_json);
    tracing::info!("Starting zurich-etl");

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => fail("Configuration validation failed", &e),
    };
    tracing::debug!("Resolved settings: {:?}", settings);

    if cli.dry_run {
        print_plan(&settings);
        return;
    }

    match run_all(&settings).await {
        Ok(reports) => {
            for report in &reports {
                println!(
                    "✅ {}: {} rows -> {}",
                    report.pipeline,
                    report.rows,
                    report.output_path.display()
                );
            }
        }
        Err(e) => fail("Run failed", &e),
    }
}

fn fail(context: &str, e: &EtlError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}

fn print_plan(settings: &Settings) {
    println!("📋 Dry run, nothing will be downloaded");
    println!();
    println!("📡 Collection calendars ({}):", settings.year);
    for (waste_type, url) in schedule_sources(&settings.base_url, &settings.year) {
        println!("  {:<10} {}", waste_type.as_str(), url);
    }
    println!(
        "📡 Recycling stations ({}): {}",
        settings.station_year,
        station_source(&settings.base_url, &settings.station_year)
    );
    println!();
    println!("💾 Output:");
    println!(
        "  {}",
        settings.output_dir.join(&settings.schedule_filename).display()
    );
    println!(
        "  {}",
        settings.output_dir.join(&settings.station_filename).display()
    );
    println!("  Timeout: {:?}", settings.timeout);
    if settings.failure_policy == FailurePolicy::Skip {
        println!("  Failing calendars are skipped");
    }
}
