//! Numerology report CLI
//!
//! Renders a saved analysis response: prints the screen projection on
//! request and writes the PDF report.

use chrono::Local;
use clap::Parser;
use numerology_report::{PdfEngine, ReportConfig, ReportSession};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "numerology-report")]
#[command(about = "Render a numerology analysis response to screen ops and a PDF report")]
#[command(version)]
struct CliArgs {
    /// Analysis response JSON, as returned by the analysis service
    #[arg(long, short = 'i', value_name = "PATH")]
    input: PathBuf,

    /// Directory the PDF is written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Report config JSON (page geometry, thresholds, file naming)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the screen view ops as JSON
    #[arg(long)]
    screen: bool,
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn main() {
    env_logger::init();
    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => ReportConfig::from_json_file(path).unwrap_or_else(|e| fail(&e.to_string())),
        None => ReportConfig::default(),
    };

    let body = fs::read_to_string(&args.input).unwrap_or_else(|e| {
        fail(&format!("cannot read {}: {}", args.input.display(), e))
    });

    let mut session = ReportSession::new(config);
    let update = session.receive(&body);
    if let Some(err) = &update.error {
        fail(&err.to_string());
    }

    if args.screen {
        match update.frame.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&e.to_string()),
        }
    }

    let mut engine = PdfEngine::new().with_title(numerology_report::compose::REPORT_TITLE);
    let artifact = session
        .export(&mut engine, Local::now().date_naive())
        .unwrap_or_else(|e| fail(&format!("{} ({})", e.notice(), e)));

    let path = args.out_dir.join(&artifact.file_name);
    if let Err(e) = fs::create_dir_all(&args.out_dir).and_then(|_| fs::write(&path, &artifact.bytes)) {
        fail(&format!("cannot write {}: {}", path.display(), e));
    }
    println!(
        "Wrote {} ({} pages)",
        path.display(),
        artifact.pages
    );
}
