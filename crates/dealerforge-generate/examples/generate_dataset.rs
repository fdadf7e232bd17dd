use std::env;
use std::path::PathBuf;

use dealerforge_core::Catalog;
use dealerforge_generate::{GenerateOptions, GenerationEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut options = GenerateOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                options.out_dir = args.next().map(PathBuf::from).ok_or("missing --out path")?
            }
            "--seed" => options.seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            _ => options.records = arg.parse()?,
        }
    }

    let engine = GenerationEngine::new(Catalog::ford_trucks(), options)?;
    let result = engine.run();

    for outcome in &result.report.sinks {
        println!("{:?}={}", outcome.sink, outcome.path.display());
    }
    println!("records={} seed={}", result.records.len(), result.report.seed);
    Ok(())
}
