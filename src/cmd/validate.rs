use crate::reports;
use clap::Args;
use strum::IntoEnumIterator;
use temperforge::api::TemperSession;
use temperforge::config::Config;
use temperforge::error::TfResult;
use temperforge::temperaments::KnownTemperament;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short = 't', long)]
    pub targets: String,

    #[arg(short = 'b', long, default_value = "2/1")]
    pub boundary: String,

    #[arg(short = 'N', long, default_value_t = 12)]
    pub scale_size: usize,

    /// Score this period instead of auditing the known tunings.
    #[arg(short, long, requires = "generator")]
    pub period: Option<f64>,

    #[arg(short, long, requires = "period")]
    pub generator: Option<f64>,

    /// Only audit known tunings whose name contains this text.
    #[arg(long)]
    pub filter: Option<String>,
}

pub fn run(args: &ValidateArgs, config: &Config) -> TfResult<()> {
    let store = super::load_store(&args.targets, &args.boundary, args.scale_size)?;
    let session = TemperSession::with_store(store, config.clone());

    if let (Some(period), Some(generator)) = (args.period, args.generator) {
        let report = session.evaluate([period, generator])?;
        reports::print_target_report(&report.details);
        reports::print_scale_table(&report.output);
        return Ok(());
    }

    let evaluator = session.evaluator()?;
    let boundary = session.boundary();
    let mut results = Vec::new();
    for temperament in KnownTemperament::iter() {
        if temperament.boundary() != (boundary.numerator(), boundary.denominator()) {
            continue;
        }
        let name = temperament.to_string();
        if let Some(ref filter) = args.filter {
            if !name.contains(&filter.to_lowercase()) {
                continue;
            }
        }
        let genes = temperament.genes();
        results.push((name, genes, evaluator.score_details(&genes)));
    }

    results.sort_by(|a, b| a.2.fitness.total_cmp(&b.2.fitness));

    println!(
        "\n=== TUNING AUDIT ({} targets, N={}, boundary {}) ===",
        session.targets().len(),
        args.scale_size,
        boundary
    );
    reports::print_audit_report(&results);
    if let Some((name, _, details)) = results.first() {
        println!("\nBest match: {}", name);
        reports::print_target_report(details);
    }
    Ok(())
}
