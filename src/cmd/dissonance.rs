use crate::reports;
use clap::Args;
use temperforge::api::TemperSession;
use temperforge::config::Config;
use temperforge::dissonance::{label_minima, Spectrum};
use temperforge::error::TfResult;

#[derive(Args, Debug, Clone)]
pub struct DissonanceArgs {
    #[command(flatten)]
    pub config: Config,

    /// Largest denominator used when naming minima.
    #[arg(long, default_value_t = 16)]
    pub max_denominator: u64,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &DissonanceArgs, config: &Config) -> TfResult<()> {
    let p = &config.dissonance;
    let timbre = Spectrum::harmonic(p.fundamental_hz, p.partial_count, p.partial_rolloff)?;

    let session = TemperSession::new(config.clone());
    let report = session.dissonance_curve(&timbre, &timbre)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let labels = label_minima(&report.minima, args.max_denominator)?;
    println!(
        "\nDissonance sweep {:.3}..{:.3} ({} points, {} partials at {:.2} Hz): {} minima",
        p.start_ratio,
        p.end_ratio,
        report.curve.len(),
        p.partial_count,
        p.fundamental_hz,
        labels.len()
    );
    reports::print_minima_table(&labels);
    Ok(())
}
