use crate::reports;
use clap::Args;
use temperforge::api::TemperSession;
use temperforge::config::Config;
use temperforge::error::TfResult;
use temperforge::optimizer::Individual;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    /// Target CSV (`degree,ratio,tolerance,priority,max_error`).
    #[arg(short = 't', long)]
    pub targets: String,

    #[arg(short = 'b', long, default_value = "2/1")]
    pub boundary: String,

    #[arg(short = 'N', long, default_value_t = 12)]
    pub scale_size: usize,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &SearchArgs, config: &Config) -> TfResult<()> {
    let store = super::load_store(&args.targets, &args.boundary, args.scale_size)?;
    let session = TemperSession::with_store(store, config.clone());

    let callback = |generation: usize, fitness: f64, _best: &Individual| {
        if generation % 50 == 0 {
            info!("Generation {}: best {:.6}", generation, fitness);
        }
        true
    };

    let result = session.solve(args.seed, callback)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.output)?);
        return Ok(());
    }

    let details = session.evaluator()?.score_details(&result.best.genes);
    reports::print_search_summary(&result);
    reports::print_target_report(&details);
    reports::print_scale_table(&result.output);
    Ok(())
}
