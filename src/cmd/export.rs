use clap::Args;
use std::str::FromStr;
use temperforge::error::{TemperError, TfResult};
use temperforge::scale::{build_scale, export_rank2_to_scala, TuningTable};
use temperforge::temperaments::KnownTemperament;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(short, long, required_unless_present = "temperament", requires = "generator")]
    pub period: Option<f64>,

    #[arg(short, long, required_unless_present = "temperament", requires = "period")]
    pub generator: Option<f64>,

    /// Export a known tuning (e.g. `quarter_comma_meantone`) instead.
    #[arg(long, conflicts_with_all = ["period", "generator"])]
    pub temperament: Option<String>,

    /// Defaults to 12, or to the known tuning's usual size.
    #[arg(short = 'N', long)]
    pub scale_size: Option<usize>,

    #[arg(short, long, default_value = "temperforge")]
    pub name: String,

    /// Print a 128-note MIDI tuning table rooted at this key instead.
    #[arg(long)]
    pub midi_root: Option<u8>,
}

fn resolve_genes(args: &ExportArgs) -> TfResult<([f64; 2], usize)> {
    if let Some(ref name) = args.temperament {
        let t = KnownTemperament::from_str(name)
            .map_err(|_| TemperError::Config(format!("unknown temperament '{}'", name)))?;
        return Ok((t.genes(), args.scale_size.unwrap_or(t.scale_size())));
    }
    match (args.period, args.generator) {
        (Some(p), Some(g)) => Ok(([p, g], args.scale_size.unwrap_or(12))),
        _ => Err(TemperError::Config(
            "either --temperament or both --period and --generator are required".into(),
        )),
    }
}

pub fn run(args: &ExportArgs) -> TfResult<()> {
    let (genes, scale_size) = resolve_genes(args)?;

    if let Some(root) = args.midi_root {
        let output = build_scale(genes[0], genes[1], scale_size)?;
        let table = TuningTable::from_solver_output(&output, root)?;
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    let export = export_rank2_to_scala(&genes, scale_size, &args.name)?;
    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}
