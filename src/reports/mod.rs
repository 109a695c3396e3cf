use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use temperforge::dissonance::MinimumLabel;
use temperforge::optimizer::SearchResult;
use temperforge::ratio::ratio_to_cents;
use temperforge::scale::SolverOutput;
use temperforge::scorer::ScoreDetails;

fn fmt_fitness(f: f64) -> String {
    if f.is_infinite() {
        "DISQ".to_string()
    } else {
        format!("{:.4}", f)
    }
}

fn right_align(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_scale_table(output: &SolverOutput) {
    println!(
        "\nScale: {} notes, period {:.4} cents",
        output.input.scale_size, output.input.cycle_cents
    );
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.add_row(vec![
        Cell::new("Deg").add_attribute(Attribute::Bold),
        Cell::new("Name"),
        Cell::new("Cents").fg(Color::Cyan),
        Cell::new("Step"),
    ]);
    right_align(&mut table, 2, 3);

    let mut prev = 0.0;
    for (i, note) in output.notes.iter().enumerate() {
        let step = note.cents_from_root - prev;
        prev = note.cents_from_root;
        table.add_row(vec![
            Cell::new(i).add_attribute(Attribute::Bold),
            Cell::new(note.name.as_deref().unwrap_or("-")).set_alignment(CellAlignment::Center),
            Cell::new(format!("{:.3}", note.cents_from_root)).fg(Color::Cyan),
            Cell::new(if i == 0 {
                "-".to_string()
            } else {
                format!("{:.3}", step)
            }),
        ]);
    }
    println!("{}", table);
}

pub fn print_target_report(details: &ScoreDetails) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Id").add_attribute(Attribute::Bold),
        Cell::new("Ratio"),
        Cell::new("Deg"),
        Cell::new("Step"),
        Cell::new("Ideal"),
        Cell::new("Actual"),
        Cell::new("Error").fg(Color::Red),
        Cell::new("Cost"),
        Cell::new("Tol"),
    ]);
    right_align(&mut table, 2, 7);

    for t in &details.targets {
        let status = if t.disqualified {
            Cell::new("CAP").fg(Color::Red)
        } else if t.within_tolerance {
            Cell::new("ok").fg(Color::Green)
        } else {
            Cell::new("off").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(t.id).add_attribute(Attribute::Bold),
            Cell::new(&t.ratio),
            Cell::new(t.degree),
            Cell::new(t.step),
            Cell::new(format!("{:.3}", t.ideal_cents)),
            Cell::new(format!("{:.3}", t.actual_cents)),
            Cell::new(format!("{:+.3}", t.error_cents)).fg(Color::Red),
            Cell::new(format!("{:.4}", t.contribution)),
            status.set_alignment(CellAlignment::Center),
        ]);
    }
    println!("\n{}", table);
    println!(
        "Fitness: {}  |  within tolerance: {}/{}  |  max |error|: {:.3} cents",
        fmt_fitness(details.fitness),
        details.within_tolerance_count(),
        details.targets.len(),
        details.max_abs_error()
    );
}

pub fn print_search_summary(result: &SearchResult) {
    let first = result.history.first().copied().unwrap_or(f64::INFINITY);
    println!(
        "\nBest: period {:.4}, generator {:.4}, fitness {} ({} generations, initial {})",
        result.best.period(),
        result.best.generator(),
        fmt_fitness(result.best.fitness),
        result.generations,
        fmt_fitness(first)
    );
}

/// Audit table of named genomes, already sorted by the caller.
pub fn print_audit_report(results: &[(String, [f64; 2], ScoreDetails)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Tuning").add_attribute(Attribute::Bold),
        Cell::new("Period"),
        Cell::new("Generator"),
        Cell::new("Fitness").fg(Color::Cyan),
        Cell::new("In Tol").fg(Color::Green),
        Cell::new("Max Err").fg(Color::Red),
    ]);
    right_align(&mut table, 1, 5);

    for (name, genes, d) in results {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.3}", genes[0])),
            Cell::new(format!("{:.3}", genes[1])),
            Cell::new(fmt_fitness(d.fitness)).fg(Color::Cyan),
            Cell::new(format!("{}/{}", d.within_tolerance_count(), d.targets.len()))
                .fg(Color::Green),
            Cell::new(format!("{:.3}", d.max_abs_error())).fg(Color::Red),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_minima_table(labels: &[MinimumLabel]) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.add_row(vec![
        Cell::new("Ratio").add_attribute(Attribute::Bold),
        Cell::new("Cents"),
        Cell::new("Just"),
        Cell::new("Diff").fg(Color::Red),
    ]);
    right_align(&mut table, 0, 3);

    for m in labels {
        table.add_row(vec![
            Cell::new(format!("{:.4}", m.ratio)).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", ratio_to_cents(m.ratio))),
            Cell::new(m.fraction.to_string()).fg(Color::Green),
            Cell::new(format!("{:+.2}", m.cents_error)).fg(Color::Red),
        ]);
    }
    println!("\n{}", table);
}
