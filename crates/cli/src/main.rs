use std::{fs, process};

use clap::Parser;
use schedcheck_cli::{render, App, ClassifyArgs, Command, GenerateArgs, RenderArgs, RenderFormat};
use schedcheck_core::schedule::display::format_schedule;
use schedcheck_core::schedule::types::Schedule;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = App::parse();
    match &app.command {
        Command::Generate(args) => generate(args),
        Command::Classify(args) => classify(args),
        Command::Render(args) => render_schedule(args),
    }
}

fn generate(args: &GenerateArgs) {
    fs::create_dir_all(&args.output_dir).unwrap_or_else(|e| {
        eprintln!("Failed to create output directory: {e}");
        process::exit(1);
    });

    let params = schedcheck_testgen::GenParams::builder()
        .n_transaction(args.n_txn)
        .n_object(args.n_obj)
        .max_actions(args.n_act)
        .abort_ratio(args.abort_ratio)
        .build();
    let records = schedcheck_testgen::generate_mult_schedules(args.n_sched, &params);

    for record in &records {
        let path = args.output_dir.join(format!("{}.sched", record.get_id()));
        fs::write(&path, format_schedule(record.get_data())).unwrap_or_else(|e| {
            eprintln!("Failed to write {}: {e}", path.display());
            process::exit(1);
        });
    }

    println!(
        "Generated {} schedules to {}",
        records.len(),
        args.output_dir.display()
    );
}

fn read_schedule(path: &std::path::Path) -> Schedule<String> {
    let filename = path.display();
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {filename}: {e}");
        process::exit(1);
    });
    schedcheck_parser::parse_schedule(&text).unwrap_or_else(|e| {
        eprintln!("Failed to parse {filename}: {e}");
        process::exit(1);
    })
}

fn classify(args: &ClassifyArgs) {
    let mut any_failed = false;

    for path in &args.paths {
        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        let schedule = read_schedule(path);

        if let Some(property) = args.property {
            let property = schedcheck_core::Property::from(property);
            let verdict = schedcheck_core::check(&schedule, property);
            any_failed |= !verdict;
            if args.json {
                let result = serde_json::json!({
                    "file": filename,
                    "property": property,
                    "ok": verdict,
                });
                println!("{}", serde_json::to_string(&result).unwrap());
            } else {
                println!(
                    "{filename}: {}",
                    if verdict { "PASS" } else { "FAIL" }
                );
            }
        } else {
            let characterization = schedcheck_core::characterize(&schedule);
            if args.json {
                let result = serde_json::json!({
                    "file": filename,
                    "characterization": characterization,
                });
                println!("{}", serde_json::to_string(&result).unwrap());
            } else {
                println!("{filename}: {characterization}");
            }
        }
    }

    if any_failed {
        process::exit(1);
    }
}

fn render_schedule(args: &RenderArgs) {
    let schedule = read_schedule(&args.path);
    match args.format {
        RenderFormat::Table => print!("{}", render::render_table(&schedule)),
        RenderFormat::Dot => {
            let graph = schedcheck_core::classify::conflict_graph(&schedule);
            print!("{}", render::render_dot(&graph));
        }
    }
}
