use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use explode_inspector::cli::Cli;
use explode_inspector::events::Event;
use explode_inspector::inspector::{Inspector, Step};
use explode_inspector::loaders::load_gltf_file;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let mut inspector = Inspector::new(&config);

    if let Some(path) = &cli.model {
        match load_gltf_file(path) {
            Ok(hierarchy) => {
                let parts = inspector.load(hierarchy);
                println!("Loaded {:?}: {} parts", path, parts);
            }
            Err(e) => inspector.load_failed(&e),
        }
    }

    if let Some(t) = cli.explode {
        inspector.set_explosion(t);
    }

    let input: Box<dyn BufRead> = match &cli.events {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open event script: {:?}", path))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    run(&mut inspector, input)
}

fn run(inspector: &mut Inspector, input: Box<dyn BufRead>) -> Result<()> {
    for (number, line) in input.lines().enumerate() {
        let line = line.context("Failed to read event input")?;
        let event = match Event::parse(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                warn!("line {}: {:#}", number + 1, e);
                continue;
            }
        };

        match inspector.handle(event) {
            Step::Picked(Some(record)) => println!("{}", record),
            Step::Picked(None) => println!("(nothing under pointer)"),
            Step::Continue => {}
            Step::Quit => break,
        }
    }

    Ok(())
}
