use std::env;
use std::fs;

use anyhow::{anyhow, Context, Result};
use log::info;

use fill_extrusion_uniforms::{Draw, DrawUniforms};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let xml = fs::read_to_string(&options.path)
        .with_context(|| format!("failed to read draw description {}", options.path))?;
    let draw = Draw::from_xml(&xml).context("failed to parse draw description")?;
    info!("computing {:?} uniforms for {}", draw.variant(), options.path);

    let uniforms = draw.layout_uniforms();
    if options.json {
        let json = serde_json::to_string_pretty(&uniforms.report())
            .context("failed to serialize uniforms")?;
        println!("{json}");
    } else {
        print_uniforms(&uniforms);
    }
    Ok(())
}

fn print_uniforms(uniforms: &DrawUniforms) {
    let values = uniforms.values();
    println!(
        "Program {} ({} uniforms, {}-byte block)",
        uniforms.program_name(),
        values.len(),
        uniforms.ubo_bytes().len()
    );
    for (name, value) in values {
        println!(" - {name} = {value}");
    }
}

struct CliOptions {
    path: String,
    json: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let Some(path) = args.next() else {
            return Err(anyhow!("Usage: fill-extrusion-uniforms <draw.xml> [--json]"));
        };
        let mut json = false;
        for arg in args {
            match arg.as_str() {
                "--json" => json = true,
                other => {
                    return Err(anyhow!("Unknown argument: {other}. Expected --json"));
                }
            }
        }
        Ok(Self { path, json })
    }
}
