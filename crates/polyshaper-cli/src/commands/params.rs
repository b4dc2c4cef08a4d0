//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use polyshaper_effects::WAVESHAPER_PARAMS;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for a single parameter
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if let Some(name) = &args.param {
        let desc = WAVESHAPER_PARAMS
            .iter()
            .find(|d| d.name == name.as_str())
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {}", name))?;

        println!("{}", desc.name);
        println!("{}", "=".repeat(desc.name.len()));
        println!();
        println!("{}", desc.blurb);
        println!();
        println!("  Label:   {}", desc.nick);
        println!("  Type:    {}", desc.kind);
        println!("  Range:   {}", desc.range_text());
        println!("  Default: {}", desc.format_value(desc.default));
        println!();
        println!("Example usage:");
        println!();
        println!(
            "  polyshaper process input.wav output.wav --param {}={}",
            desc.name,
            desc.format_value(desc.default)
        );
        return Ok(());
    }

    println!("Waveshaper Parameters");
    println!("=====================");
    println!();
    println!(
        "  {:18}  {:6}  {:16}  {:8}  {}",
        "Name", "Type", "Range", "Default", "Description"
    );
    println!(
        "  {:18}  {:6}  {:16}  {:8}  {}",
        "----", "----", "-----", "-------", "-----------"
    );

    for desc in &WAVESHAPER_PARAMS {
        println!(
            "  {:18}  {:6}  {:16}  {:8}  {}",
            desc.name,
            desc.kind.name(),
            desc.range_text(),
            desc.format_value(desc.default),
            desc.blurb
        );
    }

    println!();
    println!("Use 'polyshaper params <name>' for details.");

    Ok(())
}
