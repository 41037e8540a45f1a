//! fOS Disclosure - command line entry point
//!
//! Loads a form, attaches disclosure, replays scripted user steps and prints
//! the resulting HTML or an association report.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use disclosure_cli::{report, Step};
use disclosure_engine::{Config, Engine, HiddenPresentation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Presentation {
    /// Toggle a CSS class on hidden targets
    Class,
    /// Toggle the `hidden` attribute
    Attribute,
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Apply data-toggle progressive disclosure to an HTML form",
    long_about = "Parses an HTML form, applies the initial disclosure state, replays --step \
                  interactions in order and prints the resulting HTML"
)]
struct Cli {
    /// HTML file to load
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Interaction to replay: check:SEL, uncheck:SEL, fill:SEL=VALUE, select:SEL=VALUE or click:SEL.
    #[arg(long = "step", value_name = "STEP")]
    steps: Vec<Step>,

    /// Print one line per association instead of HTML.
    #[arg(long)]
    report: bool,

    /// Class applied to hidden targets.
    #[arg(long, value_name = "CLASS", default_value = "js-hidden")]
    hidden_class: String,

    /// How hidden targets are marked up.
    #[arg(long, value_enum, default_value_t = Presentation::Class)]
    presentation: Presentation,

    /// Do not write aria-controls/aria-expanded onto triggers.
    #[arg(long)]
    no_aria: bool,

    /// Leave data-add-one groups alone.
    #[arg(long)]
    no_repeaters: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            hidden_class: self.hidden_class.clone(),
            presentation: match self.presentation {
                Presentation::Class => HiddenPresentation::Class,
                Presentation::Attribute => HiddenPresentation::Attribute,
            },
            report_aria: !self.no_aria,
            enable_repeaters: !self.no_repeaters,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let html = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let engine = Engine::new(cli.config());
    let mut page = engine
        .load_html(&html)
        .with_context(|| format!("failed to load {}", cli.file.display()))?;

    for step in &cli.steps {
        step.apply(&mut page)
            .with_context(|| format!("step {step} failed"))?;
    }

    if cli.report {
        print!("{}", report(&page));
    } else {
        println!("{}", disclosure_html::serialize(page.document()));
    }
    Ok(())
}
