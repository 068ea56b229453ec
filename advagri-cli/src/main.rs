mod reports;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use advagri_rules::{
    CollectingSink, GameRulesConfig, MemoryRuleRegistry, RulesHost, SolarTerm, i18n,
};
use reports::{ProposalRecord, ProposalSource, RulesReport};

#[derive(Debug, Parser)]
#[command(name = "advagri-rules-cli", version = "0.1.0")]
#[command(about = "Apply and inspect the AdvAgri seasons game rules")]
struct Args {
    /// Proposed year lengths, applied in order (repeatable)
    #[arg(long = "length-of-year", value_name = "DAYS", allow_negative_numbers = true)]
    length_of_year: Vec<i32>,

    /// Set whether seasons may change
    #[arg(long, value_name = "BOOL")]
    allow_seasons_change: Option<bool>,

    /// JSON document with initial rule values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Language for rendered messages
    #[arg(long, default_value = i18n::DEFAULT_LANG)]
    #[arg(value_parser = i18n::SUPPORTED_LANGS)]
    lang: String,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// List the solar terms and exit
    #[arg(long)]
    list_terms: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if maybe_list_terms(&args)? {
        return Ok(());
    }

    let report = run_rules(&args)?;
    write_report(&args, &report)
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn maybe_list_terms(args: &Args) -> Result<bool> {
    if !args.list_terms {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Solar terms:")?;
    for term in SolarTerm::ALL {
        writeln!(
            output_target.writer(),
            "  {:2} {:24} {}",
            term.index() + 1,
            i18n::t(&args.lang, term.i18n_key()),
            i18n::t(&args.lang, term.season().i18n_key())
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn run_rules(args: &Args) -> Result<RulesReport> {
    let mut host = RulesHost::new(MemoryRuleRegistry::new(), CollectingSink::new())
        .context("failed to register game rules")?;
    let mut proposals = Vec::new();

    if let Some(path) = &args.config {
        let config = GameRulesConfig::from_path(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?;
        log::info!("applying rules from {}", path.display());
        let outcome = host
            .apply_config(&config)
            .context("failed to apply configured rules")?;
        let messages = host.sink_mut().drain();
        proposals.push(ProposalRecord::new(
            ProposalSource::Config,
            &outcome,
            &messages,
            &args.lang,
        ));
    }

    if let Some(allow) = args.allow_seasons_change {
        host.set_allow_seasons_change(allow)
            .context("failed to set allowSeasonsChange")?;
    }

    for &proposed in &args.length_of_year {
        let outcome = host
            .propose_length_of_year(proposed)
            .with_context(|| format!("failed to set lengthOfYear to {proposed}"))?;
        if args.verbose {
            log::debug!("lengthOfYear {proposed}: {:?}", outcome.events);
        }
        let messages = host.sink_mut().drain();
        proposals.push(ProposalRecord::new(
            ProposalSource::Command,
            &outcome,
            &messages,
            &args.lang,
        ));
    }

    Ok(RulesReport {
        base_unit: host.rules().base_unit().get(),
        allow_seasons_change: host.allow_seasons_change()?,
        length_of_year: host.length_of_year()?,
        proposals,
    })
}

fn announce_banner(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", "🌾 AdvAgri Game Rules".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())
}

fn write_report(args: &Args, report: &RulesReport) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, report)?,
        _ => {
            announce_banner(&mut output_target)?;
            reports::generate_console_report(&mut output_target, report, args.verbose)?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
