use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use distcalc::{run_distcalc, DistCalcConfig, Language, Messages};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Lang {
    En,
    Ru,
}

impl From<Lang> for Language {
    fn from(l: Lang) -> Self {
        match l {
            Lang::En => Language::English,
            Lang::Ru => Language::Russian,
        }
    }
}

/// Desktop client for the distribution calculator service.
#[derive(Debug, Parser)]
#[command(name = "distcalc", version, about)]
struct Args {
    /// Backend base URL, e.g. http://127.0.0.1:5000
    #[arg(long)]
    server: Option<String>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Saved parameters file (JSON) to prefill the parameters form
    #[arg(long)]
    parameters: Option<PathBuf>,

    /// Interface language
    #[arg(long, value_enum)]
    lang: Option<Lang>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => DistCalcConfig::from_yaml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DistCalcConfig::default(),
    };
    if let Some(server) = args.server {
        cfg.server.base_url = server;
    }
    if let Some(path) = &args.parameters {
        cfg.load_initial_parameters(path)
            .with_context(|| format!("loading {}", path.display()))?;
    }
    if let Some(lang) = args.lang {
        cfg.messages = Messages::for_language(lang.into());
    }

    // Window errors are not always Send, so only their message is kept.
    run_distcalc(cfg).map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}
