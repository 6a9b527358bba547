use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};

use crate::batch::BatchSampler;
use crate::config::SamplerConfig;
use crate::data::Stratum;
use crate::ingestion::{DictionaryLoader, LoadedDictionary};
use crate::metrics::{source_counts, source_skew, stratum_shares};
use crate::preset::load_preset_file;
use crate::sampler::WordSampler;
use crate::transport::DefaultTransport;

#[derive(Debug, Parser)]
#[command(
    name = "word_stream_demo",
    disable_help_subcommand = true,
    about = "Merge wordlists and print a stratified word stream",
    long_about = "Fetch and merge frequency wordlists for a language, then draw words with the stratified anti-repeat sampler.",
    after_help = "Sources are local paths unless the crate is built with the `http` feature, which also enables http(s) URLs."
)]
struct WordStreamCli {
    #[arg(long, default_value = "ru", help = "Language code (ru or uk)")]
    language: String,
    #[arg(
        long = "source",
        value_name = "PATH_OR_URL",
        help = "Extra wordlist source, repeat as needed in merge order"
    )]
    sources: Vec<String>,
    #[arg(long = "no-defaults", help = "Skip the built-in sources for the language")]
    no_defaults: bool,
    #[arg(
        long,
        value_name = "PATH",
        conflicts_with_all = ["sources", "no_defaults"],
        help = "Sample from a preset word list instead of merging sources"
    )]
    preset: Option<PathBuf>,
    #[arg(long, value_name = "DIR", help = "Resolve relative file sources against DIR")]
    root: Option<PathBuf>,
    #[arg(long, help = "Sampler seed; random when omitted")]
    seed: Option<u64>,
    #[arg(long, help = "Anti-repeat window (clamped to 1..=2000)")]
    window: Option<usize>,
    #[arg(long, default_value_t = 20, help = "Number of words to draw")]
    count: usize,
    #[arg(long, default_value_t = 1, help = "Words per batch (clamped to 1..=3)")]
    batch: usize,
    #[arg(long, help = "Print merged entries as JSON lines instead of sampling")]
    json: bool,
}

/// Parse `args_iter`, merge the requested sources, and print sampled words.
pub fn run_word_stream_demo<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) = parse_cli::<WordStreamCli, _>(
        std::iter::once("word_stream_demo".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let entries = match &cli.preset {
        Some(path) => {
            println!("Loaded preset {}", path.display());
            load_preset_file(path)?
        }
        None => {
            let loaded = load_sources(&cli)?;
            print_load_summary(&loaded);
            loaded.entries
        }
    };

    if cli.json {
        for entry in &entries {
            println!("{}", serde_json::to_string(entry)?);
        }
        return Ok(());
    }

    let config = SamplerConfig {
        seed: cli.seed,
        window_size: cli.window,
    };
    let sampler = WordSampler::new(&entries, config)?;
    println!(
        "Sampling with seed {} and window {}",
        sampler.seed(),
        sampler.window_size()
    );

    let mut batches = BatchSampler::new(sampler);
    let mut drawn = Vec::with_capacity(cli.count);
    while drawn.len() < cli.count {
        let batch = batches.next_batch(cli.batch.min(cli.count - drawn.len()))?;
        println!("{}", batch.join(" "));
        drawn.extend(batch);
    }

    let shares = stratum_shares(&drawn, &entries);
    println!(
        "Strata: head {:.1}% | mid {:.1}% | tail {:.1}%",
        shares.share(Stratum::Head) * 100.0,
        shares.share(Stratum::Mid) * 100.0,
        shares.share(Stratum::Tail) * 100.0
    );
    if let Some(skew) = source_skew(&source_counts(&drawn, &entries)) {
        for share in &skew.per_source {
            println!(
                "  source {} -> {} draws ({:.1}%)",
                share.source,
                share.count,
                share.share * 100.0
            );
        }
    }
    Ok(())
}

fn load_sources(cli: &WordStreamCli) -> Result<LoadedDictionary, Box<dyn Error>> {
    let mut transport = DefaultTransport::new();
    if let Some(root) = &cli.root {
        transport = transport.with_file_root(root);
    }
    let mut loader = DictionaryLoader::new(transport).with_extra_sources(cli.sources.iter().cloned());
    if cli.no_defaults {
        loader = loader.without_default_sources();
    }
    Ok(loader.load(&cli.language)?)
}

fn print_load_summary(loaded: &LoadedDictionary) {
    println!(
        "Merged {} words for '{}' from {} source(s) ({} lines read, {} rejected)",
        loaded.entries.len(),
        loaded.language,
        loaded.sources.len() - loaded.skipped.len(),
        loaded.lines_read,
        loaded.lines_rejected
    );
    println!(
        "  head {} | mid {} | tail {}",
        loaded.stratum_len(Stratum::Head),
        loaded.stratum_len(Stratum::Mid),
        loaded.stratum_len(Stratum::Tail)
    );
    for skip in &loaded.skipped {
        println!("  {skip}");
    }
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
