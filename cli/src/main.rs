mod render;

use anyhow::{Context, Result};
use clap::Parser;
use konjug::{Conjugator, Options, ParadigmKey};
use std::{path::PathBuf, process};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(name = "konjug")]
#[clap(about = "Conjugates verbs using a language's rule file")]
struct Args {
    #[clap(short, long, default_value = "fr")]
    #[clap(help = "The language code of the rule file to load.")]
    lang: String,
    #[clap(short, long)]
    #[clap(help = "The directory containing the rule files. Defaults to $KONJUG_DATA_DIR, \
                   then the rules bundled with konjug.")]
    data_dir: Option<PathBuf>,
    #[clap(short, long = "form")]
    #[clap(help = "Only print this form. May be given more than once.")]
    forms: Vec<String>,
    #[clap(long = "except-form")]
    #[clap(help = "Do not print this form. May be given more than once.")]
    forms_except: Vec<String>,
    #[clap(short, long = "paradigm")]
    #[clap(help = "Only print this paradigm, like `1sg`. May be given more than once.")]
    paradigms: Vec<ParadigmKey>,
    #[clap(long = "except-paradigm")]
    #[clap(help = "Do not print this paradigm. May be given more than once.")]
    paradigms_except: Vec<ParadigmKey>,
    #[clap(long)]
    #[clap(help = "Print the forms and paradigms the language declares.")]
    list: bool,
    #[clap(short, long, parse(from_occurrences))]
    #[clap(help = "Log what the conjugator is doing. Repeat for more detail.")]
    verbose: u8,
    #[clap(help = "The verbs to conjugate.")]
    verbs: Vec<String>,
}

impl Args {
    fn options(&self) -> Options {
        let mut options = Options::new()
            .forms_except(self.forms_except.clone())
            .paradigms_except(self.paradigms_except.clone());
        if !self.forms.is_empty() {
            options = options.forms(self.forms.clone());
        }
        if !self.paradigms.is_empty() {
            options = options.paradigms(self.paradigms.clone());
        }
        options
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => (),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns false if any verb had no matching rule.
fn run(args: &Args) -> Result<bool> {
    let options = args.options();
    debug!(?options, "parsed options");
    let conjugator = match &args.data_dir {
        Some(dir) => Conjugator::load_from(dir, &args.lang, options),
        None => Conjugator::load(&args.lang, options),
    }
    .with_context(|| format!("Could not load the rules for `{}`", args.lang))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.list {
        render::declarations(&mut out, &conjugator)?;
    }

    let mut all_found = true;
    for verb in &args.verbs {
        let conjugation = conjugator
            .conjugate(verb)
            .with_context(|| format!("The rules for `{}` are broken", verb))?;
        match conjugation {
            Some(c) => render::conjugation(&mut out, verb, &c)?,
            None => {
                render::not_found(&mut out, verb)?;
                all_found = false;
            }
        }
    }

    Ok(all_found)
}
