//! mustepub - Convert plain-text manuscripts into EPUB ebooks

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mustepub::MustEpubConfig;
use mustepub::error::Result;

const USAGE: &str = "Usage: mustepub file.txt";

#[derive(Parser)]
#[command(name = "mustepub")]
#[command(version, about = "Convert a plain-text manuscript into an EPUB", long_about = None)]
#[command(after_help = "Lines starting with \"# \" open a new section.
The EPUB is written next to the input file unless --output-dir is given.

EXAMPLES:
    mustepub novel.txt                 Write novel.epub beside novel.txt
    mustepub -a 佚名 -o out novel.txt  Write out/novel.epub with an author")]
struct Cli {
    /// Plain-text manuscript to convert
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Directory to write the EPUB to (defaults to the input's directory)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Book title (defaults to the input file name without extension)
    #[arg(short, long)]
    title: Option<String>,

    /// Author name, may be repeated
    #[arg(short, long = "author", value_name = "NAME")]
    authors: Vec<String>,

    /// Subject tag, may be repeated
    #[arg(short = 's', long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// Suppress progress messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    let Some(input) = cli.input.clone() else {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    };

    match convert(input, cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn convert(input: PathBuf, cli: Cli) -> Result<()> {
    let mut builder = MustEpubConfig::builder();
    builder
        .input_path(input)
        .authors(cli.authors)
        .tags(cli.tags)
        .print_progress(!cli.quiet);
    if let Some(dir) = cli.output_dir {
        builder.output_dir(dir);
    }
    if let Some(title) = cli.title {
        builder.title(title);
    }

    builder.build()?.convert()?;
    Ok(())
}
