use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use gleaner_core::{
    DEFAULT_MAX_BODY_BYTES, Document, ExtractionResult, FetchRequest, Fetcher, GleanerConfig, OutputFormat,
    extract_content, fetch_file, fetch_stdin, prepare_text,
};
use owo_colors::OwoColorize;
use url::Url;

mod echo;

use echo::{
    format_size, print_banner, print_error, print_extraction_details, print_info, print_step, print_success,
    print_timing_summary, print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for extracted content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::PlainText,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Extract the main readable text from web pages
#[derive(Parser, Debug)]
#[command(name = "gleaner")]
#[command(version)]
#[command(about = "Extract the main readable text from web pages", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, "-" for stdin, or raw text with --text
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: Format,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Identifying User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Largest response body accepted, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES, value_name = "NUM")]
    max_bytes: usize,

    /// Element to prune, repeatable (replaces the defaults)
    #[arg(long, value_name = "TAG")]
    noise: Vec<String>,

    /// Treat INPUT as raw text and only normalize it
    #[arg(long)]
    text: bool,

    /// Enable progress output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> GleanerConfig {
        let mut builder = GleanerConfig::builder()
            .timeout(self.timeout)
            .max_body_bytes(self.max_bytes);

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if !self.noise.is_empty() {
            builder = builder.noise_tags(self.noise.iter().cloned());
        }

        builder.build()
    }
}

/// Where the markup comes from
enum Source<'a> {
    Url(&'a str),
    File(&'a str),
    Stdin,
}

impl<'a> Source<'a> {
    fn detect(input: &'a str) -> Self {
        if input == "-" {
            Self::Stdin
        } else if Url::parse(input).is_ok_and(|u| matches!(u.scheme(), "http" | "https")) {
            Self::Url(input)
        } else {
            Self::File(input)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let started = Instant::now();
    let mut timings: Vec<(String, Duration)> = Vec::new();

    if args.verbose {
        print_banner();
    }

    let result = if args.text {
        if args.verbose {
            print_step(1, 2, "Normalizing raw text");
        }
        let content = prepare_text(&args.input).context("No text to analyze")?;
        ExtractionResult::new(content, "")
    } else {
        extract_from_source(args, &mut timings).await?
    };

    let output = result.to_format(args.format.into()).context("Failed to format output")?;

    if args.verbose {
        let (step, total) = if args.text { (2, 2) } else { (3, 3) };
        print_step(step, total, "Writing output");
        eprintln!("  {} {}", "Words:".dimmed(), result.word_count().to_string().bright_white());
        eprintln!(
            "  {} {}",
            "Format:".dimmed(),
            format!("{:?}", args.format).bright_white()
        );
        eprintln!();
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => println!("{}", output),
    }

    if args.verbose && !timings.is_empty() {
        print_timing_summary(started.elapsed(), &timings);
    }

    Ok(())
}

async fn extract_from_source(args: &Args, timings: &mut Vec<(String, Duration)>) -> anyhow::Result<ExtractionResult> {
    let config = args.config();
    let source = Source::detect(&args.input);

    let stage = Instant::now();
    let (html, source_url) = match source {
        Source::Stdin => {
            if args.verbose {
                print_step(1, 3, "Reading from stdin");
            }
            (fetch_stdin().context("Failed to read from stdin")?, String::new())
        }
        Source::Url(url) => {
            if args.verbose {
                print_step(1, 3, &format!("Fetching from {}", url.bright_white().underline()));
                print_info(&format!("User-Agent: {}", config.fetch.user_agent));
            }
            let request = FetchRequest::new(url).context("Missing URL")?;
            let fetcher = Fetcher::new(config.fetch.clone()).context("Failed to build HTTP client")?;
            let fetched = fetcher.fetch(&request).await.context("Failed to fetch URL")?;
            (fetched.raw_markup, fetched.source_url)
        }
        Source::File(path) => {
            if args.verbose {
                print_step(1, 3, &format!("Reading from file {}", path.bright_white()));
            }
            (
                fetch_file(path).with_context(|| format!("Failed to read file: {}", path))?,
                String::new(),
            )
        }
    };
    timings.push(("Read".to_string(), stage.elapsed()));

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), format_size(html.len()).bright_white());
        eprintln!();
        print_step(2, 3, "Extracting main content");
    }

    let stage = Instant::now();
    let doc = Document::parse(&html).context("Failed to parse HTML")?;
    let extracted = extract_content(&doc, &config.extract).context("Failed to extract content")?;
    timings.push(("Extract".to_string(), stage.elapsed()));

    if args.verbose {
        if let Some(title) = doc.title() {
            eprintln!("  {} {}", "Title:".dimmed(), title.bright_white());
        }
        print_extraction_details(&extracted);
        if extracted.text.is_empty() {
            print_warning("Primary content region is empty");
        }
    }

    let mut result = ExtractionResult::new(extracted.text, source_url);
    result.region = Some(extracted.region);
    Ok(result)
}
