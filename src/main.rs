use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};

use pagesift_core::{OutputFormat, SearchFilter, SearchResults, SiftConfig, SiftError};
use pagesift_search::{EmbeddingClient, Retriever, SearchIndex};
use pagesift_store::ChunkStore;

#[derive(Parser)]
#[command(
    name = "pagesift",
    version,
    about = "Chunk exported page trees and search them semantically",
    long_about = "Pagesift ingests a tree of exported pages (Notion-style markdown), splits them\n\
                   into chunks that remember their header path, and serves vector similarity and\n\
                   full-text search over them with page and header filters.\n\n\
                   Examples:\n  \
                     pagesift init                         Create a .pagesift.toml config file\n  \
                     pagesift setup                        Chunk the export and build the index\n  \
                     pagesift query -q 'deploy checklist'  One-shot search\n  \
                     pagesift query -q 'auth' -p Handbook  Restrict to one page\n  \
                     pagesift search                       Interactive search session"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .pagesift.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text  Human-readable result listing (default)\n  \
                         json  Machine-readable JSON"
    )]
    format: OutputFormat,

    /// When to use colors
    #[arg(long, global = true, default_value = "auto")]
    color: ColorChoice,
}

#[derive(Subcommand)]
enum Command {
    /// Chunk the export tree and build the search index
    #[command(long_about = "Chunk the export tree and build the search index.\n\n\
        Walks the configured export folder, splits every markdown page into\n\
        header-aware chunks, writes them to the chunks file, then embeds and\n\
        indexes them. Re-chunking is skipped when the chunks file already\n\
        exists; pass --force to redo everything from scratch.\n\n\
        Examples:\n  pagesift setup\n  pagesift setup --force")]
    Setup {
        /// Re-chunk and re-index even if outputs already exist
        #[arg(long)]
        force: bool,
    },
    /// Interactive search session
    #[command(long_about = "Interactive search session.\n\n\
        Type a query to search; directives adjust the session:\n  \
          /page <name>     only search within one page\n  \
          /header <text>   only search under matching header paths\n  \
          /clear           drop both filters\n  \
          /help            show directives\n  \
          /quit, /exit     leave the session\n\n\
        A failed query is reported and the session continues.")]
    Search {
        /// Maximum results per query (default: 5)
        #[arg(long, short = 'k', default_value = "5")]
        top_k: usize,

        /// Use full-text search instead of embeddings
        #[arg(long)]
        lexical: bool,
    },
    /// One-shot search
    #[command(long_about = "One-shot search.\n\n\
        Requires --query; exits non-zero without it. Filters narrow the\n\
        candidate set before ranking.\n\n\
        Examples:\n  pagesift query -q 'rotation schedule'\n  \
        pagesift query -q 'rollback' --page Runbook --header Deploy")]
    Query {
        /// Search query (required)
        #[arg(long, short = 'q')]
        query: Option<String>,

        /// Maximum results to return (default: 5)
        #[arg(long, short = 'k', default_value = "5")]
        top_k: usize,

        /// Only search within this page (exact title)
        #[arg(long, short = 'p')]
        page: Option<String>,

        /// Only search under header paths containing this text
        #[arg(long)]
        header: Option<String>,

        /// Use full-text search instead of embeddings
        #[arg(long)]
        lexical: bool,
    },
    /// Create default configuration
    Init,
    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

const DEFAULT_CONFIG: &str = r#"# Pagesift Configuration

[ingest]
# Root of the exported page tree
# folder = "notion_export"
# Where chunk records are written
# chunks_path = "chunks.jsonl"
# Word-count threshold per chunk
# max_words = 300

[index]
# db_path = ".pagesift/index.db"
# distance = "cosine"   # or "l2"
# dimensions = 384

[embedding]
# Any OpenAI-compatible /embeddings endpoint
# base_url = "http://localhost:8080/v1"
# model = "all-MiniLM-L6-v2"
# api_key is optional for local servers; PAGESIFT_EMBED_API_KEY also works
# api_key = ""
"#;

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SiftConfig::from_file(path).into_diagnostic()?,
        None => {
            let default_path = std::path::Path::new(".pagesift.toml");
            if default_path.exists() {
                SiftConfig::from_file(default_path).into_diagnostic()?
            } else {
                SiftConfig::default()
            }
        }
    };

    let use_color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    };

    match cli.command {
        None => {
            print_welcome(use_color);
            Ok(())
        }
        Some(Command::Setup { force }) => run_setup(&config, force).await,
        Some(Command::Search { top_k, lexical }) => {
            run_search_session(&config, top_k, lexical, cli.format).await
        }
        Some(Command::Query {
            query,
            top_k,
            page,
            header,
            lexical,
        }) => {
            let Some(query) = query else {
                miette::bail!(miette::miette!(
                    help = "pass the search text with -q/--query",
                    "no query given"
                ));
            };
            let filter = SearchFilter { page, header };
            let results = run_query(&config, &query, top_k, &filter, lexical).await?;
            match cli.format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&results).into_diagnostic()?
                    );
                }
                OutputFormat::Text => print_results(&results, &query),
            }
            Ok(())
        }
        Some(Command::Init) => run_init(),
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

async fn run_setup(config: &SiftConfig, force: bool) -> Result<()> {
    let store = ChunkStore::new(&config.ingest.chunks_path);

    if store.exists() && !force {
        println!(
            "{} already exists, skipping chunking (use --force to redo)",
            store.path().display()
        );
    } else {
        let chunks =
            match pagesift_chunk::chunk_tree(&config.ingest.folder, config.ingest.max_words) {
                Ok(chunks) => chunks,
                Err(e @ SiftError::InputMissing(_)) => {
                    miette::bail!(miette::miette!(
                        help = "export your pages into this folder first, or point \
                                [ingest].folder in .pagesift.toml at the export",
                        "{e}"
                    ));
                }
                Err(e) => return Err(e).into_diagnostic(),
            };
        store.rebuild(&chunks).into_diagnostic()?;
        println!(
            "Wrote {} chunks to {}",
            chunks.len(),
            store.path().display()
        );
    }

    // --force discards the old database so a changed shape can rebuild.
    if force {
        match std::fs::remove_file(&config.index.db_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
    let index = SearchIndex::open(&config.index.db_path).into_diagnostic()?;
    index
        .pin_shape(config.index.dimensions, config.index.distance)
        .into_diagnostic()?;

    let embedder = EmbeddingClient::with_config(&config.embedding);
    let retriever = Retriever::new(index, Box::new(embedder), store);

    let is_tty = std::io::stderr().is_terminal();
    let spinner = if is_tty {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})")
                .expect("spinner template"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(120));
        pb.set_message("embedding chunks...");
        Some(pb)
    } else {
        None
    };

    let report = retriever
        .build_index(|done, total| {
            if let Some(pb) = &spinner {
                pb.set_message(format!("embedding chunks... {done}/{total}"));
            } else {
                eprintln!("Indexed {done}/{total} chunks");
            }
        })
        .await;

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let report = report.into_diagnostic()?;

    if report.skipped_records > 0 {
        eprintln!(
            "warning: skipped {} malformed chunk records",
            report.skipped_records
        );
    }
    println!(
        "Indexed {} chunks into {}",
        report.indexed,
        config.index.db_path.display()
    );
    Ok(())
}

fn open_retriever(config: &SiftConfig) -> Result<Retriever> {
    let store = ChunkStore::new(&config.ingest.chunks_path);
    if !store.exists() {
        miette::bail!(miette::miette!(
            help = "run 'pagesift setup' to chunk and index your export first",
            "chunks file not found: {}",
            store.path().display()
        ));
    }

    let index = SearchIndex::open(&config.index.db_path).into_diagnostic()?;
    if index.is_empty().into_diagnostic()? {
        miette::bail!(miette::miette!(
            help = "run 'pagesift setup' to build the index",
            "search index is empty: {}",
            config.index.db_path.display()
        ));
    }

    let embedder = EmbeddingClient::with_config(&config.embedding);
    Ok(Retriever::new(index, Box::new(embedder), store))
}

async fn run_query(
    config: &SiftConfig,
    query: &str,
    top_k: usize,
    filter: &SearchFilter,
    lexical: bool,
) -> Result<SearchResults> {
    let retriever = open_retriever(config)?;
    let results = if lexical {
        retriever.lexical(query, top_k, filter).into_diagnostic()?
    } else {
        retriever
            .search(query, top_k, filter)
            .await
            .into_diagnostic()?
    };
    Ok(results)
}

async fn run_search_session(
    config: &SiftConfig,
    top_k: usize,
    lexical: bool,
    format: OutputFormat,
) -> Result<()> {
    let retriever = open_retriever(config)?;
    let mut filter = SearchFilter::default();

    println!("Interactive search — type a query, /help for directives, /quit to leave.");

    let stdin = std::io::stdin();
    loop {
        eprint!("search> ");
        std::io::stderr().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).into_diagnostic()? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(directive) = line.strip_prefix('/') {
            let (name, rest) = directive
                .split_once(char::is_whitespace)
                .unwrap_or((directive, ""));
            match name {
                "quit" | "exit" => break,
                "help" => print_session_help(),
                "clear" => {
                    filter = SearchFilter::default();
                    println!("filters cleared");
                }
                "page" => {
                    let value = rest.trim();
                    if value.is_empty() {
                        filter.page = None;
                        println!("page filter cleared");
                    } else {
                        filter.page = Some(value.to_string());
                        println!("page filter: {value}");
                    }
                }
                "header" => {
                    let value = rest.trim();
                    if value.is_empty() {
                        filter.header = None;
                        println!("header filter cleared");
                    } else {
                        filter.header = Some(value.to_string());
                        println!("header filter: {value}");
                    }
                }
                other => eprintln!("unknown directive '/{other}' — try /help"),
            }
            continue;
        }

        let results = if lexical {
            retriever.lexical(line, top_k, &filter)
        } else {
            retriever.search(line, top_k, &filter).await
        };
        match results {
            Ok(results) => match format {
                OutputFormat::Json => match serde_json::to_string_pretty(&results) {
                    Ok(json) => println!("{json}"),
                    Err(e) => eprintln!("error: {e}"),
                },
                OutputFormat::Text => print_results(&results, line),
            },
            // A failed query never ends the session.
            Err(e) => eprintln!("error: {e}"),
        }
    }

    Ok(())
}

fn print_session_help() {
    println!("Directives:");
    println!("  /page <name>     only search within one page");
    println!("  /header <text>   only search under matching header paths");
    println!("  /clear           drop both filters");
    println!("  /help            show this help");
    println!("  /quit, /exit     leave the session");
}

fn print_results(results: &SearchResults, query: &str) {
    if results.hits.is_empty() {
        println!("No results for '{query}'.");
        return;
    }

    println!(
        "Found {} results for '{query}' ({}):\n",
        results.hits.len(),
        results.order
    );
    for (i, hit) in results.hits.iter().enumerate() {
        println!("#{}: {} > {}", i + 1, hit.page, hit.header_path_text());
        println!("   score {:.4}", hit.score);
        println!("   {}\n", preview(&hit.content, 200));
    }
}

/// First `limit` characters of `text` on one line, with an ellipsis when cut.
fn preview(text: &str, limit: usize) -> String {
    let flat = text.replace('\n', " ");
    let mut out: String = flat.chars().take(limit).collect();
    if flat.chars().count() > limit {
        out.push('…');
    }
    out
}

fn run_init() -> Result<()> {
    let path = std::path::Path::new(".pagesift.toml");
    if path.exists() {
        miette::bail!(miette::miette!(
            help = "remove the existing file first if you want a fresh template",
            ".pagesift.toml already exists"
        ));
    }
    std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
    println!("Created .pagesift.toml");
    Ok(())
}

fn print_welcome(use_color: bool) {
    let version = env!("CARGO_PKG_VERSION");
    if use_color {
        println!("\x1b[1mpagesift\x1b[0m v{version} — search your exported pages\n");

        println!("\x1b[1mQuick start:\x1b[0m");
        println!(
            "  \x1b[36mpagesift init\x1b[0m                  Create a .pagesift.toml config file"
        );
        println!(
            "  \x1b[36mpagesift setup\x1b[0m                 Chunk the export and build the index"
        );
        println!("  \x1b[36mpagesift query -q 'topic'\x1b[0m      One-shot search\n");

        println!("\x1b[1mAll commands:\x1b[0m");
        println!("  \x1b[32msetup\x1b[0m     Chunk the export tree and build the search index");
        println!("  \x1b[32msearch\x1b[0m    Interactive search session");
        println!("  \x1b[32mquery\x1b[0m     One-shot search with filters");
        println!("  \x1b[32minit\x1b[0m      Create default configuration\n");
    } else {
        println!("pagesift v{version} — search your exported pages\n");

        println!("Quick start:");
        println!("  pagesift init                  Create a .pagesift.toml config file");
        println!("  pagesift setup                 Chunk the export and build the index");
        println!("  pagesift query -q 'topic'      One-shot search\n");

        println!("All commands:");
        println!("  setup     Chunk the export tree and build the search index");
        println!("  search    Interactive search session");
        println!("  query     One-shot search with filters");
        println!("  init      Create default configuration\n");
    }

    println!("Run 'pagesift <command> --help' for details.");
}
