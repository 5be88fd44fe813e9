// crates/babel-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

mod config;

use anyhow::{bail, Context, Result};
use babel_core::{
    hash_to_seed, raw_text, Address, Entropy, GeneratedPage, PageRequest, TextEngine,
    DEFAULT_LENGTH,
};
use babel_lists::{
    render_list_overview, FileStore, KeyValueStore, ListDraft, ListManager, WordList,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use config::Config;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "babel",
    about = "Library-of-Babel practice text and custom word lists",
    long_about = "Library-of-Babel practice text and custom word lists.\n\nGenerate deterministic typing-practice pages from hexagon:wall:shelf:volume:page addresses, run the simulated search, and manage custom word lists.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    /// TOML config file (default: ./babel.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding custom lists (overrides config and BABEL_STORE_DIR)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Generate a page. Fully pinned addresses are deterministic unless
    /// --entropy-seed is given; open coordinates are drawn at random.
    Page {
        /// Canonical address `hex:wall:shelf:volume:page`
        #[arg(long, conflicts_with_all = ["hexagon", "wall", "shelf", "volume", "page"])]
        address: Option<Address>,

        /// Hexagon id (hex digits)
        #[arg(long)]
        hexagon: Option<String>,

        /// Wall (0-3)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..4))]
        wall: Option<u8>,

        /// Shelf (0-31)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..32))]
        shelf: Option<u8>,

        /// Volume (0-31)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..32))]
        volume: Option<u8>,

        /// Page (0-409)
        #[arg(long, value_parser = clap::value_parser!(u16).range(0..410))]
        page: Option<u16>,

        /// Approximate output length in characters
        #[arg(long, default_value_t = DEFAULT_LENGTH)]
        length: usize,

        /// Seed the padding/filler/coordinate RNG for reproducible runs
        #[arg(long)]
        seed_rng: Option<u64>,

        #[command(flatten)]
        out: OutputOpts,
    },

    /// Simulated search: the page "containing" TEXT (cosmetic, not an index)
    Search {
        /// Search text (case-insensitive)
        text: String,

        /// Approximate output length in characters
        #[arg(long, default_value_t = DEFAULT_LENGTH)]
        length: usize,

        #[command(flatten)]
        out: OutputOpts,
    },

    /// Check an address; exits non-zero when invalid
    Validate {
        /// Address to check
        address: String,
    },

    /// Print the seed derived from TEXT
    Seed {
        /// Input string (hashed as given)
        text: String,

        /// Lowercase before hashing (as search does)
        #[arg(long, default_value_t = false)]
        lowercase: bool,
    },

    /// Print the raw LCG symbol stream for a seed
    Raw {
        /// Stream seed
        #[arg(long)]
        seed: u32,

        /// Number of symbols
        #[arg(long, default_value_t = 200)]
        len: usize,
    },

    /// Manage custom word lists
    #[command(subcommand)]
    Lists(ListsCmd),
}

#[derive(Args, Debug, Clone, Copy)]
struct OutputOpts {
    /// Emit JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum ListsCmd {
    /// List all custom lists
    Ls {
        /// Only lists carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only lists whose name/description contains this text
        #[arg(long)]
        search: Option<String>,

        #[command(flatten)]
        out: OutputOpts,
    },

    /// Show one list
    Show {
        id: String,

        #[command(flatten)]
        out: OutputOpts,
    },

    /// Create a list
    Create {
        #[command(flatten)]
        fields: ListFields,
    },

    /// Update a list; omitted fields keep their current value
    Update {
        id: String,

        #[command(flatten)]
        fields: ListFields,
    },

    /// Delete a list
    Delete { id: String },

    /// Import a list from a text file (whitespace/comma separated) or an exported .json
    Import {
        /// Source file
        #[arg(long)]
        file: PathBuf,

        /// List name (text imports; defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
    },

    /// Export a list
    Export {
        id: String,

        /// Output format
        #[arg(value_enum, long, default_value_t = ExportFormat::Text)]
        format: ExportFormat,

        /// Output path (stdout when absent)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Render the list overview markup
    Render {
        /// Output path (stdout when absent)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ListFields {
    /// List name
    #[arg(long)]
    name: Option<String>,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Words, comma or whitespace separated
    #[arg(long)]
    words: Option<String>,

    /// Tags, comma separated
    #[arg(long)]
    tags: Option<String>,
}

impl ListFields {
    /// Overlay the supplied fields on `base`.
    fn apply(self, mut base: ListDraft) -> ListDraft {
        if let Some(n) = self.name {
            base.name = n;
        }
        if let Some(d) = self.description {
            base.description = d;
        }
        if let Some(w) = self.words {
            base.words = babel_lists::words_from_text(&w);
        }
        if let Some(t) = self.tags {
            base.tags = t.split(',').map(str::to_owned).collect();
        }
        base
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum ExportFormat {
    /// One word per line
    Text,
    /// Portable JSON document
    Json,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.store_dir {
        cfg.lists.store_dir = dir;
    }

    // Composition root: one engine, passed by reference.
    let engine = TextEngine::new(cfg.shape.clone()).context("building text engine")?;

    match cli.cmd {
        Cmd::Page {
            address,
            hexagon,
            wall,
            shelf,
            volume,
            page,
            length,
            seed_rng,
            out,
        } => {
            let req = match address {
                Some(a) => PageRequest::at(&a, length),
                None => PageRequest { hexagon, wall, shelf, volume, page, length },
            };
            page_cmd(&engine, &req, seed_rng, out)
        }

        Cmd::Search { text, length, out } => search_cmd(&engine, &text, length, out),

        Cmd::Validate { address } => validate_cmd(&address),

        Cmd::Seed { text, lowercase } => {
            let input = if lowercase { text.to_lowercase() } else { text };
            println!("{}", hash_to_seed(&input));
            Ok(())
        }

        Cmd::Raw { seed, len } => {
            println!("{}", raw_text(seed, len));
            Ok(())
        }

        Cmd::Lists(cmd) => lists_cmd(&cfg.lists.store_dir, cmd),
    }
}

/// Initialize tracing with an env-driven filter (default INFO), on stderr so
/// page text on stdout stays clean.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Ensure the parent directory for a file exists.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Write to `out`, or stdout when absent.
fn emit(out: Option<&Path>, body: &str) -> Result<()> {
    match out {
        Some(path) => {
            ensure_parent_dir(path)?;
            fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
            info!(out = %path.display(), bytes = body.len(), "wrote output");
        }
        None => print!("{body}"),
    }
    Ok(())
}

fn print_page(page: &GeneratedPage, out: OutputOpts) -> Result<()> {
    if out.json {
        println!("{}", serde_json::to_string_pretty(page).context("serialize page")?);
    } else {
        println!("address: {}", page.address);
        println!("seed:    {}", page.seed);
        println!("words:   {}", page.word_count);
        println!();
        println!("{}", page.text());
    }
    Ok(())
}

fn page_cmd(
    engine: &TextEngine,
    req: &PageRequest,
    seed_rng: Option<u64>,
    out: OutputOpts,
) -> Result<()> {
    let page = match (req.is_pinned(), seed_rng) {
        (true, None) => {
            let addr = req.resolve(&mut Entropy::Fixed(0).rng())?;
            engine.page_at(&addr, req.length)
        }
        (_, seed) => {
            let entropy = seed.map_or(Entropy::Thread, Entropy::Fixed);
            info!(?entropy, pinned = req.is_pinned(), "generating page");
            engine.generate_page(req, &mut entropy.rng())?
        }
    };
    print_page(&page, out)
}

fn search_cmd(engine: &TextEngine, text: &str, length: usize, out: OutputOpts) -> Result<()> {
    if text.trim().is_empty() {
        bail!("search text must not be empty");
    }
    let res = engine.search_for_text(text, length);
    if out.json {
        println!("{}", serde_json::to_string_pretty(&res).context("serialize search result")?);
        return Ok(());
    }
    match res.spliced_at {
        Some(at) => println!("found {:?} at word {at}", res.query),
        None => println!("{:?} is outside the 3-19 character search window", res.query),
    }
    print_page(&res.page, out)
}

fn validate_cmd(address: &str) -> Result<()> {
    if Address::is_valid(address) {
        println!("valid: {address}");
        Ok(())
    } else {
        bail!("invalid address {address:?} (expected hex:wall(0-3):shelf(0-31):volume(0-31):page(0-409))")
    }
}

fn summary_line(l: &WordList) -> String {
    let tags = if l.tags.is_empty() { String::new() } else { format!(" [{}]", l.tags.join(", ")) };
    format!("{}  {} ({} words){tags}", l.id, l.name, l.len())
}

/// Lists carrying `tag` whose name/description matches `term`; either filter
/// may be absent.
fn select_lists<'a, S: KeyValueStore>(
    mgr: &'a ListManager<S>,
    tag: Option<&str>,
    term: Option<&str>,
) -> Vec<&'a WordList> {
    let mut picked = match tag {
        Some(t) => mgr.find_by_tag(t),
        None => mgr.all().iter().collect(),
    };
    if let Some(term) = term {
        let hits: HashSet<&str> = mgr.search(term).into_iter().map(|l| l.id.as_str()).collect();
        picked.retain(|l| hits.contains(l.id.as_str()));
    }
    picked
}

fn lists_cmd(store_dir: &Path, cmd: ListsCmd) -> Result<()> {
    let mut mgr = ListManager::load(FileStore::new(store_dir));

    match cmd {
        ListsCmd::Ls { tag, search, out } => {
            let picked = select_lists(&mgr, tag.as_deref(), search.as_deref());
            if out.json {
                println!("{}", serde_json::to_string_pretty(&picked).context("serialize lists")?);
            } else if picked.is_empty() {
                println!("no custom lists in {}", store_dir.display());
            } else {
                for l in picked {
                    println!("{}", summary_line(l));
                }
            }
        }

        ListsCmd::Show { id, out } => {
            let l = mgr.get(&id).with_context(|| format!("no list with id {id:?}"))?;
            if out.json {
                println!("{}", serde_json::to_string_pretty(l).context("serialize list")?);
            } else {
                println!("{}", summary_line(l));
                if !l.description.is_empty() {
                    println!("{}", l.description);
                }
                println!();
                println!("{}", l.words.join(" "));
            }
        }

        ListsCmd::Create { fields } => {
            let l = mgr.create(fields.apply(ListDraft::default()))?;
            println!("created {}", summary_line(&l));
        }

        ListsCmd::Update { id, fields } => {
            let base = mgr.get(&id).with_context(|| format!("no list with id {id:?}"))?.draft();
            let l = mgr.update(&id, fields.apply(base))?;
            println!("updated {}", summary_line(&l));
        }

        ListsCmd::Delete { id } => {
            let l = mgr.delete(&id)?;
            println!("deleted {}", summary_line(&l));
        }

        ListsCmd::Import { file, name } => {
            let src = fs::read_to_string(&file)
                .with_context(|| format!("read import file {}", file.display()))?;
            let is_json = file
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"));
            let l = if is_json {
                mgr.import_json(&src)?
            } else {
                let name = name.unwrap_or_else(|| {
                    file.file_stem()
                        .map_or_else(|| "imported".to_owned(), |s| s.to_string_lossy().into_owned())
                });
                mgr.import_text(&name, &src)?
            };
            println!("imported {}", summary_line(&l));
        }

        ListsCmd::Export { id, format, out } => {
            let body = match format {
                ExportFormat::Text => mgr.export_text(&id)?,
                ExportFormat::Json => mgr.export_json(&id)? + "\n",
            };
            emit(out.as_deref(), &body)?;
        }

        ListsCmd::Render { out } => {
            let html = render_list_overview(mgr.all());
            emit(out.as_deref(), &(html.into_string() + "\n"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use babel_lists::MemoryStore;

    fn draft(name: &str, description: &str, tags: &[&str]) -> ListDraft {
        ListDraft {
            name: name.into(),
            description: description.into(),
            words: vec!["alpha".into(), "beta".into()],
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }

    fn names(lists: &[&WordList]) -> Vec<String> {
        lists.iter().map(|l| l.name.clone()).collect()
    }

    #[test]
    fn ls_filters_by_tag_and_term() {
        let mut mgr = ListManager::load(MemoryStore::new());
        mgr.create(draft("Home row", "easy keys", &["Basics"])).unwrap();
        mgr.create(draft("Numbers", "top row drills", &["basics", "digits"])).unwrap();
        mgr.create(draft("Symbols", "shifted keys", &["digits"])).unwrap();

        assert_eq!(select_lists(&mgr, None, None).len(), 3);
        assert_eq!(names(&select_lists(&mgr, Some("BASICS"), None)), ["Home row", "Numbers"]);
        assert_eq!(names(&select_lists(&mgr, None, Some("KEYS"))), ["Home row", "Symbols"]);
        assert_eq!(names(&select_lists(&mgr, Some("digits"), Some("row"))), ["Numbers"]);
        assert!(select_lists(&mgr, Some("missing"), None).is_empty());
    }

    #[test]
    fn page_flags_parse() {
        let cli = Cli::try_parse_from(["babel", "page", "--address", "1A:0:1:2:3", "--seed-rng", "9"])
            .unwrap();
        match cli.cmd {
            Cmd::Page { address, seed_rng, .. } => {
                assert_eq!(address.unwrap().format(), "1A:0:1:2:3");
                assert_eq!(seed_rng, Some(9));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["babel", "page", "--address", "1A:0:1:2:3", "--wall", "1"]).is_err());
    }
}
