//! babel-bench-harness
//!
//! Run small end-to-end timings (pages -> search -> list persist -> reload)
//! and append CSV rows into `benchmarks/reports/bench-<unix>.csv`.
//!
//! Usage examples:
//!   cargo run -p babel-bench-harness -- --profile benchmarks/profiles/small.toml
//!   cargo run -p babel-bench-harness --release -- --profile benchmarks/profiles/large.toml

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Deserialize;

use babel_core::{Address, TextEngine};
use babel_lists::{FileStore, ListDraft, ListManager};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Profile {
    /// Requested characters per page
    length: usize,
    /// Pages generated per repeat
    pages: u32,
    /// Simulated searches per repeat
    searches: u32,
    /// Custom lists created per repeat
    lists: u32,
    /// Words in each custom list
    words_per_list: usize,
    /// Repetitions of the whole pipeline
    repeats: u32,
}

fn parse_flag(name: &str, default: &str) -> String {
    let mut it = std::env::args().skip(1);
    while let Some(k) = it.next() {
        if k == format!("--{name}") {
            return it.next().unwrap_or_else(|| default.to_string());
        }
    }
    default.to_string()
}

fn dur_ms(d: Duration) -> u128 {
    d.as_millis()
}

/// Deterministic coordinate for page `i` of a run.
fn nth_address(i: u32) -> Result<Address> {
    let s = format!("{i:08X}:{}:{}:{}:{}", i % 4, (i / 4) % 32, (i / 128) % 32, i % 410);
    s.parse()
}

fn main() -> Result<()> {
    let profile_path = PathBuf::from(parse_flag("profile", "benchmarks/profiles/small.toml"));
    let profile_src = fs::read_to_string(&profile_path)
        .with_context(|| format!("read profile {}", profile_path.display()))?;
    let profile: Profile = toml::from_str(&profile_src).context("parse profile toml")?;
    println!(
        "Profile: length={}, pages={}, searches={}, lists={}x{}, repeats={}",
        profile.length,
        profile.pages,
        profile.searches,
        profile.lists,
        profile.words_per_list,
        profile.repeats
    );

    fs::create_dir_all("benchmarks/reports").ok();

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let csv_path = PathBuf::from(format!("benchmarks/reports/bench-{ts}.csv"));
    let mut csv = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&csv_path)?;
    writeln!(csv, "timestamp,length,repeat,stage,ms,extra")?;

    let engine = TextEngine::default();

    for rep in 0..profile.repeats {
        // 1) deterministic pages; the digest must match across repeats
        let t0 = Instant::now();
        let mut digest = blake3::Hasher::new();
        let mut words = 0usize;
        for i in 0..profile.pages {
            let page = engine.page_at(&nth_address(i)?, profile.length);
            words += page.word_count;
            digest.update(page.text().as_bytes());
        }
        let t_pages = t0.elapsed();
        writeln!(
            csv,
            "{ts},{},{rep},pages,{},words={words};digest={}",
            profile.length,
            dur_ms(t_pages),
            hex::encode(&digest.finalize().as_bytes()[..8])
        )?;

        // 2) simulated search
        let t0 = Instant::now();
        let mut spliced = 0u32;
        for i in 0..profile.searches {
            let res = engine.search_for_text(&format!("query {i}"), profile.length);
            spliced += u32::from(res.spliced_at.is_some());
        }
        let t_search = t0.elapsed();
        writeln!(
            csv,
            "{ts},{},{rep},search,{},spliced={spliced}",
            profile.length,
            dur_ms(t_search)
        )?;

        // 3) create lists against a temp file store (one write per list)
        let store_dir = PathBuf::from(format!("benchmarks/tmp-lists-{ts}-{rep}"));
        let t0 = Instant::now();
        let mut mgr = ListManager::load(FileStore::new(&store_dir));
        for i in 0..profile.lists {
            let words = (0..profile.words_per_list).map(|w| format!("w{i}x{w}")).collect();
            mgr.create(ListDraft {
                name: format!("bench list {i}"),
                words,
                tags: vec!["bench".into()],
                ..ListDraft::default()
            })?;
        }
        let t_lists = t0.elapsed();
        writeln!(
            csv,
            "{ts},{},{rep},lists,{},n_lists={}",
            profile.length,
            dur_ms(t_lists),
            mgr.all().len()
        )?;

        // 4) reload + validating decode
        let t0 = Instant::now();
        let reloaded = ListManager::load(FileStore::new(&store_dir));
        let t_reload = t0.elapsed();
        anyhow::ensure!(
            reloaded.all().len() == mgr.all().len(),
            "reload lost lists: {} != {}",
            reloaded.all().len(),
            mgr.all().len()
        );
        writeln!(
            csv,
            "{ts},{},{rep},reload,{},",
            profile.length,
            dur_ms(t_reload)
        )?;

        // cleanup temp files to avoid disk bloat
        let _ = fs::remove_dir_all(&store_dir);
    }

    println!("Wrote report → {}", csv_path.display());
    Ok(())
}
