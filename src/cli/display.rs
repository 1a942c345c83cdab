// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the wikidex CLI.
//!
//! OneDark colours on dark terminals, One Light on light ones. The theme comes
//! from `WIKIDEX_THEME` when set ("dark" or "light"), then `COLORFGBG`, and
//! defaults to dark. `NO_COLOR` and non-TTY stdout turn colours off entirely,
//! so piping `--count` output into a file gives plain `query<TAB>count` lines.

use std::sync::OnceLock;

use wikidex::{ArticleId, Engine, Field, IndexStats, QueryCount, QueryTest, QueryTestReport};

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("WIKIDEX_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, ANSI escapes excluded
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    let border = if use_colors() { GRAY() } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        reset,
        content,
        " ".repeat(pad),
        border,
        reset
    );
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = if use_colors() { GRAY() } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        reset,
        label_part,
        border,
        "─".repeat(remaining),
        reset
    );
}

/// └──────────────────┘
pub fn section_bot() {
    let border = if use_colors() { GRAY() } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    println!("{}└{}┘{}", border, "─".repeat(BOX_WIDTH), reset);
}

// ═══════════════════════════════════════════════════════════════════════════
// QUERY RESULTS
// ═══════════════════════════════════════════════════════════════════════════

/// One displayed hit. Ranks start at 1 and follow article id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub rank: usize,
    pub id: ArticleId,
    pub title: String,
    pub url: String,
    pub snippet: Option<String>,
}

/// Characters of summary shown under a result.
pub const SNIPPET_CHARS: usize = 160;

/// The first `max_chars` characters of `text` on one line, with `...` when cut.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &flat[..end]),
        None => flat,
    }
}

/// How many results to list, and whether to add snippets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowOptions {
    pub all: bool,
    pub max: usize,
    pub snippet: bool,
}

/// The rows to show for `ids`: all of them with `show.all`, else the first
/// `show.max`.
pub fn result_rows(engine: &Engine, ids: &[ArticleId], show: ShowOptions) -> Vec<ResultRow> {
    let limit = if show.all { ids.len() } else { show.max.min(ids.len()) };
    ids[..limit]
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            engine.article(*id).map(|article| ResultRow {
                rank: i + 1,
                id: *id,
                title: article.title.clone(),
                url: article.url.clone(),
                snippet: show
                    .snippet
                    .then(|| snippet(&article.summary, SNIPPET_CHARS)),
            })
        })
        .collect()
}

pub fn print_results(query: &str, rows: &[ResultRow], total: usize) {
    println!("{} {}", themed(CYAN, &[BOLD], "Query:"), query);
    for row in rows {
        println!(
            "# {:02} ({}) {}:\t{}",
            row.rank,
            themed(GRAY, &[], &row.id.to_string()),
            themed(BLUE, &[BOLD], &row.title),
            row.url
        );
        if let Some(snippet) = &row.snippet {
            println!("     {}", themed(GRAY, &[], snippet));
        }
    }
    if rows.len() < total {
        println!("{}", themed(GRAY, &[], &format!("... {} more", total - rows.len())));
    }
    println!("{} {}", themed(CYAN, &[BOLD], "Number of results:"), total);
}

// ═══════════════════════════════════════════════════════════════════════════
// BATCH FILES
// ═══════════════════════════════════════════════════════════════════════════

pub fn print_counts(counts: &[QueryCount]) {
    for line in counts {
        match line {
            QueryCount::Echo(text) => println!("{}", text),
            QueryCount::Counted { query, count } => println!("{}\t{}", query, count),
        }
    }
}

pub fn print_test_report(report: &QueryTestReport) {
    for line in &report.lines {
        match line {
            QueryTest::Echo(text) => println!("{}", text),
            QueryTest::Passed { query, count } => println!("{}\t{}", query, count),
            QueryTest::Failed {
                query,
                expected,
                actual,
            } => println!(
                "{}",
                themed(
                    RED,
                    &[BOLD],
                    &format!(">>>>{}\t{} != {}<<<<", query, expected, actual)
                )
            ),
        }
    }

    let failed = report.failures().count();
    if failed == 0 {
        println!("{}", themed(GREEN, &[BOLD], "all queries gave the expected count"));
    } else {
        println!(
            "{}",
            themed(YELLOW, &[BOLD], &format!("{} queries gave the wrong count", failed))
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// STATISTICS
// ═══════════════════════════════════════════════════════════════════════════

fn mode(enabled: bool) -> String {
    if enabled {
        themed(GREEN, &[], "yes")
    } else {
        themed(GRAY, &[], "no")
    }
}

fn per_field_rows(label: &str, counts: &std::collections::BTreeMap<Field, usize>) {
    section_top(label);
    for (field, count) in counts {
        row(&format!(" {}{:>12}", pad_right(field.as_str(), 16), count));
    }
    section_bot();
}

pub fn print_stats(stats: &IndexStats, snapshot_size: Option<u64>) {
    section_top("INDEX");
    row(&format!(" {}{}", pad_right("articles", 16), stats.articles));
    if let Some(size) = snapshot_size {
        row(&format!(" {}{}", pad_right("snapshot", 16), format_size(size)));
    }
    row(&format!(" {}{}", pad_right("multifield", 16), mode(stats.options.multifield)));
    row(&format!(" {}{}", pad_right("positional", 16), mode(stats.options.positional)));
    row(&format!(" {}{}", pad_right("stemming", 16), mode(stats.options.stemming)));
    row(&format!(" {}{}", pad_right("permuterm", 16), mode(stats.options.permuterm)));
    section_bot();

    per_field_rows("TERMS", &stats.terms);
    if let Some(stems) = &stats.stems {
        per_field_rows("STEMS", stems);
    }
    if let Some(permuterms) = &stats.permuterms {
        per_field_rows("PERMUTERMS", permuterms);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
