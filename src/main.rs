use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use wikidex::build::{index_path, BuildOptions};
use wikidex::{count_queries, snapshot, test_queries, Engine, IndexOptions, Result};

mod cli;
use cli::display;
use cli::{init_logging, Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Index {
            corpus,
            snapshot: out,
            multifield,
            positional,
            stem,
            permuterm,
            permissive,
        } => {
            let options = IndexOptions {
                multifield,
                positional,
                stemming: stem,
                permuterm,
                ..IndexOptions::default()
            };
            let mut engine = Engine::new(options);
            let summary = index_path(&mut engine, &corpus, &BuildOptions { permissive })?;
            snapshot::save(&engine, &out)?;

            eprintln!(
                "✅ Indexed {} articles from {} files ({} duplicate URLs, {} skipped lines)",
                summary.indexed, summary.files, summary.duplicates, summary.skipped
            );
            Ok(ExitCode::SUCCESS)
        }

        Commands::Search {
            snapshot: path,
            query,
            count,
            test,
            stem,
            all,
            max,
            snippet,
        } => {
            let mut engine = snapshot::load(&path)?;
            engine.set_stemming(stem);

            if let Some(query) = query {
                let ids = engine.solve_query(&query)?;
                let show = display::ShowOptions { all, max, snippet };
                let rows = display::result_rows(&engine, &ids, show);
                display::print_results(&query, &rows, ids.len());
                return Ok(ExitCode::SUCCESS);
            }

            if let Some(file) = count {
                let lines = read_lines(&file)?;
                display::print_counts(&count_queries(&engine, &lines)?);
                return Ok(ExitCode::SUCCESS);
            }

            if let Some(file) = test {
                let lines = read_lines(&file)?;
                let report = test_queries(&engine, &lines)?;
                display::print_test_report(&report);
                return Ok(if report.all_passed() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                });
            }

            // clap's argument group requires one of the three inputs.
            Ok(ExitCode::FAILURE)
        }

        Commands::Stats { snapshot: path } => {
            let engine = snapshot::load(&path)?;
            let size = fs::metadata(&path).ok().map(|m| m.len());
            display::print_stats(&engine.stats(), size);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| wikidex::Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(str::to_string).collect())
}
