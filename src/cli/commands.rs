//! Command implementations for the catalog-suggest CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::time::Instant;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::EngineConfig;
use crate::engine::{SuggestEngine, SuggestRequest};
use crate::error::{Result, SuggestError};
use crate::history::SearchHistory;

/// Execute a CLI command.
pub fn execute_command(args: SuggestArgs) -> Result<()> {
    let engine = build_engine(&args)?;

    match &args.command {
        Command::Suggest(suggest_args) => suggest(&engine, suggest_args, &args),
        Command::Canonicalize(canonicalize_args) => canonicalize(&engine, canonicalize_args, &args),
        Command::Analyze(analyze_args) => analyze(&engine, analyze_args, &args),
        Command::Batch(batch_args) => batch(&engine, batch_args, &args),
        Command::Stats => output_result(&engine.stats(), &args),
        Command::Repl(repl_args) => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_repl(
                &engine,
                repl_args.history_size,
                stdin.lock(),
                stdout.lock(),
                args.output_format,
                args.pretty,
            )
        }
    }
}

/// Load the configuration and reference files named on the command line.
fn build_engine(args: &SuggestArgs) -> Result<SuggestEngine> {
    let config = match &args.config {
        Some(path) => {
            log::info!("loading configuration from {}", path.display());
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };

    let start_time = Instant::now();
    let engine = SuggestEngine::from_dir(&args.data_dir, config)?;
    log::info!(
        "catalog loaded from {} in {}ms",
        args.data_dir.display(),
        start_time.elapsed().as_millis()
    );

    Ok(engine)
}

fn suggest(engine: &SuggestEngine, args: &SuggestQueryArgs, cli_args: &SuggestArgs) -> Result<()> {
    output_result(&suggestion_result(engine, &args.query, &args.history, args.scores), cli_args)
}

fn suggestion_result(
    engine: &SuggestEngine,
    query: &str,
    history: &[String],
    with_scores: bool,
) -> SuggestionResult {
    let start_time = Instant::now();
    let scored = engine.suggest_scored(query, history);
    let duration_us = start_time.elapsed().as_micros() as u64;

    SuggestionResult {
        query: query.to_string(),
        suggestions: scored.iter().map(|s| s.code.clone()).collect(),
        scored: with_scores.then_some(scored),
        duration_us,
    }
}

fn canonicalize(
    engine: &SuggestEngine,
    args: &CanonicalizeArgs,
    cli_args: &SuggestArgs,
) -> Result<()> {
    let mappings = args
        .queries
        .iter()
        .map(|query| CanonicalMapping {
            query: query.clone(),
            code: engine.canonicalize(query),
        })
        .collect();

    output_result(&CanonicalizationResult { mappings }, cli_args)
}

fn analyze(engine: &SuggestEngine, args: &AnalyzeArgs, cli_args: &SuggestArgs) -> Result<()> {
    let result = AnalysisResult {
        query: args.query.clone(),
        candidate_groups: engine.analyze(&args.query),
        keywords: engine.keywords(&args.query),
        canonical: engine.canonicalize(&args.query),
    };

    output_result(&result, cli_args)
}

fn batch(engine: &SuggestEngine, args: &BatchArgs, cli_args: &SuggestArgs) -> Result<()> {
    let file = File::open(&args.request_file)?;
    let requests = read_requests(BufReader::new(file))?;
    log::info!(
        "serving {} requests from {}",
        requests.len(),
        args.request_file.display()
    );

    let start_time = Instant::now();
    let results = engine.suggest_batch(&requests);

    output_result(
        &BatchResult {
            requests: results.len(),
            results,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Parse JSON-lines requests, skipping blank lines.
pub fn read_requests<R: BufRead>(reader: R) -> Result<Vec<SuggestRequest>> {
    let mut requests = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let request = serde_json::from_str::<SuggestRequest>(&line).map_err(|e| {
            SuggestError::invalid_argument(format!(
                "Error parsing request on line {}: {}",
                line_num + 1,
                e
            ))
        })?;
        requests.push(request);
    }

    Ok(requests)
}

/// Interactive session.
///
/// Plain lines are live queries answered with the session history. Lines
/// starting with `:` manage the history: `:submit QUERY`, `:clear`,
/// `:history` and `:quit`.
pub fn run_repl<R, W>(
    engine: &SuggestEngine,
    history_size: usize,
    input: R,
    mut output: W,
    format: OutputFormat,
    pretty: bool,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut history = SearchHistory::with_capacity(history_size);

    for line in input.lines() {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);

        if let Some(command) = line.strip_prefix(':') {
            let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
            match name {
                "submit" => {
                    history.record(rest.trim());
                    writeln!(output, "history: {}", history.len())?;
                }
                "clear" => {
                    history.clear();
                    writeln!(output, "history cleared")?;
                }
                "history" => {
                    for (i, entry) in history.iter().enumerate() {
                        writeln!(output, "{:>3}. {}", i + 1, entry)?;
                    }
                }
                "quit" | "exit" => break,
                other => writeln!(output, "unknown command :{other}")?,
            }
            continue;
        }

        let result = suggestion_result(engine, line, history.as_slice(), false);
        writeln!(output, "{}", format_result(&result, format, pretty)?)?;
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::catalog::{BrandRecord, LineRecord, ReferenceData, SimilarityMatrix};

    fn engine() -> SuggestEngine {
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.5],
            vec![0.5, 1.0],
            vec![0.9, 0.1],
        ])
        .unwrap();
        let data = ReferenceData::build(
            &[BrandRecord::new("ACME")],
            &[],
            &[LineRecord::new("RUNNING"), LineRecord::new("CASUAL")],
            vec!["ACME RUNNING".to_string(), "ACME CASUAL".to_string()],
            matrix,
            8,
        )
        .unwrap();

        SuggestEngine::new(Arc::new(data), EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_read_requests() {
        let input = "{\"query\": \"acme\", \"history\": [\"ACME CASUAL\"]}\n\n{\"query\": \"ru\"}\n";
        let requests = read_requests(input.as_bytes()).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].history, vec!["ACME CASUAL"]);
        assert!(requests[1].history.is_empty());

        assert!(read_requests("not json\n".as_bytes()).is_err());
    }

    #[test]
    fn test_repl_session() {
        let engine = engine();
        let input = "acme\n:submit ACME CASUAL\nacme\n:history\n:clear\nacme\n:quit\nacme\n";
        let mut output = Vec::new();

        run_repl(&engine, 10, input.as_bytes(), &mut output, OutputFormat::Json, false).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].contains(r#""suggestions":["ACME RUNNING","ACME CASUAL"]"#));
        assert_eq!(lines[1], "history: 1");
        assert!(lines[2].contains(r#""suggestions":["ACME CASUAL","ACME RUNNING"]"#));
        assert_eq!(lines[3], "  1. ACME CASUAL");
        assert_eq!(lines[4], "history cleared");
        assert!(lines[5].contains(r#""suggestions":["ACME RUNNING","ACME CASUAL"]"#));
        assert_eq!(lines.len(), 6);
    }
}
