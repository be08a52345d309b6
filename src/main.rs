use anyhow::Result;
use outliner::{
    dataset::{Row, Store},
    extract, ingest,
};
use std::{collections::HashSet, fs, path::PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) configure dirs ───────────────────────────────────────────
    let dumps_dir = PathBuf::from("dumps");
    let data_dir = PathBuf::from("data");
    let outputs_dir = PathBuf::from("outputs");
    for d in [&dumps_dir, &data_dir, &outputs_dir] {
        fs::create_dir_all(d)?;
    }
    let master_path = data_dir.join("master_data.json");
    let export_path = outputs_dir.join("course_outlines.parquet");

    // ─── 3) load the master store to skip processed documents ───────
    let mut store = Store::open(&master_path)?;
    let known: HashSet<String> = store.known_sources().into_iter().collect();
    info!("{} documents already in dataset", known.len());

    // ─── 4) discover new dumps ───────────────────────────────────────
    let dump_paths = ingest::discover_dumps(&dumps_dir)?;
    if dump_paths.is_empty() {
        info!("no dumps found in {}; exit", dumps_dir.display());
        return Ok(());
    }

    // ─── 5) extract each document, skipping failures ─────────────────
    let mut extracted: Vec<Row> = Vec::new();
    for path in dump_paths {
        let dump = match ingest::load_dump(&path) {
            Ok(dump) => dump,
            Err(err) => {
                error!(path = %path.display(), cause = %err, "dump unreadable; skipping document");
                continue;
            }
        };

        // Fall back to the dump's own file name when the collaborator left
        // the source name blank.
        let source = if dump.source_file.is_empty() {
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string())
        } else {
            dump.source_file.clone()
        };
        if known.contains(&source) {
            info!(%source, "already extracted; skipping");
            continue;
        }

        match extract::extract_record(&dump) {
            Ok(record) => {
                info!(%source, sessions = record.max_session(), "extracted");
                extracted.push(Row::from_record(&record, &source));
            }
            Err(err) => {
                error!(%source, cause = %err, "extraction failed; skipping document");
            }
        }
    }

    if extracted.is_empty() {
        warn!("no new records extracted");
        return Ok(());
    }

    // ─── 6) merge + persist + export ─────────────────────────────────
    let added = extracted.len();
    store.append(extracted);
    store.save()?;
    store.export_parquet(&export_path)?;
    info!(
        added,
        total = store.rows().len(),
        export = %export_path.display(),
        "dataset updated"
    );

    Ok(())
}
