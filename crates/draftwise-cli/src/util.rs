use std::{
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::Utc;
use draftwise_analysis::metrics::PrecomputedDraftMetrics;
use draftwise_engine::DraftSession;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        tracing::debug!(output = %output.display_path(), "JSON written");
        Ok(())
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads an optional configuration file, falling back to the defaults.
pub fn read_config_file<T>(file_kind: &str, path: Option<&Path>) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    match path {
        Some(path) => read_json_file(file_kind, path),
        None => Ok(T::default()),
    }
}

/// Reads a metrics bundle, migrating older schema versions.
pub fn read_metrics_file<P>(path: P) -> anyhow::Result<PrecomputedDraftMetrics>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read metrics file: {}", path.display()))?;
    let metrics = PrecomputedDraftMetrics::from_json_str(&json)
        .with_context(|| format!("Failed to load metrics file: {}", path.display()))?;
    tracing::info!(
        dataset_id = %metrics.dataset_id,
        age_days = (Utc::now() - metrics.generated_at).num_days(),
        champion_roles = metrics.champion_roles.len(),
        "metrics loaded"
    );
    Ok(metrics)
}

/// Reads a draft script and replays it into a session.
pub fn read_draft_file<P>(path: P) -> anyhow::Result<DraftSession>
where
    P: AsRef<Path>,
{
    let script: draftwise_engine::DraftScript = read_json_file("draft", path)?;
    let session = script.replay();
    tracing::debug!(
        bans = session.bans().len(),
        turn = ?session.current_turn(),
        finished = session.is_finished(),
        "draft replayed"
    );
    Ok(session)
}
