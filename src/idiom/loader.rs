use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures::StreamExt;
use thiserror::Error;

use super::{Idiom, IdiomCatalog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(reqwest::Url),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub fetch_timeout: Duration,
    pub max_bytes: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(30),
            max_bytes: 32 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid dataset url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("http client error: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to fetch dataset: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("dataset request returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("dataset exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("malformed dataset json: {0}")]
    Json(#[from] serde_json::Error),
}

impl DatasetSource {
    /// `http://` 与 `https://` 开头视为远程地址，其余按本地文件路径处理
    pub fn parse(raw: &str) -> Result<Self, LoadError> {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = reqwest::Url::parse(trimmed).map_err(|source| LoadError::InvalidUrl {
                url: trimmed.to_string(),
                source,
            })?;
            Ok(Self::Url(url))
        } else {
            Ok(Self::File(PathBuf::from(trimmed)))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // 查询串里可能带签名参数，日志中只输出 host 与 path
            Self::Url(url) => write!(
                f,
                "{}://{}{}",
                url.scheme(),
                url.host_str().unwrap_or(""),
                url.path()
            ),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub async fn load_catalog(
    source: &DatasetSource,
    options: &LoadOptions,
) -> Result<IdiomCatalog, LoadError> {
    let start = Instant::now();
    let bytes = read_source(source, options).await?;
    let records = parse_records(&bytes)?;
    let (catalog, stats) = IdiomCatalog::build(records);

    if catalog.is_empty() {
        tracing::warn!(source = %source, "Idiom dataset is empty");
    }
    if stats.skipped_empty > 0 {
        tracing::warn!(skipped = stats.skipped_empty, "Skipped idiom records without word");
    }
    tracing::info!(
        source = %source,
        records = stats.records,
        idioms = catalog.len(),
        duplicates = stats.duplicates,
        bytes = bytes.len(),
        elapsed_ms = %start.elapsed().as_millis(),
        "Idiom dataset loaded"
    );

    Ok(catalog)
}

pub fn parse_records(bytes: &[u8]) -> Result<Vec<Idiom>, LoadError> {
    Ok(serde_json::from_slice::<Vec<Idiom>>(bytes)?)
}

async fn read_source(source: &DatasetSource, options: &LoadOptions) -> Result<Vec<u8>, LoadError> {
    match source {
        DatasetSource::Url(url) => fetch_url(url, options).await,
        DatasetSource::File(path) => read_file(path, options.max_bytes).await,
    }
}

async fn read_file(path: &Path, max_bytes: usize) -> Result<Vec<u8>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let meta = tokio::fs::metadata(path).await.map_err(io_err)?;
    if meta.len() > max_bytes as u64 {
        return Err(LoadError::TooLarge { limit: max_bytes });
    }
    tokio::fs::read(path).await.map_err(io_err)
}

async fn fetch_url(url: &reqwest::Url, options: &LoadOptions) -> Result<Vec<u8>, LoadError> {
    let client = reqwest::Client::builder()
        .timeout(options.fetch_timeout)
        .build()
        .map_err(LoadError::Client)?;

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(LoadError::Fetch)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status));
    }

    if let Some(len) = response.content_length() {
        if len > options.max_bytes as u64 {
            return Err(LoadError::TooLarge {
                limit: options.max_bytes,
            });
        }
    }

    // 流式读取，逐块检查大小
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(LoadError::Fetch)?;
        body.extend_from_slice(&chunk);
        if body.len() > options.max_bytes {
            return Err(LoadError::TooLarge {
                limit: options.max_bytes,
            });
        }
    }

    Ok(body)
}
