//! Identifier acquisition.
//!
//! Identifiers come either from the list service (one list per category,
//! fetched through the configured transport) or from a local file / stdin.

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use crate::config::Category;
use crate::error_handling::TransportError;
use crate::transport::{fetch_text, Transport};

/// Query URL for one category on the list service.
///
/// # Errors
///
/// Returns `TransportError::InvalidUrl` if `list_url` is not a valid base URL.
pub fn list_query_url(list_url: &str, category: Category) -> Result<Url, TransportError> {
    Url::parse_with_params(list_url, &[("type", category.as_str()), ("down", "false")]).map_err(
        |source| TransportError::InvalidUrl {
            url: list_url.to_string(),
            source,
        },
    )
}

/// Extracts identifiers from a list service response.
///
/// One identifier per line; blank lines and `【...】` headings are dropped.
pub fn parse_identifier_list(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('【'))
        .map(str::to_string)
        .collect()
}

/// Fetches the identifier list of `category`.
///
/// # Errors
///
/// Any transport failure is returned unchanged; list fetches are not retried.
pub async fn fetch_category(
    client: &reqwest::Client,
    transport: &Transport,
    list_url: &str,
    category: Category,
) -> Result<Vec<String>, TransportError> {
    let url = list_query_url(list_url, category)?;
    let body = fetch_text(client, url.as_str(), transport).await?;
    let identifiers = parse_identifier_list(&body);
    debug!(
        "Fetched {} identifiers for category {}",
        identifiers.len(),
        category.as_str()
    );
    Ok(identifiers)
}

/// Reads identifiers from `path`, or from stdin when `path` is `-`.
///
/// Blank lines and `#` comments are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub async fn read_identifier_file(path: &Path) -> Result<Vec<String>> {
    let mut identifiers = Vec::new();

    if path.as_os_str() == "-" {
        info!("Reading identifiers from stdin");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
            push_identifier(&mut identifiers, &line);
        }
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        let mut lines = BufReader::new(file).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .with_context(|| format!("Failed to read input file {}", path.display()))?
        {
            push_identifier(&mut identifiers, &line);
        }
    }

    info!("Read {} identifiers from {}", identifiers.len(), path.display());
    Ok(identifiers)
}

fn push_identifier(identifiers: &mut Vec<String>, line: &str) {
    let trimmed = line.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('#') {
        identifiers.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_list_query_url() {
        let url = list_query_url("https://ipdb.api.030101.xyz/", Category::BestProxy).unwrap();
        assert_eq!(
            url.as_str(),
            "https://ipdb.api.030101.xyz/?type=bestproxy&down=false"
        );
    }

    #[test]
    fn test_list_query_url_rejects_relative_base() {
        assert!(matches!(
            list_query_url("not-a-base", Category::CfV4),
            Err(TransportError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_parse_identifier_list_skips_headings() {
        let body = "【bestcf】\n104.16.1.1\n\n  104.16.1.2  \r\n";
        assert_eq!(
            parse_identifier_list(body),
            vec!["104.16.1.1".to_string(), "104.16.1.2".to_string()]
        );
    }

    #[tokio::test]
    async fn test_read_identifier_file_skips_comments() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "# header").unwrap();
        writeln!(file, "1.1.1.1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  8.8.8.8  ").unwrap();
        file.flush().unwrap();

        let identifiers = read_identifier_file(file.path()).await.unwrap();
        assert_eq!(identifiers, vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()]);
    }

    #[tokio::test]
    async fn test_read_identifier_file_missing() {
        let result = read_identifier_file(Path::new("/nonexistent/ip_enrich/input.txt")).await;
        assert!(result.is_err());
    }
}
