use crate::errors::ApiError;
use crate::models::Match;
use std::path::Path;

pub async fn create_directory_unless_exists(path: &Path) -> Result<(), ApiError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| ApiError::Io(format!("failed to create {}: {e}", path.display())))
}

pub async fn file_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

fn sanitize(part: &str) -> String {
    part.chars().map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' }).collect()
}

/// A stable, filesystem-safe replay file name for a match.
#[must_use]
pub fn format_replay_name(m: &Match) -> String {
    let date = m
        .timestamp
        .map_or_else(|| "unknown-date".to_string(), |t| t.format("%Y-%m-%d_%H-%M-%S").to_string());
    let this_player = m.this_player().map_or("unknown", |p| p.toon.as_str());
    let opponent = m.opponent().map_or("unknown", |p| p.toon.as_str());
    format!(
        "{date}_{}_vs_{}_{}.rep",
        sanitize(this_player),
        sanitize(opponent),
        sanitize(&m.map.display_name)
    )
}

/// Downloads `url` into `dir/name`, creating the directory as needed.
pub async fn download_into_directory(
    client: &reqwest::Client,
    url: &str,
    dir: &Path,
    name: &str,
) -> Result<(), ApiError> {
    create_directory_unless_exists(dir).await?;
    let bytes = client.get(url).send().await?.bytes().await?;
    let target = dir.join(name);
    tokio::fs::write(&target, &bytes)
        .await
        .map_err(|e| ApiError::Io(format!("failed to write {}: {e}", target.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_names_filesystem_safe() {
        assert_eq!(sanitize("By.Sun]"), "By_Sun_");
        assert_eq!(sanitize("Fighting-Spirit"), "Fighting-Spirit");
    }

    #[tokio::test]
    async fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        create_directory_unless_exists(&nested).await.unwrap();
        assert!(file_exists(&nested).await);
        // A second call on an existing directory is a no-op.
        create_directory_unless_exists(&nested).await.unwrap();
    }
}
