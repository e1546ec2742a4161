use std::path::Path;

use crate::config::{Endpoints, Query};
use crate::errors::FetchError;
use crate::index;
use crate::utils::download::Fetcher;
use crate::utils::{extract, Release};

/// Resolves `query` against its channel index, downloads the archive and unpacks it
/// so that `extract_dir` directly holds `bin/`, `lib/` and the rest.
pub fn execute(
    fetcher: &Fetcher,
    endpoints: &Endpoints,
    query: &Query,
    extract_dir: &Path,
) -> Result<Release, FetchError> {
    let entries = index::fetch_index(fetcher, endpoints, &query.channel)?;
    fetcher.log(&format!(
        "{} versions listed in channel '{}'",
        entries.len(),
        query.channel
    ));

    let version = index::select_version(&entries, query.platform, &query.version_prefix)
        .ok_or_else(|| {
            FetchError::not_found(format!(
                "no {} build in channel '{}' matches version prefix '{}'",
                query.platform, query.channel, query.version_prefix
            ))
        })?;
    let release = Release::new(query.channel.as_str(), query.platform, version);
    fetcher.log(&format!("Selected Node.js {}", release.version));

    let download_url = release.archive_url(&endpoints.dist_base);
    let archive = fetcher.fetch_bytes(&download_url)?;

    fetcher.log(&format!("Extracting into {}", extract_dir.display()));
    extract::unpack(release.platform.archive_kind(), &archive, extract_dir)?;
    extract::flatten(extract_dir, &release.folder_name())?;

    fetcher.log(&format!(
        "Installed Node.js {} ({}) into {}",
        release.version,
        release.platform,
        extract_dir.display()
    ));

    Ok(release)
}
