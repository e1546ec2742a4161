use std::path::Path;

use crate::config::Endpoints;
use crate::errors::FetchError;
use crate::scrape;
use crate::utils::download::Fetcher;
use crate::utils::extract;

/// Fetches the newest successful V8 integration build and unpacks it as-is.
///
/// The artifact is not wrapped in a versioned folder, so nothing is flattened.
/// Returns the artifact URL.
pub fn execute(
    fetcher: &Fetcher,
    endpoints: &Endpoints,
    extract_dir: &Path,
) -> Result<String, FetchError> {
    let build_url = scrape::find_latest_success_build_url(fetcher, endpoints)?;
    fetcher.log(&format!("Latest successful build: {}", build_url));

    let zip_url = scrape::find_artifact_zip_url(fetcher, endpoints, &build_url)?;
    let archive = fetcher.fetch_bytes(&zip_url)?;

    fetcher.log(&format!("Extracting into {}", extract_dir.display()));
    extract::unpack_zip(&archive, extract_dir)?;
    // zip entries carry no usable mode bits here
    extract::mark_executable(&extract_dir.join("bin"))?;

    Ok(zip_url)
}
