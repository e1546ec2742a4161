pub mod install;
pub mod v8;

use crate::config::{Endpoints, Settings, Target};
use crate::errors::FetchError;
use crate::utils::download::Fetcher;

pub fn run(settings: &Settings, fetcher: &Fetcher, endpoints: &Endpoints) -> Result<(), FetchError> {
    match &settings.target {
        Target::V8Build => {
            v8::execute(fetcher, endpoints, &settings.destination)?;
        }
        Target::Release(query) => {
            install::execute(fetcher, endpoints, query, &settings.destination)?;
        }
    }

    Ok(())
}
