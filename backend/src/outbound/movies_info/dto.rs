//! DTOs for decoding movie-info service JSON payloads.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::MovieInfo;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MovieInfoDto {
    pub(super) movie_info_id: Option<String>,
    pub(super) name: String,
    pub(super) year: u32,
    #[serde(default)]
    pub(super) cast: Option<Vec<String>>,
    #[serde(default)]
    pub(super) release_date: Option<NaiveDate>,
}

impl MovieInfoDto {
    /// Map into the domain record, falling back to the requested identifier
    /// when the payload omits its own.
    pub(super) fn into_domain(self, requested_id: &str) -> MovieInfo {
        MovieInfo {
            movie_info_id: self
                .movie_info_id
                .unwrap_or_else(|| requested_id.to_owned()),
            name: self.name,
            year: self.year,
            cast: self.cast.unwrap_or_default(),
            release_date: self.release_date,
        }
    }
}
