use serde::{Deserialize, Serialize};

/// One entry of the remote clip catalog.
///
/// `key` is the stable identifier the resolution endpoint expects; the
/// display `name` is what the list shows.  `size` may be absent in the
/// listing, in which case it is reported as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipEntry {
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub size: u64,
}

/// Wire shape of the listing endpoint.
///
/// The `videos` field may be missing entirely; that is a valid empty
/// catalog, not a malformed payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub videos: Option<Vec<ClipEntry>>,
}

impl CatalogResponse {
    /// Flatten into the catalog sequence, preserving server order.
    pub fn into_clips(self) -> Vec<ClipEntry> {
        self.videos.unwrap_or_default()
    }
}

/// Wire shape of the resolution endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveResponse {
    pub url: String,
}
