//! Region extraction from identity pool ids.
//!
//! Identity ids look like `us-east-1:4fe7b1c2-...`. The part before the first
//! `:` is the region the temporary credentials are scoped to.

use cloudsign_core::{Error, Result};
use log::debug;

/// Parse the region out of an identity id.
///
/// Returns a `ConfigInvalid` error when the id has no `:` delimiter or the
/// region before it is empty.
pub fn parse_region_from_identity_id(identity_id: &str) -> Result<String> {
    let Some((region, _)) = identity_id.split_once(':') else {
        return Err(Error::config_invalid(format!(
            "identity id {identity_id:?} has no region delimiter ':'"
        )));
    };

    if region.is_empty() {
        return Err(Error::config_invalid(format!(
            "identity id {identity_id:?} has an empty region"
        )));
    }

    debug!("parsed region {region} from identity id");
    Ok(region.to_string())
}
