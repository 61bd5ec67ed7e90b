//! Rolling-upgrade compatibility
//!
//! Releases up to 3.4 forward a regrouped update that keeps its key as a
//! removal followed by an addition. While instances of such a release are
//! still running, newer instances must do the same.

use regroup_core::{StreamsConfig, UpgradeFrom};

/// Whether same-key regroupings are forwarded as one combined update
///
/// Computed once per processor at initialization. An absent or unrecognized
/// `upgrade.from` marker enables merging.
#[must_use]
pub fn merge_mode_enabled(config: &StreamsConfig) -> bool {
    let Some(marker) = config.upgrade_from() else {
        return true;
    };

    match marker.parse::<UpgradeFrom>() {
        Ok(release) => !release.is_pre_merge(),
        Err(_) => {
            tracing::warn!(marker, "unrecognized upgrade.from marker, merging same-key updates");
            true
        }
    }
}
