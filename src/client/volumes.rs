//! Volume management methods.
//!
//! A volume is a server-side storage unit addressed by path and name,
//! attached to the key namespace at a mount point. The server resolves
//! relative volume paths against its own configured default directory.

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::identifiers::VolumeId;
use crate::protocol::{Command, VolumeCommand, VolumeInfo};

use super::ConsoleClient;

// ============================================================================
// Response Payloads
// ============================================================================

/// Result shape of `create_and_mount_volume` / `mount_volume`.
#[derive(Debug, Deserialize)]
struct VolumeMounted {
    #[serde(rename = "volumeId")]
    volume_id: VolumeId,
}

// ============================================================================
// ConsoleClient - Volumes
// ============================================================================

impl ConsoleClient {
    /// Lists the currently mounted volumes.
    pub async fn get_volumes_list(&self) -> Result<Vec<VolumeInfo>> {
        debug!("Listing mounted volumes");

        let response = self
            .send_command(Command::Volume(VolumeCommand::GetVolumesList {}))
            .await?;
        let volumes: Vec<VolumeInfo> = serde_json::from_value(response.into_result()?)?;

        debug!(count = volumes.len(), "Got volumes list");
        Ok(volumes)
    }

    /// Creates a new volume and mounts it at `mount_point_path`.
    ///
    /// Returns the handle needed to unmount it later.
    pub async fn create_and_mount_volume(
        &self,
        volume_path: impl Into<String>,
        volume_name: impl Into<String>,
        mount_point_path: impl Into<String>,
    ) -> Result<VolumeId> {
        let volume_path = volume_path.into();
        let volume_name = volume_name.into();
        let mount_point_path = mount_point_path.into();

        debug!(
            volume_path = %volume_path,
            volume_name = %volume_name,
            mount_point_path = %mount_point_path,
            "Creating and mounting volume"
        );

        let response = self
            .send_command(Command::Volume(VolumeCommand::CreateAndMountVolume {
                volume_path,
                volume_name,
                mount_point_path,
            }))
            .await?;
        let mounted: VolumeMounted = serde_json::from_value(response.into_result()?)?;

        debug!(volume_id = %mounted.volume_id, "Volume created and mounted");
        Ok(mounted.volume_id)
    }

    /// Mounts an existing volume at `mount_point_path`.
    ///
    /// Returns the handle needed to unmount it later.
    pub async fn mount_volume(
        &self,
        volume_path: impl Into<String>,
        volume_name: impl Into<String>,
        mount_point_path: impl Into<String>,
    ) -> Result<VolumeId> {
        let volume_path = volume_path.into();
        let volume_name = volume_name.into();
        let mount_point_path = mount_point_path.into();

        debug!(
            volume_path = %volume_path,
            volume_name = %volume_name,
            mount_point_path = %mount_point_path,
            "Mounting volume"
        );

        let response = self
            .send_command(Command::Volume(VolumeCommand::MountVolume {
                volume_path,
                volume_name,
                mount_point_path,
            }))
            .await?;
        let mounted: VolumeMounted = serde_json::from_value(response.into_result()?)?;

        debug!(volume_id = %mounted.volume_id, "Volume mounted");
        Ok(mounted.volume_id)
    }

    /// Unmounts a mounted volume.
    pub async fn unmount_volume(&self, volume_id: VolumeId) -> Result<()> {
        debug!(volume_id = %volume_id, "Unmounting volume");

        self.send_command(Command::Volume(VolumeCommand::UnmountVolume { volume_id }))
            .await?
            .into_result()?;
        Ok(())
    }
}
