//! Change application onto a local folder.

use std::{
    fmt,
    io::{ErrorKind, Write},
    path::{Component, Path, PathBuf},
};

use ghsync_transfer_interface::{DownloadRequest, TransferService};
use tracing::{info, warn};

use crate::{
    changes::ChangeKind,
    comment::apply_comment,
    handler::{ActivePush, PushHandler},
    utils::write_line,
    CoreError, Result,
};

/// Outcome counters of a sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub downloaded: usize,
    pub deleted: usize,
    /// Removed files already missing locally.
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} downloaded, {} deleted, {} skipped, {} failed",
            self.downloaded, self.deleted, self.skipped, self.failed
        )
    }
}

enum ChangeOutcome {
    Downloaded,
    Deleted,
    Skipped,
}

impl PushHandler {
    /// Replicate visible changes into `target_folder`.
    ///
    /// Changes are applied one after the other. A failing change is logged
    /// and counted, and the next one is processed.
    pub async fn push_changes_to_folder(
        &self,
        target_folder: &str,
        transfer_service: &dyn TransferService,
        sink: &mut (dyn Write + Send),
    ) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        let Some(push) = self.as_active() else {
            return Ok(report);
        };

        for (local_path, kind) in push.visible_changes() {
            let target_path = format!("{target_folder}/{local_path}");
            match push
                .push_change(local_path, kind, &target_path, transfer_service, sink)
                .await
            {
                Ok(ChangeOutcome::Downloaded) => report.downloaded += 1,
                Ok(ChangeOutcome::Deleted) => report.deleted += 1,
                Ok(ChangeOutcome::Skipped) => report.skipped += 1,
                Err(e @ CoreError::Output { .. }) => return Err(e),
                Err(e) => {
                    warn!(path = %target_path, error = %e, message = "Could not apply change");
                    write_line(sink, format_args!("Failed: {e}"))?;
                    report.failed += 1;
                }
            }
        }

        info!(
            repository = %push.repository_full_name,
            branch = %push.branch_name,
            target = %target_folder,
            downloaded = report.downloaded,
            deleted = report.deleted,
            skipped = report.skipped,
            failed = report.failed,
            message = "Sync done"
        );
        write_line(sink, format_args!("Done: {report}"))?;

        Ok(report)
    }
}

impl ActivePush {
    async fn push_change(
        &self,
        local_path: &str,
        kind: ChangeKind,
        target_path: &str,
        transfer_service: &dyn TransferService,
        sink: &mut (dyn Write + Send),
    ) -> Result<ChangeOutcome> {
        if !is_relative_inside(local_path) {
            return Err(CoreError::UnsafePath {
                path: local_path.into(),
            });
        }

        let target = PathBuf::from(target_path);

        if kind == ChangeKind::Removed {
            write_line(sink, format_args!("Deleting {target_path}"))?;
            if self.dry_run {
                return Ok(if tokio::fs::try_exists(&target).await.unwrap_or(false) {
                    ChangeOutcome::Deleted
                } else {
                    ChangeOutcome::Skipped
                });
            }

            return match tokio::fs::remove_file(&target).await {
                Ok(()) => Ok(ChangeOutcome::Deleted),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!(path = %target_path, message = "File to delete is already missing");
                    Ok(ChangeOutcome::Skipped)
                }
                Err(e) => Err(CoreError::Io {
                    path: target,
                    source: e,
                }),
            };
        }

        let url = self.source_url(local_path);
        write_line(sink, format_args!("Downloading {url} to {target_path}"))?;

        if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
            ensure_directory(dir, self.dry_run, sink).await?;
        }

        transfer_service
            .download_to_file(DownloadRequest {
                url,
                credentials: self.credentials.clone(),
                destination: target.clone(),
            })
            .await?;

        if let (Some(comment), false) = (&self.comment, self.dry_run) {
            if let Some(style) = apply_comment(&target, comment).await? {
                write_line(sink, format_args!("Added {} comment", style.label()))?;
            }
        }

        Ok(ChangeOutcome::Downloaded)
    }
}

/// Relative path made of plain names only.
fn is_relative_inside(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

async fn ensure_directory(
    dir: &Path,
    dry_run: bool,
    sink: &mut (dyn Write + Send),
) -> Result<()> {
    if tokio::fs::try_exists(dir).await.unwrap_or(false) {
        return Ok(());
    }

    write_line(
        sink,
        format_args!("    But first: creating directory {}!", dir.display()),
    )?;
    if dry_run {
        return Ok(());
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| CoreError::Io {
            path: dir.to_path_buf(),
            source: e,
        })
}
