//! Push handler.

use std::{io::Write, sync::Arc};

use ghsync_config::{Config, TransferDriver};
use ghsync_transfer_interface::Credentials;
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    changes::{ChangeKind, ChangeRecord, ChangeSet},
    constants::RAW_CONTENT_ROOT_URL,
    types::GhCommit,
    utils::write_line,
    Result,
};

/// Handles one push event.
///
/// Configuration methods consume the handler and return the configured
/// one. An inactive handler ignores every operation.
#[derive(Debug, Clone)]
pub enum PushHandler {
    Active(ActivePush),
    Inactive,
}

/// State of an active push handler.
#[derive(Debug, Clone)]
pub struct ActivePush {
    pub(crate) branch_name: String,
    pub(crate) repository_full_name: String,
    pub(crate) changes: Arc<ChangeSet>,
    pub(crate) folder: Option<String>,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) comment: Option<String>,
    pub(crate) raw_root_url: String,
    pub(crate) dry_run: bool,
}

impl PushHandler {
    /// Build a handler from a commit list.
    ///
    /// Without commits, the handler is inactive.
    pub fn new(branch_name: &str, repository_full_name: &str, commits: Option<&[GhCommit]>) -> Self {
        match commits {
            Some(commits) => Self::Active(ActivePush {
                branch_name: branch_name.into(),
                repository_full_name: repository_full_name.into(),
                changes: Arc::new(ChangeSet::from_commits(commits)),
                folder: None,
                credentials: None,
                comment: None,
                raw_root_url: RAW_CONTENT_ROOT_URL.into(),
                dry_run: false,
            }),
            None => Self::Inactive,
        }
    }

    pub fn inactive() -> Self {
        Self::Inactive
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Restrict changes to a repository folder.
    ///
    /// A handler already scoped to a folder is replaced by a new one scoped
    /// to the requested folder only: the comment is dropped, credentials are
    /// kept. An empty name removes the scope.
    pub fn for_changes_in_folder<T: Into<String>>(self, folder_name: T) -> Self {
        let push = match self {
            Self::Active(push) => push,
            Self::Inactive => return Self::Inactive,
        };

        let folder = Some(folder_name.into()).filter(|f| !f.is_empty());
        if let Some(previous) = &push.folder {
            debug!(previous = %previous, folder = ?folder, message = "Replacing folder scope");
            Self::Active(ActivePush {
                folder,
                comment: None,
                ..push
            })
        } else {
            Self::Active(ActivePush { folder, ..push })
        }
    }

    /// Set credentials used for raw downloads.
    pub fn set_github_credentials(self, username: &str, password: &str) -> Self {
        self.map_active(|push| ActivePush {
            credentials: Some(Credentials::new(username, password)),
            ..push
        })
    }

    /// Set a comment to inject into downloaded files when possible.
    pub fn set_comment<T: Into<String>>(self, comment: T) -> Self {
        let comment = Some(comment.into()).filter(|c| !c.is_empty());
        self.map_active(|push| ActivePush { comment, ..push })
    }

    /// Override the raw content root URL.
    pub fn set_raw_root_url<T: Into<String>>(self, url: T) -> Self {
        let url = url.into().trim_end_matches('/').to_string();
        self.map_active(|push| ActivePush {
            raw_root_url: url,
            ..push
        })
    }

    /// Report changes without touching the target folder.
    ///
    /// Downloads still go through the transfer service.
    pub fn set_dry_run(self, dry_run: bool) -> Self {
        self.map_active(|push| ActivePush { dry_run, ..push })
    }

    /// Apply folder, comment, credentials and raw root URL from configuration.
    ///
    /// The `null` transfer driver turns on dry runs.
    pub fn apply_config(self, config: &Config) -> Self {
        let sync = &config.sync;
        let handler = self
            .for_changes_in_folder(sync.folder.as_str())
            .set_comment(sync.comment.as_str())
            .set_raw_root_url(config.transfer.raw_root_url.as_str())
            .set_dry_run(config.transfer.driver == TransferDriver::Null);

        if sync.github_username.is_empty() {
            handler
        } else {
            handler.set_github_credentials(&sync.github_username, &sync.github_password)
        }
    }

    fn map_active<F: FnOnce(ActivePush) -> ActivePush>(self, f: F) -> Self {
        match self {
            Self::Active(push) => Self::Active(f(push)),
            Self::Inactive => Self::Inactive,
        }
    }

    pub(crate) fn as_active(&self) -> Option<&ActivePush> {
        match self {
            Self::Active(push) => Some(push),
            Self::Inactive => None,
        }
    }

    pub fn folder(&self) -> Option<&str> {
        self.as_active().and_then(|p| p.folder.as_deref())
    }

    /// Visible changes, recomputed from the full change set on each call.
    pub fn changes(&self) -> Vec<ChangeRecord> {
        let mut records = vec![];
        self.invoke_for_each_change(|path, kind| records.push(ChangeRecord::new(path, kind)));
        records
    }

    /// Call `callback` once per visible change.
    pub fn invoke_for_each_change<F: FnMut(&str, ChangeKind)>(&self, mut callback: F) {
        if let Some(push) = self.as_active() {
            for (path, kind) in push.visible_changes() {
                callback(path, kind);
            }
        }
    }

    /// Call `callback` once with every visible change.
    pub fn invoke_with_changes<F: FnOnce(&IndexMap<String, ChangeKind>)>(&self, callback: F) {
        if let Some(push) = self.as_active() {
            let changes = push
                .visible_changes()
                .map(|(path, kind)| (path.to_string(), kind))
                .collect();
            callback(&changes);
        }
    }

    /// Write one `<path>: <kind>` line per visible change.
    pub fn list_changes(&self, sink: &mut dyn Write) -> Result<()> {
        if let Some(push) = self.as_active() {
            for (path, kind) in push.visible_changes() {
                write_line(sink, format_args!("{path}: {kind}"))?;
            }
        }

        Ok(())
    }
}

impl ActivePush {
    pub(crate) fn visible_changes(&self) -> impl Iterator<Item = (&str, ChangeKind)> {
        self.changes.in_folder(self.folder.as_deref())
    }

    /// Raw content URL of a visible path.
    pub(crate) fn source_url(&self, local_path: &str) -> String {
        let mut url = format!(
            "{}/{}/{}/",
            self.raw_root_url, self.repository_full_name, self.branch_name
        );
        if let Some(folder) = &self.folder {
            url.push_str(folder);
            url.push('/');
        }
        url.push_str(local_path);
        url
    }
}

#[cfg(test)]
mod tests {
    use ghsync_config::{Config, TransferDriver};
    use pretty_assertions::assert_eq;

    use super::PushHandler;
    use crate::{
        changes::{ChangeKind, ChangeRecord},
        types::GhCommit,
    };

    fn commits() -> Vec<GhCommit> {
        vec![
            GhCommit {
                added: vec!["a/one.txt".into(), "b/two.txt".into(), "root.txt".into()],
                modified: vec![],
                removed: vec![],
            },
            GhCommit {
                added: vec![],
                modified: vec!["a/sub/three.txt".into()],
                removed: vec!["b/old.txt".into()],
            },
        ]
    }

    fn handler() -> PushHandler {
        PushHandler::new("main", "acme/site", Some(&commits()))
    }

    #[test]
    fn test_unscoped_changes() {
        assert_eq!(handler().changes().len(), 5);
    }

    #[test]
    fn test_scoped_changes() {
        assert_eq!(
            handler().for_changes_in_folder("a").changes(),
            vec![
                ChangeRecord::new("one.txt", ChangeKind::Added),
                ChangeRecord::new("sub/three.txt", ChangeKind::Modified),
            ]
        );
    }

    #[test]
    fn test_rescoping_never_unions() {
        let handler = handler()
            .set_comment("hello")
            .set_github_credentials("octocat", "hunter2")
            .for_changes_in_folder("a")
            .for_changes_in_folder("b");

        assert!(handler.is_active());
        assert_eq!(handler.folder(), Some("b"));
        assert_eq!(
            handler.changes(),
            vec![
                ChangeRecord::new("two.txt", ChangeKind::Added),
                ChangeRecord::new("old.txt", ChangeKind::Removed),
            ]
        );

        let push = handler.as_active().unwrap();
        assert!(push.credentials.is_some());
        assert_eq!(push.comment, None);
    }

    #[test]
    fn test_first_scope_keeps_comment() {
        let handler = handler().set_comment("hello").for_changes_in_folder("a");
        assert_eq!(handler.as_active().unwrap().comment.as_deref(), Some("hello"));
    }

    #[test]
    fn test_inactive_handler_is_inert() {
        let handler = PushHandler::new("main", "acme/site", None)
            .for_changes_in_folder("a")
            .set_comment("hello");

        assert!(!handler.is_active());
        assert!(handler.changes().is_empty());

        let mut called = false;
        handler.invoke_with_changes(|_| called = true);
        assert!(!called);

        let mut output: Vec<u8> = vec![];
        handler.list_changes(&mut output).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_invoke_with_changes() {
        let mut seen = vec![];
        handler().for_changes_in_folder("b").invoke_with_changes(|changes| {
            seen = changes.iter().map(|(p, k)| (p.clone(), *k)).collect();
        });

        assert_eq!(
            seen,
            vec![
                ("two.txt".to_string(), ChangeKind::Added),
                ("old.txt".to_string(), ChangeKind::Removed),
            ]
        );
    }

    #[test]
    fn test_list_changes() {
        let mut output: Vec<u8> = vec![];
        handler()
            .for_changes_in_folder("a")
            .list_changes(&mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "one.txt: added\r\nsub/three.txt: modified\r\n"
        );
    }

    #[test]
    fn test_apply_config() {
        let mut config = Config::from_env_no_version().unwrap();
        config.sync.folder = "a".into();
        config.sync.comment = "synced".into();
        config.sync.github_username = "octocat".into();
        config.sync.github_password = "hunter2".into();
        config.transfer.raw_root_url = "http://localhost:8000".into();

        let handler = handler().apply_config(&config);
        let push = handler.as_active().unwrap();
        assert_eq!(push.folder.as_deref(), Some("a"));
        assert_eq!(push.comment.as_deref(), Some("synced"));
        assert_eq!(
            push.credentials.as_ref().unwrap().to_user_password(),
            "octocat:hunter2"
        );
        assert_eq!(
            push.source_url("one.txt"),
            "http://localhost:8000/acme/site/main/a/one.txt"
        );
    }

    #[test]
    fn test_null_driver_means_dry_run() {
        let mut config = Config::from_env_no_version().unwrap();
        config.transfer.driver = TransferDriver::Http;
        assert!(!handler().apply_config(&config).as_active().unwrap().dry_run);

        config.transfer.driver = TransferDriver::Null;
        let handler = handler().apply_config(&config).for_changes_in_folder("a");
        assert!(handler.as_active().unwrap().dry_run);
    }

    #[test]
    fn test_source_url() {
        let handler = handler().for_changes_in_folder("a");
        assert_eq!(
            handler.as_active().unwrap().source_url("sub/three.txt"),
            "https://raw.githubusercontent.com/acme/site/main/a/sub/three.txt"
        );

        let handler = handler.set_raw_root_url("http://localhost:8000/");
        assert_eq!(
            handler.as_active().unwrap().source_url("one.txt"),
            "http://localhost:8000/acme/site/main/a/one.txt"
        );
    }
}
