//! Webhook constants.

/// GitHub event header.
pub const GITHUB_EVENT_HEADER: &str = "X-GitHub-Event";
/// GitHub signature header.
pub const GITHUB_SIGNATURE_HEADER: &str = "X-Hub-Signature";
/// Raw content root URL.
pub const RAW_CONTENT_ROOT_URL: &str = "https://raw.githubusercontent.com";
/// Message sent back when the signature check fails.
pub const SIGNATURE_MISMATCH_MESSAGE: &str =
    "Correct signature was not provided. Check the SECRET in your repository Webhook settings.";
