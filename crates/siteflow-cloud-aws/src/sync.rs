//! Folder to bucket synchronization
//!
//! Declares one [`BucketObject`] per file of a local directory. Nothing is
//! uploaded here; the engine reads each [`FileAsset`] when it applies the stack.

use crate::error::Result;
use crate::resources::{BucketObject, FileAsset};
use siteflow_cloud::{ResourceHandle, Stack};
use siteflow_core::{FileEntry, FileListOptions};
use siteflow_core::path::{normalize_s3_prefix, strip_leading_slash, strip_trailing_slash};
use tracing::{debug, instrument};

/// Declare an upload for every file under `dir`, keyed under `key_prefix`
///
/// Returns the handles of the declared objects in sorted file order.
pub fn folder_to_s3(
    stack: &mut Stack,
    dir: &str,
    bucket: &ResourceHandle,
    key_prefix: &str,
) -> Result<Vec<ResourceHandle>> {
    folder_to_s3_with(stack, dir, bucket, key_prefix, &FileListOptions::default())
}

/// [`folder_to_s3`] with explicit include/exclude options
#[instrument(skip(stack, bucket, options), fields(bucket = %bucket.key()))]
pub fn folder_to_s3_with(
    stack: &mut Stack,
    dir: &str,
    bucket: &ResourceHandle,
    key_prefix: &str,
    options: &FileListOptions,
) -> Result<Vec<ResourceHandle>> {
    let entries = object_entries(dir, key_prefix, options)?;

    let mut handles = Vec::with_capacity(entries.len());
    for entry in entries {
        let object = BucketObject {
            bucket: bucket.output("id").into(),
            key: entry.key.clone(),
            content_type: content_type(&entry.path),
            source: FileAsset::new(entry.path),
        };
        handles.push(stack.declare_resource(&object.key, &object)?);
    }

    debug!(files = handles.len(), "Declared bucket objects");
    Ok(handles)
}

/// Files under `dir` paired with their object keys under `key_prefix`
///
/// Keys never start with `/`; an empty prefix keys files from the bucket root.
pub fn object_entries(
    dir: &str,
    key_prefix: &str,
    options: &FileListOptions,
) -> Result<Vec<FileEntry>> {
    let key_base = strip_trailing_slash(&normalize_s3_prefix(key_prefix));
    let entries = siteflow_core::remap_path_to_s3_with(dir, &key_base, options)?
        .into_iter()
        .map(|entry| FileEntry {
            key: strip_leading_slash(&entry.key),
            path: entry.path,
        })
        .collect();
    Ok(entries)
}

/// MIME type guessed from the file extension
pub fn content_type(path: &str) -> Option<String> {
    mime_guess::from_path(path)
        .first_raw()
        .map(|mime| mime.to_string())
}
