use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StorageError;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Opaque identifier of a saved whiteboard. Stable across renames and re-saves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WhiteboardId(String);

impl WhiteboardId {
    /// Mint a fresh random identifier
    pub fn new_random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WhiteboardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WhiteboardId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for WhiteboardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything known about a saved board except its content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteboardMeta {
    pub id: WhiteboardId,
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    /// Length of the SVG content in bytes
    pub size_bytes: usize,
}

/// A saved board: metadata plus its SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct WhiteboardRecord {
    pub meta: WhiteboardMeta,
    pub content: String,
}

/// Key/value store for whiteboards.
///
/// Every call may fail; callers report failures and leave their in-memory
/// board untouched.
#[allow(async_fn_in_trait)]
pub trait WhiteboardStore {
    /// Fetch a board's content and metadata
    async fn load(&self, id: &WhiteboardId) -> StorageResult<WhiteboardRecord>;

    /// Store `content` under `id`, or under a freshly minted id when `id` is
    /// `None`. Re-saving keeps the original creation time.
    async fn save(
        &self,
        name: &str,
        content: &str,
        id: Option<&WhiteboardId>,
    ) -> StorageResult<WhiteboardId>;

    /// All saved boards, most recently modified first
    async fn list(&self) -> StorageResult<Vec<WhiteboardMeta>>;

    async fn delete(&self, id: &WhiteboardId) -> StorageResult<()>;

    async fn rename(&self, id: &WhiteboardId, name: &str) -> StorageResult<()>;
}

fn newest_first(list: &mut [WhiteboardMeta]) {
    list.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
}

/// Metadata for a save, keeping `created` from the previous version if any.
fn saved_meta(
    id: WhiteboardId,
    name: &str,
    content: &str,
    previous: Option<&WhiteboardMeta>,
) -> WhiteboardMeta {
    let now = Utc::now();
    WhiteboardMeta {
        id,
        name: name.to_owned(),
        created: previous.map(|meta| meta.created).unwrap_or(now),
        modified: now,
        size_bytes: content.len(),
    }
}

/// In-memory store, shared behind a mutex
#[derive(Debug, Default)]
pub struct MemoryStore {
    boards: Mutex<HashMap<WhiteboardId, WhiteboardRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WhiteboardStore for MemoryStore {
    async fn load(&self, id: &WhiteboardId) -> StorageResult<WhiteboardRecord> {
        self.boards
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.clone()))
    }

    async fn save(
        &self,
        name: &str,
        content: &str,
        id: Option<&WhiteboardId>,
    ) -> StorageResult<WhiteboardId> {
        let id = id.cloned().unwrap_or_else(WhiteboardId::new_random);
        let mut boards = self.boards.lock();
        let meta = saved_meta(id.clone(), name, content, boards.get(&id).map(|r| &r.meta));
        boards.insert(
            id.clone(),
            WhiteboardRecord {
                meta,
                content: content.to_owned(),
            },
        );
        Ok(id)
    }

    async fn list(&self) -> StorageResult<Vec<WhiteboardMeta>> {
        let mut list: Vec<_> = self.boards.lock().values().map(|r| r.meta.clone()).collect();
        newest_first(&mut list);
        Ok(list)
    }

    async fn delete(&self, id: &WhiteboardId) -> StorageResult<()> {
        self.boards
            .lock()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(id.clone()))
    }

    async fn rename(&self, id: &WhiteboardId, name: &str) -> StorageResult<()> {
        let mut boards = self.boards.lock();
        let record = boards
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(id.clone()))?;
        record.meta.name = name.to_owned();
        record.meta.modified = Utc::now();
        Ok(())
    }
}

/// Store that keeps each board as `<id>.svg` plus `<id>.json` metadata in a directory
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    // Ids are minted as UUIDs; anything that could step outside the directory is unknown.
    fn checked(&self, id: &WhiteboardId) -> StorageResult<()> {
        let valid = !id.as_str().is_empty()
            && id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(())
        } else {
            Err(StorageError::NotFound(id.clone()))
        }
    }

    fn content_path(&self, id: &WhiteboardId) -> PathBuf {
        self.dir.join(format!("{}.svg", id))
    }

    fn meta_path(&self, id: &WhiteboardId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn read_meta(&self, id: &WhiteboardId) -> StorageResult<WhiteboardMeta> {
        let json = fs::read_to_string(self.meta_path(id)).map_err(|e| not_found_or(e, id))?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write_meta(&self, meta: &WhiteboardMeta) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(meta)?;
        let path = self.meta_path(&meta.id);
        let staged = path.with_extension("json.tmp");
        fs::write(&staged, json)?;
        fs::rename(&staged, &path)?;
        Ok(())
    }
}

fn not_found_or(error: std::io::Error, id: &WhiteboardId) -> StorageError {
    if error.kind() == ErrorKind::NotFound {
        StorageError::NotFound(id.clone())
    } else {
        StorageError::Io(error)
    }
}

impl WhiteboardStore for DirStore {
    async fn load(&self, id: &WhiteboardId) -> StorageResult<WhiteboardRecord> {
        self.checked(id)?;
        let meta = self.read_meta(id)?;
        let content = fs::read_to_string(self.content_path(id)).map_err(|e| not_found_or(e, id))?;
        Ok(WhiteboardRecord { meta, content })
    }

    async fn save(
        &self,
        name: &str,
        content: &str,
        id: Option<&WhiteboardId>,
    ) -> StorageResult<WhiteboardId> {
        let id = match id {
            Some(id) => {
                self.checked(id)?;
                id.clone()
            }
            None => WhiteboardId::new_random(),
        };

        // Create the store directory if it doesn't exist
        fs::create_dir_all(&self.dir)?;

        let previous = match self.read_meta(&id) {
            Ok(meta) => Some(meta),
            Err(StorageError::NotFound(_)) => None,
            Err(err) => return Err(err),
        };

        // A record exists once its metadata does, so that lands first
        self.write_meta(&saved_meta(id.clone(), name, content, previous.as_ref()))?;
        fs::write(self.content_path(&id), content)?;
        Ok(id)
    }

    async fn list(&self) -> StorageResult<Vec<WhiteboardMeta>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // Nothing saved yet
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut list = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let parsed = fs::read_to_string(&path)
                .map_err(StorageError::from)
                .and_then(|json| serde_json::from_str::<WhiteboardMeta>(&json).map_err(StorageError::from));
            match parsed {
                Ok(meta) => list.push(meta),
                Err(err) => log::warn!("Skipping unreadable metadata {}: {}", path.display(), err),
            }
        }

        newest_first(&mut list);
        Ok(list)
    }

    async fn delete(&self, id: &WhiteboardId) -> StorageResult<()> {
        self.checked(id)?;
        fs::remove_file(self.meta_path(id)).map_err(|e| not_found_or(e, id))?;
        match fs::remove_file(self.content_path(id)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }

    async fn rename(&self, id: &WhiteboardId, name: &str) -> StorageResult<()> {
        self.checked(id)?;
        let mut meta = self.read_meta(id)?;
        meta.name = name.to_owned();
        meta.modified = Utc::now();
        self.write_meta(&meta)
    }
}

/// Boards whose name contains `term`, ignoring case. An empty term matches everything.
pub fn filter_by_name<'a>(list: &'a [WhiteboardMeta], term: &str) -> Vec<&'a WhiteboardMeta> {
    let term = term.trim().to_lowercase();
    list.iter()
        .filter(|meta| term.is_empty() || meta.name.to_lowercase().contains(&term))
        .collect()
}

/// Human friendly modification time: `Today, 14:05`, `Yesterday, 09:30` or `Mar 4, 2025`.
pub fn format_modified(modified: NaiveDateTime, now: NaiveDateTime) -> String {
    let date = modified.date();
    let today = now.date();
    if date == today {
        format!("Today, {}", modified.format("%H:%M"))
    } else if today.pred_opt() == Some(date) {
        format!("Yesterday, {}", modified.format("%H:%M"))
    } else {
        modified.format("%b %-d, %Y").to_string()
    }
}

/// [`format_modified`] in the local time zone, relative to now.
pub fn format_modified_local(modified: &DateTime<Utc>) -> String {
    let local = modified.with_timezone(&Local).naive_local();
    format_modified(local, Local::now().naive_local())
}
