use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A single opaque string slot that backs the blob store
///
/// Slots are not databases. Whatever is written is kept on a best-effort
/// basis for a single session of a single user.
pub trait Slot {
    /// Current contents, `None` when the slot has never been written or was cleared
    fn read(&self) -> Option<String>;

    /// Replace the contents of the slot
    fn write(&self, contents: String) -> io::Result<()>;
}

/// In-memory slot that lives as long as any of its handles
///
/// Clones share the same underlying slot, so a context rebuilt over a clone
/// observes everything written through the original.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    cell: Rc<RefCell<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with raw contents
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Some(contents.into()))),
        }
    }
}

impl Slot for MemorySlot {
    fn read(&self) -> Option<String> {
        self.cell.borrow().clone()
    }

    fn write(&self, contents: String) -> io::Result<()> {
        *self.cell.borrow_mut() = Some(contents);
        Ok(())
    }
}

/// Slot kept in a single file on disk
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Use the file at `path`, creating parent directories on first write
    pub fn new(path: impl AsRef<Path>) -> Self {
        tracing::info!("Using storage file at: {:?}", path.as_ref());
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Slot for FileSlot {
    fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.is_empty() => None,
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read storage file {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn write(&self, contents: String) -> io::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, contents)
    }
}
