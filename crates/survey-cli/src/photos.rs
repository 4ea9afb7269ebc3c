use std::fs;
use std::path::PathBuf;

use survey_spec::{PhotoError, PhotoLocator, PhotoLocatorProvider};

/// Hands out `file://` locators for numbered files inside a directory.
pub struct DirectoryPhotos {
    dir: PathBuf,
    issued: usize,
}

impl DirectoryPhotos {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir, issued: 0 }
    }
}

impl PhotoLocatorProvider for DirectoryPhotos {
    fn new_locator(&mut self) -> Result<PhotoLocator, PhotoError> {
        fs::create_dir_all(&self.dir)?;
        let dir = self.dir.canonicalize()?;
        self.issued += 1;
        let path = dir.join(format!("selfie-{}.jpg", self.issued));
        Ok(PhotoLocator::new(format!("file://{}", path.display())))
    }
}
