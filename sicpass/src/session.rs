//! Keeps the last-used source and operation table between runs.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

const SOURCE_FILE: &str = "source.asm";
const OPTAB_FILE: &str = "optab.txt";

#[derive(Debug, Clone)]
pub struct Session {
    dir: PathBuf,
}

impl Session {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_owned(),
        }
    }

    pub fn save_source(&self, program_text: &str) -> io::Result<()> {
        self.write(SOURCE_FILE, program_text)
    }

    pub fn save_optab(&self, optab_text: &str) -> io::Result<()> {
        self.write(OPTAB_FILE, optab_text)
    }

    /// Returns `(source, optab)`. Anything never saved comes back empty.
    pub fn restore(&self) -> io::Result<(String, String)> {
        Ok((self.read(SOURCE_FILE)?, self.read(OPTAB_FILE)?))
    }

    pub fn clear(&self) -> io::Result<()> {
        for name in [SOURCE_FILE, OPTAB_FILE] {
            match fs::remove_file(self.dir.join(name)) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
                _ => {}
            }
        }
        Ok(())
    }

    fn write(&self, name: &str, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(name), contents)
    }

    fn read(&self, name: &str) -> io::Result<String> {
        match fs::read_to_string(self.dir.join(name)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            result => result,
        }
    }
}
