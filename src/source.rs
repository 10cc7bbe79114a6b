use core::fmt;
use std::fs;
use std::io;
use std::path::{PathBuf, Path};


#[derive(Debug, Clone)]
pub enum SourceType {
    String(String),
    File(PathBuf),
}

/// Represents a "source" of source code, and provides the means to load its text
#[derive(Debug, Clone)]
pub struct ModuleSource {
    name: String,
    source: SourceType,
}

impl ModuleSource {
    pub fn new(name: impl ToString, source: SourceType) -> Self {
        ModuleSource {
            name: name.to_string(), 
            source,
        }
    }
    
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::new(path.display(), SourceType::File(path.to_path_buf()))
    }
    
    pub fn from_string(name: impl ToString, text: impl Into<String>) -> Self {
        Self::new(name, SourceType::String(text.into()))
    }
    
    pub fn name(&self) -> &str { self.name.as_str() }
    pub fn source(&self) -> &SourceType { &self.source }
    
    /// Load the whole source text
    pub fn read_text(&self) -> io::Result<String> {
        match &self.source {
            SourceType::String(string) => Ok(string.clone()),
            SourceType::File(path) => fs::read_to_string(path),
        }
    }
}

impl fmt::Display for ModuleSource {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            SourceType::String(..) => write!(fmt, "<{}>", self.name),
            SourceType::File(..) => write!(fmt, "\"{}\"", self.name),
        }
    }
}
