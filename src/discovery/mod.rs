mod file_finder;

pub use file_finder::{find, relative_path, ArtifactKind, FileFinder};
