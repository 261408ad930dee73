//! Fixed-size partitioning of discovered files.

use mdtoolkit_shared::{DiscoveredFile, FileGroup, MdToolkitError, Result};

/// Split `files` into consecutive groups of `size`, numbered from 1.
///
/// Order is preserved; only the last group may be shorter. No input yields
/// no groups.
pub fn group_files(files: &[DiscoveredFile], size: usize) -> Result<Vec<FileGroup>> {
    if size < 1 {
        return Err(MdToolkitError::InvalidGroupSize(size));
    }

    Ok(files
        .chunks(size)
        .enumerate()
        .map(|(i, chunk)| FileGroup {
            index: i + 1,
            members: chunk.to_vec(),
        })
        .collect())
}
