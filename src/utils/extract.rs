use std::fs;
use std::io::{self, Cursor, Read};
use std::path::Path;

use crate::errors::FetchError;
use crate::platform::ArchiveKind;

pub fn unpack(kind: ArchiveKind, bytes: &[u8], extract_dir: &Path) -> Result<(), FetchError> {
    match kind {
        ArchiveKind::TarXz => unpack_tar_xz(bytes, extract_dir),
        ArchiveKind::Zip => unpack_zip(bytes, extract_dir),
    }
}

/// Unpacks an xz-compressed tarball held in memory.
///
/// Bad compression or tar headers are `CorruptArchive`; failures writing to
/// `extract_dir` are `Io`.
pub fn unpack_tar_xz(bytes: &[u8], extract_dir: &Path) -> Result<(), FetchError> {
    let mut tar_bytes = Vec::new();
    xz2::read::XzDecoder::new(bytes)
        .read_to_end(&mut tar_bytes)
        .map_err(|e| FetchError::corrupt_archive_with_source("not a valid xz stream", e))?;

    create_dir(extract_dir)?;

    let mut archive = tar::Archive::new(tar_bytes.as_slice());
    let entries = archive
        .entries()
        .map_err(|e| FetchError::corrupt_archive_with_source("not a valid tar archive", e))?;

    for entry in entries {
        let mut entry = entry
            .map_err(|e| FetchError::corrupt_archive_with_source("unreadable tar entry", e))?;
        let name = entry
            .path()
            .map(|p| p.display().to_string())
            .map_err(|e| FetchError::corrupt_archive_with_source("invalid tar entry path", e))?;

        let unpacked = entry
            .unpack_in(extract_dir)
            .map_err(|e| FetchError::io(format!("failed to unpack {}", name), e))?;
        if !unpacked {
            return Err(FetchError::corrupt_archive(format!(
                "entry {} points outside the destination",
                name
            )));
        }
    }

    Ok(())
}

pub fn unpack_zip(bytes: &[u8], extract_dir: &Path) -> Result<(), FetchError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| FetchError::corrupt_archive_with_source("not a valid zip archive", e))?;

    create_dir(extract_dir)?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| FetchError::corrupt_archive_with_source(format!("unreadable zip entry {}", i), e))?;

        let Some(relative) = file.enclosed_name().map(Path::to_path_buf) else {
            return Err(FetchError::corrupt_archive(format!(
                "entry {} points outside the destination",
                file.name()
            )));
        };
        let outpath = extract_dir.join(relative);

        if file.is_dir() {
            create_dir(&outpath)?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            create_dir(parent)?;
        }
        let mut outfile = fs::File::create(&outpath)
            .map_err(|e| FetchError::io(format!("failed to create {}", outpath.display()), e))?;
        // Inflate errors surface as InvalidData; anything else is the write side.
        io::copy(&mut file, &mut outfile).map_err(|e| {
            if e.kind() == io::ErrorKind::InvalidData {
                FetchError::corrupt_archive_with_source(format!("cannot inflate {}", file.name()), e)
            } else {
                FetchError::io(format!("failed to write {}", outpath.display()), e)
            }
        })?;
    }

    Ok(())
}

/// Moves every child of `extract_dir/folder` up into `extract_dir` and removes the
/// emptied folder.
///
/// Refuses to overwrite: a name already present in `extract_dir` is an error.
pub fn flatten(extract_dir: &Path, folder: &str) -> Result<(), FetchError> {
    let wrapper = extract_dir.join(folder);
    let children = fs::read_dir(&wrapper)
        .map_err(|e| FetchError::io(format!("cannot read {}", wrapper.display()), e))?;

    for child in children {
        let child =
            child.map_err(|e| FetchError::io(format!("cannot read {}", wrapper.display()), e))?;
        let target = extract_dir.join(child.file_name());

        if fs::symlink_metadata(&target).is_ok() {
            return Err(FetchError::io(
                format!("cannot move {} into place", child.path().display()),
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists", target.display()),
                ),
            ));
        }

        fs::rename(child.path(), &target).map_err(|e| {
            FetchError::io(
                format!("cannot move {} to {}", child.path().display(), target.display()),
                e,
            )
        })?;
    }

    fs::remove_dir(&wrapper)
        .map_err(|e| FetchError::io(format!("cannot remove {}", wrapper.display()), e))
}

/// Sets mode 0755 on each direct entry of `bin_dir`.
pub fn mark_executable(bin_dir: &Path) -> Result<(), FetchError> {
    let entries = fs::read_dir(bin_dir)
        .map_err(|e| FetchError::io(format!("cannot read {}", bin_dir.display()), e))?;

    for entry in entries {
        let path = entry
            .map_err(|e| FetchError::io(format!("cannot read {}", bin_dir.display()), e))?
            .path();
        set_executable(&path)
            .map_err(|e| FetchError::io(format!("cannot chmod {}", path.display()), e))?;
    }

    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

fn create_dir(path: &Path) -> Result<(), FetchError> {
    fs::create_dir_all(path)
        .map_err(|e| FetchError::io(format!("cannot create {}", path.display()), e))
}
