use crate::errors::LinkdownError;
use anyhow::Context;
use log::debug;
use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

/// Helper function to read a file that logs the path of the file in case of an error.
pub fn read_file(path: &Path) -> Result<Vec<u8>, anyhow::Error> {
    let mut buffer = Vec::new();
    let mut file = open_file(path)?;
    file.read_to_end(&mut buffer)
        .context(format!("Can't read file at {}", path.display()))?;
    Ok(buffer)
}

/// Helper function to write a file that logs the path of the file in case of an error.
pub fn write_file(path: &Path, content: &[u8]) -> Result<(), anyhow::Error> {
    let mut file = create_file(path)?;
    file.write_all(content)
        .context(format!("Can't write file at {}", path.display()))?;
    file.flush()?;
    Ok(())
}

/// Helper function to open a file that logs the path of the file in case of an error.
pub fn open_file(path: &Path) -> Result<File, anyhow::Error> {
    let file = File::open(path).context(format!("Can't open file at {}", path.display()))?;
    Ok(file)
}

/// Helper function to create a file that logs the path of the file in case of an error.
pub fn create_file(path: &Path) -> Result<File, anyhow::Error> {
    let file = File::create(path).context(format!("Can't create file at {}", path.display()))?;
    Ok(file)
}

/// Helper function to remove a file that logs the path of the file in case of an error.
pub fn remove_file(path: &Path) -> Result<(), anyhow::Error> {
    if path.exists() {
        fs::remove_file(path).context(format!("Can't remove file at {}", path.display()))
    } else {
        Ok(())
    }
}

/// The hidden sibling `.<name>.tmp` of `path`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut file_name = OsString::from(".");
    file_name.push(path.file_name().unwrap_or_else(|| path.as_os_str()));
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

/// Write a file through a temporary sibling which is renamed to `path` on
/// success and removed on error.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<(), LinkdownError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), LinkdownError>,
{
    let temp_path = temp_path(path);
    debug!("Write temporary file at {}", temp_path.display());

    let file = File::create(&temp_path).map_err(|err| output_error(&temp_path, err))?;
    let mut writer = BufWriter::new(file);

    let res = write(&mut writer).and_then(|()| {
        writer
            .flush()
            .map_err(|err| output_error(&temp_path, err))?;
        fs::rename(&temp_path, path).map_err(|err| output_error(path, err))
    });

    if res.is_err() {
        if let Err(err) = remove_file(&temp_path) {
            debug!("{err:#}");
        }
    }

    res
}

fn output_error(path: &Path, err: io::Error) -> LinkdownError {
    LinkdownError::Output(io::Error::new(
        err.kind(),
        format!("{}: {err}", path.display()),
    ))
}
