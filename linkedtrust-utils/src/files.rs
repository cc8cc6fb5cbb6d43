use std::fs::{
    rename,
    OpenOptions,
    Permissions,
};
use std::io::Error;
use std::io::prelude::*;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

/// Returns `None` if file doesn't exist
pub fn read_file_if_exists(file_path: &Path) -> Result<Option<String>, Error> {
    match std::fs::read_to_string(file_path) {
        Ok(data) => Ok(Some(data)),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

fn temporary_path(file_path: &Path) -> PathBuf {
    let mut file_name = file_path.file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    file_name.push(".tmp");
    file_path.with_file_name(file_name)
}

/// Writes data to a temporary file created with the given mode,
/// then moves it into place
pub fn write_file_atomic(
    data: &[u8],
    file_path: &Path,
    mode: u32,
) -> Result<(), Error> {
    let temp_path = temporary_path(file_path);
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(&temp_path)?;
    // Leftover temporary file may have different mode
    file.set_permissions(Permissions::from_mode(mode))?;
    file.write_all(data)?;
    file.sync_all()?;
    rename(&temp_path, file_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_file_if_exists() {
        let file_path = std::env::temp_dir()
            .join(format!("linkedtrust-utils-files-{}", std::process::id()));
        std::fs::write(&file_path, b"test").unwrap();
        let data = read_file_if_exists(&file_path).unwrap();
        assert_eq!(data.as_deref(), Some("test"));
        std::fs::remove_file(&file_path).unwrap();
        assert_eq!(read_file_if_exists(&file_path).unwrap(), None);
    }

    #[test]
    fn test_write_file_atomic() {
        let file_path = std::env::temp_dir()
            .join(format!("linkedtrust-utils-atomic-{}.json", std::process::id()));
        write_file_atomic(b"first", &file_path, 0o600).unwrap();
        write_file_atomic(b"second", &file_path, 0o600).unwrap();
        let mode = std::fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        let data = read_file_if_exists(&file_path).unwrap();
        assert_eq!(data.as_deref(), Some("second"));
        assert_eq!(temporary_path(&file_path).exists(), false);
        std::fs::remove_file(&file_path).unwrap();
    }
}
